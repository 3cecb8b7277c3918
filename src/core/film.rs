use crate::core::loader::InputParams;

/// Sensor-side view of the image plane: a pixel grid and the radius of the
/// reconstruction filter samples are splatted with. Sample accumulation
/// itself happens downstream and is not modelled here.
pub struct Film {
    width: u32,
    height: u32,
    filter_radius: f32,
}

impl Film {
    pub const DEFAULT_FILTER_RADIUS: f32 = 0.5;

    pub fn new(width: u32, height: u32, filter_radius: f32) -> Self {
        Self {
            width,
            height,
            filter_radius,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let size = params.get_int2_or("size", [1, 1]);
        if size[0] <= 0 || size[1] <= 0 {
            anyhow::bail!(format!("{} - 'size' should be positive", params.name()));
        }
        let filter_radius = params.get_float_or("filter_radius", Self::DEFAULT_FILTER_RADIUS);
        Ok(Self::new(size[0] as u32, size[1] as u32, filter_radius))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn filter_radius(&self) -> f32 {
        self.filter_radius
    }
}

impl Default for Film {
    fn default() -> Self {
        Self::new(1, 1, Self::DEFAULT_FILTER_RADIUS)
    }
}
