use crate::core::spectrum::Wavelengths;

#[derive(Debug, Copy, Clone)]
pub struct Ray {
    pub origin: glam::Vec3A,
    pub direction: glam::Vec3A,
    pub time: f32,
    pub wavelengths: Wavelengths,
    pub t_min: f32,
    pub aux_ray: Option<AuxiliaryRay>,
}

#[derive(Debug, Copy, Clone)]
pub struct AuxiliaryRay {
    pub x_origin: glam::Vec3A,
    pub x_direction: glam::Vec3A,
    pub y_origin: glam::Vec3A,
    pub y_direction: glam::Vec3A,
}

impl Ray {
    pub const T_MIN_EPS: f32 = 0.0001;

    pub fn new(origin: glam::Vec3A, direction: glam::Vec3A, time: f32) -> Self {
        Self {
            origin,
            direction,
            time,
            wavelengths: Wavelengths::default(),
            t_min: Self::T_MIN_EPS,
            aux_ray: None,
        }
    }

    pub fn point_at(&self, t: f32) -> glam::Vec3A {
        self.origin + self.direction * t
    }
}

impl AuxiliaryRay {
    pub fn from_rays(ray_x: Ray, ray_y: Ray) -> Self {
        Self {
            x_origin: ray_x.origin,
            x_direction: ray_x.direction,
            y_origin: ray_y.origin,
            y_direction: ray_y.direction,
        }
    }
}
