mod rectangle;
mod sphere;

pub use rectangle::*;
pub use sphere::*;

use crate::core::{
    bbox::Bbox, loader::InputParams, ray::Ray, scene_resources::SceneResources,
};

/// A position sampled on a shape's surface, with its sampling density in
/// area measure.
#[derive(Debug, Copy, Clone)]
pub struct PositionSample {
    pub position: glam::Vec3A,
    pub normal: glam::Vec3A,
    pub pdf: f32,
}

#[derive(Debug, Copy, Clone)]
pub struct ShapeIntersection {
    pub t: f32,
    pub position: glam::Vec3A,
    pub normal: glam::Vec3A,
}

#[enum_dispatch::enum_dispatch(Shape)]
pub trait ShapeT: Send + Sync {
    /// Samples a position on the surface from a 2D sample in [0, 1)^2.
    fn sample_position(&self, time: f32, sample: (f32, f32)) -> PositionSample;

    fn intersect(&self, ray: &Ray) -> Option<ShapeIntersection>;

    fn bbox(&self) -> Bbox;

    fn area(&self) -> f32;
}

#[enum_dispatch::enum_dispatch]
pub enum Shape {
    Sphere,
    Rectangle,
}

pub fn create_shape_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("shape".into());
    let ty = params.get_str("type")?;
    let name = params.get_str("name")?;
    params.set_name(format!("shape-{}-{}", ty, name).into());

    let res = match ty.as_str() {
        "sphere" => Sphere::load(params)?.into(),
        "rectangle" => Rectangle::load(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    rsc.add_shape(name, res)?;

    params.check_unused_keys();

    Ok(())
}
