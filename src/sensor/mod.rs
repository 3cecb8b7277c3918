mod distant;

pub use distant::*;

use crate::core::{
    bbox::Bbox,
    film::Film,
    loader::InputParams,
    ray::{AuxiliaryRay, Ray},
    scene::Scene,
    scene_resources::SceneResources,
};

/// One generated sensor ray together with its Monte-Carlo importance
/// weight. `weight` is zero whenever `valid` is false, so accumulation can
/// always just add `weight`-scaled contributions.
#[derive(Debug, Copy, Clone)]
pub struct RaySample {
    pub ray: Ray,
    pub weight: f32,
    pub valid: bool,
}

impl RaySample {
    pub fn invalid(ray: Ray) -> Self {
        Self {
            ray,
            weight: 0.0,
            valid: false,
        }
    }
}

#[enum_dispatch::enum_dispatch(Sensor)]
pub trait SensorT: Send + Sync {
    /// Generates a ray and its importance weight from one Monte-Carlo
    /// sample. Pure with respect to the sensor state; safe to call from
    /// many threads once the sensor is attached to a scene.
    fn sample_ray(
        &self,
        time: f32,
        wavelength_sample: f32,
        aperture_sample: (f32, f32),
    ) -> RaySample;

    /// Same as `sample_ray` but also fills in auxiliary rays for footprint
    /// estimation, offset by one pixel on the film.
    fn sample_ray_differential(
        &self,
        time: f32,
        wavelength_sample: f32,
        aperture_sample: (f32, f32),
    ) -> RaySample {
        let mut sample = self.sample_ray(time, wavelength_sample, aperture_sample);
        let (width, height) = self.film().size();
        // The one-pixel step is clamped so samples near the upper film
        // border stay inside [0, 1).
        let max_sample = 1.0 - f32::EPSILON;
        let x_sample = (aperture_sample.0 + 1.0 / width as f32).min(max_sample);
        let y_sample = (aperture_sample.1 + 1.0 / height as f32).min(max_sample);
        let ray_x = self
            .sample_ray(time, wavelength_sample, (x_sample, aperture_sample.1))
            .ray;
        let ray_y = self
            .sample_ray(time, wavelength_sample, (aperture_sample.0, y_sample))
            .ray;
        sample.ray.aux_ray = Some(AuxiliaryRay::from_rays(ray_x, ray_y));
        sample
    }

    /// Captures scene-wide state the sensor needs for sampling. Must
    /// complete before the first `sample_ray` call; recomputed from
    /// scratch on every invocation.
    fn set_scene(&mut self, scene: &Scene);

    fn film(&self) -> &Film;

    fn bbox(&self) -> Bbox;

    fn describe(&self) -> String;
}

#[enum_dispatch::enum_dispatch]
pub enum Sensor {
    DistantSensor,
}

pub fn create_sensor_from_params(
    rsc: &SceneResources,
    params: &mut InputParams,
    film: Film,
) -> anyhow::Result<Sensor> {
    params.set_name("sensor".into());
    let ty = params.get_str("type")?;
    params.set_name(format!("sensor-{}", ty).into());

    let res = match ty.as_str() {
        "distant" => DistantSensor::load(rsc, params, film)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    params.check_unused_keys();

    Ok(res)
}
