use std::sync::Arc;

use crate::core::{
    bbox::{Bbox, BoundingSphere},
    film::Film,
    loader::{InputParams, PointOrRef},
    ray::Ray,
    scene::Scene,
    scene_resources::SceneResources,
    spectrum,
    transform::{coordinate_system, AnimatedTransform, Transform},
    warp,
};
use crate::shape::{Shape, ShapeT};

use super::{RaySample, SensorT};

/// How the far-field target point of a generated ray is chosen.
pub enum RayTarget {
    /// Every ray aims at one fixed world-space point.
    Point(glam::Vec3A),
    /// Target points are sampled over the surface of a scene shape.
    Shape(Arc<Shape>),
    /// Target points cover the cross section of the scene's bounding
    /// sphere perpendicular to the viewing direction.
    None,
}

/// How the near-field origin of a generated ray is chosen.
pub enum RayOrigin {
    /// Origins are found by projecting the target backwards onto a shape.
    Shape(Arc<Shape>),
    /// Origins are pushed outside the scene's bounding sphere.
    BoundingSphere,
}

/// Distant directional sensor recording radiation leaving the scene in a
/// single fixed direction, as seen from infinity.
///
/// By default target points are sampled uniformly on the cross section of
/// the scene's bounding sphere and origins are placed outside all scene
/// geometry; `ray_target` and `ray_origin` select the other strategies.
/// The recorded quantity is a flux proportional to the targeted area, or a
/// radiance when the target is a point.
pub struct DistantSensor {
    to_world: AnimatedTransform,
    film: Film,
    target: RayTarget,
    origin: RayOrigin,
    bsphere: BoundingSphere,
}

impl DistantSensor {
    pub fn new(
        to_world: AnimatedTransform,
        film: Film,
        target: RayTarget,
        origin: RayOrigin,
    ) -> anyhow::Result<Self> {
        if film.size() != (1, 1) {
            anyhow::bail!(format!(
                "distant sensor only supports a film of 1x1 pixels, got {}x{}",
                film.width(),
                film.height()
            ));
        }
        if film.filter_radius() > 0.5 + Ray::T_MIN_EPS {
            log::warn!(
                "distant sensor should be used with a reconstruction filter \
                 of radius 0.5 or lower (e.g. the default box filter)"
            );
        }

        Ok(Self {
            to_world,
            film,
            target,
            origin,
            bsphere: BoundingSphere {
                center: glam::Vec3A::ZERO,
                radius: 0.0,
            },
        })
    }

    /// Resolves the sampling strategies from the property set. This runs
    /// once per sensor; `sample_ray` only switches on the resolved tags.
    pub fn load(
        rsc: &SceneResources,
        params: &mut InputParams,
        film: Film,
    ) -> anyhow::Result<Self> {
        if params.contains_key("direction") && params.contains_key("to_world") {
            anyhow::bail!(format!(
                "{} - only one of 'direction' and 'to_world' can be specified",
                params.name()
            ));
        }

        let to_world = if params.contains_key("direction") {
            let direction: glam::Vec3A = params.get_float3("direction")?.into();
            let direction = direction.normalize();
            let (up, _) = coordinate_system(direction);
            AnimatedTransform::new_static(Transform::look_at(
                glam::Vec3A::ZERO,
                direction,
                up,
            ))
        } else if params.contains_key("to_world") {
            let matrix = params.get_matrix("to_world")?;
            AnimatedTransform::new_static(Transform::new(glam::Affine3A::from_mat4(matrix)))
        } else {
            AnimatedTransform::new_static(Transform::default())
        };

        let target = if params.contains_key("ray_target") {
            match params.get_point_or_reference("ray_target")? {
                PointOrRef::Point(point) => RayTarget::Point(point.into()),
                PointOrRef::Reference(name) => RayTarget::Shape(rsc.clone_shape(&name)?),
            }
        } else {
            log::debug!("{} - no ray target specified", params.name());
            RayTarget::None
        };

        let origin = if params.contains_key("ray_origin") {
            let name = params.get_str("ray_origin")?;
            RayOrigin::Shape(rsc.clone_shape(&name)?)
        } else {
            log::debug!("{} - using bounding sphere for ray origins", params.name());
            RayOrigin::BoundingSphere
        };

        Self::new(to_world, film, target, origin)
    }

    pub fn bounds(&self) -> BoundingSphere {
        self.bsphere
    }
}

impl SensorT for DistantSensor {
    fn sample_ray(
        &self,
        time: f32,
        wavelength_sample: f32,
        aperture_sample: (f32, f32),
    ) -> RaySample {
        // 1. Sample the spectrum.
        let (wavelengths, wav_weight) = spectrum::sample_wavelengths(wavelength_sample);

        // 2. The ray direction is the transformed local +Z axis; no pdf is
        // involved since the direction is fixed by the configuration.
        let trafo = self.to_world.eval(time);
        let direction = trafo.transform_vector3a(glam::Vec3A::Z);

        // 3. Sample the target point.
        let (target, weight) = match &self.target {
            RayTarget::Point(point) => {
                // Cosine against the up axis; to be checked for
                // non-horizontal surfaces.
                (*point, wav_weight * -direction.z)
            }
            RayTarget::Shape(shape) => {
                let ps = shape.sample_position(time, aperture_sample);
                let weight = if ps.pdf > 0.0 {
                    wav_weight * (-direction).dot(ps.normal) / ps.pdf
                } else {
                    0.0
                };
                (ps.position, weight)
            }
            RayTarget::None => {
                let offset = warp::square_to_uniform_disk_concentric(aperture_sample);
                let perp_offset =
                    trafo.transform_vector3a(glam::Vec3A::new(offset.0, offset.1, 0.0));
                let target = self.bsphere.center + perp_offset * self.bsphere.radius;
                let weight =
                    wav_weight * std::f32::consts::PI * self.bsphere.radius * self.bsphere.radius;
                (target, weight)
            }
        };

        // 4. Determine the origin point.
        let (origin, valid) = match &self.origin {
            RayOrigin::Shape(shape) => {
                // Project the target onto the origin shape against the ray
                // direction. A failed projection invalidates only this
                // sample.
                let probe = Ray::new(target, -direction, time);
                match shape.intersect(&probe) {
                    Some(hit) => (hit.position, true),
                    None => (target, false),
                }
            }
            RayOrigin::BoundingSphere => {
                // A target on the cross section disk needs one radius to
                // clear the sphere; any other target may lie inside it and
                // needs two.
                let offset = if matches!(self.target, RayTarget::None) {
                    self.bsphere.radius
                } else {
                    2.0 * self.bsphere.radius
                };
                (target - direction * offset, true)
            }
        };

        let mut ray = Ray::new(origin, direction, time);
        ray.wavelengths = wavelengths;
        if valid {
            RaySample {
                ray,
                weight,
                valid,
            }
        } else {
            RaySample::invalid(ray)
        }
    }

    fn sample_ray_differential(
        &self,
        time: f32,
        wavelength_sample: f32,
        aperture_sample: (f32, f32),
    ) -> RaySample {
        // The film is a single pixel, so there is no footprint to
        // differentiate over.
        let mut sample = self.sample_ray(time, wavelength_sample, aperture_sample);
        sample.ray.aux_ray = None;
        sample
    }

    fn set_scene(&mut self, scene: &Scene) {
        self.bsphere = scene
            .bbox()
            .bounding_sphere()
            .expanded(Ray::T_MIN_EPS);
    }

    fn film(&self) -> &Film {
        &self.film
    }

    fn bbox(&self) -> Bbox {
        // The sensor does not occupy any particular region of space.
        Bbox::empty()
    }

    fn describe(&self) -> String {
        let mut desc = String::from("DistantSensor[\n");
        desc += &format!(
            "  direction = {},\n",
            self.to_world.eval(0.0).transform_vector3a(glam::Vec3A::Z)
        );
        desc += &format!("  film = {}x{},\n", self.film.width(), self.film.height());
        match &self.target {
            RayTarget::Point(point) => desc += &format!("  ray_target = {},\n", point),
            RayTarget::Shape(_) => desc += "  ray_target = shape,\n",
            RayTarget::None => desc += "  ray_target = none,\n",
        }
        match &self.origin {
            RayOrigin::Shape(_) => desc += "  ray_origin = shape,\n",
            RayOrigin::BoundingSphere => desc += "  ray_origin = bounding_sphere,\n",
        }
        desc += "]";
        desc
    }
}
