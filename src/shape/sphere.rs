use crate::core::{bbox::Bbox, loader::InputParams, ray::Ray};

use super::{PositionSample, ShapeIntersection, ShapeT};

pub struct Sphere {
    center: glam::Vec3A,
    radius: f32,
    bbox: Bbox,
}

impl Sphere {
    pub fn new(center: glam::Vec3A, radius: f32) -> Self {
        let delta = glam::Vec3A::new(radius, radius, radius);
        let bbox = Bbox::new(center - delta, center + delta);
        Self {
            center,
            radius,
            bbox,
        }
    }

    fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32)> {
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;
        let delta = b * b - a * c;
        if delta >= 0.0 {
            let delta = delta.sqrt();
            let min = (-b - delta) / a;
            let max = (-b + delta) / a;
            Some((min, max))
        } else {
            None
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let center = params.get_float3_or("center", [0.0, 0.0, 0.0]);

        let radius = params.get_float("radius")?;
        if radius <= 0.0 {
            anyhow::bail!(format!("{} - 'radius' should be positive", params.name()));
        }

        Ok(Sphere::new(center.into(), radius))
    }
}

impl ShapeT for Sphere {
    fn sample_position(&self, _time: f32, sample: (f32, f32)) -> PositionSample {
        let phi = sample.0 * 2.0 * std::f32::consts::PI;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let cos_theta = 1.0 - 2.0 * sample.1;
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
        let normal = glam::Vec3A::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta);

        let area = self.area();
        PositionSample {
            position: self.center + normal * self.radius,
            normal,
            pdf: if area > 0.0 { 1.0 / area } else { 0.0 },
        }
    }

    fn intersect(&self, ray: &Ray) -> Option<ShapeIntersection> {
        if let Some((min, max)) = self.intersect_ray(ray) {
            let t = if min < ray.t_min { max } else { min };
            if t > ray.t_min {
                let position = ray.point_at(t);
                return Some(ShapeIntersection {
                    t,
                    position,
                    normal: (position - self.center) / self.radius,
                });
            }
        }
        None
    }

    fn bbox(&self) -> Bbox {
        self.bbox
    }

    fn area(&self) -> f32 {
        4.0 * std::f32::consts::PI * self.radius * self.radius
    }
}
