use crate::core::{bbox::Bbox, loader::InputParams, ray::Ray};

use super::{PositionSample, ShapeIntersection, ShapeT};

/// Planar rectangle given by its center and two full edge vectors.
pub struct Rectangle {
    center: glam::Vec3A,
    edge_u: glam::Vec3A,
    edge_v: glam::Vec3A,
    normal: glam::Vec3A,
    area: f32,
    bbox: Bbox,
}

impl Rectangle {
    pub fn new(center: glam::Vec3A, edge_u: glam::Vec3A, edge_v: glam::Vec3A) -> Self {
        let cross = edge_u.cross(edge_v);
        let area = cross.length();
        debug_assert!(area > 0.0, "rectangle edges must span a plane");
        let normal = cross / area;
        let half_u = 0.5 * edge_u;
        let half_v = 0.5 * edge_v;
        let bbox = Bbox::from_points(&[
            center - half_u - half_v,
            center - half_u + half_v,
            center + half_u - half_v,
            center + half_u + half_v,
        ]);
        Self {
            center,
            edge_u,
            edge_v,
            normal,
            area,
            bbox,
        }
    }

    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let center = params.get_float3_or("center", [0.0, 0.0, 0.0]);
        let edge_u = params.get_float3("edge_u")?;
        let edge_v = params.get_float3("edge_v")?;

        let edge_u: glam::Vec3A = edge_u.into();
        let edge_v: glam::Vec3A = edge_v.into();
        if edge_u.cross(edge_v).length_squared() == 0.0 {
            anyhow::bail!(format!(
                "{} - 'edge_u' and 'edge_v' should span a plane",
                params.name()
            ));
        }

        Ok(Rectangle::new(center.into(), edge_u, edge_v))
    }
}

impl ShapeT for Rectangle {
    fn sample_position(&self, _time: f32, sample: (f32, f32)) -> PositionSample {
        let position = self.center
            + (sample.0 - 0.5) * self.edge_u
            + (sample.1 - 0.5) * self.edge_v;
        PositionSample {
            position,
            normal: self.normal,
            pdf: 1.0 / self.area,
        }
    }

    fn intersect(&self, ray: &Ray) -> Option<ShapeIntersection> {
        let denom = self.normal.dot(ray.direction);
        if denom.abs() < 1e-8 {
            return None;
        }
        let t = self.normal.dot(self.center - ray.origin) / denom;
        if t <= ray.t_min {
            return None;
        }

        let position = ray.point_at(t);
        let offset = position - self.center;
        let u = offset.dot(self.edge_u) / self.edge_u.length_squared();
        let v = offset.dot(self.edge_v) / self.edge_v.length_squared();
        if u.abs() > 0.5 || v.abs() > 0.5 {
            return None;
        }

        Some(ShapeIntersection {
            t,
            position,
            normal: self.normal,
        })
    }

    fn bbox(&self) -> Bbox {
        self.bbox
    }

    fn area(&self) -> f32 {
        self.area
    }
}
