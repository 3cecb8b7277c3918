#[derive(Copy, Clone, Debug)]
pub struct Bbox {
    pub p_min: glam::Vec3A,
    pub p_max: glam::Vec3A,
}

#[derive(Copy, Clone, Debug)]
pub struct BoundingSphere {
    pub center: glam::Vec3A,
    pub radius: f32,
}

impl Bbox {
    pub fn new(p_min: glam::Vec3A, p_max: glam::Vec3A) -> Self {
        Self { p_min, p_max }
    }

    pub fn from_points(points: &[glam::Vec3A]) -> Self {
        let mut p_min = points[0];
        let mut p_max = points[0];
        points.iter().skip(1).for_each(|p| {
            p_min = p_min.min(*p);
            p_max = p_max.max(*p);
        });
        Self { p_min, p_max }
    }

    pub fn empty() -> Self {
        Self {
            p_min: glam::Vec3A::new(f32::MAX, f32::MAX, f32::MAX),
            p_max: glam::Vec3A::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    pub fn merge(mut self, another: Bbox) -> Self {
        self.p_min = self.p_min.min(another.p_min);
        self.p_max = self.p_max.max(another.p_max);
        self
    }

    pub fn centroid(&self) -> glam::Vec3A {
        0.5 * (self.p_min + self.p_max)
    }

    pub fn bounding_sphere(&self) -> BoundingSphere {
        if self.is_empty() {
            return BoundingSphere {
                center: glam::Vec3A::ZERO,
                radius: 0.0,
            };
        }
        let center = self.centroid();
        BoundingSphere {
            center,
            radius: center.distance(self.p_max),
        }
    }
}

impl BoundingSphere {
    /// Returns a sphere guaranteed to strictly enclose this one, so that
    /// points placed on its surface cannot coincide with scene geometry.
    pub fn expanded(&self, eps: f32) -> Self {
        Self {
            center: self.center,
            radius: eps.max(self.radius * (1.0 + eps)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bbox_sentinel() {
        let bbox = Bbox::empty();
        assert!(bbox.is_empty());
        let merged = bbox.merge(Bbox::new(glam::Vec3A::ZERO, glam::Vec3A::ONE));
        assert!(!merged.is_empty());
    }

    #[test]
    fn test_bounding_sphere_of_cube() {
        let bbox = Bbox::new(glam::Vec3A::splat(-1.0), glam::Vec3A::splat(1.0));
        let sphere = bbox.bounding_sphere();
        assert!(sphere.center.length() < 1e-6);
        assert!((sphere.radius - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_expanded_is_strictly_larger() {
        let sphere = BoundingSphere {
            center: glam::Vec3A::ZERO,
            radius: 2.0,
        };
        assert!(sphere.expanded(1e-4).radius > sphere.radius);

        let degenerate = BoundingSphere {
            center: glam::Vec3A::ZERO,
            radius: 0.0,
        };
        assert!(degenerate.expanded(1e-4).radius > 0.0);
    }
}
