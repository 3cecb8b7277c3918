#[derive(Debug, Clone, Copy)]
pub struct Transform {
    trans: glam::Affine3A,
    trans_it: glam::Mat3A,
}

impl Transform {
    pub fn new(trans: glam::Affine3A) -> Self {
        let trans_inv = trans.inverse();
        let trans_it = trans_inv.matrix3.transpose();
        Self { trans, trans_it }
    }

    /// Rigid transform placing `origin` so that the local +Z axis points at
    /// `target`, with `up` fixing the roll.
    pub fn look_at(origin: glam::Vec3A, target: glam::Vec3A, up: glam::Vec3A) -> Self {
        let dir = (target - origin).normalize();
        let left = up.cross(dir).normalize();
        let new_up = dir.cross(left);
        let matrix = glam::Mat3A::from_cols(left, new_up, dir);
        Self::new(glam::Affine3A {
            matrix3: matrix,
            translation: origin,
        })
    }

    pub fn transform_point3a(&self, other: glam::Vec3A) -> glam::Vec3A {
        self.trans.transform_point3a(other)
    }

    pub fn transform_vector3a(&self, other: glam::Vec3A) -> glam::Vec3A {
        self.trans.transform_vector3a(other)
    }

    pub fn transform_normal3a(&self, other: glam::Vec3A) -> glam::Vec3A {
        (self.trans_it * other).normalize()
    }

    pub fn affine(&self) -> glam::Affine3A {
        self.trans
    }

    pub fn inverse(&self) -> Transform {
        Transform {
            trans: self.trans.inverse(),
            trans_it: self.trans_it.inverse(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(glam::Affine3A::IDENTITY)
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Self) -> Self::Output {
        Transform {
            trans: self.trans * rhs.trans,
            trans_it: self.trans_it * rhs.trans_it,
        }
    }
}

/// Rigid transform interpolated between two keyframes. `eval` clamps the
/// time to [0, 1]; a static transform simply uses identical keyframes.
#[derive(Debug, Clone, Copy)]
pub struct AnimatedTransform {
    begin_rotation: glam::Quat,
    begin_translation: glam::Vec3,
    end_rotation: glam::Quat,
    end_translation: glam::Vec3,
}

impl AnimatedTransform {
    pub fn new_static(trans: Transform) -> Self {
        let (_, rotation, translation) = trans.affine().to_scale_rotation_translation();
        Self {
            begin_rotation: rotation,
            begin_translation: translation,
            end_rotation: rotation,
            end_translation: translation,
        }
    }

    pub fn new(begin: Transform, end: Transform) -> Self {
        let (_, begin_rotation, begin_translation) =
            begin.affine().to_scale_rotation_translation();
        let (_, end_rotation, end_translation) = end.affine().to_scale_rotation_translation();
        Self {
            begin_rotation,
            begin_translation,
            end_rotation,
            end_translation,
        }
    }

    pub fn eval(&self, time: f32) -> Transform {
        let t = time.clamp(0.0, 1.0);
        let rotation = self.begin_rotation.slerp(self.end_rotation, t);
        let translation = self.begin_translation.lerp(self.end_translation, t);
        Transform::new(glam::Affine3A::from_rotation_translation(
            rotation,
            translation,
        ))
    }
}

/// Builds an orthonormal basis around a unit vector without branches on
/// anything but the hemisphere sign.
pub fn coordinate_system(z_world: glam::Vec3A) -> (glam::Vec3A, glam::Vec3A) {
    let sign = if z_world.z >= 0.0 { 1.0 } else { -1.0 };
    let a = -1.0 / (sign + z_world.z);
    let b = z_world.x * z_world.y * a;
    let x_world = glam::Vec3A::new(
        1.0 + sign * z_world.x * z_world.x * a,
        sign * b,
        -sign * z_world.x,
    );
    let y_world = glam::Vec3A::new(b, sign + z_world.y * z_world.y * a, -z_world.y);
    (x_world, y_world)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_at_maps_local_z_to_view_direction() {
        let trans = Transform::look_at(
            glam::Vec3A::ZERO,
            glam::Vec3A::new(0.0, 0.0, -1.0),
            glam::Vec3A::Y,
        );
        let dir = trans.transform_vector3a(glam::Vec3A::Z);
        assert!(dir.distance(glam::Vec3A::new(0.0, 0.0, -1.0)) < 1e-6);

        let trans = Transform::look_at(
            glam::Vec3A::new(1.0, 2.0, 3.0),
            glam::Vec3A::new(1.0, 5.0, 3.0),
            glam::Vec3A::Z,
        );
        let dir = trans.transform_vector3a(glam::Vec3A::Z);
        assert!(dir.distance(glam::Vec3A::Y) < 1e-6);
    }

    #[test]
    fn test_coordinate_system_is_orthonormal() {
        for z in [
            glam::Vec3A::Z,
            -glam::Vec3A::Z,
            glam::Vec3A::new(0.3, -0.5, 0.8).normalize(),
        ] {
            let (x, y) = coordinate_system(z);
            assert!((x.length() - 1.0).abs() < 1e-5);
            assert!((y.length() - 1.0).abs() < 1e-5);
            assert!(x.dot(y).abs() < 1e-5);
            assert!(x.dot(z).abs() < 1e-5);
            assert!(y.dot(z).abs() < 1e-5);
        }
    }

    #[test]
    fn test_animated_transform_interpolates_translation() {
        let begin = Transform::new(glam::Affine3A::from_translation(glam::Vec3::ZERO));
        let end = Transform::new(glam::Affine3A::from_translation(glam::Vec3::new(
            2.0, 0.0, 0.0,
        )));
        let animated = AnimatedTransform::new(begin, end);
        let mid = animated.eval(0.5).transform_point3a(glam::Vec3A::ZERO);
        assert!(mid.distance(glam::Vec3A::new(1.0, 0.0, 0.0)) < 1e-6);

        // Out-of-range times clamp to the keyframes.
        let late = animated.eval(2.0).transform_point3a(glam::Vec3A::ZERO);
        assert!(late.distance(glam::Vec3A::new(2.0, 0.0, 0.0)) < 1e-6);
    }
}
