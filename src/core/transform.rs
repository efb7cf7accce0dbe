use glam::{EulerRot, Mat3, Mat4, Quat, Vec3};

/// Position, Euler rotation (XYZ order, radians) and scale of a scene object.
///
/// Rotation is stored as raw Euler angles rather than a quaternion so that
/// additive per-frame spins accumulate exactly and can be read back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new() -> Self {
        Self::IDENTITY
    }

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    pub fn model_mat(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Inverse-transpose of the upper 3x3, for carrying normals into world space
    pub fn normal_mat(&self) -> Mat3 {
        Mat3::from_mat4(self.model_mat()).inverse().transpose()
    }

    /// Add to the current Euler angles (in radians)
    pub fn rotate_euler(&mut self, delta: Vec3) {
        self.rotation += delta;
    }

    /// Replace the rotation with the one described by `rot`
    pub fn set_quat(&mut self, rot: Quat) {
        let (x, y, z) = rot.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_euler_accumulates() {
        let mut t = Transform::new();
        for _ in 0..10 {
            t.rotate_euler(Vec3::new(0.01, 0.005, 0.01));
        }
        assert!((t.rotation.x - 0.1).abs() < 1e-5);
        assert!((t.rotation.y - 0.05).abs() < 1e-5);
    }

    #[test]
    fn model_mat_places_origin_at_position() {
        let t = Transform::from_position(Vec3::new(2.0, 0.0, -5.0));
        let p = t.model_mat().transform_point3(Vec3::ZERO);
        assert!(p.abs_diff_eq(Vec3::new(2.0, 0.0, -5.0), 1e-6));
    }

    #[test]
    fn quat_round_trips_through_euler() {
        let mut t = Transform::new();
        let q = Quat::from_euler(EulerRot::XYZ, 0.3, -0.2, 0.1);
        t.set_quat(q);
        assert!(t.quat().abs_diff_eq(q, 1e-5) || t.quat().abs_diff_eq(-q, 1e-5));
    }
}
