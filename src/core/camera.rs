use glam::{Mat3, Mat4, Quat, Vec3};

use super::Transform;

/// A perspective camera looking down its local -Z axis.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Vertical field of view, in degrees
    pub fov: f32,
    /// The aspect ratio of the camera (width / height)
    pub aspect_ratio: f32,
    /// The near plane of the camera, anything closer than this will not be rendered
    pub near: f32,
    /// The far plane of the camera, anything beyond this will not be rendered
    pub far: f32,
    pub transform: Transform,
}

impl Camera {
    pub fn new(fov: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect_ratio,
            near,
            far,
            transform: Transform::new(),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn rotation(&self) -> Vec3 {
        self.transform.rotation
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.transform.model_mat().inverse()
    }

    /// Right handed projection with a [0, 1] depth range
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Direction the camera is facing, in world space
    pub fn forward(&self) -> Vec3 {
        self.transform.quat() * Vec3::NEG_Z
    }

    /// Rotate the camera so -Z points at `target`, keeping world Y up.
    ///
    /// Degenerate inputs (target at the eye, or straight up/down) are nudged
    /// instead of producing NaNs.
    pub fn look_at(&mut self, target: Vec3) {
        let mut z = self.transform.position - target;
        if z.length_squared() == 0.0 {
            z = Vec3::Z;
        }
        z = z.normalize();

        let mut x = Vec3::Y.cross(z);
        if x.length_squared() == 0.0 {
            z.z += 0.0001;
            z = z.normalize();
            x = Vec3::Y.cross(z);
        }
        x = x.normalize();
        let y = z.cross(x);

        let rot = Quat::from_mat3(&Mat3::from_cols(x, y, z));
        self.transform.set_quat(rot);
    }
}

impl Default for Camera {
    fn default() -> Self {
        Camera::new(75.0, 16.0 / 9.0, 0.1, 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn look_at_points_forward_at_target() {
        let mut cam = Camera::default();
        cam.transform.position = Vec3::new(4.0, 3.0, 10.0);
        cam.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position()).normalize();
        assert!(cam.forward().abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn look_at_from_target_is_finite() {
        let mut cam = Camera::default();
        cam.look_at(Vec3::ZERO);
        assert!(cam.rotation().is_finite());
        cam.transform.position = Vec3::new(0.0, 5.0, 0.0);
        cam.look_at(Vec3::ZERO);
        assert!(cam.rotation().is_finite());
    }

    #[test]
    fn view_matrix_moves_eye_to_origin() {
        let mut cam = Camera::default();
        cam.transform.position = Vec3::new(0.0, 0.0, 30.0);
        let eye = cam.view_matrix().transform_point3(cam.position());
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-5));
    }

    #[test]
    fn projection_maps_near_plane_to_zero_depth() {
        let cam = Camera::new(75.0, 1.0, 0.1, 1000.0);
        let clip = cam.projection_matrix() * glam::Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((clip.z / clip.w).abs() < 1e-4);
    }
}
