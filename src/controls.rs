//! Drag-to-orbit camera controls.
//!
//! Pointer input only records a pending spherical delta; nothing touches the
//! camera until [`OrbitControls::update`] runs in the frame loop.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::core::Camera;

const EPS: f32 = 1e-6;

pub struct OrbitControls {
    pub target: Vec3,
    pub enabled: bool,
    pub rotate_speed: f32,
    viewport_height: f32,
    delta_theta: f32,
    delta_phi: f32,
    drag_from: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(viewport_height: usize) -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            rotate_speed: 1.0,
            viewport_height: viewport_height.max(1) as f32,
            delta_theta: 0.0,
            delta_phi: 0.0,
            drag_from: None,
        }
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        if self.enabled {
            self.drag_from = Some(pos);
        }
    }

    pub fn pointer_move(&mut self, pos: Vec2) {
        let Some(from) = self.drag_from else {
            return;
        };
        let delta = (pos - from) * self.rotate_speed;
        // A drag across the full height is one full turn
        self.rotate_left(TAU * delta.x / self.viewport_height);
        self.rotate_up(TAU * delta.y / self.viewport_height);
        self.drag_from = Some(pos);
    }

    pub fn pointer_up(&mut self) {
        self.drag_from = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_from.is_some()
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Apply pending rotation around `target` and aim the camera at it.
    ///
    /// The orbit radius is preserved. The camera orientation is always
    /// re-derived from its position, even with no pending input.
    /// Returns whether the camera position moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.transform.position - self.target;
        let radius = offset.length();

        let (mut theta, mut phi) = if radius > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, 0.0)
        };

        theta += self.delta_theta;
        phi += self.delta_phi;
        phi = phi.clamp(EPS, PI - EPS);

        let moved = self.delta_theta != 0.0 || self.delta_phi != 0.0;
        if moved {
            let sin_phi = phi.sin();
            let new_offset = Vec3::new(
                radius * sin_phi * theta.sin(),
                radius * phi.cos(),
                radius * sin_phi * theta.cos(),
            );
            camera.transform.position = self.target + new_offset;
        }

        camera.look_at(self.target);

        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(pos: Vec3) -> Camera {
        let mut cam = Camera::default();
        cam.transform.position = pos;
        cam
    }

    #[test]
    fn update_without_input_keeps_position() {
        let mut controls = OrbitControls::new(600);
        let mut cam = camera_at(Vec3::new(1.0, 2.0, 30.0));
        assert!(!controls.update(&mut cam));
        assert_eq!(cam.position(), Vec3::new(1.0, 2.0, 30.0));
    }

    #[test]
    fn drag_orbits_at_constant_distance() {
        let mut controls = OrbitControls::new(600);
        let mut cam = camera_at(Vec3::new(0.0, 0.0, 30.0));

        controls.pointer_down(Vec2::new(100.0, 100.0));
        controls.pointer_move(Vec2::new(250.0, 160.0));
        controls.pointer_up();
        assert!(controls.update(&mut cam));

        assert!((cam.position().length() - 30.0).abs() < 1e-3);
        assert!(cam.position().x.abs() > 1.0);
        let to_target = (-cam.position()).normalize();
        assert!(cam.forward().abs_diff_eq(to_target, 1e-3));
    }

    #[test]
    fn moves_without_pointer_down_are_ignored() {
        let mut controls = OrbitControls::new(600);
        let mut cam = camera_at(Vec3::new(0.0, 0.0, 30.0));
        controls.pointer_move(Vec2::new(500.0, 500.0));
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn polar_angle_is_clamped_short_of_the_pole() {
        let mut controls = OrbitControls::new(100);
        let mut cam = camera_at(Vec3::new(0.0, 0.0, 10.0));
        controls.rotate_up(10.0);
        controls.update(&mut cam);
        assert!(cam.position().y > 9.99);
        assert!(cam.position().is_finite());
        assert!(cam.rotation().is_finite());
    }

    #[test]
    fn pending_delta_is_consumed() {
        let mut controls = OrbitControls::new(100);
        let mut cam = camera_at(Vec3::new(0.0, 0.0, 10.0));
        controls.rotate_left(0.5);
        assert!(controls.update(&mut cam));
        assert!(!controls.update(&mut cam));
    }
}
