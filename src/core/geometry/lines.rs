use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::core::Color;

#[derive(Debug, Clone, Copy)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

/// A bag of independent colored line segments (helpers, debug overlays)
#[derive(Debug, Clone, Default)]
pub struct LineSegments {
    pub segments: Vec<Segment>,
}

impl LineSegments {
    pub fn push(&mut self, start: Vec3, end: Vec3, color: Color) {
        self.segments.push(Segment { start, end, color });
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Square grid on the XZ plane, `divisions` cells per side.
/// The two lines through the origin use `center_color`.
pub fn grid_lines(size: f32, divisions: u32, center_color: Color, line_color: Color) -> LineSegments {
    let step = size / divisions as f32;
    let half = size / 2.0;
    let center = divisions / 2;

    let mut lines = LineSegments::default();
    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i == center { center_color } else { line_color };
        lines.push(Vec3::new(-half, 0.0, k), Vec3::new(half, 0.0, k), color);
        lines.push(Vec3::new(k, 0.0, -half), Vec3::new(k, 0.0, half), color);
    }
    lines
}

/// Coarse wireframe sphere (4 segments around, 2 down) marking a point light.
pub fn light_helper_lines(size: f32, color: Color) -> LineSegments {
    const AROUND: u32 = 4;
    const DOWN: u32 = 2;

    let point = |ix: u32, iy: u32| {
        let u = ix as f32 / AROUND as f32 * TAU;
        let v = iy as f32 / DOWN as f32 * PI;
        Vec3::new(
            -size * u.cos() * v.sin(),
            size * v.cos(),
            size * u.sin() * v.sin(),
        )
    };

    let mut lines = LineSegments::default();
    for iy in 0..DOWN {
        for ix in 0..AROUND {
            // meridian piece and, off the poles, the latitude ring piece
            lines.push(point(ix, iy), point(ix, iy + 1), color);
            if iy > 0 {
                lines.push(point(ix, iy), point(ix + 1, iy), color);
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_two_lines_per_division_boundary() {
        let grid = grid_lines(200.0, 50, Color::GRID_CENTER, Color::GRID_LINE);
        assert_eq!(grid.len(), 51 * 2);
        let centered = grid
            .segments
            .iter()
            .filter(|s| s.color == Color::GRID_CENTER)
            .count();
        assert_eq!(centered, 2);
        for s in &grid.segments {
            assert_eq!(s.start.y, 0.0);
            assert!(s.start.abs().max_element() <= 100.0 + 1e-4);
        }
    }

    #[test]
    fn light_helper_stays_on_its_sphere() {
        let lines = light_helper_lines(1.0, Color::WHITE);
        assert_eq!(lines.len(), 12);
        for s in &lines.segments {
            assert!((s.start.length() - 1.0).abs() < 1e-5);
            assert!((s.end.length() - 1.0).abs() < 1e-5);
        }
    }
}
