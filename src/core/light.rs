use crate::core::Color;
use glam::Vec3;

/// The two kinds of lights the scene uses.
#[derive(Clone, Debug, PartialEq)]
pub enum Light {
    /// Illuminates every surface uniformly, regardless of orientation.
    Ambient {
        /// The light’s color.
        color: Color,
        /// A scalar multiplier for the light’s strength.
        intensity: f32,
    },
    /// Emits light in all directions from the owning object's position.
    Point {
        /// The light’s color.
        color: Color,
        /// A scalar multiplier for the light’s strength.
        intensity: f32,
        /// Range of the light. `0.0` means unlimited, with no falloff.
        distance: f32,
    },
}

impl Light {
    pub fn ambient(color: Color) -> Self {
        Light::Ambient {
            color,
            intensity: 1.0,
        }
    }

    pub fn point(color: Color) -> Self {
        Light::Point {
            color,
            intensity: 1.0,
            distance: 0.0,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Ambient { color, .. } | Light::Point { color, .. } => *color,
        }
    }
}

/// A light resolved into world space for one frame.
#[derive(Clone, Debug)]
pub struct LightSample {
    pub light: Light,
    pub position: Vec3,
}

impl LightSample {
    /// Radiance reaching a surface at `frag_pos` with normal `normal`
    pub fn irradiance(&self, frag_pos: Vec3, normal: Vec3) -> Color {
        match &self.light {
            Light::Ambient { color, intensity } => *color * *intensity,
            Light::Point {
                color,
                intensity,
                distance,
            } => {
                let to_light = self.position - frag_pos;
                let dist = to_light.length();
                if dist <= f32::EPSILON {
                    return Color::BLACK;
                }
                let diff = normal.dot(to_light / dist).max(0.0);
                let falloff = if *distance > 0.0 {
                    (1.0 - dist / distance).clamp(0.0, 1.0)
                } else {
                    1.0
                };
                *color * (intensity * diff * falloff)
            }
        }
    }
}
