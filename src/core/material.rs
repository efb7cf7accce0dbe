use std::fmt::{Display, Formatter};

use crate::core::{Color, TextureHandle};

/// Surface appearance of a mesh or line object.
#[derive(Debug, Clone)]
pub enum Material {
    /// Lit by the scene's lights, optionally textured and normal mapped
    Standard {
        color: Color,
        map: Option<TextureHandle>,
        normal_map: Option<TextureHandle>,
    },
    /// Unlit: color (times texture) straight to the screen
    Basic {
        color: Color,
        map: Option<TextureHandle>,
    },
    /// Per-segment colors come from the line geometry itself
    Line,
}

impl Material {
    pub fn standard(color: Color) -> Self {
        Material::Standard {
            color,
            map: None,
            normal_map: None,
        }
    }

    pub fn standard_mapped(map: TextureHandle, normal_map: Option<TextureHandle>) -> Self {
        Material::Standard {
            color: Color::WHITE,
            map: Some(map),
            normal_map,
        }
    }

    pub fn basic_mapped(map: TextureHandle) -> Self {
        Material::Basic {
            color: Color::WHITE,
            map: Some(map),
        }
    }

    pub fn is_lit(&self) -> bool {
        matches!(self, Material::Standard { .. })
    }
}

impl Display for Material {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Material::Standard {
                color,
                map,
                normal_map,
            } => write!(
                f,
                "Standard(color: {:06x}, map: {}, normal: {})",
                color.to_u32(),
                map.as_ref().map_or("-", |m| m.name()),
                normal_map.as_ref().map_or("-", |m| m.name()),
            ),
            Material::Basic { color, map } => write!(
                f,
                "Basic(color: {:06x}, map: {})",
                color.to_u32(),
                map.as_ref().map_or("-", |m| m.name()),
            ),
            Material::Line => write!(f, "Line"),
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::standard(Color::WHITE)
    }
}
