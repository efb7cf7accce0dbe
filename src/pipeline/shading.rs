use std::sync::Arc;

use glam::{Vec2, Vec3};

use crate::core::{Color, LightSample, Material, Texture, TextureHandle};

/// Interpolated surface attributes at one pixel
#[derive(Debug, Clone, Copy)]
pub struct FragmentInput {
    pub world: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightMode {
    /// Albedo only
    Unlit,
    /// Ambient plus diffuse point lights
    Lambert,
}

/// A material with its textures resolved for the current frame.
///
/// Textures still loading (or that failed) are replaced by 1x1 placeholders
/// so the surface renders with its base appearance.
#[derive(Debug, Clone)]
pub struct SurfaceShader {
    pub mode: LightMode,
    pub color: Color,
    pub map: Option<Arc<Texture>>,
    pub normal_map: Option<Arc<Texture>>,
}

impl SurfaceShader {
    pub fn from_material(material: &Material) -> Option<Self> {
        match material {
            Material::Standard {
                color,
                map,
                normal_map,
            } => Some(Self {
                mode: LightMode::Lambert,
                color: *color,
                map: map.as_ref().map(|h| resolve(h, Texture::default_white)),
                normal_map: normal_map
                    .as_ref()
                    .map(|h| resolve(h, Texture::default_normal)),
            }),
            Material::Basic { color, map } => Some(Self {
                mode: LightMode::Unlit,
                color: *color,
                map: map.as_ref().map(|h| resolve(h, Texture::default_white)),
                normal_map: None,
            }),
            Material::Line => None,
        }
    }

    pub fn shade(&self, frag: &FragmentInput, lights: &[LightSample]) -> Color {
        let albedo = match &self.map {
            Some(map) => self.color * map.sample(frag.uv),
            None => self.color,
        };

        match self.mode {
            LightMode::Unlit => albedo,
            LightMode::Lambert => {
                let mut normal = frag.normal.normalize_or_zero();
                if let Some(normal_map) = &self.normal_map {
                    normal = perturb_normal(normal, normal_map.sample(frag.uv));
                }
                let mut irradiance = Color::BLACK;
                for light in lights {
                    irradiance += light.irradiance(frag.world, normal);
                }
                (albedo * irradiance).clamped()
            }
        }
    }
}

fn resolve(handle: &TextureHandle, placeholder: fn() -> Texture) -> Arc<Texture> {
    handle
        .texture()
        .unwrap_or_else(|| Arc::new(placeholder()))
}

/// Bend `normal` by a tangent space normal map sample.
///
/// There are no authored tangents, so the frame is built from the normal
/// and world up (world X near the poles).
fn perturb_normal(normal: Vec3, sample: Color) -> Vec3 {
    let helper = if normal.y.abs() > 0.999 { Vec3::X } else { Vec3::Y };
    let tangent = helper.cross(normal).normalize_or_zero();
    let bitangent = normal.cross(tangent);
    let local = Vec3::new(sample.r * 2.0 - 1.0, sample.g * 2.0 - 1.0, sample.b * 2.0 - 1.0);
    (tangent * local.x + bitangent * local.y + normal * local.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Light;

    fn lights() -> Vec<LightSample> {
        vec![
            LightSample {
                light: Light::point(Color::WHITE),
                position: Vec3::new(0.0, 0.0, 10.0),
            },
            LightSample {
                light: Light::Ambient {
                    color: Color::WHITE,
                    intensity: 0.25,
                },
                position: Vec3::ZERO,
            },
        ]
    }

    fn frag(normal: Vec3) -> FragmentInput {
        FragmentInput {
            world: Vec3::ZERO,
            normal,
            uv: Vec2::splat(0.5),
        }
    }

    #[test]
    fn basic_material_ignores_lights() {
        let shader = SurfaceShader::from_material(&Material::Basic {
            color: Color::TOMATO,
            map: None,
        })
        .unwrap();
        assert_eq!(shader.shade(&frag(Vec3::NEG_Z), &[]), Color::TOMATO);
    }

    #[test]
    fn standard_material_darkens_away_from_light() {
        let shader = SurfaceShader::from_material(&Material::standard(Color::WHITE)).unwrap();
        let lit = shader.shade(&frag(Vec3::Z), &lights());
        let unlit = shader.shade(&frag(Vec3::NEG_Z), &lights());
        assert_eq!(lit, Color::WHITE);
        assert_eq!(unlit, Color::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn flat_normal_map_leaves_normal_alone() {
        let n = Vec3::new(0.3, 0.4, 0.866).normalize();
        let out = perturb_normal(n, Color::new(0.5, 0.5, 1.0));
        assert!(out.abs_diff_eq(n, 1e-5));
    }

    #[test]
    fn line_material_has_no_surface_shader() {
        assert!(SurfaceShader::from_material(&Material::Line).is_none());
    }
}
