use crate::core::Color;
use glam::Vec2;
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("texture '{name}' not found (base path: '{base}')")]
    NotFound { name: String, base: String },
    #[error("failed to decode texture '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Represents a loaded texture with sampling capabilities
#[derive(Debug, Clone)]
pub struct Texture {
    pub width: u32,
    pub height: u32,
    pub data: Arc<Vec<Color>>,
    pub path: String,
}

impl Texture {
    /// Load a texture from a file path
    pub fn load_from_file(path: &Path) -> Result<Self, TextureError> {
        let img = image::open(path).map_err(|source| TextureError::Decode {
            path: path.display().to_string(),
            source,
        })?;

        let rgb_img = img.to_rgb8();
        let (width, height) = rgb_img.dimensions();

        let color_data = rgb_img
            .pixels()
            .map(|p| Color::from_rgb8(p[0], p[1], p[2]))
            .collect();

        Ok(Texture {
            width,
            height,
            data: Arc::new(color_data),
            path: path.display().to_string(),
        })
    }

    /// 1x1 white texture, stands in for a color map that is not available
    pub fn default_white() -> Self {
        Texture {
            width: 1,
            height: 1,
            data: Arc::new(vec![Color::WHITE]),
            path: "default_white".to_string(),
        }
    }

    /// 1x1 flat normal map (RGB: 128, 128, 255 = normal pointing straight out)
    pub fn default_normal() -> Self {
        Texture {
            width: 1,
            height: 1,
            data: Arc::new(vec![Color::new(0.5, 0.5, 1.0)]),
            path: "default_normal".to_string(),
        }
    }

    /// Sample the texture at UV coordinates using bilinear filtering
    pub fn sample(&self, uv: Vec2) -> Color {
        self.sample_filtered(uv, TextureFilter::Bilinear)
    }

    pub fn sample_direct(&self, uv: Vec2) -> Color {
        self.sample_filtered(uv, TextureFilter::Nearest)
    }

    /// Sample the texture with specified filtering
    pub fn sample_filtered(&self, uv: Vec2, filter: TextureFilter) -> Color {
        // v runs bottom to top, image rows run top to bottom
        let u = wrap_uv(uv.x);
        let v = wrap_uv(1.0 - uv.y);

        match filter {
            TextureFilter::Nearest => self.sample_nearest(u, v),
            TextureFilter::Bilinear => self.sample_bilinear(u, v),
        }
    }

    fn sample_nearest(&self, u: f32, v: f32) -> Color {
        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);
        self.data[(y * self.width + x) as usize]
    }

    fn sample_bilinear(&self, u: f32, v: f32) -> Color {
        let x_f = u * (self.width - 1) as f32;
        let y_f = v * (self.height - 1) as f32;

        let x0 = x_f.floor() as u32;
        let y0 = y_f.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let dx = x_f - x0 as f32;
        let dy = y_f - y0 as f32;

        let c00 = self.data[(y0 * self.width + x0) as usize];
        let c10 = self.data[(y0 * self.width + x1) as usize];
        let c01 = self.data[(y1 * self.width + x0) as usize];
        let c11 = self.data[(y1 * self.width + x1) as usize];

        let c0 = c00.lerp(&c10, dx);
        let c1 = c01.lerp(&c11, dx);
        c0.lerp(&c1, dy)
    }
}

fn wrap_uv(value: f32) -> f32 {
    value.rem_euclid(1.0)
}

/// Texture filtering modes
#[derive(Debug, Clone, Copy)]
pub enum TextureFilter {
    Nearest,
    Bilinear,
}

#[derive(Debug, Clone)]
pub enum TextureState {
    Pending,
    Ready(Arc<Texture>),
    Failed(String),
}

/// Shared slot a texture load resolves into.
///
/// Handles are handed out before the image is decoded; until then (or
/// forever, if decoding fails) `texture()` returns `None` and the renderer
/// falls back to a placeholder.
#[derive(Debug, Clone)]
pub struct TextureHandle {
    name: String,
    state: Arc<RwLock<TextureState>>,
}

impl TextureHandle {
    fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(RwLock::new(TextureState::Pending)),
        }
    }

    pub fn ready(name: &str, texture: Texture) -> Self {
        let handle = Self::pending(name);
        handle.resolve(Ok(texture));
        handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TextureState {
        match self.state.read() {
            Ok(state) => state.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn texture(&self) -> Option<Arc<Texture>> {
        match self.state() {
            TextureState::Ready(tex) => Some(tex),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state(), TextureState::Pending)
    }

    fn resolve(&self, result: Result<Texture, TextureError>) {
        let next = match result {
            Ok(tex) => {
                info!(
                    "Loaded texture '{}' ({}x{})",
                    self.name, tex.width, tex.height
                );
                TextureState::Ready(Arc::new(tex))
            }
            Err(e) => {
                warn!("Failed to load texture '{}': {}", self.name, e);
                TextureState::Failed(e.to_string())
            }
        };
        match self.state.write() {
            Ok(mut state) => *state = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}

/// Loads textures relative to an asset directory and caches the handles.
pub struct TextureLoader {
    textures: HashMap<String, TextureHandle>,
    base_path: String,
    background: bool,
}

impl TextureLoader {
    /// Loader that decodes on the rayon pool and returns pending handles
    pub fn new(base_path: &str) -> Self {
        Self {
            textures: HashMap::new(),
            base_path: normalize_base_path(base_path),
            background: true,
        }
    }

    /// Loader that decodes before returning, the handle is never pending
    pub fn blocking(base_path: &str) -> Self {
        Self {
            background: false,
            ..Self::new(base_path)
        }
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Start loading `name`. Never fails: errors end up in the handle state.
    pub fn load(&mut self, name: &str) -> TextureHandle {
        let normalized = normalize_texture_path(name);

        if let Some(handle) = self.textures.get(&normalized) {
            return handle.clone();
        }

        let handle = TextureHandle::pending(&normalized);
        self.textures.insert(normalized.clone(), handle.clone());

        let resolved = self.resolve_texture_path(&normalized);
        let base = self.base_path.clone();
        let job = {
            let handle = handle.clone();
            move || {
                let result = match resolved {
                    Some(path) => Texture::load_from_file(&path),
                    None => Err(TextureError::NotFound {
                        name: normalized,
                        base,
                    }),
                };
                handle.resolve(result);
            }
        };

        if self.background {
            rayon::spawn(job);
        } else {
            job();
        }
        handle
    }

    pub fn loaded(&self) -> usize {
        self.textures
            .values()
            .filter(|h| h.texture().is_some())
            .count()
    }

    fn resolve_texture_path(&self, path: &str) -> Option<PathBuf> {
        let base = Path::new(&self.base_path);
        let path_obj = Path::new(path);

        if path_obj.is_absolute() {
            return path_obj.exists().then(|| path_obj.to_path_buf());
        }

        let candidate = base.join(path_obj);
        if candidate.exists() {
            return Some(candidate);
        }

        if let Some(file_name) = path_obj.file_name() {
            let candidate = base.join(file_name);
            if candidate.exists() {
                return Some(candidate);
            }
        }

        None
    }
}

fn normalize_base_path(base_path: &str) -> String {
    let mut base = base_path.to_string();
    if !base.ends_with('/') && !base.ends_with('\\') {
        base.push(std::path::MAIN_SEPARATOR);
    }
    base
}

fn normalize_texture_path(path: &str) -> String {
    if std::path::MAIN_SEPARATOR == '/' {
        path.replace('\\', "/")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn checker(dir: &Path, name: &str) {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 255, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.put_pixel(1, 1, Rgb([255, 255, 255]));
        img.save(dir.join(name)).unwrap();
    }

    #[test]
    fn blocking_load_resolves_immediately() {
        let dir = tempfile::tempdir().unwrap();
        checker(dir.path(), "moon.png");

        let mut loader = TextureLoader::blocking(dir.path().to_str().unwrap());
        let handle = loader.load("moon.png");
        let tex = handle.texture().expect("texture should be ready");
        assert_eq!((tex.width, tex.height), (2, 2));
        assert_eq!(loader.loaded(), 1);
    }

    #[test]
    fn missing_texture_fails_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        let mut loader = TextureLoader::blocking(dir.path().to_str().unwrap());
        let handle = loader.load("space.jpg");
        assert!(handle.texture().is_none());
        assert!(matches!(handle.state(), TextureState::Failed(_)));
    }

    #[test]
    fn corrupt_texture_fails_without_panicking() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("larry.jpg"), b"definitely not a jpeg").unwrap();
        let mut loader = TextureLoader::blocking(dir.path().to_str().unwrap());
        assert!(matches!(
            loader.load("larry.jpg").state(),
            TextureState::Failed(_)
        ));
    }

    #[test]
    fn repeated_loads_share_a_handle() {
        let dir = tempfile::tempdir().unwrap();
        checker(dir.path(), "a.png");
        let mut loader = TextureLoader::blocking(dir.path().to_str().unwrap());
        let first = loader.load("a.png");
        let second = loader.load("a.png");
        assert!(Arc::ptr_eq(&first.state, &second.state));
    }

    #[test]
    fn background_load_eventually_resolves() {
        let dir = tempfile::tempdir().unwrap();
        checker(dir.path(), "bg.png");
        let mut loader = TextureLoader::new(dir.path().to_str().unwrap());
        let handle = loader.load("bg.png");

        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while handle.is_pending() && std::time::Instant::now() < deadline {
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(handle.texture().is_some());
    }

    #[test]
    fn nearest_sample_reads_top_row_at_high_v() {
        let dir = tempfile::tempdir().unwrap();
        checker(dir.path(), "c.png");
        let tex = Texture::load_from_file(&dir.path().join("c.png")).unwrap();
        // uv (0, 0.9) is the top-left texel
        let c = tex.sample_direct(Vec2::new(0.1, 0.9));
        assert_eq!(c, Color::new(1.0, 0.0, 0.0));
        let c = tex.sample_direct(Vec2::new(0.9, 0.1));
        assert_eq!(c, Color::WHITE);
    }
}
