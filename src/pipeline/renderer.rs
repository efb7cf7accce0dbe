use log::debug;

use crate::core::{Camera, Scene};
use crate::pipeline::{FrameBuffer, FrameStats, Pipeline};

/// Owns the drawing buffer for one output surface.
///
/// The buffer is `size * pixel_ratio` pixels; the surface scales it back
/// to the window when presenting.
pub struct Renderer {
    width: usize,
    height: usize,
    pixel_ratio: f32,
    pipeline: Pipeline,
    frames: u64,
}

impl Renderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
            pipeline: Pipeline::new(width, height),
            frames: 0,
        }
    }

    pub fn set_pixel_ratio(&mut self, ratio: f32) {
        if ratio > 0.0 && ratio.is_finite() {
            self.pixel_ratio = ratio;
            self.rebuild();
        }
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.rebuild();
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Dimensions of the buffer actually rendered into
    pub fn drawing_buffer_size(&self) -> (usize, usize) {
        (
            (self.width as f32 * self.pixel_ratio).round() as usize,
            (self.height as f32 * self.pixel_ratio).round() as usize,
        )
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera) -> FrameStats {
        let stats = self.pipeline.render_frame(scene, camera);
        self.frames += 1;
        crate::debug_print!("frame {}: {:?}", self.frames, stats);
        stats
    }

    /// The last rendered frame
    pub fn frame(&self) -> &FrameBuffer {
        self.pipeline.front_buffer()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    pub fn set_draw_helpers(&mut self, enabled: bool) {
        self.pipeline.states.draw_helpers = enabled;
    }

    fn rebuild(&mut self) {
        let (w, h) = self.drawing_buffer_size();
        let states = self.pipeline.states;
        self.pipeline = Pipeline::new(w, h);
        self.pipeline.states = states;
        debug!("Drawing buffer resized to {}x{}", w, h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_ratio_scales_drawing_buffer() {
        let mut renderer = Renderer::new(100, 50);
        renderer.set_pixel_ratio(2.0);
        assert_eq!(renderer.size(), (100, 50));
        assert_eq!(renderer.drawing_buffer_size(), (200, 100));
        renderer.set_size(40, 30);
        assert_eq!(renderer.frame().width, 80);
        assert_eq!(renderer.frame().height, 60);
    }

    #[test]
    fn invalid_pixel_ratio_is_ignored() {
        let mut renderer = Renderer::new(10, 10);
        renderer.set_pixel_ratio(0.0);
        renderer.set_pixel_ratio(f32::NAN);
        assert_eq!(renderer.pixel_ratio(), 1.0);
    }

    #[test]
    fn render_counts_frames() {
        let mut renderer = Renderer::new(8, 8);
        let scene = Scene::new();
        let camera = Camera::default();
        renderer.render(&scene, &camera);
        renderer.render(&scene, &camera);
        assert_eq!(renderer.frames_rendered(), 2);
    }
}
