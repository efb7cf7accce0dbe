use crate::core::{Color, Texture};
use glam::Vec2;
use rayon::prelude::*;

/// Color + depth target, laid out the way minifb wants it (`0x00RRGGBB`, row major, top row first)
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    pub depth: Vec<f32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let buf_size = width * height;
        FrameBuffer {
            width,
            height,
            data: vec![0; buf_size],
            depth: vec![f32::INFINITY; buf_size],
        }
    }

    pub fn clear(&mut self, color: Color) {
        let packed = color.to_u32();
        self.data.par_chunks_mut(1024).for_each(|chunk| {
            for point in chunk {
                *point = packed;
            }
        });
        self.reset_depth();
    }

    /// Clear to a texture stretched across the whole buffer
    pub fn clear_with_texture(&mut self, texture: &Texture) {
        let (w, h) = (self.width as f32, self.height as f32);
        if self.width > 0 {
            self.data
                .par_chunks_mut(self.width)
                .enumerate()
                .for_each(|(y, row)| {
                    let v = 1.0 - (y as f32 + 0.5) / h;
                    for (x, point) in row.iter_mut().enumerate() {
                        let u = (x as f32 + 0.5) / w;
                        *point = texture.sample(Vec2::new(u, v)).to_u32();
                    }
                });
        }
        self.reset_depth();
    }

    fn reset_depth(&mut self) {
        self.depth.par_chunks_mut(1024).for_each(|chunk| {
            for d in chunk {
                *d = f32::INFINITY;
            }
        });
    }

    /// Depth tested write. Returns whether the pixel was written.
    pub fn set_pixel(&mut self, pos: (usize, usize), depth: f32, color: Color) -> bool {
        if pos.0 < self.width && pos.1 < self.height {
            let index = pos.0 + pos.1 * self.width;
            if depth < self.depth[index] {
                self.data[index] = color.to_u32();
                self.depth[index] = depth;
                return true;
            }
        }
        false
    }

    pub fn get_pixel(&self, pos: (usize, usize)) -> Option<u32> {
        (pos.0 < self.width && pos.1 < self.height).then(|| self.data[pos.0 + pos.1 * self.width])
    }

    pub fn depth_at(&self, pos: (usize, usize)) -> Option<f32> {
        (pos.0 < self.width && pos.1 < self.height).then(|| self.depth[pos.0 + pos.1 * self.width])
    }
}
