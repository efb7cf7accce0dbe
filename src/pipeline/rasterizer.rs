use crate::core::{Color, LightSample};
use crate::debug_print;
use crate::pipeline::clipper::ClipVertex;
use crate::pipeline::shading::{FragmentInput, SurfaceShader};
use glam::{Vec2, Vec3, Vec4};
use rayon::prelude::*;

/// One clipped, front facing triangle ready for scan conversion
#[derive(Debug, Clone, Copy)]
pub struct ProcessedGeometry {
    pub object: usize,
    pub vertices: [ClipVertex; 3],
}

/// One clipped helper line segment, in clip space
#[derive(Debug, Clone, Copy)]
pub struct ProcessedLine {
    pub start: Vec4,
    pub end: Vec4,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub x: usize,
    pub y: usize,
    pub depth: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy)]
struct ScreenVertex {
    pos: Vec2,
    depth: f32,
    inv_w: f32,
}

pub struct Rasterizer {
    width: usize,
    height: usize,
}

impl Rasterizer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Scan convert and shade every triangle. Modifies the fragment buffer in place.
    ///
    /// `shaders` is indexed by the triangle's object id.
    pub fn rasterize(
        &self,
        geometry: &[ProcessedGeometry],
        shaders: &[Option<SurfaceShader>],
        lights: &[LightSample],
        frags: &mut Vec<Fragment>,
    ) {
        frags.clear();
        debug_print!("Processing {} triangles", geometry.len());

        frags.par_extend(geometry.par_iter().flat_map_iter(|geo| {
            match shaders.get(geo.object).and_then(|s| s.as_ref()) {
                Some(shader) => self.rasterize_triangle(geo, shader, lights),
                None => Vec::new(),
            }
        }));

        debug_print!("Generated {} fragments", frags.len());
    }

    /// Append fragments for helper lines, depth interpolated along the segment
    pub fn rasterize_lines(&self, lines: &[ProcessedLine], frags: &mut Vec<Fragment>) {
        for line in lines {
            let a = self.project(line.start);
            let b = self.project(line.end);
            let (w, h) = (self.width as i32, self.height as i32);
            bresenham(a.pos, b.pos, |x, y, t| {
                if x >= 0 && y >= 0 && x < w && y < h {
                    frags.push(Fragment {
                        x: x as usize,
                        y: y as usize,
                        depth: a.depth + (b.depth - a.depth) * t,
                        color: line.color,
                    });
                }
            });
        }
    }

    fn project(&self, clip: Vec4) -> ScreenVertex {
        let inv_w = 1.0 / clip.w;
        let ndc = clip.truncate() * inv_w;
        ScreenVertex {
            pos: Vec2::new(
                (ndc.x + 1.0) * 0.5 * self.width as f32,
                (1.0 - ndc.y) * 0.5 * self.height as f32,
            ),
            depth: ndc.z,
            inv_w,
        }
    }

    fn rasterize_triangle(
        &self,
        geo: &ProcessedGeometry,
        shader: &SurfaceShader,
        lights: &[LightSample],
    ) -> Vec<Fragment> {
        let mut fragments = Vec::new();
        if self.width == 0 || self.height == 0 {
            return fragments;
        }

        let sv = geo.vertices.map(|v| self.project(v.position));
        let (p0, p1, p2) = (sv[0].pos, sv[1].pos, sv[2].pos);

        let area = edge(p0, p1, p2);
        if area.abs() < 1e-8 {
            return fragments;
        }

        // Compute bounding box, clamped to the screen
        let max_x = (self.width - 1) as f32;
        let max_y = (self.height - 1) as f32;
        let min_x = p0.x.min(p1.x).min(p2.x).floor().clamp(0.0, max_x) as usize;
        let min_y = p0.y.min(p1.y).min(p2.y).floor().clamp(0.0, max_y) as usize;
        let max_xb = p0.x.max(p1.x).max(p2.x).ceil().clamp(0.0, max_x) as usize;
        let max_yb = p0.y.max(p1.y).max(p2.y).ceil().clamp(0.0, max_y) as usize;

        let [v0, v1, v2] = geo.vertices;
        for y in min_y..=max_yb {
            for x in min_x..=max_xb {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(p1, p2, p) / area;
                let w1 = edge(p2, p0, p) / area;
                let w2 = edge(p0, p1, p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * sv[0].depth + w1 * sv[1].depth + w2 * sv[2].depth;

                // Perspective correct weights for the varyings
                let q0 = w0 * sv[0].inv_w;
                let q1 = w1 * sv[1].inv_w;
                let q2 = w2 * sv[2].inv_w;
                let sum = q0 + q1 + q2;
                if sum <= 0.0 {
                    continue;
                }
                let (q0, q1, q2) = (q0 / sum, q1 / sum, q2 / sum);

                let input = FragmentInput {
                    world: v0.world * q0 + v1.world * q1 + v2.world * q2,
                    normal: interpolate3(v0.normal, v1.normal, v2.normal, q0, q1, q2),
                    uv: v0.uv * q0 + v1.uv * q1 + v2.uv * q2,
                };

                fragments.push(Fragment {
                    x,
                    y,
                    depth,
                    color: shader.shade(&input, lights),
                });
            }
        }

        fragments
    }
}

fn interpolate3(a: Vec3, b: Vec3, c: Vec3, wa: f32, wb: f32, wc: f32) -> Vec3 {
    a * wa + b * wb + c * wc
}

/// Signed parallelogram area of (a, b, p)
fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

/// Walk the pixels from `start` to `end`, calling `plot(x, y, t)` with `t` in [0, 1].
pub fn bresenham<F>(start: Vec2, end: Vec2, mut plot: F)
where
    F: FnMut(i32, i32, f32),
{
    let mut x0 = start.x as i32;
    let mut y0 = start.y as i32;
    let x1 = end.x as i32;
    let y1 = end.y as i32;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let steps = dx.max(-dy).max(1) as f32;
    let mut step = 0;

    loop {
        plot(x0, y0, (step as f32 / steps).min(1.0));

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
        step += 1;
    }
}
