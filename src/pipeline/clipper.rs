use glam::{Vec2, Vec3, Vec4};

#[derive(Clone, Copy, Debug)]
pub struct ClipVertex {
    pub position: Vec4, // Clip space
    pub world: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl ClipVertex {
    pub fn lerp(&self, other: &ClipVertex, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            world: self.world.lerp(other.world, t),
            normal: self.normal.lerp(other.normal, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct ClipTriangle {
    pub vertices: [ClipVertex; 3],
}

/// Frustum planes in clip space for a [0, 1] depth range: a point is
/// inside when `plane.dot(p) >= 0` for all six.
const FRUSTUM_PLANES: [Vec4; 6] = [
    Vec4::new(1.0, 0.0, 0.0, 1.0),  // left
    Vec4::new(-1.0, 0.0, 0.0, 1.0), // right
    Vec4::new(0.0, 1.0, 0.0, 1.0),  // bottom
    Vec4::new(0.0, -1.0, 0.0, 1.0), // top
    Vec4::new(0.0, 0.0, 1.0, 0.0),  // near
    Vec4::new(0.0, 0.0, -1.0, 1.0), // far
];

pub struct Clipper {
    backface_culling: bool,
    frustum_planes: [Vec4; 6],
}

impl Clipper {
    pub fn new() -> Self {
        Self {
            backface_culling: true,
            frustum_planes: FRUSTUM_PLANES,
        }
    }

    pub fn set_backface_culling(&mut self, enabled: bool) {
        self.backface_culling = enabled;
    }

    pub fn clip_triangle(&self, triangle: &ClipTriangle) -> Vec<ClipTriangle> {
        let mut fully_inside = true;
        for plane in &self.frustum_planes {
            let d = triangle.vertices.map(|v| plane.dot(v.position));
            if d.iter().all(|&d| d < 0.0) {
                return Vec::new();
            }
            if d.iter().any(|&d| d < 0.0) {
                fully_inside = false;
            }
        }

        if fully_inside {
            return if self.should_keep(triangle) {
                vec![*triangle]
            } else {
                Vec::new()
            };
        }

        // Sutherland-Hodgman against each plane, then fan the polygon back into triangles
        let mut polygon: Vec<ClipVertex> = triangle.vertices.to_vec();
        for plane in &self.frustum_planes {
            polygon = clip_polygon(&polygon, *plane);
            if polygon.len() < 3 {
                return Vec::new();
            }
        }

        (1..polygon.len() - 1)
            .map(|i| ClipTriangle {
                vertices: [polygon[0], polygon[i], polygon[i + 1]],
            })
            .filter(|t| self.should_keep(t))
            .collect()
    }

    /// Clip a segment to the frustum. Returns the surviving part, if any.
    pub fn clip_line(&self, mut start: Vec4, mut end: Vec4) -> Option<(Vec4, Vec4)> {
        for plane in &self.frustum_planes {
            let ds = plane.dot(start);
            let de = plane.dot(end);
            if ds < 0.0 && de < 0.0 {
                return None;
            }
            if ds < 0.0 {
                start = start.lerp(end, ds / (ds - de));
            } else if de < 0.0 {
                end = end.lerp(start, de / (de - ds));
            }
        }
        Some((start, end))
    }

    fn should_keep(&self, triangle: &ClipTriangle) -> bool {
        let area = ndc_signed_area(triangle);
        if area.abs() < 1e-12 {
            return false;
        }
        !self.backface_culling || area > 0.0
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

/// Twice the signed area of the projected triangle; positive when counter-clockwise
fn ndc_signed_area(tri: &ClipTriangle) -> f32 {
    let [a, b, c] = tri
        .vertices
        .map(|v| Vec2::new(v.position.x, v.position.y) / v.position.w);
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

fn clip_polygon(polygon: &[ClipVertex], plane: Vec4) -> Vec<ClipVertex> {
    let mut out = Vec::with_capacity(polygon.len() + 2);
    for i in 0..polygon.len() {
        let current = polygon[i];
        let next = polygon[(i + 1) % polygon.len()];
        let dc = plane.dot(current.position);
        let dn = plane.dot(next.position);

        if dc >= 0.0 {
            out.push(current);
        }
        if (dc >= 0.0) != (dn >= 0.0) {
            out.push(current.lerp(&next, dc / (dc - dn)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vert(x: f32, y: f32, z: f32, w: f32) -> ClipVertex {
        ClipVertex {
            position: Vec4::new(x, y, z, w),
            world: Vec3::ZERO,
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        }
    }

    fn tri(a: ClipVertex, b: ClipVertex, c: ClipVertex) -> ClipTriangle {
        ClipTriangle {
            vertices: [a, b, c],
        }
    }

    #[test]
    fn inside_triangle_passes_untouched() {
        let clipper = Clipper::new();
        let t = tri(
            vert(-0.5, -0.5, 0.5, 1.0),
            vert(0.5, -0.5, 0.5, 1.0),
            vert(0.0, 0.5, 0.5, 1.0),
        );
        assert_eq!(clipper.clip_triangle(&t).len(), 1);
    }

    #[test]
    fn back_facing_triangle_is_culled() {
        let mut clipper = Clipper::new();
        let t = tri(
            vert(-0.5, -0.5, 0.5, 1.0),
            vert(0.0, 0.5, 0.5, 1.0),
            vert(0.5, -0.5, 0.5, 1.0),
        );
        assert!(clipper.clip_triangle(&t).is_empty());
        clipper.set_backface_culling(false);
        assert_eq!(clipper.clip_triangle(&t).len(), 1);
    }

    #[test]
    fn triangle_behind_camera_is_rejected() {
        let clipper = Clipper::new();
        let t = tri(
            vert(-0.5, -0.5, -0.5, 1.0),
            vert(0.5, -0.5, -0.5, 1.0),
            vert(0.0, 0.5, -0.5, 1.0),
        );
        assert!(clipper.clip_triangle(&t).is_empty());
    }

    #[test]
    fn straddling_triangle_stays_inside_frustum() {
        let clipper = Clipper::new();
        let t = tri(
            vert(-3.0, -0.5, 0.5, 1.0),
            vert(0.5, -0.5, 0.5, 1.0),
            vert(0.0, 0.5, 0.5, 1.0),
        );
        let out = clipper.clip_triangle(&t);
        assert!(!out.is_empty());
        for t in &out {
            for v in &t.vertices {
                assert!(v.position.x >= -v.position.w - 1e-5);
            }
        }
    }

    #[test]
    fn line_is_cut_at_near_plane() {
        let clipper = Clipper::new();
        let (start, end) = clipper
            .clip_line(Vec4::new(0.0, 0.0, -1.0, 1.0), Vec4::new(0.0, 0.0, 0.5, 1.0))
            .unwrap();
        assert!(start.z.abs() < 1e-6);
        assert_eq!(end, Vec4::new(0.0, 0.0, 0.5, 1.0));
        assert!(clipper
            .clip_line(Vec4::new(0.0, 0.0, -1.0, 1.0), Vec4::new(0.0, 0.0, -0.5, 1.0))
            .is_none());
    }
}
