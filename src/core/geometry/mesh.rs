use glam::{Vec2, Vec3};

#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub pos: Vec3,    // Position in model space
    pub normal: Vec3, // Unit normal in model space
    pub uv: Vec2,     // Texture coordinates
}

impl Vertex {
    pub fn new(pos: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self { pos, normal, uv }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Tri {
    pub vertices: [usize; 3], // Indices into the vertex buffer, counter-clockwise from the front
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>, // Vertex buffer
    pub tris: Vec<Tri>,        // Triangles
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_vertex(&mut self, vertex: Vertex) -> usize {
        self.vertices.push(vertex);
        self.vertices.len() - 1
    }

    pub fn push_tri(&mut self, a: usize, b: usize, c: usize) {
        self.tris.push(Tri {
            vertices: [a, b, c],
        });
    }

    /// Radius of the smallest origin-centred sphere containing the mesh
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| v.pos.length())
            .fold(0.0, f32::max)
    }

    /// Face normal from the winding, for checking generators against their vertex normals
    pub fn face_normal(&self, tri: &Tri) -> Vec3 {
        let v0 = self.vertices[tri.vertices[0]].pos;
        let v1 = self.vertices[tri.vertices[1]].pos;
        let v2 = self.vertices[tri.vertices[2]].pos;
        (v1 - v0).cross(v2 - v0).normalize_or_zero()
    }
}
