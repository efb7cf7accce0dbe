mod lines;
mod mesh;
mod primitives;

pub use lines::{grid_lines, light_helper_lines, LineSegments, Segment};
pub use mesh::{Mesh, Tri, Vertex};
pub use primitives::{box_geometry, sphere, torus};
