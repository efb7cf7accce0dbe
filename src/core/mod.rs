pub mod camera;
pub mod color;
pub mod geometry;
pub mod light;
pub mod material;
pub mod scene;
pub mod texture;
pub mod transform;

pub use camera::Camera;
pub use color::Color;
pub use light::{Light, LightSample};
pub use material::Material;
pub use scene::{Background, ObjectId, ObjectKind, Scene, SceneObject};
pub use texture::{Texture, TextureError, TextureHandle, TextureLoader, TextureState};
pub use transform::Transform;
