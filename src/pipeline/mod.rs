pub mod buffer;
pub mod clipper;
pub mod pipeline;
pub mod rasterizer;
pub mod renderer;
pub mod shading;

pub use buffer::FrameBuffer;
pub use pipeline::{FrameStats, Pipeline, States};
pub use renderer::Renderer;
