pub mod batch;
pub mod camera;
pub mod gpu_context;
pub mod quad_pipeline;
pub mod renderer;
pub mod texture;
pub mod vertex;

pub use batch::{linear_color, DrawCall, QuadBatch};
pub use camera::{CameraUniform, ScreenCamera};
pub use gpu_context::GpuContext;
pub use quad_pipeline::QuadPipeline;
pub use renderer::QuadRenderer;
pub use texture::Texture;
pub use vertex::QuadVertex;
