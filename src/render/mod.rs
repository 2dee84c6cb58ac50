//! The rendering pipeline: matrices, rasterization and the buffers it fills.

pub mod depth;
pub mod framebuffer;
pub mod line;
pub mod pipeline;
pub mod rasterizer;
mod renderer;

pub use depth::{DepthBuffer, DEPTH_CLEAR};
pub use framebuffer::FrameBuffer;
pub use pipeline::MatrixPipeline;
pub use rasterizer::{EdgeFunctionRasterizer, FillResult, Interpolation, Triangle};
pub use renderer::{DrawStats, Renderer};
