//! WebGPU rendering
//!
//! Everything the game draws is an axis-aligned rectangle, so the GPU side
//! is a single flat-colour triangle pipeline. Text labels are laid out by the
//! game and left to the host (DOM overlays on the web).

pub mod canvas;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use canvas::FrameCanvas;
pub use pipeline::RenderState;
pub use vertex::Vertex;
