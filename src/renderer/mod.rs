//! WebGPU rendering module
//!
//! Geometry is built on the CPU from a [`crate::sim::RenderSnapshot`] and
//! drawn as one colored triangle list.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
