//! Renderer module - all rendering-related types and traits

// Module declarations
pub mod geometry;
pub mod render_pass;
pub mod render_target;
pub mod renderable;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod uniform;
pub mod uniform_buffer;

#[cfg(test)]
pub mod mock_renderer;

// Re-exports
pub use geometry::*;
pub use render_pass::*;
pub use render_target::*;
pub use renderable::*;
pub use renderer::*;
pub use shader::*;
pub use texture::*;
pub use uniform::*;
pub use uniform_buffer::*;
