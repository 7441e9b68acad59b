/*!
# Helios Renderer Core

Backend-agnostic draw-submission core for the Helios renderer.

This crate provides the platform-agnostic API for turning a set of drawable
objects (renderables) into ordered GPU draw calls, using trait-based dynamic
polymorphism. Backend implementations (OpenGL, etc.) provide concrete
resource types behind these traits.

## Architecture

- **Renderer**: Factory and frame-executor trait for creating GPU resources
  and submitting render passes
- **RenderPass**: Ordered renderables partitioned into priority layers,
  bound to one render target
- **Renderable**: One drawable unit (geometry + uniforms + blend/depth flags)
- **Texture2d / ShaderProgram / Geometry / UniformBuffer / RenderTarget**:
  Shared-ownership resource traits implemented by each backend
- **Uniform buffer layout calculator**: Pure offset/size/stride derivation
  for packed and std140 block layouts

All rendering operations are single-threaded: resource creation, pass
mutation, and draw execution run on the one thread that owns the graphics
context, so handles are `Rc`-shared rather than atomically counted.
*/

// Internal modules
pub mod error;
pub mod log;
pub mod renderer;

pub use error::{Error, Result};
pub use renderer::*;

// Re-export math library at crate root
pub use glam;
