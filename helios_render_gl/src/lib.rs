/*!
# Helios Render - OpenGL Backend

OpenGL implementation of the Helios rendering core.

This crate provides a GL backend that implements the helios_render traits
using the glow library for GL bindings. It expects a current GL 3.3+ core
profile context on the calling thread and stays on that thread for its
whole lifetime.

Resource handles (textures, shader programs, geometries, targets, uniform
buffers) are `Rc`-shared and delete their GL objects when the last handle
drops. Device state the frame executor toggles per draw is cached and only
re-issued when it actually changes.
*/

// GL implementation modules
mod gl_context;
mod gl_geometry;
mod gl_render_target;
mod gl_renderer;
mod gl_shader_program;
mod gl_texture;
mod gl_uniform_buffer;
mod gl_uniform_input;
mod lookup;

pub use gl_geometry::GlGeometry;
pub use gl_render_target::GlRenderTarget;
pub use gl_renderer::GlRenderer;
pub use gl_shader_program::GlShaderProgram;
pub use gl_texture::GlTexture2d;
pub use gl_uniform_buffer::GlUniformBuffer;
pub use gl_uniform_input::GlUniformInput;

// Re-export the GL bindings so callers can construct a `glow::Context`
// without adding their own dependency on the exact same version.
pub use glow;
