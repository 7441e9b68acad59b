//! Renderer trait - resource factory and frame executor

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;
use crate::renderer::{
    Geometry, MeshData, Renderable, RenderPass, RenderTarget, ShaderProgram, ShaderSource,
    Texture2d, Texture2dData, Texture2dInfo, UniformBuffer, UniformBufferInfo,
};

/// Main renderer trait: bridge between backend-agnostic resource
/// descriptions and live GPU objects, and driver of per-frame execution.
///
/// Factory methods validate the input description, allocate the backend
/// resource, and return a shared handle. The renderer keeps no owning
/// reference to created resources (except the display target): a resource
/// lives exactly as long as its last external holder.
///
/// All methods are synchronous and must be called from the one thread that
/// owns the graphics context. "Returned" means the corresponding API calls
/// were issued; the GPU's execution of them is asynchronous and not awaited.
pub trait Renderer {
    /// Create a texture from decoded pixel data
    fn add_texture(&mut self, data: &Texture2dData) -> Result<Rc<dyn Texture2d>>;

    /// Create an uninitialized texture from a bare size/format description
    /// (for render-to-texture targets)
    fn add_texture_with_info(&mut self, info: &Texture2dInfo) -> Result<Rc<dyn Texture2d>>;

    /// Compile and link a shader program from per-stage sources.
    ///
    /// # Errors
    ///
    /// Compile or link failure is a descriptive error at creation time;
    /// no default program is ever substituted.
    fn add_shader(&mut self, sources: &[ShaderSource]) -> Result<Rc<dyn ShaderProgram>>;

    /// Create geometry from mesh data
    fn add_mesh_geometry(&mut self, mesh: &MeshData) -> Result<Rc<dyn Geometry>>;

    /// Create the fixed full-screen-quad geometry, requiring no vertex
    /// buffer (for post-processing style passes)
    fn add_bufferless_quad(&mut self) -> Result<Rc<dyn Geometry>>;

    /// Construct a render pass drawing `renderables` into `target`
    fn add_render_pass(
        &mut self,
        renderables: Vec<Renderable>,
        target: Rc<dyn RenderTarget>,
    ) -> Rc<RefCell<RenderPass>>;

    /// Wrap existing textures as an off-screen render target.
    ///
    /// All textures must share compatible dimensions; this is the caller's
    /// responsibility and is not enforced here.
    fn create_texture_target(
        &mut self,
        textures: &[Rc<dyn Texture2d>],
    ) -> Result<Rc<dyn RenderTarget>>;

    /// Get the persistent on-screen render target
    fn get_display_target(&mut self) -> Rc<dyn RenderTarget>;

    /// Create a uniform buffer from a hand-specified field list; the block
    /// layout is computed by the layout calculator
    fn add_uniform_buffer(&mut self, info: &UniformBufferInfo) -> Result<Rc<dyn UniformBuffer>>;

    /// Create a uniform buffer matching the layout of a named uniform block
    /// introspected from a compiled shader program
    fn add_uniform_buffer_from_shader(
        &mut self,
        program: &Rc<dyn ShaderProgram>,
        block_name: &str,
    ) -> Result<Rc<dyn UniformBuffer>>;

    /// Capture the display target's current contents as an RGBA8 pixel
    /// buffer, flipped to top-down row order
    fn display_into_data(&mut self) -> Result<Texture2dData>;

    /// Reallocate the display target for new window dimensions.
    ///
    /// Must be called on window resize, before the next `render` targeting
    /// the display.
    fn resize_display_target(&mut self, width: u32, height: u32);

    /// Surface the backend's accumulated error state as a descriptive
    /// error.
    ///
    /// Per-call error checking is deliberately not performed on the draw
    /// fast path; call this explicitly when diagnostics are wanted.
    fn check_error(&mut self) -> Result<()>;

    /// Execute a render pass: bind its target, clear color and depth, then
    /// issue each renderable's state toggles, uniform upload, and draw call
    /// in layer order.
    fn render(&mut self, pass: &Rc<RefCell<RenderPass>>) -> Result<()>;
}
