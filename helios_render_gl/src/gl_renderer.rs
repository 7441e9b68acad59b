//! GlRenderer - GL implementation of the Renderer trait
//!
//! Central object for creating GL resources and executing render passes.
//! Frame execution walks a pass's renderables in layer order, toggling
//! blend/depth state through the cached device state, uploading each
//! renderable's uniforms, and issuing its draw call.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use glow::HasContext;

use helios_render::{
    render_debug, render_info, Error, Geometry, MeshData, Renderable, RenderPass, RenderTarget,
    Renderer, Result, ShaderProgram, ShaderSource, Texture2d, Texture2dData, Texture2dInfo,
    TextureFormat, UniformBuffer, UniformBufferInfo, UniformInput,
};

use crate::gl_context::GlContext;
use crate::gl_geometry::GlGeometry;
use crate::gl_render_target::GlRenderTarget;
use crate::gl_shader_program::GlShaderProgram;
use crate::gl_texture::GlTexture2d;
use crate::gl_uniform_buffer::GlUniformBuffer;
use crate::gl_uniform_input::GlUniformInput;

/// GL renderer implementation
///
/// Requires a current GL context on the calling thread for its whole
/// lifetime; all resource handles it produces are tied to that context.
pub struct GlRenderer {
    /// Shared GL context for all resources
    context: Rc<GlContext>,
    /// The persistent on-screen target
    display: Rc<GlRenderTarget>,
    /// When true, passes are reordered to group draws by program
    optimise_draw_order: bool,
}

impl GlRenderer {
    /// Create a renderer over an existing, current GL context.
    ///
    /// # Arguments
    ///
    /// * `gl` - The loaded GL function table
    /// * `width` - Initial display framebuffer width in pixels
    /// * `height` - Initial display framebuffer height in pixels
    pub fn new(gl: glow::Context, width: u32, height: u32) -> Result<Self> {
        let vendor = unsafe { gl.get_parameter_string(glow::VENDOR) };
        let device = unsafe { gl.get_parameter_string(glow::RENDERER) };
        render_info!("helios::gl", "GL renderer on {} {}", vendor, device);

        // Fixed pipeline configuration; per-draw code only toggles
        // enable/disable bits on top of this.
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 0.0);
            gl.blend_func_separate(
                glow::SRC_ALPHA,
                glow::ONE_MINUS_SRC_ALPHA,
                glow::ONE,
                glow::ONE_MINUS_SRC_ALPHA,
            );
            gl.depth_func(glow::LEQUAL);
            gl.depth_range_f32(0.0, 1.0);
        }

        Ok(Self {
            context: Rc::new(GlContext::new(gl)),
            display: Rc::new(GlRenderTarget::Display {
                size: Cell::new((width, height)),
            }),
            optimise_draw_order: true,
        })
    }

    /// Enable or disable draw-order optimisation (on by default)
    pub fn set_optimise_draw_order(&mut self, enable: bool) {
        self.optimise_draw_order = enable;
    }

    /// Sort key for draw-order optimisation: the native program name.
    ///
    /// Renderables from a foreign backend sort to the front and fail
    /// properly once their uniforms are uploaded.
    fn program_key(renderable: &Renderable) -> u64 {
        let program = renderable.uniform.program();
        program
            .as_any()
            .downcast_ref::<GlShaderProgram>()
            .map(|p| p.handle.0.get() as u64)
            .unwrap_or(0)
    }
}

impl Renderer for GlRenderer {
    fn add_texture(&mut self, data: &Texture2dData) -> Result<Rc<dyn Texture2d>> {
        Ok(GlTexture2d::from_data(self.context.clone(), data)?)
    }

    fn add_texture_with_info(&mut self, info: &Texture2dInfo) -> Result<Rc<dyn Texture2d>> {
        Ok(GlTexture2d::new(self.context.clone(), *info, None)?)
    }

    fn add_shader(&mut self, sources: &[ShaderSource]) -> Result<Rc<dyn ShaderProgram>> {
        Ok(GlShaderProgram::new(self.context.clone(), sources)?)
    }

    fn add_mesh_geometry(&mut self, mesh: &MeshData) -> Result<Rc<dyn Geometry>> {
        Ok(GlGeometry::new_mesh(self.context.clone(), mesh)?)
    }

    fn add_bufferless_quad(&mut self) -> Result<Rc<dyn Geometry>> {
        Ok(GlGeometry::new_bufferless_quad(self.context.clone())?)
    }

    fn add_render_pass(
        &mut self,
        renderables: Vec<Renderable>,
        target: Rc<dyn RenderTarget>,
    ) -> Rc<RefCell<RenderPass>> {
        Rc::new(RefCell::new(RenderPass::new(renderables, target)))
    }

    fn create_texture_target(
        &mut self,
        textures: &[Rc<dyn Texture2d>],
    ) -> Result<Rc<dyn RenderTarget>> {
        Ok(GlRenderTarget::new_texture_target(self.context.clone(), textures)?)
    }

    fn get_display_target(&mut self) -> Rc<dyn RenderTarget> {
        self.display.clone()
    }

    fn add_uniform_buffer(&mut self, info: &UniformBufferInfo) -> Result<Rc<dyn UniformBuffer>> {
        Ok(GlUniformBuffer::new(self.context.clone(), info)?)
    }

    fn add_uniform_buffer_from_shader(
        &mut self,
        program: &Rc<dyn ShaderProgram>,
        block_name: &str,
    ) -> Result<Rc<dyn UniformBuffer>> {
        let gl_program = program
            .as_any()
            .downcast_ref::<GlShaderProgram>()
            .ok_or_else(|| {
                Error::InvalidResource("shader program from a different backend".to_string())
            })?;

        let info = gl_program.get_uniform_block(block_name)?;
        let buffer = GlUniformBuffer::new(self.context.clone(), &info)?;
        gl_program.bind_block(block_name, buffer.binding)?;
        Ok(buffer)
    }

    fn display_into_data(&mut self) -> Result<Texture2dData> {
        let (width, height) = self.display.size();
        let info = Texture2dInfo::new(width, height, TextureFormat::R8G8B8A8_UNORM);
        let mut pixels = vec![0u8; info.data_size()];

        self.display.bind_read(self.context.raw());
        unsafe {
            let gl = self.context.raw();
            gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
            gl.read_pixels(
                0,
                0,
                width as i32,
                height as i32,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelPackData::Slice(&mut pixels),
            );
        }

        // GL reads bottom-up; callers get top-down row order.
        Ok(Texture2dData::new(info, pixels)?.flip_y())
    }

    fn resize_display_target(&mut self, width: u32, height: u32) {
        render_debug!("helios::gl", "display resized to {}x{}", width, height);
        if let GlRenderTarget::Display { size } = &*self.display {
            size.set((width, height));
        }
    }

    fn check_error(&mut self) -> Result<()> {
        self.context.check_error()
    }

    fn render(&mut self, pass: &Rc<RefCell<RenderPass>>) -> Result<()> {
        let mut pass = pass.borrow_mut();

        let target = pass
            .target()
            .as_any()
            .downcast_ref::<GlRenderTarget>()
            .ok_or_else(|| {
                Error::InvalidResource("render target from a different backend".to_string())
            })?;
        target.bind_write(self.context.raw());

        unsafe {
            self.context
                .raw()
                .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        if self.optimise_draw_order {
            pass.reorder_layers_by(Self::program_key);
        }

        for obj in pass.renderables() {
            self.context.set_blend(obj.alpha_blending);
            self.context.set_depth_test(obj.depth_test);

            let input = obj
                .uniform
                .as_any()
                .downcast_ref::<GlUniformInput>()
                .ok_or_else(|| {
                    Error::InvalidResource("uniform input from a different backend".to_string())
                })?;
            input.program.update_uniforms(input)?;

            if let Some(geometry) = &obj.geometry {
                let gl_geometry = geometry
                    .as_any()
                    .downcast_ref::<GlGeometry>()
                    .ok_or_else(|| {
                        Error::InvalidResource("geometry from a different backend".to_string())
                    })?;
                gl_geometry.draw();
            }
        }

        Ok(())
    }
}
