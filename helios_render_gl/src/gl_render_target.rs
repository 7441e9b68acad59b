//! GlRenderTarget - GL implementation of the RenderTarget trait
//!
//! Either the default framebuffer (the display) or a framebuffer object
//! with texture attachments (render-to-texture, including MRT).

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use glow::HasContext;

use helios_render::{render_bail, render_err, Error, RenderTarget, Result, Texture2d};

use crate::gl_context::GlContext;
use crate::gl_texture::GlTexture2d;

/// GL render target implementation
pub enum GlRenderTarget {
    /// The default framebuffer. Size tracks the window and is updated by
    /// `Renderer::resize_display_target`.
    Display { size: Cell<(u32, u32)> },
    /// A framebuffer object writing into texture attachments
    Textures {
        fbo: glow::NativeFramebuffer,
        size: (u32, u32),
        context: Rc<GlContext>,
    },
}

impl GlRenderTarget {
    /// Build an FBO writing into the given textures.
    ///
    /// Color textures become consecutive color attachments in list order;
    /// a depth-format texture becomes the depth-stencil attachment.
    pub(crate) fn new_texture_target(
        context: Rc<GlContext>,
        textures: &[Rc<dyn Texture2d>],
    ) -> Result<Rc<Self>> {
        if textures.is_empty() {
            return Err(Error::InvalidResource(
                "texture target needs at least one texture".to_string(),
            ));
        }

        let gl = context.raw();
        let fbo = unsafe { gl.create_framebuffer() }
            .map_err(|e| render_err!("helios::gl", "failed to create framebuffer: {}", e))?;
        unsafe { gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo)) };

        let mut draw_buffers = Vec::new();
        let mut size = None;
        for texture in textures {
            let gl_texture = texture
                .as_any()
                .downcast_ref::<GlTexture2d>()
                .ok_or_else(|| {
                    Error::InvalidResource("texture from a different backend".to_string())
                })?;

            let attachment = if gl_texture.info.format.is_depth() {
                glow::DEPTH_STENCIL_ATTACHMENT
            } else {
                let attachment = glow::COLOR_ATTACHMENT0 + draw_buffers.len() as u32;
                draw_buffers.push(attachment);
                attachment
            };
            unsafe {
                gl.framebuffer_texture_2d(
                    glow::FRAMEBUFFER,
                    attachment,
                    glow::TEXTURE_2D,
                    Some(gl_texture.handle),
                    0,
                );
            }
            size.get_or_insert((gl_texture.info.width, gl_texture.info.height));
        }

        unsafe { gl.draw_buffers(&draw_buffers) };

        let status = unsafe { gl.check_framebuffer_status(glow::FRAMEBUFFER) };
        unsafe { gl.bind_framebuffer(glow::FRAMEBUFFER, None) };
        if status != glow::FRAMEBUFFER_COMPLETE {
            unsafe { gl.delete_framebuffer(fbo) };
            render_bail!("helios::gl", "framebuffer incomplete: {:#x}", status);
        }

        Ok(Rc::new(Self::Textures {
            fbo,
            // Non-empty list checked above.
            size: size.unwrap_or((0, 0)),
            context,
        }))
    }

    pub(crate) fn size(&self) -> (u32, u32) {
        match self {
            GlRenderTarget::Display { size } => size.get(),
            GlRenderTarget::Textures { size, .. } => *size,
        }
    }

    /// Bind as the draw destination and set the viewport to cover it
    pub(crate) fn bind_write(&self, gl: &glow::Context) {
        let (width, height) = self.size();
        unsafe {
            match self {
                GlRenderTarget::Display { .. } => {
                    gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, None)
                }
                GlRenderTarget::Textures { fbo, .. } => {
                    gl.bind_framebuffer(glow::DRAW_FRAMEBUFFER, Some(*fbo))
                }
            }
            gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    /// Bind as the read source for pixel readback
    pub(crate) fn bind_read(&self, gl: &glow::Context) {
        unsafe {
            match self {
                GlRenderTarget::Display { .. } => {
                    gl.bind_framebuffer(glow::READ_FRAMEBUFFER, None)
                }
                GlRenderTarget::Textures { fbo, .. } => {
                    gl.bind_framebuffer(glow::READ_FRAMEBUFFER, Some(*fbo))
                }
            }
        }
    }
}

impl RenderTarget for GlRenderTarget {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlRenderTarget {
    fn drop(&mut self) {
        if let GlRenderTarget::Textures { fbo, context, .. } = self {
            unsafe { context.raw().delete_framebuffer(*fbo) };
        }
    }
}
