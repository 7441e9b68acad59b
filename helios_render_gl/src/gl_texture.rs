//! GlTexture2d - GL implementation of the Texture2d trait

use std::any::Any;
use std::rc::Rc;

use glow::HasContext;

use helios_render::{render_err, Result, Texture2d, Texture2dData, Texture2dInfo};

use crate::gl_context::GlContext;
use crate::lookup;

/// GL texture implementation
pub struct GlTexture2d {
    pub(crate) handle: glow::NativeTexture,
    pub(crate) info: Texture2dInfo,
    /// Shared GL context (for draws and cleanup)
    context: Rc<GlContext>,
}

impl GlTexture2d {
    /// Create a texture, optionally filling it with pixel data
    pub(crate) fn new(
        context: Rc<GlContext>,
        info: Texture2dInfo,
        data: Option<&[u8]>,
    ) -> Result<Rc<Self>> {
        let gl = context.raw();
        let (internal_format, format, pixel_type) = lookup::texture_format(info.format);

        let handle = unsafe { gl.create_texture() }
            .map_err(|e| render_err!("helios::gl", "failed to create texture: {}", e))?;

        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(handle));
            // Rows are tightly packed regardless of format width.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                internal_format,
                info.width as i32,
                info.height as i32,
                0,
                format,
                pixel_type,
                data,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        Ok(Rc::new(Self { handle, info, context }))
    }

    pub(crate) fn from_data(context: Rc<GlContext>, data: &Texture2dData) -> Result<Rc<Self>> {
        Self::new(context, *data.info(), Some(data.data()))
    }
}

impl Texture2d for GlTexture2d {
    fn info(&self) -> &Texture2dInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlTexture2d {
    fn drop(&mut self) {
        unsafe { self.context.raw().delete_texture(self.handle) };
    }
}
