//! GlUniformBuffer - GL implementation of the UniformBuffer trait
//!
//! A GPU buffer bound to a fixed uniform binding point, updated field by
//! field at the offsets the layout calculator produced.

use std::any::Any;
use std::rc::Rc;

use glow::HasContext;

use helios_render::{
    calculate_layout, render_err, CalculatedLayout, Error, Result, UniformBuffer,
    UniformBufferInfo, UniformValue,
};

use crate::gl_context::GlContext;

/// GL uniform buffer implementation
pub struct GlUniformBuffer {
    handle: glow::NativeBuffer,
    /// Uniform binding point this buffer lives at, fixed for its lifetime
    pub(crate) binding: u32,
    layout: CalculatedLayout,
    context: Rc<GlContext>,
}

impl GlUniformBuffer {
    /// Allocate a zero-filled buffer sized by the calculated layout and
    /// attach it to a fresh binding point
    pub(crate) fn new(context: Rc<GlContext>, info: &UniformBufferInfo) -> Result<Rc<Self>> {
        let layout = calculate_layout(info);
        let binding = context.allocate_uniform_binding()?;

        let gl = context.raw();
        let handle = unsafe { gl.create_buffer() }
            .map_err(|e| render_err!("helios::gl", "failed to create uniform buffer: {}", e))?;
        unsafe {
            gl.bind_buffer(glow::UNIFORM_BUFFER, Some(handle));
            gl.buffer_data_size(glow::UNIFORM_BUFFER, layout.size as i32, glow::DYNAMIC_DRAW);
            gl.bind_buffer_base(glow::UNIFORM_BUFFER, binding, Some(handle));
            gl.bind_buffer(glow::UNIFORM_BUFFER, None);
        }

        Ok(Rc::new(Self { handle, binding, layout, context }))
    }

    fn value_bytes(value: &UniformValue) -> Result<Vec<u8>> {
        let bytes = match value {
            UniformValue::I32(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::U32(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::F32(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::F64(v) => bytemuck::bytes_of(v).to_vec(),
            UniformValue::Bool(v) => bytemuck::bytes_of(&(*v as u32)).to_vec(),
            UniformValue::V2(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            UniformValue::V3(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            UniformValue::V4(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            UniformValue::V2I(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            UniformValue::V3I(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            UniformValue::V4I(v) => bytemuck::cast_slice(&v.to_array()).to_vec(),
            UniformValue::M4(m) => bytemuck::cast_slice(&m.to_cols_array()).to_vec(),
            UniformValue::Texture(_) => {
                return Err(Error::InvalidResource(
                    "textures cannot live in uniform buffers".to_string(),
                ))
            }
        };
        Ok(bytes)
    }
}

impl UniformBuffer for GlUniformBuffer {
    fn update_uniform(&self, name: &str, value: &UniformValue) -> Result<()> {
        let field = self
            .layout
            .fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
            .ok_or_else(|| {
                Error::InvalidResource(format!("unknown uniform buffer field '{}'", name))
            })?;

        match value.uniform_type() {
            Some(ty) if ty == field.ty => {}
            _ => {
                return Err(Error::InvalidResource(format!(
                    "type mismatch for uniform buffer field '{}'",
                    name
                )))
            }
        }

        let bytes = Self::value_bytes(value)?;
        let gl = self.context.raw();
        unsafe {
            gl.bind_buffer(glow::UNIFORM_BUFFER, Some(self.handle));
            gl.buffer_sub_data_u8_slice(glow::UNIFORM_BUFFER, field.offset as i32, &bytes);
            gl.bind_buffer(glow::UNIFORM_BUFFER, None);
        }
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlUniformBuffer {
    fn drop(&mut self) {
        unsafe { self.context.raw().delete_buffer(self.handle) };
    }
}
