//! GlShaderProgram - GL implementation of the ShaderProgram trait
//!
//! Compiles and links shader stages, introspects the active uniforms and
//! uniform blocks, and uploads per-draw uniform values.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use glow::HasContext;
use rustc_hash::FxHashMap;

use helios_render::{
    render_bail, render_err, render_warn, BlockLayout, Error, Result, ShaderProgram, ShaderSource,
    Texture2d, UniformBufferInfo, UniformBufferInput, UniformInput, UniformValue,
};

use crate::gl_context::GlContext;
use crate::gl_texture::GlTexture2d;
use crate::gl_uniform_input::GlUniformInput;
use crate::lookup;

/// One active uniform with a location (not a block member)
struct GlUniform {
    location: glow::NativeUniformLocation,
    gl_type: u32,
}

/// GL shader program implementation
pub struct GlShaderProgram {
    pub(crate) handle: glow::NativeProgram,
    /// Active uniforms by name, introspected at link time
    uniforms: FxHashMap<String, GlUniform>,
    context: Rc<GlContext>,
}

impl GlShaderProgram {
    /// Compile and link a program from per-stage sources
    pub(crate) fn new(context: Rc<GlContext>, sources: &[ShaderSource]) -> Result<Rc<Self>> {
        if sources.is_empty() {
            return Err(Error::InvalidResource(
                "shader program needs at least one source".to_string(),
            ));
        }

        let gl = context.raw();
        let mut shaders = Vec::with_capacity(sources.len());

        for source in sources {
            let shader = unsafe { gl.create_shader(lookup::shader_type(source.stage)) }
                .map_err(|e| render_err!("helios::gl", "failed to create shader: {}", e))?;
            unsafe {
                gl.shader_source(shader, &source.source);
                gl.compile_shader(shader);
            }
            if !unsafe { gl.get_shader_compile_status(shader) } {
                let log = unsafe { gl.get_shader_info_log(shader) };
                unsafe {
                    gl.delete_shader(shader);
                    for s in shaders {
                        gl.delete_shader(s);
                    }
                }
                render_bail!(
                    "helios::gl",
                    "{:?} shader compilation failed: {}",
                    source.stage,
                    log.trim()
                );
            }
            shaders.push(shader);
        }

        let handle = unsafe { gl.create_program() }
            .map_err(|e| render_err!("helios::gl", "failed to create program: {}", e))?;
        unsafe {
            for &shader in &shaders {
                gl.attach_shader(handle, shader);
            }
            gl.link_program(handle);
        }

        let linked = unsafe { gl.get_program_link_status(handle) };
        unsafe {
            for shader in shaders {
                gl.detach_shader(handle, shader);
                gl.delete_shader(shader);
            }
        }
        if !linked {
            let log = unsafe { gl.get_program_info_log(handle) };
            unsafe { gl.delete_program(handle) };
            render_bail!("helios::gl", "program link failed: {}", log.trim());
        }

        // Introspect plain uniforms. Block members have no location and are
        // skipped here; blocks are introspected on demand.
        let mut uniforms = FxHashMap::default();
        let count = unsafe { gl.get_active_uniforms(handle) };
        for index in 0..count {
            if let Some(active) = unsafe { gl.get_active_uniform(handle, index) } {
                let name = active.name.trim_end_matches("[0]").to_string();
                if let Some(location) = unsafe { gl.get_uniform_location(handle, &active.name) } {
                    uniforms.insert(
                        name,
                        GlUniform {
                            location,
                            gl_type: active.utype,
                        },
                    );
                }
            }
        }

        Ok(Rc::new(Self { handle, uniforms, context }))
    }

    /// Introspect a named uniform block into a buffer definition.
    ///
    /// Member offsets are not read back from the driver; the block is
    /// assumed to be declared `std140`, whose layout the engine-side
    /// calculator reproduces exactly.
    pub(crate) fn get_uniform_block(&self, block_name: &str) -> Result<UniformBufferInfo> {
        let gl = self.context.raw();

        let block_index = unsafe { gl.get_uniform_block_index(self.handle, block_name) }
            .ok_or_else(|| {
                Error::InvalidResource(format!("program has no uniform block '{}'", block_name))
            })?;

        let member_count = unsafe {
            gl.get_active_uniform_block_parameter_i32(
                self.handle,
                block_index,
                glow::UNIFORM_BLOCK_ACTIVE_UNIFORMS,
            )
        } as usize;

        let mut member_indices = vec![0i32; member_count];
        unsafe {
            gl.get_active_uniform_block_parameter_i32_slice(
                self.handle,
                block_index,
                glow::UNIFORM_BLOCK_ACTIVE_UNIFORM_INDICES,
                &mut member_indices,
            );
        }
        // Uniform indices follow declaration order; the slice itself is
        // not guaranteed sorted.
        member_indices.sort_unstable();

        let mut inputs = Vec::with_capacity(member_count);
        for index in member_indices {
            let active = unsafe { gl.get_active_uniform(self.handle, index as u32) }
                .ok_or_else(|| {
                    render_err!("helios::gl", "uniform index {} vanished during introspection", index)
                })?;

            // "Block.member[0]" -> "member"
            let name = active
                .name
                .rsplit('.')
                .next()
                .unwrap_or(&active.name)
                .trim_end_matches("[0]")
                .to_string();

            let ty = lookup::uniform_type_from_gl(active.utype).ok_or_else(|| {
                render_err!(
                    "helios::gl",
                    "unsupported type {:#x} for block member '{}'",
                    active.utype,
                    name
                )
            })?;

            if active.size > 1 {
                inputs.push(UniformBufferInput::array(name, ty, active.size as usize));
            } else {
                inputs.push(UniformBufferInput::new(name, ty));
            }
        }

        Ok(UniformBufferInfo::new(BlockLayout::Std140, inputs))
    }

    /// Associate a named uniform block with a buffer binding point
    pub(crate) fn bind_block(&self, block_name: &str, binding: u32) -> Result<()> {
        let gl = self.context.raw();
        let block_index = unsafe { gl.get_uniform_block_index(self.handle, block_name) }
            .ok_or_else(|| {
                Error::InvalidResource(format!("program has no uniform block '{}'", block_name))
            })?;
        unsafe { gl.uniform_block_binding(self.handle, block_index, binding) };
        Ok(())
    }

    /// Activate this program and upload an input set's values.
    ///
    /// Texture values are bound to consecutive texture units, starting
    /// at unit 0, in the order they are encountered.
    pub(crate) fn update_uniforms(&self, input: &GlUniformInput) -> Result<()> {
        self.context.use_program(self.handle);
        let gl = self.context.raw();

        let mut texture_unit = 0u32;
        for (name, value) in input.values.borrow().iter() {
            let Some(uniform) = self.uniforms.get(name) else {
                render_warn!("helios::gl", "program has no uniform '{}', value ignored", name);
                continue;
            };
            let loc = Some(&uniform.location);

            unsafe {
                match value {
                    UniformValue::I32(v) => gl.uniform_1_i32(loc, *v),
                    UniformValue::U32(v) => gl.uniform_1_u32(loc, *v),
                    UniformValue::F32(v) => gl.uniform_1_f32(loc, *v),
                    // Core GL has no f64 uniforms; precision is dropped.
                    UniformValue::F64(v) => gl.uniform_1_f32(loc, *v as f32),
                    UniformValue::Bool(v) => gl.uniform_1_i32(loc, *v as i32),
                    UniformValue::V2(v) => gl.uniform_2_f32(loc, v.x, v.y),
                    UniformValue::V3(v) => gl.uniform_3_f32(loc, v.x, v.y, v.z),
                    UniformValue::V4(v) => gl.uniform_4_f32(loc, v.x, v.y, v.z, v.w),
                    UniformValue::V2I(v) => gl.uniform_2_i32(loc, v.x, v.y),
                    UniformValue::V3I(v) => gl.uniform_3_i32(loc, v.x, v.y, v.z),
                    UniformValue::V4I(v) => gl.uniform_4_i32(loc, v.x, v.y, v.z, v.w),
                    UniformValue::M4(m) => {
                        gl.uniform_matrix_4_f32_slice(loc, false, &m.to_cols_array())
                    }
                    UniformValue::Texture(texture) => {
                        let gl_texture = texture
                            .as_any()
                            .downcast_ref::<GlTexture2d>()
                            .ok_or_else(|| {
                                Error::InvalidResource(
                                    "texture from a different backend".to_string(),
                                )
                            })?;
                        if uniform.gl_type != glow::SAMPLER_2D {
                            render_warn!(
                                "helios::gl",
                                "uniform '{}' is not a sampler2D, texture bind may be ignored",
                                name
                            );
                        }
                        gl.active_texture(glow::TEXTURE0 + texture_unit);
                        gl.bind_texture(glow::TEXTURE_2D, Some(gl_texture.handle));
                        gl.uniform_1_i32(loc, texture_unit as i32);
                        texture_unit += 1;
                    }
                }
            }
        }

        Ok(())
    }
}

impl ShaderProgram for GlShaderProgram {
    fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains_key(name)
    }

    fn new_uniform_input(self: Rc<Self>) -> Rc<dyn UniformInput> {
        Rc::new(GlUniformInput {
            program: self,
            values: RefCell::new(Vec::new()),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlShaderProgram {
    fn drop(&mut self) {
        self.context.forget_program(self.handle);
        unsafe { self.context.raw().delete_program(self.handle) };
    }
}
