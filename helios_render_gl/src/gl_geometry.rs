//! GlGeometry - GL implementation of the Geometry trait
//!
//! Two kinds: buffer-backed interleaved meshes (VAO + VBO, optional EBO),
//! and the bufferless full-screen quad, which carries an empty VAO and
//! synthesizes its corners in the vertex shader from `gl_VertexID`.

use std::any::Any;
use std::rc::Rc;

use glow::HasContext;

use helios_render::{render_bail, render_err, Geometry, MeshData, Result};

use crate::gl_context::GlContext;
use crate::lookup;

enum GeometryKind {
    Mesh {
        vbo: glow::NativeBuffer,
        ebo: Option<glow::NativeBuffer>,
        /// GL draw mode
        mode: u32,
        vertex_count: i32,
        /// (index count, GL element type) when indexed
        indices: Option<(i32, u32)>,
    },
    /// Four-vertex triangle strip without any buffer
    BufferlessQuad,
}

/// GL geometry implementation
pub struct GlGeometry {
    vao: glow::NativeVertexArray,
    kind: GeometryKind,
    context: Rc<GlContext>,
}

impl GlGeometry {
    /// Upload an interleaved mesh into a fresh VAO/VBO (and EBO if indexed)
    pub(crate) fn new_mesh(context: Rc<GlContext>, mesh: &MeshData) -> Result<Rc<Self>> {
        if mesh.layout.attributes.is_empty() {
            render_bail!("helios::gl", "mesh has no vertex attributes");
        }
        if mesh.index_data.is_some() != mesh.index_format.is_some() {
            render_bail!("helios::gl", "index data and index format must be given together");
        }

        let gl = context.raw();
        let vao = unsafe { gl.create_vertex_array() }
            .map_err(|e| render_err!("helios::gl", "failed to create vertex array: {}", e))?;
        let vbo = unsafe { gl.create_buffer() }
            .map_err(|e| render_err!("helios::gl", "failed to create vertex buffer: {}", e))?;

        context.bind_vertex_array(vao);
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, &mesh.vertex_data, glow::STATIC_DRAW);

            let stride = mesh.layout.stride() as i32;
            let mut offset = 0i32;
            for (index, attribute) in mesh.layout.attributes.iter().enumerate() {
                let (components, component_type) = lookup::vertex_attrib(*attribute);
                gl.enable_vertex_attrib_array(index as u32);
                gl.vertex_attrib_pointer_f32(
                    index as u32,
                    components,
                    component_type,
                    false,
                    stride,
                    offset,
                );
                offset += attribute.size_bytes() as i32;
            }
        }

        let ebo = match (&mesh.index_data, mesh.index_format) {
            (Some(index_data), Some(_)) => {
                let ebo = unsafe { gl.create_buffer() }.map_err(|e| {
                    render_err!("helios::gl", "failed to create index buffer: {}", e)
                })?;
                unsafe {
                    // EBO binding is captured by the bound VAO.
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        index_data,
                        glow::STATIC_DRAW,
                    );
                }
                Some(ebo)
            }
            _ => None,
        };

        let indices = mesh
            .index_format
            .map(|fmt| (mesh.index_count() as i32, lookup::index_type(fmt)));

        Ok(Rc::new(Self {
            vao,
            kind: GeometryKind::Mesh {
                vbo,
                ebo,
                mode: lookup::primitive_mode(mesh.topology),
                vertex_count: mesh.vertex_count() as i32,
                indices,
            },
            context,
        }))
    }

    /// Create the bufferless full-screen quad
    pub(crate) fn new_bufferless_quad(context: Rc<GlContext>) -> Result<Rc<Self>> {
        // Core profile requires a bound VAO even for attribute-less draws.
        let vao = unsafe { context.raw().create_vertex_array() }
            .map_err(|e| render_err!("helios::gl", "failed to create vertex array: {}", e))?;
        Ok(Rc::new(Self {
            vao,
            kind: GeometryKind::BufferlessQuad,
            context,
        }))
    }

    /// Issue this geometry's draw call (state and uniforms already set)
    pub(crate) fn draw(&self) {
        self.context.bind_vertex_array(self.vao);
        let gl = self.context.raw();
        unsafe {
            match &self.kind {
                GeometryKind::Mesh {
                    mode,
                    vertex_count,
                    indices,
                    ..
                } => match indices {
                    Some((count, element_type)) => {
                        gl.draw_elements(*mode, *count, *element_type, 0)
                    }
                    None => gl.draw_arrays(*mode, 0, *vertex_count),
                },
                GeometryKind::BufferlessQuad => {
                    gl.draw_arrays(glow::TRIANGLE_STRIP, 0, 4)
                }
            }
        }
    }
}

impl Geometry for GlGeometry {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for GlGeometry {
    fn drop(&mut self) {
        self.context.forget_vertex_array(self.vao);
        let gl = self.context.raw();
        unsafe {
            gl.delete_vertex_array(self.vao);
            if let GeometryKind::Mesh { vbo, ebo, .. } = &self.kind {
                gl.delete_buffer(*vbo);
                if let Some(ebo) = ebo {
                    gl.delete_buffer(*ebo);
                }
            }
        }
    }
}
