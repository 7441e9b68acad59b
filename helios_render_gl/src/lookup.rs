//! Pure translation tables between engine enums and GL enums
//!
//! Kept free of GL calls so the mappings can be tested without a context.

use helios_render::{
    IndexFormat, PrimitiveTopology, ShaderStage, TextureFormat, UniformType, VertexFormat,
};

/// GL texture format triple: (internal format, pixel format, pixel type)
pub(crate) fn texture_format(format: TextureFormat) -> (i32, u32, u32) {
    match format {
        TextureFormat::R8_UNORM => (glow::R8 as i32, glow::RED, glow::UNSIGNED_BYTE),
        TextureFormat::R8G8B8_UNORM => (glow::RGB8 as i32, glow::RGB, glow::UNSIGNED_BYTE),
        TextureFormat::R8G8B8A8_UNORM => (glow::RGBA8 as i32, glow::RGBA, glow::UNSIGNED_BYTE),
        TextureFormat::B8G8R8A8_UNORM => (glow::RGBA8 as i32, glow::BGRA, glow::UNSIGNED_BYTE),
        TextureFormat::D24_UNORM_S8_UINT => (
            glow::DEPTH24_STENCIL8 as i32,
            glow::DEPTH_STENCIL,
            glow::UNSIGNED_INT_24_8,
        ),
    }
}

/// Shader stage to GL shader type
pub(crate) fn shader_type(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
    }
}

/// Primitive topology to GL draw mode
pub(crate) fn primitive_mode(topology: PrimitiveTopology) -> u32 {
    match topology {
        PrimitiveTopology::PointList => glow::POINTS,
        PrimitiveTopology::LineList => glow::LINES,
        PrimitiveTopology::LineStrip => glow::LINE_STRIP,
        PrimitiveTopology::TriangleList => glow::TRIANGLES,
        PrimitiveTopology::TriangleStrip => glow::TRIANGLE_STRIP,
    }
}

/// Index format to GL element type
pub(crate) fn index_type(format: IndexFormat) -> u32 {
    match format {
        IndexFormat::U16 => glow::UNSIGNED_SHORT,
        IndexFormat::U32 => glow::UNSIGNED_INT,
    }
}

/// Vertex attribute format to (component count, GL component type)
pub(crate) fn vertex_attrib(format: VertexFormat) -> (i32, u32) {
    (format.component_count() as i32, glow::FLOAT)
}

/// GL active-uniform type to the engine uniform type.
///
/// Opaque types (samplers) have no block representation and return `None`.
pub(crate) fn uniform_type_from_gl(gl_type: u32) -> Option<UniformType> {
    match gl_type {
        glow::INT => Some(UniformType::I32),
        glow::UNSIGNED_INT => Some(UniformType::U32),
        glow::FLOAT => Some(UniformType::F32),
        glow::DOUBLE => Some(UniformType::F64),
        glow::BOOL => Some(UniformType::Bool),
        glow::FLOAT_VEC2 => Some(UniformType::V2F32),
        glow::FLOAT_VEC3 => Some(UniformType::V3F32),
        glow::FLOAT_VEC4 => Some(UniformType::V4F32),
        glow::INT_VEC2 => Some(UniformType::V2I32),
        glow::INT_VEC3 => Some(UniformType::V3I32),
        glow::INT_VEC4 => Some(UniformType::V4I32),
        glow::FLOAT_MAT4 => Some(UniformType::M4F32),
        _ => None,
    }
}

/// Human-readable name for a GL error code, for diagnostics
pub(crate) fn error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "GL_INVALID_ENUM",
        glow::INVALID_VALUE => "GL_INVALID_VALUE",
        glow::INVALID_OPERATION => "GL_INVALID_OPERATION",
        glow::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        glow::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "unknown GL error",
    }
}

#[cfg(test)]
#[path = "lookup_tests.rs"]
mod tests;
