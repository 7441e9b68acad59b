//! Unit tests for the GL translation tables
//!
//! Pure mapping tests; no GL context required.

use helios_render::{
    IndexFormat, PrimitiveTopology, ShaderStage, TextureFormat, UniformType, VertexFormat,
};

use super::*;

#[test]
fn test_texture_format_triples() {
    assert_eq!(
        texture_format(TextureFormat::R8_UNORM),
        (glow::R8 as i32, glow::RED, glow::UNSIGNED_BYTE)
    );
    assert_eq!(
        texture_format(TextureFormat::R8G8B8A8_UNORM),
        (glow::RGBA8 as i32, glow::RGBA, glow::UNSIGNED_BYTE)
    );
    // BGRA keeps the RGBA8 internal format; only the upload format swizzles.
    assert_eq!(
        texture_format(TextureFormat::B8G8R8A8_UNORM),
        (glow::RGBA8 as i32, glow::BGRA, glow::UNSIGNED_BYTE)
    );
    assert_eq!(
        texture_format(TextureFormat::D24_UNORM_S8_UINT),
        (
            glow::DEPTH24_STENCIL8 as i32,
            glow::DEPTH_STENCIL,
            glow::UNSIGNED_INT_24_8
        )
    );
}

#[test]
fn test_shader_types() {
    assert_eq!(shader_type(ShaderStage::Vertex), glow::VERTEX_SHADER);
    assert_eq!(shader_type(ShaderStage::Fragment), glow::FRAGMENT_SHADER);
    assert_eq!(shader_type(ShaderStage::Geometry), glow::GEOMETRY_SHADER);
}

#[test]
fn test_primitive_modes() {
    assert_eq!(primitive_mode(PrimitiveTopology::PointList), glow::POINTS);
    assert_eq!(primitive_mode(PrimitiveTopology::LineList), glow::LINES);
    assert_eq!(primitive_mode(PrimitiveTopology::LineStrip), glow::LINE_STRIP);
    assert_eq!(primitive_mode(PrimitiveTopology::TriangleList), glow::TRIANGLES);
    assert_eq!(
        primitive_mode(PrimitiveTopology::TriangleStrip),
        glow::TRIANGLE_STRIP
    );
}

#[test]
fn test_index_types() {
    assert_eq!(index_type(IndexFormat::U16), glow::UNSIGNED_SHORT);
    assert_eq!(index_type(IndexFormat::U32), glow::UNSIGNED_INT);
}

#[test]
fn test_vertex_attribs_are_float_components() {
    assert_eq!(vertex_attrib(VertexFormat::R32_SFLOAT), (1, glow::FLOAT));
    assert_eq!(vertex_attrib(VertexFormat::R32G32_SFLOAT), (2, glow::FLOAT));
    assert_eq!(vertex_attrib(VertexFormat::R32G32B32_SFLOAT), (3, glow::FLOAT));
    assert_eq!(
        vertex_attrib(VertexFormat::R32G32B32A32_SFLOAT),
        (4, glow::FLOAT)
    );
}

#[test]
fn test_uniform_types_from_gl() {
    assert_eq!(uniform_type_from_gl(glow::FLOAT), Some(UniformType::F32));
    assert_eq!(uniform_type_from_gl(glow::INT), Some(UniformType::I32));
    assert_eq!(uniform_type_from_gl(glow::BOOL), Some(UniformType::Bool));
    assert_eq!(
        uniform_type_from_gl(glow::FLOAT_VEC3),
        Some(UniformType::V3F32)
    );
    assert_eq!(
        uniform_type_from_gl(glow::FLOAT_MAT4),
        Some(UniformType::M4F32)
    );
    // Samplers cannot live in uniform blocks.
    assert_eq!(uniform_type_from_gl(glow::SAMPLER_2D), None);
}

#[test]
fn test_error_names() {
    assert_eq!(error_name(glow::INVALID_OPERATION), "GL_INVALID_OPERATION");
    assert_eq!(error_name(glow::OUT_OF_MEMORY), "GL_OUT_OF_MEMORY");
    assert_eq!(error_name(0xDEAD), "unknown GL error");
}
