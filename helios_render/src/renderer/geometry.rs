//! Mesh data descriptions and the geometry trait

use std::any::Any;

/// Vertex attribute format (interleaved float attributes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_camel_case_types)]
pub enum VertexFormat {
    R32_SFLOAT,
    R32G32_SFLOAT,
    R32G32B32_SFLOAT,
    R32G32B32A32_SFLOAT,
}

impl VertexFormat {
    /// Size of one attribute in bytes
    pub fn size_bytes(&self) -> usize {
        self.component_count() * 4
    }

    /// Number of float components
    pub fn component_count(&self) -> usize {
        match self {
            VertexFormat::R32_SFLOAT => 1,
            VertexFormat::R32G32_SFLOAT => 2,
            VertexFormat::R32G32B32_SFLOAT => 3,
            VertexFormat::R32G32B32A32_SFLOAT => 4,
        }
    }
}

/// Layout of one interleaved vertex
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Attributes in declaration order
    pub attributes: Vec<VertexFormat>,
}

impl VertexLayout {
    /// Create a layout from an attribute list
    pub fn new(attributes: Vec<VertexFormat>) -> Self {
        Self { attributes }
    }

    /// Byte stride of one vertex
    pub fn stride(&self) -> usize {
        self.attributes.iter().map(|a| a.size_bytes()).sum()
    }
}

/// Primitive assembly mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveTopology {
    PointList,
    LineList,
    LineStrip,
    TriangleList,
    TriangleStrip,
}

/// Index element type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    /// Size of one index in bytes
    pub fn size_bytes(&self) -> usize {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

/// Vertex/index data description consumed by `Renderer::add_mesh_geometry`.
///
/// Vertex data is interleaved according to `layout`. Index data is optional;
/// when absent the mesh is drawn non-indexed.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Raw interleaved vertex bytes
    pub vertex_data: Vec<u8>,
    /// Vertex layout for `vertex_data`
    pub layout: VertexLayout,
    /// Primitive assembly mode
    pub topology: PrimitiveTopology,
    /// Raw index bytes (optional)
    pub index_data: Option<Vec<u8>>,
    /// Index element type (required when `index_data` is present)
    pub index_format: Option<IndexFormat>,
}

impl MeshData {
    /// Number of vertices in `vertex_data`
    pub fn vertex_count(&self) -> usize {
        let stride = self.layout.stride();
        if stride == 0 {
            0
        } else {
            self.vertex_data.len() / stride
        }
    }

    /// Number of indices in `index_data` (0 if non-indexed)
    pub fn index_count(&self) -> usize {
        match (&self.index_data, self.index_format) {
            (Some(data), Some(fmt)) => data.len() / fmt.size_bytes(),
            _ => 0,
        }
    }
}

/// Geometry resource trait
///
/// Implemented by backend-specific geometry types (e.g., GlGeometry).
/// Covers both buffer-backed meshes and the bufferless full-screen quad.
pub trait Geometry {
    /// Backend access to the concrete type
    fn as_any(&self) -> &dyn Any;
}
