//! Uniform buffer descriptions, the block layout calculator, and the
//! uniform buffer trait
//!
//! The layout calculator is a pure function: a list of named/typed fields
//! plus a layout convention in, byte offsets/sizes/strides out. It runs once
//! at buffer creation, never per frame. It must reproduce the target API's
//! memory layout rules exactly; any divergence corrupts uniform reads on the
//! GPU side without a detectable error.

use std::any::Any;

use crate::error::Result;
use crate::renderer::UniformValue;

/// Data type of one uniform block field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum UniformType {
    I32,
    U32,
    F32,
    F64,
    Bool,
    V2F32,
    V3F32,
    V4F32,
    V2I32,
    V3I32,
    V4I32,
    M4F32,
}

impl UniformType {
    /// Raw size of one element of this type in bytes
    pub fn element_size(&self) -> usize {
        match self {
            UniformType::I32 | UniformType::U32 | UniformType::F32 | UniformType::Bool => 4,
            UniformType::F64 => 8,
            UniformType::V2F32 | UniformType::V2I32 => 8,
            UniformType::V3F32 | UniformType::V3I32 => 12,
            UniformType::V4F32 | UniformType::V4I32 => 16,
            UniformType::M4F32 => 64,
        }
    }
}

/// Memory layout convention of a uniform block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLayout {
    /// Tightly packed; fields align to their component size
    Packed,
    /// GL std140 rules; see `calculate_layout`
    Std140,
}

/// One field descriptor in a uniform buffer definition
#[derive(Debug, Clone)]
pub struct UniformBufferInput {
    /// Field name as declared in the shader block
    pub name: String,
    /// Field data type
    pub ty: UniformType,
    /// Array length (1 if scalar)
    pub count: usize,
}

impl UniformBufferInput {
    /// Create a non-array field descriptor
    pub fn new(name: impl Into<String>, ty: UniformType) -> Self {
        Self { name: name.into(), ty, count: 1 }
    }

    /// Create an array field descriptor
    pub fn array(name: impl Into<String>, ty: UniformType, count: usize) -> Self {
        Self { name: name.into(), ty, count }
    }
}

/// Definition of a uniform buffer: ordered fields plus a layout convention
#[derive(Debug, Clone)]
pub struct UniformBufferInfo {
    layout: BlockLayout,
    inputs: Vec<UniformBufferInput>,
}

impl UniformBufferInfo {
    /// Create a uniform buffer definition
    pub fn new(layout: BlockLayout, inputs: Vec<UniformBufferInput>) -> Self {
        Self { layout, inputs }
    }

    /// Get the layout convention
    pub fn layout(&self) -> BlockLayout {
        self.layout
    }

    /// Get the field descriptors in declaration order
    pub fn inputs(&self) -> &[UniformBufferInput] {
        &self.inputs
    }

    /// Total buffer size in bytes under this definition's layout
    pub fn size(&self) -> usize {
        calculate_layout(self).size
    }
}

// ===== LAYOUT CALCULATION =====

/// Computed placement of one block field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockField {
    /// Field data type
    pub ty: UniformType,
    /// Array length (1 if scalar)
    pub count: usize,
    /// Byte offset from the start of the block
    pub offset: usize,
    /// Total byte size of the field (all array elements)
    pub size: usize,
    /// Spacing between consecutive array elements in bytes
    pub stride: usize,
}

/// Computed layout of a whole uniform block
#[derive(Debug, Clone)]
pub struct CalculatedLayout {
    /// Fields in declaration order, with their placements
    pub fields: Vec<(String, BlockField)>,
    /// Total block size in bytes, including trailing padding
    pub size: usize,
}

/// Round `offset` up to the next multiple of `align`.
fn round_up(offset: usize, align: usize) -> usize {
    debug_assert!(align > 0);
    (offset + align - 1) / align * align
}

/// Required alignment of a field under a layout convention.
///
/// Std140: scalars align to their own size, two-component vectors to 8,
/// three/four-component vectors and matrices to 16; array elements always
/// align to 16. Packed: everything aligns to its component size.
fn alignment(ty: UniformType, count: usize, layout: BlockLayout) -> usize {
    match layout {
        BlockLayout::Packed => match ty {
            UniformType::F64 => 8,
            _ => 4,
        },
        BlockLayout::Std140 => {
            let base = match ty {
                UniformType::I32
                | UniformType::U32
                | UniformType::F32
                | UniformType::Bool => 4,
                UniformType::F64 => 8,
                UniformType::V2F32 | UniformType::V2I32 => 8,
                UniformType::V3F32
                | UniformType::V3I32
                | UniformType::V4F32
                | UniformType::V4I32
                | UniformType::M4F32 => 16,
            };
            if count > 1 {
                base.max(16)
            } else {
                base
            }
        }
    }
}

/// Spacing between consecutive array elements under a layout convention.
fn stride(ty: UniformType, layout: BlockLayout) -> usize {
    match layout {
        BlockLayout::Packed => ty.element_size(),
        // std140 rounds array element strides up to a vec4 boundary; a mat4
        // is four vec4 columns, so its element stride is the full 64 bytes.
        BlockLayout::Std140 => round_up(ty.element_size(), 16),
    }
}

/// Compute the byte layout of a uniform block.
///
/// Walks the fields in declaration order with a running offset: round the
/// offset up to the field's alignment, place the field, advance by its size.
/// Std140 blocks are padded out to a 16-byte boundary at the end.
///
/// Deterministic: the same definition always yields the same layout.
pub fn calculate_layout(info: &UniformBufferInfo) -> CalculatedLayout {
    let layout = info.layout();
    let mut fields = Vec::with_capacity(info.inputs().len());
    let mut offset = 0usize;

    for input in info.inputs() {
        let align = alignment(input.ty, input.count, layout);
        let elem_stride = stride(input.ty, layout);
        let size = if input.count > 1 {
            elem_stride * input.count
        } else {
            input.ty.element_size()
        };

        offset = round_up(offset, align);
        fields.push((
            input.name.clone(),
            BlockField {
                ty: input.ty,
                count: input.count,
                offset,
                size,
                stride: elem_stride,
            },
        ));
        offset += size;
    }

    let size = match layout {
        BlockLayout::Packed => offset,
        BlockLayout::Std140 => round_up(offset, 16),
    };

    CalculatedLayout { fields, size }
}

// ===== UNIFORM BUFFER TRAIT =====

/// GPU-resident uniform buffer trait
///
/// Implemented by backend-specific buffer types (e.g., GlUniformBuffer).
/// Created by `Renderer::add_uniform_buffer` from a hand-specified
/// definition, or by `Renderer::add_uniform_buffer_from_shader` from a
/// compiled shader's introspected block layout.
pub trait UniformBuffer {
    /// Write one field's value at its computed offset.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is unknown or the value's type does not
    /// match the field's declared type.
    fn update_uniform(&self, name: &str, value: &UniformValue) -> Result<()>;

    /// Backend access to the concrete type
    fn as_any(&self) -> &dyn Any;
}

#[cfg(test)]
#[path = "uniform_buffer_tests.rs"]
mod tests;
