//! Unit tests for the uniform buffer layout calculator
//!
//! Checks offset/size/stride derivation for the packed and std140 layout
//! conventions, determinism, and alignment padding.

use crate::renderer::{
    calculate_layout, BlockLayout, UniformBufferInfo, UniformBufferInput, UniformType,
};

fn layout_of(layout: BlockLayout, inputs: Vec<UniformBufferInput>) -> super::CalculatedLayout {
    calculate_layout(&UniformBufferInfo::new(layout, inputs))
}

// ============================================================================
// Packed layout
// ============================================================================

#[test]
fn test_packed_scalars_offsets_are_running_sums() {
    let layout = layout_of(
        BlockLayout::Packed,
        vec![
            UniformBufferInput::new("a", UniformType::I32),
            UniformBufferInput::new("b", UniformType::F32),
            UniformBufferInput::new("c", UniformType::U32),
        ],
    );

    let offsets: Vec<usize> = layout.fields.iter().map(|(_, f)| f.offset).collect();
    assert_eq!(offsets, vec![0, 4, 8]);
    assert_eq!(layout.size, 12);
}

#[test]
fn test_packed_has_no_trailing_padding() {
    let layout = layout_of(
        BlockLayout::Packed,
        vec![UniformBufferInput::new("a", UniformType::F32)],
    );
    assert_eq!(layout.size, 4);
}

#[test]
fn test_packed_vectors_are_tight() {
    let layout = layout_of(
        BlockLayout::Packed,
        vec![
            UniformBufferInput::new("a", UniformType::F32),
            UniformBufferInput::new("b", UniformType::V3F32),
            UniformBufferInput::new("c", UniformType::V2F32),
        ],
    );

    let fields: Vec<_> = layout.fields.iter().map(|(_, f)| (f.offset, f.size)).collect();
    assert_eq!(fields, vec![(0, 4), (4, 12), (16, 8)]);
    assert_eq!(layout.size, 24);
}

// ============================================================================
// Std140 layout
// ============================================================================

#[test]
fn test_std140_vec3_after_scalar_gets_minimal_padding() {
    let layout = layout_of(
        BlockLayout::Std140,
        vec![
            UniformBufferInput::new("a", UniformType::F32),
            UniformBufferInput::new("b", UniformType::V3F32),
        ],
    );

    let (_, a) = &layout.fields[0];
    let (_, b) = &layout.fields[1];
    assert_eq!(a.offset, 0);
    // vec3 aligns to 16; the gap before it is the minimal padding.
    assert_eq!(b.offset, 16);
    assert_eq!(b.size, 12);
    assert_eq!(layout.size, 32);
}

#[test]
fn test_std140_vec2_aligns_to_eight() {
    let layout = layout_of(
        BlockLayout::Std140,
        vec![
            UniformBufferInput::new("a", UniformType::F32),
            UniformBufferInput::new("b", UniformType::V2F32),
        ],
    );

    assert_eq!(layout.fields[1].1.offset, 8);
    assert_eq!(layout.size, 16);
}

#[test]
fn test_std140_adjacent_scalars_stay_tight() {
    let layout = layout_of(
        BlockLayout::Std140,
        vec![
            UniformBufferInput::new("a", UniformType::F32),
            UniformBufferInput::new("b", UniformType::F32),
            UniformBufferInput::new("c", UniformType::I32),
        ],
    );

    let offsets: Vec<usize> = layout.fields.iter().map(|(_, f)| f.offset).collect();
    // Scalars align to their own size: no padding between them.
    assert_eq!(offsets, vec![0, 4, 8]);
    assert_eq!(layout.size, 16);
}

#[test]
fn test_std140_mat4_is_four_padded_columns() {
    let layout = layout_of(
        BlockLayout::Std140,
        vec![
            UniformBufferInput::new("a", UniformType::F32),
            UniformBufferInput::new("m", UniformType::M4F32),
        ],
    );

    let (_, m) = &layout.fields[1];
    assert_eq!(m.offset, 16);
    assert_eq!(m.size, 64);
    assert_eq!(m.stride, 64);
    assert_eq!(layout.size, 80);
}

#[test]
fn test_std140_scalar_array_elements_stride_to_vec4() {
    let layout = layout_of(
        BlockLayout::Std140,
        vec![UniformBufferInput::array("a", UniformType::F32, 3)],
    );

    let (_, a) = &layout.fields[0];
    assert_eq!(a.offset, 0);
    assert_eq!(a.stride, 16);
    assert_eq!(a.size, 48);
    assert_eq!(layout.size, 48);
}

#[test]
fn test_std140_block_is_padded_to_sixteen() {
    let layout = layout_of(
        BlockLayout::Std140,
        vec![UniformBufferInput::new("a", UniformType::F32)],
    );
    assert_eq!(layout.size, 16);
}

// ============================================================================
// General properties
// ============================================================================

#[test]
fn test_calculator_is_deterministic() {
    let inputs = || {
        vec![
            UniformBufferInput::new("a", UniformType::V3F32),
            UniformBufferInput::array("b", UniformType::F32, 4),
            UniformBufferInput::new("c", UniformType::M4F32),
            UniformBufferInput::new("d", UniformType::Bool),
        ]
    };

    let first = layout_of(BlockLayout::Std140, inputs());
    let second = layout_of(BlockLayout::Std140, inputs());

    assert_eq!(first.size, second.size);
    assert_eq!(first.fields.len(), second.fields.len());
    for ((n1, f1), (n2, f2)) in first.fields.iter().zip(second.fields.iter()) {
        assert_eq!(n1, n2);
        assert_eq!(f1, f2);
    }
}

#[test]
fn test_fields_never_overlap_and_offsets_are_non_decreasing() {
    let layout = layout_of(
        BlockLayout::Std140,
        vec![
            UniformBufferInput::new("a", UniformType::F32),
            UniformBufferInput::new("b", UniformType::V2F32),
            UniformBufferInput::new("c", UniformType::V4F32),
            UniformBufferInput::array("d", UniformType::V3F32, 2),
            UniformBufferInput::new("e", UniformType::F64),
        ],
    );

    let mut end = 0;
    for (_, field) in &layout.fields {
        assert!(field.offset >= end, "field overlaps its predecessor");
        end = field.offset + field.size;
    }
    assert!(layout.size >= end);
}

#[test]
fn test_info_size_matches_calculated_layout() {
    let info = UniformBufferInfo::new(
        BlockLayout::Std140,
        vec![
            UniformBufferInput::new("view", UniformType::M4F32),
            UniformBufferInput::new("time", UniformType::F32),
        ],
    );
    assert_eq!(info.size(), calculate_layout(&info).size);
}
