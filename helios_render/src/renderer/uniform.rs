//! Uniform values and the per-draw uniform input trait

use std::any::Any;
use std::rc::Rc;

use glam::{IVec2, IVec3, IVec4, Mat4, Vec2, Vec3, Vec4};

use crate::renderer::{ShaderProgram, Texture2d, UniformType};

/// A single shader-visible parameter value.
///
/// Scalar, vector, and matrix values map to plain uniforms or uniform-buffer
/// fields; texture values are bound to sampler units at upload time.
#[derive(Clone)]
pub enum UniformValue {
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
    Bool(bool),
    V2(Vec2),
    V3(Vec3),
    V4(Vec4),
    V2I(IVec2),
    V3I(IVec3),
    V4I(IVec4),
    M4(Mat4),
    Texture(Rc<dyn Texture2d>),
}

impl UniformValue {
    /// The block field type this value can occupy in a uniform buffer.
    ///
    /// Textures cannot live in uniform buffers and return `None`.
    pub fn uniform_type(&self) -> Option<UniformType> {
        match self {
            UniformValue::I32(_) => Some(UniformType::I32),
            UniformValue::U32(_) => Some(UniformType::U32),
            UniformValue::F32(_) => Some(UniformType::F32),
            UniformValue::F64(_) => Some(UniformType::F64),
            UniformValue::Bool(_) => Some(UniformType::Bool),
            UniformValue::V2(_) => Some(UniformType::V2F32),
            UniformValue::V3(_) => Some(UniformType::V3F32),
            UniformValue::V4(_) => Some(UniformType::V4F32),
            UniformValue::V2I(_) => Some(UniformType::V2I32),
            UniformValue::V3I(_) => Some(UniformType::V3I32),
            UniformValue::V4I(_) => Some(UniformType::V4I32),
            UniformValue::M4(_) => Some(UniformType::M4F32),
            UniformValue::Texture(_) => None,
        }
    }
}

impl std::fmt::Debug for UniformValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UniformValue::I32(v) => write!(f, "I32({})", v),
            UniformValue::U32(v) => write!(f, "U32({})", v),
            UniformValue::F32(v) => write!(f, "F32({})", v),
            UniformValue::F64(v) => write!(f, "F64({})", v),
            UniformValue::Bool(v) => write!(f, "Bool({})", v),
            UniformValue::V2(v) => write!(f, "V2({})", v),
            UniformValue::V3(v) => write!(f, "V3({})", v),
            UniformValue::V4(v) => write!(f, "V4({})", v),
            UniformValue::V2I(v) => write!(f, "V2I({})", v),
            UniformValue::V3I(v) => write!(f, "V3I({})", v),
            UniformValue::V4I(v) => write!(f, "V4I({})", v),
            UniformValue::M4(_) => write!(f, "M4(..)"),
            UniformValue::Texture(t) => {
                let info = t.info();
                write!(f, "Texture({}x{} {:?})", info.width, info.height, info.format)
            }
        }
    }
}

/// Per-draw uniform input set bound to one shader program.
///
/// Created via [`ShaderProgram::new_uniform_input`]. Values set here are
/// uploaded when the owning program is activated for a draw. Uses interior
/// mutability: all mutation happens on the single rendering thread.
pub trait UniformInput {
    /// Get the shader program this input set belongs to
    fn program(&self) -> Rc<dyn ShaderProgram>;

    /// Set or replace a uniform value by name.
    ///
    /// Unknown names are tolerated here and reported at upload time; the
    /// draw hot path adds no validation layer.
    fn update(&self, name: &str, value: UniformValue);

    /// Backend access to the concrete type
    fn as_any(&self) -> &dyn Any;
}
