//! Shader source descriptions and the shader program trait

use std::any::Any;
use std::rc::Rc;

use crate::renderer::UniformInput;

/// Pipeline stage a shader source blob belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

/// One shader source blob, tagged by pipeline stage.
///
/// Produced by the shader loader; consumed by `Renderer::add_shader`.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    /// Pipeline stage this source compiles for
    pub stage: ShaderStage,
    /// Shader source text
    pub source: String,
}

impl ShaderSource {
    /// Create a shader source blob
    pub fn new(stage: ShaderStage, source: impl Into<String>) -> Self {
        Self { stage, source: source.into() }
    }
}

/// Compiled and linked shader program trait
///
/// Implemented by backend-specific program types (e.g., GlShaderProgram).
/// Compilation or link failure is reported by `Renderer::add_shader`;
/// a successfully returned program is usable.
pub trait ShaderProgram {
    /// Returns true if the program declares a uniform with this name
    fn has_uniform(&self, name: &str) -> bool;

    /// Create a fresh uniform-input set bound to this program.
    ///
    /// The returned input starts empty; fill it with
    /// [`UniformInput::update`] before drawing.
    fn new_uniform_input(self: Rc<Self>) -> Rc<dyn UniformInput>;

    /// Backend access to the concrete type
    fn as_any(&self) -> &dyn Any;
}
