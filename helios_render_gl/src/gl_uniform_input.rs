//! GlUniformInput - GL implementation of the UniformInput trait

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use helios_render::{ShaderProgram, UniformInput, UniformValue};

use crate::gl_shader_program::GlShaderProgram;

/// Set or replace a pending value by name, preserving first-set order.
///
/// Upload walks this list front to back, so texture-unit assignment is
/// deterministic across frames: a re-set value keeps its original slot.
pub(crate) fn set_pending(values: &mut Vec<(String, UniformValue)>, name: &str, value: UniformValue) {
    if let Some((_, slot)) = values.iter_mut().find(|(n, _)| n == name) {
        *slot = value;
    } else {
        values.push((name.to_string(), value));
    }
}

/// Per-draw uniform value set bound to one GL program.
///
/// Values are stored CPU-side and uploaded when the owning program is
/// activated for a draw; `update` itself issues no GL calls. Unknown
/// names are kept and reported at upload time.
pub struct GlUniformInput {
    pub(crate) program: Rc<GlShaderProgram>,
    pub(crate) values: RefCell<Vec<(String, UniformValue)>>,
}

impl UniformInput for GlUniformInput {
    fn program(&self) -> Rc<dyn ShaderProgram> {
        self.program.clone()
    }

    fn update(&self, name: &str, value: UniformValue) {
        set_pending(&mut self.values.borrow_mut(), name, value);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "gl_uniform_input_tests.rs"]
mod tests;
