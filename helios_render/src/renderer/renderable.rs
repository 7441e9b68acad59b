//! Renderable - one drawable unit

use std::rc::Rc;

use crate::renderer::{Geometry, UniformInput};

/// A single drawable unit: geometry plus uniform inputs plus per-draw state
/// flags. Immutable value once constructed; passes store renderables by
/// value, not by persistent id.
///
/// Renderables at the same layer priority may still need different
/// blend/depth behavior, so the flags are carried per renderable; layers
/// only express ordering, not state.
#[derive(Clone)]
pub struct Renderable {
    /// Geometry to draw. `None` is legal: the renderable then only applies
    /// its state flags and uniform upload (a pure state-setting step).
    pub geometry: Option<Rc<dyn Geometry>>,

    /// Uniform inputs, which also identify the shader program to bind
    pub uniform: Rc<dyn UniformInput>,

    /// Enable alpha blending for this draw
    pub alpha_blending: bool,

    /// Enable depth testing for this draw
    pub depth_test: bool,
}

impl Renderable {
    /// Create a renderable that draws `geometry`
    pub fn new(
        geometry: Rc<dyn Geometry>,
        uniform: Rc<dyn UniformInput>,
        alpha_blending: bool,
        depth_test: bool,
    ) -> Self {
        Self {
            geometry: Some(geometry),
            uniform,
            alpha_blending,
            depth_test,
        }
    }

    /// Create a geometry-less renderable: applies state and uniforms but
    /// issues no draw call
    pub fn without_geometry(
        uniform: Rc<dyn UniformInput>,
        alpha_blending: bool,
        depth_test: bool,
    ) -> Self {
        Self {
            geometry: None,
            uniform,
            alpha_blending,
            depth_test,
        }
    }
}
