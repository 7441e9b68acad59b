//! GlContext - shared GL state for all backend objects
//!
//! Owns the raw `glow::Context` and a cache of the device state the frame
//! executor toggles per draw (blend, depth test, bound program/VAO).
//! Every state setter is idempotent: setting a value that is already
//! current issues no GL call.

use std::cell::{Cell, RefCell};

use glow::HasContext;

use helios_render::{render_bail, Result};

use crate::lookup;

/// Cached device state, mirroring what the driver currently has set
#[derive(Default)]
struct DeviceState {
    blend: Option<bool>,
    depth_test: Option<bool>,
    program: Option<glow::NativeProgram>,
    vertex_array: Option<glow::NativeVertexArray>,
}

/// Shared GL context for all backend resources.
///
/// Shared (via `Rc`) by textures, programs, geometries, targets, and
/// buffers, so every object can issue GL calls and participate in the
/// device-state cache. All access happens on the single rendering thread
/// that owns the context.
pub(crate) struct GlContext {
    gl: glow::Context,
    state: RefCell<DeviceState>,
    /// Next free uniform buffer binding point
    next_uniform_binding: Cell<u32>,
    /// Device limit on uniform buffer binding points
    max_uniform_bindings: u32,
}

impl GlContext {
    pub(crate) fn new(gl: glow::Context) -> Self {
        let max_uniform_bindings =
            unsafe { gl.get_parameter_i32(glow::MAX_UNIFORM_BUFFER_BINDINGS) } as u32;
        Self {
            gl,
            state: RefCell::new(DeviceState::default()),
            next_uniform_binding: Cell::new(0),
            max_uniform_bindings,
        }
    }

    /// Raw GL access for resource creation and draws
    pub(crate) fn raw(&self) -> &glow::Context {
        &self.gl
    }

    // ===== DEVICE STATE CACHE =====

    pub(crate) fn set_blend(&self, enable: bool) {
        let mut state = self.state.borrow_mut();
        if state.blend == Some(enable) {
            return;
        }
        unsafe {
            if enable {
                self.gl.enable(glow::BLEND);
            } else {
                self.gl.disable(glow::BLEND);
            }
        }
        state.blend = Some(enable);
    }

    pub(crate) fn set_depth_test(&self, enable: bool) {
        let mut state = self.state.borrow_mut();
        if state.depth_test == Some(enable) {
            return;
        }
        unsafe {
            if enable {
                self.gl.enable(glow::DEPTH_TEST);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
            }
        }
        state.depth_test = Some(enable);
    }

    pub(crate) fn use_program(&self, program: glow::NativeProgram) {
        let mut state = self.state.borrow_mut();
        if state.program == Some(program) {
            return;
        }
        unsafe { self.gl.use_program(Some(program)) };
        state.program = Some(program);
    }

    pub(crate) fn bind_vertex_array(&self, vao: glow::NativeVertexArray) {
        let mut state = self.state.borrow_mut();
        if state.vertex_array == Some(vao) {
            return;
        }
        unsafe { self.gl.bind_vertex_array(Some(vao)) };
        state.vertex_array = Some(vao);
    }

    /// Drop a deleted program from the cache so its id can be reused
    pub(crate) fn forget_program(&self, program: glow::NativeProgram) {
        let mut state = self.state.borrow_mut();
        if state.program == Some(program) {
            state.program = None;
        }
    }

    /// Drop a deleted VAO from the cache so its id can be reused
    pub(crate) fn forget_vertex_array(&self, vao: glow::NativeVertexArray) {
        let mut state = self.state.borrow_mut();
        if state.vertex_array == Some(vao) {
            state.vertex_array = None;
        }
    }

    // ===== UNIFORM BUFFER BINDING POINTS =====

    /// Reserve the next free uniform buffer binding point.
    ///
    /// Binding points are never recycled; buffers keep theirs for life.
    pub(crate) fn allocate_uniform_binding(&self) -> Result<u32> {
        let binding = self.next_uniform_binding.get();
        if binding >= self.max_uniform_bindings {
            render_bail!(
                "helios::gl",
                "out of uniform buffer binding points (device limit {})",
                self.max_uniform_bindings
            );
        }
        self.next_uniform_binding.set(binding + 1);
        Ok(binding)
    }

    // ===== DIAGNOSTICS =====

    /// Drain the GL error queue.
    ///
    /// The draw path never checks per call; this is the explicit,
    /// opt-in diagnostic for callers that want to localize a fault.
    pub(crate) fn check_error(&self) -> Result<()> {
        let mut errors = Vec::new();
        loop {
            let code = unsafe { self.gl.get_error() };
            if code == glow::NO_ERROR {
                break;
            }
            errors.push(format!("{} ({:#x})", lookup::error_name(code), code));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            render_bail!("helios::gl", "GL error state: {}", errors.join(", "));
        }
    }
}
