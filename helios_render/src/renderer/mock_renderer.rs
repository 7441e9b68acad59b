//! Mock renderer for unit tests (no GPU required)
//!
//! A spy backend implementing the full `Renderer` contract. It records every
//! device operation the frame executor issues (target bind, clear, state
//! toggles, program binds, draws) so draw-submission semantics can be
//! asserted without a graphics context.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use crate::error::{Error, Result};
use crate::renderer::{
    calculate_layout, CalculatedLayout, Geometry, MeshData, Renderable, RenderPass, RenderTarget,
    Renderer, ShaderProgram, ShaderSource, Texture2d, Texture2dData, Texture2dInfo, TextureFormat,
    UniformBuffer, UniformBufferInfo, UniformInput, UniformValue,
};

// ============================================================================
// Recorded device operations
// ============================================================================

/// One operation issued against the mock device during `render`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// The pass's target was bound as the write destination
    BindTarget(String),
    /// Color and depth buffers were cleared
    Clear,
    /// Blending was set to the given state
    SetBlend(bool),
    /// Depth testing was set to the given state
    SetDepthTest(bool),
    /// The given program was activated and its uniforms uploaded (one step)
    BindProgramAndUpload(u64),
    /// A draw call was issued with the given program bound
    Draw(u64),
}

// ============================================================================
// Mock resources
// ============================================================================

pub struct MockTexture2d {
    pub info: Texture2dInfo,
}

impl Texture2d for MockTexture2d {
    fn info(&self) -> &Texture2dInfo {
        &self.info
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct MockShaderProgram {
    /// Identity used as the optimise sort key, mirroring a GL program handle
    pub id: u64,
}

impl ShaderProgram for MockShaderProgram {
    fn has_uniform(&self, _name: &str) -> bool {
        true
    }

    fn new_uniform_input(self: Rc<Self>) -> Rc<dyn UniformInput> {
        Rc::new(MockUniformInput {
            program: self,
            values: RefCell::new(FxHashMap::default()),
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct MockUniformInput {
    pub program: Rc<MockShaderProgram>,
    pub values: RefCell<FxHashMap<String, UniformValue>>,
}

impl UniformInput for MockUniformInput {
    fn program(&self) -> Rc<dyn ShaderProgram> {
        self.program.clone()
    }

    fn update(&self, name: &str, value: UniformValue) {
        self.values.borrow_mut().insert(name.to_string(), value);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct MockGeometry;

impl Geometry for MockGeometry {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct MockRenderTarget {
    /// "display" or "texture_target", used in recorded events
    pub name: String,
    pub size: Cell<(u32, u32)>,
}

impl RenderTarget for MockRenderTarget {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct MockUniformBuffer {
    pub layout: CalculatedLayout,
}

impl UniformBuffer for MockUniformBuffer {
    fn update_uniform(&self, name: &str, value: &UniformValue) -> Result<()> {
        let field = self
            .layout
            .fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, f)| f)
            .ok_or_else(|| {
                Error::InvalidResource(format!("unknown uniform buffer field '{}'", name))
            })?;
        match value.uniform_type() {
            Some(ty) if ty == field.ty => Ok(()),
            _ => Err(Error::InvalidResource(format!(
                "type mismatch for uniform buffer field '{}'",
                name
            ))),
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ============================================================================
// Mock renderer
// ============================================================================

/// Spy renderer implementing the full `Renderer` contract without a GPU
pub struct MockRenderer {
    /// Every device operation issued by `render`, in order
    pub events: RefCell<Vec<RenderEvent>>,
    display: Rc<MockRenderTarget>,
    next_program_id: u64,
    /// When true, `render` groups draws by program within each layer
    pub optimise_enabled: bool,
    /// Errors surfaced by the next `check_error` call
    injected_errors: VecDeque<String>,
}

impl MockRenderer {
    /// Create a mock renderer with the given display size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            events: RefCell::new(Vec::new()),
            display: Rc::new(MockRenderTarget {
                name: "display".to_string(),
                size: Cell::new((width, height)),
            }),
            next_program_id: 1,
            optimise_enabled: false,
            injected_errors: VecDeque::new(),
        }
    }

    /// Get a copy of the recorded device operations
    pub fn events(&self) -> Vec<RenderEvent> {
        self.events.borrow().clone()
    }

    /// Forget all recorded device operations
    pub fn clear_events(&self) {
        self.events.borrow_mut().clear();
    }

    /// Queue an error for the next `check_error` call, simulating an
    /// accumulated backend error state
    pub fn inject_api_error(&mut self, msg: impl Into<String>) {
        self.injected_errors.push_back(msg.into());
    }

    fn program_id(uniform: &Rc<dyn UniformInput>) -> Result<u64> {
        let program = uniform.program();
        let mock = program
            .as_any()
            .downcast_ref::<MockShaderProgram>()
            .ok_or_else(|| {
                Error::InvalidResource("shader program from a different backend".to_string())
            })?;
        Ok(mock.id)
    }
}

impl Renderer for MockRenderer {
    fn add_texture(&mut self, data: &Texture2dData) -> Result<Rc<dyn Texture2d>> {
        Ok(Rc::new(MockTexture2d { info: *data.info() }))
    }

    fn add_texture_with_info(&mut self, info: &Texture2dInfo) -> Result<Rc<dyn Texture2d>> {
        Ok(Rc::new(MockTexture2d { info: *info }))
    }

    fn add_shader(&mut self, sources: &[ShaderSource]) -> Result<Rc<dyn ShaderProgram>> {
        if sources.is_empty() {
            return Err(Error::InvalidResource(
                "shader program needs at least one source".to_string(),
            ));
        }
        let id = self.next_program_id;
        self.next_program_id += 1;
        Ok(Rc::new(MockShaderProgram { id }))
    }

    fn add_mesh_geometry(&mut self, _mesh: &MeshData) -> Result<Rc<dyn Geometry>> {
        Ok(Rc::new(MockGeometry))
    }

    fn add_bufferless_quad(&mut self) -> Result<Rc<dyn Geometry>> {
        Ok(Rc::new(MockGeometry))
    }

    fn add_render_pass(
        &mut self,
        renderables: Vec<Renderable>,
        target: Rc<dyn RenderTarget>,
    ) -> Rc<RefCell<RenderPass>> {
        Rc::new(RefCell::new(RenderPass::new(renderables, target)))
    }

    fn create_texture_target(
        &mut self,
        textures: &[Rc<dyn Texture2d>],
    ) -> Result<Rc<dyn RenderTarget>> {
        if textures.is_empty() {
            return Err(Error::InvalidResource(
                "texture target needs at least one texture".to_string(),
            ));
        }
        let info = textures[0].info();
        Ok(Rc::new(MockRenderTarget {
            name: "texture_target".to_string(),
            size: Cell::new((info.width, info.height)),
        }))
    }

    fn get_display_target(&mut self) -> Rc<dyn RenderTarget> {
        self.display.clone()
    }

    fn add_uniform_buffer(&mut self, info: &UniformBufferInfo) -> Result<Rc<dyn UniformBuffer>> {
        Ok(Rc::new(MockUniformBuffer {
            layout: calculate_layout(info),
        }))
    }

    fn add_uniform_buffer_from_shader(
        &mut self,
        program: &Rc<dyn ShaderProgram>,
        block_name: &str,
    ) -> Result<Rc<dyn UniformBuffer>> {
        program
            .as_any()
            .downcast_ref::<MockShaderProgram>()
            .ok_or_else(|| {
                Error::InvalidResource("shader program from a different backend".to_string())
            })?;
        let _ = block_name;
        Ok(Rc::new(MockUniformBuffer {
            layout: CalculatedLayout {
                fields: Vec::new(),
                size: 0,
            },
        }))
    }

    fn display_into_data(&mut self) -> Result<Texture2dData> {
        let (width, height) = self.display.size.get();
        let info = Texture2dInfo::new(width, height, TextureFormat::R8G8B8A8_UNORM);
        Texture2dData::new(info, vec![0u8; info.data_size()])
    }

    fn resize_display_target(&mut self, width: u32, height: u32) {
        self.display.size.set((width, height));
    }

    fn check_error(&mut self) -> Result<()> {
        if self.injected_errors.is_empty() {
            return Ok(());
        }
        let msgs: Vec<String> = self.injected_errors.drain(..).collect();
        Err(Error::BackendError(msgs.join(", ")))
    }

    fn render(&mut self, pass: &Rc<RefCell<RenderPass>>) -> Result<()> {
        let mut pass = pass.borrow_mut();

        let target_name = pass
            .target()
            .as_any()
            .downcast_ref::<MockRenderTarget>()
            .ok_or_else(|| {
                Error::InvalidResource("render target from a different backend".to_string())
            })?
            .name
            .clone();

        self.events
            .borrow_mut()
            .push(RenderEvent::BindTarget(target_name));
        self.events.borrow_mut().push(RenderEvent::Clear);

        if self.optimise_enabled {
            pass.reorder_layers_by(|r| {
                Self::program_id(&r.uniform).unwrap_or(0)
            });
        }

        for obj in pass.renderables() {
            self.events
                .borrow_mut()
                .push(RenderEvent::SetBlend(obj.alpha_blending));
            self.events
                .borrow_mut()
                .push(RenderEvent::SetDepthTest(obj.depth_test));

            let id = Self::program_id(&obj.uniform)?;
            self.events
                .borrow_mut()
                .push(RenderEvent::BindProgramAndUpload(id));

            if obj.geometry.is_some() {
                self.events.borrow_mut().push(RenderEvent::Draw(id));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_renderer_tests.rs"]
mod tests;
