//! RenderPass - ordered renderables partitioned into priority layers

use std::rc::Rc;

use crate::renderer::{Renderable, RenderTarget};

/// Default layer priority: renderables added without an explicit priority
/// land in the highest-priority band and are drawn first.
pub const LAYER_PRIORITY_MAX: i64 = i64::MAX;

/// A layer is a slice of the pass's renderables that share a priority.
///
/// Layers describe ordering only; per-draw state (blending, depth test)
/// stays on the individual renderables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer {
    /// Priority of the renderables in this slice. Higher priorities are
    /// drawn first.
    pub priority: i64,
    /// Number of consecutive renderables in this slice.
    pub length: usize,
}

/// A render pass is a series of draw calls, represented by renderables,
/// that output into one render target.
///
/// Invariants:
/// - `layers` is sorted by priority, descending.
/// - `renderables` is physically partitioned by `layers` with no gaps: the
///   sum of all layer lengths equals the renderable count, and a
///   renderable's position is determined by the priority band it was
///   inserted under.
/// - A layer with `length == 0` is legal (created by `add_layer` or left
///   behind by `clear_renderables`) and keeps its slot so later inserts at
///   the same priority land in the same band.
///
/// Construct through `Renderer::add_render_pass`; mutate freely between
/// frames. All operations are synchronous and single-threaded.
pub struct RenderPass {
    /// The renderables to draw, sorted by layer (highest priority first)
    renderables: Vec<Renderable>,

    /// Render target to write to
    target: Rc<dyn RenderTarget>,

    /// Layer slices over `renderables`, sorted by priority descending
    layers: Vec<Layer>,

    /// Cleared by every mutation; set again once the backend has re-sorted
    /// the pass for program-switch batching
    optimised: bool,
}

impl RenderPass {
    /// Create a new render pass.
    ///
    /// The initial renderables are placed in one layer at
    /// [`LAYER_PRIORITY_MAX`], matching `add_renderables` without an
    /// explicit priority.
    pub fn new(renderables: Vec<Renderable>, target: Rc<dyn RenderTarget>) -> Self {
        let mut pass = Self {
            renderables: Vec::new(),
            target,
            layers: Vec::new(),
            optimised: false,
        };
        pass.add_renderables(renderables, LAYER_PRIORITY_MAX);
        pass
    }

    /// Get the renderables of the render pass, in draw order
    pub fn renderables(&self) -> &[Renderable] {
        &self.renderables
    }

    /// Get the layers of the render pass, sorted by priority descending
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Get the render target of the render pass
    pub fn target(&self) -> &Rc<dyn RenderTarget> {
        &self.target
    }

    /// Set the render target to write to.
    ///
    /// No validation against previously added renderables; compatibility is
    /// the caller's responsibility.
    pub fn set_target(&mut self, target: Rc<dyn RenderTarget>) {
        self.target = target;
        self.optimised = false;
    }

    /// Replace the current renderables with the given list.
    ///
    /// All existing layer boundaries are invalidated: the new list forms a
    /// single layer at [`LAYER_PRIORITY_MAX`]. Callers wanting finer
    /// structure re-add layers afterwards.
    pub fn set_renderables(&mut self, renderables: Vec<Renderable>) {
        self.renderables.clear();
        self.layers.clear();
        self.add_renderables(renderables, LAYER_PRIORITY_MAX);
        self.optimised = false;
    }

    /// Append renderables to the layer with the given priority.
    ///
    /// The renderables are inserted immediately after the layer's existing
    /// span. If no layer exists at `priority`, one is created at its sorted
    /// position.
    pub fn add_renderables(&mut self, renderables: Vec<Renderable>, priority: i64) {
        if renderables.is_empty() {
            return;
        }

        let index = self.find_or_create_layer(priority);

        // Physical insert position: end of this layer's current span.
        let insert_at: usize = self.layers[..=index].iter().map(|l| l.length).sum();

        let count = renderables.len();
        self.renderables.splice(insert_at..insert_at, renderables);
        self.layers[index].length += count;
        self.optimised = false;
    }

    /// Append a single renderable to the layer with the given priority
    pub fn add_renderable(&mut self, renderable: Renderable, priority: i64) {
        self.add_renderables(vec![renderable], priority);
    }

    /// Add a new, empty layer at the given priority.
    ///
    /// Does nothing if a layer at that priority already exists. The empty
    /// layer keeps its slot in the priority order so later
    /// `add_renderables` calls at this priority land in this band.
    pub fn add_layer(&mut self, priority: i64) {
        if self.layers.iter().any(|l| l.priority == priority) {
            return;
        }
        let index = self
            .layers
            .iter()
            .position(|l| l.priority < priority)
            .unwrap_or(self.layers.len());
        self.layers.insert(index, Layer { priority, length: 0 });
        self.optimised = false;
    }

    /// Clear the list of renderables.
    ///
    /// Layer records persist with their lengths reset to 0, so future adds
    /// at the same priorities land in the same bands.
    pub fn clear_renderables(&mut self) {
        self.renderables.clear();
        for layer in &mut self.layers {
            layer.length = 0;
        }
        self.optimised = false;
    }

    /// Whether the backend's sort cache is still valid for this pass
    pub fn is_optimised(&self) -> bool {
        self.optimised
    }

    /// Stable-sort each layer's slice of renderables by the given key,
    /// without crossing layer boundaries.
    ///
    /// This is the backend's draw-order optimisation: grouping draws that
    /// share a shader program minimizes program switches, while stability
    /// and the per-layer scope preserve insertion order inside a priority
    /// band (transparent objects are order-sensitive). Guarded by the
    /// pass's dirty flag, so it runs at most once per mutation batch.
    pub fn reorder_layers_by<F>(&mut self, mut key: F)
    where
        F: FnMut(&Renderable) -> u64,
    {
        if self.optimised {
            return;
        }
        let mut start = 0;
        for layer in &self.layers {
            let end = start + layer.length;
            self.renderables[start..end].sort_by_key(&mut key);
            start = end;
        }
        self.optimised = true;
    }

    /// Locate the layer at `priority`, creating it at its sorted position
    /// if absent. Returns the layer's index.
    fn find_or_create_layer(&mut self, priority: i64) -> usize {
        if let Some(index) = self.layers.iter().position(|l| l.priority == priority) {
            return index;
        }
        let index = self
            .layers
            .iter()
            .position(|l| l.priority < priority)
            .unwrap_or(self.layers.len());
        self.layers.insert(index, Layer { priority, length: 0 });
        index
    }
}

#[cfg(test)]
#[path = "render_pass_tests.rs"]
mod tests;
