/// Render context: the per-frame cursor gating which commands may run.
///
/// The context is reset by `GraphicsManager::acquire`. A command that fails
/// to bind its object clears the matching slot, so a later draw is refused
/// instead of running against stale state.

use crate::device::VertexArrayId;
use crate::render_pass::render_pass_manager::RenderPassKey;
use crate::resource::resource_manager::{MaterialKey, MeshKey};

/// What the context currently renders into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTargetBinding {
    Pass(RenderPassKey),
    /// Default framebuffer
    Swapchain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderContextState {
    /// Nothing bound, every command except pass selection is ignored
    Idle,
    /// A render target is bound but material or mesh is missing
    PassBound,
    /// Target, material and mesh are bound
    ReadyToDraw,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    render_target: Option<RenderTargetBinding>,
    material: Option<MaterialKey>,
    mesh: Option<MeshKey>,
    use_index: bool,
    /// Vertex array the bound mesh had when it was bound
    vertex_array: Option<VertexArrayId>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything bound so far
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True once a render pass or the swapchain is bound
    pub fn is_in_use(&self) -> bool {
        self.render_target.is_some()
    }

    pub fn can_draw(&self) -> bool {
        self.is_in_use() && self.material.is_some() && self.mesh.is_some()
    }

    pub fn state(&self) -> RenderContextState {
        if self.can_draw() {
            RenderContextState::ReadyToDraw
        } else if self.is_in_use() {
            RenderContextState::PassBound
        } else {
            RenderContextState::Idle
        }
    }

    pub fn render_target(&self) -> Option<RenderTargetBinding> { self.render_target }

    pub fn render_pass(&self) -> Option<RenderPassKey> {
        match self.render_target {
            Some(RenderTargetBinding::Pass(key)) => Some(key),
            _ => None,
        }
    }

    pub fn material(&self) -> Option<MaterialKey> { self.material }

    pub fn mesh(&self) -> Option<MeshKey> { self.mesh }

    /// Whether the bound mesh draws through its index buffer
    pub fn use_index(&self) -> bool { self.use_index }

    pub(crate) fn set_render_target(&mut self, target: Option<RenderTargetBinding>) {
        self.render_target = target;
    }

    pub(crate) fn set_material(&mut self, material: Option<MaterialKey>) {
        self.material = material;
    }

    /// Vertex array recorded by the last successful mesh bind
    pub fn vertex_array(&self) -> Option<VertexArrayId> { self.vertex_array }

    pub(crate) fn set_mesh(&mut self, mesh: Option<MeshKey>, use_index: bool) {
        self.mesh = mesh;
        self.use_index = mesh.is_some() && use_index;
        if mesh.is_none() {
            self.vertex_array = None;
        }
    }

    pub(crate) fn set_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        self.vertex_array = vertex_array.filter(|_| self.mesh.is_some());
    }
}

#[cfg(test)]
#[path = "render_context_tests.rs"]
mod tests;
