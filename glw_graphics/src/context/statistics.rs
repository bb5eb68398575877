/// Frame statistics: an optional sink receiving resource creations,
/// commands and draws as the graphics manager issues them.
///
/// Nothing is recorded unless a sink is installed with
/// `GraphicsManager::set_statistics_sink`. Pass positions are creation
/// order positions; `None` stands for the swapchain or an idle context.

use crate::resource::resource_manager::ResourceKind;

pub trait FrameStatisticsSink {
    fn on_resource_created(&mut self, kind: ResourceKind);

    fn on_render_pass_created(&mut self);

    /// A command was issued while `pass` was current
    fn on_command(&mut self, pass: Option<usize>, name: &'static str, value: u64);

    fn on_draw(&mut self, pass: Option<usize>, vertex_count: u32);

    /// Called by `acquire` before the frame starts
    fn on_frame_reset(&mut self);
}

// ===== DEBUG TRACKER =====

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedCommand {
    pub name: &'static str,
    pub value: u64,
}

/// Commands and draws recorded for one render target during a frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassTrace {
    pub commands: Vec<TrackedCommand>,
    /// Vertex count of every draw
    pub draws: Vec<u32>,
}

impl PassTrace {
    fn clear(&mut self) {
        self.commands.clear();
        self.draws.clear();
    }
}

/// Totals of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawMetadata {
    pub draw_calls: u64,
    pub vertices: u64,
}

/// Sink keeping per-pass traces of the current frame and lifetime resource counts
#[derive(Debug, Clone, Default)]
pub struct DebugTracker {
    pub mesh_count: u32,
    pub material_count: u32,
    pub texture_count: u32,
    pub buffer_count: u32,
    render_passes: Vec<PassTrace>,
    swapchain: PassTrace,
}

impl DebugTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trace of the pass at `position`, or of the swapchain for `None`
    pub fn trace(&self, pass: Option<usize>) -> Option<&PassTrace> {
        match pass {
            Some(position) => self.render_passes.get(position),
            None => Some(&self.swapchain),
        }
    }

    pub fn render_pass_count(&self) -> usize {
        self.render_passes.len()
    }

    fn trace_mut(&mut self, pass: Option<usize>) -> &mut PassTrace {
        match pass {
            Some(position) => {
                if position >= self.render_passes.len() {
                    self.render_passes.resize_with(position + 1, PassTrace::default);
                }
                &mut self.render_passes[position]
            }
            None => &mut self.swapchain,
        }
    }

    fn traces(&self) -> impl Iterator<Item = &PassTrace> {
        self.render_passes.iter().chain(std::iter::once(&self.swapchain))
    }

    pub fn total_draw_calls(&self) -> u64 {
        self.traces().map(|trace| trace.draws.len() as u64).sum()
    }

    pub fn total_draw_vertices(&self) -> u64 {
        self.traces()
            .flat_map(|trace| trace.draws.iter())
            .map(|&count| u64::from(count))
            .sum()
    }

    pub fn total_draw_metadata(&self) -> DrawMetadata {
        DrawMetadata {
            draw_calls: self.total_draw_calls(),
            vertices: self.total_draw_vertices(),
        }
    }
}

impl FrameStatisticsSink for DebugTracker {
    fn on_resource_created(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Mesh => self.mesh_count += 1,
            ResourceKind::Material => self.material_count += 1,
            ResourceKind::Texture | ResourceKind::Cubemap => self.texture_count += 1,
            ResourceKind::Buffer => self.buffer_count += 1,
        }
    }

    fn on_render_pass_created(&mut self) {
        self.render_passes.push(PassTrace::default());
    }

    fn on_command(&mut self, pass: Option<usize>, name: &'static str, value: u64) {
        self.trace_mut(pass).commands.push(TrackedCommand { name, value });
    }

    fn on_draw(&mut self, pass: Option<usize>, vertex_count: u32) {
        self.trace_mut(pass).draws.push(vertex_count);
    }

    fn on_frame_reset(&mut self) {
        self.render_passes.iter_mut().for_each(PassTrace::clear);
        self.swapchain.clear();
    }
}

#[cfg(test)]
#[path = "statistics_tests.rs"]
mod tests;
