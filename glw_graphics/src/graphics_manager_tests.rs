/// Unit tests for graphics_manager.rs
///
/// Frame flow against the mock device: the render context gate, creation
/// wrappers, replace semantics and the statistics sink.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{UVec2, Vec4};

use crate::context::graphics_config::GraphicsConfig;
use crate::context::render_context::{RenderContext, RenderContextState, RenderTargetBinding};
use crate::context::statistics::{DebugTracker, FrameStatisticsSink};
use crate::device::mock_graphics_device::{MockGraphicsDevice, MockObjectKind};
use crate::device::*;
use crate::graphics_manager::GraphicsManager;
use crate::render_pass::render_attachment::RenderTargetDesc;
use crate::render_pass::render_pass::RenderPassDesc;
use crate::render_pass::render_pass_manager::BlitDesc;
use crate::render_pass::target_manager::{DepthTargetDesc, RenderPassTargetDesc, StencilTargetDesc};
use crate::resource::material::MaterialDesc;
use crate::resource::mesh::MeshDesc;
use crate::resource::resource_manager::ResourceKind;
use crate::resource::texture::Texture2DDesc;

// ============================================================================
// Helpers
// ============================================================================

fn manager() -> GraphicsManager<MockGraphicsDevice> {
    GraphicsManager::new(MockGraphicsDevice::new(), &GraphicsConfig::default()).unwrap()
}

fn triangle(indices: Vec<u32>) -> MeshDesc {
    let positions: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    MeshDesc::from_vertices(&positions, indices, vec![VertexAttribute::float(0, 3, 12, 0)])
}

fn flat_material() -> MaterialDesc {
    MaterialDesc::new("void main() {}", "void main() {}")
}

/// Sink sharing its tracker with the test
struct SharedTracker(Rc<RefCell<DebugTracker>>);

impl FrameStatisticsSink for SharedTracker {
    fn on_resource_created(&mut self, kind: ResourceKind) {
        self.0.borrow_mut().on_resource_created(kind);
    }

    fn on_render_pass_created(&mut self) {
        self.0.borrow_mut().on_render_pass_created();
    }

    fn on_command(&mut self, pass: Option<usize>, name: &'static str, value: u64) {
        self.0.borrow_mut().on_command(pass, name, value);
    }

    fn on_draw(&mut self, pass: Option<usize>, vertex_count: u32) {
        self.0.borrow_mut().on_draw(pass, vertex_count);
    }

    fn on_frame_reset(&mut self) {
        self.0.borrow_mut().on_frame_reset();
    }
}

// ============================================================================
// Tests: creation and configuration
// ============================================================================

#[test]
fn test_new_applies_configuration() {
    let mut config = GraphicsConfig::default();
    config.debug.enabled = true;
    config.extras.srgb = true;
    config.backend.swap_interval = 0;
    let graphics = GraphicsManager::new(MockGraphicsDevice::new(), &config).unwrap();

    let device = graphics.device();
    assert_eq!(device.debug_output, Some(true));
    assert_eq!(device.capability(Capability::CullFace), Some(true));
    assert_eq!(device.capability(Capability::Multisample), Some(true));
    assert_eq!(device.capability(Capability::FramebufferSrgb), Some(true));
    assert_eq!(device.swap_interval, Some(0));
    assert!(device.has_command("set_face_culling"));
    assert_eq!(graphics.surface_dimensions(), UVec2::new(1280, 720));
}

#[test]
fn test_new_without_culling_or_debug() {
    let mut config = GraphicsConfig::default();
    config.debug.enabled = false;
    config.culling.enabled = false;
    let graphics = GraphicsManager::new(MockGraphicsDevice::new(), &config).unwrap();
    assert_eq!(graphics.device().debug_output, None);
    assert_eq!(graphics.device().capability(Capability::CullFace), Some(false));
    assert!(!graphics.device().has_command("set_face_culling"));
}

#[test]
fn test_new_rejects_empty_surface() {
    let result = GraphicsManager::new(MockGraphicsDevice::with_surface_size(0, 600), &GraphicsConfig::default());
    assert!(result.is_err());
}

// ============================================================================
// Tests: acquire
// ============================================================================

#[test]
fn test_acquire_resets_context_and_binds_swapchain_without_passes() {
    let mut graphics = manager();
    let mut context = RenderContext::new();
    graphics.cmd_use_swapchain(&mut context);
    assert!(context.is_in_use());

    assert!(graphics.acquire(&mut context));
    assert_eq!(context.state(), RenderContextState::Idle);
    assert_eq!(graphics.device().clears.last(), Some(&ClearFlags::COLOR));
    assert_eq!(graphics.device().viewports.last(), Some(&Rect::from_size(1280, 720)));
}

#[test]
fn test_acquire_skips_swapchain_when_passes_exist() {
    let mut graphics = manager();
    graphics.create_render_pass(&RenderPassDesc::default()).unwrap();
    graphics.device_mut().clear_records();

    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    assert!(graphics.device().clears.is_empty());
}

#[test]
fn test_acquire_reports_draw_state() {
    let mut graphics = manager();
    let mut context = RenderContext::new();
    graphics.set_draw_state(false);
    assert!(!graphics.draw_state());
    assert!(!graphics.acquire(&mut context));
}

#[test]
fn test_resize_is_deferred_to_acquire() {
    let mut graphics = manager();
    let mut context = RenderContext::new();
    graphics.device_mut().set_surface_size(800, 600);
    graphics.mark_resize();
    assert_eq!(graphics.surface_dimensions(), UVec2::new(1280, 720));

    graphics.acquire(&mut context);
    assert_eq!(graphics.surface_dimensions(), UVec2::new(800, 600));
    assert_eq!(graphics.device().viewports.last(), Some(&Rect::from_size(800, 600)));
}

// ============================================================================
// Tests: render context gate
// ============================================================================

#[test]
fn test_commands_are_ignored_while_idle() {
    let mut graphics = manager();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(Vec::new())).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.device_mut().clear_records();

    assert!(graphics.cmd_use_material(&mut context, material).is_none());
    assert!(graphics.cmd_use_mesh(&mut context, mesh).is_none());
    graphics.cmd_toggle_depth_test(&context, true);
    graphics.cmd_toggle_stencil_write(&context, true);
    graphics.cmd_set_viewport(&context, Rect::from_size(10, 10));
    graphics.cmd_clear_color(&context, 0, Vec4::ONE);
    assert!(!graphics.cmd_draw(&context, 3));

    assert_eq!(context.state(), RenderContextState::Idle);
    assert!(graphics.device().commands.is_empty());
    assert!(graphics.device().draws.is_empty());
}

#[test]
fn test_draw_requires_pass_material_and_mesh() {
    let mut graphics = manager();
    let pass = graphics.create_render_pass(&RenderPassDesc::default()).unwrap();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(Vec::new())).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);

    assert!(graphics.cmd_use_render_pass(&mut context, pass).is_some());
    assert!(!graphics.cmd_draw(&context, 3));

    assert!(graphics.cmd_use_material(&mut context, material).is_some());
    assert!(!graphics.cmd_draw(&context, 3));

    assert!(graphics.cmd_use_mesh(&mut context, mesh).is_some());
    assert_eq!(context.state(), RenderContextState::ReadyToDraw);
    assert!(graphics.cmd_draw(&context, 3));
    assert_eq!(graphics.device().draws.len(), 1);

    // Next frame starts from nothing
    graphics.acquire(&mut context);
    assert!(!graphics.cmd_draw(&context, 3));
    assert_eq!(graphics.device().draws.len(), 1);
}

#[test]
fn test_zero_count_draw_is_a_no_op() {
    let mut graphics = manager();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(Vec::new())).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);
    graphics.cmd_use_material(&mut context, material);
    graphics.cmd_use_mesh(&mut context, mesh);

    assert!(!graphics.cmd_draw(&context, 0));
    assert!(graphics.device().draws.is_empty());
}

#[test]
fn test_unknown_render_pass_returns_context_to_idle() {
    let mut graphics = manager();
    let pass = graphics.create_render_pass(&RenderPassDesc::new(64, 64)).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_render_pass(&mut context, pass);
    assert_eq!(context.render_target(), Some(RenderTargetBinding::Pass(pass)));

    graphics.destroy();
    assert!(graphics.cmd_use_render_pass(&mut context, pass).is_none());
    assert_eq!(context.state(), RenderContextState::Idle);
}

#[test]
fn test_stale_material_clears_material_slot() {
    let mut graphics = manager();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(Vec::new())).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);
    graphics.cmd_use_material(&mut context, material);
    graphics.cmd_use_mesh(&mut context, mesh);
    assert!(context.can_draw());

    graphics.destroy();
    assert!(graphics.cmd_use_material(&mut context, material).is_none());
    assert_eq!(context.material(), None);
    assert!(!context.can_draw());
}

// ============================================================================
// Tests: commands
// ============================================================================

#[test]
fn test_use_render_pass_binds_and_clears() {
    let mut graphics = manager();
    let pass = graphics.create_render_pass(&RenderPassDesc::new(320, 240)).unwrap();
    let framebuffer = graphics.render_pass(pass).unwrap().framebuffer_id();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);

    let bound = graphics.cmd_use_render_pass(&mut context, pass).unwrap();
    assert_eq!(bound.dimensions(), UVec2::new(320, 240));

    let device = graphics.device();
    assert_eq!(device.bound_framebuffer, Some(framebuffer));
    assert_eq!(device.viewports.last(), Some(&Rect::from_size(320, 240)));
    assert_eq!(device.color_masks.get(&0), Some(&true));
    assert_eq!(device.clears.last(), Some(&ClearFlags::COLOR));
}

#[test]
fn test_use_swapchain_letterboxes_last_pass() {
    let mut graphics = GraphicsManager::new(MockGraphicsDevice::with_surface_size(1600, 900), &GraphicsConfig::default())
        .unwrap();
    graphics.create_render_pass(&RenderPassDesc::new(800, 600)).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);

    graphics.cmd_use_swapchain(&mut context);
    assert_eq!(context.render_target(), Some(RenderTargetBinding::Swapchain));
    assert_eq!(graphics.device().bound_framebuffer, None);
    assert_eq!(graphics.device().viewports.last(), Some(&Rect::new(200, 0, 1200, 900)));
}

#[test]
fn test_swapchain_refresh_color() {
    let mut graphics = manager();
    let mut context = RenderContext::new();
    graphics.set_swapchain_refresh(Vec4::new(0.2, 0.2, 0.2, 1.0));
    graphics.acquire(&mut context);
    assert_eq!(graphics.device().clear_colors.last(), Some(&Vec4::new(0.2, 0.2, 0.2, 1.0)));
}

#[test]
fn test_state_toggles_reach_device() {
    let mut graphics = manager();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);

    graphics.cmd_toggle_face_culling(&context, false);
    graphics.cmd_toggle_depth_test(&context, true);
    graphics.cmd_toggle_stencil_test(&context, true);
    graphics.cmd_toggle_stencil_write(&context, false);
    graphics.cmd_toggle_attachment_color_writes(&context, 2, false);

    let device = graphics.device();
    assert_eq!(device.capability(Capability::CullFace), Some(false));
    assert_eq!(device.capability(Capability::DepthTest), Some(true));
    assert_eq!(device.capability(Capability::StencilTest), Some(true));
    assert_eq!(device.stencil_mask, Some(0x00));
    assert_eq!(device.color_masks.get(&2), Some(&false));
}

#[test]
fn test_scissor_enables_scissor_test() {
    let mut graphics = manager();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);

    graphics.cmd_set_scissor(&context, Rect::new(10, 20, 30, 40));
    assert_eq!(graphics.device().capability(Capability::ScissorTest), Some(true));
    assert_eq!(graphics.device().scissors.last(), Some(&Rect::new(10, 20, 30, 40)));
}

#[test]
fn test_clear_commands() {
    let mut graphics = manager();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);

    graphics.cmd_clear_color(&context, 1, Vec4::ZERO);
    graphics.cmd_clear_depth(&context, 1.0);
    graphics.cmd_clear_stencil(&context, 0);

    let device = graphics.device();
    assert_eq!(device.command_count("clear_color_attachment"), 1);
    assert_eq!(device.command_count("clear_depth_attachment"), 1);
    assert_eq!(device.command_count("clear_stencil_attachment"), 1);
}

#[test]
fn test_blit_through_facade() {
    let mut graphics = manager();
    let keys = graphics
        .create_render_passes(&[RenderPassDesc::new(64, 64), RenderPassDesc::new(64, 64)])
        .unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);

    assert!(!graphics.cmd_blit(&context, &BlitDesc::color(keys[0], Some(keys[1]))));
    graphics.cmd_use_swapchain(&mut context);
    assert!(graphics.cmd_blit(&context, &BlitDesc::color(keys[0], None)));
    assert_eq!(graphics.device().blits[0].destination_rect, Rect::from_size(1280, 720));
}

#[test]
fn test_bound_material_sets_uniforms_and_textures() {
    let mut graphics = manager();
    graphics.device_mut().declare_uniform("u_tint");
    let material = graphics.create_material(&flat_material()).unwrap();
    let texture = graphics.create_texture_2d(&Texture2DDesc::new(TextureFormat::Rgba, 4, 4)).unwrap();
    let texture_id = graphics.texture(texture).unwrap().id();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);

    let mut bound = graphics.cmd_use_material(&mut context, material).unwrap();
    assert!(bound.set_uniform("u_tint", Vec4::ONE));
    assert!(!bound.set_uniform("u_missing", 1.0f32));
    assert!(bound.set_texture(3, texture));

    let program = graphics.material(material).unwrap().program();
    let device = graphics.device();
    assert_eq!(device.current_program, Some(program));
    assert_eq!(device.uniform_writes.len(), 1);
    assert_eq!(device.texture_units.get(&3).map(|unit| unit.1), Some(texture_id));
}

#[test]
fn test_bound_material_samples_render_pass_target() {
    let mut graphics = manager();
    let desc = RenderPassDesc::new(32, 32).with_targets(RenderPassTargetDesc {
        colors: vec![RenderTargetDesc::default().sampled()],
        ..RenderPassTargetDesc::default()
    });
    let sampled = graphics.create_render_pass(&desc).unwrap();
    let render_only = graphics.create_render_pass(&RenderPassDesc::new(32, 32)).unwrap();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);

    let mut bound = graphics.cmd_use_material(&mut context, material).unwrap();
    assert!(bound.set_render_pass_texture(0, sampled, 0));
    assert!(!bound.set_render_pass_texture(1, render_only, 0));
    assert!(!bound.set_render_pass_depth(2, sampled));
}

// ============================================================================
// Tests: end-to-end scenarios
// ============================================================================

#[test]
fn test_pass_with_combined_depth_stencil() {
    let mut graphics = manager();
    let targets = RenderPassTargetDesc::default()
        .with_depth(DepthTargetDesc::default())
        .with_stencil(StencilTargetDesc::default());
    let pass = graphics
        .create_render_pass(&RenderPassDesc::new(1280, 720).with_targets(targets))
        .unwrap();

    let pass = graphics.render_pass(pass).unwrap();
    assert_eq!(pass.attachment_count(), 1);
    let depth = pass.depth_attachment().unwrap();
    assert_eq!(Some(depth), pass.stencil_attachment());
    assert_eq!(pass.clear_flags(), ClearFlags::COLOR | ClearFlags::DEPTH | ClearFlags::STENCIL);
}

#[test]
fn test_mesh_without_indices_draws_arrays() {
    let mut graphics = manager();
    let pass = graphics.create_render_pass(&RenderPassDesc::default()).unwrap();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(Vec::new())).unwrap();
    assert!(!graphics.mesh(mesh).unwrap().has_index());

    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_render_pass(&mut context, pass);
    graphics.cmd_use_material(&mut context, material);
    graphics.cmd_use_mesh(&mut context, mesh);
    assert!(!context.use_index());
    assert!(graphics.cmd_draw(&context, 3));

    let draw = graphics.device().draws[0];
    assert!(!draw.indexed);
    assert_eq!(draw.count, 3);
    assert_eq!(draw.vertex_array, Some(graphics.mesh(mesh).unwrap().vertex_array().id()));
}

#[test]
fn test_indexed_mesh_draws_elements() {
    let mut graphics = manager();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(vec![0, 1, 2])).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);
    graphics.cmd_use_material(&mut context, material);
    graphics.cmd_use_mesh(&mut context, mesh);

    assert!(graphics.cmd_draw(&context, 3));
    assert!(graphics.device().draws[0].indexed);
}

#[test]
fn test_replacing_bound_mesh_rebinds_before_drawing() {
    let mut graphics = manager();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(Vec::new())).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);
    graphics.cmd_use_material(&mut context, material);
    graphics.cmd_use_mesh(&mut context, mesh);

    graphics.replace_mesh(mesh, &triangle(vec![0, 1, 2])).unwrap();
    let replaced = graphics.mesh(mesh).unwrap().vertex_array().id();
    assert!(graphics.cmd_draw(&context, 3));

    let draw = graphics.device().draws[0];
    assert!(draw.indexed);
    assert_eq!(draw.vertex_array, Some(replaced));
}

#[test]
fn test_destroyed_bound_mesh_refuses_draw() {
    let mut graphics = manager();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(Vec::new())).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_swapchain(&mut context);
    graphics.cmd_use_material(&mut context, material);
    graphics.cmd_use_mesh(&mut context, mesh);

    graphics.destroy();
    assert!(!graphics.cmd_draw(&context, 3));
    assert!(graphics.device().draws.is_empty());
}

#[test]
fn test_zero_sized_texture_is_rejected() {
    let mut graphics = manager();
    assert!(graphics.create_texture_2d(&Texture2DDesc::new(TextureFormat::Rgba, 0, 16)).is_err());
    assert!(graphics.create_texture_2d(&Texture2DDesc::new(TextureFormat::Rgba, 16, 0)).is_err());
    assert_eq!(graphics.texture_count(), 0);
    assert_eq!(graphics.device().live_count(MockObjectKind::Texture), 0);
}

// ============================================================================
// Tests: replace, counts and teardown
// ============================================================================

#[test]
fn test_failed_replace_keeps_previous_mesh() {
    let mut graphics = manager();
    let mesh = graphics.create_mesh(&triangle(vec![0, 1, 2])).unwrap();
    let vertex_array = graphics.mesh(mesh).unwrap().vertex_array().id();

    graphics.device_mut().fail_next(MockObjectKind::VertexArray);
    assert!(graphics.replace_mesh(mesh, &triangle(Vec::new())).is_err());
    assert_eq!(graphics.mesh(mesh).unwrap().vertex_array().id(), vertex_array);
    assert!(graphics.device().is_live(vertex_array.raw()));

    graphics.replace_mesh(mesh, &triangle(Vec::new())).unwrap();
    assert!(!graphics.mesh(mesh).unwrap().has_index());
    assert!(!graphics.device().is_live(vertex_array.raw()));
    assert_eq!(graphics.mesh_count(), 1);
}

#[test]
fn test_create_render_passes_stops_at_first_failure() {
    let mut graphics = manager();
    let result = graphics.create_render_passes(&[
        RenderPassDesc::new(16, 16),
        RenderPassDesc::new(16, 0),
        RenderPassDesc::new(16, 16),
    ]);
    assert!(result.is_err());
    assert_eq!(graphics.render_pass_count(), 1);
    assert!(graphics.render_pass_at(0).is_some());
    assert!(graphics.render_pass_at(1).is_none());
}

#[test]
fn test_destroy_releases_everything() {
    let mut graphics = manager();
    let pass = graphics.create_render_pass(&RenderPassDesc::default()).unwrap();
    let mesh = graphics.create_mesh(&triangle(vec![0, 1, 2])).unwrap();
    graphics.create_material(&flat_material()).unwrap();
    graphics.create_texture_2d(&Texture2DDesc::new(TextureFormat::Rgba, 8, 8)).unwrap();
    graphics.create_uniform_buffer(BufferUsage::Dynamic, &[0u8; 64]).unwrap();

    graphics.destroy();
    assert_eq!(graphics.device().total_live(), 0);
    assert!(!graphics.render_pass_exists(pass));
    assert!(!graphics.mesh_exists(mesh));
    assert_eq!(graphics.material_count(), 0);
}

// ============================================================================
// Tests: statistics sink
// ============================================================================

#[test]
fn test_statistics_sink_records_frame() {
    let mut graphics = manager();
    let tracker = Rc::new(RefCell::new(DebugTracker::new()));
    graphics.set_statistics_sink(Box::new(SharedTracker(Rc::clone(&tracker))));

    let pass = graphics.create_render_pass(&RenderPassDesc::default()).unwrap();
    let material = graphics.create_material(&flat_material()).unwrap();
    let mesh = graphics.create_mesh(&triangle(Vec::new())).unwrap();
    let mut context = RenderContext::new();
    graphics.acquire(&mut context);
    graphics.cmd_use_render_pass(&mut context, pass);
    graphics.cmd_use_material(&mut context, material);
    graphics.cmd_use_mesh(&mut context, mesh);
    graphics.cmd_draw(&context, 3);
    graphics.cmd_draw(&context, 6);

    {
        let tracker = tracker.borrow();
        assert_eq!(tracker.mesh_count, 1);
        assert_eq!(tracker.material_count, 1);
        assert_eq!(tracker.render_pass_count(), 1);
        assert_eq!(tracker.total_draw_calls(), 2);
        assert_eq!(tracker.total_draw_vertices(), 9);
        assert_eq!(tracker.trace(Some(0)).unwrap().commands[0].name, "cmd_use_render_pass");
    }

    graphics.acquire(&mut context);
    assert_eq!(tracker.borrow().total_draw_calls(), 0);

    assert!(graphics.take_statistics_sink().is_some());
    graphics.create_mesh(&triangle(Vec::new())).unwrap();
    assert_eq!(tracker.borrow().mesh_count, 1);
}
