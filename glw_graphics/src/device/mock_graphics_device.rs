//! Mock GraphicsDevice for unit tests (no driver required)
//!
//! Hands out sequential non-zero ids, tracks which objects are alive so
//! tests can prove rollback and teardown release everything, records the
//! state it is asked to set, and can be told to fail specific creations.

use glam::{UVec2, Vec4};
use rustc_hash::{FxHashMap, FxHashSet};
use std::num::NonZeroU32;

use crate::device::format::{SampleCount, TextureFormat, TextureLayout};
use crate::device::graphics_device::{GraphicsDevice, TextureFill};
use crate::device::handle::*;
use crate::device::state::*;
use crate::error::{Error, Result};

/// Kind of driver object created through the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockObjectKind {
    Buffer,
    VertexArray,
    Texture,
    Renderbuffer,
    Framebuffer,
    Shader,
    Program,
}

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockDraw {
    pub indexed: bool,
    pub count: u32,
    pub vertex_array: Option<VertexArrayId>,
    pub program: Option<ProgramId>,
    pub framebuffer: Option<FramebufferId>,
}

/// One recorded blit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBlit {
    pub source: Option<FramebufferId>,
    pub destination: Option<FramebufferId>,
    pub source_rect: Rect,
    pub destination_rect: Rect,
    pub mask: ClearFlags,
    pub filter: BlitFilter,
}

/// One recorded texture upload
#[derive(Debug, Clone, PartialEq)]
pub struct MockTextureUpload {
    pub texture: TextureId,
    pub target: TextureTarget,
    pub format: TextureFormat,
    pub level: u32,
    pub layer: u32,
    pub width: u32,
    pub height: u32,
    pub byte_len: usize,
}

pub struct MockGraphicsDevice {
    /// Names of every state-changing call, in order
    pub commands: Vec<String>,
    next_id: u32,
    live: FxHashMap<u32, MockObjectKind>,
    /// Successful creations left before the next one of that kind fails
    failures: FxHashMap<MockObjectKind, u32>,
    failing_stages: FxHashSet<ShaderStage>,
    fail_link: bool,
    incomplete_framebuffers: bool,
    uniforms: Vec<String>,
    uniform_blocks: Vec<String>,
    surface: UVec2,

    pub textures: FxHashMap<TextureId, TextureStorage>,
    pub sampling: FxHashMap<TextureId, TextureSampling>,
    pub texture_uploads: Vec<MockTextureUpload>,
    pub renderbuffers: FxHashMap<RenderbufferId, (TextureLayout, SampleCount, UVec2)>,
    pub buffer_sizes: FxHashMap<BufferId, usize>,
    pub attachments: FxHashMap<FramebufferId, Vec<(AttachmentPoint, AttachmentHandle)>>,
    pub draw_buffers: FxHashMap<FramebufferId, u32>,
    pub vertex_attributes: Vec<(Option<VertexArrayId>, VertexAttribute)>,
    pub capabilities: FxHashMap<Capability, bool>,
    pub color_masks: FxHashMap<u32, bool>,
    pub bound_framebuffer: Option<FramebufferId>,
    pub bound_vertex_array: Option<VertexArrayId>,
    pub current_program: Option<ProgramId>,
    pub texture_units: FxHashMap<u32, (TextureTarget, TextureId, Option<DepthStencilSampling>)>,
    pub uniform_writes: Vec<(UniformLocation, UniformValue)>,
    pub uniform_block_bindings: Vec<(ProgramId, u32, u32, BufferId)>,
    pub viewports: Vec<Rect>,
    pub scissors: Vec<Rect>,
    pub clear_colors: Vec<Vec4>,
    pub clears: Vec<ClearFlags>,
    pub draws: Vec<MockDraw>,
    pub blits: Vec<MockBlit>,
    pub stencil_mask: Option<u32>,
    pub swap_interval: Option<i32>,
    pub debug_output: Option<bool>,
    pub presented_frames: u32,
}

impl MockGraphicsDevice {
    /// New mock with a 1280x720 surface
    pub fn new() -> Self {
        Self::with_surface_size(1280, 720)
    }

    pub fn with_surface_size(width: u32, height: u32) -> Self {
        Self {
            commands: Vec::new(),
            next_id: 0,
            live: FxHashMap::default(),
            failures: FxHashMap::default(),
            failing_stages: FxHashSet::default(),
            fail_link: false,
            incomplete_framebuffers: false,
            uniforms: Vec::new(),
            uniform_blocks: Vec::new(),
            surface: UVec2::new(width, height),
            textures: FxHashMap::default(),
            sampling: FxHashMap::default(),
            texture_uploads: Vec::new(),
            renderbuffers: FxHashMap::default(),
            buffer_sizes: FxHashMap::default(),
            attachments: FxHashMap::default(),
            draw_buffers: FxHashMap::default(),
            vertex_attributes: Vec::new(),
            capabilities: FxHashMap::default(),
            color_masks: FxHashMap::default(),
            bound_framebuffer: None,
            bound_vertex_array: None,
            current_program: None,
            texture_units: FxHashMap::default(),
            uniform_writes: Vec::new(),
            uniform_block_bindings: Vec::new(),
            viewports: Vec::new(),
            scissors: Vec::new(),
            clear_colors: Vec::new(),
            clears: Vec::new(),
            draws: Vec::new(),
            blits: Vec::new(),
            stencil_mask: None,
            swap_interval: None,
            debug_output: None,
            presented_frames: 0,
        }
    }

    // ===== FAILURE INJECTION =====

    /// Let `successes` more creations of `kind` succeed, then fail the next one
    pub fn fail_after(&mut self, kind: MockObjectKind, successes: u32) {
        self.failures.insert(kind, successes);
    }

    /// Fail the next creation of `kind`
    pub fn fail_next(&mut self, kind: MockObjectKind) {
        self.fail_after(kind, 0);
    }

    pub fn fail_shader_stage(&mut self, stage: ShaderStage) {
        self.failing_stages.insert(stage);
    }

    pub fn set_fail_link(&mut self, fail: bool) {
        self.fail_link = fail;
    }

    pub fn set_framebuffers_incomplete(&mut self, incomplete: bool) {
        self.incomplete_framebuffers = incomplete;
    }

    // ===== PROGRAM INTROSPECTION SETUP =====

    /// Make `name` resolvable by `uniform_location`
    pub fn declare_uniform(&mut self, name: &str) {
        self.uniforms.push(name.to_string());
    }

    /// Make `name` resolvable by `uniform_block_index`
    pub fn declare_uniform_block(&mut self, name: &str) {
        self.uniform_blocks.push(name.to_string());
    }

    pub fn set_surface_size(&mut self, width: u32, height: u32) {
        self.surface = UVec2::new(width, height);
    }

    // ===== QUERIES =====

    pub fn live_count(&self, kind: MockObjectKind) -> usize {
        self.live.values().filter(|k| **k == kind).count()
    }

    pub fn total_live(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, raw: u32) -> bool {
        self.live.contains_key(&raw)
    }

    /// Number of recorded calls with exactly this name
    pub fn command_count(&self, name: &str) -> usize {
        self.commands.iter().filter(|c| c.as_str() == name).count()
    }

    pub fn has_command(&self, name: &str) -> bool {
        self.command_count(name) > 0
    }

    pub fn capability(&self, capability: Capability) -> Option<bool> {
        self.capabilities.get(&capability).copied()
    }

    pub fn attachments_of(&self, framebuffer: FramebufferId) -> &[(AttachmentPoint, AttachmentHandle)] {
        self.attachments
            .get(&framebuffer)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Forget recorded calls (object tracking is kept)
    pub fn clear_records(&mut self) {
        self.commands.clear();
        self.viewports.clear();
        self.scissors.clear();
        self.clear_colors.clear();
        self.clears.clear();
        self.draws.clear();
        self.blits.clear();
        self.uniform_writes.clear();
        self.texture_uploads.clear();
    }

    // ===== INTERNAL =====

    fn record(&mut self, name: &str) {
        self.commands.push(name.to_string());
    }

    fn allocate(&mut self, kind: MockObjectKind) -> Result<NonZeroU32> {
        if let Some(remaining) = self.failures.get_mut(&kind) {
            if *remaining == 0 {
                self.failures.remove(&kind);
                return Err(Error::CreationFailed(format!("mock: injected {:?} failure", kind)));
            }
            *remaining -= 1;
        }
        self.next_id += 1;
        self.live.insert(self.next_id, kind);
        Ok(NonZeroU32::new(self.next_id).expect("mock ids start at 1"))
    }

    fn release(&mut self, raw: u32, kind: MockObjectKind) {
        let released = self.live.remove(&raw);
        assert_eq!(released, Some(kind), "mock: {:?} {} deleted twice or never created", kind, raw);
    }
}

impl Default for MockGraphicsDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    // ===== BUFFERS =====

    fn create_buffer(&mut self) -> Result<BufferId> {
        let id = BufferId(self.allocate(MockObjectKind::Buffer)?);
        self.buffer_sizes.insert(id, 0);
        self.record("create_buffer");
        Ok(id)
    }

    fn upload_buffer(&mut self, buffer: BufferId, _usage: BufferUsage, data: &[u8]) {
        self.buffer_sizes.insert(buffer, data.len());
        self.record("upload_buffer");
    }

    fn bind_buffer(&mut self, _kind: BufferKind, _buffer: Option<BufferId>) {
        self.record("bind_buffer");
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        self.release(buffer.raw(), MockObjectKind::Buffer);
        self.buffer_sizes.remove(&buffer);
        self.record("delete_buffer");
    }

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&mut self) -> Result<VertexArrayId> {
        let id = VertexArrayId(self.allocate(MockObjectKind::VertexArray)?);
        self.record("create_vertex_array");
        Ok(id)
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        self.bound_vertex_array = vertex_array;
        self.record("bind_vertex_array");
    }

    fn enable_vertex_attribute(&mut self, attribute: &VertexAttribute) {
        self.vertex_attributes.push((self.bound_vertex_array, *attribute));
        self.record("enable_vertex_attribute");
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        self.release(vertex_array.raw(), MockObjectKind::VertexArray);
        if self.bound_vertex_array == Some(vertex_array) {
            self.bound_vertex_array = None;
        }
        self.record("delete_vertex_array");
    }

    // ===== TEXTURES =====

    fn create_texture(&mut self, storage: &TextureStorage) -> Result<TextureId> {
        let id = TextureId(self.allocate(MockObjectKind::Texture)?);
        self.textures.insert(id, *storage);
        self.record("create_texture");
        Ok(id)
    }

    fn set_texture_sampling(&mut self, texture: TextureId, _target: TextureTarget, sampling: &TextureSampling) {
        self.sampling.insert(texture, *sampling);
        self.record("set_texture_sampling");
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        target: TextureTarget,
        format: TextureFormat,
        fill: &TextureFill<'_>,
    ) {
        self.texture_uploads.push(MockTextureUpload {
            texture,
            target,
            format,
            level: fill.level,
            layer: fill.layer,
            width: fill.width,
            height: fill.height,
            byte_len: fill.pixels.len(),
        });
        self.record("upload_texture");
    }

    fn bind_texture_unit(
        &mut self,
        unit: u32,
        target: TextureTarget,
        texture: TextureId,
        depth_stencil: Option<DepthStencilSampling>,
    ) {
        self.texture_units.insert(unit, (target, texture, depth_stencil));
        self.record("bind_texture_unit");
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.release(texture.raw(), MockObjectKind::Texture);
        self.textures.remove(&texture);
        self.record("delete_texture");
    }

    // ===== RENDERBUFFERS =====

    fn create_renderbuffer(
        &mut self,
        layout: TextureLayout,
        samples: SampleCount,
        dimensions: UVec2,
    ) -> Result<RenderbufferId> {
        let id = RenderbufferId(self.allocate(MockObjectKind::Renderbuffer)?);
        self.renderbuffers.insert(id, (layout, samples, dimensions));
        self.record("create_renderbuffer");
        Ok(id)
    }

    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferId) {
        self.release(renderbuffer.raw(), MockObjectKind::Renderbuffer);
        self.renderbuffers.remove(&renderbuffer);
        self.record("delete_renderbuffer");
    }

    // ===== FRAMEBUFFERS =====

    fn create_framebuffer(&mut self) -> Result<FramebufferId> {
        let id = FramebufferId(self.allocate(MockObjectKind::Framebuffer)?);
        self.attachments.insert(id, Vec::new());
        self.record("create_framebuffer");
        Ok(id)
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        self.bound_framebuffer = framebuffer;
        self.record("bind_framebuffer");
    }

    fn attach(&mut self, framebuffer: FramebufferId, point: AttachmentPoint, image: AttachmentHandle) {
        self.attachments.entry(framebuffer).or_default().push((point, image));
        self.record("attach");
    }

    fn set_draw_buffers(&mut self, framebuffer: FramebufferId, color_count: u32) {
        self.draw_buffers.insert(framebuffer, color_count);
        self.record("set_draw_buffers");
    }

    fn is_framebuffer_complete(&mut self, _framebuffer: FramebufferId) -> bool {
        self.record("is_framebuffer_complete");
        !self.incomplete_framebuffers
    }

    fn blit_framebuffer(
        &mut self,
        source: Option<FramebufferId>,
        destination: Option<FramebufferId>,
        source_rect: Rect,
        destination_rect: Rect,
        mask: ClearFlags,
        filter: BlitFilter,
    ) {
        self.blits.push(MockBlit {
            source,
            destination,
            source_rect,
            destination_rect,
            mask,
            filter,
        });
        self.record("blit_framebuffer");
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        self.release(framebuffer.raw(), MockObjectKind::Framebuffer);
        self.attachments.remove(&framebuffer);
        if self.bound_framebuffer == Some(framebuffer) {
            self.bound_framebuffer = None;
        }
        self.record("delete_framebuffer");
    }

    // ===== SHADERS AND PROGRAMS =====

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId> {
        if self.failing_stages.contains(&stage) || source.trim().is_empty() {
            return Err(Error::CreationFailed(format!("mock: {:?} shader failed to compile", stage)));
        }
        let id = ShaderId(self.allocate(MockObjectKind::Shader)?);
        self.record("compile_shader");
        Ok(id)
    }

    fn link_program(&mut self, shaders: &[ShaderId]) -> Result<ProgramId> {
        if self.fail_link || shaders.is_empty() {
            return Err(Error::CreationFailed("mock: program failed to link".to_string()));
        }
        let id = ProgramId(self.allocate(MockObjectKind::Program)?);
        self.record("link_program");
        Ok(id)
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        self.release(shader.raw(), MockObjectKind::Shader);
        self.record("delete_shader");
    }

    fn delete_program(&mut self, program: ProgramId) {
        self.release(program.raw(), MockObjectKind::Program);
        if self.current_program == Some(program) {
            self.current_program = None;
        }
        self.record("delete_program");
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        self.current_program = program;
        self.record("use_program");
    }

    fn uniform_location(&mut self, _program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.uniforms
            .iter()
            .position(|u| u == name)
            .map(|index| UniformLocation(index as u32))
    }

    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue) {
        self.uniform_writes.push((location, *value));
        self.record("set_uniform");
    }

    fn uniform_block_index(&mut self, _program: ProgramId, name: &str) -> Option<u32> {
        self.uniform_blocks
            .iter()
            .position(|b| b == name)
            .map(|index| index as u32)
    }

    fn bind_uniform_block(&mut self, program: ProgramId, block_index: u32, binding: u32, buffer: BufferId) {
        self.uniform_block_bindings.push((program, block_index, binding, buffer));
        self.record("bind_uniform_block");
    }

    // ===== FIXED-FUNCTION STATE =====

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        self.capabilities.insert(capability, enabled);
        self.record("set_capability");
    }

    fn set_viewport(&mut self, rect: Rect) {
        self.viewports.push(rect);
        self.record("set_viewport");
    }

    fn set_scissor(&mut self, rect: Rect) {
        self.scissors.push(rect);
        self.record("set_scissor");
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.clear_colors.push(color);
        self.record("set_clear_color");
    }

    fn set_clear_depth(&mut self, _depth: f32) {
        self.record("set_clear_depth");
    }

    fn set_clear_stencil(&mut self, _stencil: i32) {
        self.record("set_clear_stencil");
    }

    fn clear(&mut self, flags: ClearFlags) {
        self.clears.push(flags);
        self.record("clear");
    }

    fn clear_color_attachment(&mut self, _attachment: u32, _color: Vec4) {
        self.record("clear_color_attachment");
    }

    fn clear_depth_attachment(&mut self, _depth: f32) {
        self.record("clear_depth_attachment");
    }

    fn clear_stencil_attachment(&mut self, _stencil: i32) {
        self.record("clear_stencil_attachment");
    }

    fn set_color_mask(&mut self, attachment: u32, enabled: bool) {
        self.color_masks.insert(attachment, enabled);
        self.record("set_color_mask");
    }

    fn set_depth_mask(&mut self, _enabled: bool) {
        self.record("set_depth_mask");
    }

    fn set_stencil_mask(&mut self, mask: u32) {
        self.stencil_mask = Some(mask);
        self.record("set_stencil_mask");
    }

    fn set_depth_function(&mut self, _function: CompareFunction) {
        self.record("set_depth_function");
    }

    fn set_depth_range(&mut self, _near: f32, _far: f32) {
        self.record("set_depth_range");
    }

    fn set_stencil_function(&mut self, _face: StencilFace, _function: &StencilFunction) {
        self.record("set_stencil_function");
    }

    fn set_stencil_operation(&mut self, _face: StencilFace, _operation: &StencilOperation) {
        self.record("set_stencil_operation");
    }

    fn set_blend_function(&mut self, _function: &BlendFunction) {
        self.record("set_blend_function");
    }

    fn set_blend_equation(&mut self, _equation: BlendEquation) {
        self.record("set_blend_equation");
    }

    fn set_face_culling(&mut self, _face: CullFace, _front: FrontFace) {
        self.record("set_face_culling");
    }

    // ===== DRAWING AND PRESENTATION =====

    fn draw_arrays(&mut self, vertex_count: u32) {
        self.draws.push(MockDraw {
            indexed: false,
            count: vertex_count,
            vertex_array: self.bound_vertex_array,
            program: self.current_program,
            framebuffer: self.bound_framebuffer,
        });
        self.record("draw_arrays");
    }

    fn draw_elements(&mut self, index_count: u32) {
        self.draws.push(MockDraw {
            indexed: true,
            count: index_count,
            vertex_array: self.bound_vertex_array,
            program: self.current_program,
            framebuffer: self.bound_framebuffer,
        });
        self.record("draw_elements");
    }

    fn surface_size(&self) -> UVec2 {
        self.surface
    }

    fn set_swap_interval(&mut self, interval: i32) {
        self.swap_interval = Some(interval);
        self.record("set_swap_interval");
    }

    fn enable_debug_output(&mut self, synchronous: bool) {
        self.debug_output = Some(synchronous);
        self.record("enable_debug_output");
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.presented_frames += 1;
        self.record("swap_buffers");
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
