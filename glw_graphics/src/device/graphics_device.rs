//! GraphicsDevice trait
//!
//! The single seam between the object layer and the driver. Resources,
//! render passes and the graphics manager only ever talk to a
//! `&mut dyn GraphicsDevice`; the OpenGL backend implements it over a live
//! context, and tests implement it with a recording mock.
//!
//! Creation methods return `Result` and never leave a half-created object
//! behind. Every other method is a plain state change on the driver.

use glam::{UVec2, Vec4};

use super::format::{PixelType, SampleCount, TextureFormat, TextureLayout};
use super::handle::*;
use super::state::*;
use crate::error::Result;

/// Sub-image written into a texture
///
/// `layer` is the array layer for 2D-array textures and the face index
/// (+X, -X, +Y, -Y, +Z, -Z) for cubemaps. It is ignored for 2D textures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureFill<'a> {
    pub level: u32,
    pub x: u32,
    pub y: u32,
    pub layer: u32,
    pub width: u32,
    pub height: u32,
    pub pixel_type: PixelType,
    pub pixels: &'a [u8],
}

impl<'a> TextureFill<'a> {
    /// Whole level-0 image of `width` x `height` bytes-per-pixel data
    pub fn full(width: u32, height: u32, pixels: &'a [u8]) -> Self {
        Self {
            level: 0,
            x: 0,
            y: 0,
            layer: 0,
            width,
            height,
            pixel_type: PixelType::UnsignedByte,
            pixels,
        }
    }

    pub fn with_layer(mut self, layer: u32) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_pixel_type(mut self, pixel_type: PixelType) -> Self {
        self.pixel_type = pixel_type;
        self
    }

    /// Bytes the driver will read for this region in `format`
    pub fn expected_len(&self, format: TextureFormat) -> usize {
        self.width as usize * self.height as usize * self.pixel_type.bytes_per_pixel(format)
    }
}

/// Driver abstraction used by every glw object
pub trait GraphicsDevice {
    // ===== BUFFERS =====

    fn create_buffer(&mut self) -> Result<BufferId>;

    /// Replace the whole data store of `buffer`
    ///
    /// Must not disturb the current vertex array or its bindings.
    fn upload_buffer(&mut self, buffer: BufferId, usage: BufferUsage, data: &[u8]);

    fn bind_buffer(&mut self, kind: BufferKind, buffer: Option<BufferId>);

    fn delete_buffer(&mut self, buffer: BufferId);

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&mut self) -> Result<VertexArrayId>;

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>);

    /// Enable and describe `attribute` from the currently bound vertex buffer
    fn enable_vertex_attribute(&mut self, attribute: &VertexAttribute);

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId);

    // ===== TEXTURES =====

    /// Allocate a texture and its storage
    fn create_texture(&mut self, storage: &TextureStorage) -> Result<TextureId>;

    fn set_texture_sampling(
        &mut self,
        texture: TextureId,
        target: TextureTarget,
        sampling: &TextureSampling,
    );

    /// Upload client pixels of `format` into a region of `texture`
    fn upload_texture(
        &mut self,
        texture: TextureId,
        target: TextureTarget,
        format: TextureFormat,
        fill: &TextureFill<'_>,
    );

    /// Make `texture` current on texture unit `unit`
    fn bind_texture_unit(
        &mut self,
        unit: u32,
        target: TextureTarget,
        texture: TextureId,
        depth_stencil: Option<DepthStencilSampling>,
    );

    fn delete_texture(&mut self, texture: TextureId);

    // ===== RENDERBUFFERS =====

    fn create_renderbuffer(
        &mut self,
        layout: TextureLayout,
        samples: SampleCount,
        dimensions: UVec2,
    ) -> Result<RenderbufferId>;

    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferId);

    // ===== FRAMEBUFFERS =====

    fn create_framebuffer(&mut self) -> Result<FramebufferId>;

    /// Bind for drawing; `None` selects the default framebuffer
    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>);

    fn attach(&mut self, framebuffer: FramebufferId, point: AttachmentPoint, image: AttachmentHandle);

    /// Route fragment outputs 0..color_count to COLOR0..COLORn
    fn set_draw_buffers(&mut self, framebuffer: FramebufferId, color_count: u32);

    fn is_framebuffer_complete(&mut self, framebuffer: FramebufferId) -> bool;

    /// Copy a region between framebuffers (`None` is the default framebuffer)
    fn blit_framebuffer(
        &mut self,
        source: Option<FramebufferId>,
        destination: Option<FramebufferId>,
        source_rect: Rect,
        destination_rect: Rect,
        mask: ClearFlags,
        filter: BlitFilter,
    );

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId);

    // ===== SHADERS AND PROGRAMS =====

    /// Compile one stage; the error carries the driver's info log
    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId>;

    /// Link the given shaders; the error carries the driver's info log
    fn link_program(&mut self, shaders: &[ShaderId]) -> Result<ProgramId>;

    fn delete_shader(&mut self, shader: ShaderId);

    fn delete_program(&mut self, program: ProgramId);

    fn use_program(&mut self, program: Option<ProgramId>);

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation>;

    /// Write a uniform of the program currently in use
    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue);

    fn uniform_block_index(&mut self, program: ProgramId, name: &str) -> Option<u32>;

    /// Bind `buffer` to `binding` and point `block_index` of `program` at it
    fn bind_uniform_block(&mut self, program: ProgramId, block_index: u32, binding: u32, buffer: BufferId);

    // ===== FIXED-FUNCTION STATE =====

    fn set_capability(&mut self, capability: Capability, enabled: bool);

    fn set_viewport(&mut self, rect: Rect);

    fn set_scissor(&mut self, rect: Rect);

    fn set_clear_color(&mut self, color: Vec4);

    fn set_clear_depth(&mut self, depth: f32);

    fn set_clear_stencil(&mut self, stencil: i32);

    /// Clear the selected buffers of the bound framebuffer
    fn clear(&mut self, flags: ClearFlags);

    /// Clear one color attachment of the bound framebuffer to `color`
    fn clear_color_attachment(&mut self, attachment: u32, color: Vec4);

    /// Clear the depth buffer of the bound framebuffer to `depth`
    fn clear_depth_attachment(&mut self, depth: f32);

    /// Clear the stencil buffer of the bound framebuffer to `stencil`
    fn clear_stencil_attachment(&mut self, stencil: i32);

    /// Enable or disable RGBA writes on one draw buffer
    fn set_color_mask(&mut self, attachment: u32, enabled: bool);

    fn set_depth_mask(&mut self, enabled: bool);

    fn set_stencil_mask(&mut self, mask: u32);

    fn set_depth_function(&mut self, function: CompareFunction);

    fn set_depth_range(&mut self, near: f32, far: f32);

    fn set_stencil_function(&mut self, face: StencilFace, function: &StencilFunction);

    fn set_stencil_operation(&mut self, face: StencilFace, operation: &StencilOperation);

    fn set_blend_function(&mut self, function: &BlendFunction);

    fn set_blend_equation(&mut self, equation: BlendEquation);

    fn set_face_culling(&mut self, face: CullFace, front: FrontFace);

    // ===== DRAWING AND PRESENTATION =====

    /// Draw `vertex_count` vertices as triangles from the bound vertex array
    fn draw_arrays(&mut self, vertex_count: u32);

    /// Draw `index_count` 32-bit indices as triangles from the bound vertex array
    fn draw_elements(&mut self, index_count: u32);

    /// Drawable size of the window surface, in pixels
    fn surface_size(&self) -> UVec2;

    fn set_swap_interval(&mut self, interval: i32);

    /// Install the driver debug-output callback, routed into the glw logger
    fn enable_debug_output(&mut self, synchronous: bool);

    fn swap_buffers(&mut self) -> Result<()>;
}
