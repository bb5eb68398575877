/// OpenGlDevice - GraphicsDevice implementation over a live glow context
///
/// The window and context are created by the application (glutin, sdl2,
/// ...) and handed over as a `glow::Context` plus a [`GlSurface`] that
/// knows how to present and size the drawable.

use glam::{UVec2, Vec4};
use glow::HasContext;
use glw_graphics::glw::device::*;
use glw_graphics::{glw_bail, glw_err, glw_info, glw_warn, Result};
use rustc_hash::FxHashMap;

use crate::opengl_format::*;

const SOURCE: &str = "glw::OpenGl";

/// Lowest context version the device accepts
pub const MIN_GL_VERSION: (u32, u32) = (4, 3);

/// Window-system side of the context
pub trait GlSurface {
    /// Drawable size in pixels
    fn size(&self) -> UVec2;

    fn swap_buffers(&mut self) -> Result<()>;

    fn set_swap_interval(&mut self, interval: i32) -> Result<()>;
}

pub struct OpenGlDevice<S: GlSurface> {
    gl: glow::Context,
    surface: S,
    /// Storage target of every live texture, needed when attaching it
    texture_targets: FxHashMap<TextureId, TextureTarget>,
}

pub(crate) fn supports_version(major: u32, minor: u32) -> bool {
    (major, minor) >= MIN_GL_VERSION
}

/// (x0, y0, x1, y1) corners of `rect` as blit bounds
pub(crate) fn rect_bounds(rect: Rect) -> (i32, i32, i32, i32) {
    (rect.x, rect.y, rect.x + rect.width as i32, rect.y + rect.height as i32)
}

impl<S: GlSurface> OpenGlDevice<S> {
    pub fn new(gl: glow::Context, surface: S) -> Result<Self> {
        let version = gl.version();
        if !supports_version(version.major, version.minor) {
            glw_bail!(
                InitializationFailed,
                SOURCE,
                "OpenGL {}.{} found, {}.{} required",
                version.major,
                version.minor,
                MIN_GL_VERSION.0,
                MIN_GL_VERSION.1
            );
        }

        let renderer = unsafe { gl.get_parameter_string(glow::RENDERER) };
        glw_info!(
            SOURCE,
            "OpenGL {}.{} on {} ({})",
            version.major,
            version.minor,
            renderer,
            version.vendor_info
        );

        Ok(Self {
            gl,
            surface,
            texture_targets: FxHashMap::default(),
        })
    }

    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Pending driver error, if any (clears the error flag)
    fn take_error(&self) -> Option<u32> {
        let error = unsafe { self.gl.get_error() };
        (error != glow::NO_ERROR).then_some(error)
    }

    /// Drop stale errors so the next check is about one call only
    fn clear_errors(&self) {
        for _ in 0..16 {
            if self.take_error().is_none() {
                break;
            }
        }
    }

    fn texture_target(&self, texture: TextureId) -> TextureTarget {
        self.texture_targets
            .get(&texture)
            .copied()
            .unwrap_or(TextureTarget::Texture2D)
    }
}

impl<S: GlSurface> GraphicsDevice for OpenGlDevice<S> {
    // ===== BUFFERS =====

    fn create_buffer(&mut self) -> Result<BufferId> {
        let buffer = unsafe { self.gl.create_buffer() }
            .map_err(|e| glw_err!(CreationFailed, SOURCE, "glCreateBuffer failed: {}", e))?;
        Ok(BufferId(buffer.0))
    }

    fn upload_buffer(&mut self, buffer: BufferId, usage: BufferUsage, data: &[u8]) {
        // COPY_WRITE_BUFFER leaves the vertex array's element binding alone
        unsafe {
            self.gl
                .bind_buffer(glow::COPY_WRITE_BUFFER, Some(glow::NativeBuffer(buffer.0)));
            self.gl
                .buffer_data_u8_slice(glow::COPY_WRITE_BUFFER, data, buffer_usage_to_gl(usage));
            self.gl.bind_buffer(glow::COPY_WRITE_BUFFER, None);
        }
    }

    fn bind_buffer(&mut self, kind: BufferKind, buffer: Option<BufferId>) {
        unsafe {
            self.gl
                .bind_buffer(buffer_kind_to_gl(kind), buffer.map(|b| glow::NativeBuffer(b.0)));
        }
    }

    fn delete_buffer(&mut self, buffer: BufferId) {
        unsafe { self.gl.delete_buffer(glow::NativeBuffer(buffer.0)) };
    }

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&mut self) -> Result<VertexArrayId> {
        let vertex_array = unsafe { self.gl.create_vertex_array() }
            .map_err(|e| glw_err!(CreationFailed, SOURCE, "glCreateVertexArray failed: {}", e))?;
        Ok(VertexArrayId(vertex_array.0))
    }

    fn bind_vertex_array(&mut self, vertex_array: Option<VertexArrayId>) {
        unsafe {
            self.gl
                .bind_vertex_array(vertex_array.map(|v| glow::NativeVertexArray(v.0)));
        }
    }

    fn enable_vertex_attribute(&mut self, attribute: &VertexAttribute) {
        let data_type = component_type_to_gl(attribute.component);
        unsafe {
            self.gl.enable_vertex_attrib_array(attribute.location);
            match attribute.component {
                ComponentType::Float => self.gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.size as i32,
                    data_type,
                    attribute.normalized,
                    attribute.stride as i32,
                    attribute.offset as i32,
                ),
                // Integer attributes stay integers in the shader
                ComponentType::Int | ComponentType::UnsignedInt => self.gl.vertex_attrib_pointer_i32(
                    attribute.location,
                    attribute.size as i32,
                    data_type,
                    attribute.stride as i32,
                    attribute.offset as i32,
                ),
            }
        }
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayId) {
        unsafe { self.gl.delete_vertex_array(glow::NativeVertexArray(vertex_array.0)) };
    }

    // ===== TEXTURES =====

    fn create_texture(&mut self, storage: &TextureStorage) -> Result<TextureId> {
        let texture = unsafe { self.gl.create_texture() }
            .map_err(|e| glw_err!(CreationFailed, SOURCE, "glCreateTexture failed: {}", e))?;

        let target = texture_target_to_gl(storage.target);
        let layout = texture_layout_to_gl(storage.layout);
        let width = storage.width as i32;
        let height = storage.height as i32;
        let levels = storage.levels.max(1) as i32;

        self.clear_errors();
        unsafe {
            self.gl.bind_texture(target, Some(texture));
            match storage.target {
                TextureTarget::Texture2D | TextureTarget::Cubemap => {
                    self.gl.tex_storage_2d(target, levels, layout, width, height);
                }
                TextureTarget::Texture2DArray => {
                    self.gl.tex_storage_3d(
                        target,
                        levels,
                        layout,
                        width,
                        height,
                        storage.layers.max(1) as i32,
                    );
                }
                TextureTarget::Texture2DMultisample => {
                    self.gl.tex_storage_2d_multisample(
                        target,
                        storage.samples.count() as i32,
                        layout,
                        width,
                        height,
                        true,
                    );
                }
            }
            self.gl.bind_texture(target, None);
        }

        if let Some(error) = self.take_error() {
            unsafe { self.gl.delete_texture(texture) };
            glw_bail!(
                CreationFailed,
                SOURCE,
                "texture storage {:?} {}x{} rejected (0x{:X})",
                storage.layout,
                storage.width,
                storage.height,
                error
            );
        }

        let id = TextureId(texture.0);
        self.texture_targets.insert(id, storage.target);
        Ok(id)
    }

    fn set_texture_sampling(
        &mut self,
        texture: TextureId,
        target: TextureTarget,
        sampling: &TextureSampling,
    ) {
        // Multisample textures have no sampler state
        if target == TextureTarget::Texture2DMultisample {
            return;
        }

        let gl_target = texture_target_to_gl(target);
        unsafe {
            self.gl.bind_texture(gl_target, Some(glow::NativeTexture(texture.0)));
            self.gl
                .tex_parameter_i32(gl_target, glow::TEXTURE_MIN_FILTER, filter_to_gl(sampling.min_filter));
            self.gl
                .tex_parameter_i32(gl_target, glow::TEXTURE_MAG_FILTER, filter_to_gl(sampling.mag_filter));
            self.gl
                .tex_parameter_i32(gl_target, glow::TEXTURE_WRAP_R, wrap_to_gl(sampling.wrap_r));
            self.gl
                .tex_parameter_i32(gl_target, glow::TEXTURE_WRAP_S, wrap_to_gl(sampling.wrap_s));
            self.gl
                .tex_parameter_i32(gl_target, glow::TEXTURE_WRAP_T, wrap_to_gl(sampling.wrap_t));
            self.gl.bind_texture(gl_target, None);
        }
    }

    fn upload_texture(
        &mut self,
        texture: TextureId,
        target: TextureTarget,
        format: TextureFormat,
        fill: &TextureFill<'_>,
    ) {
        let expected = fill.expected_len(format);
        if fill.pixels.len() < expected {
            glw_warn!(
                SOURCE,
                "texture upload of {} bytes skipped, region needs {}",
                fill.pixels.len(),
                expected
            );
            return;
        }

        let gl_target = texture_target_to_gl(target);
        let gl_format = texture_format_to_gl(format);
        let gl_type = pixel_type_to_gl(fill.pixel_type);
        let pixels = glow::PixelUnpackData::Slice(&fill.pixels[..expected]);

        unsafe {
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.bind_texture(gl_target, Some(glow::NativeTexture(texture.0)));
            match target {
                TextureTarget::Texture2D => self.gl.tex_sub_image_2d(
                    gl_target,
                    fill.level as i32,
                    fill.x as i32,
                    fill.y as i32,
                    fill.width as i32,
                    fill.height as i32,
                    gl_format,
                    gl_type,
                    pixels,
                ),
                TextureTarget::Cubemap => self.gl.tex_sub_image_2d(
                    cubemap_face_to_gl(fill.layer),
                    fill.level as i32,
                    fill.x as i32,
                    fill.y as i32,
                    fill.width as i32,
                    fill.height as i32,
                    gl_format,
                    gl_type,
                    pixels,
                ),
                TextureTarget::Texture2DArray => self.gl.tex_sub_image_3d(
                    gl_target,
                    fill.level as i32,
                    fill.x as i32,
                    fill.y as i32,
                    fill.layer as i32,
                    fill.width as i32,
                    fill.height as i32,
                    1,
                    gl_format,
                    gl_type,
                    pixels,
                ),
                TextureTarget::Texture2DMultisample => {
                    glw_warn!(SOURCE, "multisample textures cannot receive client pixels");
                }
            }
            self.gl.bind_texture(gl_target, None);
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
        }
    }

    fn bind_texture_unit(
        &mut self,
        unit: u32,
        target: TextureTarget,
        texture: TextureId,
        depth_stencil: Option<DepthStencilSampling>,
    ) {
        let gl_target = texture_target_to_gl(target);
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(gl_target, Some(glow::NativeTexture(texture.0)));
            if let Some(mode) = depth_stencil {
                self.gl.tex_parameter_i32(
                    gl_target,
                    glow::DEPTH_STENCIL_TEXTURE_MODE,
                    depth_stencil_sampling_to_gl(mode),
                );
            }
        }
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.texture_targets.remove(&texture);
        unsafe { self.gl.delete_texture(glow::NativeTexture(texture.0)) };
    }

    // ===== RENDERBUFFERS =====

    fn create_renderbuffer(
        &mut self,
        layout: TextureLayout,
        samples: SampleCount,
        dimensions: UVec2,
    ) -> Result<RenderbufferId> {
        let renderbuffer = unsafe { self.gl.create_renderbuffer() }
            .map_err(|e| glw_err!(CreationFailed, SOURCE, "glCreateRenderbuffer failed: {}", e))?;

        let gl_layout = texture_layout_to_gl(layout);
        self.clear_errors();
        unsafe {
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, Some(renderbuffer));
            if samples.is_multisampled() {
                self.gl.renderbuffer_storage_multisample(
                    glow::RENDERBUFFER,
                    samples.count() as i32,
                    gl_layout,
                    dimensions.x as i32,
                    dimensions.y as i32,
                );
            } else {
                self.gl.renderbuffer_storage(
                    glow::RENDERBUFFER,
                    gl_layout,
                    dimensions.x as i32,
                    dimensions.y as i32,
                );
            }
            self.gl.bind_renderbuffer(glow::RENDERBUFFER, None);
        }

        if let Some(error) = self.take_error() {
            unsafe { self.gl.delete_renderbuffer(renderbuffer) };
            glw_bail!(
                CreationFailed,
                SOURCE,
                "renderbuffer storage {:?} {}x{} rejected (0x{:X})",
                layout,
                dimensions.x,
                dimensions.y,
                error
            );
        }

        Ok(RenderbufferId(renderbuffer.0))
    }

    fn delete_renderbuffer(&mut self, renderbuffer: RenderbufferId) {
        unsafe { self.gl.delete_renderbuffer(glow::NativeRenderbuffer(renderbuffer.0)) };
    }

    // ===== FRAMEBUFFERS =====

    fn create_framebuffer(&mut self) -> Result<FramebufferId> {
        let framebuffer = unsafe { self.gl.create_framebuffer() }
            .map_err(|e| glw_err!(CreationFailed, SOURCE, "glCreateFramebuffer failed: {}", e))?;
        Ok(FramebufferId(framebuffer.0))
    }

    fn bind_framebuffer(&mut self, framebuffer: Option<FramebufferId>) {
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, framebuffer.map(|f| glow::NativeFramebuffer(f.0)));
        }
    }

    fn attach(&mut self, framebuffer: FramebufferId, point: AttachmentPoint, image: AttachmentHandle) {
        let attachment = attachment_point_to_gl(point);
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, Some(glow::NativeFramebuffer(framebuffer.0)));
            match image {
                AttachmentHandle::Texture(texture) => match self.texture_target(texture) {
                    target @ (TextureTarget::Texture2D | TextureTarget::Texture2DMultisample) => {
                        self.gl.framebuffer_texture_2d(
                            glow::FRAMEBUFFER,
                            attachment,
                            texture_target_to_gl(target),
                            Some(glow::NativeTexture(texture.0)),
                            0,
                        );
                    }
                    // Layered attachment for arrays and cubemaps
                    _ => self.gl.framebuffer_texture(
                        glow::FRAMEBUFFER,
                        attachment,
                        Some(glow::NativeTexture(texture.0)),
                        0,
                    ),
                },
                AttachmentHandle::Renderbuffer(renderbuffer) => {
                    self.gl.framebuffer_renderbuffer(
                        glow::FRAMEBUFFER,
                        attachment,
                        glow::RENDERBUFFER,
                        Some(glow::NativeRenderbuffer(renderbuffer.0)),
                    );
                }
            }
        }
    }

    fn set_draw_buffers(&mut self, framebuffer: FramebufferId, color_count: u32) {
        let buffers: Vec<u32> = if color_count == 0 {
            vec![glow::NONE]
        } else {
            (0..color_count).map(|i| glow::COLOR_ATTACHMENT0 + i).collect()
        };
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, Some(glow::NativeFramebuffer(framebuffer.0)));
            self.gl.draw_buffers(&buffers);
            if color_count == 0 {
                self.gl.read_buffer(glow::NONE);
            }
        }
    }

    fn is_framebuffer_complete(&mut self, framebuffer: FramebufferId) -> bool {
        let status = unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, Some(glow::NativeFramebuffer(framebuffer.0)));
            self.gl.check_framebuffer_status(glow::FRAMEBUFFER)
        };
        if status != glow::FRAMEBUFFER_COMPLETE {
            glw_warn!(SOURCE, "{} incomplete (status 0x{:X})", framebuffer, status);
            return false;
        }
        true
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
        let (sx0, sy0, sx1, sy1) = rect_bounds(source_rect);
        let (dx0, dy0, dx1, dy1) = rect_bounds(destination_rect);
        unsafe {
            self.gl
                .bind_framebuffer(glow::READ_FRAMEBUFFER, source.map(|f| glow::NativeFramebuffer(f.0)));
            self.gl.bind_framebuffer(
                glow::DRAW_FRAMEBUFFER,
                destination.map(|f| glow::NativeFramebuffer(f.0)),
            );
            self.gl.blit_framebuffer(
                sx0,
                sy0,
                sx1,
                sy1,
                dx0,
                dy0,
                dx1,
                dy1,
                clear_flags_to_gl(mask),
                blit_filter_to_gl(filter),
            );
            // Leave the destination bound for both reads and draws
            self.gl.bind_framebuffer(
                glow::FRAMEBUFFER,
                destination.map(|f| glow::NativeFramebuffer(f.0)),
            );
        }
    }

    fn delete_framebuffer(&mut self, framebuffer: FramebufferId) {
        unsafe { self.gl.delete_framebuffer(glow::NativeFramebuffer(framebuffer.0)) };
    }

    // ===== SHADERS AND PROGRAMS =====

    fn compile_shader(&mut self, stage: ShaderStage, source: &str) -> Result<ShaderId> {
        unsafe {
            let shader = self
                .gl
                .create_shader(shader_stage_to_gl(stage))
                .map_err(|e| glw_err!(CreationFailed, SOURCE, "glCreateShader failed: {}", e))?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if !self.gl.get_shader_compile_status(shader) {
                let info = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                glw_bail!(
                    CreationFailed,
                    SOURCE,
                    "{:?} shader compilation failed: {}",
                    stage,
                    info.trim_end()
                );
            }

            Ok(ShaderId(shader.0))
        }
    }

    fn link_program(&mut self, shaders: &[ShaderId]) -> Result<ProgramId> {
        unsafe {
            let program = self
                .gl
                .create_program()
                .map_err(|e| glw_err!(CreationFailed, SOURCE, "glCreateProgram failed: {}", e))?;

            for shader in shaders {
                self.gl.attach_shader(program, glow::NativeShader(shader.0));
            }
            self.gl.link_program(program);
            for shader in shaders {
                self.gl.detach_shader(program, glow::NativeShader(shader.0));
            }

            if !self.gl.get_program_link_status(program) {
                let info = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                glw_bail!(CreationFailed, SOURCE, "program link failed: {}", info.trim_end());
            }

            Ok(ProgramId(program.0))
        }
    }

    fn delete_shader(&mut self, shader: ShaderId) {
        unsafe { self.gl.delete_shader(glow::NativeShader(shader.0)) };
    }

    fn delete_program(&mut self, program: ProgramId) {
        unsafe { self.gl.delete_program(glow::NativeProgram(program.0)) };
    }

    fn use_program(&mut self, program: Option<ProgramId>) {
        unsafe { self.gl.use_program(program.map(|p| glow::NativeProgram(p.0))) };
    }

    fn uniform_location(&mut self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        unsafe { self.gl.get_uniform_location(glow::NativeProgram(program.0), name) }
            .map(|location| UniformLocation(location.0))
    }

    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue) {
        let location = glow::NativeUniformLocation(location.0);
        let location = Some(&location);
        unsafe {
            match *value {
                UniformValue::Int(v) => self.gl.uniform_1_i32(location, v),
                UniformValue::Float(v) => self.gl.uniform_1_f32(location, v),
                UniformValue::Vec2(v) => self.gl.uniform_2_f32(location, v.x, v.y),
                UniformValue::Vec3(v) => self.gl.uniform_3_f32(location, v.x, v.y, v.z),
                UniformValue::Vec4(v) => self.gl.uniform_4_f32(location, v.x, v.y, v.z, v.w),
                UniformValue::Mat3(m) => {
                    self.gl
                        .uniform_matrix_3_f32_slice(location, false, &m.to_cols_array())
                }
                UniformValue::Mat4(m) => {
                    self.gl
                        .uniform_matrix_4_f32_slice(location, false, &m.to_cols_array())
                }
            }
        }
    }

    fn uniform_block_index(&mut self, program: ProgramId, name: &str) -> Option<u32> {
        unsafe { self.gl.get_uniform_block_index(glow::NativeProgram(program.0), name) }
    }

    fn bind_uniform_block(&mut self, program: ProgramId, block_index: u32, binding: u32, buffer: BufferId) {
        unsafe {
            self.gl
                .uniform_block_binding(glow::NativeProgram(program.0), block_index, binding);
            self.gl
                .bind_buffer_base(glow::UNIFORM_BUFFER, binding, Some(glow::NativeBuffer(buffer.0)));
        }
    }

    // ===== FIXED-FUNCTION STATE =====

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        let cap = capability_to_gl(capability);
        unsafe {
            if enabled {
                self.gl.enable(cap);
            } else {
                self.gl.disable(cap);
            }
        }
    }

    fn set_viewport(&mut self, rect: Rect) {
        unsafe {
            self.gl
                .viewport(rect.x, rect.y, rect.width as i32, rect.height as i32)
        };
    }

    fn set_scissor(&mut self, rect: Rect) {
        unsafe {
            self.gl
                .scissor(rect.x, rect.y, rect.width as i32, rect.height as i32)
        };
    }

    fn set_clear_color(&mut self, color: Vec4) {
        unsafe { self.gl.clear_color(color.x, color.y, color.z, color.w) };
    }

    fn set_clear_depth(&mut self, depth: f32) {
        unsafe { self.gl.clear_depth_f32(depth) };
    }

    fn set_clear_stencil(&mut self, stencil: i32) {
        unsafe { self.gl.clear_stencil(stencil) };
    }

    fn clear(&mut self, flags: ClearFlags) {
        if flags.is_empty() {
            return;
        }
        unsafe { self.gl.clear(clear_flags_to_gl(flags)) };
    }

    fn clear_color_attachment(&mut self, attachment: u32, color: Vec4) {
        unsafe {
            self.gl
                .clear_buffer_f32_slice(glow::COLOR, attachment, &color.to_array())
        };
    }

    fn clear_depth_attachment(&mut self, depth: f32) {
        unsafe { self.gl.clear_buffer_f32_slice(glow::DEPTH, 0, &[depth]) };
    }

    fn clear_stencil_attachment(&mut self, stencil: i32) {
        unsafe { self.gl.clear_buffer_i32_slice(glow::STENCIL, 0, &[stencil]) };
    }

    fn set_color_mask(&mut self, attachment: u32, enabled: bool) {
        unsafe {
            self.gl
                .color_mask_draw_buffer(attachment, enabled, enabled, enabled, enabled)
        };
    }

    fn set_depth_mask(&mut self, enabled: bool) {
        unsafe { self.gl.depth_mask(enabled) };
    }

    fn set_stencil_mask(&mut self, mask: u32) {
        unsafe { self.gl.stencil_mask(mask) };
    }

    fn set_depth_function(&mut self, function: CompareFunction) {
        unsafe { self.gl.depth_func(compare_function_to_gl(function)) };
    }

    fn set_depth_range(&mut self, near: f32, far: f32) {
        unsafe { self.gl.depth_range_f32(near, far) };
    }

    fn set_stencil_function(&mut self, face: StencilFace, function: &StencilFunction) {
        unsafe {
            self.gl.stencil_func_separate(
                stencil_face_to_gl(face),
                compare_function_to_gl(function.function),
                function.reference,
                function.mask,
            )
        };
    }

    fn set_stencil_operation(&mut self, face: StencilFace, operation: &StencilOperation) {
        unsafe {
            self.gl.stencil_op_separate(
                stencil_face_to_gl(face),
                stencil_op_to_gl(operation.stencil_fail),
                stencil_op_to_gl(operation.depth_fail),
                stencil_op_to_gl(operation.pass),
            )
        };
    }

    fn set_blend_function(&mut self, function: &BlendFunction) {
        unsafe {
            self.gl.blend_func_separate(
                blend_factor_to_gl(function.source_color),
                blend_factor_to_gl(function.destination_color),
                blend_factor_to_gl(function.source_alpha),
                blend_factor_to_gl(function.destination_alpha),
            )
        };
    }

    fn set_blend_equation(&mut self, equation: BlendEquation) {
        unsafe { self.gl.blend_equation(blend_equation_to_gl(equation)) };
    }

    fn set_face_culling(&mut self, face: CullFace, front: FrontFace) {
        unsafe {
            self.gl.cull_face(cull_face_to_gl(face));
            self.gl.front_face(front_face_to_gl(front));
        }
    }

    // ===== DRAWING AND PRESENTATION =====

    fn draw_arrays(&mut self, vertex_count: u32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLES, 0, vertex_count as i32) };
    }

    fn draw_elements(&mut self, index_count: u32) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, index_count as i32, glow::UNSIGNED_INT, 0)
        };
    }

    fn surface_size(&self) -> UVec2 {
        self.surface.size()
    }

    fn set_swap_interval(&mut self, interval: i32) {
        if let Err(e) = self.surface.set_swap_interval(interval) {
            glw_warn!(SOURCE, "swap interval {} not applied: {}", interval, e);
        }
    }

    #[cfg(feature = "debug-output")]
    fn enable_debug_output(&mut self, synchronous: bool) {
        crate::debug::init_debug_output();
        unsafe {
            self.gl.enable(glow::DEBUG_OUTPUT);
            if synchronous {
                self.gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
            }
            self.gl.debug_message_callback(|source, message_type, id, severity, message| {
                crate::debug::on_debug_message(source, message_type, id, severity, message)
            });
        }
        glw_info!(SOURCE, "debug output enabled (synchronous: {})", synchronous);
    }

    #[cfg(not(feature = "debug-output"))]
    fn enable_debug_output(&mut self, _synchronous: bool) {
        glw_warn!(SOURCE, "debug output requested but the `debug-output` feature is disabled");
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.surface.swap_buffers()
    }
}

#[cfg(test)]
#[path = "opengl_device_tests.rs"]
mod tests;
