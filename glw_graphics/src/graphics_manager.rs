/// Graphics manager: the facade an application drives every frame.
///
/// Owns the device, every resource, every render pass and the swapchain.
/// A frame is `acquire`, a sequence of `cmd_*` calls, then `present`.
/// Commands take the frame's [`RenderContext`] and do nothing while it is
/// idle; `cmd_use_render_pass` and `cmd_use_swapchain` are the only way out
/// of the idle state.

use glam::{UVec2, Vec4};

use crate::context::graphics_config::GraphicsConfig;
use crate::context::render_context::{RenderContext, RenderTargetBinding};
use crate::context::statistics::FrameStatisticsSink;
use crate::context::swapchain::Swapchain;
use crate::device::{BufferUsage, Capability, GraphicsDevice, Rect, TextureFill, UniformLocation, UniformValue};
use crate::error::Result;
use crate::render_pass::render_pass::{RenderPass, RenderPassDesc};
use crate::render_pass::render_pass_manager::{BlitDesc, RenderPassKey, RenderPassManager};
use crate::resource::buffer::Buffer;
use crate::resource::material::{Material, MaterialDesc};
use crate::resource::mesh::{Mesh, MeshDesc};
use crate::resource::resource_manager::{
    BufferKey, CubemapKey, MaterialKey, MeshKey, ResourceKind, ResourceManager, TextureKey,
};
use crate::resource::texture::{CubemapDesc, Texture, Texture2DArrayDesc, Texture2DDesc, CUBEMAP_FACES};
use crate::{glw_bail, glw_debug, glw_info};

// ===== BOUND MATERIAL =====

/// Material made current by [`GraphicsManager::cmd_use_material`]
///
/// Uniform and texture setters go straight to the device while the
/// material's program is in use.
pub struct BoundMaterial<'a> {
    material: &'a Material,
    device: &'a mut dyn GraphicsDevice,
    resources: &'a ResourceManager,
    render_passes: &'a RenderPassManager,
}

impl<'a> BoundMaterial<'a> {
    pub fn material(&self) -> &Material {
        self.material
    }

    pub fn uniform_location(&mut self, name: &str) -> Option<UniformLocation> {
        self.material.uniform_location(self.device, name)
    }

    pub fn set_uniform(&mut self, name: &str, value: impl Into<UniformValue>) -> bool {
        self.material.set_uniform(self.device, name, value)
    }

    pub fn set_uniform_at(&mut self, location: UniformLocation, value: impl Into<UniformValue>) {
        self.material.set_uniform_at(self.device, location, value);
    }

    pub fn set_uniform_buffer(&mut self, block: &str, binding: u32, buffer: BufferKey) -> bool {
        match self.resources.buffer(buffer) {
            Some(buffer) => self.material.set_uniform_buffer(self.device, block, binding, buffer),
            None => false,
        }
    }

    pub fn set_texture(&mut self, slot: u32, texture: TextureKey) -> bool {
        let resources = self.resources;
        self.bind_texture(slot, resources.texture(texture))
    }

    pub fn set_cubemap(&mut self, slot: u32, cubemap: CubemapKey) -> bool {
        let resources = self.resources;
        self.bind_texture(slot, resources.cubemap(cubemap))
    }

    /// Bind a texture and point the sampler uniform `name` at its unit
    pub fn set_sampler(&mut self, name: &str, slot: u32, texture: TextureKey) -> bool {
        match self.resources.texture(texture) {
            Some(texture) => self.material.set_sampler(self.device, name, slot, texture),
            None => false,
        }
    }

    /// Sample a color target of another render pass
    ///
    /// The target must have been created with `Accessibility::Sampled`.
    pub fn set_render_pass_texture(&mut self, slot: u32, pass: RenderPassKey, color: usize) -> bool {
        let render_passes = self.render_passes;
        let texture = render_passes.get(pass).and_then(|pass| pass.color_texture(color));
        self.bind_texture(slot, texture)
    }

    /// Sample the depth target of another render pass
    pub fn set_render_pass_depth(&mut self, slot: u32, pass: RenderPassKey) -> bool {
        let render_passes = self.render_passes;
        let texture = render_passes.get(pass).and_then(|pass| pass.depth_texture());
        self.bind_texture(slot, texture)
    }

    fn bind_texture(&mut self, slot: u32, texture: Option<&Texture>) -> bool {
        match texture {
            Some(texture) => {
                self.material.set_texture(self.device, slot, texture);
                true
            }
            None => false,
        }
    }
}

// ===== GRAPHICS MANAGER =====

pub struct GraphicsManager<D: GraphicsDevice> {
    device: D,
    resources: ResourceManager,
    render_passes: RenderPassManager,
    swapchain: Swapchain,
    draw_enabled: bool,
    need_resize: bool,
    statistics: Option<Box<dyn FrameStatisticsSink>>,
}

impl<D: GraphicsDevice> GraphicsManager<D> {
    /// Take ownership of a device and apply the global configuration
    ///
    /// # Errors
    ///
    /// `InitializationFailed` when the surface has a zero dimension.
    pub fn new(mut device: D, config: &GraphicsConfig) -> Result<Self> {
        let surface = device.surface_size();
        if surface.x == 0 || surface.y == 0 {
            glw_bail!(
                InitializationFailed,
                "glw::GraphicsManager",
                "surface has a zero dimension ({}x{})",
                surface.x,
                surface.y
            );
        }

        if config.debug.enabled {
            device.enable_debug_output(config.debug.synchronous);
        }

        device.set_capability(Capability::CullFace, config.culling.enabled);
        if config.culling.enabled {
            device.set_face_culling(config.culling.face, config.culling.front);
        }
        device.set_capability(Capability::Multisample, config.extras.multi_sampling);
        device.set_capability(Capability::FramebufferSrgb, config.extras.srgb);
        device.set_swap_interval(config.backend.swap_interval);

        let swapchain = Swapchain::create(&device);
        glw_info!(
            "glw::GraphicsManager",
            "Created for a {}.{} context, surface {}x{}",
            config.backend.major,
            config.backend.minor,
            surface.x,
            surface.y
        );

        Ok(Self {
            device,
            resources: ResourceManager::new(),
            render_passes: RenderPassManager::new(),
            swapchain,
            draw_enabled: true,
            need_resize: false,
            statistics: None,
        })
    }

    /// Resize the swapchain on the next `acquire`
    pub fn mark_resize(&mut self) {
        self.need_resize = true;
    }

    pub fn set_draw_state(&mut self, enabled: bool) {
        self.draw_enabled = enabled;
    }

    pub fn draw_state(&self) -> bool {
        self.draw_enabled
    }

    pub fn set_swapchain_refresh(&mut self, refresh: Vec4) {
        self.swapchain.set_refresh_color(refresh);
    }

    pub fn set_statistics_sink(&mut self, sink: Box<dyn FrameStatisticsSink>) {
        self.statistics = Some(sink);
    }

    pub fn take_statistics_sink(&mut self) -> Option<Box<dyn FrameStatisticsSink>> {
        self.statistics.take()
    }

    fn track_created(&mut self, kind: ResourceKind) {
        if let Some(sink) = self.statistics.as_mut() {
            sink.on_resource_created(kind);
        }
    }

    fn track_command(&mut self, context: &RenderContext, name: &'static str, value: u64) {
        if let Some(sink) = self.statistics.as_mut() {
            let pass = context.render_pass().and_then(|key| self.render_passes.position(key));
            sink.on_command(pass, name, value);
        }
    }

    // ===== RENDER PASSES =====

    pub fn create_render_pass(&mut self, desc: &RenderPassDesc) -> Result<RenderPassKey> {
        let key = self.render_passes.create(&mut self.device, desc)?;
        if let Some(sink) = self.statistics.as_mut() {
            sink.on_render_pass_created();
        }
        Ok(key)
    }

    /// Create passes in order, stopping at the first failure
    ///
    /// Passes created before the failure are kept.
    pub fn create_render_passes(&mut self, descs: &[RenderPassDesc]) -> Result<Vec<RenderPassKey>> {
        descs.iter().map(|desc| self.create_render_pass(desc)).collect()
    }

    pub fn replace_render_pass(&mut self, key: RenderPassKey, desc: &RenderPassDesc) -> Result<()> {
        self.render_passes.replace(&mut self.device, key, desc)
    }

    // ===== MESHES =====

    pub fn create_mesh(&mut self, desc: &MeshDesc) -> Result<MeshKey> {
        let key = self.resources.create_mesh(&mut self.device, desc)?;
        self.track_created(ResourceKind::Mesh);
        Ok(key)
    }

    pub fn replace_mesh(&mut self, key: MeshKey, desc: &MeshDesc) -> Result<()> {
        self.resources.replace_mesh(&mut self.device, key, desc)
    }

    pub fn fill_mesh_vertices(&mut self, key: MeshKey, vertices: &[u8]) -> Result<()> {
        self.resources.fill_mesh_vertices(&mut self.device, key, vertices)
    }

    pub fn fill_mesh_indices(&mut self, key: MeshKey, indices: &[u32]) -> Result<()> {
        self.resources.fill_mesh_indices(&mut self.device, key, indices)
    }

    // ===== TEXTURES =====

    pub fn create_texture_2d(&mut self, desc: &Texture2DDesc) -> Result<TextureKey> {
        let key = self.resources.create_texture_2d(&mut self.device, desc)?;
        self.track_created(ResourceKind::Texture);
        Ok(key)
    }

    pub fn create_texture_2d_with_pixels(&mut self, desc: &Texture2DDesc, pixels: &[u8]) -> Result<TextureKey> {
        let key = self.resources.create_texture_2d_with_pixels(&mut self.device, desc, pixels)?;
        self.track_created(ResourceKind::Texture);
        Ok(key)
    }

    pub fn create_texture_2d_array(&mut self, desc: &Texture2DArrayDesc) -> Result<TextureKey> {
        let key = self.resources.create_texture_2d_array(&mut self.device, desc)?;
        self.track_created(ResourceKind::Texture);
        Ok(key)
    }

    pub fn create_texture_2d_array_with_layers(
        &mut self,
        desc: &Texture2DArrayDesc,
        layers: &[&[u8]],
    ) -> Result<TextureKey> {
        let key = self.resources.create_texture_2d_array_with_layers(&mut self.device, desc, layers)?;
        self.track_created(ResourceKind::Texture);
        Ok(key)
    }

    pub fn replace_texture_2d(&mut self, key: TextureKey, desc: &Texture2DDesc) -> Result<()> {
        self.resources.replace_texture_2d(&mut self.device, key, desc)
    }

    pub fn replace_texture_2d_with_pixels(&mut self, key: TextureKey, desc: &Texture2DDesc, pixels: &[u8]) -> Result<()> {
        self.resources.replace_texture_2d_with_pixels(&mut self.device, key, desc, pixels)
    }

    pub fn replace_texture_2d_array(&mut self, key: TextureKey, desc: &Texture2DArrayDesc) -> Result<()> {
        self.resources.replace_texture_2d_array(&mut self.device, key, desc)
    }

    pub fn fill_texture(&mut self, key: TextureKey, fill: &TextureFill<'_>) -> Result<()> {
        self.resources.fill_texture(&mut self.device, key, fill)
    }

    pub fn fill_texture_regions(&mut self, key: TextureKey, fills: &[TextureFill<'_>]) -> Result<()> {
        self.resources.fill_texture_regions(&mut self.device, key, fills)
    }

    // ===== CUBEMAPS =====

    pub fn create_cubemap(&mut self, desc: &CubemapDesc) -> Result<CubemapKey> {
        let key = self.resources.create_cubemap(&mut self.device, desc)?;
        self.track_created(ResourceKind::Cubemap);
        Ok(key)
    }

    pub fn create_cubemap_with_faces(
        &mut self,
        desc: &CubemapDesc,
        faces: &[&[u8]; CUBEMAP_FACES as usize],
    ) -> Result<CubemapKey> {
        let key = self.resources.create_cubemap_with_faces(&mut self.device, desc, faces)?;
        self.track_created(ResourceKind::Cubemap);
        Ok(key)
    }

    pub fn replace_cubemap(&mut self, key: CubemapKey, desc: &CubemapDesc) -> Result<()> {
        self.resources.replace_cubemap(&mut self.device, key, desc)
    }

    pub fn replace_cubemap_with_faces(
        &mut self,
        key: CubemapKey,
        desc: &CubemapDesc,
        faces: &[&[u8]; CUBEMAP_FACES as usize],
    ) -> Result<()> {
        self.resources.replace_cubemap_with_faces(&mut self.device, key, desc, faces)
    }

    /// Fill one region of one face, the face being the fill's layer
    pub fn fill_cubemap(&mut self, key: CubemapKey, fill: &TextureFill<'_>) -> Result<()> {
        self.resources.fill_cubemap(&mut self.device, key, fill)
    }

    pub fn fill_cubemap_regions(&mut self, key: CubemapKey, fills: &[TextureFill<'_>]) -> Result<()> {
        fills.iter().try_for_each(|fill| self.fill_cubemap(key, fill))
    }

    // ===== MATERIALS =====

    pub fn create_material(&mut self, desc: &MaterialDesc) -> Result<MaterialKey> {
        let key = self.resources.create_material(&mut self.device, desc)?;
        self.track_created(ResourceKind::Material);
        Ok(key)
    }

    pub fn replace_material(&mut self, key: MaterialKey, desc: &MaterialDesc) -> Result<()> {
        self.resources.replace_material(&mut self.device, key, desc)
    }

    // ===== UNIFORM BUFFERS =====

    pub fn create_uniform_buffer(&mut self, usage: BufferUsage, data: &[u8]) -> Result<BufferKey> {
        let key = self.resources.create_uniform_buffer(&mut self.device, usage, data)?;
        self.track_created(ResourceKind::Buffer);
        Ok(key)
    }

    pub fn fill_uniform_buffer(&mut self, key: BufferKey, data: &[u8]) -> Result<()> {
        self.resources.fill_buffer(&mut self.device, key, data)
    }

    // ===== FRAME =====

    /// Start a frame
    ///
    /// Resets `context`, applies a pending resize and binds the swapchain
    /// when no render pass exists. Returns whether drawing is enabled.
    pub fn acquire(&mut self, context: &mut RenderContext) -> bool {
        context.reset();
        if let Some(sink) = self.statistics.as_mut() {
            sink.on_frame_reset();
        }

        if self.need_resize {
            self.swapchain.resize(&self.device);
            self.need_resize = false;
            let dimensions = self.swapchain.dimensions();
            glw_debug!("glw::GraphicsManager", "Swapchain resized to {}x{}", dimensions.x, dimensions.y);
        }

        if self.render_passes.count() == 0 {
            self.swapchain.bind(&mut self.device);
        }
        self.draw_enabled
    }

    /// Show the frame
    pub fn present(&mut self) -> Result<()> {
        self.device.swap_buffers()
    }

    // ===== COMMANDS =====

    /// Bind and clear a render pass
    ///
    /// An unknown key leaves the context idle.
    pub fn cmd_use_render_pass(&mut self, context: &mut RenderContext, key: RenderPassKey) -> Option<&RenderPass> {
        let found = match self.render_passes.get(key) {
            Some(pass) => {
                pass.bind(&mut self.device);
                true
            }
            None => false,
        };
        context.set_render_target(found.then_some(RenderTargetBinding::Pass(key)));
        self.track_command(context, "cmd_use_render_pass", found as u64);
        if found {
            self.render_passes.get(key)
        } else {
            None
        }
    }

    /// Bind the default framebuffer, letterboxing the last render pass
    pub fn cmd_use_swapchain(&mut self, context: &mut RenderContext) {
        context.set_render_target(Some(RenderTargetBinding::Swapchain));
        match self.render_passes.last() {
            Some((_, pass)) => {
                let dimensions = pass.dimensions();
                self.swapchain.bind_letterboxed(&mut self.device, dimensions);
            }
            None => self.swapchain.bind(&mut self.device),
        }
        self.track_command(context, "cmd_use_swapchain", 0);
    }

    fn cmd_toggle(&mut self, context: &RenderContext, capability: Capability, enabled: bool, name: &'static str) {
        if !context.is_in_use() {
            return;
        }
        self.device.set_capability(capability, enabled);
        self.track_command(context, name, enabled as u64);
    }

    pub fn cmd_toggle_face_culling(&mut self, context: &RenderContext, enabled: bool) {
        self.cmd_toggle(context, Capability::CullFace, enabled, "cmd_toggle_face_culling");
    }

    pub fn cmd_toggle_depth_test(&mut self, context: &RenderContext, enabled: bool) {
        self.cmd_toggle(context, Capability::DepthTest, enabled, "cmd_toggle_depth_test");
    }

    pub fn cmd_toggle_stencil_test(&mut self, context: &RenderContext, enabled: bool) {
        self.cmd_toggle(context, Capability::StencilTest, enabled, "cmd_toggle_stencil_test");
    }

    pub fn cmd_toggle_stencil_write(&mut self, context: &RenderContext, enabled: bool) {
        if !context.is_in_use() {
            return;
        }
        self.device.set_stencil_mask(if enabled { 0xFF } else { 0x00 });
        self.track_command(context, "cmd_toggle_stencil_write", enabled as u64);
    }

    /// Toggle writes to color attachment 0
    pub fn cmd_toggle_color_writes(&mut self, context: &RenderContext, enabled: bool) {
        self.cmd_toggle_attachment_color_writes(context, 0, enabled);
    }

    pub fn cmd_toggle_attachment_color_writes(&mut self, context: &RenderContext, attachment: u32, enabled: bool) {
        if !context.is_in_use() {
            return;
        }
        self.device.set_color_mask(attachment, enabled);
        self.track_command(context, "cmd_toggle_color_writes", ((attachment as u64) << 32) | enabled as u64);
    }

    pub fn cmd_set_viewport(&mut self, context: &RenderContext, viewport: Rect) {
        if !context.is_in_use() {
            return;
        }
        self.device.set_viewport(viewport);
        self.track_command(context, "cmd_set_viewport", 0);
    }

    /// Restrict drawing to `scissor`, enabling the scissor test
    pub fn cmd_set_scissor(&mut self, context: &RenderContext, scissor: Rect) {
        if !context.is_in_use() {
            return;
        }
        self.device.set_capability(Capability::ScissorTest, true);
        self.device.set_scissor(scissor);
        self.track_command(context, "cmd_set_scissor", 0);
    }

    pub fn cmd_clear_color(&mut self, context: &RenderContext, attachment: u32, color: Vec4) {
        if !context.is_in_use() {
            return;
        }
        self.device.clear_color_attachment(attachment, color);
        self.track_command(context, "cmd_clear_color", attachment as u64);
    }

    pub fn cmd_clear_depth(&mut self, context: &RenderContext, depth: f32) {
        if !context.is_in_use() {
            return;
        }
        self.device.clear_depth_attachment(depth);
        self.track_command(context, "cmd_clear_depth", depth.to_bits() as u64);
    }

    pub fn cmd_clear_stencil(&mut self, context: &RenderContext, stencil: u8) {
        if !context.is_in_use() {
            return;
        }
        self.device.clear_stencil_attachment(stencil as i32);
        self.track_command(context, "cmd_clear_stencil", stencil as u64);
    }

    /// Copy between render passes; returns false when idle or on failure
    pub fn cmd_blit(&mut self, context: &RenderContext, desc: &BlitDesc) -> bool {
        if !context.is_in_use() {
            return false;
        }
        let surface = self.swapchain.dimensions();
        let blitted = self.render_passes.blit(&mut self.device, desc, surface).is_ok();
        self.track_command(context, "cmd_blit", desc.mask.bits() as u64);
        blitted
    }

    /// Make a material's program current
    ///
    /// The returned handle sets uniforms and textures on it. An unknown key
    /// clears the context's material slot.
    pub fn cmd_use_material(&mut self, context: &mut RenderContext, key: MaterialKey) -> Option<BoundMaterial<'_>> {
        if !context.is_in_use() {
            return None;
        }
        let exists = self.resources.material_exists(key);
        context.set_material(exists.then_some(key));
        self.track_command(context, "cmd_use_material", exists as u64);

        let material = self.resources.material(key)?;
        material.bind(&mut self.device);
        Some(BoundMaterial {
            material,
            device: &mut self.device,
            resources: &self.resources,
            render_passes: &self.render_passes,
        })
    }

    /// Bind a mesh; indexed drawing follows whether it has an index buffer
    pub fn cmd_use_mesh(&mut self, context: &mut RenderContext, key: MeshKey) -> Option<&Mesh> {
        if !context.is_in_use() {
            return None;
        }
        let use_index = match self.resources.mesh(key) {
            Some(mesh) => {
                mesh.bind(&mut self.device);
                context.set_mesh(Some(key), mesh.has_index());
                context.set_vertex_array(Some(mesh.vertex_array().id()));
                mesh.has_index()
            }
            None => {
                context.set_mesh(None, false);
                false
            }
        };
        let exists = context.mesh().is_some();
        self.track_command(context, "cmd_use_mesh", exists as u64 | ((use_index as u64) << 1));
        if exists {
            self.resources.mesh(key)
        } else {
            None
        }
    }

    /// Draw `count` vertices, or `count` indices for an indexed mesh
    ///
    /// Returns false without drawing unless a render target, a material and
    /// a mesh are bound, and for a zero count. The bound mesh is looked up
    /// again: a mesh replaced since `cmd_use_mesh` is rebound and drawn the
    /// way its new buffers require, a destroyed one refuses the draw.
    pub fn cmd_draw(&mut self, context: &RenderContext, count: u32) -> bool {
        if count == 0 || !context.can_draw() {
            return false;
        }
        let Some(mesh) = context.mesh().and_then(|key| self.resources.mesh(key)) else {
            return false;
        };
        let use_index = mesh.has_index();
        if context.vertex_array() != Some(mesh.vertex_array().id()) {
            glw_debug!("glw::GraphicsManager", "bound mesh was replaced, rebinding {}", mesh.vertex_array().id());
            mesh.bind(&mut self.device);
        }

        if use_index {
            self.device.draw_elements(count);
        } else {
            self.device.draw_arrays(count);
        }
        if let Some(sink) = self.statistics.as_mut() {
            let pass = context.render_pass().and_then(|key| self.render_passes.position(key));
            sink.on_draw(pass, count);
        }
        true
    }

    // ===== TEARDOWN =====

    /// Destroy every resource, then every render pass
    pub fn destroy(&mut self) {
        self.resources.destroy(&mut self.device);
        self.render_passes.destroy(&mut self.device);
        glw_info!("glw::GraphicsManager", "Destroyed");
    }

    // ===== ACCESSORS =====

    pub fn device(&self) -> &D { &self.device }

    pub fn device_mut(&mut self) -> &mut D { &mut self.device }

    pub fn resources(&self) -> &ResourceManager { &self.resources }

    pub fn render_passes(&self) -> &RenderPassManager { &self.render_passes }

    pub fn swapchain(&self) -> &Swapchain { &self.swapchain }

    pub fn surface_dimensions(&self) -> UVec2 { self.swapchain.dimensions() }

    pub fn render_pass(&self, key: RenderPassKey) -> Option<&RenderPass> { self.render_passes.get(key) }

    pub fn render_pass_mut(&mut self, key: RenderPassKey) -> Option<&mut RenderPass> { self.render_passes.get_mut(key) }

    pub fn render_pass_at(&self, position: usize) -> Option<RenderPassKey> { self.render_passes.handle_at(position) }

    pub fn render_pass_count(&self) -> usize { self.render_passes.count() }

    pub fn render_pass_exists(&self, key: RenderPassKey) -> bool { self.render_passes.exists(key) }

    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> { self.resources.mesh(key) }

    pub fn texture(&self, key: TextureKey) -> Option<&Texture> { self.resources.texture(key) }

    pub fn cubemap(&self, key: CubemapKey) -> Option<&Texture> { self.resources.cubemap(key) }

    pub fn material(&self, key: MaterialKey) -> Option<&Material> { self.resources.material(key) }

    pub fn uniform_buffer(&self, key: BufferKey) -> Option<&Buffer> { self.resources.buffer(key) }

    pub fn mesh_count(&self) -> usize { self.resources.mesh_count() }

    pub fn texture_count(&self) -> usize { self.resources.texture_count() }

    pub fn cubemap_count(&self) -> usize { self.resources.cubemap_count() }

    pub fn material_count(&self) -> usize { self.resources.material_count() }

    pub fn uniform_buffer_count(&self) -> usize { self.resources.buffer_count() }

    pub fn mesh_exists(&self, key: MeshKey) -> bool { self.resources.mesh_exists(key) }

    pub fn texture_exists(&self, key: TextureKey) -> bool { self.resources.texture_exists(key) }

    pub fn cubemap_exists(&self, key: CubemapKey) -> bool { self.resources.cubemap_exists(key) }

    pub fn material_exists(&self, key: MaterialKey) -> bool { self.resources.material_exists(key) }

    pub fn uniform_buffer_exists(&self, key: BufferKey) -> bool { self.resources.buffer_exists(key) }
}

#[cfg(test)]
#[path = "graphics_manager_tests.rs"]
mod tests;
