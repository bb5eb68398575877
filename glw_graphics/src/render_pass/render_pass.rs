/// Render pass: one framebuffer, its targets, and the state used while
/// drawing into them.
///
/// `bind` makes the pass current: framebuffer, depth/stencil/blend state,
/// viewport and scissor covering the whole pass, color writes enabled,
/// then a clear of every buffer the pass allocated.

use glam::{UVec2, Vec4};

use crate::device::{AttachmentHandle, Capability, ClearFlags, FramebufferId, GraphicsDevice, Rect};
use crate::error::Result;
use crate::render_pass::color_blend::ColorBlendDesc;
use crate::render_pass::framebuffer::Framebuffer;
use crate::render_pass::target_manager::{RenderPassTargetDesc, RenderTargetManager};
use crate::resource::texture::Texture;
use crate::{glw_bail, glw_debug};

/// Default render pass size
pub const DEFAULT_DIMENSIONS: UVec2 = UVec2::new(1280, 720);

/// Default clear color
pub const DEFAULT_REFRESH: Vec4 = Vec4::new(1.0, 0.256, 0.512, 0.0);

// ===== RENDER PASS DESC =====

#[derive(Debug, Clone, PartialEq)]
pub struct RenderPassDesc {
    pub dimensions: UVec2,
    /// Clear color applied every time the pass is bound
    pub refresh: Vec4,
    pub targets: RenderPassTargetDesc,
    pub color_blend: ColorBlendDesc,
}

impl Default for RenderPassDesc {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS,
            refresh: DEFAULT_REFRESH,
            targets: RenderPassTargetDesc::default(),
            color_blend: ColorBlendDesc::default(),
        }
    }
}

impl RenderPassDesc {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            dimensions: UVec2::new(width, height),
            ..Self::default()
        }
    }

    pub fn with_targets(mut self, targets: RenderPassTargetDesc) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_refresh(mut self, refresh: Vec4) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_color_blend(mut self, color_blend: ColorBlendDesc) -> Self {
        self.color_blend = color_blend;
        self
    }
}

// ===== RENDER PASS =====

#[derive(Debug)]
pub struct RenderPass {
    framebuffer: Framebuffer,
    targets: RenderTargetManager,
    color_blend: ColorBlendDesc,
    dimensions: UVec2,
    refresh: Vec4,
}

impl RenderPass {
    /// Build the framebuffer and all of its targets
    ///
    /// # Errors
    ///
    /// Fails on a zero dimension, on any allocation failure and when the
    /// resulting framebuffer is incomplete. Everything allocated is
    /// released before the error is returned.
    pub(crate) fn from_desc(device: &mut dyn GraphicsDevice, desc: &RenderPassDesc) -> Result<Self> {
        // ========== VALIDATION ==========
        if desc.dimensions.x == 0 || desc.dimensions.y == 0 {
            glw_bail!(
                CreationFailed,
                "glw::RenderPass",
                "render pass has a zero dimension ({}x{})",
                desc.dimensions.x,
                desc.dimensions.y
            );
        }

        // ========== FRAMEBUFFER + TARGETS ==========
        let mut framebuffer = Framebuffer::create(device)?;
        let mut targets = match RenderTargetManager::create(device, &framebuffer, &desc.targets, desc.dimensions) {
            Ok(targets) => targets,
            Err(err) => {
                framebuffer.destroy(device);
                return Err(err);
            }
        };

        framebuffer.link(device, targets.color_count() as u32);
        if let Err(err) = framebuffer.check_complete(device) {
            targets.destroy(device);
            framebuffer.destroy(device);
            return Err(err);
        }
        device.bind_framebuffer(None);

        glw_debug!(
            "glw::RenderPass",
            "{} created: {}x{}, {} color targets, clear {:?}",
            framebuffer.id(),
            desc.dimensions.x,
            desc.dimensions.y,
            targets.color_count(),
            targets.clear_flags()
        );

        Ok(Self {
            framebuffer,
            targets,
            color_blend: desc.color_blend,
            dimensions: desc.dimensions,
            refresh: desc.refresh,
        })
    }

    /// Make the pass current and clear it
    pub(crate) fn bind(&self, device: &mut dyn GraphicsDevice) {
        self.framebuffer.bind(device);
        self.targets.apply(device);
        self.color_blend.apply(device);

        let full = Rect::from_size(self.dimensions.x, self.dimensions.y);
        device.set_viewport(full);
        device.set_scissor(full);
        device.set_capability(Capability::ScissorTest, false);

        for attachment in 0..self.targets.color_count() as u32 {
            device.set_color_mask(attachment, true);
        }
        device.set_clear_color(self.refresh);

        let clear_flags = self.targets.clear_flags();
        if !clear_flags.is_empty() {
            device.clear(clear_flags);
        }
    }

    pub(crate) fn destroy(mut self, device: &mut dyn GraphicsDevice) {
        self.targets.destroy(device);
        self.framebuffer.destroy(device);
    }

    // ===== ACCESSORS =====

    pub fn dimensions(&self) -> UVec2 { self.dimensions }

    pub fn refresh_color(&self) -> Vec4 { self.refresh }

    pub fn set_refresh_color(&mut self, refresh: Vec4) {
        self.refresh = refresh;
    }

    pub fn clear_flags(&self) -> ClearFlags { self.targets.clear_flags() }

    pub fn color_blend(&self) -> &ColorBlendDesc { &self.color_blend }

    pub fn framebuffer_id(&self) -> FramebufferId { self.framebuffer.id() }

    pub fn targets(&self) -> &RenderTargetManager { &self.targets }

    /// Number of color attachments
    pub fn attachment_count(&self) -> usize { self.targets.color_count() }

    pub fn color_attachment(&self, index: usize) -> Option<AttachmentHandle> {
        self.targets.color_handle(index)
    }

    pub fn depth_attachment(&self) -> Option<AttachmentHandle> {
        self.targets.depth_handle()
    }

    /// Same image as `depth_attachment` when depth and stencil are combined
    pub fn stencil_attachment(&self) -> Option<AttachmentHandle> {
        self.targets.stencil_handle()
    }

    /// Sampled texture of a color target, for binding into a material
    pub fn color_texture(&self, index: usize) -> Option<&Texture> {
        self.targets.color(index).and_then(|attachment| attachment.texture())
    }

    pub fn depth_texture(&self) -> Option<&Texture> {
        self.targets.depth_texture()
    }

    pub fn stencil_texture(&self) -> Option<&Texture> {
        self.targets.stencil_texture()
    }
}

#[cfg(test)]
#[path = "render_pass_tests.rs"]
mod tests;
