/// Render target composition for one render pass.
///
/// Color targets are bound at sequential color attachment points in the
/// order they are described. When both depth and stencil are requested a
/// single depth-stencil image is allocated and bound once at the combined
/// attachment point; the stencil target then reports that same image.
/// Clear flags accumulate only for targets that were actually allocated.
///
/// Composition is all-or-nothing: if any allocation fails, every target
/// created so far is destroyed before the error is returned.

use glam::UVec2;

use crate::device::{
    AttachmentHandle, AttachmentPoint, Capability, ClearFlags, CompareFunction, GraphicsDevice,
    StencilFace, StencilFunction, StencilOperation, TextureFormat, TextureLayout,
};
use crate::error::Result;
use crate::render_pass::framebuffer::Framebuffer;
use crate::render_pass::render_attachment::{RenderAttachment, RenderTargetDesc};
use crate::resource::texture::Texture;
use crate::{glw_bail, glw_trace, glw_warn};

// ===== DEPTH / STENCIL DESCS =====

/// Depth target and the depth test it drives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthTargetDesc {
    pub target: RenderTargetDesc,
    pub function: CompareFunction,
    /// Depth range; both ends are clamped to 0.0..=1.0
    pub near: f32,
    pub far: f32,
    /// Value written by the per-pass clear
    pub clear_depth: f32,
}

impl Default for DepthTargetDesc {
    fn default() -> Self {
        Self {
            target: RenderTargetDesc {
                format: TextureFormat::Depth,
                layout: TextureLayout::Depth24,
                ..RenderTargetDesc::default()
            },
            function: CompareFunction::Less,
            near: 0.0,
            far: 1.0,
            clear_depth: 1.0,
        }
    }
}

/// Stencil target and the per-face stencil test it drives
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StencilTargetDesc {
    pub target: RenderTargetDesc,
    pub front_function: StencilFunction,
    pub back_function: StencilFunction,
    pub front_operation: StencilOperation,
    pub back_operation: StencilOperation,
    /// Value written by the per-pass clear
    pub clear_stencil: i32,
}

impl Default for StencilTargetDesc {
    fn default() -> Self {
        Self {
            target: RenderTargetDesc {
                format: TextureFormat::Stencil,
                layout: TextureLayout::Stencil8,
                ..RenderTargetDesc::default()
            },
            front_function: StencilFunction::default(),
            back_function: StencilFunction::default(),
            front_operation: StencilOperation::default(),
            back_operation: StencilOperation::default(),
            clear_stencil: 0,
        }
    }
}

/// Every target of a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderPassTargetDesc {
    pub colors: Vec<RenderTargetDesc>,
    pub depth: Option<DepthTargetDesc>,
    pub stencil: Option<StencilTargetDesc>,
}

impl Default for RenderPassTargetDesc {
    /// One RGBA8 color target, no depth, no stencil
    fn default() -> Self {
        Self {
            colors: vec![RenderTargetDesc::default()],
            depth: None,
            stencil: None,
        }
    }
}

impl RenderPassTargetDesc {
    pub fn with_depth(mut self, depth: DepthTargetDesc) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_stencil(mut self, stencil: StencilTargetDesc) -> Self {
        self.stencil = Some(stencil);
        self
    }
}

// ===== TARGETS =====

#[derive(Debug)]
struct DepthTarget {
    attachment: RenderAttachment,
    desc: DepthTargetDesc,
}

#[derive(Debug)]
enum StencilBacking {
    Own(RenderAttachment),
    /// Stored in the depth target's combined depth-stencil image
    SharedWithDepth,
}

#[derive(Debug)]
struct StencilTarget {
    backing: StencilBacking,
    desc: StencilTargetDesc,
}

// ===== RENDER TARGET MANAGER =====

#[derive(Debug, Default)]
pub struct RenderTargetManager {
    colors: Vec<RenderAttachment>,
    depth: Option<DepthTarget>,
    stencil: Option<StencilTarget>,
    clear_flags: ClearFlags,
}

/// Force `format` on a depth or stencil target, substituting a layout that fits it
fn resolve_target(target: &RenderTargetDesc, format: TextureFormat) -> RenderTargetDesc {
    let layout = target.layout.resolve_for(format);
    if layout != target.layout {
        glw_warn!(
            "glw::RenderTargetManager",
            "{:?} layout cannot back a {:?} target, using {:?}",
            target.layout,
            format,
            layout
        );
    }
    RenderTargetDesc {
        format,
        layout,
        ..*target
    }
}

impl RenderTargetManager {
    /// Allocate and attach every target of `desc` into `framebuffer`
    pub(crate) fn create(
        device: &mut dyn GraphicsDevice,
        framebuffer: &Framebuffer,
        desc: &RenderPassTargetDesc,
        dimensions: UVec2,
    ) -> Result<Self> {
        let mut targets = Self::default();
        if let Err(err) = targets.compose(device, framebuffer, desc, dimensions) {
            targets.destroy(device);
            return Err(err);
        }
        Ok(targets)
    }

    fn compose(
        &mut self,
        device: &mut dyn GraphicsDevice,
        framebuffer: &Framebuffer,
        desc: &RenderPassTargetDesc,
        dimensions: UVec2,
    ) -> Result<()> {
        // ========== COLORS ==========
        for (index, color) in desc.colors.iter().enumerate() {
            if !color.format.is_color() {
                glw_bail!(
                    CreationFailed,
                    "glw::RenderTargetManager",
                    "color target {} has non-color format {:?}",
                    index,
                    color.format
                );
            }
            let attachment = RenderAttachment::create(
                device,
                framebuffer,
                color,
                dimensions,
                AttachmentPoint::Color(index as u32),
            )?;
            self.colors.push(attachment);
        }
        if !self.colors.is_empty() {
            self.clear_flags |= ClearFlags::COLOR;
        }

        // ========== DEPTH / STENCIL ==========
        match (&desc.depth, &desc.stencil) {
            (Some(depth), Some(stencil)) => {
                let combined = RenderTargetDesc {
                    format: TextureFormat::DepthStencil,
                    layout: TextureLayout::Depth24Stencil8,
                    ..depth.target
                };
                let attachment = RenderAttachment::create(
                    device,
                    framebuffer,
                    &combined,
                    dimensions,
                    AttachmentPoint::DepthStencil,
                )?;
                self.depth = Some(DepthTarget {
                    attachment,
                    desc: *depth,
                });
                self.stencil = Some(StencilTarget {
                    backing: StencilBacking::SharedWithDepth,
                    desc: *stencil,
                });
                self.clear_flags |= ClearFlags::DEPTH | ClearFlags::STENCIL;
            }
            (Some(depth), None) => {
                let target = resolve_target(&depth.target, TextureFormat::Depth);
                let attachment =
                    RenderAttachment::create(device, framebuffer, &target, dimensions, AttachmentPoint::Depth)?;
                self.depth = Some(DepthTarget {
                    attachment,
                    desc: *depth,
                });
                self.clear_flags |= ClearFlags::DEPTH;
            }
            (None, Some(stencil)) => {
                let target = resolve_target(&stencil.target, TextureFormat::Stencil);
                let attachment =
                    RenderAttachment::create(device, framebuffer, &target, dimensions, AttachmentPoint::Stencil)?;
                self.stencil = Some(StencilTarget {
                    backing: StencilBacking::Own(attachment),
                    desc: *stencil,
                });
                self.clear_flags |= ClearFlags::STENCIL;
            }
            (None, None) => {}
        }

        glw_trace!(
            "glw::RenderTargetManager",
            "{} color targets, depth: {}, stencil: {}, clear flags {:?}",
            self.colors.len(),
            self.depth.is_some(),
            self.stencil.is_some(),
            self.clear_flags
        );
        Ok(())
    }

    /// Apply the depth and stencil state of this pass
    pub(crate) fn apply(&self, device: &mut dyn GraphicsDevice) {
        match &self.depth {
            Some(depth) => {
                device.set_capability(Capability::DepthTest, true);
                device.set_depth_mask(true);
                device.set_depth_function(depth.desc.function);
                device.set_depth_range(depth.desc.near.clamp(0.0, 1.0), depth.desc.far.clamp(0.0, 1.0));
                device.set_clear_depth(depth.desc.clear_depth);
            }
            None => device.set_capability(Capability::DepthTest, false),
        }

        match &self.stencil {
            Some(stencil) => {
                device.set_capability(Capability::StencilTest, true);
                device.set_stencil_mask(0xFF);
                device.set_stencil_function(StencilFace::Front, &stencil.desc.front_function);
                device.set_stencil_function(StencilFace::Back, &stencil.desc.back_function);
                device.set_stencil_operation(StencilFace::Front, &stencil.desc.front_operation);
                device.set_stencil_operation(StencilFace::Back, &stencil.desc.back_operation);
                device.set_clear_stencil(stencil.desc.clear_stencil);
            }
            None => {
                device.set_capability(Capability::StencilTest, false);
                device.set_stencil_mask(0);
            }
        }
    }

    pub(crate) fn destroy(&mut self, device: &mut dyn GraphicsDevice) {
        for color in self.colors.drain(..) {
            color.destroy(device);
        }
        if let Some(depth) = self.depth.take() {
            depth.attachment.destroy(device);
        }
        if let Some(stencil) = self.stencil.take() {
            if let StencilBacking::Own(attachment) = stencil.backing {
                attachment.destroy(device);
            }
        }
        self.clear_flags = ClearFlags::empty();
    }

    // ===== ACCESSORS =====

    pub fn color_count(&self) -> usize {
        self.colors.len()
    }

    pub fn color(&self, index: usize) -> Option<&RenderAttachment> {
        self.colors.get(index)
    }

    pub fn color_handle(&self, index: usize) -> Option<AttachmentHandle> {
        self.colors.get(index).map(RenderAttachment::handle)
    }

    pub fn depth_handle(&self) -> Option<AttachmentHandle> {
        self.depth.as_ref().map(|depth| depth.attachment.handle())
    }

    /// Stencil image; the depth image when depth and stencil are combined
    pub fn stencil_handle(&self) -> Option<AttachmentHandle> {
        let stencil = self.stencil.as_ref()?;
        match &stencil.backing {
            StencilBacking::Own(attachment) => Some(attachment.handle()),
            StencilBacking::SharedWithDepth => self.depth_handle(),
        }
    }

    pub fn depth_texture(&self) -> Option<&Texture> {
        self.depth.as_ref().and_then(|depth| depth.attachment.texture())
    }

    pub fn stencil_texture(&self) -> Option<&Texture> {
        let stencil = self.stencil.as_ref()?;
        match &stencil.backing {
            StencilBacking::Own(attachment) => attachment.texture(),
            StencilBacking::SharedWithDepth => self.depth_texture(),
        }
    }

    pub fn has_depth(&self) -> bool {
        self.depth.is_some()
    }

    pub fn has_stencil(&self) -> bool {
        self.stencil.is_some()
    }

    /// True when depth and stencil live in one combined image
    pub fn is_depth_stencil_combined(&self) -> bool {
        matches!(
            self.stencil,
            Some(StencilTarget {
                backing: StencilBacking::SharedWithDepth,
                ..
            })
        )
    }

    pub fn clear_flags(&self) -> ClearFlags {
        self.clear_flags
    }
}

#[cfg(test)]
#[path = "target_manager_tests.rs"]
mod tests;
