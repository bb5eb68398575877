/// Render target attachment: one image bound at one framebuffer attachment point.
///
/// The backing is chosen per attachment from its accessibility: targets
/// that will be read later (sampled by a material) get a texture, the
/// others a renderbuffer.

use glam::UVec2;

use crate::device::{AttachmentHandle, AttachmentPoint, GraphicsDevice, SampleCount, TextureFormat, TextureLayout};
use crate::error::Result;
use crate::render_pass::framebuffer::Framebuffer;
use crate::render_pass::renderbuffer::Renderbuffer;
use crate::resource::texture::{AttachmentTextureDesc, Texture};

// ===== RENDER TARGET DESC =====

/// Whether an attachment must stay readable after the pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accessibility {
    /// Only ever rendered to (and blitted from): renderbuffer backing
    #[default]
    RenderOnly,
    /// Sampled later by a material: texture backing
    Sampled,
}

/// Descriptor of one render target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetDesc {
    pub format: TextureFormat,
    pub layout: TextureLayout,
    pub samples: SampleCount,
    pub accessibility: Accessibility,
}

impl Default for RenderTargetDesc {
    fn default() -> Self {
        Self {
            format: TextureFormat::Rgba,
            layout: TextureLayout::Rgba8,
            samples: SampleCount::Single,
            accessibility: Accessibility::RenderOnly,
        }
    }
}

impl RenderTargetDesc {
    pub fn color(format: TextureFormat, layout: TextureLayout) -> Self {
        Self {
            format,
            layout,
            ..Self::default()
        }
    }

    pub fn sampled(mut self) -> Self {
        self.accessibility = Accessibility::Sampled;
        self
    }

    pub fn with_samples(mut self, samples: SampleCount) -> Self {
        self.samples = samples;
        self
    }
}

// ===== RENDER ATTACHMENT =====

#[derive(Debug)]
enum AttachmentBacking {
    Texture(Texture),
    Renderbuffer(Renderbuffer),
}

#[derive(Debug)]
pub struct RenderAttachment {
    backing: AttachmentBacking,
    point: AttachmentPoint,
    format: TextureFormat,
    layout: TextureLayout,
}

impl RenderAttachment {
    /// Allocate the image for `desc` and bind it at `point` of `framebuffer`
    ///
    /// Depth and stencil attachments get a depth/stencil layout even when a
    /// color layout was requested.
    pub(crate) fn create(
        device: &mut dyn GraphicsDevice,
        framebuffer: &Framebuffer,
        desc: &RenderTargetDesc,
        dimensions: UVec2,
        point: AttachmentPoint,
    ) -> Result<Self> {
        let layout = desc.layout.resolve_for(desc.format);
        let backing = match desc.accessibility {
            Accessibility::Sampled => AttachmentBacking::Texture(Texture::create_attachment(
                device,
                &AttachmentTextureDesc {
                    format: desc.format,
                    layout,
                    samples: desc.samples,
                    dimensions,
                },
            )?),
            Accessibility::RenderOnly => AttachmentBacking::Renderbuffer(Renderbuffer::create(
                device,
                layout,
                desc.samples,
                dimensions,
            )?),
        };

        let attachment = Self {
            backing,
            point,
            format: desc.format,
            layout,
        };
        framebuffer.attach(device, point, attachment.handle());
        Ok(attachment)
    }

    pub(crate) fn destroy(self, device: &mut dyn GraphicsDevice) {
        match self.backing {
            AttachmentBacking::Texture(texture) => texture.destroy(device),
            AttachmentBacking::Renderbuffer(renderbuffer) => renderbuffer.destroy(device),
        }
    }

    /// Native image bound at the attachment point
    pub fn handle(&self) -> AttachmentHandle {
        match &self.backing {
            AttachmentBacking::Texture(texture) => AttachmentHandle::Texture(texture.id()),
            AttachmentBacking::Renderbuffer(renderbuffer) => AttachmentHandle::Renderbuffer(renderbuffer.id()),
        }
    }

    /// Backing texture, when the attachment is sampled
    pub fn texture(&self) -> Option<&Texture> {
        match &self.backing {
            AttachmentBacking::Texture(texture) => Some(texture),
            AttachmentBacking::Renderbuffer(_) => None,
        }
    }

    pub fn point(&self) -> AttachmentPoint { self.point }

    pub fn format(&self) -> TextureFormat { self.format }

    pub fn layout(&self) -> TextureLayout { self.layout }
}
