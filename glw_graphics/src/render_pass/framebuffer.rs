/// Framebuffer object collecting the attachments of one render pass.

use crate::device::{AttachmentHandle, AttachmentPoint, FramebufferId, GraphicsDevice};
use crate::error::Result;
use crate::glw_bail;

#[derive(Debug)]
pub struct Framebuffer {
    id: FramebufferId,
    color_count: u32,
}

impl Framebuffer {
    pub(crate) fn create(device: &mut dyn GraphicsDevice) -> Result<Self> {
        Ok(Self {
            id: device.create_framebuffer()?,
            color_count: 0,
        })
    }

    pub(crate) fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.bind_framebuffer(Some(self.id));
    }

    pub(crate) fn attach(&self, device: &mut dyn GraphicsDevice, point: AttachmentPoint, image: AttachmentHandle) {
        device.attach(self.id, point, image);
    }

    /// Route fragment outputs to COLOR0..COLOR(color_count - 1)
    pub(crate) fn link(&mut self, device: &mut dyn GraphicsDevice, color_count: u32) {
        device.set_draw_buffers(self.id, color_count);
        self.color_count = color_count;
    }

    pub(crate) fn check_complete(&self, device: &mut dyn GraphicsDevice) -> Result<()> {
        if !device.is_framebuffer_complete(self.id) {
            glw_bail!(CreationFailed, "glw::Framebuffer", "{} is incomplete", self.id);
        }
        Ok(())
    }

    pub(crate) fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_framebuffer(self.id);
    }

    pub fn id(&self) -> FramebufferId {
        self.id
    }

    /// Number of linked draw buffers
    pub fn color_count(&self) -> u32 {
        self.color_count
    }
}
