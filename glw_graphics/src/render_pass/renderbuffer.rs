/// Non-sampled render target storage.

use glam::UVec2;

use crate::device::{GraphicsDevice, RenderbufferId, SampleCount, TextureLayout};
use crate::error::Result;

#[derive(Debug)]
pub struct Renderbuffer {
    id: RenderbufferId,
    layout: TextureLayout,
    samples: SampleCount,
    dimensions: UVec2,
}

impl Renderbuffer {
    pub(crate) fn create(
        device: &mut dyn GraphicsDevice,
        layout: TextureLayout,
        samples: SampleCount,
        dimensions: UVec2,
    ) -> Result<Self> {
        let id = device.create_renderbuffer(layout, samples, dimensions)?;
        Ok(Self {
            id,
            layout,
            samples,
            dimensions,
        })
    }

    pub(crate) fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_renderbuffer(self.id);
    }

    pub fn id(&self) -> RenderbufferId { self.id }

    pub fn layout(&self) -> TextureLayout { self.layout }

    pub fn samples(&self) -> SampleCount { self.samples }

    pub fn dimensions(&self) -> UVec2 { self.dimensions }
}
