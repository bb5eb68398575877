/// Texture resource.
///
/// One struct covers every texture variant; the variant set is closed, so
/// creation dispatches on [`TextureKind`] instead of going through a trait.
/// A texture is valid once created: its format is never `None` and it
/// always owns a driver texture name.

use glam::UVec2;

use crate::device::{
    DepthStencilSampling, GraphicsDevice, SampleCount, TextureFill, TextureFormat, TextureId, TextureLayout,
    TextureSampling, TextureStorage, TextureTarget,
};
use crate::error::Result;
use crate::{glw_bail, glw_debug};

/// Number of faces of a cubemap
pub const CUBEMAP_FACES: u32 = 6;

// ===== TEXTURE KIND =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Texture2D,
    Texture2DArray,
    Cubemap,
    /// Sampled image backing a render pass attachment
    RenderAttachment,
}

// ===== TEXTURE DESCS =====

/// Descriptor for creating a 2D texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture2DDesc {
    pub format: TextureFormat,
    pub layout: TextureLayout,
    pub width: u32,
    pub height: u32,
    /// Mipmap level count (0 is treated as 1)
    pub levels: u32,
    pub sampling: TextureSampling,
}

impl Default for Texture2DDesc {
    fn default() -> Self {
        Self {
            format: TextureFormat::Rgba,
            layout: TextureLayout::Rgba8,
            width: 0,
            height: 0,
            levels: 1,
            sampling: TextureSampling::default(),
        }
    }
}

impl Texture2DDesc {
    pub fn new(format: TextureFormat, width: u32, height: u32) -> Self {
        Self {
            format,
            width,
            height,
            ..Self::default()
        }
    }
}

/// Descriptor for creating a 2D array texture
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texture2DArrayDesc {
    pub format: TextureFormat,
    pub layout: TextureLayout,
    pub width: u32,
    pub height: u32,
    pub layers: u32,
    pub levels: u32,
    pub sampling: TextureSampling,
}

impl Default for Texture2DArrayDesc {
    fn default() -> Self {
        Self {
            format: TextureFormat::Rgba,
            layout: TextureLayout::Rgba8,
            width: 0,
            height: 0,
            layers: 1,
            levels: 1,
            sampling: TextureSampling::default(),
        }
    }
}

/// Descriptor for creating a cubemap (six square-ish faces of the same size)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubemapDesc {
    pub format: TextureFormat,
    pub layout: TextureLayout,
    pub width: u32,
    pub height: u32,
    pub levels: u32,
    pub sampling: TextureSampling,
}

impl Default for CubemapDesc {
    fn default() -> Self {
        Self {
            format: TextureFormat::Rgba,
            layout: TextureLayout::Rgba8,
            width: 0,
            height: 0,
            levels: 1,
            sampling: TextureSampling::default(),
        }
    }
}

/// Storage request for a render attachment texture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct AttachmentTextureDesc {
    pub format: TextureFormat,
    pub layout: TextureLayout,
    pub samples: SampleCount,
    pub dimensions: UVec2,
}

// ===== TEXTURE =====

#[derive(Debug)]
pub struct Texture {
    id: TextureId,
    kind: TextureKind,
    target: TextureTarget,
    format: TextureFormat,
    layout: TextureLayout,
    width: u32,
    height: u32,
    layers: u32,
    levels: u32,
    samples: SampleCount,
}

impl Texture {
    pub(crate) fn create_2d(device: &mut dyn GraphicsDevice, desc: &Texture2DDesc) -> Result<Self> {
        Self::create(
            device,
            TextureKind::Texture2D,
            desc.format,
            TextureStorage {
                target: TextureTarget::Texture2D,
                layout: desc.layout,
                width: desc.width,
                height: desc.height,
                layers: 1,
                levels: desc.levels.max(1),
                samples: SampleCount::Single,
            },
            Some(&desc.sampling),
        )
    }

    pub(crate) fn create_2d_array(
        device: &mut dyn GraphicsDevice,
        desc: &Texture2DArrayDesc,
    ) -> Result<Self> {
        Self::create(
            device,
            TextureKind::Texture2DArray,
            desc.format,
            TextureStorage {
                target: TextureTarget::Texture2DArray,
                layout: desc.layout,
                width: desc.width,
                height: desc.height,
                layers: desc.layers,
                levels: desc.levels.max(1),
                samples: SampleCount::Single,
            },
            Some(&desc.sampling),
        )
    }

    pub(crate) fn create_cubemap(device: &mut dyn GraphicsDevice, desc: &CubemapDesc) -> Result<Self> {
        Self::create(
            device,
            TextureKind::Cubemap,
            desc.format,
            TextureStorage {
                target: TextureTarget::Cubemap,
                layout: desc.layout,
                width: desc.width,
                height: desc.height,
                layers: CUBEMAP_FACES,
                levels: desc.levels.max(1),
                samples: SampleCount::Single,
            },
            Some(&desc.sampling),
        )
    }

    /// Sampled texture used as a render pass attachment
    ///
    /// Multisampled attachments cannot carry sampler state; single-sampled
    /// ones get nearest filtering with edge clamping.
    pub(crate) fn create_attachment(
        device: &mut dyn GraphicsDevice,
        desc: &AttachmentTextureDesc,
    ) -> Result<Self> {
        let multisampled = desc.samples.is_multisampled();
        let target = if multisampled {
            TextureTarget::Texture2DMultisample
        } else {
            TextureTarget::Texture2D
        };
        let sampling = TextureSampling::nearest_clamped();
        Self::create(
            device,
            TextureKind::RenderAttachment,
            desc.format,
            TextureStorage {
                target,
                layout: desc.layout,
                width: desc.dimensions.x,
                height: desc.dimensions.y,
                layers: 1,
                levels: 1,
                samples: desc.samples,
            },
            (!multisampled).then_some(&sampling),
        )
    }

    fn create(
        device: &mut dyn GraphicsDevice,
        kind: TextureKind,
        format: TextureFormat,
        storage: TextureStorage,
        sampling: Option<&TextureSampling>,
    ) -> Result<Self> {
        // ========== VALIDATION ==========
        if format == TextureFormat::None {
            glw_bail!(CreationFailed, "glw::Texture", "{:?} texture has no format", kind);
        }
        if storage.width == 0 || storage.height == 0 {
            glw_bail!(
                CreationFailed,
                "glw::Texture",
                "{:?} texture has a zero dimension ({}x{})",
                kind,
                storage.width,
                storage.height
            );
        }
        if storage.layers == 0 {
            glw_bail!(CreationFailed, "glw::Texture", "{:?} texture has zero layers", kind);
        }

        // ========== CREATE ==========
        let id = device.create_texture(&storage)?;
        if let Some(sampling) = sampling {
            device.set_texture_sampling(id, storage.target, sampling);
        }

        glw_debug!(
            "glw::Texture",
            "{:?} {} created: {}x{}x{} {:?}/{:?}",
            kind,
            id,
            storage.width,
            storage.height,
            storage.layers,
            format,
            storage.layout
        );

        Ok(Self {
            id,
            kind,
            target: storage.target,
            format,
            layout: storage.layout,
            width: storage.width,
            height: storage.height,
            layers: storage.layers,
            levels: storage.levels,
            samples: storage.samples,
        })
    }

    /// Upload pixels into a region of the texture
    ///
    /// # Errors
    ///
    /// Rejects empty regions, regions outside the bounds of their mip level
    /// or the layer range, pixel slices shorter than the region, and render
    /// attachments (they are written by drawing, not uploads).
    pub fn fill(&self, device: &mut dyn GraphicsDevice, fill: &TextureFill<'_>) -> Result<()> {
        // ========== VALIDATION ==========
        if self.kind == TextureKind::RenderAttachment {
            glw_bail!(InvalidReference, "glw::Texture", "{} is a render attachment and cannot be filled", self.id);
        }
        if fill.width == 0 || fill.height == 0 {
            glw_bail!(CreationFailed, "glw::Texture", "fill region of {} is empty", self.id);
        }
        if fill.level >= self.levels {
            glw_bail!(CreationFailed, "glw::Texture", "level {} out of range for {}", fill.level, self.id);
        }
        let level_width = self.width.checked_shr(fill.level).unwrap_or(0).max(1);
        let level_height = self.height.checked_shr(fill.level).unwrap_or(0).max(1);
        let exceeds = |offset: u32, extent: u32, size: u32| offset.checked_add(extent).map_or(true, |end| end > size);
        if exceeds(fill.x, fill.width, level_width) || exceeds(fill.y, fill.height, level_height) {
            glw_bail!(
                CreationFailed,
                "glw::Texture",
                "fill region {}x{} at ({}, {}) exceeds level {} of {} ({}x{})",
                fill.width,
                fill.height,
                fill.x,
                fill.y,
                fill.level,
                self.id,
                level_width,
                level_height
            );
        }
        if self.kind != TextureKind::Texture2D && fill.layer >= self.layers {
            glw_bail!(CreationFailed, "glw::Texture", "layer {} out of range for {}", fill.layer, self.id);
        }
        let expected = fill.expected_len(self.format);
        if fill.pixels.len() < expected {
            glw_bail!(
                CreationFailed,
                "glw::Texture",
                "fill of {} needs {} bytes, got {}",
                self.id,
                expected,
                fill.pixels.len()
            );
        }

        device.upload_texture(self.id, self.target, self.format, fill);
        Ok(())
    }

    /// Upload several regions, stopping at the first rejected one
    pub fn fill_all(&self, device: &mut dyn GraphicsDevice, fills: &[TextureFill<'_>]) -> Result<()> {
        for fill in fills {
            self.fill(device, fill)?;
        }
        Ok(())
    }

    /// Upload one full level-0 image per layer (or per cubemap face)
    pub fn fill_layers(&self, device: &mut dyn GraphicsDevice, layers: &[&[u8]]) -> Result<()> {
        if layers.len() as u32 != self.layers {
            glw_bail!(
                CreationFailed,
                "glw::Texture",
                "{} expects {} layer payloads, got {}",
                self.id,
                self.layers,
                layers.len()
            );
        }
        for (layer, pixels) in layers.iter().enumerate() {
            let fill = TextureFill::full(self.width, self.height, pixels).with_layer(layer as u32);
            self.fill(device, &fill)?;
        }
        Ok(())
    }

    /// Bind on texture unit `unit` for sampling
    ///
    /// Depth/stencil-format textures select which component is sampled.
    pub(crate) fn bind_unit(&self, device: &mut dyn GraphicsDevice, unit: u32) {
        device.bind_texture_unit(unit, self.target, self.id, self.depth_stencil_sampling());
    }

    pub(crate) fn depth_stencil_sampling(&self) -> Option<DepthStencilSampling> {
        match self.format {
            TextureFormat::Depth | TextureFormat::DepthStencil => Some(DepthStencilSampling::Depth),
            TextureFormat::Stencil => Some(DepthStencilSampling::Stencil),
            _ => None,
        }
    }

    pub(crate) fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_texture(self.id);
    }

    // ===== ACCESSORS =====

    pub fn id(&self) -> TextureId { self.id }

    pub fn kind(&self) -> TextureKind { self.kind }

    pub fn target(&self) -> TextureTarget { self.target }

    pub fn format(&self) -> TextureFormat { self.format }

    pub fn layout(&self) -> TextureLayout { self.layout }

    pub fn width(&self) -> u32 { self.width }

    pub fn height(&self) -> u32 { self.height }

    pub fn dimensions(&self) -> UVec2 { UVec2::new(self.width, self.height) }

    pub fn layers(&self) -> u32 { self.layers }

    pub fn levels(&self) -> u32 { self.levels }

    pub fn samples(&self) -> SampleCount { self.samples }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
