//! Pixel formats, storage layouts and sample counts

/// Channel interpretation of a texture (the "format")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureFormat {
    /// No format: a texture with this format is never valid
    #[default]
    None,
    Red,
    Rg,
    Rgb,
    Bgr,
    Rgba,
    Bgra,
    Srgb,
    SrgbAlpha,
    Depth,
    Stencil,
    DepthStencil,
}

impl TextureFormat {
    /// Number of components in one pixel of client data
    pub fn channel_count(self) -> usize {
        match self {
            TextureFormat::None => 0,
            TextureFormat::Red | TextureFormat::Depth | TextureFormat::Stencil => 1,
            TextureFormat::Rg | TextureFormat::DepthStencil => 2,
            TextureFormat::Rgb | TextureFormat::Bgr | TextureFormat::Srgb => 3,
            TextureFormat::Rgba | TextureFormat::Bgra | TextureFormat::SrgbAlpha => 4,
        }
    }

    pub fn is_depth(self) -> bool {
        matches!(self, TextureFormat::Depth | TextureFormat::DepthStencil)
    }

    pub fn is_stencil(self) -> bool {
        matches!(self, TextureFormat::Stencil | TextureFormat::DepthStencil)
    }

    /// True for formats that must be bound to a color attachment point
    pub fn is_color(self) -> bool {
        !matches!(
            self,
            TextureFormat::None
                | TextureFormat::Depth
                | TextureFormat::Stencil
                | TextureFormat::DepthStencil
        )
    }
}

/// Internal storage layout of a texture or renderbuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureLayout {
    #[default]
    Rgba8,
    R8,
    R16,
    Rg8,
    Rg16,
    Rg16F,
    Rgb8,
    Rgb16F,
    Rgb32F,
    Rgba16F,
    Rgba32F,
    Srgb8,
    Srgb8Alpha8,
    Depth24,
    Depth32F,
    Stencil8,
    Depth24Stencil8,
}

impl TextureLayout {
    pub fn is_depth_or_stencil(self) -> bool {
        matches!(
            self,
            TextureLayout::Depth24
                | TextureLayout::Depth32F
                | TextureLayout::Stencil8
                | TextureLayout::Depth24Stencil8
        )
    }

    /// Layout actually allocated for a render target of `format`
    ///
    /// Depth and stencil targets cannot use a color layout. When the
    /// requested layout does not fit the format, the closest depth/stencil
    /// layout is substituted. Color targets keep the requested layout.
    pub fn resolve_for(self, format: TextureFormat) -> TextureLayout {
        match format {
            TextureFormat::DepthStencil => TextureLayout::Depth24Stencil8,
            TextureFormat::Depth => match self {
                TextureLayout::Depth24 | TextureLayout::Depth32F => self,
                _ => TextureLayout::Depth24,
            },
            TextureFormat::Stencil => TextureLayout::Stencil8,
            _ => self,
        }
    }
}

/// Component type of client pixel data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelType {
    #[default]
    UnsignedByte,
    UnsignedShort,
    HalfFloat,
    Float,
    UnsignedInt,
    /// Packed 24-bit depth + 8-bit stencil, one 32-bit word per pixel
    UnsignedInt248,
}

impl PixelType {
    /// Size in bytes of one pixel of `format` in this component type
    pub fn bytes_per_pixel(self, format: TextureFormat) -> usize {
        let component = match self {
            PixelType::UnsignedByte => 1,
            PixelType::UnsignedShort | PixelType::HalfFloat => 2,
            PixelType::Float | PixelType::UnsignedInt => 4,
            PixelType::UnsignedInt248 => return 4,
        };
        component * format.channel_count()
    }
}

/// Multisample count of a texture or renderbuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SampleCount {
    #[default]
    Single,
    X2,
    X4,
    X8,
    X16,
}

impl SampleCount {
    /// Number of samples per pixel (1 when not multisampled)
    pub fn count(self) -> u32 {
        match self {
            SampleCount::Single => 1,
            SampleCount::X2 => 2,
            SampleCount::X4 => 4,
            SampleCount::X8 => 8,
            SampleCount::X16 => 16,
        }
    }

    pub fn is_multisampled(self) -> bool {
        self != SampleCount::Single
    }
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
