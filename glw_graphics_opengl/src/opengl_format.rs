//! Conversions from glw state descriptions to OpenGL enums.
//!
//! Pure functions, no context required.

use glw_graphics::glw::device::{
    AttachmentPoint, BlendEquation, BlendFactor, BlitFilter, BufferKind, BufferUsage, Capability,
    ClearFlags, CompareFunction, ComponentType, CullFace, DepthStencilSampling, Filter, FrontFace,
    PixelType, ShaderStage, StencilFace, StencilOp, TextureFormat, TextureLayout, TextureTarget, Wrap,
};

pub(crate) fn buffer_kind_to_gl(kind: BufferKind) -> u32 {
    match kind {
        BufferKind::Vertex => glow::ARRAY_BUFFER,
        BufferKind::Index => glow::ELEMENT_ARRAY_BUFFER,
        BufferKind::Uniform => glow::UNIFORM_BUFFER,
    }
}

pub(crate) fn buffer_usage_to_gl(usage: BufferUsage) -> u32 {
    match usage {
        BufferUsage::Static => glow::STATIC_DRAW,
        BufferUsage::Dynamic => glow::DYNAMIC_DRAW,
        BufferUsage::Stream => glow::STREAM_DRAW,
    }
}

pub(crate) fn component_type_to_gl(component: ComponentType) -> u32 {
    match component {
        ComponentType::Float => glow::FLOAT,
        ComponentType::Int => glow::INT,
        ComponentType::UnsignedInt => glow::UNSIGNED_INT,
    }
}

// ===== TEXTURES =====

pub(crate) fn texture_target_to_gl(target: TextureTarget) -> u32 {
    match target {
        TextureTarget::Texture2D => glow::TEXTURE_2D,
        TextureTarget::Texture2DMultisample => glow::TEXTURE_2D_MULTISAMPLE,
        TextureTarget::Texture2DArray => glow::TEXTURE_2D_ARRAY,
        TextureTarget::Cubemap => glow::TEXTURE_CUBE_MAP,
    }
}

/// Upload target of cubemap face `face` (0..6, +X -X +Y -Y +Z -Z)
pub(crate) fn cubemap_face_to_gl(face: u32) -> u32 {
    glow::TEXTURE_CUBE_MAP_POSITIVE_X + face
}

/// Sized internal format used for storage allocation
pub(crate) fn texture_layout_to_gl(layout: TextureLayout) -> u32 {
    match layout {
        TextureLayout::R8 => glow::R8,
        TextureLayout::R16 => glow::R16,
        TextureLayout::Rg8 => glow::RG8,
        TextureLayout::Rg16 => glow::RG16,
        TextureLayout::Rg16F => glow::RG16F,
        TextureLayout::Rgb8 => glow::RGB8,
        TextureLayout::Rgb16F => glow::RGB16F,
        TextureLayout::Rgb32F => glow::RGB32F,
        TextureLayout::Rgba8 => glow::RGBA8,
        TextureLayout::Rgba16F => glow::RGBA16F,
        TextureLayout::Rgba32F => glow::RGBA32F,
        TextureLayout::Srgb8 => glow::SRGB8,
        TextureLayout::Srgb8Alpha8 => glow::SRGB8_ALPHA8,
        TextureLayout::Depth24 => glow::DEPTH_COMPONENT24,
        TextureLayout::Depth32F => glow::DEPTH_COMPONENT32F,
        TextureLayout::Stencil8 => glow::STENCIL_INDEX8,
        TextureLayout::Depth24Stencil8 => glow::DEPTH24_STENCIL8,
    }
}

/// Client pixel format of uploaded data
pub(crate) fn texture_format_to_gl(format: TextureFormat) -> u32 {
    match format {
        TextureFormat::None => glow::NONE,
        TextureFormat::Red => glow::RED,
        TextureFormat::Rg => glow::RG,
        TextureFormat::Rgb | TextureFormat::Srgb => glow::RGB,
        TextureFormat::Bgr => glow::BGR,
        TextureFormat::Rgba | TextureFormat::SrgbAlpha => glow::RGBA,
        TextureFormat::Bgra => glow::BGRA,
        TextureFormat::Depth => glow::DEPTH_COMPONENT,
        TextureFormat::Stencil => glow::STENCIL_INDEX,
        TextureFormat::DepthStencil => glow::DEPTH_STENCIL,
    }
}

pub(crate) fn pixel_type_to_gl(pixel_type: PixelType) -> u32 {
    match pixel_type {
        PixelType::UnsignedByte => glow::UNSIGNED_BYTE,
        PixelType::UnsignedShort => glow::UNSIGNED_SHORT,
        PixelType::HalfFloat => glow::HALF_FLOAT,
        PixelType::Float => glow::FLOAT,
        PixelType::UnsignedInt => glow::UNSIGNED_INT,
        PixelType::UnsignedInt248 => glow::UNSIGNED_INT_24_8,
    }
}

pub(crate) fn filter_to_gl(filter: Filter) -> i32 {
    let value = match filter {
        Filter::Nearest => glow::NEAREST,
        Filter::Linear => glow::LINEAR,
        Filter::NearestMipmapNearest => glow::NEAREST_MIPMAP_NEAREST,
        Filter::LinearMipmapNearest => glow::LINEAR_MIPMAP_NEAREST,
        Filter::NearestMipmapLinear => glow::NEAREST_MIPMAP_LINEAR,
        Filter::LinearMipmapLinear => glow::LINEAR_MIPMAP_LINEAR,
    };
    value as i32
}

pub(crate) fn wrap_to_gl(wrap: Wrap) -> i32 {
    let value = match wrap {
        Wrap::ClampToEdge => glow::CLAMP_TO_EDGE,
        Wrap::ClampToBorder => glow::CLAMP_TO_BORDER,
        Wrap::Repeat => glow::REPEAT,
        Wrap::MirroredRepeat => glow::MIRRORED_REPEAT,
    };
    value as i32
}

pub(crate) fn depth_stencil_sampling_to_gl(sampling: DepthStencilSampling) -> i32 {
    let value = match sampling {
        DepthStencilSampling::Depth => glow::DEPTH_COMPONENT,
        DepthStencilSampling::Stencil => glow::STENCIL_INDEX,
    };
    value as i32
}

// ===== FRAMEBUFFERS =====

pub(crate) fn attachment_point_to_gl(point: AttachmentPoint) -> u32 {
    match point {
        AttachmentPoint::Color(index) => glow::COLOR_ATTACHMENT0 + index,
        AttachmentPoint::Depth => glow::DEPTH_ATTACHMENT,
        AttachmentPoint::Stencil => glow::STENCIL_ATTACHMENT,
        AttachmentPoint::DepthStencil => glow::DEPTH_STENCIL_ATTACHMENT,
    }
}

pub(crate) fn clear_flags_to_gl(flags: ClearFlags) -> u32 {
    let mut mask = 0;
    if flags.contains(ClearFlags::COLOR) {
        mask |= glow::COLOR_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::DEPTH) {
        mask |= glow::DEPTH_BUFFER_BIT;
    }
    if flags.contains(ClearFlags::STENCIL) {
        mask |= glow::STENCIL_BUFFER_BIT;
    }
    mask
}

pub(crate) fn blit_filter_to_gl(filter: BlitFilter) -> u32 {
    match filter {
        BlitFilter::Nearest => glow::NEAREST,
        BlitFilter::Linear => glow::LINEAR,
    }
}

pub(crate) fn shader_stage_to_gl(stage: ShaderStage) -> u32 {
    match stage {
        ShaderStage::Vertex => glow::VERTEX_SHADER,
        ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        ShaderStage::Geometry => glow::GEOMETRY_SHADER,
    }
}

// ===== FIXED FUNCTION STATE =====

pub(crate) fn capability_to_gl(capability: Capability) -> u32 {
    match capability {
        Capability::DepthTest => glow::DEPTH_TEST,
        Capability::StencilTest => glow::STENCIL_TEST,
        Capability::Blend => glow::BLEND,
        Capability::CullFace => glow::CULL_FACE,
        Capability::Multisample => glow::MULTISAMPLE,
        Capability::FramebufferSrgb => glow::FRAMEBUFFER_SRGB,
        Capability::ScissorTest => glow::SCISSOR_TEST,
    }
}

pub(crate) fn compare_function_to_gl(function: CompareFunction) -> u32 {
    match function {
        CompareFunction::Never => glow::NEVER,
        CompareFunction::Less => glow::LESS,
        CompareFunction::Equal => glow::EQUAL,
        CompareFunction::LessEqual => glow::LEQUAL,
        CompareFunction::Greater => glow::GREATER,
        CompareFunction::NotEqual => glow::NOTEQUAL,
        CompareFunction::GreaterEqual => glow::GEQUAL,
        CompareFunction::Always => glow::ALWAYS,
    }
}

pub(crate) fn stencil_op_to_gl(op: StencilOp) -> u32 {
    match op {
        StencilOp::Keep => glow::KEEP,
        StencilOp::Zero => glow::ZERO,
        StencilOp::Replace => glow::REPLACE,
        StencilOp::Increment => glow::INCR,
        StencilOp::IncrementWrap => glow::INCR_WRAP,
        StencilOp::Decrement => glow::DECR,
        StencilOp::DecrementWrap => glow::DECR_WRAP,
        StencilOp::Invert => glow::INVERT,
    }
}

pub(crate) fn stencil_face_to_gl(face: StencilFace) -> u32 {
    match face {
        StencilFace::Front => glow::FRONT,
        StencilFace::Back => glow::BACK,
    }
}

pub(crate) fn blend_factor_to_gl(factor: BlendFactor) -> u32 {
    match factor {
        BlendFactor::Zero => glow::ZERO,
        BlendFactor::One => glow::ONE,
        BlendFactor::SrcColor => glow::SRC_COLOR,
        BlendFactor::OneMinusSrcColor => glow::ONE_MINUS_SRC_COLOR,
        BlendFactor::DstColor => glow::DST_COLOR,
        BlendFactor::OneMinusDstColor => glow::ONE_MINUS_DST_COLOR,
        BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
        BlendFactor::DstAlpha => glow::DST_ALPHA,
        BlendFactor::OneMinusDstAlpha => glow::ONE_MINUS_DST_ALPHA,
        BlendFactor::ConstantColor => glow::CONSTANT_COLOR,
        BlendFactor::OneMinusConstantColor => glow::ONE_MINUS_CONSTANT_COLOR,
        BlendFactor::ConstantAlpha => glow::CONSTANT_ALPHA,
        BlendFactor::OneMinusConstantAlpha => glow::ONE_MINUS_CONSTANT_ALPHA,
        BlendFactor::SrcAlphaSaturate => glow::SRC_ALPHA_SATURATE,
    }
}

pub(crate) fn blend_equation_to_gl(equation: BlendEquation) -> u32 {
    match equation {
        BlendEquation::Add => glow::FUNC_ADD,
        BlendEquation::Subtract => glow::FUNC_SUBTRACT,
        BlendEquation::ReverseSubtract => glow::FUNC_REVERSE_SUBTRACT,
        BlendEquation::Min => glow::MIN,
        BlendEquation::Max => glow::MAX,
    }
}

pub(crate) fn cull_face_to_gl(face: CullFace) -> u32 {
    match face {
        CullFace::Front => glow::FRONT,
        CullFace::Back => glow::BACK,
        CullFace::FrontAndBack => glow::FRONT_AND_BACK,
    }
}

pub(crate) fn front_face_to_gl(front: FrontFace) -> u32 {
    match front {
        FrontFace::Clockwise => glow::CW,
        FrontFace::CounterClockwise => glow::CCW,
    }
}

#[cfg(test)]
#[path = "opengl_format_tests.rs"]
mod tests;
