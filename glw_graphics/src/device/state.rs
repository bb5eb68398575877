//! Plain-data descriptions of driver state shared by the device trait,
//! the resources and the render passes.

use bitflags::bitflags;
use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use super::format::{SampleCount, TextureLayout};

// ============================================================================
// Buffers and vertex layout
// ============================================================================

/// Binding point a buffer is created for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferKind {
    #[default]
    Vertex,
    Index,
    Uniform,
}

/// Update frequency hint for buffer storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BufferUsage {
    #[default]
    Static,
    Dynamic,
    Stream,
}

/// Component type of a vertex attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentType {
    #[default]
    Float,
    Int,
    UnsignedInt,
}

/// One vertex attribute inside an interleaved vertex buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub location: u32,
    /// Component count, 1..=4
    pub size: u32,
    pub component: ComponentType,
    /// Only meaningful for float attributes fed from integer data
    pub normalized: bool,
    /// Byte distance between consecutive vertices
    pub stride: u32,
    /// Byte offset of the first component inside a vertex
    pub offset: u32,
}

impl VertexAttribute {
    /// Tightly described float attribute
    pub fn float(location: u32, size: u32, stride: u32, offset: u32) -> Self {
        Self {
            location,
            size,
            component: ComponentType::Float,
            normalized: false,
            stride,
            offset,
        }
    }

    /// Attributes with a component count outside 1..=4 are never linked
    pub fn is_linkable(&self) -> bool {
        (1..=4).contains(&self.size)
    }
}

// ============================================================================
// Textures
// ============================================================================

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    Texture2D,
    Texture2DMultisample,
    Texture2DArray,
    Cubemap,
}

/// Immutable storage allocated when a texture is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureStorage {
    pub target: TextureTarget,
    pub layout: TextureLayout,
    pub width: u32,
    pub height: u32,
    /// Array layers (1 for plain 2D textures, 6 implied for cubemaps)
    pub layers: u32,
    /// Mipmap level count, at least 1
    pub levels: u32,
    pub samples: SampleCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    Nearest,
    #[default]
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wrap {
    #[default]
    ClampToEdge,
    ClampToBorder,
    Repeat,
    MirroredRepeat,
}

/// Filtering and wrapping applied to a sampled texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureSampling {
    pub min_filter: Filter,
    pub mag_filter: Filter,
    pub wrap_r: Wrap,
    pub wrap_s: Wrap,
    pub wrap_t: Wrap,
}

impl TextureSampling {
    /// Nearest filtering with edge clamping (render attachments)
    pub fn nearest_clamped() -> Self {
        Self {
            min_filter: Filter::Nearest,
            mag_filter: Filter::Nearest,
            ..Self::default()
        }
    }
}

/// How a depth-stencil texture is read when sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepthStencilSampling {
    Depth,
    Stencil,
}

// ============================================================================
// Shaders
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Geometry,
}

/// Value written to a uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        UniformValue::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat3> for UniformValue {
    fn from(value: Mat3) -> Self {
        UniformValue::Mat3(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

// ============================================================================
// Framebuffers
// ============================================================================

/// Framebuffer attachment point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentPoint {
    /// COLOR0 + n
    Color(u32),
    Depth,
    Stencil,
    DepthStencil,
}

bitflags! {
    /// Buffers affected by a clear or a blit
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

/// Filter used when a blit rescales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlitFilter {
    #[default]
    Nearest,
    Linear,
}

/// Integer rectangle in window or framebuffer coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle anchored at the origin
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }
}

// ============================================================================
// Fixed-function state
// ============================================================================

/// Driver capability switched with enable/disable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    DepthTest,
    StencilTest,
    Blend,
    CullFace,
    Multisample,
    FramebufferSrgb,
    ScissorTest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompareFunction {
    Never,
    #[default]
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StencilOp {
    #[default]
    Keep,
    Zero,
    Replace,
    Increment,
    IncrementWrap,
    Decrement,
    DecrementWrap,
    Invert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilFace {
    Front,
    Back,
}

/// Stencil comparison for one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StencilFunction {
    pub function: CompareFunction,
    pub reference: i32,
    pub mask: u32,
}

impl Default for StencilFunction {
    fn default() -> Self {
        Self {
            function: CompareFunction::Always,
            reference: 0,
            mask: 0xFF,
        }
    }
}

/// Stencil update actions for one face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StencilOperation {
    pub stencil_fail: StencilOp,
    pub depth_fail: StencilOp,
    pub pass: StencilOp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    ConstantAlpha,
    OneMinusConstantAlpha,
    SrcAlphaSaturate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlendEquation {
    #[default]
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Separate color/alpha blend factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendFunction {
    pub source_color: BlendFactor,
    pub destination_color: BlendFactor,
    pub source_alpha: BlendFactor,
    pub destination_alpha: BlendFactor,
}

impl Default for BlendFunction {
    /// Classic "over" alpha blending
    fn default() -> Self {
        Self {
            source_color: BlendFactor::SrcAlpha,
            destination_color: BlendFactor::OneMinusSrcAlpha,
            source_alpha: BlendFactor::One,
            destination_alpha: BlendFactor::OneMinusSrcAlpha,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullFace {
    Front,
    #[default]
    Back,
    FrontAndBack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrontFace {
    Clockwise,
    #[default]
    CounterClockwise,
}
