pub mod color_blend;
pub mod framebuffer;
pub mod render_attachment;
#[allow(clippy::module_inception)]
pub mod render_pass;
pub mod render_pass_manager;
pub mod renderbuffer;
pub mod target_manager;

pub use color_blend::ColorBlendDesc;
pub use framebuffer::Framebuffer;
pub use render_attachment::{Accessibility, RenderAttachment, RenderTargetDesc};
pub use render_pass::{RenderPass, RenderPassDesc, DEFAULT_DIMENSIONS, DEFAULT_REFRESH};
pub use render_pass_manager::{clamp_region, BlitDesc, RenderPassKey, RenderPassManager};
pub use renderbuffer::Renderbuffer;
pub use target_manager::{DepthTargetDesc, RenderPassTargetDesc, RenderTargetManager, StencilTargetDesc};
