pub mod graphics_config;
pub mod render_context;
pub mod statistics;
pub mod swapchain;

pub use graphics_config::{BackendConfig, DebugConfig, ExtrasConfig, FaceCullingConfig, GraphicsConfig};
pub use render_context::{RenderContext, RenderContextState, RenderTargetBinding};
pub use statistics::{DebugTracker, DrawMetadata, FrameStatisticsSink, PassTrace, TrackedCommand};
pub use swapchain::{letterbox, Swapchain, SWAPCHAIN_REFRESH};
