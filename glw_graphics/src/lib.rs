/*!
# GLW Graphics

Object layer over an OpenGL-style immediate-mode graphics driver.

Every native call goes through the [`glw::device::GraphicsDevice`] trait, so
the policy in this crate (render target composition, the render context
gate, resource ownership and rollback) runs unchanged on any backend.
The `glw_graphics_opengl` crate provides the OpenGL implementation.

## Architecture

- **GraphicsManager**: frame facade (`acquire`, `cmd_*`, `present`)
- **ResourceManager**: meshes, textures, cubemaps, materials, uniform buffers
- **RenderPassManager**: framebuffers with their color/depth/stencil targets
- **RenderContext**: per-frame cursor deciding whether a draw is legal
- **FrameStatisticsSink**: optional per-frame command and draw recording

Resources are addressed by generation-checked keys; a key outliving its
resource is rejected instead of aliasing a newer one.
*/

mod error;
mod graphics_manager;
pub mod context;
pub mod device;
pub mod log;
pub mod render_pass;
pub mod resource;

// Main glw namespace module
pub mod glw {
    pub use crate::error::{Error, Result};

    pub use crate::graphics_manager::{BoundMaterial, GraphicsManager};

    // Logging types (the glw_* macros live at the crate root)
    pub mod log {
        pub use crate::log::{reset_logger, set_logger, DefaultLogger, LogEntry, LogSeverity, Logger};
    }

    // Driver seam: GraphicsDevice trait, native ids, formats, state
    pub mod device {
        pub use crate::device::*;
    }

    // Render passes, targets and blits
    pub mod render {
        pub use crate::render_pass::*;
    }

    pub mod resource {
        pub use crate::resource::*;
    }

    // Frame context, configuration, swapchain and statistics
    pub mod context {
        pub use crate::context::*;
    }
}

pub use error::{Error, Result};

// Re-export math library at crate root
pub use glam;
