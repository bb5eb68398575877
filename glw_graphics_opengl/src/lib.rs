/*!
# GLW Graphics - OpenGL backend

[`OpenGlDevice`] implements `glw_graphics::glw::device::GraphicsDevice` on
top of a [`glow`] context (OpenGL 4.3 or newer).

The application owns windowing: it creates the context, wraps it in a
`glow::Context` and provides a [`GlSurface`] for presentation.

```no_run
use glw_graphics::glw::{GraphicsManager, context::GraphicsConfig};
use glw_graphics_opengl::{GlSurface, OpenGlDevice};

fn start<S: GlSurface>(gl: glow::Context, surface: S) -> glw_graphics::Result<()> {
    let device = OpenGlDevice::new(gl, surface)?;
    let mut graphics = GraphicsManager::new(device, &GraphicsConfig::default())?;
    graphics.destroy();
    Ok(())
}
```

Enable the `debug-output` feature to route driver debug messages into the
glw logger.
*/

mod debug;
mod opengl_device;
mod opengl_format;

pub use debug::{
    debug_output_stats, init_debug_output, on_debug_message, print_debug_output_report,
    DebugOutputStats,
};
pub use opengl_device::{GlSurface, OpenGlDevice, MIN_GL_VERSION};
