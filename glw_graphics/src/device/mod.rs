//! Driver seam: the GraphicsDevice trait, native ids, formats and the
//! plain-data state descriptions passed through it.

pub mod format;
pub mod graphics_device;
pub mod handle;
pub mod state;

#[cfg(test)]
pub mod mock_graphics_device;

pub use format::*;
pub use graphics_device::*;
pub use handle::*;
pub use state::*;
