/// Driver buffer object (vertex, index or uniform data).
///
/// A Buffer owns exactly one driver buffer name. Meshes own their vertex
/// and index buffers; standalone uniform buffers live in the resource
/// manager and are referenced by materials at bind time.

use bytemuck::Pod;

use crate::device::{BufferId, BufferKind, BufferUsage, GraphicsDevice};
use crate::error::Result;
use crate::glw_bail;

// ===== BUFFER DESC =====

/// Descriptor for creating a Buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferDesc {
    pub kind: BufferKind,
    pub usage: BufferUsage,
}

// ===== BUFFER =====

#[derive(Debug)]
pub struct Buffer {
    id: BufferId,
    kind: BufferKind,
    usage: BufferUsage,
    size: usize,
}

impl Buffer {
    /// Create an empty buffer
    pub(crate) fn create(device: &mut dyn GraphicsDevice, desc: &BufferDesc) -> Result<Self> {
        let id = device.create_buffer()?;
        Ok(Self {
            id,
            kind: desc.kind,
            usage: desc.usage,
            size: 0,
        })
    }

    /// Create a buffer and upload `data` into it
    ///
    /// # Errors
    ///
    /// Fails when `data` is empty or the driver refuses the buffer. Nothing
    /// is left allocated on failure.
    pub(crate) fn create_with_data(
        device: &mut dyn GraphicsDevice,
        desc: &BufferDesc,
        data: &[u8],
    ) -> Result<Self> {
        if data.is_empty() {
            glw_bail!(CreationFailed, "glw::Buffer", "{:?} buffer created with no data", desc.kind);
        }
        let mut buffer = Self::create(device, desc)?;
        buffer.upload(device, data);
        Ok(buffer)
    }

    /// Replace the buffer contents
    ///
    /// # Errors
    ///
    /// Returns `CreationFailed` when `data` is empty; the previous contents
    /// are kept.
    pub fn fill(&mut self, device: &mut dyn GraphicsDevice, data: &[u8]) -> Result<()> {
        if data.is_empty() {
            glw_bail!(CreationFailed, "glw::Buffer", "cannot fill {} with zero bytes", self.id);
        }
        self.upload(device, data);
        Ok(())
    }

    /// Replace the buffer contents with a slice of plain-old-data values
    pub fn fill_pod<T: Pod>(&mut self, device: &mut dyn GraphicsDevice, values: &[T]) -> Result<()> {
        self.fill(device, bytemuck::cast_slice(values))
    }

    fn upload(&mut self, device: &mut dyn GraphicsDevice, data: &[u8]) {
        device.upload_buffer(self.id, self.usage, data);
        self.size = data.len();
    }

    pub(crate) fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.bind_buffer(self.kind, Some(self.id));
    }

    pub(crate) fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_buffer(self.id);
    }

    // ===== ACCESSORS =====

    pub fn id(&self) -> BufferId { self.id }

    pub fn kind(&self) -> BufferKind { self.kind }

    pub fn usage(&self) -> BufferUsage { self.usage }

    /// Size in bytes of the last upload
    pub fn size(&self) -> usize { self.size }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
