/// Mesh resource: vertex array + vertex buffer + optional index buffer.
///
/// A mesh "has index" exactly when it owns an index buffer. Drawing a mesh
/// without one falls back to array drawing.

use bytemuck::Pod;

use crate::device::{BufferKind, BufferUsage, GraphicsDevice, VertexAttribute};
use crate::error::Result;
use crate::resource::buffer::{Buffer, BufferDesc};
use crate::resource::vertex_array::VertexArray;
use crate::{glw_bail, glw_debug};

// ===== MESH DESC =====

/// Descriptor for creating a Mesh
#[derive(Debug, Clone, Default)]
pub struct MeshDesc {
    /// Interleaved vertex data
    pub vertices: Vec<u8>,
    /// 32-bit indices; empty for non-indexed meshes
    pub indices: Vec<u32>,
    pub attributes: Vec<VertexAttribute>,
    pub usage: BufferUsage,
}

impl MeshDesc {
    /// Build a descriptor from typed vertices
    pub fn from_vertices<V: Pod>(
        vertices: &[V],
        indices: Vec<u32>,
        attributes: Vec<VertexAttribute>,
    ) -> Self {
        Self {
            vertices: bytemuck::cast_slice(vertices).to_vec(),
            indices,
            attributes,
            usage: BufferUsage::Static,
        }
    }
}

// ===== MESH =====

#[derive(Debug)]
pub struct Mesh {
    vertex_array: VertexArray,
    vertex_buffer: Buffer,
    index_buffer: Option<Buffer>,
    index_count: u32,
    attributes: Vec<VertexAttribute>,
}

impl Mesh {
    /// Build a mesh from its descriptor
    ///
    /// Buffers are filled before the vertex array is bound, then the vertex
    /// array captures the attribute layout and the index buffer binding.
    ///
    /// # Errors
    ///
    /// Fails when the vertex data is empty or any driver object cannot be
    /// created. Objects created before the failure are released.
    pub(crate) fn from_desc(device: &mut dyn GraphicsDevice, desc: &MeshDesc) -> Result<Self> {
        // ========== VALIDATION ==========
        if desc.vertices.is_empty() {
            glw_bail!(CreationFailed, "glw::Mesh", "mesh has no vertex data");
        }

        // ========== BUFFERS ==========
        let vertex_desc = BufferDesc {
            kind: BufferKind::Vertex,
            usage: desc.usage,
        };
        let vertex_buffer = Buffer::create_with_data(device, &vertex_desc, &desc.vertices)?;

        let index_buffer = if desc.indices.is_empty() {
            None
        } else {
            let index_desc = BufferDesc {
                kind: BufferKind::Index,
                usage: desc.usage,
            };
            match Buffer::create_with_data(device, &index_desc, bytemuck::cast_slice(&desc.indices)) {
                Ok(buffer) => Some(buffer),
                Err(err) => {
                    vertex_buffer.destroy(device);
                    return Err(err);
                }
            }
        };

        // ========== VERTEX ARRAY ==========
        let vertex_array = match VertexArray::create(device) {
            Ok(vertex_array) => vertex_array,
            Err(err) => {
                vertex_buffer.destroy(device);
                if let Some(index_buffer) = index_buffer {
                    index_buffer.destroy(device);
                }
                return Err(err);
            }
        };

        vertex_array.bind(device);
        vertex_buffer.bind(device);
        let linked = vertex_array.link_attributes(device, &desc.attributes);
        if let Some(index_buffer) = &index_buffer {
            index_buffer.bind(device);
        }
        VertexArray::unbind(device);
        device.bind_buffer(BufferKind::Vertex, None);

        glw_debug!(
            "glw::Mesh",
            "mesh created: {} vertex bytes, {} indices, {}/{} attributes linked",
            desc.vertices.len(),
            desc.indices.len(),
            linked,
            desc.attributes.len()
        );

        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_buffer,
            index_count: desc.indices.len() as u32,
            attributes: desc.attributes.clone(),
        })
    }

    /// Re-upload the vertex data
    pub fn fill_vertices(&mut self, device: &mut dyn GraphicsDevice, vertices: &[u8]) -> Result<()> {
        self.vertex_buffer.fill(device, vertices)
    }

    /// Re-upload the index data
    ///
    /// # Errors
    ///
    /// Returns `InvalidReference` when the mesh was created without indices,
    /// `CreationFailed` when `indices` is empty.
    pub fn fill_indices(&mut self, device: &mut dyn GraphicsDevice, indices: &[u32]) -> Result<()> {
        let Some(index_buffer) = self.index_buffer.as_mut() else {
            glw_bail!(InvalidReference, "glw::Mesh", "mesh has no index buffer to fill");
        };
        index_buffer.fill_pod(device, indices)?;
        self.index_count = indices.len() as u32;
        Ok(())
    }

    /// Bind the vertex array for drawing
    pub(crate) fn bind(&self, device: &mut dyn GraphicsDevice) {
        self.vertex_array.bind(device);
    }

    pub(crate) fn destroy(self, device: &mut dyn GraphicsDevice) {
        self.vertex_array.destroy(device);
        self.vertex_buffer.destroy(device);
        if let Some(index_buffer) = self.index_buffer {
            index_buffer.destroy(device);
        }
    }

    // ===== ACCESSORS =====

    pub fn has_index(&self) -> bool { self.index_buffer.is_some() }

    pub fn index_count(&self) -> u32 { self.index_count }

    pub fn vertex_buffer(&self) -> &Buffer { &self.vertex_buffer }

    pub fn index_buffer(&self) -> Option<&Buffer> { self.index_buffer.as_ref() }

    pub fn vertex_array(&self) -> &VertexArray { &self.vertex_array }

    pub fn attributes(&self) -> &[VertexAttribute] { &self.attributes }
}

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
