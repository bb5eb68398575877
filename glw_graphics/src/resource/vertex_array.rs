/// Vertex array object: captures attribute layout and the index buffer binding.

use crate::device::{GraphicsDevice, VertexArrayId, VertexAttribute};
use crate::error::Result;
use crate::glw_warn;

#[derive(Debug)]
pub struct VertexArray {
    id: VertexArrayId,
}

impl VertexArray {
    pub(crate) fn create(device: &mut dyn GraphicsDevice) -> Result<Self> {
        Ok(Self {
            id: device.create_vertex_array()?,
        })
    }

    pub(crate) fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.bind_vertex_array(Some(self.id));
    }

    pub(crate) fn unbind(device: &mut dyn GraphicsDevice) {
        device.bind_vertex_array(None);
    }

    /// Describe `attributes` from the vertex buffer currently bound
    ///
    /// The vertex array must be bound. Attributes whose component count is
    /// outside 1..=4 are skipped with a warning. Returns how many were linked.
    pub(crate) fn link_attributes(
        &self,
        device: &mut dyn GraphicsDevice,
        attributes: &[VertexAttribute],
    ) -> usize {
        let mut linked = 0;
        for attribute in attributes {
            if !attribute.is_linkable() {
                glw_warn!(
                    "glw::VertexArray",
                    "skipping attribute {} with {} components",
                    attribute.location,
                    attribute.size
                );
                continue;
            }
            device.enable_vertex_attribute(attribute);
            linked += 1;
        }
        linked
    }

    pub(crate) fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_vertex_array(self.id);
    }

    pub fn id(&self) -> VertexArrayId {
        self.id
    }
}
