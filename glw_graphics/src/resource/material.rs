/// Material resource: one linked shader program plus binding helpers.
///
/// Uniform names are resolved against the driver every time a setter is
/// called; nothing is cached across frames. Setters write into the
/// program currently in use, so a material must be bound (see
/// `GraphicsManager::cmd_use_material`) before its uniforms are set.

use crate::device::{
    BufferKind, GraphicsDevice, ProgramId, ShaderId, ShaderStage, UniformLocation, UniformValue,
};
use crate::error::Result;
use crate::resource::buffer::Buffer;
use crate::resource::texture::Texture;
use crate::{glw_bail, glw_debug, glw_err, glw_warn};

// ===== MATERIAL DESC =====

/// Shader sources of a material
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialDesc {
    pub vertex: String,
    pub fragment: String,
    pub geometry: Option<String>,
}

impl MaterialDesc {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fragment: fragment.into(),
            geometry: None,
        }
    }

    pub fn with_geometry(mut self, geometry: impl Into<String>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }
}

// ===== MATERIAL =====

#[derive(Debug)]
pub struct Material {
    program: ProgramId,
    has_geometry: bool,
}

impl Material {
    /// Compile and link the material's stages
    ///
    /// Intermediate shader objects are always deleted, whether linking
    /// succeeds or not.
    ///
    /// # Errors
    ///
    /// Fails when the vertex or fragment source is empty, or when any
    /// stage fails to compile or the program fails to link. The driver's
    /// diagnostics are logged at ERROR severity.
    pub(crate) fn from_desc(device: &mut dyn GraphicsDevice, desc: &MaterialDesc) -> Result<Self> {
        // ========== VALIDATION ==========
        if desc.vertex.trim().is_empty() || desc.fragment.trim().is_empty() {
            glw_bail!(CreationFailed, "glw::Material", "vertex and fragment sources are required");
        }

        // ========== COMPILE ==========
        let mut stages: Vec<(ShaderStage, &str)> = vec![
            (ShaderStage::Vertex, desc.vertex.as_str()),
            (ShaderStage::Fragment, desc.fragment.as_str()),
        ];
        if let Some(geometry) = &desc.geometry {
            stages.push((ShaderStage::Geometry, geometry.as_str()));
        }

        let mut shaders: Vec<ShaderId> = Vec::with_capacity(stages.len());
        for (stage, source) in stages {
            match device.compile_shader(stage, source) {
                Ok(shader) => shaders.push(shader),
                Err(err) => {
                    Self::delete_shaders(device, &shaders);
                    return Err(glw_err!(
                        CreationFailed,
                        "glw::Material",
                        "{:?} shader failed to compile: {}",
                        stage,
                        err
                    ));
                }
            }
        }

        // ========== LINK ==========
        let linked = device.link_program(&shaders);
        Self::delete_shaders(device, &shaders);
        let program = linked
            .map_err(|err| glw_err!(CreationFailed, "glw::Material", "program failed to link: {}", err))?;

        glw_debug!("glw::Material", "{} linked from {} stages", program, shaders.len());

        Ok(Self {
            program,
            has_geometry: desc.geometry.is_some(),
        })
    }

    fn delete_shaders(device: &mut dyn GraphicsDevice, shaders: &[ShaderId]) {
        for shader in shaders {
            device.delete_shader(*shader);
        }
    }

    /// Make this material's program current
    pub(crate) fn bind(&self, device: &mut dyn GraphicsDevice) {
        device.use_program(Some(self.program));
    }

    pub(crate) fn destroy(self, device: &mut dyn GraphicsDevice) {
        device.delete_program(self.program);
    }

    // ===== UNIFORMS =====

    pub fn uniform_location(&self, device: &mut dyn GraphicsDevice, name: &str) -> Option<UniformLocation> {
        device.uniform_location(self.program, name)
    }

    /// Write a uniform looked up by name
    ///
    /// Returns false (and writes nothing) when the program has no active
    /// uniform called `name`.
    pub fn set_uniform(
        &self,
        device: &mut dyn GraphicsDevice,
        name: &str,
        value: impl Into<UniformValue>,
    ) -> bool {
        match self.uniform_location(device, name) {
            Some(location) => {
                device.set_uniform(location, &value.into());
                true
            }
            None => {
                glw_warn!("glw::Material", "{} has no active uniform '{}'", self.program, name);
                false
            }
        }
    }

    /// Write a uniform at a location obtained from [`Material::uniform_location`]
    pub fn set_uniform_at(
        &self,
        device: &mut dyn GraphicsDevice,
        location: UniformLocation,
        value: impl Into<UniformValue>,
    ) {
        device.set_uniform(location, &value.into());
    }

    /// Attach a uniform buffer to the block called `block`
    ///
    /// Returns false when `buffer` is not a uniform buffer or the program
    /// has no such block.
    pub fn set_uniform_buffer(
        &self,
        device: &mut dyn GraphicsDevice,
        block: &str,
        binding: u32,
        buffer: &Buffer,
    ) -> bool {
        if buffer.kind() != BufferKind::Uniform {
            glw_warn!("glw::Material", "{} is a {:?} buffer, not a uniform buffer", buffer.id(), buffer.kind());
            return false;
        }
        let Some(block_index) = device.uniform_block_index(self.program, block) else {
            glw_warn!("glw::Material", "{} has no uniform block '{}'", self.program, block);
            return false;
        };
        device.bind_uniform_block(self.program, block_index, binding, buffer.id());
        true
    }

    /// Bind `texture` on texture unit `slot`
    pub fn set_texture(&self, device: &mut dyn GraphicsDevice, slot: u32, texture: &Texture) {
        texture.bind_unit(device, slot);
    }

    /// Bind `texture` on unit `slot` and point the sampler uniform `name` at it
    pub fn set_sampler(
        &self,
        device: &mut dyn GraphicsDevice,
        name: &str,
        slot: u32,
        texture: &Texture,
    ) -> bool {
        texture.bind_unit(device, slot);
        self.set_uniform(device, name, slot as i32)
    }

    // ===== ACCESSORS =====

    pub fn program(&self) -> ProgramId { self.program }

    pub fn has_geometry_stage(&self) -> bool { self.has_geometry }
}

#[cfg(test)]
#[path = "material_tests.rs"]
mod tests;
