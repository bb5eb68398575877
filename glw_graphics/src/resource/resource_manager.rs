/// Resource manager: owns every mesh, texture, cubemap, material and
/// standalone uniform buffer created through the graphics manager.
///
/// Creation appends on success and leaves nothing behind on failure.
/// Replacement builds the new occupant first and only then destroys the
/// old one, so a failed replace keeps the previous resource valid.

use slotmap::{new_key_type, Key};

use crate::device::{BufferKind, BufferUsage, GraphicsDevice, TextureFill};
use crate::error::{Error, Result};
use crate::resource::buffer::{Buffer, BufferDesc};
use crate::resource::material::{Material, MaterialDesc};
use crate::resource::mesh::{Mesh, MeshDesc};
use crate::resource::resource_pool::ResourcePool;
use crate::resource::texture::{CubemapDesc, Texture, Texture2DArrayDesc, Texture2DDesc, CUBEMAP_FACES};
use crate::glw_err;

new_key_type! {
    /// Handle to a mesh owned by the resource manager
    pub struct MeshKey;
    /// Handle to a 2D or 2D-array texture owned by the resource manager
    pub struct TextureKey;
    /// Handle to a cubemap owned by the resource manager
    pub struct CubemapKey;
    /// Handle to a material owned by the resource manager
    pub struct MaterialKey;
    /// Handle to a standalone uniform buffer owned by the resource manager
    pub struct BufferKey;
}

/// Kind of resource, as reported to a statistics sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Mesh,
    Texture,
    Cubemap,
    Material,
    Buffer,
}

/// Teardown hook shared by every pooled resource
pub(crate) trait DeviceResource {
    fn destroy_with(self, device: &mut dyn GraphicsDevice);
}

impl DeviceResource for Mesh {
    fn destroy_with(self, device: &mut dyn GraphicsDevice) {
        self.destroy(device)
    }
}

impl DeviceResource for Texture {
    fn destroy_with(self, device: &mut dyn GraphicsDevice) {
        self.destroy(device)
    }
}

impl DeviceResource for Material {
    fn destroy_with(self, device: &mut dyn GraphicsDevice) {
        self.destroy(device)
    }
}

impl DeviceResource for Buffer {
    fn destroy_with(self, device: &mut dyn GraphicsDevice) {
        self.destroy(device)
    }
}

// ===== POOL HELPERS =====

fn stale(kind: ResourceKind, key: impl Key) -> Error {
    glw_err!(InvalidReference, "glw::ResourceManager", "{:?} handle {:?} does not exist", kind, key.data())
}

fn replace_in<K: Key, T: DeviceResource>(
    pool: &mut ResourcePool<K, T>,
    device: &mut dyn GraphicsDevice,
    kind: ResourceKind,
    key: K,
    create: impl FnOnce(&mut dyn GraphicsDevice) -> Result<T>,
) -> Result<()> {
    if !pool.contains(key) {
        return Err(stale(kind, key));
    }
    let replacement = create(&mut *device)?;
    match pool.replace(key, replacement) {
        Ok(previous) => {
            previous.destroy_with(device);
            Ok(())
        }
        Err(replacement) => {
            replacement.destroy_with(device);
            Err(stale(kind, key))
        }
    }
}

fn destroy_all<K: Key, T: DeviceResource>(pool: &mut ResourcePool<K, T>, device: &mut dyn GraphicsDevice) {
    for resource in pool.drain() {
        resource.destroy_with(device);
    }
}

/// Create a texture and upload initial data, releasing it if the upload is rejected
fn with_initial_data(
    device: &mut dyn GraphicsDevice,
    texture: Texture,
    upload: impl FnOnce(&Texture, &mut dyn GraphicsDevice) -> Result<()>,
) -> Result<Texture> {
    match upload(&texture, &mut *device) {
        Ok(()) => Ok(texture),
        Err(err) => {
            texture.destroy(device);
            Err(err)
        }
    }
}

// ===== RESOURCE MANAGER =====

#[derive(Default)]
pub struct ResourceManager {
    meshes: ResourcePool<MeshKey, Mesh>,
    textures: ResourcePool<TextureKey, Texture>,
    cubemaps: ResourcePool<CubemapKey, Texture>,
    materials: ResourcePool<MaterialKey, Material>,
    buffers: ResourcePool<BufferKey, Buffer>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== MESHES =====

    pub fn create_mesh(&mut self, device: &mut dyn GraphicsDevice, desc: &MeshDesc) -> Result<MeshKey> {
        let mesh = Mesh::from_desc(device, desc)?;
        Ok(self.meshes.insert(mesh))
    }

    pub fn replace_mesh(&mut self, device: &mut dyn GraphicsDevice, key: MeshKey, desc: &MeshDesc) -> Result<()> {
        replace_in(&mut self.meshes, device, ResourceKind::Mesh, key, |device| {
            Mesh::from_desc(device, desc)
        })
    }

    pub fn fill_mesh_vertices(&mut self, device: &mut dyn GraphicsDevice, key: MeshKey, vertices: &[u8]) -> Result<()> {
        let mesh = self.meshes.get_mut(key).ok_or_else(|| stale(ResourceKind::Mesh, key))?;
        mesh.fill_vertices(device, vertices)
    }

    pub fn fill_mesh_indices(&mut self, device: &mut dyn GraphicsDevice, key: MeshKey, indices: &[u32]) -> Result<()> {
        let mesh = self.meshes.get_mut(key).ok_or_else(|| stale(ResourceKind::Mesh, key))?;
        mesh.fill_indices(device, indices)
    }

    pub fn mesh(&self, key: MeshKey) -> Option<&Mesh> { self.meshes.get(key) }

    pub fn mesh_at(&self, position: usize) -> Option<MeshKey> { self.meshes.handle_at(position) }

    pub fn mesh_count(&self) -> usize { self.meshes.len() }

    pub fn mesh_exists(&self, key: MeshKey) -> bool { self.meshes.contains(key) }

    // ===== TEXTURES (2D AND 2D ARRAYS) =====

    pub fn create_texture_2d(&mut self, device: &mut dyn GraphicsDevice, desc: &Texture2DDesc) -> Result<TextureKey> {
        let texture = Texture::create_2d(device, desc)?;
        Ok(self.textures.insert(texture))
    }

    /// Create a 2D texture and upload its full level-0 image
    pub fn create_texture_2d_with_pixels(
        &mut self,
        device: &mut dyn GraphicsDevice,
        desc: &Texture2DDesc,
        pixels: &[u8],
    ) -> Result<TextureKey> {
        let texture = Texture::create_2d(device, desc)?;
        let texture = with_initial_data(device, texture, |texture, device| {
            texture.fill(device, &TextureFill::full(desc.width, desc.height, pixels))
        })?;
        Ok(self.textures.insert(texture))
    }

    pub fn create_texture_2d_array(
        &mut self,
        device: &mut dyn GraphicsDevice,
        desc: &Texture2DArrayDesc,
    ) -> Result<TextureKey> {
        let texture = Texture::create_2d_array(device, desc)?;
        Ok(self.textures.insert(texture))
    }

    /// Create a 2D array texture and upload one full image per layer
    pub fn create_texture_2d_array_with_layers(
        &mut self,
        device: &mut dyn GraphicsDevice,
        desc: &Texture2DArrayDesc,
        layers: &[&[u8]],
    ) -> Result<TextureKey> {
        let texture = Texture::create_2d_array(device, desc)?;
        let texture = with_initial_data(device, texture, |texture, device| {
            texture.fill_layers(device, layers)
        })?;
        Ok(self.textures.insert(texture))
    }

    pub fn replace_texture_2d(
        &mut self,
        device: &mut dyn GraphicsDevice,
        key: TextureKey,
        desc: &Texture2DDesc,
    ) -> Result<()> {
        replace_in(&mut self.textures, device, ResourceKind::Texture, key, |device| {
            Texture::create_2d(device, desc)
        })
    }

    pub fn replace_texture_2d_with_pixels(
        &mut self,
        device: &mut dyn GraphicsDevice,
        key: TextureKey,
        desc: &Texture2DDesc,
        pixels: &[u8],
    ) -> Result<()> {
        replace_in(&mut self.textures, device, ResourceKind::Texture, key, |device| {
            let texture = Texture::create_2d(device, desc)?;
            with_initial_data(device, texture, |texture, device| {
                texture.fill(device, &TextureFill::full(desc.width, desc.height, pixels))
            })
        })
    }

    pub fn replace_texture_2d_array(
        &mut self,
        device: &mut dyn GraphicsDevice,
        key: TextureKey,
        desc: &Texture2DArrayDesc,
    ) -> Result<()> {
        replace_in(&mut self.textures, device, ResourceKind::Texture, key, |device| {
            Texture::create_2d_array(device, desc)
        })
    }

    pub fn fill_texture(&self, device: &mut dyn GraphicsDevice, key: TextureKey, fill: &TextureFill<'_>) -> Result<()> {
        let texture = self.textures.get(key).ok_or_else(|| stale(ResourceKind::Texture, key))?;
        texture.fill(device, fill)
    }

    pub fn fill_texture_regions(
        &self,
        device: &mut dyn GraphicsDevice,
        key: TextureKey,
        fills: &[TextureFill<'_>],
    ) -> Result<()> {
        let texture = self.textures.get(key).ok_or_else(|| stale(ResourceKind::Texture, key))?;
        texture.fill_all(device, fills)
    }

    pub fn texture(&self, key: TextureKey) -> Option<&Texture> { self.textures.get(key) }

    pub fn texture_at(&self, position: usize) -> Option<TextureKey> { self.textures.handle_at(position) }

    pub fn texture_count(&self) -> usize { self.textures.len() }

    pub fn texture_exists(&self, key: TextureKey) -> bool { self.textures.contains(key) }

    // ===== CUBEMAPS =====

    pub fn create_cubemap(&mut self, device: &mut dyn GraphicsDevice, desc: &CubemapDesc) -> Result<CubemapKey> {
        let texture = Texture::create_cubemap(device, desc)?;
        Ok(self.cubemaps.insert(texture))
    }

    /// Create a cubemap and upload its six faces (+X, -X, +Y, -Y, +Z, -Z)
    pub fn create_cubemap_with_faces(
        &mut self,
        device: &mut dyn GraphicsDevice,
        desc: &CubemapDesc,
        faces: &[&[u8]; CUBEMAP_FACES as usize],
    ) -> Result<CubemapKey> {
        let texture = Texture::create_cubemap(device, desc)?;
        let texture = with_initial_data(device, texture, |texture, device| {
            texture.fill_layers(device, faces)
        })?;
        Ok(self.cubemaps.insert(texture))
    }

    pub fn replace_cubemap(&mut self, device: &mut dyn GraphicsDevice, key: CubemapKey, desc: &CubemapDesc) -> Result<()> {
        replace_in(&mut self.cubemaps, device, ResourceKind::Cubemap, key, |device| {
            Texture::create_cubemap(device, desc)
        })
    }

    pub fn replace_cubemap_with_faces(
        &mut self,
        device: &mut dyn GraphicsDevice,
        key: CubemapKey,
        desc: &CubemapDesc,
        faces: &[&[u8]; CUBEMAP_FACES as usize],
    ) -> Result<()> {
        replace_in(&mut self.cubemaps, device, ResourceKind::Cubemap, key, |device| {
            let texture = Texture::create_cubemap(device, desc)?;
            with_initial_data(device, texture, |texture, device| {
                texture.fill_layers(device, faces)
            })
        })
    }

    /// Upload a region into one face (`fill.layer`) of a cubemap
    pub fn fill_cubemap(&self, device: &mut dyn GraphicsDevice, key: CubemapKey, fill: &TextureFill<'_>) -> Result<()> {
        let texture = self.cubemaps.get(key).ok_or_else(|| stale(ResourceKind::Cubemap, key))?;
        texture.fill(device, fill)
    }

    pub fn cubemap(&self, key: CubemapKey) -> Option<&Texture> { self.cubemaps.get(key) }

    pub fn cubemap_at(&self, position: usize) -> Option<CubemapKey> { self.cubemaps.handle_at(position) }

    pub fn cubemap_count(&self) -> usize { self.cubemaps.len() }

    pub fn cubemap_exists(&self, key: CubemapKey) -> bool { self.cubemaps.contains(key) }

    // ===== MATERIALS =====

    pub fn create_material(&mut self, device: &mut dyn GraphicsDevice, desc: &MaterialDesc) -> Result<MaterialKey> {
        let material = Material::from_desc(device, desc)?;
        Ok(self.materials.insert(material))
    }

    pub fn replace_material(
        &mut self,
        device: &mut dyn GraphicsDevice,
        key: MaterialKey,
        desc: &MaterialDesc,
    ) -> Result<()> {
        replace_in(&mut self.materials, device, ResourceKind::Material, key, |device| {
            Material::from_desc(device, desc)
        })
    }

    pub fn material(&self, key: MaterialKey) -> Option<&Material> { self.materials.get(key) }

    pub fn material_at(&self, position: usize) -> Option<MaterialKey> { self.materials.handle_at(position) }

    pub fn material_count(&self) -> usize { self.materials.len() }

    pub fn material_exists(&self, key: MaterialKey) -> bool { self.materials.contains(key) }

    // ===== UNIFORM BUFFERS =====

    /// Create a standalone uniform buffer, optionally with initial contents
    pub fn create_uniform_buffer(
        &mut self,
        device: &mut dyn GraphicsDevice,
        usage: BufferUsage,
        data: &[u8],
    ) -> Result<BufferKey> {
        let desc = BufferDesc {
            kind: BufferKind::Uniform,
            usage,
        };
        let buffer = if data.is_empty() {
            Buffer::create(device, &desc)?
        } else {
            Buffer::create_with_data(device, &desc, data)?
        };
        Ok(self.buffers.insert(buffer))
    }

    pub fn fill_buffer(&mut self, device: &mut dyn GraphicsDevice, key: BufferKey, data: &[u8]) -> Result<()> {
        let buffer = self.buffers.get_mut(key).ok_or_else(|| stale(ResourceKind::Buffer, key))?;
        buffer.fill(device, data)
    }

    pub fn buffer(&self, key: BufferKey) -> Option<&Buffer> { self.buffers.get(key) }

    pub fn buffer_count(&self) -> usize { self.buffers.len() }

    pub fn buffer_exists(&self, key: BufferKey) -> bool { self.buffers.contains(key) }

    // ===== TEARDOWN =====

    /// Destroy every resource and invalidate every key
    pub fn destroy(&mut self, device: &mut dyn GraphicsDevice) {
        destroy_all(&mut self.meshes, device);
        destroy_all(&mut self.textures, device);
        destroy_all(&mut self.cubemaps, device);
        destroy_all(&mut self.materials, device);
        destroy_all(&mut self.buffers, device);
    }
}

#[cfg(test)]
#[path = "resource_manager_tests.rs"]
mod tests;
