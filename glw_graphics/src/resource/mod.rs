pub mod buffer;
pub mod material;
pub mod mesh;
pub mod resource_manager;
pub mod resource_pool;
pub mod texture;
pub mod vertex_array;

pub use buffer::{Buffer, BufferDesc};
pub use material::{Material, MaterialDesc};
pub use mesh::{Mesh, MeshDesc};
pub use resource_manager::{
    BufferKey, CubemapKey, MaterialKey, MeshKey, ResourceKind, ResourceManager, TextureKey,
};
pub use resource_pool::ResourcePool;
pub use texture::{
    CubemapDesc, Texture, Texture2DArrayDesc, Texture2DDesc, TextureKind, CUBEMAP_FACES,
};
pub use vertex_array::VertexArray;
