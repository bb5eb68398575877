/// Unit tests for resource_manager.rs
///
/// Replace semantics, failure bookkeeping and teardown. Counts must never
/// change on a failed creation.

use crate::device::mock_graphics_device::{MockGraphicsDevice, MockObjectKind};
use crate::device::*;
use crate::resource::material::MaterialDesc;
use crate::resource::mesh::MeshDesc;
use crate::resource::resource_manager::ResourceManager;
use crate::resource::texture::{CubemapDesc, Texture2DArrayDesc, Texture2DDesc};

const VERTEX: &str = "void main() {}";
const FRAGMENT: &str = "void main() {}";

fn quad(indices: Vec<u32>) -> MeshDesc {
    let positions: [[f32; 2]; 4] = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
    MeshDesc::from_vertices(&positions, indices, vec![VertexAttribute::float(0, 2, 8, 0)])
}

// ============================================================================
// Tests: textures
// ============================================================================

#[test]
fn test_zero_sized_texture_leaves_count_unchanged() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    resources
        .create_texture_2d(&mut device, &Texture2DDesc::new(TextureFormat::Rgba, 4, 4))
        .unwrap();

    assert!(resources
        .create_texture_2d(&mut device, &Texture2DDesc::new(TextureFormat::Rgba, 0, 4))
        .is_err());
    assert!(resources
        .create_texture_2d(&mut device, &Texture2DDesc::new(TextureFormat::Rgba, 4, 0))
        .is_err());
    assert_eq!(resources.texture_count(), 1);
}

#[test]
fn test_texture_with_short_pixels_is_released() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let desc = Texture2DDesc::new(TextureFormat::Rgba, 4, 4);
    assert!(resources
        .create_texture_2d_with_pixels(&mut device, &desc, &[0; 8])
        .is_err());
    assert_eq!(resources.texture_count(), 0);
    assert_eq!(device.total_live(), 0);

    let key = resources
        .create_texture_2d_with_pixels(&mut device, &desc, &[0; 64])
        .unwrap();
    assert!(resources.texture_exists(key));
    assert_eq!(device.texture_uploads.len(), 1);
}

#[test]
fn test_array_textures_share_the_texture_pool() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let desc = Texture2DArrayDesc {
        width: 2,
        height: 2,
        layers: 2,
        ..Texture2DArrayDesc::default()
    };
    let layer = [0u8; 16];
    let key = resources
        .create_texture_2d_array_with_layers(&mut device, &desc, &[&layer[..], &layer[..]])
        .unwrap();
    assert_eq!(resources.texture_count(), 1);
    assert_eq!(resources.texture(key).unwrap().layers(), 2);
    assert_eq!(resources.texture_at(0), Some(key));
}

#[test]
fn test_cubemaps_are_counted_separately() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let desc = CubemapDesc {
        width: 1,
        height: 1,
        ..CubemapDesc::default()
    };
    let face = [255u8; 4];
    let key = resources
        .create_cubemap_with_faces(&mut device, &desc, &[&face[..], &face[..], &face[..], &face[..], &face[..], &face[..]])
        .unwrap();
    assert_eq!(resources.cubemap_count(), 1);
    assert_eq!(resources.texture_count(), 0);
    assert_eq!(device.texture_uploads.len(), 6);

    let fill = TextureFill::full(1, 1, &face).with_layer(4);
    resources.fill_cubemap(&mut device, key, &fill).unwrap();
    assert_eq!(device.texture_uploads.last().unwrap().layer, 4);
}

// ============================================================================
// Tests: replace
// ============================================================================

#[test]
fn test_replace_swaps_occupant_and_keeps_key() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let key = resources
        .create_texture_2d(&mut device, &Texture2DDesc::new(TextureFormat::Rgba, 4, 4))
        .unwrap();
    let old_id = resources.texture(key).unwrap().id();

    resources
        .replace_texture_2d(&mut device, key, &Texture2DDesc::new(TextureFormat::Rgba, 8, 8))
        .unwrap();

    let texture = resources.texture(key).unwrap();
    assert_eq!(texture.width(), 8);
    assert!(!device.is_live(old_id.raw()));
    assert!(device.is_live(texture.id().raw()));
    assert_eq!(resources.texture_count(), 1);
}

#[test]
fn test_failed_replace_keeps_previous_occupant() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let key = resources.create_mesh(&mut device, &quad(vec![0, 1, 2, 2, 3, 0])).unwrap();
    let live_before = device.total_live();

    assert!(resources.replace_mesh(&mut device, key, &MeshDesc::default()).is_err());

    let mesh = resources.mesh(key).unwrap();
    assert!(mesh.has_index());
    assert!(device.is_live(mesh.vertex_array().id().raw()));
    assert_eq!(device.total_live(), live_before);
}

#[test]
fn test_failed_material_replace_keeps_previous_program() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let key = resources
        .create_material(&mut device, &MaterialDesc::new(VERTEX, FRAGMENT))
        .unwrap();
    let program = resources.material(key).unwrap().program();

    device.set_fail_link(true);
    assert!(resources
        .replace_material(&mut device, key, &MaterialDesc::new(VERTEX, FRAGMENT))
        .is_err());
    assert_eq!(resources.material(key).unwrap().program(), program);
    assert!(device.is_live(program.raw()));
}

#[test]
fn test_replace_with_stale_key_is_rejected() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let key = resources.create_mesh(&mut device, &quad(Vec::new())).unwrap();
    resources.destroy(&mut device);

    assert!(resources.replace_mesh(&mut device, key, &quad(Vec::new())).is_err());
    assert_eq!(device.total_live(), 0);
}

// ============================================================================
// Tests: buffers, fills and teardown
// ============================================================================

#[test]
fn test_uniform_buffer_create_and_fill() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let key = resources
        .create_uniform_buffer(&mut device, BufferUsage::Dynamic, &[])
        .unwrap();
    assert_eq!(resources.buffer(key).unwrap().kind(), BufferKind::Uniform);
    resources.fill_buffer(&mut device, key, &[0; 64]).unwrap();
    assert_eq!(resources.buffer(key).unwrap().size(), 64);
}

#[test]
fn test_fill_with_stale_key_is_invalid_reference() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let key = resources.create_mesh(&mut device, &quad(Vec::new())).unwrap();
    resources.destroy(&mut device);
    let err = resources.fill_mesh_vertices(&mut device, key, &[0; 32]).unwrap_err();
    assert!(matches!(err, crate::Error::InvalidReference(_)));
}

#[test]
fn test_destroy_releases_everything_and_invalidates_keys() {
    let mut device = MockGraphicsDevice::new();
    let mut resources = ResourceManager::new();
    let mesh = resources.create_mesh(&mut device, &quad(vec![0, 1, 2])).unwrap();
    let texture = resources
        .create_texture_2d(&mut device, &Texture2DDesc::new(TextureFormat::Rgba, 4, 4))
        .unwrap();
    let material = resources
        .create_material(&mut device, &MaterialDesc::new(VERTEX, FRAGMENT))
        .unwrap();

    resources.destroy(&mut device);

    assert_eq!(device.total_live(), 0);
    assert_eq!(device.live_count(MockObjectKind::Program), 0);
    assert!(!resources.mesh_exists(mesh));
    assert!(!resources.texture_exists(texture));
    assert!(!resources.material_exists(material));
    assert_eq!(resources.mesh_count(), 0);
}
