/// Render pass manager: insertion-ordered render passes addressed by
/// generation-checked keys, plus blits between their framebuffers.

use glam::UVec2;
use slotmap::{new_key_type, Key};

use crate::device::{BlitFilter, ClearFlags, FramebufferId, GraphicsDevice, Rect};
use crate::error::{Error, Result};
use crate::render_pass::render_pass::{RenderPass, RenderPassDesc};
use crate::resource::resource_pool::ResourcePool;
use crate::{glw_err, glw_info, glw_warn};

new_key_type! {
    /// Handle to a render pass owned by the render pass manager
    pub struct RenderPassKey;
}

// ===== BLIT DESC =====

/// Copy between two render passes, or from a pass to the default framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlitDesc {
    pub source: RenderPassKey,
    /// `None` targets the default framebuffer
    pub destination: Option<RenderPassKey>,
    /// `None` covers the whole source pass
    pub source_region: Option<Rect>,
    /// `None` covers the whole destination
    pub destination_region: Option<Rect>,
    pub mask: ClearFlags,
    pub filter: BlitFilter,
}

impl BlitDesc {
    /// Whole-surface color copy from `source` to `destination`
    pub fn color(source: RenderPassKey, destination: Option<RenderPassKey>) -> Self {
        Self {
            source,
            destination,
            source_region: None,
            destination_region: None,
            mask: ClearFlags::COLOR,
            filter: BlitFilter::Nearest,
        }
    }
}

/// Clip `region` to `bounds`; `None` selects the whole bounds
pub fn clamp_region(region: Option<Rect>, bounds: UVec2) -> Rect {
    let Some(region) = region else {
        return Rect::from_size(bounds.x, bounds.y);
    };
    let x = region.x.clamp(0, bounds.x as i32);
    let y = region.y.clamp(0, bounds.y as i32);
    let right = (region.x as i64 + region.width as i64).clamp(x as i64, bounds.x as i64);
    let top = (region.y as i64 + region.height as i64).clamp(y as i64, bounds.y as i64);
    Rect::new(x, y, (right - x as i64) as u32, (top - y as i64) as u32)
}

// ===== RENDER PASS MANAGER =====

#[derive(Default)]
pub struct RenderPassManager {
    passes: ResourcePool<RenderPassKey, RenderPass>,
}

impl RenderPassManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&mut self, device: &mut dyn GraphicsDevice, desc: &RenderPassDesc) -> Result<RenderPassKey> {
        let pass = RenderPass::from_desc(device, desc)?;
        Ok(self.passes.insert(pass))
    }

    /// Create several passes in order, stopping at the first failure
    ///
    /// Passes created before the failure stay in the manager.
    pub fn create_many(
        &mut self,
        device: &mut dyn GraphicsDevice,
        descs: &[RenderPassDesc],
    ) -> Result<Vec<RenderPassKey>> {
        let mut keys = Vec::with_capacity(descs.len());
        for desc in descs {
            keys.push(self.create(device, desc)?);
        }
        glw_info!("glw::RenderPassManager", "{} render passes created", keys.len());
        Ok(keys)
    }

    /// Rebuild the pass behind `key`; on failure the previous pass stays valid
    pub fn replace(&mut self, device: &mut dyn GraphicsDevice, key: RenderPassKey, desc: &RenderPassDesc) -> Result<()> {
        if !self.passes.contains(key) {
            return Err(Self::stale(key));
        }
        let replacement = RenderPass::from_desc(device, desc)?;
        match self.passes.replace(key, replacement) {
            Ok(previous) => {
                previous.destroy(device);
                Ok(())
            }
            Err(replacement) => {
                replacement.destroy(device);
                Err(Self::stale(key))
            }
        }
    }

    fn stale(key: RenderPassKey) -> Error {
        glw_err!(InvalidReference, "glw::RenderPassManager", "render pass {:?} does not exist", key.data())
    }

    /// Copy pixels between framebuffers
    ///
    /// Both regions are clipped to their framebuffer. Depth and stencil
    /// copies always use nearest filtering.
    ///
    /// # Arguments
    ///
    /// * `surface` - size of the default framebuffer, used when the destination is `None`
    pub fn blit(&self, device: &mut dyn GraphicsDevice, desc: &BlitDesc, surface: UVec2) -> Result<()> {
        let source = self.passes.get(desc.source).ok_or_else(|| Self::stale(desc.source))?;
        let (destination_id, destination_bounds): (Option<FramebufferId>, UVec2) = match desc.destination {
            Some(key) => {
                let pass = self.passes.get(key).ok_or_else(|| Self::stale(key))?;
                (Some(pass.framebuffer_id()), pass.dimensions())
            }
            None => (None, surface),
        };

        if desc.mask.is_empty() {
            return Err(glw_err!(CreationFailed, "glw::RenderPassManager", "blit with an empty mask"));
        }

        let mut filter = desc.filter;
        if filter == BlitFilter::Linear && desc.mask.intersects(ClearFlags::DEPTH | ClearFlags::STENCIL) {
            glw_warn!("glw::RenderPassManager", "depth/stencil blits cannot filter linearly, using nearest");
            filter = BlitFilter::Nearest;
        }

        let source_rect = clamp_region(desc.source_region, source.dimensions());
        let destination_rect = clamp_region(desc.destination_region, destination_bounds);
        device.blit_framebuffer(
            Some(source.framebuffer_id()),
            destination_id,
            source_rect,
            destination_rect,
            desc.mask,
            filter,
        );
        Ok(())
    }

    /// Destroy every pass and invalidate every key
    pub fn destroy(&mut self, device: &mut dyn GraphicsDevice) {
        for pass in self.passes.drain() {
            pass.destroy(device);
        }
    }

    // ===== ACCESSORS =====

    pub fn get(&self, key: RenderPassKey) -> Option<&RenderPass> { self.passes.get(key) }

    pub fn get_mut(&mut self, key: RenderPassKey) -> Option<&mut RenderPass> { self.passes.get_mut(key) }

    pub fn handle_at(&self, position: usize) -> Option<RenderPassKey> { self.passes.handle_at(position) }

    pub fn position(&self, key: RenderPassKey) -> Option<usize> { self.passes.position(key) }

    /// Most recently created pass
    pub fn last(&self) -> Option<(RenderPassKey, &RenderPass)> { self.passes.last() }

    pub fn count(&self) -> usize { self.passes.len() }

    pub fn exists(&self, key: RenderPassKey) -> bool { self.passes.contains(key) }

    pub fn iter(&self) -> impl Iterator<Item = (RenderPassKey, &RenderPass)> + '_ { self.passes.iter() }
}

#[cfg(test)]
#[path = "render_pass_manager_tests.rs"]
mod tests;
