/// Swapchain: the default framebuffer the surface presents.
///
/// Binding it disables depth and stencil testing and clears color only. A
/// render pass shown on it is letterboxed: scaled to fit the surface with
/// its aspect ratio kept, then centered.

use glam::{UVec2, Vec4};

use crate::device::{Capability, ClearFlags, GraphicsDevice, Rect};

/// Default swapchain clear color
pub const SWAPCHAIN_REFRESH: Vec4 = Vec4::new(0.0, 0.0, 0.0, 1.0);

/// Largest rectangle of `content`'s aspect ratio that fits `surface`, centered
pub fn letterbox(surface: UVec2, content: UVec2) -> Rect {
    if content.x == 0 || content.y == 0 {
        return Rect::from_size(surface.x, surface.y);
    }
    let scale_x = surface.x as f32 / content.x as f32;
    let scale_y = surface.y as f32 / content.y as f32;
    let scale = scale_x.min(scale_y);

    let width = ((content.x as f32 * scale) as u32).min(surface.x);
    let height = ((content.y as f32 * scale) as u32).min(surface.y);
    Rect::new(
        ((surface.x - width) / 2) as i32,
        ((surface.y - height) / 2) as i32,
        width,
        height,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swapchain {
    dimensions: UVec2,
    refresh: Vec4,
}

impl Swapchain {
    pub(crate) fn create(device: &dyn GraphicsDevice) -> Self {
        Self {
            dimensions: device.surface_size(),
            refresh: SWAPCHAIN_REFRESH,
        }
    }

    /// Pick up the current surface size
    pub(crate) fn resize(&mut self, device: &dyn GraphicsDevice) {
        self.dimensions = device.surface_size();
    }

    /// Bind over the whole surface
    pub(crate) fn bind(&self, device: &mut dyn GraphicsDevice) {
        self.bind_viewport(device, Rect::from_size(self.dimensions.x, self.dimensions.y));
    }

    /// Bind with a viewport letterboxing `content` into the surface
    pub(crate) fn bind_letterboxed(&self, device: &mut dyn GraphicsDevice, content: UVec2) {
        self.bind_viewport(device, letterbox(self.dimensions, content));
    }

    fn bind_viewport(&self, device: &mut dyn GraphicsDevice, viewport: Rect) {
        device.bind_framebuffer(None);
        device.set_capability(Capability::DepthTest, false);
        device.set_capability(Capability::StencilTest, false);
        device.set_viewport(viewport);
        device.set_scissor(viewport);
        device.set_clear_color(self.refresh);
        device.clear(ClearFlags::COLOR);
    }

    pub fn dimensions(&self) -> UVec2 { self.dimensions }

    pub fn refresh_color(&self) -> Vec4 { self.refresh }

    pub fn set_refresh_color(&mut self, refresh: Vec4) {
        self.refresh = refresh;
    }
}

#[cfg(test)]
#[path = "swapchain_tests.rs"]
mod tests;
