//! Unit tests for the context-free parts of OpenGlDevice

use glw_graphics::glw::device::Rect;

use crate::opengl_device::*;

#[test]
fn test_version_requirement() {
    assert!(supports_version(4, 3));
    assert!(supports_version(4, 6));
    assert!(!supports_version(4, 1));
    assert!(!supports_version(3, 3));
}

#[test]
fn test_rect_bounds() {
    assert_eq!(rect_bounds(Rect::new(200, 0, 1200, 900)), (200, 0, 1400, 900));
    assert_eq!(rect_bounds(Rect::from_size(64, 32)), (0, 0, 64, 32));
}
