/// Color blending state of a render pass.

use crate::device::{BlendEquation, BlendFunction, Capability, GraphicsDevice};

/// Blend configuration; disabled by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColorBlendDesc {
    pub enabled: bool,
    pub function: BlendFunction,
    pub equation: BlendEquation,
}

impl ColorBlendDesc {
    /// Standard alpha blending ("over" operator)
    pub fn alpha() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub(crate) fn apply(&self, device: &mut dyn GraphicsDevice) {
        if self.enabled {
            device.set_capability(Capability::Blend, true);
            device.set_blend_function(&self.function);
            device.set_blend_equation(self.equation);
        } else {
            device.set_capability(Capability::Blend, false);
        }
    }
}
