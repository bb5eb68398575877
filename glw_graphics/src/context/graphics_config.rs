//! Configuration applied once when the graphics manager is created.

use crate::device::{CullFace, FrontFace};

/// Context version and presentation settings
///
/// Version and profile describe the context the embedding application is
/// expected to create. The manager only applies `swap_interval`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub major: u32,
    pub minor: u32,
    pub core_profile: bool,
    /// 0 disables vsync, 1 syncs every vertical blank
    pub swap_interval: i32,
    pub double_buffer: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            major: 4,
            minor: 5,
            core_profile: true,
            swap_interval: 1,
            double_buffer: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceCullingConfig {
    pub enabled: bool,
    pub face: CullFace,
    pub front: FrontFace,
}

impl Default for FaceCullingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            face: CullFace::Back,
            front: FrontFace::CounterClockwise,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtrasConfig {
    pub multi_sampling: bool,
    pub srgb: bool,
}

impl Default for ExtrasConfig {
    fn default() -> Self {
        Self {
            multi_sampling: true,
            srgb: false,
        }
    }
}

/// Driver debug output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugConfig {
    /// Route driver messages into the glw logger
    pub enabled: bool,
    /// Deliver messages on the calling thread, inside the offending call
    pub synchronous: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            synchronous: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphicsConfig {
    pub backend: BackendConfig,
    pub culling: FaceCullingConfig,
    pub extras: ExtrasConfig,
    pub debug: DebugConfig,
}

impl GraphicsConfig {
    /// Default configuration targeting another context version
    pub fn with_version(major: u32, minor: u32) -> Self {
        Self {
            backend: BackendConfig {
                major,
                minor,
                ..BackendConfig::default()
            },
            ..Self::default()
        }
    }
}
