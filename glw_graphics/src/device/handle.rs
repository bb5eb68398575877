//! Native object identifiers handed out by a [`GraphicsDevice`](super::GraphicsDevice)
//!
//! Every id wraps a non-zero driver name. "No object" is expressed with
//! `Option<Id>`, never with a zero or sentinel value.

use std::fmt;
use std::num::NonZeroU32;

macro_rules! native_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub NonZeroU32);

        impl $name {
            /// Wrap a raw driver name; `None` when `raw` is zero
            pub fn from_raw(raw: u32) -> Option<Self> {
                NonZeroU32::new(raw).map(Self)
            }

            /// Raw driver name
            pub fn raw(self) -> u32 {
                self.0.get()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

native_id!(
    /// Buffer object name
    BufferId
);
native_id!(
    /// Vertex array object name
    VertexArrayId
);
native_id!(
    /// Texture object name
    TextureId
);
native_id!(
    /// Renderbuffer object name
    RenderbufferId
);
native_id!(
    /// Framebuffer object name (the default framebuffer is `None`)
    FramebufferId
);
native_id!(
    /// Shader object name
    ShaderId
);
native_id!(
    /// Program object name
    ProgramId
);

/// Location of a uniform inside a linked program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// Image bound at a framebuffer attachment point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentHandle {
    Texture(TextureId),
    Renderbuffer(RenderbufferId),
}

impl AttachmentHandle {
    /// Texture id, if the attachment can be sampled
    pub fn texture(self) -> Option<TextureId> {
        match self {
            AttachmentHandle::Texture(id) => Some(id),
            AttachmentHandle::Renderbuffer(_) => None,
        }
    }

    pub fn is_renderbuffer(self) -> bool {
        matches!(self, AttachmentHandle::Renderbuffer(_))
    }
}
