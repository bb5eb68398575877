//! Error types for the glw graphics layer
//!
//! Creation, replacement and fill operations report failures through
//! [`Error`]. Per-frame commands never fail loudly: they return `bool` or
//! `Option` and log instead.

use std::fmt;

/// Result type for glw operations
pub type Result<T> = std::result::Result<T, Error>;

/// glw errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A driver object could not be created or configured
    /// (zero dimension, compile/link failure, incomplete framebuffer, ...)
    CreationFailed(String),

    /// A handle or index does not designate a live resource
    InvalidReference(String),

    /// The backend reported an error that is not tied to one resource
    BackendError(String),

    /// The graphics manager or device could not be initialized
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CreationFailed(msg) => write!(f, "Creation failed: {}", msg),
            Error::InvalidReference(msg) => write!(f, "Invalid reference: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an [`Error`] and log it at ERROR severity (with file:line)
///
/// # Example
///
/// ```no_run
/// use glw_graphics::glw_err;
///
/// let err = glw_err!(CreationFailed, "glw::Texture", "width is zero");
/// ```
#[macro_export]
macro_rules! glw_err {
    ($kind:ident, $source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::glw_error!($source, "{}", message);
        $crate::Error::$kind(message)
    }};
}

/// Log an error and return it from the enclosing function
///
/// # Example
///
/// ```no_run
/// use glw_graphics::glw_bail;
///
/// fn check(width: u32) -> glw_graphics::Result<()> {
///     if width == 0 {
///         glw_bail!(CreationFailed, "glw::Texture", "width is zero");
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! glw_bail {
    ($kind:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::glw_err!($kind, $source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
