//! Error types for the Helios renderer core
//!
//! This module defines the error types used throughout the renderer,
//! covering resource creation, backend faults, and initialization.

use std::fmt;

/// Result type for Helios renderer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Helios renderer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (OpenGL, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, shader, geometry, buffer, target)
    InvalidResource(String),

    /// Initialization failed (renderer, context, subsystems)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Build an `Error::BackendError`, log it, and return it as a value.
///
/// # Example
///
/// ```no_run
/// # use helios_render::render_err;
/// let err = render_err!("helios::gl", "framebuffer incomplete: {:#x}", 0x8CD6);
/// ```
#[macro_export]
macro_rules! render_err {
    ($source:expr, $($arg:tt)*) => {{
        let msg = format!($($arg)*);
        $crate::log::log_detailed(
            $crate::log::LogSeverity::Error,
            $source,
            msg.clone(),
            file!(),
            line!(),
        );
        $crate::error::Error::BackendError(msg)
    }};
}

/// Build an `Error::BackendError`, log it, and `return Err(...)` from the
/// enclosing function.
#[macro_export]
macro_rules! render_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::render_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
