//! Error types for the AMP runtime

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AmpError>;

/// Errors produced by the runtime, memory, and launch subsystems.
#[derive(Debug, Error)]
pub enum AmpError {
    /// General runtime failure (accelerator selection, queue bookkeeping, launch).
    #[error("Runtime error: {0}")]
    RuntimeError(String),

    /// An extent that cannot describe a launchable index space.
    #[error("Invalid extent: {0}")]
    InvalidExtent(String),

    /// Two buffers that must share a shape do not.
    #[error("Shape mismatch: expected {expected} elements, got {actual}")]
    ShapeMismatch {
        /// Element count the operation required.
        expected: usize,
        /// Element count actually supplied.
        actual: usize,
    },
}

/// Construct an [`AmpError::RuntimeError`] from format arguments.
#[macro_export]
macro_rules! runtime_error {
    ($($arg:tt)*) => {
        $crate::error::AmpError::RuntimeError(format!($($arg)*))
    };
}
