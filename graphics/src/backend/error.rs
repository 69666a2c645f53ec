//! Backend error types.

use thiserror::Error;

/// Errors that can occur in backend operations.
///
/// Immediate-mode state calls cannot fail at this layer; only handle
/// allocation reports errors. The draw path logs them and degrades to
/// "nothing bound".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No texture name could be generated.
    #[error("failed to create texture: {0}")]
    TextureCreationFailed(String),
    /// Out of GPU memory.
    #[error("out of GPU memory")]
    OutOfMemory,
    /// The GL context is gone.
    #[error("GL context lost")]
    ContextLost,
}

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;
