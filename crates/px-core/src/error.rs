//! Errors raised at the point of use.
//!
//! Binding never fails; only the accessors on [`crate::SurfaceManager`] and
//! the clipboard helpers report errors.

/// Failure to reach a drawable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// No surface handle is attached (before mount or after unmount).
    #[error("surface is not attached; is the ref attached to the canvas element?")]
    SurfaceNotReady,
    /// A surface is attached but no 2-D context could be obtained from it.
    #[error("no 2d drawing context is available for the attached surface")]
    ContextUnavailable,
}

impl SurfaceError {
    /// Stable machine-readable code, surfaced to JS hosts as `error.name`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SurfaceNotReady => "SurfaceNotReady",
            Self::ContextUnavailable => "ContextUnavailable",
        }
    }
}

/// Failure of a clipboard read or write.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard is not supported")]
    Unsupported,
    #[error("clipboard access rejected: {0}")]
    Rejected(String),
}
