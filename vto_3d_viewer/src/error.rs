//! Error types for the VTO 3D viewer
//!
//! This module defines the error types used throughout the viewer,
//! covering initialization, preconditions, asset loading, and the
//! render-surface binding.

use std::fmt;

/// Result type for VTO viewer operations
pub type Result<T> = std::result::Result<T, Error>;

/// VTO viewer errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Initialization failed (missing 3D rendering capability, surface creation)
    InitializationFailed(String),

    /// Operation requires an initialized viewer
    NotInitialized(String),

    /// A mesh asset could not be loaded (fetch or parse failure)
    LoadFailed(String),

    /// Loaded content was unusable (no geometry, zero extent)
    InvalidContent(String),

    /// Render-surface backend error
    SurfaceError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::NotInitialized(msg) => write!(f, "Viewer not initialized: {}", msg),
            Error::LoadFailed(msg) => write!(f, "Mesh load failed: {}", msg),
            Error::InvalidContent(msg) => write!(f, "Invalid mesh content: {}", msg),
            Error::SurfaceError(msg) => write!(f, "Surface error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
