//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`Error`] covers the failure modes that can originate
//! in this crate:
//! - Asset reading and glTF parsing
//! - Viewer configuration parsing
//! - Background loader hand-off
//! - Windowing (with the `winit` feature)
//!
//! A missing limb node or a model that is still loading are *not* errors:
//! the binder skips absent nodes and the viewer simply waits.
//!
//! # Usage
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, Error>`.

use thiserror::Error;

/// The main error type for the avatar viewer.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Asset Loading Errors
    // ========================================================================
    /// The requested asset was not found.
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    /// A background load failed earlier; the message is the original error.
    #[error("Asset load failed: {0}")]
    LoadFailed(String),

    /// glTF parsing or loading error.
    #[cfg(feature = "gltf")]
    #[error("glTF error: {0}")]
    Gltf(String),

    // ========================================================================
    // I/O & Configuration Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error (viewer configuration).
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // Async & Threading Errors
    // ========================================================================
    /// The background loader dropped its result channel.
    #[error("Loader channel closed: {0}")]
    ChannelClosed(String),

    // ========================================================================
    // Platform Errors
    // ========================================================================
    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// Feature not enabled.
    #[error("Feature not enabled: {0}")]
    FeatureNotEnabled(String),
}

// ============================================================================
// Convenient conversion implementations
// ============================================================================

#[cfg(feature = "gltf")]
impl From<gltf::Error> for Error {
    fn from(err: gltf::Error) -> Self {
        Error::Gltf(err.to_string())
    }
}

impl From<flume::RecvError> for Error {
    fn from(err: flume::RecvError) -> Self {
        Error::ChannelClosed(err.to_string())
    }
}

/// Alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
