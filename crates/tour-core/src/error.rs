//! Error types for the tour core.

use thiserror::Error;

/// Errors surfaced by the navigation core.
///
/// A resolver miss is not an error; see [`crate::Resolution::NoHit`].
#[derive(Error, Debug)]
pub enum TourError {
    /// Path construction needs at least two control points.
    #[error("invalid path: {points} control point(s), need at least 2")]
    InvalidPath { points: usize },

    /// A resource (path, catalog) has not arrived yet.
    #[error("resource not ready: {0}")]
    ResourceNotReady(&'static str),

    /// Malformed JSON asset or session data.
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Persisted key-value store failures.
    #[error("storage error: {0}")]
    Storage(String),

    /// Out-of-range tuning values.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TourError>;
