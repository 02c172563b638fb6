//! Error types for examgrid-core.
//!
//! One enum per concern, aggregated into [`CoreError`] for callers
//! that do not care which layer failed.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for examgrid-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Snapshot construction errors.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Two placements claim the same (day, shift, room) cell.
    #[error("duplicate placement at {day} shift {shift} room {room}")]
    DuplicatePlacement {
        day: String,
        shift: u32,
        room: String,
    },
}

/// Editing-state errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditorError {
    /// A mutation is already being negotiated; the affordance must
    /// stay disabled until it resolves.
    #[error("a mutation is already in flight")]
    Busy,

    #[error("no schedule loaded; fetch a snapshot first")]
    NoSnapshot,

    #[error("selection is empty")]
    EmptySelection,

    #[error("operation requires {expected} selection mode")]
    WrongMode { expected: &'static str },
}

/// Backend communication errors.
///
/// Hard and soft conflicts are not errors; they are classified
/// outcomes of a batch move (see `negotiate::BatchOutcome`).
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connectivity or response-decoding failure; surfaced as a
    /// generic connection error.
    #[error("connection error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend declined the request; its free-text reason is
    /// shown verbatim.
    #[error("{0}")]
    Backend(String),

    #[error("invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Client configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
