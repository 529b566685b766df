//! Core error types for taskmaster-core.
//!
//! Bad user input never reaches these types; the session reports it as a
//! message and keeps its state. Everything here is either a broken caller
//! invariant or an I/O / parse failure.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for taskmaster-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task document could not be loaded at startup
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to read an existing task document.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file exists but could not be read
    #[error("Failed to read task document at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or does not have the expected shape
    #[error("Malformed task document at {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// An activity without an end time cannot be measured
    #[error("Activity '{activity}' of task '{task}' is still in progress")]
    ActivityInProgress { task: String, activity: String },

    /// Stopping an activity twice would overwrite its end time
    #[error("Activity '{activity}' of task '{task}' is already stopped")]
    AlreadyStopped { task: String, activity: String },

    /// Session transition requested from a state that does not allow it
    #[error("Cannot {action} while {state}")]
    InvalidTransition { action: &'static str, state: String },
}

impl ValidationError {
    pub(crate) fn out_of_bounds(collection: &str, index: usize, len: usize) -> Self {
        ValidationError::OutOfBounds {
            collection: collection.to_string(),
            index,
            len,
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
