//! Error types shared across the catalog, audio and logging layers.
//!
//! Catalog reads never surface errors (they degrade to empty values), so the
//! only failures that cross module boundaries are the ones below.

use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by an [`AudioDevice`](crate::audio::AudioDevice).
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no audio output device available: {0}")]
    NoOutput(String),

    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Failures reported by a [`DurationLookup`](crate::library::DurationLookup).
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata from {path:?}: {reason}")]
    Read { path: PathBuf, reason: String },
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to create log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to open log file: {0}")]
    Appender(#[from] tracing_appender::rolling::InitError),

    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}
