//! Error types for the notedown application.
//!
//! This module defines custom error types that categorize different failures
//! that can occur during note management operations.

use std::{io, path::PathBuf};

use thiserror::Error;

/// The main error type for the notedown application.
#[derive(Error, Debug)]
pub enum NoteError {
    /// Errors related to file I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors related to serialization/deserialization operations.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Identifier text does not match the `YYYYMMDDTHHMMSS` shape.
    #[error("Invalid identifier '{text}': {message}")]
    InvalidIdentifier { text: String, message: String },

    /// Front matter is missing a mandatory field or cannot be read.
    #[error("Invalid front matter: {message}")]
    InvalidFrontMatter { message: String },

    /// A note filename does not follow the `{id}--{slug}__{keywords}.{ext}`
    /// convention.
    #[error("Invalid note filename: {name}")]
    InvalidFilename { name: String },

    /// Repository root exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Errors related to configuration.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Errors while spawning or waiting on the external editor.
    #[error("{message}")]
    EditorError { message: String },
}

impl NoteError {
    /// True for validation failures, false for I/O and environment failures.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            NoteError::InvalidIdentifier { .. }
                | NoteError::InvalidFrontMatter { .. }
                | NoteError::InvalidFilename { .. }
        )
    }
}
