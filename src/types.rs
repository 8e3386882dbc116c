//! Shared type aliases and CLI command definitions for notedown.

use std::path::PathBuf;

use clap::Subcommand;

use crate::NoteError;

/// A specialized Result type for notedown operations.
pub type Result<T> = std::result::Result<T, NoteError>;

/// Available subcommands for the notedown application
#[derive(Subcommand)]
pub enum Commands {
    /// Create a new note in your editor and file it under the repository
    Create,

    /// Re-sync a note file after editing, relocating it if its metadata changed
    Update {
        /// Repository-relative path of the note to update
        path: PathBuf,
    },

    /// Import an external markdown file, assigning it a fresh identifier
    Import {
        /// Path to the markdown file to import
        source: PathBuf,
    },

    /// List all notes in the repository, sorted by identifier
    List {
        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },
}
