//! Plain-text note manager library
//!
//! Notes are markdown files with a small front-matter block, named after a
//! timestamp identifier plus a slug of their title and keywords, and stored
//! in a directory tree organized by year. The stored location is always the
//! canonical path derived from the note's current metadata; editing a title
//! or the keywords relocates the file on the next save.

mod cli;
mod config;
mod errors;
mod front_matter;
mod identifier;
mod metadata;
mod note;
mod repository;
mod slug;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use front_matter::FrontMatter;
pub use identifier::*;
pub use metadata::*;
pub use note::*;
pub use repository::*;
pub use slug::*;
pub use types::*;
