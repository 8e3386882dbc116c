//! Note metadata and canonical path derivation.
//!
//! A note's stored location is a pure function of its metadata. The path is
//! recomputed from the current field values on every call, never cached, so
//! replacing the title or keywords is immediately reflected in the derived
//! path.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::{slugify, Identifier, NoteError, Result};

/// The identifying metadata of a note: identifier, title, keywords and file
/// extension. Immutable value type; a metadata change produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub id: Identifier,
    pub title: String,
    pub keywords: Vec<String>,
    pub extension: String,
}

impl Metadata {
    pub fn new(
        id: Identifier,
        title: impl Into<String>,
        keywords: Vec<String>,
        extension: impl Into<String>,
    ) -> Self {
        Metadata {
            id,
            title: title.into(),
            keywords,
            extension: extension.into(),
        }
    }

    /// The canonical repository-relative path:
    /// `{year}/{id}--{slug(title)}__{kw1}_{kw2}....{ext}`.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.id.year()).join(self.filename())
    }

    /// The filename component of the canonical path.
    pub fn filename(&self) -> String {
        format!(
            "{}--{}__{}.{}",
            self.id,
            slugify(&self.title),
            self.keywords.join("_"),
            self.extension
        )
    }

    /// Extracts the identifier embedded in a note filename.
    ///
    /// Only the identifier prefix and its `--` separator are checked; the
    /// slug and keyword segments are treated as a denormalized cache of the
    /// front matter and never read back.
    pub fn identifier_from_filename(name: &str) -> Result<Identifier> {
        let id_part = name.get(..15).ok_or_else(|| NoteError::InvalidFilename {
            name: name.to_string(),
        })?;

        if name.get(15..17) != Some("--") {
            return Err(NoteError::InvalidFilename {
                name: name.to_string(),
            });
        }

        id_part.parse()
    }
}
