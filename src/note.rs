//! The in-memory note: body text paired with its metadata.

use serde::{Deserialize, Serialize};

use crate::{front_matter, FrontMatter, Identifier, Metadata, NoteError, Result};

/// A note is body text plus the metadata that names it. Equality is
/// structural: same text and equal metadata fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub text: String,
    pub metadata: Metadata,
}

impl Note {
    pub fn new(text: impl Into<String>, metadata: Metadata) -> Self {
        Note {
            text: text.into(),
            metadata,
        }
    }

    /// Builds the front matter from the current metadata fields. Recomputed
    /// on every access so that metadata edits are always reflected.
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter::new(
            self.metadata.title.clone(),
            self.metadata.id.datetime(),
            self.metadata.keywords.clone(),
        )
    }

    /// The full file contents: front-matter block followed by the body,
    /// byte for byte.
    pub fn dump(&self) -> String {
        format!("{}{}", self.front_matter().dump(), self.text)
    }

    /// Reconstructs a note from dumped markdown when the identifier is
    /// already known, e.g. from the key of a key-value store. The supplied
    /// identifier wins over whatever the `date:` line says.
    pub fn from_markdown(id: Identifier, markdown: &str) -> Result<Self> {
        let (fields, body) = front_matter::scan_document(markdown)?;

        let title = fields.title.ok_or_else(|| NoteError::InvalidFrontMatter {
            message: "missing 'title:' field".to_string(),
        })?;

        let metadata = Metadata::new(id, title, fields.keywords, "md");
        Ok(Note::new(body, metadata))
    }
}
