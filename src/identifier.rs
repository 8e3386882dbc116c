//! Timestamp-derived note identifiers.
//!
//! An identifier is a 15-character token of the fixed shape `YYYYMMDDTHHMMSS`.
//! Its lexical ordering equals its chronological ordering, which is what makes
//! it usable both as a stable primary key and as a sort key.

use std::{fmt, str::FromStr};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{NoteError, Result};

/// Strftime shape of the raw identifier token.
const ID_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Strftime shape of the human-readable rendering used in front matter.
const HUMAN_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A note's stable primary key: a second-precision timestamp token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Builds an identifier from a date/time value, truncating to second
    /// precision. Never fails for a valid datetime.
    pub fn from_date(datetime: NaiveDateTime) -> Self {
        Identifier(datetime.format(ID_FORMAT).to_string())
    }

    /// The raw 15-character token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First four characters of the token, used as the year directory.
    pub fn year(&self) -> &str {
        &self.0[0..4]
    }

    /// Renders the identifier as `YYYY-MM-DD HH:MM:SS`.
    pub fn human_date(&self) -> String {
        self.datetime().format(HUMAN_FORMAT).to_string()
    }

    /// The datetime this identifier encodes.
    pub fn datetime(&self) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&self.0, ID_FORMAT)
            .expect("identifier was validated at construction")
    }
}

impl FromStr for Identifier {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |message: String| NoteError::InvalidIdentifier {
            text: s.to_string(),
            message,
        };

        if s.len() != 15 {
            return Err(invalid(format!("expected 15 characters, got {}", s.len())));
        }

        for (index, c) in s.char_indices() {
            match index {
                8 if c != 'T' => {
                    return Err(invalid(format!("expected 'T' at position 8, got '{c}'")));
                }
                8 => {}
                _ if !c.is_ascii_digit() => {
                    return Err(invalid(format!("unexpected character '{c}'")));
                }
                _ => {}
            }
        }

        // Shape is right; reject impossible dates like month 13.
        NaiveDateTime::parse_from_str(s, ID_FORMAT)
            .map_err(|e| invalid(format!("not a valid date/time: {e}")))?;

        Ok(Identifier(s.to_string()))
    }
}

impl TryFrom<String> for Identifier {
    type Error = NoteError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
