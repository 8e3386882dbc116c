//! The delimited metadata block at the top of every note file.
//!
//! This is deliberately not a YAML parser. The block is a restricted
//! line-oriented grammar with exactly three recognized fields (`title:`,
//! `date:`, `keywords:`); unknown lines are ignored so that tolerant
//! real-world markdown files still parse.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{Identifier, NoteError, Result};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepted date shapes. Editor-written templates often leave the seconds
/// off, so both are tolerated on input; output always carries seconds.
const DATE_INPUT_FORMATS: &[&str] = &[DATE_FORMAT, "%Y-%m-%d %H:%M"];

/// The serializable view of a note's metadata as stored in its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    pub title: String,
    pub date: NaiveDateTime,
    pub keywords: Vec<String>,
}

/// Raw field values scanned out of a front-matter block, before any
/// validation. The import path uses this directly so that foreign files
/// with a malformed `date:` line can still be brought in.
#[derive(Debug, Default)]
pub(crate) struct RawFields {
    pub title: Option<String>,
    pub date: Option<String>,
    pub keywords: Vec<String>,
}

/// Splits a document into its front-matter fields and its body.
///
/// The first line must be the `---` delimiter. The body is everything after
/// the closing `---` line, returned as a verbatim slice of the input; if the
/// closing delimiter is missing the body is empty.
pub(crate) fn scan_document(text: &str) -> Result<(RawFields, &str)> {
    let mut fields = RawFields::default();
    let mut lines = text.split_inclusive('\n');

    let mut offset = match lines.next() {
        Some(first) if first.trim_end() == "---" => first.len(),
        _ => {
            return Err(NoteError::InvalidFrontMatter {
                message: "missing leading '---' delimiter".to_string(),
            })
        }
    };

    for line in lines {
        offset += line.len();
        let line = line.trim_end();

        if line == "---" {
            return Ok((fields, &text[offset..]));
        }

        if let Some(value) = line.strip_prefix("title:") {
            fields.title = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("date:") {
            fields.date = Some(value.trim().trim_matches('"').to_string());
        } else if let Some(value) = line.strip_prefix("keywords:") {
            fields.keywords = value.split_whitespace().map(str::to_string).collect();
        }
        // Unknown lines are ignored.
    }

    Ok((fields, ""))
}

impl FrontMatter {
    pub fn new(title: impl Into<String>, date: NaiveDateTime, keywords: Vec<String>) -> Self {
        FrontMatter {
            title: title.into(),
            date,
            keywords,
        }
    }

    /// Parses the front-matter block at the top of `text`.
    ///
    /// The `date:` field is mandatory: it is the only source for
    /// reconstructing an identifier from stored text. A missing `keywords:`
    /// line yields an empty sequence; the date value may be quoted.
    pub fn parse(text: &str) -> Result<Self> {
        let (fields, _body) = scan_document(text)?;

        let date = fields.date.ok_or_else(|| NoteError::InvalidFrontMatter {
            message: "missing mandatory 'date:' field".to_string(),
        })?;
        let date = parse_date(&date)?;

        Ok(FrontMatter {
            title: fields.title.unwrap_or_default(),
            date,
            keywords: fields.keywords,
        })
    }

    /// Emits the block: title, quoted date and space-joined keywords between
    /// `---` delimiter lines. `parse` reproduces an equal value.
    pub fn dump(&self) -> String {
        format!(
            "---\ntitle: {}\ndate: \"{}\"\nkeywords: {}\n---\n",
            self.title,
            self.date.format(DATE_FORMAT),
            self.keywords.join(" ")
        )
    }

    /// The identifier this front matter's date encodes, truncated to
    /// second precision.
    pub fn identifier(&self) -> Identifier {
        Identifier::from_date(self.date)
    }
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDateTime> {
    for format in DATE_INPUT_FORMATS {
        if let Ok(date) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(date);
        }
    }
    Err(NoteError::InvalidFrontMatter {
        message: format!("could not parse date '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_front_matter() {
        let text = "---\ntitle: one\ndate: 2022-07-08 17:43:37\nkeywords: k1 k2\n";

        let front_matter = FrontMatter::parse(text).unwrap();

        assert_eq!(front_matter.title, "one");
        assert_eq!(front_matter.keywords, &["k1", "k2"]);
        assert_eq!(front_matter.date.to_string(), "2022-07-08 17:43:37");
    }

    #[test]
    fn test_parse_accepts_quoted_date() {
        let text = "---\ntitle: one\ndate: \"2022-07-08 17:43:37\"\n---\n";

        let front_matter = FrontMatter::parse(text).unwrap();
        assert_eq!(front_matter.identifier().as_str(), "20220708T174337");
    }

    #[test]
    fn test_parse_without_keywords_yields_empty_sequence() {
        let text = "---\ntitle: one\ndate: 2022-07-08 17:43:37\n---\n";

        let front_matter = FrontMatter::parse(text).unwrap();
        assert!(front_matter.keywords.is_empty());
    }

    #[test]
    fn test_parse_ignores_unknown_lines() {
        let text = "---\ntitle: one\nauthor: nobody\ndate: 2022-07-08 17:43:37\n---\n";

        let front_matter = FrontMatter::parse(text).unwrap();
        assert_eq!(front_matter.title, "one");
    }

    #[test]
    fn test_parse_requires_date() {
        let text = "---\ntitle: one\nkeywords: k1\n---\n";

        let err = FrontMatter::parse(text).unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_parse_requires_leading_delimiter() {
        let err = FrontMatter::parse("title: one\n").unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn test_round_trip() {
        let text = "---\ntitle: Title\ndate: 2022-09-12 17:43:37\nkeywords: rust python\n";
        let original = FrontMatter::parse(text).unwrap();

        let dumped = original.dump();
        let loaded = FrontMatter::parse(&dumped).unwrap();

        assert_eq!(loaded, original);
    }

    #[test]
    fn test_round_trip_without_keywords() {
        let original = FrontMatter::new("Title", parse_date("2022-09-12 17:43").unwrap(), vec![]);

        let loaded = FrontMatter::parse(&original.dump()).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_scan_document_returns_body_verbatim() {
        let text = "---\ntitle: one\ndate: 2022-07-08 17:43:37\n---\nbody line\n\nmore\n";

        let (_, body) = scan_document(text).unwrap();
        assert_eq!(body, "body line\n\nmore\n");
    }
}
