//! Input documents

use serde::{Deserialize, Serialize};

/// One free-form incident report awaiting extraction
///
/// Identity is the position within the input collection. A document may have
/// no usable text (field absent, wrong type, or blank); such documents are
/// skipped by the batch layer rather than failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Position within the input collection
    pub index: usize,

    /// Raw report text, if the input record carried one
    pub text: Option<String>,
}

impl Document {
    /// Create a document with text
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: Some(text.into()),
        }
    }

    /// Create a document whose input record had no text field
    pub fn missing(index: usize) -> Self {
        Self { index, text: None }
    }

    /// The text, if present and not blank
    pub fn usable_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}

/// Truncate `text` to at most `max_chars` characters, appending `...` when cut
pub fn text_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}
