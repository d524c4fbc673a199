//! Normalized document content handed over by file processors

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Output of a file-type processor (PDF, HTML, slides, ...)
///
/// Only `content` is read by the extractor; the remaining fields are carried
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessedContent {
    pub content: ContentBody,
    pub metadata: serde_json::Map<String, Value>,
    pub structure: Value,
    pub images: Vec<Value>,
    pub references: Vec<Value>,
}

/// Raw text, or one string per page/slide/section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentBody {
    Text(String),
    Parts(Vec<String>),
}

impl Default for ContentBody {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl ProcessedContent {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: ContentBody::Text(text.into()),
            ..Default::default()
        }
    }

    /// Content as a single string; parts are joined with newlines
    pub fn text(&self) -> Cow<'_, str> {
        match &self.content {
            ContentBody::Text(text) => Cow::Borrowed(text),
            ContentBody::Parts(parts) => Cow::Owned(parts.join("\n")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts_are_joined() {
        let content: ProcessedContent = serde_json::from_str(
            r#"{"content": ["Slide one.", "Slide two."], "metadata": {"slides": 2}}"#,
        )
        .unwrap();
        assert_eq!(content.text(), "Slide one.\nSlide two.");
        assert_eq!(content.metadata["slides"], 2);
    }

    #[test]
    fn test_missing_content_is_empty() {
        let content: ProcessedContent = serde_json::from_str("{}").unwrap();
        assert_eq!(content.text(), "");
        assert_eq!(ProcessedContent::from_text("hi").text(), "hi");
    }
}
