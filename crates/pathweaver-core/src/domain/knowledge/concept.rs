//! Concept types
//!
//! A concept is a ranked piece of text pulled out of a document: a recurring
//! noun phrase, a named entity, or a frequent single-word key term.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A ranked concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    /// Concept text; unique per document ignoring case
    pub text: String,
    /// How the concept was found
    #[serde(rename = "type")]
    pub kind: ConceptKind,
    /// Occurrence count (always 1 for entities)
    pub frequency: u32,
    /// Ranking score; not a probability
    pub importance: f64,
}

impl Concept {
    pub fn new(text: impl Into<String>, kind: ConceptKind) -> Self {
        Self {
            text: text.into(),
            kind,
            frequency: 1,
            importance: 0.0,
        }
    }

    pub fn with_frequency(mut self, frequency: u32) -> Self {
        self.frequency = frequency.max(1);
        self
    }

    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = importance;
        self
    }

    /// Case-insensitive text comparison
    pub fn matches_text(&self, text: &str) -> bool {
        self.text.to_lowercase() == text.to_lowercase()
    }

    /// Whether `word` is one of the whitespace-separated words of this concept
    pub fn has_word(&self, word: &str) -> bool {
        self.text
            .to_lowercase()
            .split_whitespace()
            .any(|w| w == word)
    }
}

/// Named entity labels admitted as concepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Organization,
    Person,
    GeopoliticalEntity,
    Location,
    Product,
    Event,
    WorkOfArt,
    Law,
}

impl EntityLabel {
    pub const ALL: [EntityLabel; 8] = [
        Self::Organization,
        Self::Person,
        Self::GeopoliticalEntity,
        Self::Location,
        Self::Product,
        Self::Event,
        Self::WorkOfArt,
        Self::Law,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Organization => "ORG",
            Self::Person => "PERSON",
            Self::GeopoliticalEntity => "GPE",
            Self::Location => "LOC",
            Self::Product => "PRODUCT",
            Self::Event => "EVENT",
            Self::WorkOfArt => "WORK_OF_ART",
            Self::Law => "LAW",
        }
    }

    /// Parse an annotator label; labels outside the allow-list yield `None`
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == label)
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concept type, serialized as a plain string
///
/// Strings that are neither a known kind nor an allowed entity label are kept
/// verbatim in [`ConceptKind::Other`] so hand-edited artifacts round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ConceptKind {
    NounPhrase,
    KeyTerm,
    Entity(EntityLabel),
    Other(String),
}

impl ConceptKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::NounPhrase => "noun_phrase",
            Self::KeyTerm => "key_term",
            Self::Entity(label) => label.as_str(),
            Self::Other(s) => s,
        }
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }
}

impl Default for ConceptKind {
    fn default() -> Self {
        Self::Other("concept".to_string())
    }
}

impl From<String> for ConceptKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "noun_phrase" => Self::NounPhrase,
            "key_term" => Self::KeyTerm,
            other => match EntityLabel::parse(other) {
                Some(label) => Self::Entity(label),
                None => Self::Other(s),
            },
        }
    }
}

impl From<ConceptKind> for String {
    fn from(kind: ConceptKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for ConceptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_kind_strings() {
        for (raw, kind) in [
            ("noun_phrase", ConceptKind::NounPhrase),
            ("key_term", ConceptKind::KeyTerm),
            ("WORK_OF_ART", ConceptKind::Entity(EntityLabel::WorkOfArt)),
            ("NORP", ConceptKind::Other("NORP".into())),
        ] {
            assert_eq!(ConceptKind::from(raw.to_string()), kind);
            assert_eq!(kind.as_str(), raw);
        }
    }

    #[test]
    fn test_concept_serializes_type_field() {
        let concept = Concept::new("Ada Lovelace", ConceptKind::Entity(EntityLabel::Person))
            .with_importance(0.8);
        let json = serde_json::to_value(&concept).unwrap();
        assert_eq!(json["type"], "PERSON");
        assert_eq!(json["frequency"], 1);

        let back: Concept = serde_json::from_value(json).unwrap();
        assert_eq!(back, concept);
    }

    #[test]
    fn test_has_word_is_whole_word() {
        let concept = Concept::new("neural networks", ConceptKind::NounPhrase);
        assert!(concept.has_word("networks"));
        assert!(!concept.has_word("network"));
        assert!(concept.matches_text("Neural Networks"));
    }

    #[test]
    fn test_frequency_floor() {
        let concept = Concept::new("x", ConceptKind::KeyTerm).with_frequency(0);
        assert_eq!(concept.frequency, 1);
    }
}
