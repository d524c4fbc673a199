//! Learning journey domain
//!
//! A journey is an ordered walk through a [`KnowledgeMap`] starting at a
//! chosen concept. One of four strategies picks the path:
//!
//! - **pattern_based**: stay inside the start's cluster, then add concepts
//!   that connect to several path members
//! - **hierarchical**: follow the containment hierarchy (parent, siblings,
//!   children)
//! - **associative**: greedy walk along the heaviest unvisited link
//! - **default**: direct neighbours plus concepts of similar importance
//!
//! Each concept on the path gets synthesized study content from a
//! [`ContentAuthor`].
//!
//! [`KnowledgeMap`]: crate::domain::map::KnowledgeMap

mod content;
mod generator;
mod preferences;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use content::{
    AuthoredContent, ConceptContent, ContentAuthor, LearningActivity, PlaceholderAuthor,
    RelatedConcept, VisualElement,
};
pub use generator::JourneyGenerator;
pub use preferences::UserPreferences;

/// Traversal strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyType {
    PatternBased,
    Hierarchical,
    Associative,
    #[default]
    Default,
}

impl JourneyType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PatternBased => "pattern_based",
            Self::Hierarchical => "hierarchical",
            Self::Associative => "associative",
            Self::Default => "default",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pattern_based" => Some(Self::PatternBased),
            "hierarchical" => Some(Self::Hierarchical),
            "associative" => Some(Self::Associative),
            "default" => Some(Self::Default),
            _ => None,
        }
    }
}

impl fmt::Display for JourneyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-step scale used by preferences and journey metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    pub start_concept: String,
    /// Concept ids in visiting order, without repeats
    pub path: Vec<String>,
    pub content: BTreeMap<String, ConceptContent>,
    pub metadata: JourneyMetadata,
}

impl Journey {
    /// The journey returned for a missing map or unknown start concept
    pub fn empty(start_concept: impl Into<String>) -> Self {
        Self {
            start_concept: start_concept.into(),
            path: Vec::new(),
            content: BTreeMap::new(),
            metadata: JourneyMetadata::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JourneyMetadata {
    /// How concentrated the path is within one cluster
    pub pattern_focus: Level,
    /// Derived from the mean importance along the path
    pub complexity: Level,
    pub journey_type: JourneyType,
}

impl Default for JourneyMetadata {
    fn default() -> Self {
        Self {
            pattern_focus: Level::Medium,
            complexity: Level::Medium,
            journey_type: JourneyType::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_journey_json() {
        let json = serde_json::to_value(Journey::empty("nowhere")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "start_concept": "nowhere",
                "path": [],
                "content": {},
                "metadata": {
                    "pattern_focus": "medium",
                    "complexity": "medium",
                    "journey_type": "default"
                }
            })
        );
    }

    #[test]
    fn test_journey_type_strings() {
        for t in [
            JourneyType::PatternBased,
            JourneyType::Hierarchical,
            JourneyType::Associative,
            JourneyType::Default,
        ] {
            assert_eq!(JourneyType::parse(t.as_str()), Some(t));
        }
        assert_eq!(JourneyType::parse("spiral"), None);
        assert_eq!(Level::parse("HIGH"), None);
        assert_eq!(Level::parse("high"), Some(Level::High));
    }
}
