//! Relationships between concepts
//!
//! Relationships are undirected: at most one record exists per unordered
//! pair of concepts. Repeated evidence increments the weight and unions the
//! syntactic roles seen for the pair.

use serde::{Deserialize, Serialize};

use crate::graph::EdgeWeight;

/// A weighted, undirected relationship between two concepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub source: String,
    pub target: String,
    /// Number of contributions (co-occurring sentences plus syntactic links)
    pub weight: u32,
    /// Kind of the first contribution for this pair
    #[serde(rename = "type", default)]
    pub kind: RelationshipKind,
    /// Syntactic roles observed, in first-seen order
    #[serde(default)]
    pub subtypes: Vec<SyntacticRole>,
}

impl Relationship {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: 1,
            kind,
            subtypes: Vec::new(),
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_subtype(mut self, role: SyntacticRole) -> Self {
        self.add_subtype(role);
        self
    }

    /// Record a syntactic role, ignoring repeats
    pub fn add_subtype(&mut self, role: SyntacticRole) {
        if !self.subtypes.contains(&role) {
            self.subtypes.push(role);
        }
    }

    /// Whether this relationship connects `a` and `b` in either direction
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }

    /// The endpoint opposite `concept`, if `concept` is an endpoint and the
    /// relationship is not a self-loop
    pub fn other_end(&self, concept: &str) -> Option<&str> {
        if self.source == concept && self.target != concept {
            Some(&self.target)
        } else if self.target == concept && self.source != concept {
            Some(&self.source)
        } else {
            None
        }
    }
}

impl EdgeWeight for Relationship {
    fn weight(&self) -> f64 {
        f64::from(self.weight)
    }
}

/// How a relationship was first observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Both concepts appear in the same sentence
    #[default]
    #[serde(rename = "co-occurrence")]
    CoOccurrence,
    /// A subject/object dependency links the concepts
    #[serde(rename = "syntactic")]
    Syntactic,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CoOccurrence => "co-occurrence",
            Self::Syntactic => "syntactic",
        }
    }
}

/// Dependency role behind a syntactic relationship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntacticRole {
    SubjectOf,
    ObjectOf,
}

impl SyntacticRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubjectOf => "subject_of",
            Self::ObjectOf => "object_of",
        }
    }
}
