//! Text annotation capability
//!
//! Concept extraction needs sentences, part-of-speech tagged tokens, noun
//! phrase spans, named entities and a handful of dependency roles. Those come
//! from an NLP collaborator behind the [`TextAnnotator`] trait; the extractor
//! never parses text itself.
//!
//! Two annotators ship with the crate:
//!
//! - [`HeuristicAnnotator`]: rule-based, dependency free, good enough for
//!   English prose and for tests.
//! - [`PrecomputedAnnotator`]: replays an [`AnnotatedDocument`] produced by an
//!   external pipeline and stored as JSON.
//!
//! Annotators are built once per process and handed to the extractor
//! explicitly (`Arc<dyn TextAnnotator>`).

mod heuristic;
mod lexicon;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub use heuristic::HeuristicAnnotator;
pub use lexicon::is_stop_word;

/// Produces an [`AnnotatedDocument`] for a piece of raw text
pub trait TextAnnotator: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Annotate `text`
    fn annotate(&self, text: &str) -> Result<AnnotatedDocument>;
}

/// Coarse part-of-speech tags (Universal Dependencies subset)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Noun,
    Propn,
    Verb,
    Aux,
    Adj,
    Adv,
    Det,
    Adp,
    Pron,
    Cconj,
    Num,
    Punct,
    #[serde(other)]
    X,
}

impl PartOfSpeech {
    /// Nouns and proper nouns
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Noun | Self::Propn)
    }
}

/// Dependency roles the extractor cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyRole {
    /// Nominal subject
    #[serde(rename = "nsubj")]
    Subject,
    /// Direct object
    #[serde(rename = "dobj")]
    DirectObject,
    /// Object of a preposition
    #[serde(rename = "pobj")]
    PrepositionalObject,
}

impl DependencyRole {
    pub fn is_subject(&self) -> bool {
        matches!(self, Self::Subject)
    }
}

/// A single token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub text: String,
    pub pos: PartOfSpeech,
    #[serde(default)]
    pub is_stop: bool,
    /// Dependency role, only set for subject/object roles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep: Option<DependencyRole>,
    /// Index of the governing token in [`AnnotatedDocument::tokens`]
    #[serde(default)]
    pub head: usize,
}

/// A sentence; only the surface text is needed downstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
}

/// A noun phrase span
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NounChunk {
    pub text: String,
}

/// A named entity span with its label (`ORG`, `PERSON`, `GPE`, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    pub text: String,
    pub label: String,
}

/// Output of a [`TextAnnotator`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatedDocument {
    pub sentences: Vec<Sentence>,
    pub tokens: Vec<Token>,
    pub noun_chunks: Vec<NounChunk>,
    pub entities: Vec<EntitySpan>,
}

impl AnnotatedDocument {
    /// Number of tokens, the denominator of frequency-based importance
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Head token of `token`, if the index is valid
    pub fn head_of(&self, token: &Token) -> Option<&Token> {
        self.tokens.get(token.head)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Replays annotations computed elsewhere
///
/// The text passed to [`TextAnnotator::annotate`] is ignored; the stored
/// document is returned as-is.
#[derive(Debug, Clone)]
pub struct PrecomputedAnnotator {
    document: AnnotatedDocument,
}

impl PrecomputedAnnotator {
    pub fn new(document: AnnotatedDocument) -> Self {
        Self { document }
    }

    /// Load annotations from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let document: AnnotatedDocument = serde_json::from_str(&contents).map_err(|e| {
            Error::AnnotationFailed(format!("{}: {}", path.display(), e))
        })?;
        Ok(Self::new(document))
    }
}

impl TextAnnotator for PrecomputedAnnotator {
    fn name(&self) -> &str {
        "precomputed"
    }

    fn annotate(&self, _text: &str) -> Result<AnnotatedDocument> {
        Ok(self.document.clone())
    }
}
