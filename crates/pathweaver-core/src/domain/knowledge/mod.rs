//! Knowledge extraction domain
//!
//! Turns raw document text into an [`ExtractedKnowledge`] record:
//!
//! - **Concepts**: recurring noun phrases, named entities and key terms,
//!   ranked by importance
//! - **Relationships**: undirected weighted links from sentence
//!   co-occurrence and subject/object dependencies
//! - **Hierarchy**: containment tree built from concept texts
//! - **Clusters**: communities of the relationship graph
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pathweaver_core::domain::knowledge::KnowledgeExtractor;
//! use pathweaver_core::nlp::HeuristicAnnotator;
//!
//! let extractor = KnowledgeExtractor::new(Arc::new(HeuristicAnnotator::new()));
//! let knowledge = extractor.extract("Graphs have nodes. Graphs have edges.");
//! println!("{} concepts", knowledge.concepts.len());
//! ```

mod cluster;
mod concept;
mod content;
mod extractor;
mod hierarchy;
mod relationship;

pub use cluster::{Cluster, cluster_concepts};
pub use concept::{Concept, ConceptKind, EntityLabel};
pub use content::{ContentBody, ProcessedContent};
pub use extractor::{ExtractedKnowledge, KnowledgeExtractor, extract_relationships};
pub use hierarchy::{Hierarchy, HierarchyNode};
pub use relationship::{Relationship, RelationshipKind, SyntacticRole};
