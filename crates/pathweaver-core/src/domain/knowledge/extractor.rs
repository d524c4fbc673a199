//! Concept and relationship extraction
//!
//! Runs the annotator once over the document text and derives four
//! artifacts from the annotations:
//!
//! 1. a ranked concept list (noun phrases, named entities, key terms)
//! 2. weighted relationships from sentence co-occurrence and
//!    subject/object dependencies
//! 3. a containment hierarchy over concept texts
//! 4. a clustering of the relationship graph

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{ClusteringConfig, ExtractionConfig};
use crate::graph::{Graph, NodeId};
use crate::nlp::{AnnotatedDocument, TextAnnotator};
use crate::random::rng_from_seed;

use super::cluster::{Cluster, cluster_concepts};
use super::concept::{Concept, ConceptKind, EntityLabel};
use super::content::ProcessedContent;
use super::hierarchy::Hierarchy;
use super::relationship::{Relationship, RelationshipKind, SyntacticRole};

/// Everything extracted from one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedKnowledge {
    pub concepts: Vec<Concept>,
    pub relationships: Vec<Relationship>,
    pub hierarchy: Hierarchy,
    pub clusters: Vec<Cluster>,
}

impl ExtractedKnowledge {
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }
}

/// Extracts knowledge from text through an injected [`TextAnnotator`]
#[derive(Clone)]
pub struct KnowledgeExtractor {
    annotator: Arc<dyn TextAnnotator>,
    config: ExtractionConfig,
    clustering: ClusteringConfig,
}

impl KnowledgeExtractor {
    pub fn new(annotator: Arc<dyn TextAnnotator>) -> Self {
        Self {
            annotator,
            config: ExtractionConfig::default(),
            clustering: ClusteringConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_clustering(mut self, clustering: ClusteringConfig) -> Self {
        self.clustering = clustering;
        self
    }

    /// Extract from processor output; only the text content is used
    pub fn extract_content(&self, content: &ProcessedContent) -> ExtractedKnowledge {
        self.extract(&content.text())
    }

    /// Extract from raw text, seeding clustering from the configuration
    pub fn extract(&self, text: &str) -> ExtractedKnowledge {
        let mut rng = rng_from_seed(self.clustering.seed);
        self.extract_with_rng(text, &mut rng)
    }

    /// Extract from raw text with an explicit RNG for community detection
    ///
    /// Never fails: empty text or an annotator error yields empty knowledge.
    pub fn extract_with_rng<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> ExtractedKnowledge {
        if text.trim().is_empty() {
            debug!("Empty text, nothing to extract");
            return ExtractedKnowledge::default();
        }

        let doc = match self.annotator.annotate(text) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(annotator = self.annotator.name(), error = %e, "Annotation failed, returning empty knowledge");
                return ExtractedKnowledge::default();
            }
        };

        let concepts = self.extract_concepts(&doc);
        let relationships = extract_relationships(&doc, &concepts);
        let hierarchy = Hierarchy::build(&concepts, self.config.max_roots);
        let clusters = cluster_concepts(&concepts, &relationships, &self.clustering, rng);

        info!(
            annotator = self.annotator.name(),
            tokens = doc.token_count(),
            concepts = concepts.len(),
            relationships = relationships.len(),
            roots = hierarchy.roots.len(),
            clusters = clusters.len(),
            "Knowledge extracted"
        );

        ExtractedKnowledge {
            concepts,
            relationships,
            hierarchy,
            clusters,
        }
    }

    /// Rank noun phrases, entities and key terms into a concept list
    pub fn extract_concepts(&self, doc: &AnnotatedDocument) -> Vec<Concept> {
        let cfg = &self.config;
        let token_count = doc.token_count().max(1) as f64;

        let mut phrases = Tally::default();
        for chunk in &doc.noun_chunks {
            let phrase = normalize_whitespace(&chunk.text.to_lowercase());
            if !phrase.is_empty() && phrase.split(' ').count() <= cfg.max_phrase_words {
                phrases.add(phrase);
            }
        }

        let entities: Vec<(String, EntityLabel)> = doc
            .entities
            .iter()
            .filter_map(|ent| {
                let label = EntityLabel::parse(&ent.label)?;
                let text = normalize_whitespace(&ent.text);
                (!text.is_empty()).then_some((text, label))
            })
            .collect();

        let mut terms = Tally::default();
        for token in &doc.tokens {
            if token.pos.is_nominal()
                && !token.is_stop
                && token.text.chars().count() >= cfg.min_term_chars
            {
                terms.add(token.text.to_lowercase());
            }
        }

        let mut concepts: Vec<Concept> = Vec::new();

        for (phrase, count) in phrases.most_common(cfg.phrase_candidates) {
            if count as usize >= cfg.min_phrase_frequency
                && !concepts.iter().any(|c| c.matches_text(&phrase))
            {
                concepts.push(
                    Concept::new(phrase, ConceptKind::NounPhrase)
                        .with_frequency(count)
                        .with_importance(f64::from(count) / token_count),
                );
            }
        }

        for (text, label) in entities {
            if !concepts.iter().any(|c| c.matches_text(&text)) {
                concepts.push(
                    Concept::new(text, ConceptKind::Entity(label))
                        .with_importance(cfg.entity_importance),
                );
            }
        }

        for (term, count) in terms.most_common(cfg.term_candidates) {
            if count as usize >= cfg.min_term_frequency
                && !concepts.iter().any(|c| c.has_word(&term))
            {
                concepts.push(
                    Concept::new(term, ConceptKind::KeyTerm)
                        .with_frequency(count)
                        .with_importance(f64::from(count) / token_count),
                );
            }
        }

        concepts.sort_by(|a, b| b.importance.partial_cmp(&a.importance).unwrap_or(Ordering::Equal));
        concepts.truncate(cfg.max_concepts);
        concepts
    }
}

/// Co-occurrence and syntactic relationships between `concepts`, heaviest first
pub fn extract_relationships(doc: &AnnotatedDocument, concepts: &[Concept]) -> Vec<Relationship> {
    let mut graph: Graph<(), Relationship> = Graph::new();
    for concept in concepts {
        graph.add_node(concept.text.clone(), ());
    }
    let texts: Vec<String> = graph.nodes().iter().map(|n| n.key.clone()).collect();

    let mut lowered: Vec<(String, NodeId)> = Vec::with_capacity(texts.len());
    for (id, text) in texts.iter().enumerate() {
        let lower = text.to_lowercase();
        if !lowered.iter().any(|(seen, _)| *seen == lower) {
            lowered.push((lower, id));
        }
    }

    for sentence in &doc.sentences {
        let sentence = sentence.text.to_lowercase();
        let present: Vec<NodeId> = lowered
            .iter()
            .filter(|(text, _)| sentence.contains(text.as_str()))
            .map(|&(_, id)| id)
            .collect();

        for (i, &a) in present.iter().enumerate() {
            for &b in &present[i + 1..] {
                graph.upsert_edge(
                    a,
                    b,
                    || Relationship::new(texts[a].clone(), texts[b].clone(), RelationshipKind::CoOccurrence),
                    |rel| rel.weight += 1,
                );
            }
        }
    }

    for token in &doc.tokens {
        let Some(role) = token.dep else { continue };
        let Some(head) = doc.head_of(token) else { continue };

        let token_text = token.text.to_lowercase();
        let head_text = head.text.to_lowercase();
        let token_concept = last_overlapping(&lowered, &token_text);
        let head_concept = last_overlapping(&lowered, &head_text);

        if let (Some(a), Some(b)) = (token_concept, head_concept) {
            if a == b {
                continue;
            }
            let subtype = if role.is_subject() {
                SyntacticRole::SubjectOf
            } else {
                SyntacticRole::ObjectOf
            };
            graph.upsert_edge(
                a,
                b,
                || {
                    Relationship::new(texts[a].clone(), texts[b].clone(), RelationshipKind::Syntactic)
                        .with_subtype(subtype)
                },
                |rel| {
                    rel.weight += 1;
                    rel.add_subtype(subtype);
                },
            );
        }
    }

    let mut relationships: Vec<Relationship> =
        graph.edges().iter().map(|edge| edge.data.clone()).collect();
    relationships.sort_by(|a, b| b.weight.cmp(&a.weight));
    relationships
}

/// Last concept whose text contains `word` or is contained in it
fn last_overlapping(lowered: &[(String, NodeId)], word: &str) -> Option<NodeId> {
    lowered
        .iter()
        .rev()
        .find(|(text, _)| text.contains(word) || word.contains(text.as_str()))
        .map(|&(_, id)| id)
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Occurrence counter that remembers first-seen order for tie-breaking
#[derive(Default)]
struct Tally {
    counts: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl Tally {
    fn add(&mut self, key: String) {
        match self.index.get(&key) {
            Some(&i) => self.counts[i].1 += 1,
            None => {
                self.index.insert(key.clone(), self.counts.len());
                self.counts.push((key, 1));
            }
        }
    }

    /// Up to `n` entries, most frequent first, ties in first-seen order
    fn most_common(self, n: usize) -> Vec<(String, u32)> {
        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n);
        counts
    }
}
