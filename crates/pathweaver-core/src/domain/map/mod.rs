//! Knowledge map domain
//!
//! A knowledge map is the renderable form of [`ExtractedKnowledge`]: every
//! concept becomes a positioned, sized node, relationships become links and
//! clusters get a centre point. Journeys are generated from maps, so the map
//! is also the unit that gets persisted and reloaded.
//!
//! [`ExtractedKnowledge`]: crate::domain::knowledge::ExtractedKnowledge

mod builder;

use serde::{Deserialize, Serialize};

use crate::domain::knowledge::{ConceptKind, Hierarchy, Relationship};

pub use builder::KnowledgeMapBuilder;

/// Links share the relationship record shape
pub type MapLink = Relationship;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeMap {
    pub nodes: Vec<MapNode>,
    pub links: Vec<MapLink>,
    pub clusters: Vec<MapCluster>,
    pub hierarchy: Hierarchy,
    pub metadata: MapMetadata,
}

/// A positioned concept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapNode {
    pub id: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: ConceptKind,
    #[serde(default = "default_importance")]
    pub importance: f64,
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    /// Normalized to [0, 1]
    pub x: f64,
    /// Normalized to [0, 1]
    pub y: f64,
    /// Display size in [5, 20], proportional to importance
    pub size: f64,
}

fn default_importance() -> f64 {
    0.5
}

fn default_frequency() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapCluster {
    pub id: usize,
    pub name: String,
    pub concepts: Vec<String>,
    /// Mean position of the member nodes
    pub center: [f64; 2],
    /// Number of listed member concepts
    pub size: usize,
}

impl MapCluster {
    pub fn contains(&self, concept: &str) -> bool {
        self.concepts.iter().any(|c| c == concept)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapMetadata {
    pub total_nodes: usize,
    pub total_links: usize,
    pub total_clusters: usize,
}

impl KnowledgeMap {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&MapNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    /// Clusters listing `concept`, in map order
    pub fn clusters_of<'a>(&'a self, concept: &'a str) -> impl Iterator<Item = &'a MapCluster> {
        self.clusters.iter().filter(move |c| c.contains(concept))
    }

    /// Links touching `concept`, excluding self-loops
    pub fn links_of<'a>(&'a self, concept: &'a str) -> impl Iterator<Item = (&'a str, &'a MapLink)> {
        self.links
            .iter()
            .filter_map(move |link| link.other_end(concept).map(|other| (other, link)))
    }
}
