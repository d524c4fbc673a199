//! Concept clustering

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{ClusteringAlgorithm, ClusteringConfig};
use crate::graph::community::{Louvain, Partition, connected_components};
use crate::graph::{Graph, NodeId};

use super::concept::Concept;
use super::relationship::Relationship;

/// A group of densely related concepts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub id: usize,
    /// Text of the most important member
    pub name: String,
    /// Member concept texts, in ranking order
    pub concepts: Vec<String>,
}

impl Cluster {
    pub fn contains(&self, concept: &str) -> bool {
        self.concepts.iter().any(|c| c == concept)
    }
}

/// Partition concepts into clusters, largest first
pub fn cluster_concepts<R: Rng + ?Sized>(
    concepts: &[Concept],
    relationships: &[Relationship],
    config: &ClusteringConfig,
    rng: &mut R,
) -> Vec<Cluster> {
    let mut graph: Graph<f64, f64> = Graph::new();
    for concept in concepts {
        graph.add_node(concept.text.clone(), concept.importance);
    }
    for rel in relationships {
        match (graph.node_id(&rel.source), graph.node_id(&rel.target)) {
            (Some(a), Some(b)) => {
                graph.add_edge(a, b, f64::from(rel.weight));
            }
            _ => debug!(source = %rel.source, target = %rel.target, "Skipping relationship to unknown concept"),
        }
    }

    let partition = partition(&graph, config, rng);

    let mut clusters: Vec<Cluster> = partition
        .communities()
        .into_iter()
        .enumerate()
        .map(|(id, members)| Cluster {
            id,
            name: most_important(&graph, &members)
                .map(|m| graph.node(m).key.clone())
                .unwrap_or_else(|| format!("Cluster {id}")),
            concepts: members.iter().map(|&m| graph.node(m).key.clone()).collect(),
        })
        .collect();
    clusters.sort_by(|a, b| b.concepts.len().cmp(&a.concepts.len()));
    clusters
}

fn partition<R: Rng + ?Sized>(
    graph: &Graph<f64, f64>,
    config: &ClusteringConfig,
    rng: &mut R,
) -> Partition {
    match config.algorithm {
        ClusteringAlgorithm::ConnectedComponents => connected_components(graph),
        ClusteringAlgorithm::Modularity => {
            match Louvain::new()
                .with_resolution(config.resolution)
                .detect(graph, rng)
            {
                Some(partition) => partition,
                None => {
                    info!(
                        concepts = graph.node_count(),
                        "No weighted relationships, clustering by connected components"
                    );
                    connected_components(graph)
                }
            }
        }
    }
}

/// First member with the highest importance
fn most_important(graph: &Graph<f64, f64>, members: &[NodeId]) -> Option<NodeId> {
    members.iter().copied().fold(None, |best, candidate| match best {
        Some(b) if graph.node(b).data >= graph.node(candidate).data => Some(b),
        _ => Some(candidate),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge::{ConceptKind, RelationshipKind};
    use crate::random::rng_from_seed;

    fn concept(text: &str, importance: f64) -> Concept {
        Concept::new(text, ConceptKind::KeyTerm).with_importance(importance)
    }

    fn components() -> ClusteringConfig {
        ClusteringConfig {
            algorithm: ClusteringAlgorithm::ConnectedComponents,
            ..Default::default()
        }
    }

    #[test]
    fn test_components_sorted_by_size_and_named() {
        let concepts = vec![
            concept("solo", 0.9),
            concept("cat", 0.3),
            concept("mouse", 0.5),
            concept("garden", 0.5),
        ];
        let relationships = vec![
            Relationship::new("cat", "mouse", RelationshipKind::CoOccurrence),
            Relationship::new("mouse", "garden", RelationshipKind::CoOccurrence),
        ];

        let clusters =
            cluster_concepts(&concepts, &relationships, &components(), &mut rng_from_seed(Some(1)));

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].concepts, vec!["cat", "mouse", "garden"]);
        // first of the equally important members
        assert_eq!(clusters[0].name, "mouse");
        assert_eq!(clusters[0].id, 1);
        assert_eq!(clusters[1].name, "solo");
        assert!(clusters[0].contains("garden"));
    }

    #[test]
    fn test_modularity_without_edges_falls_back() {
        let concepts = vec![concept("a", 0.1), concept("b", 0.2)];
        let clusters = cluster_concepts(
            &concepts,
            &[],
            &ClusteringConfig::default(),
            &mut rng_from_seed(Some(1)),
        );
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].concepts, vec!["a"]);
    }

    #[test]
    fn test_unknown_endpoints_are_ignored() {
        let concepts = vec![concept("a", 0.1)];
        let relationships = vec![Relationship::new("a", "ghost", RelationshipKind::Syntactic)];
        let clusters =
            cluster_concepts(&concepts, &relationships, &components(), &mut rng_from_seed(None));
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].concepts, vec!["a"]);
    }

    #[test]
    fn test_empty_input() {
        let clusters = cluster_concepts(&[], &[], &ClusteringConfig::default(), &mut rng_from_seed(Some(2)));
        assert!(clusters.is_empty());
    }
}
