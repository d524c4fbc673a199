use rand::Rng;
use tracing::{debug, info, warn};

use crate::config::LayoutConfig;
use crate::domain::knowledge::{Concept, ExtractedKnowledge, Relationship};
use crate::graph::Graph;
use crate::graph::layout::{ForceDirectedLayout, Position};
use crate::random::rng_from_seed;

use super::{KnowledgeMap, MapCluster, MapMetadata, MapNode};

const MIN_NODE_SIZE: f64 = 5.0;
const NODE_SIZE_SPAN: f64 = 15.0;

/// Builds a laid-out [`KnowledgeMap`] from extracted knowledge
#[derive(Debug, Clone, Default)]
pub struct KnowledgeMapBuilder {
    layout: LayoutConfig,
}

impl KnowledgeMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Build the map, seeding the layout from the configuration
    pub fn build(&self, knowledge: &ExtractedKnowledge) -> KnowledgeMap {
        let mut rng = rng_from_seed(self.layout.seed);
        self.build_with_rng(knowledge, &mut rng)
    }

    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        knowledge: &ExtractedKnowledge,
        rng: &mut R,
    ) -> KnowledgeMap {
        if knowledge.concepts.is_empty() {
            return KnowledgeMap::default();
        }

        let mut graph: Graph<&Concept, Relationship> = Graph::new();
        for concept in &knowledge.concepts {
            graph.add_node(concept.text.clone(), concept);
        }
        for rel in &knowledge.relationships {
            let endpoints = (graph.node_id(&rel.source), graph.node_id(&rel.target));
            match endpoints {
                (Some(a), Some(b)) if a != b => {
                    graph.add_edge(a, b, rel.clone());
                }
                _ => debug!(source = %rel.source, target = %rel.target, "Skipping link"),
            }
        }

        let positions = normalize(self.layout_positions(&graph, rng));

        let importances: Vec<f64> = graph.nodes().iter().map(|n| n.data.importance).collect();
        let min_importance = importances.iter().copied().fold(f64::INFINITY, f64::min);
        let max_importance = importances.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let importance_range = span(min_importance, max_importance);

        let nodes: Vec<MapNode> = graph
            .nodes()
            .iter()
            .zip(&positions)
            .map(|(node, position)| MapNode {
                id: node.key.clone(),
                label: node.key.clone(),
                kind: node.data.kind.clone(),
                importance: node.data.importance,
                frequency: node.data.frequency,
                x: position.x,
                y: position.y,
                size: MIN_NODE_SIZE
                    + (node.data.importance - min_importance) / importance_range * NODE_SIZE_SPAN,
            })
            .collect();

        let links: Vec<Relationship> = graph.edges().iter().map(|e| e.data.clone()).collect();

        let clusters: Vec<MapCluster> = knowledge
            .clusters
            .iter()
            .filter_map(|cluster| {
                let members: Vec<&MapNode> =
                    nodes.iter().filter(|n| cluster.contains(&n.id)).collect();
                if members.is_empty() {
                    debug!(cluster = cluster.id, "Dropping cluster without nodes");
                    return None;
                }
                let count = members.len() as f64;
                let center_x = members.iter().map(|n| n.x).sum::<f64>() / count;
                let center_y = members.iter().map(|n| n.y).sum::<f64>() / count;
                Some(MapCluster {
                    id: cluster.id,
                    name: cluster.name.clone(),
                    concepts: cluster.concepts.clone(),
                    center: [center_x, center_y],
                    size: cluster.concepts.len(),
                })
            })
            .collect();

        let metadata = MapMetadata {
            total_nodes: nodes.len(),
            total_links: links.len(),
            total_clusters: clusters.len(),
        };
        info!(
            nodes = metadata.total_nodes,
            links = metadata.total_links,
            clusters = metadata.total_clusters,
            "Knowledge map built"
        );

        KnowledgeMap {
            nodes,
            links,
            clusters,
            hierarchy: knowledge.hierarchy.clone(),
            metadata,
        }
    }

    /// Force-directed positions, or uniform random ones if the layout fails
    fn layout_positions<R: Rng + ?Sized>(
        &self,
        graph: &Graph<&Concept, Relationship>,
        rng: &mut R,
    ) -> Vec<Position> {
        let layout = ForceDirectedLayout::new(self.layout.iterations, self.layout.optimal_distance);
        match layout.compute(graph, rng) {
            Ok(positions) => positions,
            Err(e) => {
                warn!(error = %e, "Layout failed, using random positions");
                (0..graph.node_count())
                    .map(|_| Position::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
                    .collect()
            }
        }
    }
}

/// Per-axis min/max scaling into [0, 1]
fn normalize(positions: Vec<Position>) -> Vec<Position> {
    let (min_x, max_x) = bounds(positions.iter().map(|p| p.x));
    let (min_y, max_y) = bounds(positions.iter().map(|p| p.y));
    let (range_x, range_y) = (span(min_x, max_x), span(min_y, max_y));

    positions
        .into_iter()
        .map(|p| Position::new((p.x - min_x) / range_x, (p.y - min_y) / range_y))
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

/// `max - min`, or 1 when degenerate
fn span(min: f64, max: f64) -> f64 {
    if max > min { max - min } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge::{
        Cluster, ConceptKind, EntityLabel, Hierarchy, RelationshipKind,
    };

    fn knowledge() -> ExtractedKnowledge {
        let concepts = vec![
            Concept::new("graph", ConceptKind::KeyTerm).with_importance(0.9),
            Concept::new("node", ConceptKind::KeyTerm).with_importance(0.5),
            Concept::new("edge", ConceptKind::KeyTerm).with_importance(0.1),
            Concept::new("Euler", ConceptKind::Entity(EntityLabel::Person)).with_importance(0.5),
        ];
        let relationships = vec![
            Relationship::new("graph", "node", RelationshipKind::CoOccurrence).with_weight(3),
            Relationship::new("graph", "edge", RelationshipKind::CoOccurrence),
            Relationship::new("node", "ghost", RelationshipKind::CoOccurrence),
            Relationship::new("edge", "edge", RelationshipKind::Syntactic),
        ];
        let clusters = vec![
            Cluster {
                id: 0,
                name: "graph".into(),
                concepts: vec!["graph".into(), "node".into(), "edge".into()],
            },
            Cluster {
                id: 1,
                name: "Euler".into(),
                concepts: vec!["Euler".into()],
            },
            Cluster {
                id: 2,
                name: "Cluster 2".into(),
                concepts: vec!["missing".into()],
            },
        ];
        ExtractedKnowledge {
            hierarchy: Hierarchy::build(&concepts, 5),
            concepts,
            relationships,
            clusters,
        }
    }

    fn seeded(seed: u64) -> KnowledgeMapBuilder {
        KnowledgeMapBuilder::new().with_layout(LayoutConfig {
            seed: Some(seed),
            ..Default::default()
        })
    }

    #[test]
    fn test_map_shape() {
        let map = seeded(7).build(&knowledge());

        assert_eq!(map.metadata.total_nodes, 4);
        // unknown endpoint and self-loop are skipped
        assert_eq!(map.metadata.total_links, 2);
        // cluster without nodes is dropped
        assert_eq!(map.metadata.total_clusters, 2);
        assert_eq!(map.clusters[0].size, 3);
        assert_eq!(map.node("Euler").unwrap().kind.as_str(), "PERSON");
        assert_eq!(map.hierarchy.roots.len(), 4);
    }

    #[test]
    fn test_coordinates_and_sizes_in_range() {
        let map = seeded(3).build(&knowledge());
        for node in &map.nodes {
            assert!((0.0..=1.0).contains(&node.x), "x out of range: {}", node.x);
            assert!((0.0..=1.0).contains(&node.y), "y out of range: {}", node.y);
            assert!((5.0..=20.0).contains(&node.size));
        }
        assert_eq!(map.node("graph").unwrap().size, 20.0);
        assert_eq!(map.node("edge").unwrap().size, 5.0);
        assert!((map.node("node").unwrap().size - 12.5).abs() < 1e-9);
    }

    #[test]
    fn test_cluster_center_is_member_mean() {
        let map = seeded(5).build(&knowledge());
        let cluster = &map.clusters[0];
        let members: Vec<&MapNode> = cluster
            .concepts
            .iter()
            .filter_map(|c| map.node(c))
            .collect();
        let mean_x = members.iter().map(|n| n.x).sum::<f64>() / members.len() as f64;
        assert!((cluster.center[0] - mean_x).abs() < 1e-12);

        let euler = map.node("Euler").unwrap();
        assert_eq!(map.clusters[1].center, [euler.x, euler.y]);
    }

    #[test]
    fn test_seeded_build_is_reproducible() {
        let a = seeded(42).build(&knowledge());
        let b = seeded(42).build(&knowledge());
        assert_eq!(a, b);
    }

    #[test]
    fn test_failed_layout_falls_back_to_random_positions() {
        // zero optimal distance makes the force-directed layout refuse to run
        let builder = KnowledgeMapBuilder::new().with_layout(LayoutConfig {
            optimal_distance: 0.0,
            seed: Some(1),
            ..Default::default()
        });
        let map = builder.build(&knowledge());

        assert_eq!(map.metadata.total_nodes, 4);
        assert_eq!(map.metadata.total_links, 2);
        for node in &map.nodes {
            assert!((0.0..=1.0).contains(&node.x), "x out of range: {}", node.x);
            assert!((0.0..=1.0).contains(&node.y), "y out of range: {}", node.y);
            assert!((5.0..=20.0).contains(&node.size));
        }
        assert_eq!(map, builder.build(&knowledge()));
    }

    #[test]
    fn test_single_concept_is_centered() {
        let knowledge = ExtractedKnowledge {
            concepts: vec![Concept::new("solo", ConceptKind::KeyTerm).with_importance(0.3)],
            ..Default::default()
        };
        let map = seeded(1).build(&knowledge);
        let node = &map.nodes[0];
        assert_eq!((node.x, node.y, node.size), (0.0, 0.0, 5.0));
    }

    #[test]
    fn test_empty_knowledge_gives_empty_map() {
        let map = KnowledgeMapBuilder::new().build(&ExtractedKnowledge::default());
        assert!(map.is_empty());
        assert!(map.links.is_empty());
        assert_eq!(map.metadata.total_nodes, 0);
    }
}
