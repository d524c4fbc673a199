use std::collections::{BTreeMap, HashMap};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

use crate::domain::knowledge::{ConceptKind, EntityLabel};
use crate::domain::map::{KnowledgeMap, MapCluster, MapNode};
use crate::graph::{Graph, NodeId};
use crate::random::rng_from_seed;

use super::content::{ConceptContent, ContentAuthor, PlaceholderAuthor, RelatedConcept};
use super::preferences::UserPreferences;
use super::{Journey, JourneyMetadata, JourneyType, Level};

/// Concepts appended from the start's cluster in a pattern-based journey
const CLUSTER_PICKS: usize = 3;
/// Concepts appended for linking to several path members
const PATTERN_PICKS: usize = 2;
/// Children of a root start concept in a hierarchical journey
const ROOT_CHILDREN: usize = 4;
const SIBLING_LIMIT: usize = 4;
const CHILD_LIMIT: usize = 6;
/// Steps of an associative walk
const ASSOCIATIVE_STEPS: usize = 5;
/// Direct neighbours in a default journey
const NEIGHBOR_PICKS: usize = 3;
/// Paths shorter than this get padded
const TARGET_LENGTH: usize = 5;
const SIMILAR_PICKS: usize = 3;
const SIMILAR_IMPORTANCE: f64 = 0.2;
const HIGH_FOCUS_SHARE: f64 = 0.7;

/// Generates learning journeys over a knowledge map
#[derive(Debug, Clone, Default)]
pub struct JourneyGenerator<A = PlaceholderAuthor> {
    author: A,
    seed: Option<u64>,
}

impl JourneyGenerator<PlaceholderAuthor> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: ContentAuthor> JourneyGenerator<A> {
    /// Swap the content author
    pub fn with_author<B: ContentAuthor>(self, author: B) -> JourneyGenerator<B> {
        JourneyGenerator {
            author,
            seed: self.seed,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Generate a journey, seeding random choices from the generator's seed
    pub fn generate(
        &self,
        map: Option<&KnowledgeMap>,
        start_concept: &str,
        preferences: Option<&UserPreferences>,
    ) -> Journey {
        let mut rng = rng_from_seed(self.seed);
        self.generate_with_rng(map, start_concept, preferences, &mut rng)
    }

    /// Generate a journey with an explicit RNG
    ///
    /// Never fails: a missing map, an empty start concept or a start concept
    /// that is not in the map yields [`Journey::empty`].
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        map: Option<&KnowledgeMap>,
        start_concept: &str,
        preferences: Option<&UserPreferences>,
        rng: &mut R,
    ) -> Journey {
        let Some(map) = map else {
            debug!("No knowledge map, returning empty journey");
            return Journey::empty(start_concept);
        };
        if start_concept.is_empty() {
            return Journey::empty(start_concept);
        }

        let walk = Walk::new(map);
        let Some(start) = walk.graph.node_id(start_concept) else {
            warn!(start = %start_concept, "Start concept not found in knowledge map");
            return Journey::empty(start_concept);
        };

        let journey_type = select_journey_type(walk.node(start), preferences);
        let path = match journey_type {
            JourneyType::PatternBased => walk.pattern_based(start, rng),
            JourneyType::Hierarchical => walk.hierarchical(start, rng),
            JourneyType::Associative => walk.associative(start, rng),
            JourneyType::Default => walk.default_path(start, rng),
        };

        let content: BTreeMap<String, ConceptContent> = path
            .iter()
            .map(|&id| (walk.key(id).to_string(), self.concept_content(map, walk.node(id))))
            .collect();

        let metadata = JourneyMetadata {
            pattern_focus: walk.pattern_focus(&path),
            complexity: walk.complexity(&path),
            journey_type,
        };

        info!(
            start = %start_concept,
            journey_type = %journey_type,
            length = path.len(),
            "Journey generated"
        );

        Journey {
            start_concept: start_concept.to_string(),
            path: path.iter().map(|&id| walk.key(id).to_string()).collect(),
            content,
            metadata,
        }
    }

    fn concept_content(&self, map: &KnowledgeMap, node: &MapNode) -> ConceptContent {
        let mut related: Vec<RelatedConcept> = map
            .links_of(&node.id)
            .map(|(other, link)| RelatedConcept {
                id: other.to_string(),
                relationship_type: link.kind,
                strength: link.weight,
            })
            .collect();
        related.sort_by(|a, b| b.strength.cmp(&a.strength));
        related.truncate(5);

        let cluster = map.clusters_of(&node.id).next().map(|c| c.name.clone());
        let authored = self.author.author(&node.label, cluster.as_deref());

        ConceptContent {
            title: node.label.clone(),
            kind: node.kind.clone(),
            importance: node.importance,
            cluster,
            description: authored.description,
            pattern_insights: authored.pattern_insights,
            examples: authored.examples,
            related_concepts: related,
            visual_elements: authored.visual_elements,
            learning_activities: authored.learning_activities,
        }
    }
}

/// Strategy by explicit preference, then cognitive style, then concept type
fn select_journey_type(start: &MapNode, preferences: Option<&UserPreferences>) -> JourneyType {
    if let Some(prefs) = preferences {
        if let Some(preferred) = prefs.preferred_journey_type {
            if preferred != JourneyType::Default {
                return preferred;
            }
        }
        if prefs.pattern_seeking_level == Some(Level::High) {
            return JourneyType::PatternBased;
        }
        if prefs.hierarchical_preference == Some(Level::High) {
            return JourneyType::Hierarchical;
        }
        if prefs.associative_preference == Some(Level::High) {
            return JourneyType::Associative;
        }
    }

    match start.kind {
        ConceptKind::NounPhrase | ConceptKind::KeyTerm => JourneyType::PatternBased,
        ConceptKind::Entity(
            EntityLabel::Organization | EntityLabel::Person | EntityLabel::GeopoliticalEntity,
        ) => JourneyType::Hierarchical,
        _ => JourneyType::Associative,
    }
}

/// The map as a weighted graph plus path bookkeeping helpers
struct Walk<'a> {
    map: &'a KnowledgeMap,
    graph: Graph<&'a MapNode, u32>,
}

/// A path under construction; refuses repeats
struct Path {
    order: Vec<NodeId>,
    visited: Vec<bool>,
}

impl Path {
    fn new(start: NodeId, size: usize) -> Self {
        let mut visited = vec![false; size];
        visited[start] = true;
        Self {
            order: vec![start],
            visited,
        }
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn contains(&self, id: NodeId) -> bool {
        self.visited[id]
    }

    fn push(&mut self, id: NodeId) -> bool {
        if self.visited[id] {
            return false;
        }
        self.visited[id] = true;
        self.order.push(id);
        true
    }

    fn prepend(&mut self, id: NodeId) {
        if !self.visited[id] {
            self.visited[id] = true;
            self.order.insert(0, id);
        }
    }

    fn unvisited(&self) -> Vec<NodeId> {
        (0..self.visited.len()).filter(|&id| !self.visited[id]).collect()
    }
}

impl<'a> Walk<'a> {
    fn new(map: &'a KnowledgeMap) -> Self {
        let mut graph: Graph<&MapNode, u32> = Graph::new();
        for node in &map.nodes {
            graph.add_node(node.id.clone(), node);
        }
        for link in &map.links {
            if let (Some(a), Some(b)) = (graph.node_id(&link.source), graph.node_id(&link.target)) {
                graph.add_edge(a, b, link.weight);
            }
        }
        Self { map, graph }
    }

    fn node(&self, id: NodeId) -> &'a MapNode {
        self.graph.node(id).data
    }

    fn key(&self, id: NodeId) -> &str {
        &self.graph.node(id).key
    }

    fn weight(&self, a: NodeId, b: NodeId) -> u32 {
        self.graph
            .find_edge(a, b)
            .map_or(0, |e| self.graph.edge(e).data)
    }

    /// Neighbours sorted by link weight, heaviest first, ties in link order
    fn neighbors_by_weight(&self, id: NodeId) -> Vec<NodeId> {
        let mut neighbors: Vec<(NodeId, u32)> =
            self.graph.neighbors(id).map(|(n, w)| (n, *w)).collect();
        neighbors.sort_by(|a, b| b.1.cmp(&a.1));
        neighbors.into_iter().map(|(n, _)| n).collect()
    }

    fn ids_of<'k>(&self, keys: impl IntoIterator<Item = &'k str>) -> Vec<NodeId> {
        keys.into_iter()
            .filter_map(|k| self.graph.node_id(k))
            .collect()
    }

    fn pattern_based<R: Rng + ?Sized>(&self, start: NodeId, rng: &mut R) -> Vec<NodeId> {
        let primary = self
            .map
            .clusters_of(self.key(start))
            .fold(None::<&MapCluster>, |best, c| match best {
                Some(b) if b.size >= c.size => Some(b),
                _ => Some(c),
            });
        let Some(primary) = primary else {
            debug!(start = %self.key(start), "Start concept has no cluster, using default path");
            return self.default_path(start, rng);
        };

        let mut path = Path::new(start, self.graph.node_count());
        let members = self.ids_of(primary.concepts.iter().map(String::as_str));

        let mut ranked: Vec<(NodeId, u32)> = members
            .iter()
            .filter(|&&m| m != start)
            .map(|&m| (m, self.weight(start, m)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        for &(member, _) in ranked.iter().take(CLUSTER_PICKS) {
            path.push(member);
        }

        let mut candidates: Vec<(NodeId, usize)> = path
            .unvisited()
            .into_iter()
            .filter_map(|id| {
                let links = path
                    .order
                    .iter()
                    .filter(|&&p| self.graph.find_edge(p, id).is_some())
                    .count();
                (links >= 2).then_some((id, links))
            })
            .collect();
        candidates.sort_by(|a, b| b.1.cmp(&a.1));
        for &(id, _) in candidates.iter().take(PATTERN_PICKS) {
            path.push(id);
        }

        for &member in &members {
            if path.len() >= TARGET_LENGTH {
                break;
            }
            path.push(member);
        }

        path.order
    }

    fn hierarchical<R: Rng + ?Sized>(&self, start: NodeId, rng: &mut R) -> Vec<NodeId> {
        let hierarchy = &self.map.hierarchy;
        let start_key = self.key(start);
        let mut path = Path::new(start, self.graph.node_count());

        if hierarchy.is_root(start_key) {
            let children = hierarchy.root_children(start_key);
            for id in self.ids_of(children.into_iter().take(ROOT_CHILDREN)) {
                path.push(id);
            }
        } else if let Some(parent) = hierarchy
            .roots
            .iter()
            .find(|root| hierarchy.is_descendant(root, start_key))
        {
            if let Some(parent_id) = self.graph.node_id(parent) {
                path.prepend(parent_id);
            }

            for sibling in self.ids_of(hierarchy.root_children(parent)) {
                if sibling != start && path.len() < SIBLING_LIMIT {
                    path.push(sibling);
                }
            }

            if let Some(node) = hierarchy.find_below(parent, start_key) {
                for child in self.ids_of(node.child_concepts()) {
                    if path.len() < CHILD_LIMIT {
                        path.push(child);
                    }
                }
            }
        }

        if path.len() < TARGET_LENGTH {
            self.pad_with_similar(&mut path, start, rng);
        }
        path.order
    }

    fn associative<R: Rng + ?Sized>(&self, start: NodeId, rng: &mut R) -> Vec<NodeId> {
        let mut path = Path::new(start, self.graph.node_count());
        let mut current = start;

        for _ in 0..ASSOCIATIVE_STEPS {
            let next = match self
                .neighbors_by_weight(current)
                .into_iter()
                .find(|&n| !path.contains(n))
            {
                Some(neighbor) => Some(neighbor),
                None => path.unvisited().choose(rng).copied(),
            };
            let Some(next) = next else { break };
            path.push(next);
            current = next;
        }

        path.order
    }

    fn default_path<R: Rng + ?Sized>(&self, start: NodeId, rng: &mut R) -> Vec<NodeId> {
        let mut path = Path::new(start, self.graph.node_count());
        for neighbor in self
            .neighbors_by_weight(start)
            .into_iter()
            .take(NEIGHBOR_PICKS)
        {
            path.push(neighbor);
        }
        if path.len() < TARGET_LENGTH {
            self.pad_with_similar(&mut path, start, rng);
        }
        path.order
    }

    /// Append a random sample of concepts whose importance is close to the start's
    fn pad_with_similar<R: Rng + ?Sized>(&self, path: &mut Path, start: NodeId, rng: &mut R) {
        let reference = self.node(start).importance;
        let similar: Vec<NodeId> = path
            .unvisited()
            .into_iter()
            .filter(|&id| (self.node(id).importance - reference).abs() < SIMILAR_IMPORTANCE)
            .collect();

        let picks: Vec<NodeId> = similar
            .choose_multiple(rng, SIMILAR_PICKS.min(similar.len()))
            .copied()
            .collect();
        for id in picks {
            if path.len() < TARGET_LENGTH {
                path.push(id);
            }
        }
    }

    /// `high` when one cluster holds at least 70% of the path, `medium` when
    /// one to three clusters are touched, `low` otherwise
    fn pattern_focus(&self, path: &[NodeId]) -> Level {
        let mut per_cluster: HashMap<usize, usize> = HashMap::new();
        for cluster in &self.map.clusters {
            for &id in path {
                if cluster.contains(self.key(id)) {
                    *per_cluster.entry(cluster.id).or_default() += 1;
                }
            }
        }

        let largest = per_cluster.values().copied().max().unwrap_or(0);
        if !per_cluster.is_empty() && largest as f64 >= path.len() as f64 * HIGH_FOCUS_SHARE {
            Level::High
        } else if (1..=3).contains(&per_cluster.len()) {
            Level::Medium
        } else {
            Level::Low
        }
    }

    fn complexity(&self, path: &[NodeId]) -> Level {
        let average = if path.is_empty() {
            0.5
        } else {
            path.iter().map(|&id| self.node(id).importance).sum::<f64>() / path.len() as f64
        };

        if average > 0.7 {
            Level::High
        } else if average > 0.4 {
            Level::Medium
        } else {
            Level::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::knowledge::{Concept, Hierarchy, Relationship, RelationshipKind};
    use crate::domain::map::MapMetadata;

    fn node(id: &str, kind: ConceptKind, importance: f64) -> MapNode {
        MapNode {
            id: id.into(),
            label: id.into(),
            kind,
            importance,
            frequency: 1,
            x: 0.5,
            y: 0.5,
            size: 5.0,
        }
    }

    fn link(a: &str, b: &str, weight: u32) -> Relationship {
        Relationship::new(a, b, RelationshipKind::CoOccurrence).with_weight(weight)
    }

    fn cluster(id: usize, name: &str, concepts: &[&str]) -> MapCluster {
        MapCluster {
            id,
            name: name.into(),
            concepts: concepts.iter().map(|c| c.to_string()).collect(),
            center: [0.5, 0.5],
            size: concepts.len(),
        }
    }

    fn map(nodes: Vec<MapNode>, links: Vec<Relationship>, clusters: Vec<MapCluster>) -> KnowledgeMap {
        let concepts: Vec<Concept> = nodes
            .iter()
            .map(|n| Concept::new(n.id.clone(), n.kind.clone()).with_importance(n.importance))
            .collect();
        KnowledgeMap {
            metadata: MapMetadata {
                total_nodes: nodes.len(),
                total_links: links.len(),
                total_clusters: clusters.len(),
            },
            hierarchy: Hierarchy::build(&concepts, 5),
            nodes,
            links,
            clusters,
        }
    }

    /// a..e share a cluster; f links to b and c; g floats alone
    fn pattern_map() -> KnowledgeMap {
        let nodes = ["a", "b", "c", "d", "e", "f", "g"]
            .iter()
            .map(|id| node(id, ConceptKind::KeyTerm, 0.1))
            .collect();
        let links = vec![
            link("a", "b", 3),
            link("a", "c", 2),
            link("a", "d", 1),
            link("b", "f", 1),
            link("c", "f", 1),
        ];
        let clusters = vec![
            cluster(0, "a", &["a", "b", "c", "d", "e"]),
            cluster(1, "f", &["f", "g"]),
        ];
        map(nodes, links, clusters)
    }

    /// network ⊂ neural network ⊂ deep neural network; network ⊂ network layer
    fn hierarchy_map() -> KnowledgeMap {
        let nodes = vec![
            node("network", ConceptKind::NounPhrase, 0.5),
            node("neural network", ConceptKind::NounPhrase, 0.5),
            node("deep neural network", ConceptKind::NounPhrase, 0.5),
            node("network layer", ConceptKind::NounPhrase, 0.5),
            node("graph", ConceptKind::NounPhrase, 0.95),
        ];
        map(nodes, vec![link("network", "graph", 1)], vec![])
    }

    fn generate(map: &KnowledgeMap, start: &str, prefs: Option<&UserPreferences>) -> Journey {
        JourneyGenerator::new()
            .with_seed(Some(7))
            .generate(Some(map), start, prefs)
    }

    #[test]
    fn test_pattern_based_path() {
        let journey = generate(&pattern_map(), "a", None);
        assert_eq!(journey.metadata.journey_type, JourneyType::PatternBased);
        assert_eq!(journey.path, vec!["a", "b", "c", "d", "f"]);
        assert_eq!(journey.metadata.pattern_focus, Level::High);
        assert_eq!(journey.metadata.complexity, Level::Low);
    }

    #[test]
    fn test_pattern_based_pads_from_cluster() {
        let mut map = pattern_map();
        map.links.retain(|l| l.source != "b" && l.source != "c");
        let journey = generate(&map, "a", None);
        assert_eq!(journey.path, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_hierarchical_from_root() {
        let prefs = UserPreferences::new().with_journey_type(JourneyType::Hierarchical);
        let journey = generate(&hierarchy_map(), "network", Some(&prefs));

        assert_eq!(journey.metadata.journey_type, JourneyType::Hierarchical);
        assert_eq!(
            journey.path,
            vec!["network", "neural network", "deep neural network", "network layer"]
        );
    }

    #[test]
    fn test_hierarchical_from_inner_node() {
        let prefs = UserPreferences::new().with_hierarchical(Level::High);
        let journey = generate(&hierarchy_map(), "neural network", Some(&prefs));

        assert_eq!(journey.metadata.journey_type, JourneyType::Hierarchical);
        assert_eq!(
            journey.path,
            vec!["network", "neural network", "deep neural network", "network layer"]
        );
    }

    #[test]
    fn test_entities_prefer_hierarchical() {
        let map = map(
            vec![node("Ada Lovelace", ConceptKind::Entity(EntityLabel::Person), 0.8)],
            vec![],
            vec![],
        );
        let journey = generate(&map, "Ada Lovelace", None);
        assert_eq!(journey.metadata.journey_type, JourneyType::Hierarchical);
        assert_eq!(journey.path, vec!["Ada Lovelace"]);
        assert_eq!(journey.metadata.complexity, Level::High);
    }

    #[test]
    fn test_other_entity_labels_prefer_associative() {
        for label in [
            EntityLabel::Location,
            EntityLabel::Product,
            EntityLabel::Event,
            EntityLabel::WorkOfArt,
            EntityLabel::Law,
        ] {
            let map = map(
                vec![
                    node("Alps", ConceptKind::Entity(label), 0.8),
                    node("snow", ConceptKind::KeyTerm, 0.4),
                ],
                vec![link("Alps", "snow", 1)],
                vec![],
            );
            let journey = generate(&map, "Alps", None);
            assert_eq!(journey.metadata.journey_type, JourneyType::Associative, "{label}");
            assert_eq!(journey.path, vec!["Alps", "snow"]);
        }

        for label in [EntityLabel::Organization, EntityLabel::GeopoliticalEntity] {
            let map = map(vec![node("Alps", ConceptKind::Entity(label), 0.8)], vec![], vec![]);
            let journey = generate(&map, "Alps", None);
            assert_eq!(journey.metadata.journey_type, JourneyType::Hierarchical, "{label}");
        }
    }

    #[test]
    fn test_associative_jumps_from_isolated_start() {
        let other = ConceptKind::Other("concept".into());
        let map = map(
            vec![node("x", other.clone(), 0.5), node("y", other, 0.5)],
            vec![],
            vec![],
        );
        let journey = generate(&map, "x", None);
        assert_eq!(journey.metadata.journey_type, JourneyType::Associative);
        assert_eq!(journey.path, vec!["x", "y"]);
    }

    #[test]
    fn test_associative_walk_jumps_when_stuck() {
        let other = ConceptKind::Other("concept".into());
        let map = map(
            vec![
                node("x", other.clone(), 0.5),
                node("y", other.clone(), 0.5),
                node("z", other, 0.5),
            ],
            vec![link("x", "y", 1)],
            vec![],
        );
        let journey = generate(&map, "x", None);
        assert_eq!(journey.metadata.journey_type, JourneyType::Associative);
        assert_eq!(journey.path, vec!["x", "y", "z"]);
        // no clusters touched
        assert_eq!(journey.metadata.pattern_focus, Level::Low);
    }

    #[test]
    fn test_associative_follows_heaviest_link() {
        let prefs = UserPreferences::new().with_associative(Level::High);
        let journey = generate(&pattern_map(), "a", Some(&prefs));
        assert_eq!(journey.path[..3], ["a", "b", "f"]);
        assert_eq!(journey.path[3], "c");
    }

    #[test]
    fn test_unclustered_pattern_start_uses_default_path() {
        let mut map = pattern_map();
        map.clusters.clear();
        for node in map.nodes.iter_mut().skip(1) {
            node.importance = 0.9;
        }
        let journey = generate(&map, "a", None);
        assert_eq!(journey.metadata.journey_type, JourneyType::PatternBased);
        assert_eq!(journey.path, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_content_for_path_concepts() {
        let journey = generate(&pattern_map(), "a", None);
        assert_eq!(journey.content.len(), journey.path.len());

        let a = &journey.content["a"];
        assert_eq!(a.title, "a");
        assert_eq!(a.cluster.as_deref(), Some("a"));
        let related: Vec<(&str, u32)> = a
            .related_concepts
            .iter()
            .map(|r| (r.id.as_str(), r.strength))
            .collect();
        assert_eq!(related, vec![("b", 3), ("c", 2), ("d", 1)]);
        assert!(a.description.contains("'a'"));
    }

    #[test]
    fn test_degenerate_inputs() {
        let map = pattern_map();
        let generator = JourneyGenerator::new();

        for journey in [
            generator.generate(None, "a", None),
            generator.generate(Some(&map), "", None),
            generator.generate(Some(&map), "nowhere", None),
        ] {
            assert!(journey.is_empty());
            assert!(journey.content.is_empty());
            assert_eq!(journey.metadata, JourneyMetadata::default());
        }
    }

    #[test]
    fn test_similar_padding_is_seeded() {
        let nodes: Vec<MapNode> = (0..8)
            .map(|i| node(&format!("n{i}"), ConceptKind::Other("concept".into()), 0.5))
            .collect();
        let map = map(nodes, vec![], vec![]);
        let prefs = UserPreferences::new().with_journey_type(JourneyType::Hierarchical);

        let a = JourneyGenerator::new()
            .with_seed(Some(11))
            .generate(Some(&map), "n3", Some(&prefs));
        let b = JourneyGenerator::new()
            .with_seed(Some(11))
            .generate(Some(&map), "n3", Some(&prefs));

        assert_eq!(a, b);
        // root with no children, padded with three similar concepts
        assert_eq!(a.path.len(), 4);
        assert_eq!(a.path[0], "n3");
    }

    #[test]
    fn test_paths_never_repeat_and_stay_in_map() {
        let map = pattern_map();
        let variants = [
            None,
            Some(UserPreferences::new().with_journey_type(JourneyType::PatternBased)),
            Some(UserPreferences::new().with_journey_type(JourneyType::Hierarchical)),
            Some(UserPreferences::new().with_journey_type(JourneyType::Associative)),
        ];
        for node in &map.nodes {
            for prefs in &variants {
                let journey = generate(&map, &node.id, prefs.as_ref());
                let mut seen = std::collections::HashSet::new();
                for id in &journey.path {
                    assert!(map.contains(id));
                    assert!(seen.insert(id.clone()), "repeated {id}");
                }
                assert_eq!(journey.path[0], node.id);
            }
        }
    }
}
