//! Community detection
//!
//! Multi-level Louvain modularity optimization plus a connected-components
//! partition for graphs where modularity is undefined.
//!
//! ## Modularity
//!
//! Q = Σc [ in_c / m − γ · (tot_c / 2m)² ]
//!
//! - in_c: weight of edges inside community c
//! - tot_c: sum of weighted degrees of the members of c
//! - m: total edge weight
//! - γ: resolution (higher means more, smaller communities)
//!
//! Each level moves nodes greedily between neighbouring communities until no
//! move improves Q, then collapses every community into a super-node and
//! repeats on the smaller graph. The visiting order is shuffled with the
//! caller's RNG, so a seeded RNG gives a reproducible partition.

use std::collections::{HashMap, VecDeque};

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use super::{EdgeWeight, Graph, NodeId};

/// Assignment of every node to a community, numbered `0..len()` in node order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    assignment: Vec<usize>,
    count: usize,
}

impl Partition {
    /// Build from arbitrary labels; communities are renumbered by first appearance
    pub fn from_labels(labels: &[usize]) -> Self {
        let (assignment, count) = renumber(labels);
        Self { assignment, count }
    }

    pub fn community_of(&self, node: NodeId) -> usize {
        self.assignment[node]
    }

    pub fn assignment(&self) -> &[usize] {
        &self.assignment
    }

    /// Number of communities
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Members of each community, in node order
    pub fn communities(&self) -> Vec<Vec<NodeId>> {
        let mut members = vec![Vec::new(); self.count];
        for (node, &community) in self.assignment.iter().enumerate() {
            members[community].push(node);
        }
        members
    }
}

/// Louvain modularity optimizer
#[derive(Debug, Clone)]
pub struct Louvain {
    resolution: f64,
    max_passes: usize,
    min_improvement: f64,
}

impl Default for Louvain {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_passes: 100,
            min_improvement: 1e-7,
        }
    }
}

impl Louvain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    /// Partition `graph`; `None` when it has no positive edge weight
    pub fn detect<N, E, R>(&self, graph: &Graph<N, E>, rng: &mut R) -> Option<Partition>
    where
        E: EdgeWeight,
        R: Rng + ?Sized,
    {
        let mut level = Level::from_graph(graph);
        if level.total_weight <= 0.0 {
            return None;
        }

        let mut membership: Vec<usize> = (0..graph.node_count()).collect();
        let mut levels = 0usize;
        loop {
            let (community, moved) = self.move_nodes(&level, rng);
            if !moved {
                break;
            }
            let (renumbered, count) = renumber(&community);
            for super_node in membership.iter_mut() {
                *super_node = renumbered[*super_node];
            }
            level = level.aggregate(&renumbered, count);
            levels += 1;
        }

        let partition = Partition::from_labels(&membership);
        debug!(levels, communities = partition.len(), "Louvain finished");
        Some(partition)
    }

    /// Local moving phase on one level; returns the community of each node
    /// and whether anything moved
    fn move_nodes<R: Rng + ?Sized>(&self, level: &Level, rng: &mut R) -> (Vec<usize>, bool) {
        let n = level.len();
        let two_m = 2.0 * level.total_weight;
        let mut community: Vec<usize> = (0..n).collect();
        let mut totals = level.degrees.clone();

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);

        let mut moved_any = false;
        let mut current = level.modularity(&community, self.resolution);

        for _ in 0..self.max_passes {
            let mut moved = false;

            for &node in &order {
                let own = community[node];
                let k = level.degrees[node];
                let share = k / two_m;
                let links = level.neighbor_communities(node, &community);

                let own_weight = links
                    .iter()
                    .find(|(c, _)| *c == own)
                    .map_or(0.0, |&(_, w)| w);
                let remove_cost = -own_weight + self.resolution * (totals[own] - k) * share;
                totals[own] -= k;

                let mut best = own;
                let mut best_gain = 0.0;
                for &(candidate, weight) in &links {
                    let gain = remove_cost + weight - self.resolution * totals[candidate] * share;
                    if gain > best_gain {
                        best_gain = gain;
                        best = candidate;
                    }
                }

                totals[best] += k;
                community[node] = best;
                if best != own {
                    moved = true;
                }
            }

            if !moved {
                break;
            }
            moved_any = true;

            let updated = level.modularity(&community, self.resolution);
            let gained = updated - current;
            current = updated;
            if gained < self.min_improvement {
                break;
            }
        }

        (community, moved_any)
    }
}

/// One level of the Louvain hierarchy: a compact weighted graph whose nodes
/// are the communities of the level below
struct Level {
    adjacency: Vec<Vec<(usize, f64)>>,
    self_loops: Vec<f64>,
    degrees: Vec<f64>,
    total_weight: f64,
}

impl Level {
    fn from_graph<N, E: EdgeWeight>(graph: &Graph<N, E>) -> Self {
        let adjacency = (0..graph.node_count())
            .map(|id| {
                graph
                    .neighbors(id)
                    .map(|(neighbor, edge)| (neighbor, edge.weight()))
                    .collect()
            })
            .collect();
        Self::new(adjacency, vec![0.0; graph.node_count()])
    }

    fn new(adjacency: Vec<Vec<(usize, f64)>>, self_loops: Vec<f64>) -> Self {
        let degrees: Vec<f64> = adjacency
            .iter()
            .zip(&self_loops)
            .map(|(links, &own)| links.iter().map(|&(_, w)| w).sum::<f64>() + 2.0 * own)
            .collect();
        let total_weight = degrees.iter().sum::<f64>() / 2.0;
        Self {
            adjacency,
            self_loops,
            degrees,
            total_weight,
        }
    }

    fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Weight from `node` to each neighbouring community, in first-seen order
    fn neighbor_communities(&self, node: usize, community: &[usize]) -> Vec<(usize, f64)> {
        let mut links: Vec<(usize, f64)> = Vec::new();
        let mut slot: HashMap<usize, usize> = HashMap::new();
        for &(neighbor, weight) in &self.adjacency[node] {
            let c = community[neighbor];
            match slot.get(&c) {
                Some(&i) => links[i].1 += weight,
                None => {
                    slot.insert(c, links.len());
                    links.push((c, weight));
                }
            }
        }
        links
    }

    fn modularity(&self, community: &[usize], resolution: f64) -> f64 {
        let n = self.len();
        let m = self.total_weight;
        let mut internal = vec![0.0; n];
        let mut totals = vec![0.0; n];

        for node in 0..n {
            let c = community[node];
            totals[c] += self.degrees[node];
            internal[c] += self.self_loops[node];
            for &(neighbor, weight) in &self.adjacency[node] {
                if neighbor > node && community[neighbor] == c {
                    internal[c] += weight;
                }
            }
        }

        internal
            .iter()
            .zip(&totals)
            .map(|(inside, tot)| inside / m - resolution * (tot / (2.0 * m)).powi(2))
            .sum()
    }

    /// Collapse each community into a single node
    fn aggregate(&self, community: &[usize], count: usize) -> Level {
        let mut self_loops = vec![0.0; count];
        let mut pairs: Vec<((usize, usize), f64)> = Vec::new();
        let mut slot: HashMap<(usize, usize), usize> = HashMap::new();

        for node in 0..self.len() {
            let a = community[node];
            self_loops[a] += self.self_loops[node];
            for &(neighbor, weight) in &self.adjacency[node] {
                if neighbor <= node {
                    continue;
                }
                let b = community[neighbor];
                if a == b {
                    self_loops[a] += weight;
                    continue;
                }
                let key = if a < b { (a, b) } else { (b, a) };
                match slot.get(&key) {
                    Some(&i) => pairs[i].1 += weight,
                    None => {
                        slot.insert(key, pairs.len());
                        pairs.push((key, weight));
                    }
                }
            }
        }

        let mut adjacency = vec![Vec::new(); count];
        for ((a, b), weight) in pairs {
            adjacency[a].push((b, weight));
            adjacency[b].push((a, weight));
        }
        Level::new(adjacency, self_loops)
    }
}

/// Relabel communities `0..count` by first appearance
fn renumber(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping: HashMap<usize, usize> = HashMap::new();
    let renumbered = labels
        .iter()
        .map(|label| {
            let next = mapping.len();
            *mapping.entry(*label).or_insert(next)
        })
        .collect();
    (renumbered, mapping.len())
}

/// Connected components, discovered by breadth-first search in node order
pub fn connected_components<N, E>(graph: &Graph<N, E>) -> Partition {
    let n = graph.node_count();
    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut count = 0;

    for start in 0..n {
        if labels[start].is_some() {
            continue;
        }
        labels[start] = Some(count);
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for (neighbor, _) in graph.neighbors(node) {
                if labels[neighbor].is_none() {
                    labels[neighbor] = Some(count);
                    queue.push_back(neighbor);
                }
            }
        }
        count += 1;
    }

    Partition {
        assignment: labels.into_iter().map(|l| l.unwrap_or_default()).collect(),
        count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::rng_from_seed;

    /// Two 4-cliques joined by a single bridge edge
    fn barbell() -> Graph<(), f64> {
        let mut g = Graph::new();
        let ids: Vec<NodeId> = (0..8).map(|i| g.add_node(format!("n{i}"), ())).collect();
        for group in [&ids[0..4], &ids[4..8]] {
            for (i, &a) in group.iter().enumerate() {
                for &b in &group[i + 1..] {
                    g.add_edge(a, b, 1.0);
                }
            }
        }
        g.add_edge(ids[3], ids[4], 1.0);
        g
    }

    #[test]
    fn test_louvain_splits_barbell() {
        let g = barbell();
        let partition = Louvain::new()
            .detect(&g, &mut rng_from_seed(Some(42)))
            .unwrap();

        assert_eq!(partition.len(), 2);
        let left = partition.community_of(0);
        let right = partition.community_of(4);
        assert_ne!(left, right);
        assert!((0..4).all(|n| partition.community_of(n) == left));
        assert!((4..8).all(|n| partition.community_of(n) == right));
        // numbered in node order
        assert_eq!(left, 0);
    }

    #[test]
    fn test_louvain_is_reproducible_with_seed() {
        let g = barbell();
        let a = Louvain::new().detect(&g, &mut rng_from_seed(Some(9)));
        let b = Louvain::new().detect(&g, &mut rng_from_seed(Some(9)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_louvain_without_edges_is_undefined() {
        let mut g: Graph<(), f64> = Graph::new();
        g.add_node("a", ());
        g.add_node("b", ());
        assert!(Louvain::new().detect(&g, &mut rng_from_seed(Some(1))).is_none());
    }

    #[test]
    fn test_isolated_nodes_keep_own_community() {
        let mut g = barbell();
        g.add_node("lonely", ());
        let partition = Louvain::new()
            .detect(&g, &mut rng_from_seed(Some(3)))
            .unwrap();
        assert_eq!(partition.len(), 3);
        assert_eq!(partition.community_of(8), 2);
    }

    #[test]
    fn test_connected_components() {
        let mut g: Graph<(), f64> = Graph::new();
        let a = g.add_node("a", ());
        let b = g.add_node("b", ());
        let c = g.add_node("c", ());
        let d = g.add_node("d", ());
        g.add_edge(a, c, 1.0);
        g.add_edge(b, d, 1.0);

        let partition = connected_components(&g);
        assert_eq!(partition.len(), 2);
        assert_eq!(partition.communities(), vec![vec![a, c], vec![b, d]]);
    }

    #[test]
    fn test_partition_from_labels_renumbers() {
        let partition = Partition::from_labels(&[7, 3, 7, 5]);
        assert_eq!(partition.assignment(), &[0, 1, 0, 2]);
        assert_eq!(partition.len(), 3);
    }
}
