//! Explicit graph structures and algorithms
//!
//! Concept graphs are small (at most a few hundred nodes), so everything here
//! favours predictable iteration order over raw speed: nodes and edges keep
//! insertion order, which makes every algorithm built on top reproducible
//! given the same input and seed.
//!
//! - [`Graph`]: undirected graph with a node table, an edge table and
//!   per-node adjacency lists. At most one edge per unordered pair.
//! - [`DiGraph`]: directed graph used for containment hierarchies.
//! - [`community`]: Louvain modularity optimization and connected components.
//! - [`layout`]: Fruchterman-Reingold force-directed placement.

pub mod community;
pub mod layout;

use std::collections::{HashMap, HashSet};

/// Index into a graph's node table
pub type NodeId = usize;

/// Index into a graph's edge table
pub type EdgeId = usize;

/// Edge payloads that carry a numeric weight
pub trait EdgeWeight {
    fn weight(&self) -> f64;
}

impl EdgeWeight for f64 {
    fn weight(&self) -> f64 {
        *self
    }
}

/// A node with its lookup key and payload
#[derive(Debug, Clone)]
pub struct Node<N> {
    pub key: String,
    pub data: N,
}

/// An undirected edge; `source`/`target` keep the orientation of first insertion
#[derive(Debug, Clone)]
pub struct Edge<E> {
    pub source: NodeId,
    pub target: NodeId,
    pub data: E,
}

/// Undirected graph without self-loops or parallel edges
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<Node<N>>,
    node_index: HashMap<String, NodeId>,
    edges: Vec<Edge<E>>,
    edge_index: HashMap<(NodeId, NodeId), EdgeId>,
    adjacency: Vec<Vec<(NodeId, EdgeId)>>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            adjacency: Vec::new(),
        }
    }

    /// Add a node, or replace the payload of an existing node with the same key
    pub fn add_node(&mut self, key: impl Into<String>, data: N) -> NodeId {
        let key = key.into();
        if let Some(&id) = self.node_index.get(&key) {
            self.nodes[id].data = data;
            return id;
        }

        let id = self.nodes.len();
        self.node_index.insert(key.clone(), id);
        self.nodes.push(Node { key, data });
        self.adjacency.push(Vec::new());
        id
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.node_index.get(key).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node<N> {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[Node<N>] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edges(&self) -> &[Edge<E>] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edge between `a` and `b` in either orientation
    pub fn find_edge(&self, a: NodeId, b: NodeId) -> Option<EdgeId> {
        self.edge_index.get(&pair_key(a, b)).copied()
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<E> {
        &self.edges[id]
    }

    /// Insert an edge or update the existing one between the same pair
    ///
    /// Returns `None` for self-loops, which are never stored.
    pub fn upsert_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        insert: impl FnOnce() -> E,
        update: impl FnOnce(&mut E),
    ) -> Option<EdgeId> {
        if a == b {
            return None;
        }
        if let Some(id) = self.find_edge(a, b) {
            update(&mut self.edges[id].data);
            return Some(id);
        }

        let id = self.edges.len();
        self.edges.push(Edge {
            source: a,
            target: b,
            data: insert(),
        });
        self.edge_index.insert(pair_key(a, b), id);
        self.adjacency[a].push((b, id));
        self.adjacency[b].push((a, id));
        Some(id)
    }

    /// Add an edge, replacing the payload if the pair is already connected
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, data: E) -> Option<EdgeId> {
        if let Some(id) = self.find_edge(a, b) {
            self.edges[id].data = data;
            return Some(id);
        }
        self.upsert_edge(a, b, || data, |_| {})
    }

    /// Neighbours of `id` with the connecting edge payload, in insertion order
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &E)> + '_ {
        self.adjacency[id]
            .iter()
            .map(|&(neighbor, edge)| (neighbor, &self.edges[edge].data))
    }

    pub fn degree(&self, id: NodeId) -> usize {
        self.adjacency[id].len()
    }
}

impl<N, E: EdgeWeight> Graph<N, E> {
    /// Sum of the weights of edges touching `id`
    pub fn weighted_degree(&self, id: NodeId) -> f64 {
        self.neighbors(id).map(|(_, e)| e.weight()).sum()
    }

    /// Sum of all edge weights
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|e| e.data.weight()).sum()
    }
}

fn pair_key(a: NodeId, b: NodeId) -> (NodeId, NodeId) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Directed graph keyed by string, without payloads
#[derive(Debug, Clone, Default)]
pub struct DiGraph {
    keys: Vec<String>,
    index: HashMap<String, NodeId>,
    successors: Vec<Vec<NodeId>>,
    in_degree: Vec<usize>,
    edges: HashSet<(NodeId, NodeId)>,
}

impl DiGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, key: impl Into<String>) -> NodeId {
        let key = key.into();
        if let Some(&id) = self.index.get(&key) {
            return id;
        }
        let id = self.keys.len();
        self.index.insert(key.clone(), id);
        self.keys.push(key);
        self.successors.push(Vec::new());
        self.in_degree.push(0);
        id
    }

    /// Add `from -> to`; returns false for self-loops and duplicates
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> bool {
        if from == to || !self.edges.insert((from, to)) {
            return false;
        }
        self.successors[from].push(to);
        self.in_degree[to] += 1;
        true
    }

    pub fn node_id(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    pub fn key(&self, id: NodeId) -> &str {
        &self.keys[id]
    }

    pub fn successors(&self, id: NodeId) -> &[NodeId] {
        &self.successors[id]
    }

    pub fn in_degree(&self, id: NodeId) -> usize {
        self.in_degree[id]
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.edges.contains(&(from, to))
    }

    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
