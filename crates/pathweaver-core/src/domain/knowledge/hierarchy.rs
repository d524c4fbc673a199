//! Containment hierarchy
//!
//! Concept `A` is an ancestor of `B` when `A`'s text is a case-insensitive
//! substring of `B`'s ("network" → "neural network"). The containment
//! relation can contain cycles when two concepts differ only by case, so the
//! tree is materialized with a guard on the current root-to-node path.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::{DiGraph, NodeId};

use super::concept::Concept;

/// Roots plus one materialized subtree per root
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hierarchy {
    pub roots: Vec<String>,
    pub tree: BTreeMap<String, Vec<HierarchyNode>>,
}

/// A concept and the concepts that contain its text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub concept: String,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// First node for `concept` in pre-order, including `self`
    pub fn find(&self, concept: &str) -> Option<&HierarchyNode> {
        if self.concept == concept {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(concept))
    }

    pub fn child_concepts(&self) -> impl Iterator<Item = &str> {
        self.children.iter().map(|c| c.concept.as_str())
    }
}

impl Hierarchy {
    /// Build the hierarchy for a ranked concept list
    pub fn build(concepts: &[Concept], max_roots: usize) -> Self {
        let graph = containment_graph(concepts);

        let mut importance = vec![0.0; graph.node_count()];
        let mut seen = vec![false; graph.node_count()];
        for concept in concepts {
            if let Some(id) = graph.node_id(&concept.text) {
                if !seen[id] {
                    importance[id] = concept.importance;
                    seen[id] = true;
                }
            }
        }

        let mut root_ids: Vec<NodeId> = (0..graph.node_count())
            .filter(|&id| graph.in_degree(id) == 0)
            .collect();
        if root_ids.is_empty() {
            root_ids = (0..graph.node_count()).collect();
            root_ids.sort_by(|&a, &b| importance[b].total_cmp(&importance[a]));
        }
        root_ids.truncate(max_roots);

        let mut tree = BTreeMap::new();
        for &root in &root_ids {
            let mut path = vec![root];
            tree.insert(graph.key(root).to_string(), subtree(&graph, root, &mut path));
        }

        Self {
            roots: root_ids
                .iter()
                .map(|&id| graph.key(id).to_string())
                .collect(),
            tree,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn is_root(&self, concept: &str) -> bool {
        self.roots.iter().any(|r| r == concept)
    }

    /// Direct children of a root
    pub fn root_children(&self, root: &str) -> Vec<&str> {
        self.tree
            .get(root)
            .map(|nodes| nodes.iter().map(|n| n.concept.as_str()).collect())
            .unwrap_or_default()
    }

    /// First occurrence of `concept` below `root`
    pub fn find_below(&self, root: &str, concept: &str) -> Option<&HierarchyNode> {
        self.tree
            .get(root)?
            .iter()
            .find_map(|node| node.find(concept))
    }

    /// Whether `concept` is `root` or appears anywhere in its subtree
    pub fn is_descendant(&self, root: &str, concept: &str) -> bool {
        root == concept || self.find_below(root, concept).is_some()
    }
}

fn containment_graph(concepts: &[Concept]) -> DiGraph {
    let mut graph = DiGraph::new();
    let ids: Vec<NodeId> = concepts
        .iter()
        .map(|c| graph.add_node(c.text.clone()))
        .collect();
    let lowered: Vec<String> = concepts.iter().map(|c| c.text.to_lowercase()).collect();

    for (i, first) in concepts.iter().enumerate() {
        for (j, second) in concepts.iter().enumerate() {
            if first.text == second.text {
                continue;
            }
            if lowered[j].contains(lowered[i].as_str()) {
                graph.add_edge(ids[i], ids[j]);
            } else if lowered[i].contains(lowered[j].as_str()) {
                graph.add_edge(ids[j], ids[i]);
            }
        }
    }
    graph
}

/// Children of `node`, never re-entering a node already on `path`
fn subtree(graph: &DiGraph, node: NodeId, path: &mut Vec<NodeId>) -> Vec<HierarchyNode> {
    let mut children = Vec::new();
    for &child in graph.successors(node) {
        if path.contains(&child) {
            continue;
        }
        path.push(child);
        let grandchildren = subtree(graph, child, path);
        path.pop();
        children.push(HierarchyNode {
            concept: graph.key(child).to_string(),
            children: grandchildren,
        });
    }
    children
}
