//! Per-concept study content

use serde::{Deserialize, Serialize};

use crate::domain::knowledge::{ConceptKind, RelationshipKind};

/// Content shown for one concept of a journey
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptContent {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ConceptKind,
    pub importance: f64,
    /// Name of the first cluster listing the concept
    pub cluster: Option<String>,
    pub description: String,
    pub pattern_insights: Vec<String>,
    pub examples: Vec<String>,
    /// Strongest links first, at most five
    pub related_concepts: Vec<RelatedConcept>,
    pub visual_elements: Vec<VisualElement>,
    pub learning_activities: Vec<LearningActivity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedConcept {
    pub id: String,
    pub relationship_type: RelationshipKind,
    pub strength: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualElement {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningActivity {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// The descriptive part of [`ConceptContent`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthoredContent {
    pub description: String,
    pub pattern_insights: Vec<String>,
    pub examples: Vec<String>,
    pub visual_elements: Vec<VisualElement>,
    pub learning_activities: Vec<LearningActivity>,
}

/// Writes the descriptive fields for a concept
pub trait ContentAuthor {
    fn author(&self, label: &str, cluster: Option<&str>) -> AuthoredContent;
}

/// Fixed templates parameterized by concept label and cluster name
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderAuthor;

impl ContentAuthor for PlaceholderAuthor {
    fn author(&self, label: &str, cluster: Option<&str>) -> AuthoredContent {
        let cluster = cluster.unwrap_or("unclustered");
        AuthoredContent {
            description: format!(
                "This is a detailed explanation of the concept '{label}'. \
                 A complete treatment would cover its definition, context and uses."
            ),
            pattern_insights: vec![
                "This concept forms part of a larger pattern in the knowledge domain.".into(),
                format!(
                    "It belongs to the cluster '{cluster}' which represents a key area of knowledge."
                ),
                "Understanding this concept helps reveal connections between seemingly disparate ideas."
                    .into(),
            ],
            examples: vec![
                "Example 1: Application in a real-world context".into(),
                "Example 2: Illustration of the concept in practice".into(),
                "Example 3: Case study demonstrating the concept's importance".into(),
            ],
            visual_elements: vec![
                visual("diagram", "Conceptual diagram showing relationships to other concepts"),
                visual("image", "Visual representation of the concept"),
            ],
            learning_activities: vec![
                activity(
                    "pattern_recognition",
                    "Identify patterns related to this concept in different contexts",
                ),
                activity(
                    "connection_mapping",
                    "Map connections between this concept and previously learned concepts",
                ),
                activity("application", "Apply this concept to solve a novel problem"),
            ],
        }
    }
}

fn visual(kind: &str, description: &str) -> VisualElement {
    VisualElement {
        kind: kind.into(),
        description: description.into(),
    }
}

fn activity(kind: &str, description: &str) -> LearningActivity {
    LearningActivity {
        kind: kind.into(),
        description: description.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_mentions_label_and_cluster() {
        let content = PlaceholderAuthor.author("graph theory", Some("graphs"));
        assert!(content.description.contains("'graph theory'"));
        assert!(content.pattern_insights[1].contains("'graphs'"));
        assert_eq!(content.examples.len(), 3);
        assert_eq!(content.visual_elements[0].kind, "diagram");
        assert_eq!(content.learning_activities.len(), 3);
    }

    #[test]
    fn test_placeholder_without_cluster() {
        let content = PlaceholderAuthor.author("x", None);
        assert!(content.pattern_insights[1].contains("'unclustered'"));
    }
}
