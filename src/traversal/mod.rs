//! Step generation: expanding a tree into a replayable event sequence
//!
//! Generation is pure and eager: given a validated tree and an algorithm, it
//! produces the complete ordered step sequence with no timing or display
//! concerns. Playback only ever reads the result. Both algorithms visit
//! every node exactly once, in identical pre-order.

mod iterative;
mod metrics;
mod recursive;
mod step;

pub use metrics::PlanMetrics;
pub use step::{Algorithm, Step, StepKind};

use serde::Serialize;

use crate::error::TreeError;
use crate::tree::Node;

/// A fully generated traversal: the algorithm, its ordered steps, and the
/// metrics collected while generating them.
///
/// Immutable once built; a playback run owns exactly one plan and discards
/// it on reset.
#[derive(Debug, Clone, Serialize)]
pub struct TraversalPlan {
    algorithm: Algorithm,
    steps: Vec<Step>,
    metrics: PlanMetrics,
}

impl TraversalPlan {
    /// Validate the tree and expand it under the chosen algorithm.
    pub fn generate(root: &Node, algorithm: Algorithm) -> Result<Self, TreeError> {
        root.validate()?;
        let (steps, metrics) = match algorithm {
            Algorithm::Recursive => recursive::generate(root),
            Algorithm::Iterative => iterative::generate(root),
        };
        Ok(Self {
            algorithm,
            steps,
            metrics,
        })
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn metrics(&self) -> PlanMetrics {
        self.metrics
    }

    /// Ids of `visit` steps in emission order. Both algorithms produce the
    /// same sequence for the same tree.
    pub fn visit_order(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter(|s| s.kind == StepKind::Visit)
            .map(|s| s.node_id.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::sample_project;

    #[test]
    fn test_generate_rejects_duplicate_ids() {
        let tree = Node::Folder {
            id: "root".to_string(),
            name: "root".to_string(),
            path: "/".to_string(),
            children: vec![
                Node::File {
                    id: "dup".to_string(),
                    name: "one".to_string(),
                    path: "/one".to_string(),
                    size: None,
                },
                Node::File {
                    id: "dup".to_string(),
                    name: "two".to_string(),
                    path: "/two".to_string(),
                    size: None,
                },
            ],
        };
        assert!(TraversalPlan::generate(&tree, Algorithm::Recursive).is_err());
        assert!(TraversalPlan::generate(&tree, Algorithm::Iterative).is_err());
    }

    #[test]
    fn test_both_algorithms_same_visit_order() {
        let tree = sample_project();
        let recursive = TraversalPlan::generate(&tree, Algorithm::Recursive).unwrap();
        let iterative = TraversalPlan::generate(&tree, Algorithm::Iterative).unwrap();
        assert_eq!(recursive.visit_order(), iterative.visit_order());
        assert_eq!(recursive.visit_order().len(), tree.node_count());
    }

    #[test]
    fn test_plan_serializes() {
        let tree = sample_project();
        let plan = TraversalPlan::generate(&tree, Algorithm::Iterative).unwrap();
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains(r#""algorithm":"iterative""#));
        assert!(json.contains(r#""kind":"push""#));
    }
}
