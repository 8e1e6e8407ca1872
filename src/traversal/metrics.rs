//! Aggregate metrics derived from a generated step sequence

use serde::Serialize;

use super::step::Step;

/// Summary statistics for one generated plan.
///
/// Built incrementally while steps are generated. The running stack-size
/// maximum matters for the iterative algorithm, where the peak between
/// pushes is not always captured by any single step's `stack_size` field;
/// for the recursive algorithm the per-step maximum is equivalent, but both
/// generators feed the collector the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanMetrics {
    /// Total number of steps in the plan.
    pub total_steps: usize,
    /// Deepest node depth encountered, root at 0.
    pub max_depth: usize,
    /// Largest simulated stack observed at any point during generation.
    pub max_stack_size: usize,
}

impl PlanMetrics {
    /// Fold one emitted step into the running maxima.
    pub(crate) fn observe_step(&mut self, step: &Step) {
        self.max_depth = self.max_depth.max(step.depth);
        self.max_stack_size = self.max_stack_size.max(step.stack_size);
    }

    /// Fold an explicit stack length into the running maximum, independent of
    /// any step record.
    pub(crate) fn observe_stack_len(&mut self, len: usize) {
        self.max_stack_size = self.max_stack_size.max(len);
    }

    pub(crate) fn set_total(&mut self, total: usize) {
        self.total_steps = total;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::StepKind;
    use crate::tree::Node;

    #[test]
    fn test_observes_running_maxima() {
        let node = Node::File {
            id: "a".to_string(),
            name: "a".to_string(),
            path: "/a".to_string(),
            size: None,
        };
        let mut metrics = PlanMetrics::default();
        metrics.observe_step(&Step::new(StepKind::Visit, &node, 2, String::new(), 3));
        metrics.observe_step(&Step::new(StepKind::Visit, &node, 1, String::new(), 1));
        metrics.observe_stack_len(5);
        metrics.set_total(2);

        assert_eq!(metrics.total_steps, 2);
        assert_eq!(metrics.max_depth, 2);
        assert_eq!(metrics.max_stack_size, 5);
    }

    #[test]
    fn test_default_is_zeroed() {
        let metrics = PlanMetrics::default();
        assert_eq!(metrics.total_steps, 0);
        assert_eq!(metrics.max_depth, 0);
        assert_eq!(metrics.max_stack_size, 0);
    }
}
