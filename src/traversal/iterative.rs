//! Iterative (explicit stack) step generation
//!
//! Same pre-order visit order as the recursive variant, driven by a LIFO
//! stack instead of the call stack. Children are pushed in reverse declared
//! order so popping yields declared order; every pop is a `visit` step and
//! every push a `push` step.

use super::metrics::PlanMetrics;
use super::step::{Step, StepKind};
use crate::tree::Node;

pub(super) fn generate(root: &Node) -> (Vec<Step>, PlanMetrics) {
    let mut steps = Vec::new();
    let mut metrics = PlanMetrics::default();
    let mut stack: Vec<(&Node, usize)> = vec![(root, 0)];
    metrics.observe_stack_len(stack.len());

    while let Some((node, depth)) = stack.pop() {
        // Stack size before the pop, which is what the visit reports.
        let step = Step::new(
            StepKind::Visit,
            node,
            depth,
            format!("Popped from stack: {}", node.name()),
            stack.len() + 1,
        );
        metrics.observe_step(&step);
        steps.push(step);

        for child in node.children().iter().rev() {
            stack.push((child, depth + 1));
            metrics.observe_stack_len(stack.len());

            let step = Step::new(
                StepKind::Push,
                child,
                depth + 1,
                format!("Pushed to stack: {}", child.name()),
                stack.len(),
            );
            metrics.observe_step(&step);
            steps.push(step);
        }
    }

    metrics.set_total(steps.len());
    (steps, metrics)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(id: &str) -> Node {
        Node::File {
            id: id.to_string(),
            name: id.to_string(),
            path: format!("/{id}"),
            size: None,
        }
    }

    fn folder(id: &str, children: Vec<Node>) -> Node {
        Node::Folder {
            id: id.to_string(),
            name: id.to_string(),
            path: format!("/{id}"),
            children,
        }
    }

    /// root -> [A, B -> [C]]
    fn example_tree() -> Node {
        folder("root", vec![file("a"), folder("b", vec![file("c")])])
    }

    #[test]
    fn test_leaf_emits_single_visit() {
        let (steps, metrics) = generate(&file("lone"));
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].kind, StepKind::Visit);
        assert_eq!(steps[0].stack_size, 1);
        assert_eq!(metrics.max_stack_size, 1);
    }

    #[test]
    fn test_example_tree_step_sequence() {
        let (steps, metrics) = generate(&example_tree());

        let expect: Vec<(StepKind, &str, usize, usize)> = vec![
            (StepKind::Visit, "root", 0, 1),
            (StepKind::Push, "b", 1, 1),
            (StepKind::Push, "a", 1, 2),
            (StepKind::Visit, "a", 1, 2),
            (StepKind::Visit, "b", 1, 1),
            (StepKind::Push, "c", 2, 1),
            (StepKind::Visit, "c", 2, 1),
        ];

        assert_eq!(steps.len(), expect.len());
        for (step, (kind, id, depth, stack)) in steps.iter().zip(expect) {
            assert_eq!(step.kind, kind, "kind mismatch at {id}");
            assert_eq!(step.node_id, id);
            assert_eq!(step.depth, depth, "depth mismatch at {id}");
            assert_eq!(step.stack_size, stack, "stack mismatch at {id}");
        }

        // N + E for N=4 nodes, E=3 edges
        assert_eq!(metrics.total_steps, 7);
        assert_eq!(metrics.max_depth, 2);
        assert_eq!(metrics.max_stack_size, 2);
    }

    #[test]
    fn test_visit_order_is_declared_order() {
        let tree = folder("root", vec![file("x"), file("y"), file("z")]);
        let (steps, _) = generate(&tree);
        let visits: Vec<&str> = steps
            .iter()
            .filter(|s| s.kind == StepKind::Visit)
            .map(|s| s.node_id.as_str())
            .collect();
        assert_eq!(visits, vec!["root", "x", "y", "z"]);
    }

    #[test]
    fn test_action_text() {
        let (steps, _) = generate(&example_tree());
        assert_eq!(steps[0].action, "Popped from stack: root");
        assert_eq!(steps[1].action, "Pushed to stack: b");
    }
}
