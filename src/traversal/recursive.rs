//! Recursive (call-stack) step generation
//!
//! Pre-order descent with explicit markers for every call-stack movement:
//! `visit` when a frame becomes active, `recurse`/`return` bracketing each
//! child call, `complete` when the frame unwinds. Stack sizes reproduce real
//! call-stack growth: depth + 1 while a frame is active.

use super::metrics::PlanMetrics;
use super::step::{Step, StepKind};
use crate::tree::Node;

pub(super) fn generate(root: &Node) -> (Vec<Step>, PlanMetrics) {
    let mut steps = Vec::new();
    let mut metrics = PlanMetrics::default();
    walk(root, 0, &mut steps, &mut metrics);
    metrics.set_total(steps.len());
    (steps, metrics)
}

fn walk(node: &Node, depth: usize, steps: &mut Vec<Step>, metrics: &mut PlanMetrics) {
    push_step(
        steps,
        metrics,
        Step::new(
            StepKind::Visit,
            node,
            depth,
            format!("Visiting {}: {}", node.kind_label(), node.name()),
            depth + 1,
        ),
    );

    for child in node.children() {
        push_step(
            steps,
            metrics,
            Step::new(
                StepKind::Recurse,
                child,
                depth + 1,
                format!("Recursing into: {}", child.name()),
                depth + 2,
            ),
        );

        walk(child, depth + 1, steps, metrics);

        push_step(
            steps,
            metrics,
            Step::new(
                StepKind::Return,
                child,
                depth + 1,
                format!("Returning from: {}", child.name()),
                depth + 1,
            ),
        );
    }

    push_step(
        steps,
        metrics,
        Step::new(
            StepKind::Complete,
            node,
            depth,
            format!("Completed: {}", node.name()),
            depth,
        ),
    );
}

fn push_step(steps: &mut Vec<Step>, metrics: &mut PlanMetrics, step: Step) {
    metrics.observe_step(&step);
    steps.push(step);
}
