//! Display-stack reconstruction from the step stream

use crate::traversal::{Algorithm, Step, StepKind};

/// Rebuilds the stack shown next to the animation.
///
/// The two algorithms need different interpretations:
///
/// - Iterative: the explicit stack is maintained incrementally — each `push`
///   step adds an entry, each `visit` step removes one (a visit is a pop).
/// - Recursive: the conceptual call stack is synthesized wholesale from the
///   current step's depth, one frame per active call from the root down.
#[derive(Debug, Clone)]
pub struct StackSimulator {
    algorithm: Algorithm,
    frames: Vec<String>,
}

impl StackSimulator {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            frames: Vec::new(),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Fold one step into the simulated stack.
    pub fn apply(&mut self, step: &Step) {
        match self.algorithm {
            Algorithm::Recursive => {
                self.frames = (0..=step.depth).map(|d| format!("traverse(depth={d})")).collect();
            }
            Algorithm::Iterative => match step.kind {
                StepKind::Push => self.frames.push(step.node_name.clone()),
                StepKind::Visit => {
                    self.frames.pop();
                }
                _ => {}
            },
        }
    }

    /// Current frames, bottom of the stack first.
    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
