//! Step records: the atomic events a traversal is replayed from

use clap::ValueEnum;
use serde::Serialize;

use crate::tree::Node;

/// Which traversal strategy generates the plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Pre-order descent with explicit recurse/return/complete markers.
    #[default]
    Recursive,
    /// Explicit LIFO stack producing the same visit order.
    Iterative,
}

impl Algorithm {
    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::Recursive => "recursive",
            Algorithm::Iterative => "iterative",
        }
    }
}

/// The kind of a single traversal event.
///
/// Recursive plans use `Visit`/`Recurse`/`Return`/`Complete`; iterative plans
/// use `Visit`/`Push`, where a `Visit` corresponds to a pop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Visit,
    Recurse,
    Return,
    Complete,
    Push,
}

impl StepKind {
    pub fn label(&self) -> &'static str {
        match self {
            StepKind::Visit => "visit",
            StepKind::Recurse => "recurse",
            StepKind::Return => "return",
            StepKind::Complete => "complete",
            StepKind::Push => "push",
        }
    }
}

/// One immutable traversal event.
///
/// Steps are produced in full before playback begins and never mutated;
/// playback only advances a cursor over them. Node fields are owned copies
/// so a plan outlives any borrow of the tree; [`Node::find`] recovers the
/// full node by id when needed.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    pub kind: StepKind,
    pub node_id: String,
    pub node_name: String,
    pub node_path: String,
    /// Distance from the root, root at 0.
    pub depth: usize,
    /// Human-readable description shown in the execution log.
    pub action: String,
    /// Size of the conceptual call stack or explicit stack at this instant.
    pub stack_size: usize,
}

impl Step {
    pub(crate) fn new(
        kind: StepKind,
        node: &Node,
        depth: usize,
        action: String,
        stack_size: usize,
    ) -> Self {
        Self {
            kind,
            node_id: node.id().to_string(),
            node_name: node.name().to_string(),
            node_path: node.path().to_string(),
            depth,
            action,
            stack_size,
        }
    }
}
