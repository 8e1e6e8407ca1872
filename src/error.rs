//! Error types for tree loading and validation

use thiserror::Error;

/// Errors surfaced when loading or validating an input tree.
///
/// Traversal itself cannot fail on a validated tree, so every variant here is
/// reported synchronously before step generation begins.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Two nodes share the same id. Ids key the visited set, so they must be unique.
    #[error("duplicate node id `{0}` in tree")]
    DuplicateId(String),

    /// Two nodes share the same path.
    #[error("duplicate node path `{0}` in tree")]
    DuplicatePath(String),

    /// The tree JSON could not be parsed into a node structure.
    #[error("failed to parse tree: {0}")]
    Parse(#[from] serde_json::Error),

    /// The tree file could not be read.
    #[error("failed to read tree file: {0}")]
    Io(#[from] std::io::Error),
}
