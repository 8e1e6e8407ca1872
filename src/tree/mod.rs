//! The immutable input tree
//!
//! A run operates on a rooted tree of folders and files supplied once at
//! startup: built in code, loaded from JSON, or taken from the built-in
//! [`sample_project`]. The model never changes during playback; everything
//! downstream reads it by reference.

mod node;
mod sample;

pub use node::Node;
pub use sample::sample_project;

use std::path::Path;

use crate::error::TreeError;

/// Load a tree from a JSON file and validate it.
///
/// Fails fast on unreadable files, malformed JSON, and duplicate ids or
/// paths, so traversal never has to deal with a bad tree.
pub fn load_tree(path: &Path) -> Result<Node, TreeError> {
    let contents = std::fs::read_to_string(path)?;
    let tree: Node = serde_json::from_str(&contents)?;
    tree.validate()?;
    Ok(tree)
}
