//! The immutable tree model: folders with ordered children, files as leaves

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// A node in the input tree.
///
/// The JSON shape matches the node records the visualizer consumes:
/// `{"type": "folder", "id": ..., "name": ..., "path": ..., "children": [...]}`
/// or `{"type": "file", ..., "size": "2.1 KB"}`. Children keep their declared
/// order; traversal order depends on it. The tree is never mutated during a
/// run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Folder {
        id: String,
        name: String,
        path: String,
        #[serde(default)]
        children: Vec<Node>,
    },
    File {
        id: String,
        name: String,
        path: String,
        /// Human-readable size annotation, e.g. "2.1 KB".
        #[serde(skip_serializing_if = "Option::is_none")]
        size: Option<String>,
    },
}

impl Node {
    pub fn id(&self) -> &str {
        match self {
            Node::Folder { id, .. } => id,
            Node::File { id, .. } => id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder { name, .. } => name,
            Node::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::Folder { path, .. } => path,
            Node::File { path, .. } => path,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Node::Folder { .. })
    }

    /// Lowercase kind label used in action text and display.
    pub fn kind_label(&self) -> &'static str {
        if self.is_folder() { "folder" } else { "file" }
    }

    pub fn size(&self) -> Option<&str> {
        match self {
            Node::Folder { .. } => None,
            Node::File { size, .. } => size.as_deref(),
        }
    }

    /// Children in declared order. Empty slice for files.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Folder { children, .. } => children,
            Node::File { .. } => &[],
        }
    }

    /// Find a node anywhere in this subtree by id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.id() == id {
                return Some(node);
            }
            stack.extend(node.children());
        }
        None
    }

    /// Total number of nodes in this subtree, root included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .iter()
            .map(Node::node_count)
            .sum::<usize>()
    }

    /// Number of parent-child edges in this subtree.
    pub fn edge_count(&self) -> usize {
        self.node_count() - 1
    }

    /// Height of this subtree, with a lone node at height 0.
    pub fn height(&self) -> usize {
        self.children()
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Check well-formedness before traversal: every id and every path must
    /// appear exactly once.
    ///
    /// Ownership already rules out cycles and multiple roots, so duplicate
    /// identifiers are the only malformation a deserialized tree can carry.
    /// Walks with an explicit stack to stay safe on deep trees.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut ids = HashSet::new();
        let mut paths = HashSet::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            if !ids.insert(node.id()) {
                return Err(TreeError::DuplicateId(node.id().to_string()));
            }
            if !paths.insert(node.path()) {
                return Err(TreeError::DuplicatePath(node.path().to_string()));
            }
            stack.extend(node.children());
        }

        Ok(())
    }
}
