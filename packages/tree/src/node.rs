//! The labeled tree that a server listing is rebuilt into.

use serde::{Deserialize, Serialize};

use crate::path::SEPARATOR;

/// A labeled node with ordered children.
///
/// The label is either a title (the overall root or a server's root) or the
/// last segment of a server path. A node without children is a file or an
/// empty directory; the tree alone cannot tell which.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    label: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<TreeNode>,
}

impl TreeNode {
    /// A node with no children.
    pub fn leaf(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(label: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            label: label.into(),
            children,
        }
    }

    /// Append a child after the existing ones.
    pub fn push(&mut self, child: TreeNode) {
        self.children.push(child);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes below this one.
    pub fn len(&self) -> usize {
        self.children.iter().map(|child| 1 + child.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// The direct child with the given label.
    pub fn child(&self, label: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.label == label)
    }

    /// Follow `path` segment by segment from this node.
    ///
    /// An empty path resolves to `self`.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        path.split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Depth-first, pre-order walk over every node below this one.
    pub fn walk(&self) -> Walk<'_> {
        let mut stack = Vec::with_capacity(self.children.len());
        for child in self.children.iter().rev() {
            stack.push((1, child.label.clone(), child));
        }
        Walk { stack }
    }
}

/// An entry produced by [`TreeNode::walk`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry<'a> {
    /// 1 for direct children of the walk's starting node.
    pub depth: usize,
    /// Labels from the starting node down to this one, joined with `/`.
    pub path: String,
    pub node: &'a TreeNode,
}

/// Iterator returned by [`TreeNode::walk`].
pub struct Walk<'a> {
    stack: Vec<(usize, String, &'a TreeNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = WalkEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, path, node) = self.stack.pop()?;

        for child in node.children.iter().rev() {
            let child_path = format!("{}{}{}", path, SEPARATOR, child.label);
            self.stack.push((depth + 1, child_path, child));
        }

        Some(WalkEntry { depth, path, node })
    }
}
