//! Rebuilds a [`TreeNode`] hierarchy from a flat path listing.

use crate::node::TreeNode;
use crate::path::{direct_children_of_with, has_descendants_with, last_segment, MatchMode};

/// Label of the node that holds every server subtree.
pub const CONNECTED_SERVERS: &str = "Connected servers";

/// Builds trees from flat listings.
///
/// Children keep the order in which their paths first appear in the
/// listing; nothing is sorted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeBuilder {
    mode: MatchMode,
}

impl TreeBuilder {
    pub fn new(mode: MatchMode) -> Self {
        Self { mode }
    }

    /// A node labeled `root_label` holding the tree described by `all_paths`.
    pub fn build<S: AsRef<str>>(&self, root_label: impl Into<String>, all_paths: &[S]) -> TreeNode {
        let mut root = TreeNode::leaf(root_label);
        let top_level = direct_children_of_with(self.mode, None, all_paths);
        self.attach(&mut root, all_paths, &top_level);
        root
    }

    fn attach<S: AsRef<str>>(&self, parent: &mut TreeNode, all_paths: &[S], paths: &[&str]) {
        for &path in paths {
            let mut child = TreeNode::leaf(last_segment(path));

            if has_descendants_with(self.mode, path, all_paths) {
                let next = direct_children_of_with(self.mode, Some(path), all_paths);
                self.attach(&mut child, all_paths, &next);
            }

            parent.push(child);
        }
    }
}

/// [`TreeBuilder::build`] with literal prefix matching.
pub fn build_subtree<S: AsRef<str>>(root_label: impl Into<String>, all_paths: &[S]) -> TreeNode {
    TreeBuilder::default().build(root_label, all_paths)
}

/// The overall root: one child per server subtree, in the given order.
pub fn combine(root_label: impl Into<String>, subtrees: impl IntoIterator<Item = TreeNode>) -> TreeNode {
    TreeNode::with_children(root_label, subtrees.into_iter().collect())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::path::segment_count;
    use proptest::prelude::*;

    /// Listings that contain every ancestor of every entry. Segment names all
    /// have the same length, so no name is a string prefix of a sibling.
    fn prefix_closed_listing() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(prop::collection::vec("[a-c]{2}", 1..5), 0..12).prop_map(
            |paths| {
                let mut listing: Vec<String> = Vec::new();
                for segments in paths {
                    for depth in 1..=segments.len() {
                        let path = segments[..depth].join("/");
                        if !listing.contains(&path) {
                            listing.push(path);
                        }
                    }
                }
                listing
            },
        )
    }

    proptest! {
        #[test]
        fn prop_one_node_per_listed_path(listing in prefix_closed_listing()) {
            let tree = build_subtree("root", &listing);
            prop_assert_eq!(tree.len(), listing.len());
        }

        #[test]
        fn prop_depth_is_segment_count(listing in prefix_closed_listing()) {
            let tree = build_subtree("root", &listing);
            for entry in tree.walk() {
                prop_assert!(listing.contains(&entry.path), "unexpected {}", entry.path);
                prop_assert_eq!(entry.depth, segment_count(&entry.path));
            }
        }

        #[test]
        fn prop_modes_agree_without_shared_prefixes(listing in prefix_closed_listing()) {
            prop_assert_eq!(
                build_subtree("root", &listing),
                TreeBuilder::new(MatchMode::Segment).build("root", &listing)
            );
        }
    }
}
