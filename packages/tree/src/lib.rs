//! # wfm-tree
//!
//! Rebuilds the directory tree of a web file manager (WFM) server from the
//! flat path listing it reports.
//!
//! - [`path`]: queries over a flat listing (descendants, direct children,
//!   display names)
//! - [`TreeNode`]: the labeled, ordered tree
//! - [`TreeBuilder`]: turns a listing into a tree
//!
//! # Example
//!
//! ```rust
//! use wfm_tree::build_subtree;
//!
//! let tree = build_subtree("my server", &["a", "a/b", "a/b/c.txt", "d.txt"]);
//!
//! assert_eq!(tree.children().len(), 2);
//! assert_eq!(tree.find("a/b/c.txt").map(|n| n.label()), Some("c.txt"));
//! ```

pub mod builder;
pub mod node;
pub mod path;

pub use builder::{build_subtree, combine, TreeBuilder, CONNECTED_SERVERS};
pub use node::{TreeNode, Walk, WalkEntry};
pub use path::MatchMode;
