//! Queries over a flat listing of slash-separated paths.
//!
//! A server reports its files as a flat list such as
//! `["docs", "docs/readme.txt", "logo.png"]`. The functions here answer the
//! questions the tree builder needs: does a path have anything below it,
//! which paths sit directly beneath it, and what is its display name.
//!
//! Nesting is decided with a literal string-prefix test by default, so
//! `"abc"` is treated as having the descendant `"abcdef"`. Use
//! [`MatchMode::Segment`] to require a full `/` boundary instead.

use serde::{Deserialize, Serialize};

/// Separator between path segments.
pub const SEPARATOR: char = '/';

/// How a path is recognised as lying beneath another path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// `child` starts with `parent` as a plain string.
    #[default]
    Prefix,
    /// `child` starts with `parent` followed by `/`.
    Segment,
}

impl MatchMode {
    /// Whether `candidate` lies beneath `parent` (and is not `parent` itself).
    pub fn is_beneath(self, parent: &str, candidate: &str) -> bool {
        if candidate == parent || !candidate.starts_with(parent) {
            return false;
        }

        match self {
            MatchMode::Prefix => true,
            MatchMode::Segment => candidate[parent.len()..].starts_with(SEPARATOR),
        }
    }
}

/// Number of `/`-separated segments in `path`.
///
/// ```rust
/// use wfm_tree::path::segment_count;
///
/// assert_eq!(segment_count("a"), 1);
/// assert_eq!(segment_count("a/b/c.txt"), 3);
/// ```
pub fn segment_count(path: &str) -> usize {
    path.split(SEPARATOR).count()
}

/// The final segment of `path`, used as the node's display name.
///
/// A path without separators is returned unchanged.
pub fn last_segment(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// True if some other entry of `all_paths` starts with `path`.
///
/// This is the literal prefix test: `has_descendants("abc", ["abcx"])` is
/// true even though `abcx` is not nested under `abc/`.
pub fn has_descendants<S: AsRef<str>>(path: &str, all_paths: &[S]) -> bool {
    has_descendants_with(MatchMode::Prefix, path, all_paths)
}

/// [`has_descendants`] with an explicit [`MatchMode`].
pub fn has_descendants_with<S: AsRef<str>>(mode: MatchMode, path: &str, all_paths: &[S]) -> bool {
    all_paths
        .iter()
        .any(|candidate| mode.is_beneath(path, candidate.as_ref()))
}

/// Entries of `all_paths` exactly one level below `parent`, in input order.
///
/// `None` stands for the synthetic root and selects every path without a
/// separator.
pub fn direct_children_of<'a, S: AsRef<str>>(
    parent: Option<&str>,
    all_paths: &'a [S],
) -> Vec<&'a str> {
    direct_children_of_with(MatchMode::Prefix, parent, all_paths)
}

/// [`direct_children_of`] with an explicit [`MatchMode`].
pub fn direct_children_of_with<'a, S: AsRef<str>>(
    mode: MatchMode,
    parent: Option<&str>,
    all_paths: &'a [S],
) -> Vec<&'a str> {
    let paths = all_paths.iter().map(AsRef::as_ref);

    match parent {
        None => paths.filter(|p| !p.contains(SEPARATOR)).collect(),
        Some(parent) => {
            let depth = segment_count(parent) + 1;
            paths
                .filter(|p| mode.is_beneath(parent, p) && segment_count(p) == depth)
                .collect()
        }
    }
}
