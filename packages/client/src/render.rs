//! Text output for trees and connection results.

use nu_ansi_term::{Color, Style};

use wfm_http::{ConnectionState, ServerOutcome, TreeNode};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Draw `root` as an indented tree.
///
/// With `color`, server roots (depth 1) are bold and nodes with children
/// are blue.
pub fn render_tree(root: &TreeNode, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&paint(color, Style::new().bold(), root.label()));
    out.push('\n');

    let count = root.children().len();
    for (i, child) in root.children().iter().enumerate() {
        render_node(&mut out, child, "", i + 1 == count, 1, color);
    }

    out
}

fn render_node(
    out: &mut String,
    node: &TreeNode,
    prefix: &str,
    last: bool,
    depth: usize,
    color: bool,
) {
    let style = if depth == 1 {
        Style::new().bold()
    } else if !node.is_leaf() {
        Style::new().fg(Color::Blue)
    } else {
        Style::new()
    };

    out.push_str(prefix);
    out.push_str(if last { LAST_BRANCH } else { BRANCH });
    out.push_str(&paint(color, style, node.label()));
    out.push('\n');

    let child_prefix = format!("{}{}", prefix, if last { SPACE } else { PIPE });
    let count = node.children().len();
    for (i, child) in node.children().iter().enumerate() {
        render_node(out, child, &child_prefix, i + 1 == count, depth + 1, color);
    }
}

/// One line per server that did not make it into the tree.
pub fn render_failures(outcomes: &[ServerOutcome], color: bool) -> String {
    outcomes
        .iter()
        .filter_map(|outcome| {
            let error = outcome.error()?;
            let phase = match outcome.state {
                ConnectionState::VerificationFailed => "verification failed",
                ConnectionState::ListingFailed => "listing failed",
                _ => "failed",
            };
            Some(format!(
                "{} {} ({}): {}: {}\n",
                paint(color, Style::new().fg(Color::Red).bold(), "error:"),
                outcome.entry.name,
                outcome.entry.url,
                phase,
                error
            ))
        })
        .collect()
}

fn paint(color: bool, style: Style, text: &str) -> String {
    if color {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wfm_http::{Error, ServerEntry};
    use wfm_tree::{build_subtree, combine, CONNECTED_SERVERS};

    #[test]
    fn renders_plain_tree() {
        let root = combine(
            CONNECTED_SERVERS,
            vec![
                build_subtree("home", &["a", "a/b", "a/b/c.txt", "d.txt"]),
                build_subtree("work", &["notes.md"]),
            ],
        );

        let expected = "\
Connected servers
├── home
│   ├── a
│   │   └── b
│   │       └── c.txt
│   └── d.txt
└── work
    └── notes.md
";
        assert_eq!(render_tree(&root, false), expected);
    }

    #[test]
    fn renders_empty_root() {
        assert_eq!(
            render_tree(&TreeNode::leaf(CONNECTED_SERVERS), false),
            "Connected servers\n"
        );
    }

    #[test]
    fn color_adds_escape_codes() {
        let root = build_subtree("s", &["dir", "dir/f"]);
        let colored = render_tree(&root, true);
        assert!(colored.contains("\u{1b}["));
        assert!(colored.contains("dir"));
    }

    #[test]
    fn failures_list_only_errors() {
        let outcomes = vec![
            ServerOutcome {
                entry: ServerEntry::new("ok", "http://ok.test/"),
                state: ConnectionState::Listed,
                result: Ok(TreeNode::leaf("ok")),
            },
            ServerOutcome {
                entry: ServerEntry::new("nope", "http://nope.test/"),
                state: ConnectionState::VerificationFailed,
                result: Err(Error::NotWfmServer {
                    url: "http://nope.test/".to_string(),
                    token: "apache".to_string(),
                }),
            },
        ];

        let text = render_failures(&outcomes, false);
        assert_eq!(text.lines().count(), 1);
        assert!(text.starts_with("error: nope (http://nope.test/): verification failed:"));
        assert!(text.contains("isn't a WFM server"));
    }
}
