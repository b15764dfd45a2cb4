use std::ffi::OsString;
use std::fmt::Write as _;

use colored::Colorize;
use hashlink::LinkedHashMap;
use pfs::TreeNode;

/// Draws a tree the way `tree(1)` does. `label` may add a suffix to a file.
pub fn render_tree<L>(
    root: &str,
    node: &TreeNode<L>,
    label: impl Fn(&L) -> Option<String>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", decorate(root, node, &label));
    if let Some(children) = node.children() {
        render_children(&mut out, children, "", &label);
    }
    out
}

fn render_children<L>(
    out: &mut String,
    children: &LinkedHashMap<OsString, TreeNode<L>>,
    prefix: &str,
    label: &impl Fn(&L) -> Option<String>,
) {
    let count = children.len();
    for (index, (name, child)) in children.iter().enumerate() {
        let (branch, indent) = if index + 1 == count {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        let _ = writeln!(out, "{prefix}{branch}{}", decorate(&name.to_string_lossy(), child, label));
        if let Some(grandchildren) = child.children() {
            render_children(out, grandchildren, &format!("{prefix}{indent}"), label);
        }
    }
}

fn decorate<L>(name: &str, node: &TreeNode<L>, label: &impl Fn(&L) -> Option<String>) -> String {
    match node {
        TreeNode::Directory(_) => name.blue().bold().to_string(),
        TreeNode::Leaf(leaf) => match label(leaf) {
            Some(label) => format!("{name} ({label})"),
            None => name.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory<L>(entries: Vec<(&str, TreeNode<L>)>) -> TreeNode<L> {
        TreeNode::Directory(
            entries
                .into_iter()
                .map(|(name, node)| (OsString::from(name), node))
                .collect(),
        )
    }

    #[test]
    fn test_render_nested_tree() {
        colored::control::set_override(false);
        let tree = directory(vec![
            (
                "src",
                directory(vec![
                    ("lib.rs", TreeNode::Leaf(3u64)),
                    ("main.rs", TreeNode::Leaf(5u64)),
                ]),
            ),
            ("Cargo.toml", TreeNode::Leaf(7u64)),
        ]);

        let rendered = render_tree("root", &tree, |len| Some(format!("{len} B")));

        assert_eq!(
            rendered,
            "root\n\
             ├── src\n\
             │   ├── lib.rs (3 B)\n\
             │   └── main.rs (5 B)\n\
             └── Cargo.toml (7 B)\n"
        );
    }

    #[test]
    fn test_render_single_leaf_without_label() {
        colored::control::set_override(false);
        let tree: TreeNode = TreeNode::Leaf("file".to_string());

        assert_eq!(render_tree("lonely.txt", &tree, |_| None), "lonely.txt\n");
    }
}
