use std::fmt::{self, Display, Write};

use crate::store::{NodeId, Symbol, ROOT};
use crate::SuffixTree;

/// Options for [`SuffixTree::to_dot`].
#[derive(Debug, Clone)]
pub struct DotOptions {
    /// Graph name.
    pub name: String,
    /// Draw suffix links as dashed edges.
    pub suffix_links: bool,
    /// Nodes to fill with the highlight color.
    pub highlight: Vec<NodeId>,
}

impl Default for DotOptions {
    fn default() -> Self {
        Self {
            name: "suffix_tree".to_string(),
            suffix_links: true,
            highlight: Vec::new(),
        }
    }
}

impl<T: Symbol + Display> SuffixTree<T> {
    /// Renders the tree in Graphviz DOT. Leaves are shaded and labeled with
    /// their suffix index.
    #[must_use]
    pub fn to_dot(&self, options: &DotOptions) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dot(&mut out, options);
        out
    }

    fn write_dot(&self, out: &mut String, options: &DotOptions) -> fmt::Result {
        let store = &self.store;
        writeln!(out, "digraph \"{}\" {{", escape(&options.name))?;
        writeln!(out, "    graph [ratio=1];")?;
        writeln!(out, "    node [shape=circle, margin=0.2];")?;
        writeln!(out, "    edge [fontsize=10];")?;

        for node in self.dfs() {
            let label = store
                .suffix_index(node)
                .map(|index| index.to_string())
                .unwrap_or_default();
            let style = if options.highlight.contains(&node) {
                ", style=filled, fillcolor=red"
            } else if store.is_leaf(node) {
                ", style=filled, fillcolor=lightgrey"
            } else {
                ""
            };
            writeln!(out, "    {node} [label=\"{label}\"{style}];")?;
        }

        for node in self.dfs() {
            for child in store.children(node) {
                writeln!(
                    out,
                    "    {node} -> {child} [label=\"{}\"];",
                    escape(&concat(store.label(child)))
                )?;
            }
        }

        if options.suffix_links {
            for node in self.dfs() {
                if let Some(target) = store.suffix_link(node) {
                    writeln!(
                        out,
                        "    {node} -> {target} [style=dashed, color=lightgreen];"
                    )?;
                }
            }
        }
        writeln!(out, "}}")
    }
}

/// Indented edge labels, one edge per line, leaves tagged with their suffix
/// index.
impl<T: Symbol + Display> Display for SuffixTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_subtree(f, ROOT, 0)
    }
}

impl<T: Symbol + Display> SuffixTree<T> {
    fn fmt_subtree(&self, f: &mut fmt::Formatter<'_>, node: NodeId, indent: usize) -> fmt::Result {
        for child in self.store.children(node) {
            write!(f, "{:indent$}{}", "", concat(self.store.label(child)))?;
            match self.store.suffix_index(child) {
                Some(index) => writeln!(f, " [{index}]")?,
                None => writeln!(f)?,
            }
            self.fmt_subtree(f, child, indent + 4)?;
        }
        Ok(())
    }
}

fn concat<T: Display>(symbols: &[T]) -> String {
    symbols.iter().map(ToString::to_string).collect()
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build;

    #[test]
    fn display_indents_by_depth() {
        let text: Vec<char> = "aab".chars().collect();
        let tree = build(&text, '$').unwrap();
        assert_eq!(
            tree.to_string(),
            "$ [3]\na\n    ab$ [0]\n    b$ [1]\nb$ [2]\n"
        );
    }

    #[test]
    fn dot_lists_edges_and_suffix_links() {
        let text: Vec<char> = "aab".chars().collect();
        let tree = build(&text, '$').unwrap();
        let a = tree.store().walk(ROOT, 'a').unwrap();
        let dot = tree.to_dot(&DotOptions::default());

        assert!(dot.starts_with("digraph \"suffix_tree\" {\n"));
        assert!(dot.contains(&format!("0 -> {a} [label=\"a\"];")));
        assert!(dot.contains(&format!("{a} -> 0 [style=dashed, color=lightgreen];")));
        assert!(dot.contains("fillcolor=lightgrey"));
        assert!(dot.trim_end().ends_with('}'));

        let plain = tree.to_dot(&DotOptions {
            suffix_links: false,
            highlight: vec![a],
            ..DotOptions::default()
        });
        assert!(!plain.contains("dashed"));
        assert!(plain.contains(&format!("{a} [label=\"\", style=filled, fillcolor=red];")));
    }

    #[test]
    fn dot_escapes_quotes() {
        let text: Vec<char> = "a\"b".chars().collect();
        let tree = build(&text, '$').unwrap();
        let dot = tree.to_dot(&DotOptions::default());
        assert!(dot.contains("\\\"b$"));
    }
}
