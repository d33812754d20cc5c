//! Arena holding every node of the tree together with the shared text buffer.
//!
//! Edge labels are never copied: each node records the `[start, end)` range of
//! its incoming edge inside the shared text, so there is no separate edge
//! storage. Leaf edges stay [`EdgeEnd::Open`] and resolve their end against
//! the current text length, which is how every leaf grows by one symbol per
//! phase without being touched.
use std::collections::{BTreeMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::InvariantViolation;

pub type NodeId = usize;

/// The root node. It is created with the store and never removed.
pub const ROOT: NodeId = 0;

/// Anything that can label an edge. Ordering keeps children sorted so that
/// traversals are reproducible.
pub trait Symbol: Copy + Eq + Ord + Hash + Debug {}

impl<T: Copy + Eq + Ord + Hash + Debug> Symbol for T {}

/// End of an edge label. `Open` edges end at the global end of the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    Open,
    Closed(usize),
}

/// A view of one edge: `parent --text[start..end]--> child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub parent: NodeId,
    pub child: NodeId,
    pub start: usize,
    pub end: EdgeEnd,
}

#[derive(Debug, Clone)]
struct Node<T> {
    /// Outgoing edges keyed by the first symbol of their label.
    children: BTreeMap<T, NodeId>,

    suffix_link: Option<NodeId>,

    /// Label of the incoming edge.
    start: usize,
    end: EdgeEnd,

    /// String depth. Only meaningful for the root and internal nodes, leaves
    /// derive theirs from `suffix_index`.
    depth: usize,

    /// Start of the suffix spelled by the path to this leaf.
    suffix_index: Option<usize>,
}

impl<T> Node<T> {
    fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            suffix_link: None,
            start: 0,
            end: EdgeEnd::Closed(0),
            depth: 0,
            suffix_index: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeStore<T> {
    text: Vec<T>,
    nodes: Vec<Node<T>>,
}

impl<T: Symbol> Default for TreeStore<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T: Symbol> TreeStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A suffix tree over `n` symbols has at most `2n` nodes.
    #[must_use]
    pub fn with_capacity(symbols: usize) -> Self {
        let mut nodes = Vec::with_capacity(2 * symbols + 1);
        nodes.push(Node::new());
        Self {
            text: Vec::with_capacity(symbols),
            nodes,
        }
    }

    /// Appends a symbol to the shared text, advancing the global end.
    /// Returns the position of the new symbol.
    pub fn push_symbol(&mut self, symbol: T) -> usize {
        self.text.push(symbol);
        self.text.len() - 1
    }

    /// Number of symbols processed so far. Every open edge ends here.
    #[must_use]
    pub fn global_end(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn text(&self) -> &[T] {
        &self.text
    }

    #[must_use]
    pub fn symbol_at(&self, position: usize) -> T {
        self.text[position]
    }

    pub fn create_node(&mut self) -> NodeId {
        self.nodes.push(Node::new());
        self.nodes.len() - 1
    }

    pub fn create_leaf(&mut self, suffix_index: usize) -> NodeId {
        let leaf = self.create_node();
        self.nodes[leaf].suffix_index = Some(suffix_index);
        leaf
    }

    /// Hangs `child` under `parent` with the label `text[start..end]`, keyed
    /// by `text[start]`.
    pub fn add_edge(
        &mut self,
        parent: NodeId,
        child: NodeId,
        start: usize,
        end: EdgeEnd,
    ) -> Result<(), InvariantViolation> {
        let key = self.text[start];
        if self.nodes[parent].children.contains_key(&key) {
            return Err(InvariantViolation::DuplicateEdgeKey { node: parent });
        }
        self.nodes[parent].children.insert(key, child);

        let depth = self.nodes[parent].depth + self.resolve(end) - start;
        let node = &mut self.nodes[child];
        node.start = start;
        node.end = end;
        node.depth = depth;
        Ok(())
    }

    /// Splits `edge` so that its label ends right before `at`, inserting a new
    /// internal node that takes over the remainder `text[at..]` of the label
    /// (including an open end) with the original child below it.
    pub fn split_edge(&mut self, edge: Edge, at: usize) -> Result<NodeId, InvariantViolation> {
        let child = edge.child;
        let start = self.nodes[child].start;
        let end = self.edge_end(child);
        if at <= start || at >= end {
            return Err(InvariantViolation::SplitOutOfBounds {
                node: child,
                at,
                start,
                end,
            });
        }
        let key = self.text[start];
        if self.nodes[edge.parent].children.get(&key) != Some(&child) {
            return Err(InvariantViolation::MisplacedEdgeKey {
                node: edge.parent,
                child,
            });
        }

        let mid = self.create_node();
        let depth = self.nodes[edge.parent].depth + at - start;
        {
            let node = &mut self.nodes[mid];
            node.start = start;
            node.end = EdgeEnd::Closed(at);
            node.depth = depth;
        }
        self.nodes[edge.parent].children.insert(key, mid);
        self.nodes[child].start = at;
        let remainder_key = self.text[at];
        self.nodes[mid].children.insert(remainder_key, child);
        Ok(mid)
    }

    pub fn set_suffix_link(&mut self, node: NodeId, target: NodeId) {
        self.nodes[node].suffix_link = Some(target);
    }

    #[must_use]
    pub fn suffix_link(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node].suffix_link
    }

    #[must_use]
    pub fn edge(&self, node: NodeId, symbol: T) -> Option<Edge> {
        let child = self.walk(node, symbol)?;
        let target = &self.nodes[child];
        Some(Edge {
            parent: node,
            child,
            start: target.start,
            end: target.end,
        })
    }

    /// Child reached from `node` by the edge starting with `symbol`.
    #[must_use]
    pub fn walk(&self, node: NodeId, symbol: T) -> Option<NodeId> {
        self.nodes[node].children.get(&symbol).copied()
    }

    /// Children of `node` in ascending order of their first symbol.
    pub fn children(&self, node: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.nodes[node].children.values().copied()
    }

    #[must_use]
    pub fn child_count(&self, node: NodeId) -> usize {
        self.nodes[node].children.len()
    }

    #[must_use]
    pub fn edge_end(&self, node: NodeId) -> usize {
        self.resolve(self.nodes[node].end)
    }

    #[must_use]
    pub fn edge_start(&self, node: NodeId) -> usize {
        self.nodes[node].start
    }

    #[must_use]
    pub fn edge_len(&self, node: NodeId) -> usize {
        self.edge_end(node) - self.nodes[node].start
    }

    /// Label of the edge entering `node`. Empty for the root.
    #[must_use]
    pub fn label(&self, node: NodeId) -> &[T] {
        &self.text[self.nodes[node].start..self.edge_end(node)]
    }

    /// Number of symbols on the path from the root to `node`.
    #[must_use]
    pub fn depth(&self, node: NodeId) -> usize {
        match self.nodes[node].suffix_index {
            Some(index) => self.global_end() - index,
            None => self.nodes[node].depth,
        }
    }

    /// The string spelled by the path from the root to `node`, as one of its
    /// occurrences in the text.
    #[must_use]
    pub fn path_label(&self, node: NodeId) -> &[T] {
        let end = self.edge_end(node);
        &self.text[end - self.depth(node)..end]
    }

    #[must_use]
    pub fn suffix_index(&self, node: NodeId) -> Option<usize> {
        self.nodes[node].suffix_index
    }

    #[must_use]
    pub fn is_leaf(&self, node: NodeId) -> bool {
        self.nodes[node].children.is_empty()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.suffix_index.is_some()).count()
    }

    fn resolve(&self, end: EdgeEnd) -> usize {
        match end {
            EdgeEnd::Open => self.global_end(),
            EdgeEnd::Closed(end) => end,
        }
    }

    /// Checks the structural invariants of a finished tree: edge keys agree
    /// with their labels, every internal node links to the node one symbol
    /// shallower, link chains end at the root and no suffix has two leaves.
    pub fn verify(&self) -> Result<(), InvariantViolation> {
        let mut seen = HashSet::new();
        for (id, node) in self.nodes.iter().enumerate() {
            for (key, &child) in &node.children {
                let label_start = self.nodes[child].start;
                if self.edge_len(child) == 0 || self.text[label_start] != *key {
                    return Err(InvariantViolation::MisplacedEdgeKey { node: id, child });
                }
            }

            if let Some(index) = node.suffix_index {
                if !seen.insert(index) {
                    return Err(InvariantViolation::DuplicateSuffixIndex { index });
                }
                continue;
            }
            if id == ROOT {
                continue;
            }

            let target = node
                .suffix_link
                .ok_or(InvariantViolation::MissingSuffixLink { node: id })?;
            if target >= self.nodes.len() {
                return Err(InvariantViolation::DanglingSuffixLink { node: id, target });
            }
            if self.depth(target) + 1 != node.depth {
                return Err(InvariantViolation::SuffixLinkDepth { node: id, target });
            }
            self.check_link_chain(id)?;
        }
        Ok(())
    }

    fn check_link_chain(&self, start: NodeId) -> Result<(), InvariantViolation> {
        let mut current = start;
        for _ in 0..self.nodes.len() {
            if current == ROOT {
                return Ok(());
            }
            current = match self.nodes[current].suffix_link {
                Some(next) => next,
                None => return Err(InvariantViolation::MissingSuffixLink { node: current }),
            };
        }
        Err(InvariantViolation::SuffixLinkCycle { node: start })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_of(text: &str) -> TreeStore<char> {
        let mut store = TreeStore::new();
        for ch in text.chars() {
            store.push_symbol(ch);
        }
        store
    }

    #[test]
    fn add_edge_rejects_duplicate_keys() {
        let mut store = store_of("abab");
        let first = store.create_leaf(0);
        store.add_edge(ROOT, first, 0, EdgeEnd::Open).unwrap();
        let second = store.create_leaf(2);
        assert_eq!(
            store.add_edge(ROOT, second, 2, EdgeEnd::Open),
            Err(InvariantViolation::DuplicateEdgeKey { node: ROOT })
        );
    }

    #[test]
    fn open_edges_follow_the_global_end() {
        let mut store = store_of("ab");
        let leaf = store.create_leaf(0);
        store.add_edge(ROOT, leaf, 0, EdgeEnd::Open).unwrap();
        assert_eq!(store.label(leaf), &['a', 'b']);
        store.push_symbol('c');
        assert_eq!(store.label(leaf), &['a', 'b', 'c']);
        assert_eq!(store.depth(leaf), 3);
    }

    #[test]
    fn split_keeps_open_remainder() {
        let mut store = store_of("abc");
        let leaf = store.create_leaf(0);
        store.add_edge(ROOT, leaf, 0, EdgeEnd::Open).unwrap();
        let edge = store.edge(ROOT, 'a').unwrap();

        let mid = store.split_edge(edge, 2).unwrap();
        assert_eq!(store.walk(ROOT, 'a'), Some(mid));
        assert_eq!(store.label(mid), &['a', 'b']);
        assert_eq!(store.depth(mid), 2);
        assert_eq!(store.walk(mid, 'c'), Some(leaf));

        store.push_symbol('d');
        assert_eq!(store.label(leaf), &['c', 'd']);
        assert_eq!(store.path_label(leaf), &['a', 'b', 'c', 'd']);
    }

    #[test]
    fn split_outside_the_edge_is_rejected() {
        let mut store = store_of("abc");
        let leaf = store.create_leaf(0);
        store.add_edge(ROOT, leaf, 0, EdgeEnd::Open).unwrap();
        let edge = store.edge(ROOT, 'a').unwrap();
        assert!(matches!(
            store.split_edge(edge, 0),
            Err(InvariantViolation::SplitOutOfBounds { .. })
        ));
        assert!(matches!(
            store.split_edge(edge, 3),
            Err(InvariantViolation::SplitOutOfBounds { .. })
        ));
    }

    #[test]
    fn verify_reports_missing_suffix_link() {
        let mut store = store_of("abc");
        let leaf = store.create_leaf(0);
        store.add_edge(ROOT, leaf, 0, EdgeEnd::Open).unwrap();
        let edge = store.edge(ROOT, 'a').unwrap();
        let mid = store.split_edge(edge, 1).unwrap();
        assert_eq!(
            store.verify(),
            Err(InvariantViolation::MissingSuffixLink { node: mid })
        );
        store.set_suffix_link(mid, ROOT);
        assert_eq!(store.verify(), Ok(()));
    }
}
