//! Node iterators. Children are always visited in ascending order of the first
//! symbol of their edge, so every traversal of the same tree is identical.
use std::collections::VecDeque;

use crate::store::{NodeId, Symbol, TreeStore, ROOT};
use crate::SuffixTree;

/// Depth-first, pre-order.
#[derive(Debug, Clone)]
pub struct Dfs<'a, T> {
    store: &'a TreeStore<T>,
    stack: Vec<NodeId>,
}

impl<'a, T: Symbol> Dfs<'a, T> {
    #[must_use]
    pub fn new(store: &'a TreeStore<T>, start: NodeId) -> Self {
        Self {
            store,
            stack: vec![start],
        }
    }

    #[must_use]
    pub fn store(&self) -> &'a TreeStore<T> {
        self.store
    }
}

impl<T: Symbol> Iterator for Dfs<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(self.store.children(node).rev());
        Some(node)
    }
}

/// Breadth-first, level by level.
#[derive(Debug, Clone)]
pub struct Bfs<'a, T> {
    store: &'a TreeStore<T>,
    queue: VecDeque<NodeId>,
}

impl<'a, T: Symbol> Bfs<'a, T> {
    #[must_use]
    pub fn new(store: &'a TreeStore<T>, start: NodeId) -> Self {
        Self {
            store,
            queue: VecDeque::from([start]),
        }
    }
}

impl<T: Symbol> Iterator for Bfs<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(self.store.children(node));
        Some(node)
    }
}

impl<T: Symbol> SuffixTree<T> {
    #[must_use]
    pub fn dfs(&self) -> Dfs<'_, T> {
        Dfs::new(&self.store, ROOT)
    }

    #[must_use]
    pub fn bfs(&self) -> Bfs<'_, T> {
        Bfs::new(&self.store, ROOT)
    }
}

#[cfg(test)]
mod tests {
    use crate::build;

    fn labels(tree: &crate::SuffixTree<char>, nodes: impl Iterator<Item = usize>) -> Vec<String> {
        nodes
            .map(|node| tree.store().label(node).iter().collect())
            .collect()
    }

    #[test]
    fn dfs_visits_children_in_symbol_order() {
        let text: Vec<char> = "aab".chars().collect();
        let tree = build(&text, '$').unwrap();
        assert_eq!(
            labels(&tree, tree.dfs()),
            vec!["", "$", "a", "ab$", "b$", "b$"]
        );
    }

    #[test]
    fn bfs_visits_level_by_level() {
        let text: Vec<char> = "aab".chars().collect();
        let tree = build(&text, '$').unwrap();
        assert_eq!(
            labels(&tree, tree.bfs()),
            vec!["", "$", "a", "b$", "ab$", "b$"]
        );
    }

    #[test]
    fn every_node_is_visited_once() {
        let text: Vec<char> = "mississippi".chars().collect();
        let tree = build(&text, '$').unwrap();
        let mut dfs: Vec<usize> = tree.dfs().collect();
        let mut bfs: Vec<usize> = tree.bfs().collect();
        dfs.sort_unstable();
        bfs.sort_unstable();
        assert_eq!(dfs, (0..tree.store().node_count()).collect::<Vec<_>>());
        assert_eq!(dfs, bfs);
    }
}
