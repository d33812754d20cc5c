//! Pattern matching against a built (or in-progress) tree.
//!
//! Empty patterns and patterns containing the terminator never match; they are
//! answered with `false` or an empty result rather than an error.
use crate::store::{NodeId, Symbol, TreeStore, ROOT};
use crate::traverse::Dfs;
use crate::SuffixTree;

/// Where a matched pattern ends in the tree.
///
/// `node` is the deepest explicit node on the match path. If the match stops
/// inside an edge, `edge` is the child that edge leads to and `offset` counts
/// the symbols consumed on it; otherwise `edge` is `None` and `offset` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locus {
    pub node: NodeId,
    pub edge: Option<NodeId>,
    pub offset: usize,
}

impl Locus {
    #[must_use]
    pub fn ends_on_node(&self) -> bool {
        self.edge.is_none()
    }

    /// Root of the subtree whose leaves are the occurrences of the match.
    #[must_use]
    pub fn subtree(&self) -> NodeId {
        self.edge.unwrap_or(self.node)
    }
}

impl<T: Symbol> TreeStore<T> {
    /// Walks from the root consuming `pattern` edge by edge.
    pub(crate) fn locate(&self, pattern: &[T]) -> Option<Locus> {
        let mut node = ROOT;
        let mut matched = 0;
        while matched < pattern.len() {
            let child = self.walk(node, pattern[matched])?;
            let label = self.label(child);
            let take = label.len().min(pattern.len() - matched);
            if label[..take] != pattern[matched..matched + take] {
                return None;
            }
            matched += take;
            if take < label.len() {
                return Some(Locus {
                    node,
                    edge: Some(child),
                    offset: take,
                });
            }
            node = child;
        }
        Some(Locus {
            node,
            edge: None,
            offset: 0,
        })
    }
}

/// Suffix start indices below a matched position, produced lazily in
/// pre-order with children visited in ascending symbol order.
///
/// Cloning the iterator restarts nothing but copies the traversal state, so a
/// clone taken before iteration replays the same sequence.
#[derive(Debug, Clone)]
pub struct Occurrences<'a, T> {
    nodes: Option<Dfs<'a, T>>,
}

impl<'a, T: Symbol> Occurrences<'a, T> {
    fn empty() -> Self {
        Self { nodes: None }
    }
}

impl<T: Symbol> Iterator for Occurrences<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let nodes = self.nodes.as_mut()?;
        let store = nodes.store();
        nodes.find_map(|node| store.suffix_index(node))
    }
}

impl<T: Symbol> SuffixTree<T> {
    /// Finds where `pattern` ends in the tree.
    #[must_use]
    pub fn locate(&self, pattern: &[T]) -> Option<Locus> {
        if pattern.is_empty() || pattern.contains(&self.terminator) {
            return None;
        }
        self.store.locate(pattern)
    }

    /// Whether `pattern` is a substring of the input.
    #[must_use]
    pub fn contains(&self, pattern: &[T]) -> bool {
        self.locate(pattern).is_some()
    }

    /// Start positions of every occurrence of `pattern` in the input.
    ///
    /// # Examples
    ///
    /// ```
    /// let text: Vec<char> = "abcabxabcd".chars().collect();
    /// let tree = suffix_tree::build(&text, '$').unwrap();
    /// let found: Vec<usize> = tree.occurrences(&['a', 'b']).collect();
    /// assert_eq!(found, vec![0, 6, 3]);
    /// ```
    #[must_use]
    pub fn occurrences(&self, pattern: &[T]) -> Occurrences<'_, T> {
        match self.locate(pattern) {
            Some(locus) => Occurrences {
                nodes: Some(Dfs::new(&self.store, locus.subtree())),
            },
            None => Occurrences::empty(),
        }
    }

    #[must_use]
    pub fn count(&self, pattern: &[T]) -> usize {
        self.occurrences(pattern).count()
    }

    /// Whether `pattern` is a suffix of the input.
    #[must_use]
    pub fn is_suffix(&self, pattern: &[T]) -> bool {
        let Some(locus) = self.locate(pattern) else {
            return false;
        };
        match locus.edge {
            Some(child) => self.store.label(child)[locus.offset] == self.terminator,
            None => self.store.walk(locus.node, self.terminator).is_some(),
        }
    }

    /// The longest substring occurring at least twice, as `(start, len)`.
    ///
    /// This is the deepest node with two or more children. Among equally deep
    /// nodes the first one met in sorted pre-order wins, and `start` is the
    /// occurrence recorded by that node's incoming edge. Returns `None` when no
    /// symbol repeats.
    #[must_use]
    pub fn longest_repeated_substring(&self) -> Option<(usize, usize)> {
        let mut best: Option<NodeId> = None;
        let mut best_depth = 0;
        for node in self.dfs() {
            if node == ROOT || self.store.child_count(node) < 2 {
                continue;
            }
            let depth = self.store.depth(node);
            if depth > best_depth {
                best = Some(node);
                best_depth = depth;
            }
        }
        best.map(|node| (self.store.edge_end(node) - best_depth, best_depth))
    }

    /// Finds the longest common substring between `other` and the input
    /// without adding `other` to the tree.
    ///
    /// Scans `other` once, keeping the longest match ending at each position;
    /// on a mismatch the first symbol of the match is dropped by following a
    /// suffix link.
    #[must_use]
    pub fn longest_common_substring<'q>(&self, other: &'q [T]) -> &'q [T] {
        let store = &self.store;
        let mut node = ROOT;
        let mut len = 0;
        let mut best_start = 0;
        let mut best_len = 0;

        let mut pos = 0;
        while pos < other.len() {
            let symbol = other[pos];
            if symbol != self.terminator && self.can_extend(node, &other[pos - len..pos], symbol) {
                pos += 1;
                len += 1;
                node = self.canonize(node, &other[pos - len..pos]);
                if len > best_len {
                    best_len = len;
                    best_start = pos - len;
                }
                continue;
            }

            if len == 0 {
                pos += 1;
                continue;
            }
            // Drop the first symbol of the current match and retry.
            len -= 1;
            if node != ROOT {
                node = store.suffix_link(node).unwrap_or(ROOT);
            }
            node = self.canonize(node, &other[pos - len..pos]);
        }
        &other[best_start..best_start + best_len]
    }

    /// Whether `matched + symbol` occurs, given that `matched` ends below
    /// `node` without passing another explicit node.
    fn can_extend(&self, node: NodeId, matched: &[T], symbol: T) -> bool {
        let depth = self.store.depth(node);
        if matched.len() == depth {
            return self.store.walk(node, symbol).is_some();
        }
        self.store
            .walk(node, matched[depth])
            .is_some_and(|child| self.store.label(child)[matched.len() - depth] == symbol)
    }

    /// Descends from `node` (which spells a prefix of `matched`) to the
    /// deepest explicit node on the path of `matched`, skipping whole edges.
    fn canonize(&self, mut node: NodeId, matched: &[T]) -> NodeId {
        loop {
            let depth = self.store.depth(node);
            if depth >= matched.len() {
                return node;
            }
            let Some(child) = self.store.walk(node, matched[depth]) else {
                return node;
            };
            if self.store.edge_len(child) > matched.len() - depth {
                return node;
            }
            node = child;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::build;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn locate_reports_mid_edge_positions() {
        let tree = build(&chars("banana"), '$').unwrap();
        let locus = tree.locate(&chars("ban")).unwrap();
        assert!(!locus.ends_on_node());
        assert_eq!(locus.offset, 3);

        let locus = tree.locate(&chars("ana")).unwrap();
        assert!(locus.ends_on_node());
        assert_eq!(tree.store().path_label(locus.node), &chars("ana")[..]);
    }

    #[test]
    fn invalid_patterns_never_match() {
        let tree = build(&chars("banana"), '$').unwrap();
        assert!(!tree.contains(&[]));
        assert!(!tree.contains(&chars("a$")));
        assert_eq!(tree.occurrences(&[]).count(), 0);
        assert_eq!(tree.count(&chars("nab")), 0);
    }

    #[test]
    fn suffixes_are_told_apart_from_substrings() {
        let tree = build(&chars("mississippi"), '$').unwrap();
        assert!(tree.is_suffix(&chars("ppi")));
        assert!(tree.is_suffix(&chars("i")));
        assert!(tree.is_suffix(&chars("mississippi")));
        assert!(!tree.is_suffix(&chars("ssi")));
        assert!(!tree.is_suffix(&chars("pp")));
    }

    #[test]
    fn occurrences_follow_sorted_preorder() {
        let tree = build(&chars("mississippi"), '$').unwrap();
        let found: Vec<usize> = tree.occurrences(&chars("si")).collect();
        assert_eq!(found, vec![6, 3]);
        let found: Vec<usize> = tree.occurrences(&chars("i")).collect();
        assert_eq!(found, vec![10, 7, 4, 1]);
    }

    #[test]
    fn occurrences_can_be_replayed() {
        let tree = build(&chars("peeper"), '$').unwrap();
        let found = tree.occurrences(&chars("e"));
        let replay = found.clone();
        assert_eq!(found.collect::<Vec<_>>(), replay.collect::<Vec<_>>());
    }

    #[test]
    fn longest_repeated_substring_prefers_depth() {
        let text = chars("banana");
        let tree = build(&text, '$').unwrap();
        let (start, len) = tree.longest_repeated_substring().unwrap();
        assert_eq!(&text[start..start + len], &chars("ana")[..]);

        let tree = build(&chars("abc"), '$').unwrap();
        assert_eq!(tree.longest_repeated_substring(), None);
    }

    #[test]
    fn longest_common_substring_with_another_sequence() {
        let tree = build(&chars("VOTEFORTHEGREATALBANIAFORYOU"), '$').unwrap();
        let other = chars("CHOOSETHEGREATALBANIANFUTURE");
        assert_eq!(tree.longest_common_substring(&other), &chars("THEGREATALBANIA")[..]);

        let tree = build(&chars("HHDBBCIAAE"), '$').unwrap();
        assert_eq!(tree.longest_common_substring(&chars("AAFJEHDAEG")).len(), 2);

        assert!(tree.longest_common_substring(&chars("xyz")).is_empty());
    }
}
