//! Ukkonen's online construction.
//!
//! Each call to [`Builder::push`] runs one phase. Leaf edges are open, so the
//! "extend every leaf" rule costs nothing; the phase only has to insert the
//! `remaining` suffixes that are still implicit, and it stops as soon as one of
//! them is already present (every shorter one then is too).
use tracing::{debug, trace};

use crate::error::{BuildError, BuildResult, InvariantViolation};
use crate::query::Locus;
use crate::store::{EdgeEnd, NodeId, Symbol, TreeStore, ROOT};
use crate::SuffixTree;

/// Cursor into the tree marking where the next extension happens: `length`
/// symbols along the edge of `node` that starts with `text[edge]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePoint {
    pub node: NodeId,
    pub edge: usize,
    pub length: usize,
}

impl ActivePoint {
    const fn new(node: NodeId) -> Self {
        Self {
            node,
            edge: 0,
            length: 0,
        }
    }
}

/// An in-progress construction session.
///
/// Between calls to [`Builder::push`] the builder holds the implicit suffix
/// tree of everything pushed so far and can answer [`Builder::contains`].
/// [`Builder::finish`] appends the terminator, which turns every suffix into a
/// leaf, and hands over the finished [`SuffixTree`].
///
/// # Examples
///
/// ```
/// use suffix_tree::Builder;
///
/// let mut builder = Builder::new('$');
/// builder.extend("abcab".chars()).unwrap();
/// assert!(builder.contains(&['c', 'a']));
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.occurrences(&['a', 'b']).count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Builder<T> {
    store: TreeStore<T>,
    active: ActivePoint,
    /// Suffixes of the current prefix that are not explicit in the tree yet.
    remaining: usize,
    terminator: T,
}

impl<T: Symbol> Builder<T> {
    #[must_use]
    pub fn new(terminator: T) -> Self {
        Self::with_capacity(terminator, 0)
    }

    #[must_use]
    pub fn with_capacity(terminator: T, symbols: usize) -> Self {
        Self {
            store: TreeStore::with_capacity(symbols),
            active: ActivePoint::new(ROOT),
            remaining: 0,
            terminator,
        }
    }

    /// Number of symbols pushed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.store.global_end()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn active_point(&self) -> ActivePoint {
        self.active
    }

    #[must_use]
    pub fn store(&self) -> &TreeStore<T> {
        &self.store
    }

    /// Extends the tree with one symbol.
    pub fn push(&mut self, symbol: T) -> BuildResult<()> {
        if symbol == self.terminator {
            return Err(BuildError::TerminatorInInput {
                position: self.len(),
            });
        }
        self.phase(symbol)?;
        Ok(())
    }

    pub fn extend<I>(&mut self, symbols: I) -> BuildResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        for symbol in symbols {
            self.push(symbol)?;
        }
        Ok(())
    }

    /// Whether `pattern` occurs in the symbols pushed so far.
    #[must_use]
    pub fn contains(&self, pattern: &[T]) -> bool {
        self.locate(pattern).is_some()
    }

    #[must_use]
    pub fn locate(&self, pattern: &[T]) -> Option<Locus> {
        if pattern.is_empty() {
            return None;
        }
        self.store.locate(pattern)
    }

    /// Processes the terminator and returns the finished tree.
    pub fn finish(mut self) -> BuildResult<SuffixTree<T>> {
        let terminator = self.terminator;
        self.phase(terminator)?;
        if self.remaining != 0 {
            return Err(InvariantViolation::UnfinishedSuffixes {
                remaining: self.remaining,
            }
            .into());
        }

        let expected = self.store.global_end();
        let found = self.store.leaf_count();
        if expected != found {
            return Err(InvariantViolation::LeafCount { expected, found }.into());
        }
        if cfg!(debug_assertions) {
            self.store.verify()?;
        }

        debug!(
            symbols = expected - 1,
            nodes = self.store.node_count(),
            leaves = found,
            "suffix tree built"
        );
        Ok(SuffixTree::from_parts(self.store, terminator))
    }

    /// One phase of the algorithm: makes every suffix of `text[..=pos]`
    /// present in the tree, explicitly or implicitly.
    fn phase(&mut self, symbol: T) -> Result<(), InvariantViolation> {
        let pos = self.store.push_symbol(symbol);
        self.remaining += 1;

        // Internal node created earlier in this phase whose suffix link is
        // set by the next extension.
        let mut pending: Option<NodeId> = None;

        while self.remaining > 0 {
            if self.active.length == 0 {
                self.active.edge = pos;
            }

            let key = self.store.symbol_at(self.active.edge);
            let Some(edge) = self.store.edge(self.active.node, key) else {
                let suffix = pos + 1 - self.remaining;
                let leaf = self.store.create_leaf(suffix);
                self.store
                    .add_edge(self.active.node, leaf, pos, EdgeEnd::Open)?;
                trace!(pos, suffix, node = self.active.node, "new leaf");
                if let Some(node) = pending.take() {
                    self.store.set_suffix_link(node, self.active.node);
                }
                self.advance()?;
                continue;
            };

            // Skip/count: hop over whole edges without comparing symbols.
            let edge_len = self.store.edge_len(edge.child);
            if self.active.length >= edge_len {
                trace!(from = self.active.node, to = edge.child, edge_len, "walk down");
                self.active.node = edge.child;
                self.active.edge += edge_len;
                self.active.length -= edge_len;
                continue;
            }

            if self.store.symbol_at(edge.start + self.active.length) == symbol {
                // Already present: so is every shorter suffix. Stop the phase.
                if let Some(node) = pending.take() {
                    self.store.set_suffix_link(node, self.active.node);
                }
                self.active.length += 1;
                trace!(pos, remaining = self.remaining, "show stopper");
                break;
            }

            let mid = self
                .store
                .split_edge(edge, edge.start + self.active.length)?;
            let suffix = pos + 1 - self.remaining;
            let leaf = self.store.create_leaf(suffix);
            self.store.add_edge(mid, leaf, pos, EdgeEnd::Open)?;
            trace!(pos, suffix, node = mid, "split");
            if let Some(node) = pending.replace(mid) {
                self.store.set_suffix_link(node, mid);
            }
            self.advance()?;
        }
        Ok(())
    }

    /// Moves the active point to the next shorter suffix after an insertion.
    fn advance(&mut self) -> Result<(), InvariantViolation> {
        self.remaining -= 1;
        if self.active.node == ROOT {
            if self.active.length > 0 {
                self.active.length -= 1;
                self.active.edge += 1;
            }
        } else {
            let node = self.active.node;
            self.active.node = self
                .store
                .suffix_link(node)
                .ok_or(InvariantViolation::MissingSuffixLink { node })?;
        }
        Ok(())
    }
}
