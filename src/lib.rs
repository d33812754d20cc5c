//! A suffix tree built online in linear time with Ukkonen's algorithm.
//!
//! The tree indexes one input sequence of any ordered symbol type. A caller
//! supplied terminator, which must not occur in the input, is appended so that
//! every suffix ends at its own leaf.
//!
//! # Examples
//!
//! ```
//! let text: Vec<char> = "abcabxabcd".chars().collect();
//! let tree = suffix_tree::build(&text, '$').unwrap();
//!
//! assert!(tree.contains(&['a', 'b', 'c']));
//! let mut found: Vec<usize> = tree.occurrences(&['a', 'b']).collect();
//! found.sort_unstable();
//! assert_eq!(found, vec![0, 3, 6]);
//! let (start, len) = tree.longest_repeated_substring().unwrap();
//! assert_eq!(&text[start..start + len], &['a', 'b', 'c']);
//! ```
mod builder;
pub mod config;
pub mod error;
mod query;
mod render;
pub mod store;
mod text;
pub mod traverse;

pub use builder::{ActivePoint, Builder};
pub use config::TreeConfig;
pub use error::{BuildError, BuildResult, ConfigError, InvariantViolation};
pub use query::{Locus, Occurrences};
pub use render::DotOptions;
pub use store::{Edge, EdgeEnd, NodeId, Symbol, TreeStore, ROOT};
pub use text::TextIndex;

/// A finished suffix tree. Immutable; share it freely between readers.
#[derive(Debug, Clone)]
pub struct SuffixTree<T> {
    store: TreeStore<T>,
    terminator: T,
}

impl<T: Symbol> SuffixTree<T> {
    /// Builds the suffix tree of `input`. See [`build`].
    pub fn build(input: &[T], terminator: T) -> BuildResult<Self> {
        build(input, terminator)
    }

    pub(crate) fn from_parts(store: TreeStore<T>, terminator: T) -> Self {
        Self { store, terminator }
    }

    #[must_use]
    pub fn terminator(&self) -> T {
        self.terminator
    }

    /// The indexed input, without the terminator.
    #[must_use]
    pub fn input(&self) -> &[T] {
        let text = self.store.text();
        &text[..text.len() - 1]
    }

    /// Length of the input, without the terminator.
    #[must_use]
    pub fn len(&self) -> usize {
        self.input().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read access to the nodes, edges and suffix links.
    #[must_use]
    pub fn store(&self) -> &TreeStore<T> {
        &self.store
    }

    /// The substring spelled by the path from the root to `node`.
    #[must_use]
    pub fn path_label(&self, node: NodeId) -> &[T] {
        self.store.path_label(node)
    }
}

/// Builds the suffix tree of `input` terminated by `terminator`.
///
/// The input is checked for the terminator before construction starts.
pub fn build<T: Symbol>(input: &[T], terminator: T) -> BuildResult<SuffixTree<T>> {
    if let Some(position) = input.iter().position(|symbol| *symbol == terminator) {
        return Err(BuildError::TerminatorInInput { position });
    }
    let mut builder = Builder::with_capacity(terminator, input.len() + 1);
    builder.extend(input.iter().copied())?;
    builder.finish()
}
