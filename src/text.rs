use tracing::debug;

use crate::config::TreeConfig;
use crate::error::BuildResult;
use crate::SuffixTree;

/// Suffix tree over the characters of a string.
///
/// Positions are character offsets, not byte offsets. Without case
/// sensitivity both the text and every query are folded to lowercase one
/// character at a time, so offsets stay aligned with the original text.
///
/// # Examples
///
/// ```
/// use suffix_tree::{TextIndex, TreeConfig};
///
/// let index = TextIndex::new("Ghaffaari", &TreeConfig::default()).unwrap();
/// assert_eq!(index.find("GhAf"), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct TextIndex {
    tree: SuffixTree<char>,
    config: TreeConfig,
}

impl TextIndex {
    pub fn new(text: &str, config: &TreeConfig) -> BuildResult<Self> {
        let chars: Vec<char> = text.chars().map(|ch| config.fold(ch)).collect();
        let tree = crate::build(&chars, config.terminator)?;
        debug!(
            chars = chars.len(),
            case_sensitive = config.case_sensitive,
            "text indexed"
        );
        Ok(Self {
            tree,
            config: config.clone(),
        })
    }

    #[must_use]
    pub fn tree(&self) -> &SuffixTree<char> {
        &self.tree
    }

    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    #[must_use]
    pub fn contains(&self, query: &str) -> bool {
        self.tree.contains(&self.normalize(query))
    }

    /// Character offsets of every occurrence of `query`, in traversal order.
    #[must_use]
    pub fn find(&self, query: &str) -> Vec<usize> {
        self.tree.occurrences(&self.normalize(query)).collect()
    }

    #[must_use]
    pub fn longest_repeated_substring(&self) -> Option<String> {
        let (start, len) = self.tree.longest_repeated_substring()?;
        Some(self.tree.input()[start..start + len].iter().collect())
    }

    /// Longest common substring of `other` and the indexed text, as it appears
    /// in the (folded) `other`.
    #[must_use]
    pub fn longest_common_substring(&self, other: &str) -> String {
        let other = self.normalize(other);
        self.tree.longest_common_substring(&other).iter().collect()
    }

    fn normalize(&self, query: &str) -> Vec<char> {
        query.chars().map(|ch| self.config.fold(ch)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;

    fn sensitive() -> TreeConfig {
        TreeConfig {
            case_sensitive: true,
            ..TreeConfig::default()
        }
    }

    #[test]
    fn finds_single_occurrence() {
        let index = TextIndex::new("VALARMORGHULISDOHAERIS", &TreeConfig::default()).unwrap();
        assert_eq!(index.find("MORGH"), vec![5]);
    }

    #[test]
    fn case_sensitive_search() {
        let index = TextIndex::new("mississippi", &sensitive()).unwrap();
        let mut found = index.find("si");
        found.sort_unstable();
        assert_eq!(found, vec![3, 6]);
        assert!(index.find("Si").is_empty());
    }

    #[test]
    fn case_insensitive_search() {
        let index = TextIndex::new("Ghaffaari", &TreeConfig::default()).unwrap();
        assert_eq!(index.find("GhAf"), vec![0]);
        assert!(index.contains("FAA"));
    }

    #[test]
    fn repeated_letters() {
        let index = TextIndex::new("peeper", &sensitive()).unwrap();
        let mut found = index.find("e");
        found.sort_unstable();
        assert_eq!(found, vec![1, 2, 4]);

        let index = TextIndex::new("babacacb", &TreeConfig::default()).unwrap();
        assert_eq!(index.find("cacb"), vec![4]);

        let index = TextIndex::new("banana", &sensitive()).unwrap();
        assert_eq!(index.find("banana"), vec![0]);
        assert_eq!(index.longest_repeated_substring().as_deref(), Some("ana"));
    }

    #[test]
    fn offsets_are_in_characters() {
        let index = TextIndex::new("żółw żółw", &sensitive()).unwrap();
        let mut found = index.find("ół");
        found.sort_unstable();
        assert_eq!(found, vec![1, 6]);
    }

    #[test]
    fn terminator_in_text_is_rejected() {
        let err = TextIndex::new("cost: 5$", &TreeConfig::default()).unwrap_err();
        assert_eq!(err, BuildError::TerminatorInInput { position: 7 });

        let config = TreeConfig {
            terminator: '\u{0}',
            ..TreeConfig::default()
        };
        assert!(TextIndex::new("cost: 5$", &config).unwrap().contains("5$"));
    }

    #[test]
    fn common_substring_with_other_text() {
        let index = TextIndex::new("VOTEFORTHEGREATALBANIAFORYOU", &sensitive()).unwrap();
        assert_eq!(
            index.longest_common_substring("VOTECHOOSEGREATALBANIATHEFUTURE"),
            "EGREATALBANIA"
        );
    }
}
