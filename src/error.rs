use crate::NodeId;

/// Broken structural invariants. Seeing one of these means the construction
/// engine has a bug; the build that produced it is aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("node {node} already has an outgoing edge for this symbol")]
    DuplicateEdgeKey { node: NodeId },

    #[error("edge key of child {child} under node {node} does not match its label")]
    MisplacedEdgeKey { node: NodeId, child: NodeId },

    #[error("internal node {node} has no suffix link")]
    MissingSuffixLink { node: NodeId },

    #[error("suffix link of node {node} points to unknown node {target}")]
    DanglingSuffixLink { node: NodeId, target: NodeId },

    #[error("suffix link {node} -> {target} does not drop exactly one symbol")]
    SuffixLinkDepth { node: NodeId, target: NodeId },

    #[error("suffix link chain starting at node {node} never reaches the root")]
    SuffixLinkCycle { node: NodeId },

    #[error("split at {at} is outside edge [{start}, {end}) of node {node}")]
    SplitOutOfBounds {
        node: NodeId,
        at: usize,
        start: usize,
        end: usize,
    },

    #[error("suffix {index} is represented by more than one leaf")]
    DuplicateSuffixIndex { index: usize },

    #[error("expected {expected} leaves, found {found}")]
    LeafCount { expected: usize, found: usize },

    #[error("{remaining} suffixes still implicit after the terminator")]
    UnfinishedSuffixes { remaining: usize },
}

/// Errors returned by [`crate::build`] and [`crate::Builder`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("input contains the terminator symbol at position {position}")]
    TerminatorInInput { position: usize },

    #[error("invariant violation during construction: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid tree config: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type BuildResult<T> = Result<T, BuildError>;
