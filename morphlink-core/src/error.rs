//! Core error types (deterministic only)

use thiserror::Error;

/// A tag string outside the normalized tagset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown tag '{0}'")]
pub struct UnknownTag(pub String);

/// Backend output or model data that breaks the canonical model's invariants
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MaterializeError {
    /// A dependency edge points outside its sentence
    #[error("dependency edge {head:?} -> {target} escapes a sentence of {len} words")]
    DanglingEdge {
        /// Head word index (`None` for the sentence root)
        head: Option<usize>,
        /// Target word index
        target: usize,
        /// Number of words in the sentence
        len: usize,
    },

    /// A sequence reported more items than it yields
    #[error("{kind} {index} missing from a sequence of {len}")]
    MissingItem {
        /// What was being read ("morpheme", "word", ...)
        kind: &'static str,
        /// Requested index
        index: usize,
        /// Reported length
        len: usize,
    },

    /// An item's index disagrees with its position
    #[error("{kind} at position {expected} carries index {found}")]
    MisplacedIndex {
        /// What carried the index ("morpheme", "word")
        kind: &'static str,
        /// Position in the owning sequence
        expected: usize,
        /// Index the item carried
        found: usize,
    },

    /// An edge is attached somewhere other than its own head
    #[error("edge with head {head:?} attached to {owner:?}")]
    MisplacedEdge {
        /// Head the edge names
        head: Option<usize>,
        /// Word holding the edge (`None` for the sentence root)
        owner: Option<usize>,
    },
}

/// Result type for materialization
pub type Result<T> = std::result::Result<T, MaterializeError>;
