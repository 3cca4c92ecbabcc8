//! Error types for costume loading, playback and persistence.

use crate::tag::Tag;

pub type Result<T, E = CostumeError> = std::result::Result<T, E>;

/// Failures reading back a saved costume state.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("save state ended unexpectedly")]
    UnexpectedEof,

    #[error("saved costume has {saved} chores, loaded costume has {loaded}")]
    ChoreCountMismatch { saved: i32, loaded: usize },

    #[error("invalid saved chore state {value} for chore {chore}")]
    InvalidChoreState { chore: usize, value: i32 },

    #[error("saved chore id {id} is out of range ({count} chores)")]
    ChoreIdOutOfRange { id: i32, count: usize },
}

/// Error type for all costume operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum CostumeError {
    /// The byte stream ended before a field could be read.
    #[error("truncated costume data reading {what}: needed {needed} bytes, {remaining} left")]
    Truncated {
        what: &'static str,
        needed: usize,
        remaining: usize,
    },

    /// A chore name length reached the fixed name bound.
    #[error("chore name length {len} exceeds maximum {max}")]
    NameTooLong { len: u32, max: u32 },

    /// A component descriptor carried a tag outside the known table.
    #[error("missing component tag: {name} for {tag}")]
    UnknownTag { tag: Tag, name: String },

    /// A component descriptor did not start with the `!` marker.
    #[error("component descriptor {descriptor:?} does not start with '!'")]
    MissingMarker { descriptor: String },

    /// A track referenced a parent slot that has not been parsed yet.
    #[error("parent index {index} refers past the {available} parsed components")]
    ParentOutOfRange { index: i32, available: usize },

    #[error("chore index {index} out of range ({count} chores)")]
    ChoreOutOfRange { index: usize, count: usize },

    #[error("save state error: {0}")]
    State(#[from] StateError),
}

impl CostumeError {
    /// Errors caused by malformed costume bytes.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Truncated { .. }
                | Self::NameTooLong { .. }
                | Self::UnknownTag { .. }
                | Self::ParentOutOfRange { .. }
        )
    }

    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Truncated { .. }
            | Self::NameTooLong { .. }
            | Self::UnknownTag { .. }
            | Self::ParentOutOfRange { .. } => "format",
            Self::MissingMarker { .. } => "invariant",
            Self::ChoreOutOfRange { .. } => "playback",
            Self::State(_) => "persistence",
        }
    }
}
