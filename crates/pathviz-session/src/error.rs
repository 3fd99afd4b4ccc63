//! Error types raised by the session and the snapshot codec.

use pathviz_core::{Dims, InputError, LayoutError, Pos};

/// Saving or restoring a grid failed. The session is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// Nothing has been saved yet.
    #[error("no saved grid found")]
    NoSnapshot,
    /// The snapshot was taken on a grid of different dimensions.
    #[error("snapshot is {found}, current grid is {expected}")]
    ShapeMismatch { expected: Dims, found: Dims },
    /// A snapshot cell claims more than one of wall, start and end.
    #[error("snapshot cell {0} has conflicting roles")]
    ConflictingRoles(Pos),
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(#[from] LayoutError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Any failure surfaced by a [`Session`](crate::Session).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
