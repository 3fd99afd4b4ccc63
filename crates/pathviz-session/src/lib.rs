//! Interactive session for the pathviz visualizer.
//!
//! [`Session`] exposes the interaction API (clicks, resize, reset, run),
//! paces search events through the [`Scheduler`], and saves or restores
//! grids as [`Snapshot`]s through a [`SnapshotStore`].

pub mod error;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod store;

pub use error::{Error, PersistenceError, Result};
pub use scheduler::{AnimEvent, Scheduler, Tick};
pub use session::{Advance, RunOutcome, Session};
pub use snapshot::{CellRecord, Snapshot};
pub use store::{FileStore, MemoryStore, SnapshotStore};
