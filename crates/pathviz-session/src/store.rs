//! Places a [`Snapshot`] can be saved to and restored from.
//!
//! Each store holds a single slot: saving overwrites the previous snapshot.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::snapshot::Snapshot;

pub trait SnapshotStore {
    /// Replace the stored snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError>;

    /// Fetch the stored snapshot, or [`PersistenceError::NoSnapshot`].
    fn load(&self) -> Result<Snapshot, PersistenceError>;
}

/// In-memory slot.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slot: Option<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        self.slot = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Snapshot, PersistenceError> {
        self.slot.clone().ok_or(PersistenceError::NoSnapshot)
    }
}

/// A JSON file on disk. A missing file reads as "nothing saved".
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let mut w = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut w, snapshot)?;
        w.flush()?;
        log::debug!("saved {} snapshot to {}", snapshot.dims(), self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Snapshot, PersistenceError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PersistenceError::NoSnapshot);
            }
            Err(e) => return Err(e.into()),
        };
        Snapshot::from_json(&text)
    }
}
