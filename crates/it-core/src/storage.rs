//! Storage and export ports
//!
//! The core never touches the filesystem itself. Durable roster storage and
//! the destination of exported logs are injected through these traits; the
//! file-backed implementations live in `it-save`.

use std::path::PathBuf;

use thiserror::Error;

use crate::combatant::Combatant;

/// Errors raised by storage and export backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Stored roster corrupted: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable home of the persisted (non-adversary) roster
pub trait RosterStorage {
    /// Read the stored roster image, `Ok(None)` if nothing was ever saved
    fn load(&self) -> Result<Option<Vec<Combatant>>, StorageError>;

    /// Replace the stored image with `snapshot`
    fn save(&mut self, snapshot: &[Combatant]) -> Result<(), StorageError>;
}

impl<S: RosterStorage + ?Sized> RosterStorage for Box<S> {
    fn load(&self) -> Result<Option<Vec<Combatant>>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, snapshot: &[Combatant]) -> Result<(), StorageError> {
        (**self).save(snapshot)
    }
}

/// Receiver of exported combat logs
pub trait LogSink {
    /// Hand over `bytes` to be kept as `file_name`; returns where they went
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError>;
}

/// In-memory roster storage.
///
/// Keeps the serialized JSON text rather than the records so that loading
/// goes through the same parse path as a real backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    image: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an arbitrary stored text, e.g. a corrupt one
    pub fn with_image(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
        }
    }

    /// Raw stored text, if any
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
}

impl RosterStorage for MemoryStorage {
    fn load(&self) -> Result<Option<Vec<Combatant>>, StorageError> {
        match &self.image {
            Some(text) => Ok(Some(serde_json::from_str(text)?)),
            None => Ok(None),
        }
    }

    fn save(&mut self, snapshot: &[Combatant]) -> Result<(), StorageError> {
        self.image = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }
}

/// Log sink that keeps delivered files in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub files: Vec<(String, Vec<u8>)>,
}

impl LogSink for MemorySink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        self.files.push((file_name.to_string(), bytes.to_vec()));
        Ok(PathBuf::from(file_name))
    }
}
