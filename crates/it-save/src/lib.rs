//! it-save: File-backed storage for the initiative tracker
//!
//! Keeps the saved roster as a JSON file in the user's data directory and
//! writes exported combat logs to an export directory.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info};
use thiserror::Error;

use it_core::{Combatant, LogSink, RosterStorage, StorageError};

/// Storage key of the saved roster; the file is `<key>.json`
pub const STORAGE_KEY: &str = "dnd_players";

/// Save/restore errors
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<SaveError> for StorageError {
    fn from(e: SaveError) -> Self {
        match e {
            SaveError::Io(e) => StorageError::Io(e.to_string()),
            SaveError::Serialization(e) => StorageError::Corrupt(e),
        }
    }
}

/// Roster storage kept in `<dir>/dnd_players.json`
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Storage inside `dir`; the directory is created on first save
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<Vec<Combatant>>, SaveError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let reader = BufReader::new(file);
        let roster = serde_json::from_reader(reader)?;
        Ok(Some(roster))
    }

    fn write(&self, snapshot: &[Combatant]) -> Result<(), SaveError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, snapshot)?;
        writer.flush()?;
        debug!("saved {} combatants to {}", snapshot.len(), self.path.display());
        Ok(())
    }
}

impl RosterStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Combatant>>, StorageError> {
        Ok(self.read()?)
    }

    fn save(&mut self, snapshot: &[Combatant]) -> Result<(), StorageError> {
        Ok(self.write(snapshot)?)
    }
}

/// Log sink writing exported files into a directory
#[derive(Debug, Clone)]
pub struct ExportDirSink {
    dir: PathBuf,
}

impl ExportDirSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, SaveError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)?;
        info!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}

impl LogSink for ExportDirSink {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, StorageError> {
        Ok(self.write(file_name, bytes)?)
    }
}

/// Default directory for the saved roster and the diagnostics log
pub fn default_data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("initrack");
    path
}
