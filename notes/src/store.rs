//! The notes file.

use crate::model::NoteSet;
use crate::normalize::normalize;
use errors::StorageError;
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A note-set persisted as `{"notes": [...]}` at a fixed path.
#[derive(Debug, Clone)]
pub struct NoteStore {
    path: PathBuf
}

impl NoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the file with the given note-set.
    ///
    /// The JSON is written to a sibling temporary file and renamed over the
    /// target, so readers see either the old content or the new one.
    pub fn save(&self, notes: &NoteSet) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new(".")
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, &e))?;
        serde_json::to_writer_pretty(&mut tmp, notes).map_err(|e| StorageError::Serialization {
            reason: e.to_string()
        })?;
        tmp.write_all(b"\n")
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StorageError::io(tmp.path(), &e))?;

        tmp.persist(&self.path)
            .map_err(|e| StorageError::io(&self.path, &e.error))?;

        tracing::info!("Notes saved to {}", self.path.display());
        Ok(())
    }

    /// Reads the file back through the same normalizer and validator used for
    /// fresh completions.
    pub fn load(&self) -> Result<NoteSet, StorageError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| StorageError::io(&self.path, &e))?;
        let raw: Value = serde_json::from_str(&text).map_err(|e| StorageError::Serialization {
            reason: e.to_string()
        })?;
        Ok(normalize(raw).validate()?)
    }

    /// Deletes the file. Returns `false` when there was nothing to delete.
    pub fn remove(&self) -> Result<bool, StorageError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Removed {}", self.path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::io(&self.path, &e))
        }
    }
}
