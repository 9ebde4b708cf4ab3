//! The file that carries the assistant id from one stage to the next.

use crate::error::ServiceError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AssistantIdFile {
    path: PathBuf
}

impl AssistantIdFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored id. `None` when the file is missing or blank.
    pub fn load(&self) -> Result<Option<String>, ServiceError> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => {
                let id = text.trim();
                Ok((!id.is_empty()).then(|| id.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(ServiceError::io(&self.path, &e))
        }
    }

    pub fn save(&self, assistant_id: &str) -> Result<(), ServiceError> {
        std::fs::write(&self.path, assistant_id).map_err(|e| ServiceError::io(&self.path, &e))
    }

    /// Deletes the file. Returns `false` when there was nothing to delete.
    pub fn remove(&self) -> Result<bool, ServiceError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(ServiceError::io(&self.path, &e))
        }
    }
}
