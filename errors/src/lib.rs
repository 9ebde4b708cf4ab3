//! # Studynotes Errors
//!
//! Error taxonomy for the study-notes pipeline.
//!
//! - Uses `thiserror` for structured error definitions
//! - Field-level and set-level failures live in [`NoteError`]
//! - A generation attempt fails as a whole with [`GenerationError`]
//! - Persisting or loading a note-set fails with [`StorageError`]

use thiserror::Error;

/// Validation failures for a single note or a note-set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Value out of range for {field}: {value} (expected {min}..={max})")]
    OutOfRange {
        field: String,
        value: String,
        min: i64,
        max: i64
    },

    #[error("Field too long: {field} has {length} characters max {max}")]
    TooLong {
        field: String,
        length: usize,
        max: usize
    },

    #[error("Wrong type for {field}: expected {expected}, found {found}")]
    Type {
        field: String,
        expected: String,
        found: String
    },

    #[error("Expected exactly {expected} notes, found {found}")]
    Cardinality { expected: usize, found: usize },

    #[error("Duplicate note id: {id}")]
    DuplicateId { id: u8 }
}

impl NoteError {
    /// Prefixes the offending field with the position of the note it came
    /// from, e.g. `summary` becomes `notes[3].summary`.
    pub fn in_note(self, index: usize) -> Self {
        let locate = |field: String| format!("notes[{index}].{field}");
        match self {
            NoteError::MissingField { field } => NoteError::MissingField {
                field: locate(field)
            },
            NoteError::OutOfRange {
                field,
                value,
                min,
                max
            } => NoteError::OutOfRange {
                field: locate(field),
                value,
                min,
                max
            },
            NoteError::TooLong { field, length, max } => NoteError::TooLong {
                field: locate(field),
                length,
                max
            },
            NoteError::Type {
                field,
                expected,
                found
            } => NoteError::Type {
                field: locate(field),
                expected,
                found
            },
            other => other
        }
    }
}

/// A failed attempt at turning an answer into a validated note-set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("Malformed JSON in completion: {reason}")]
    Parse { reason: String },

    #[error("Generated notes failed validation: {0}")]
    Invalid(#[from] NoteError),

    #[error("External service error: {source_name} - {reason}")]
    ExternalService { source_name: String, reason: String }
}

impl GenerationError {
    pub fn external(source_name: impl Into<String>, reason: impl ToString) -> Self {
        GenerationError::ExternalService {
            source_name: source_name.into(),
            reason: reason.to_string()
        }
    }
}

impl From<serde_json::Error> for GenerationError {
    fn from(err: serde_json::Error) -> Self {
        GenerationError::Parse {
            reason: err.to_string()
        }
    }
}

/// Failures while persisting or reading back a note-set.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O on {path} failed: {reason}")]
    Io { path: String, reason: String },

    #[error("Serialization error: {reason}")]
    Serialization { reason: String },

    #[error("Stored notes are invalid: {0}")]
    Invalid(#[from] NoteError)
}

impl StorageError {
    pub fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        StorageError::Io {
            path: path.display().to_string(),
            reason: err.to_string()
        }
    }
}
