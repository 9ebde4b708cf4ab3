//! Tolerant reshaping of completion output.
//!
//! Models asked for JSON do not always wrap their answer the same way, so the
//! parsed value is coerced into a `{"notes": ...}` candidate before the strict
//! validator sees it. Normalization never fails; it only decides where the
//! notes are.

use crate::model::NoteSet;
use crate::validate::note_set_from_value;
use errors::NoteError;
use serde_json::Value;

/// Key under which the notes live in both the completion and the file.
pub const NOTES_KEY: &str = "notes";

/// The value that should hold the notes, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateNotes {
    pub notes: Value
}

impl CandidateNotes {
    /// Runs the strict note-set validator over the candidate.
    pub fn validate(&self) -> Result<NoteSet, NoteError> {
        note_set_from_value(&self.notes)
    }
}

/// Reshapes any parsed JSON into a candidate.
///
/// - an array becomes the notes
/// - an object with a `notes` key is taken as-is
/// - any other object is treated as a single note
/// - a scalar is treated as a single (invalid) note
pub fn normalize(raw: Value) -> CandidateNotes {
    match raw {
        Value::Array(_) => CandidateNotes { notes: raw },
        Value::Object(mut map) => match map.remove(NOTES_KEY) {
            Some(notes) => CandidateNotes { notes },
            None => CandidateNotes {
                notes: Value::Array(vec![Value::Object(map)])
            }
        },
        other => CandidateNotes {
            notes: Value::Array(vec![other])
        }
    }
}
