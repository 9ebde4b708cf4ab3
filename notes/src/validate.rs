//! Strict construction of notes and note-sets from untyped JSON.
//!
//! This layer only checks presence and JSON types, then hands the typed
//! values to [`Note::new`] and [`NoteSet::from_notes`] for the value
//! constraints. The first failure wins.

use crate::model::{MAX_NOTE_ID, MIN_NOTE_ID, NOTES_PER_SET, Note, NoteSet};
use errors::NoteError;
use serde_json::{Map, Value};

/// Builds one note from a JSON mapping.
pub fn note_from_value(value: &Value) -> Result<Note, NoteError> {
    let Some(fields) = value.as_object() else {
        return Err(NoteError::Type {
            field: "note".to_string(),
            expected: "object".to_string(),
            found: json_type(value).to_string()
        });
    };

    let id = read_id(fields)?;
    let heading = read_text(fields, "heading")?;
    let summary = read_text(fields, "summary")?;
    let page_ref = read_page_ref(fields)?;

    Note::new(id, heading, summary, page_ref)
}

/// Builds a note-set from the value found under the `notes` key.
pub fn note_set_from_value(value: &Value) -> Result<NoteSet, NoteError> {
    let Some(entries) = value.as_array() else {
        return Err(NoteError::Type {
            field: "notes".to_string(),
            expected: "array".to_string(),
            found: json_type(value).to_string()
        });
    };

    if entries.len() != NOTES_PER_SET {
        return Err(NoteError::Cardinality {
            expected: NOTES_PER_SET,
            found: entries.len()
        });
    }

    let notes = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| note_from_value(entry).map_err(|e| e.in_note(index)))
        .collect::<Result<Vec<_>, _>>()?;

    NoteSet::from_notes(notes)
}

impl NoteSet {
    /// Validates the value found under the `notes` key. See [`note_set_from_value`].
    pub fn from_value(value: &Value) -> Result<Self, NoteError> {
        note_set_from_value(value)
    }
}

fn read_id(fields: &Map<String, Value>) -> Result<u8, NoteError> {
    let out_of_range = |value: String| NoteError::OutOfRange {
        field: "id".to_string(),
        value,
        min: i64::from(MIN_NOTE_ID),
        max: i64::from(MAX_NOTE_ID)
    };

    match fields.get("id") {
        None | Some(Value::Null) => Err(out_of_range("missing".to_string())),
        Some(raw) => raw
            .as_i64()
            .and_then(|id| u8::try_from(id).ok())
            .ok_or_else(|| out_of_range(raw.to_string()))
    }
}

fn read_text(fields: &Map<String, Value>, name: &str) -> Result<String, NoteError> {
    fields
        .get(name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| NoteError::MissingField {
            field: name.to_string()
        })
}

fn read_page_ref(fields: &Map<String, Value>) -> Result<Option<i64>, NoteError> {
    match fields.get("page_ref") {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => raw.as_i64().map(Some).ok_or_else(|| NoteError::Type {
            field: "page_ref".to_string(),
            expected: "integer or null".to_string(),
            found: json_type(raw).to_string()
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object"
    }
}
