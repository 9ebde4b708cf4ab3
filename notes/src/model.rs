//! Note records and note-sets.
//!
//! Neither type can be built in an invalid state: every constructor runs the
//! field constraints, and there are no mutable accessors afterwards.

use errors::NoteError;
use serde::Serialize;
use std::collections::HashSet;
use validator::{Validate, ValidationErrors};

/// Number of notes in every note-set.
pub const NOTES_PER_SET: usize = 10;

/// Smallest valid note id.
pub const MIN_NOTE_ID: u8 = 1;

/// Largest valid note id.
pub const MAX_NOTE_ID: u8 = 10;

/// Longest allowed summary, in characters.
pub const MAX_SUMMARY_CHARS: usize = 150;

/// One exam-revision fact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Validate)]
pub struct Note {
    #[validate(range(min = 1, max = 10))]
    id: u8,

    #[validate(length(min = 1))]
    heading: String,

    #[validate(length(max = 150))]
    summary: String,

    page_ref: Option<i64>
}

impl Note {
    /// Builds a note, checking id range, heading presence and summary length.
    pub fn new(
        id: u8,
        heading: impl Into<String>,
        summary: impl Into<String>,
        page_ref: Option<i64>
    ) -> Result<Self, NoteError> {
        let note = Self {
            id,
            heading: heading.into(),
            summary: summary.into(),
            page_ref
        };
        match note.validate() {
            Ok(()) => Ok(note),
            Err(errors) => Err(note.first_violation(&errors))
        }
    }

    pub fn id(&self) -> u8 {
        self.id
    }

    pub fn heading(&self) -> &str {
        &self.heading
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn page_ref(&self) -> Option<i64> {
        self.page_ref
    }

    // Field errors come back in a map; report them in declaration order so
    // the same input always yields the same error.
    fn first_violation(&self, errors: &ValidationErrors) -> NoteError {
        let fields = errors.field_errors();
        if fields.contains_key("id") {
            return NoteError::OutOfRange {
                field: "id".to_string(),
                value: self.id.to_string(),
                min: i64::from(MIN_NOTE_ID),
                max: i64::from(MAX_NOTE_ID)
            };
        }
        if fields.contains_key("heading") {
            return NoteError::MissingField {
                field: "heading".to_string()
            };
        }
        NoteError::TooLong {
            field: "summary".to_string(),
            length: self.summary.chars().count(),
            max: MAX_SUMMARY_CHARS
        }
    }
}

/// Exactly ten notes, in the order they were produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteSet {
    notes: Vec<Note>
}

impl NoteSet {
    /// Builds a note-set from already-valid notes.
    ///
    /// Fails with `Cardinality` unless there are exactly ten notes and with
    /// `DuplicateId` when two notes share an id.
    pub fn from_notes(notes: Vec<Note>) -> Result<Self, NoteError> {
        if notes.len() != NOTES_PER_SET {
            return Err(NoteError::Cardinality {
                expected: NOTES_PER_SET,
                found: notes.len()
            });
        }

        let mut seen = HashSet::with_capacity(NOTES_PER_SET);
        for note in &notes {
            if !seen.insert(note.id) {
                return Err(NoteError::DuplicateId { id: note.id });
            }
        }

        Ok(Self { notes })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Note> {
        self.notes.iter()
    }
}

impl<'a> IntoIterator for &'a NoteSet {
    type Item = &'a Note;
    type IntoIter = std::slice::Iter<'a, Note>;

    fn into_iter(self) -> Self::IntoIter {
        self.notes.iter()
    }
}
