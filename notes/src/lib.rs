//! # Study notes
//!
//! The exam-revision note model and everything that produces, checks and
//! stores it:
//!
//! - [`Note`] and [`NoteSet`]: always-valid records, exactly ten per set
//! - [`normalize`]: tolerant reshaping of completion output
//! - [`NoteSet::from_value`]: strict validation of the reshaped JSON
//! - [`NotesGenerator`]: one JSON-mode completion per answer
//! - [`NoteStore`]: the notes file
//! - [`report`]: the terminal report

pub mod completion;
pub mod generator;
pub mod model;
pub mod normalize;
pub mod report;
pub mod store;
pub mod validate;

pub use completion::{CompletionService, MockCompletionService};
pub use generator::{DEFAULT_SYSTEM_PROMPT, NOTES_REQUEST_PROMPT, NotesGenerator, parse_notes};
pub use model::{MAX_NOTE_ID, MAX_SUMMARY_CHARS, MIN_NOTE_ID, NOTES_PER_SET, Note, NoteSet};
pub use normalize::{CandidateNotes, NOTES_KEY, normalize};
pub use store::NoteStore;
pub use validate::{note_from_value, note_set_from_value};
