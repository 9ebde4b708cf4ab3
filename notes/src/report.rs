//! Plain-text rendering of a note-set for the terminal.

use crate::model::{Note, NoteSet};
use console::measure_text_width;
use std::fmt::Write;

const BANNER_WIDTH: usize = 60;

/// Renders the revision-notes report.
pub fn render(notes: &NoteSet) -> String {
    let rule = "=".repeat(BANNER_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "EXAM REVISION NOTES");
    let _ = writeln!(out, "{rule}");

    for note in notes {
        render_note(&mut out, note);
    }
    out
}

/// Writes the report to stdout.
pub fn print(notes: &NoteSet) {
    print!("{}", render(notes));
}

fn render_note(out: &mut String, note: &Note) {
    let title = format!("{}. {}", note.id(), note.heading());

    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "-".repeat(measure_text_width(&title)));
    let _ = writeln!(out, "Summary: {}", note.summary());
    if let Some(page) = note.page_ref() {
        let _ = writeln!(out, "Page Reference: {page}");
    }
    let _ = writeln!(out);
}
