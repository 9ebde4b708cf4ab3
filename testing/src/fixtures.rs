use serde_json::{Value, json};

pub const MEAN_VALUE_THEOREM_SUMMARY: &str = "States that for a continuous function on a closed \
                                              interval, there exists a point where the derivative \
                                              equals the average rate of change.";

/// A valid note object with a page reference.
pub fn note_json(id: u8) -> Value {
    json!({
        "id": id,
        "heading": format!("Concept {id}"),
        "summary": format!("Key idea number {id}."),
        "page_ref": i64::from(id) * 7
    })
}

/// A valid note object without a `page_ref` key.
pub fn note_json_without_page(id: u8) -> Value {
    json!({
        "id": id,
        "heading": format!("Concept {id}"),
        "summary": format!("Key idea number {id}.")
    })
}

/// Ten valid notes with ids 1 through 10, as a bare array.
pub fn ten_notes_json() -> Value {
    Value::Array((1..=10).map(note_json).collect())
}

/// Ten valid notes wrapped under the `notes` key.
pub fn wrapped_notes_json() -> Value {
    json!({ "notes": ten_notes_json() })
}

/// The Mean Value Theorem note repeated for ids 1 through 10.
///
/// Notes with an even id omit `page_ref`.
pub fn mean_value_theorem_notes() -> Value {
    let notes = (1..=10u8)
        .map(|id| {
            let mut note = json!({
                "id": id,
                "heading": "Mean Value Theorem",
                "summary": MEAN_VALUE_THEOREM_SUMMARY
            });
            if id % 2 == 1 {
                note["page_ref"] = json!(42);
            }
            note
        })
        .collect();
    json!({ "notes": Value::Array(notes) })
}

/// A chat-completion response whose message content is `content`.
pub fn chat_completion_body(content: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 10, "total_tokens": 20 }
    })
}
