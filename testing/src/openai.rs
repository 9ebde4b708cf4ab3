//! Assistants API payloads, complete enough for the typed client to accept.

use serde_json::{Value, json};

const CREATED_AT: u64 = 1_700_000_000;

pub fn assistant_json(id: &str, vector_store_ids: &[&str]) -> Value {
    json!({
        "id": id,
        "object": "assistant",
        "created_at": CREATED_AT,
        "name": "Study Q&A Assistant",
        "model": "gpt-4o-mini",
        "instructions": "You are a helpful tutor.",
        "tools": [{"type": "file_search"}],
        "tool_resources": {"file_search": {"vector_store_ids": vector_store_ids}}
    })
}

pub fn file_json(id: &str, filename: &str) -> Value {
    json!({
        "id": id,
        "object": "file",
        "bytes": 1024,
        "created_at": CREATED_AT,
        "filename": filename,
        "purpose": "assistants"
    })
}

pub fn vector_store_json(id: &str) -> Value {
    json!({
        "id": id,
        "object": "vector_store",
        "created_at": CREATED_AT,
        "name": "Study Materials",
        "usage_bytes": 0,
        "file_counts": {"in_progress": 0, "completed": 0, "failed": 0, "cancelled": 0, "total": 0},
        "status": "completed"
    })
}

pub fn vector_store_file_json(vector_store_id: &str, file_id: &str) -> Value {
    json!({
        "id": file_id,
        "object": "vector_store.file",
        "usage_bytes": 0,
        "created_at": CREATED_AT,
        "vector_store_id": vector_store_id,
        "status": "in_progress"
    })
}

pub fn thread_json(id: &str) -> Value {
    json!({"id": id, "object": "thread", "created_at": CREATED_AT})
}

/// A message whose single text block carries `annotations`.
pub fn message_json(id: &str, role: &str, text: &str, annotations: Value) -> Value {
    json!({
        "id": id,
        "object": "thread.message",
        "created_at": CREATED_AT,
        "thread_id": "thread_1",
        "role": role,
        "content": [{"type": "text", "text": {"value": text, "annotations": annotations}}]
    })
}

/// A file-citation annotation as it appears on a message text block.
pub fn file_citation_json(text: &str, file_id: &str) -> Value {
    json!({
        "type": "file_citation",
        "text": text,
        "file_citation": {"file_id": file_id},
        "start_index": 0,
        "end_index": text.chars().count()
    })
}

pub fn run_json(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "object": "thread.run",
        "created_at": CREATED_AT,
        "thread_id": "thread_1",
        "assistant_id": "asst_1",
        "status": status,
        "model": "gpt-4o-mini",
        "instructions": "",
        "tools": [{"type": "file_search"}],
        "parallel_tool_calls": true
    })
}

/// A failed run whose `last_error` carries `code` and `message`.
pub fn failed_run_json(id: &str, code: &str, message: &str) -> Value {
    let mut run = run_json(id, "failed");
    run["last_error"] = json!({"code": code, "message": message});
    run
}

pub fn message_delta_json(text: &str) -> Value {
    json!({
        "id": "msg_2",
        "object": "thread.message.delta",
        "delta": {"content": [{"index": 0, "type": "text", "text": {"value": text}}]}
    })
}

/// A list page with no further pages.
pub fn list_json(data: Vec<Value>) -> Value {
    json!({"object": "list", "data": data, "has_more": false})
}

pub fn deleted_json(id: &str, object: &str) -> Value {
    json!({"id": id, "object": format!("{object}.deleted"), "deleted": true})
}

/// An error body as the API sends it with a non-2xx status.
pub fn api_error_json(message: &str) -> Value {
    json!({"error": {"message": message, "type": "invalid_request_error", "param": null, "code": null}})
}

/// A server-sent event body ending with the `done` event.
pub fn event_stream(events: &[(&str, Value)]) -> String {
    let mut body = String::new();
    for (event, data) in events {
        body.push_str(&format!("event: {event}\ndata: {data}\n\n"));
    }
    body.push_str("event: done\ndata: [DONE]\n\n");
    body
}
