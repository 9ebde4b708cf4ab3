//! Runs the binary against a local mock of the OpenAI API.

use assert_cmd::{Command, cargo_bin_cmd};
use predicates::prelude::predicate;
use serde_json::json;
use tempfile::TempDir;
use testing::{
    api_error_json, assistant_json, deleted_json, event_stream, failed_run_json, file_json, list_json,
    message_delta_json, message_json, run_json, thread_json, vector_store_file_json, vector_store_json
};
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn studynotes(dir: &TempDir, server: &MockServer) -> Command {
    let mut cmd = cargo_bin_cmd!("studynotes");
    cmd.current_dir(dir.path())
        .env_remove("SN_CONFIG")
        .env_remove("RUST_LOG")
        .env("OPENAI_API_KEY", "sk-test")
        .env("OPENAI_BASE_URL", server.uri())
        .env("SN_POLL_INITIAL_MS", "1")
        .env("SN_POLL_MAX_MS", "1")
        .env("SN_POLL_MAX_ATTEMPTS", "5");
    cmd
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

async fn mount_thread(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/threads"))
        .respond_with(ok(thread_json("thread_1")))
        .mount(server)
        .await;
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/messages"))
        .respond_with(ok(message_json("msg_user", "user", "question", json!([]))))
        .mount(server)
        .await;
}

async fn mount_completed_run(server: &MockServer, answer: &str) {
    Mock::given(method("POST"))
        .and(path("/threads/thread_1/runs"))
        .respond_with(ok(run_json("run_1", "queued")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/runs/run_1"))
        .respond_with(ok(run_json("run_1", "completed")))
        .mount(server)
        .await;
    mount_answer(server, answer).await;
}

async fn mount_answer(server: &MockServer, answer: &str) {
    Mock::given(method("GET"))
        .and(path("/threads/thread_1/messages"))
        .respond_with(ok(list_json(vec![message_json(
            "msg_2",
            "assistant",
            answer,
            json!([])
        )])))
        .mount(server)
        .await;
}

mod bootstrap {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_bootstrap_without_corpus_saves_id() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .and(path("/assistants"))
            .and(body_partial_json(json!({"tools": [{"type": "file_search"}]})))
            .respond_with(ok(assistant_json("asst_new", &[])))
            .expect(1)
            .mount(&server)
            .await;

        studynotes(&dir, &server)
            .arg("bootstrap")
            .assert()
            .success()
            .stdout(predicate::str::contains("Assistant created with ID: asst_new"))
            .stderr(predicate::str::contains("not found"));

        let saved = std::fs::read_to_string(dir.path().join("assistant_id.txt")).unwrap();
        assert_eq!(saved, "asst_new");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_bootstrap_uploads_corpus() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/calculus_basics.pdf"), b"%PDF-1.4").unwrap();

        Mock::given(method("POST"))
            .and(path("/assistants"))
            .respond_with(ok(assistant_json("asst_new", &[])))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/files"))
            .respond_with(ok(file_json("file-1", "calculus_basics.pdf")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/vector_stores"))
            .respond_with(ok(vector_store_json("vs_1")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/vector_stores/vs_1/files"))
            .respond_with(ok(vector_store_file_json("vs_1", "file-1")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/assistants/asst_new"))
            .and(body_partial_json(json!({"tool_resources": {"file_search": {"vector_store_ids": ["vs_1"]}}})))
            .respond_with(ok(assistant_json("asst_new", &["vs_1"])))
            .expect(1)
            .mount(&server)
            .await;

        studynotes(&dir, &server)
            .arg("bootstrap")
            .assert()
            .success()
            .stdout(predicate::str::contains("File uploaded and attached: file-1"));
        assert!(dir.path().join("assistant_id.txt").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_bootstrap_reuses_existing_assistant() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_old").unwrap();

        Mock::given(method("POST"))
            .and(path("/assistants"))
            .respond_with(ok(assistant_json("asst_new", &[])))
            .expect(0)
            .mount(&server)
            .await;

        studynotes(&dir, &server)
            .arg("bootstrap")
            .assert()
            .success()
            .stderr(predicate::str::contains("Reusing assistant asst_old"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_bootstrap_failure_leaves_no_id_file() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        Mock::given(method("POST"))
            .and(path("/assistants"))
            .respond_with(ResponseTemplate::new(400).set_body_json(api_error_json("Invalid model")))
            .mount(&server)
            .await;

        studynotes(&dir, &server)
            .arg("bootstrap")
            .assert()
            .success()
            .stderr(predicate::str::contains("Error creating assistant"))
            .stderr(predicate::str::contains("Invalid model"));
        assert!(!dir.path().join("assistant_id.txt").exists());
    }
}

mod ask {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_seed_question_then_quit() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1\n").unwrap();
        std::fs::write(
            dir.path().join("studynotes.toml"),
            "[qna]\nquestions = [\"What is a limit?\"]\n"
        )
        .unwrap();
        mount_thread(&server).await;

        let stream = event_stream(&[
            ("thread.run.created", run_json("run_1", "queued")),
            ("thread.message.delta", message_delta_json("A limit is a value approached.")),
            ("thread.run.completed", run_json("run_1", "completed"))
        ]);
        Mock::given(method("POST"))
            .and(path("/threads/thread_1/runs"))
            .and(body_partial_json(json!({"assistant_id": "asst_1", "stream": true})))
            .respond_with(ResponseTemplate::new(200).set_body_raw(stream, "text/event-stream"))
            .expect(1)
            .mount(&server)
            .await;
        mount_answer(&server, "A limit is a value approached.").await;

        studynotes(&dir, &server)
            .arg("ask")
            .write_stdin("\nQUIT\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("Question: What is a limit?"))
            .stdout(predicate::str::contains("A limit is a value approached."))
            .stdout(predicate::str::contains("No citations found."))
            .stdout(predicate::str::contains("-".repeat(50)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_failed_question_keeps_loop_alive() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1").unwrap();

        Mock::given(method("POST"))
            .and(path("/threads"))
            .respond_with(ResponseTemplate::new(403).set_body_json(api_error_json("Project is not allowed")))
            .expect(2)
            .mount(&server)
            .await;

        studynotes(&dir, &server)
            .arg("ask")
            .write_stdin("first?\nsecond?\n")
            .assert()
            .success()
            .stderr(predicate::str::contains("Error asking question").count(2))
            .stderr(predicate::str::contains("Project is not allowed"));
    }
}

mod notes {
    use super::*;

    async fn mount_completion(server: &MockServer, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({"response_format": {"type": "json_object"}})))
            .respond_with(ok(testing::chat_completion_body(content)))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_notes_are_printed_and_saved() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1").unwrap();
        mount_thread(&server).await;
        mount_completed_run(&server, "Limits, derivatives and integrals.").await;
        mount_completion(&server, &testing::mean_value_theorem_notes().to_string()).await;

        studynotes(&dir, &server)
            .arg("notes")
            .assert()
            .success()
            .stdout(predicate::str::contains("EXAM REVISION NOTES"))
            .stdout(predicate::str::contains("1. Mean Value Theorem"))
            .stdout(predicate::str::contains("Page Reference: 42"))
            .stdout(predicate::str::contains("Generated 10 notes successfully!"));

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("exam_notes.json")).unwrap())
                .unwrap();
        let notes = saved["notes"].as_array().unwrap();
        assert_eq!(notes.len(), 10);
        assert!(notes[1]["page_ref"].is_null());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_malformed_completion_writes_no_file() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1").unwrap();
        mount_thread(&server).await;
        mount_completed_run(&server, "Some notes").await;
        mount_completion(&server, "Here are your notes!").await;

        studynotes(&dir, &server)
            .arg("notes")
            .assert()
            .success()
            .stderr(predicate::str::contains("Failed to generate notes."))
            .stderr(predicate::str::contains("Malformed JSON"));
        assert!(!dir.path().join("exam_notes.json").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_nine_notes_are_rejected() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1").unwrap();
        mount_thread(&server).await;
        mount_completed_run(&server, "Some notes").await;

        let mut notes = testing::ten_notes_json();
        notes.as_array_mut().unwrap().pop();
        mount_completion(&server, &notes.to_string()).await;

        studynotes(&dir, &server)
            .arg("notes")
            .assert()
            .success()
            .stderr(predicate::str::contains("Expected exactly 10 notes, found 9"));
        assert!(!dir.path().join("exam_notes.json").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_failed_run_reports_reason() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1").unwrap();
        mount_thread(&server).await;

        Mock::given(method("POST"))
            .and(path("/threads/thread_1/runs"))
            .respond_with(ok(run_json("run_1", "queued")))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/threads/thread_1/runs/run_1"))
            .respond_with(ok(failed_run_json(
                "run_1",
                "rate_limit_exceeded",
                "Rate limit reached for gpt-4o-mini"
            )))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ok(testing::chat_completion_body("{}")))
            .expect(0)
            .mount(&server)
            .await;

        studynotes(&dir, &server)
            .arg("notes")
            .assert()
            .success()
            .stderr(predicate::str::contains("Failed to generate notes."))
            .stderr(predicate::str::contains(
                "Run run_1 ended with status failed: Rate limit reached for gpt-4o-mini"
            ));
        assert!(!dir.path().join("exam_notes.json").exists());
    }
}

mod cleanup {
    use super::*;

    async fn mount_files(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/files"))
            .and(query_param("purpose", "assistants"))
            .respond_with(ok(list_json(vec![file_json("file-1", "calculus_basics.pdf")])))
            .mount(server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/files/file-1"))
            .respond_with(ok(deleted_json("file-1", "file")))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_cleanup_removes_everything() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1").unwrap();
        std::fs::write(dir.path().join("exam_notes.json"), "{}").unwrap();

        Mock::given(method("GET"))
            .and(path("/assistants/asst_1"))
            .respond_with(ok(assistant_json("asst_1", &["vs_1"])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/vector_stores/vs_1"))
            .respond_with(ok(deleted_json("vs_1", "vector_store")))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/assistants/asst_1"))
            .respond_with(ok(deleted_json("asst_1", "assistant")))
            .expect(1)
            .mount(&server)
            .await;
        mount_files(&server).await;

        studynotes(&dir, &server)
            .arg("cleanup")
            .assert()
            .success()
            .stdout(predicate::str::contains("Deleted assistant: asst_1"))
            .stdout(predicate::str::contains("Deleted file: file-1"))
            .stdout(predicate::str::contains("Cleanup complete!"));

        assert!(!dir.path().join("assistant_id.txt").exists());
        assert!(!dir.path().join("exam_notes.json").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_failed_delete_keeps_id_file() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1").unwrap();

        Mock::given(method("GET"))
            .and(path("/assistants/asst_1"))
            .respond_with(ok(assistant_json("asst_1", &[])))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/assistants/asst_1"))
            .respond_with(ResponseTemplate::new(409).set_body_json(api_error_json("Assistant is busy")))
            .mount(&server)
            .await;
        mount_files(&server).await;

        studynotes(&dir, &server)
            .arg("cleanup")
            .assert()
            .success()
            .stderr(predicate::str::contains("Could not delete assistant asst_1"))
            .stdout(predicate::str::contains("Deleted file: file-1"))
            .stdout(predicate::str::contains("Cleanup complete!"));

        assert!(dir.path().join("assistant_id.txt").exists());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_already_deleted_assistant_counts_as_gone() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("assistant_id.txt"), "asst_1").unwrap();

        let not_found =
            ResponseTemplate::new(404).set_body_json(api_error_json("No assistant found with id 'asst_1'."));
        Mock::given(method("GET"))
            .and(path("/assistants/asst_1"))
            .respond_with(not_found.clone())
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/assistants/asst_1"))
            .respond_with(not_found)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/files"))
            .respond_with(ok(list_json(vec![])))
            .mount(&server)
            .await;

        studynotes(&dir, &server)
            .arg("cleanup")
            .assert()
            .success()
            .stdout(predicate::str::contains("Cleanup complete!"));
        assert!(!dir.path().join("assistant_id.txt").exists());
    }
}
