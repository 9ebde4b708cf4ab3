use assistant::OpenAiCompletionService;
use notes::{CompletionService, NotesGenerator};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_json_mode_completion_feeds_generator() {
    let server = MockServer::start().await;
    let content = testing::wrapped_notes_json().to_string();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": {"type": "json_object"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(testing::chat_completion_body(&content)))
        .expect(1)
        .mount(&server)
        .await;

    let service = OpenAiCompletionService::new("sk-test", &server.uri(), "gpt-4o-mini");
    let notes = NotesGenerator::new(service).generate("Limits and derivatives").await.unwrap();
    assert_eq!(notes.notes().len(), 10);
}

#[tokio::test]
async fn test_completion_api_error_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"message": "Invalid model", "type": "invalid_request_error", "param": null, "code": null}
        })))
        .mount(&server)
        .await;

    let service = OpenAiCompletionService::new("sk-test", &server.uri(), "gpt-4o-mini");
    assert_eq!(service.provider_name(), "openai");
    assert!(service.complete_json("system", "user").await.is_err());
}
