//! Turns free-text assistant answers into validated note-sets.

use crate::completion::CompletionService;
use crate::model::NoteSet;
use crate::normalize::normalize;
use errors::GenerationError;
use serde_json::Value;

/// Prompt sent to the assistant to obtain the material the notes are built from.
pub const NOTES_REQUEST_PROMPT: &str = "Generate exactly 10 unique study notes from the uploaded \
                                        materials that will help prepare for an exam. Each note \
                                        should have a clear heading, concise summary (max 150 \
                                        chars), and page reference if available. Cover the most \
                                        important concepts comprehensively.";

/// System instruction for the structuring completion.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a study summarizer. Convert the provided study \
                                         material into exactly 10 unique notes that will help \
                                         prepare for the exam. Respond only with valid JSON of \
                                         the form {\"notes\": [{\"id\": integer 1-10, \
                                         \"heading\": string, \"summary\": string of at most 150 \
                                         characters, \"page_ref\": integer or null}]}.";

/// Generates exactly ten notes from an answer using a JSON-mode completion.
pub struct NotesGenerator<C> {
    completion: C,
    system_prompt: String
}

impl<C: CompletionService> NotesGenerator<C> {
    pub fn new(completion: C) -> Self {
        Self {
            completion,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string()
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn completion(&self) -> &C {
        &self.completion
    }

    /// Issues one completion request and validates what comes back.
    ///
    /// Nothing is retried and nothing is written; the caller decides what to
    /// do with the note-set.
    pub async fn generate(&self, answer: &str) -> Result<NoteSet, GenerationError> {
        let user = format!("Convert this content into 10 structured notes: {answer}");
        tracing::debug!(
            provider = self.completion.provider_name(),
            answer_chars = answer.chars().count(),
            "Requesting structured notes"
        );

        let body = self
            .completion
            .complete_json(&self.system_prompt, &user)
            .await
            .map_err(|e| GenerationError::external(self.completion.provider_name(), e))?;

        let notes = parse_notes(&body)?;
        tracing::info!("Generated {} notes", notes.notes().len());
        Ok(notes)
    }
}

/// Parses a completion body, normalizes its shape and validates the notes.
pub fn parse_notes(body: &str) -> Result<NoteSet, GenerationError> {
    let raw: Value = serde_json::from_str(body)?;
    Ok(normalize(raw).validate()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::MockCompletionService;
    use errors::NoteError;
    use serde_json::json;

    fn notes_json(count: u8) -> Value {
        Value::Array(
            (1..=count)
                .map(|id| {
                    json!({
                        "id": id,
                        "heading": format!("Concept {id}"),
                        "summary": format!("Summary {id}"),
                        "page_ref": id * 3
                    })
                })
                .collect()
        )
    }

    #[test]
    fn test_parse_wrapped_and_bare_forms_agree() {
        let bare = notes_json(10).to_string();
        let wrapped = json!({"notes": notes_json(10)}).to_string();

        assert_eq!(parse_notes(&bare).unwrap(), parse_notes(&wrapped).unwrap());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        let err = parse_notes("Here are your notes: 1. Limits").unwrap_err();
        assert!(matches!(err, GenerationError::Parse { .. }));
    }

    #[test]
    fn test_parse_propagates_validation_error() {
        let err = parse_notes(&notes_json(9).to_string()).unwrap_err();
        assert_eq!(
            err,
            GenerationError::Invalid(NoteError::Cardinality {
                expected: 10,
                found: 9
            })
        );
    }

    #[tokio::test]
    async fn test_generate_sends_answer_in_user_message() {
        let mock = MockCompletionService::always(json!({"notes": notes_json(10)}).to_string()).await;
        let generator = NotesGenerator::new(mock);

        let set = generator.generate("Limits describe approach.").await.unwrap();
        assert_eq!(set.notes().len(), 10);

        let requests = generator.completion().requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].system, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(
            requests[0].user,
            "Convert this content into 10 structured notes: Limits describe approach."
        );
    }

    #[tokio::test]
    async fn test_generate_wraps_backend_failure() {
        let mock = MockCompletionService::new();
        mock.push_failure("connection reset").await;

        let err = NotesGenerator::new(mock).generate("text").await.unwrap_err();
        assert_eq!(
            err,
            GenerationError::ExternalService {
                source_name: "mock".to_string(),
                reason: "connection reset".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_custom_system_prompt() {
        let mock = MockCompletionService::always(notes_json(10).to_string()).await;
        let generator = NotesGenerator::new(mock).with_system_prompt("Be brief.");

        generator.generate("text").await.unwrap();
        assert_eq!(generator.completion().requests().await[0].system, "Be brief.");
    }
}
