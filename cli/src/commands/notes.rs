use super::{assistant_client, load_assistant_id};
use crate::output;
use anyhow::Result;
use assistant::{AssistantClient, OpenAiCompletionService};
use config::Config;
use errors::GenerationError;
use notes::{CompletionService, NOTES_REQUEST_PROMPT, NoteSet, NoteStore, NotesGenerator, report};

pub async fn run(config: &Config) -> Result<()> {
    let Some(assistant_id) = load_assistant_id(config) else {
        return Ok(());
    };
    let client = assistant_client(config);
    let completion = match OpenAiCompletionService::from_config(config) {
        Ok(completion) => completion,
        Err(err) => {
            output::error(&err.to_string());
            return Ok(());
        }
    };
    let generator = NotesGenerator::new(completion);

    println!("Generating 10 exam notes...");
    let notes = match generate(&client, &generator, &assistant_id).await {
        Ok(notes) => notes,
        Err(err) => {
            output::error("Failed to generate notes.");
            output::error(&err.to_string());
            return Ok(());
        }
    };

    println!();
    report::print(&notes);

    let store = NoteStore::new(&config.paths.notes_file);
    match store.save(&notes) {
        Ok(()) => {
            println!("Notes saved to {}", store.path().display());
            output::success(&format!(
                "Generated {} notes successfully!",
                notes.notes().len()
            ));
        }
        Err(err) => output::error(&format!("Error saving notes: {err}"))
    }
    Ok(())
}

/// Asks the assistant for the raw material, then structures it.
async fn generate<C: CompletionService>(
    client: &AssistantClient,
    generator: &NotesGenerator<C>,
    assistant_id: &str
) -> Result<NoteSet, GenerationError> {
    let spinner = output::spinner("Waiting for the assistant...");
    let answer = client.answer(assistant_id, NOTES_REQUEST_PROMPT).await;
    spinner.finish_and_clear();
    let answer = answer?;

    let spinner = output::spinner("Structuring notes...");
    let notes = generator.generate(&answer).await;
    spinner.finish_and_clear();
    notes
}
