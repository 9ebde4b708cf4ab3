use super::assistant_client;
use crate::output;
use anyhow::Result;
use assistant::{AssistantClient, AssistantIdFile, AssistantSpec, ServiceError};
use config::Config;
use std::path::Path;

pub async fn run(config: &Config) -> Result<()> {
    let id_file = AssistantIdFile::new(&config.paths.assistant_id_file);
    match id_file.load() {
        Ok(Some(existing)) => {
            output::info(&format!(
                "Reusing assistant {existing} from {}",
                id_file.path().display()
            ));
            output::hint("Run `studynotes cleanup` first to provision a fresh assistant.");
            return Ok(());
        }
        Ok(None) => {}
        Err(err) => {
            output::error(&err.to_string());
            return Ok(());
        }
    }

    let client = assistant_client(config);
    let assistant_id = match provision(&client, config).await {
        Ok(id) => id,
        Err(err) => {
            output::error(&format!("Error creating assistant: {err}"));
            return Ok(());
        }
    };

    match id_file.save(&assistant_id) {
        Ok(()) => output::success(&format!(
            "Bootstrap complete! Assistant ID saved to {}",
            id_file.path().display()
        )),
        Err(err) => output::error(&format!("Assistant {assistant_id} created but not saved: {err}"))
    }
    Ok(())
}

/// Creates the assistant and, when the corpus exists, attaches it through a
/// vector store. Returns the new assistant id.
async fn provision(client: &AssistantClient, config: &Config) -> Result<String, ServiceError> {
    let assistant = client.create_assistant(&AssistantSpec::from(config)).await?;
    println!("Assistant created with ID: {}", assistant.id);

    let corpus = Path::new(&config.assistant.corpus_path);
    if !corpus.is_file() {
        output::warn(&format!(
            "{} not found. Add your study material there, then run `studynotes cleanup` and \
             `studynotes bootstrap` again.",
            corpus.display()
        ));
        return Ok(assistant.id);
    }

    let file = client.upload_file(corpus).await?;
    let store = client
        .create_vector_store(&config.assistant.vector_store_name)
        .await?;
    client.add_file_to_vector_store(&store.id, &file.id).await?;
    client.attach_vector_store(&assistant.id, &store.id).await?;
    println!("File uploaded and attached: {}", file.id);
    tracing::info!(vector_store = %store.id, "Corpus attached to assistant {}", assistant.id);

    Ok(assistant.id)
}
