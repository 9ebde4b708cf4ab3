use crate::output;
use anyhow::Result;
use assistant::{AssistantClient, AssistantIdFile, FILE_PURPOSE, vector_store_ids};
use config::Config;
use notes::NoteStore;

/// Deletes everything the other stages created. Each step runs even when an
/// earlier one failed.
///
/// Without a usable API client the remote steps are skipped and only local
/// files are removed; the assistant id file is kept for a later run.
pub async fn run(config: &Config) -> Result<()> {
    match AssistantClient::from_config(config) {
        Ok(client) => remove_remote(&client, config).await,
        Err(err) => {
            output::warn(&format!("Skipping OpenAI cleanup: {err}"));
            output::hint("Set OPENAI_API_KEY and run cleanup again to delete the assistant and files.");
        }
    }

    let store = NoteStore::new(&config.paths.notes_file);
    match store.remove() {
        Ok(true) => println!("Removed {}", store.path().display()),
        Ok(false) => {}
        Err(err) => output::warn(&err.to_string())
    }

    output::success("Cleanup complete!");
    Ok(())
}

async fn remove_remote(client: &AssistantClient, config: &Config) {
    let id_file = AssistantIdFile::new(&config.paths.assistant_id_file);
    match id_file.load() {
        Ok(Some(assistant_id)) => remove_assistant(client, &id_file, &assistant_id).await,
        Ok(None) => tracing::debug!("No assistant id at {}", id_file.path().display()),
        Err(err) => output::warn(&err.to_string())
    }

    delete_uploaded_files(client).await;
}

async fn remove_assistant(client: &AssistantClient, id_file: &AssistantIdFile, assistant_id: &str) {
    match client.retrieve_assistant(assistant_id).await {
        Ok(assistant) => {
            for store_id in vector_store_ids(&assistant) {
                match client.delete_vector_store(store_id).await {
                    Ok(_) => println!("Deleted vector store: {store_id}"),
                    Err(err) => output::warn(&format!("Could not delete vector store {store_id}: {err}"))
                }
            }
        }
        Err(err) if err.is_not_found() => {}
        Err(err) => output::warn(&format!("Could not retrieve assistant {assistant_id}: {err}"))
    }

    let gone = match client.delete_assistant(assistant_id).await {
        Ok(_) => {
            println!("Deleted assistant: {assistant_id}");
            true
        }
        Err(err) if err.is_not_found() => {
            output::info(&format!("Assistant {assistant_id} was already deleted"));
            true
        }
        Err(err) => {
            output::warn(&format!("Could not delete assistant {assistant_id}: {err}"));
            false
        }
    };

    if !gone {
        output::hint("The assistant id file was kept; run cleanup again to retry.");
        return;
    }
    match id_file.remove() {
        Ok(true) => println!("Removed {}", id_file.path().display()),
        Ok(false) => {}
        Err(err) => output::warn(&err.to_string())
    }
}

async fn delete_uploaded_files(client: &AssistantClient) {
    let files = match client.list_files(FILE_PURPOSE).await {
        Ok(files) => files,
        Err(err) => {
            output::warn(&format!("Could not list uploaded files: {err}"));
            return;
        }
    };

    for file in files {
        match client.delete_file(&file.id).await {
            Ok(_) => println!("Deleted file: {}", file.id),
            Err(err) => output::warn(&format!("Could not delete file {}: {err}", file.id))
        }
    }
}
