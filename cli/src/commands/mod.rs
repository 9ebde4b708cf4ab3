pub mod ask;
pub mod bootstrap;
pub mod cleanup;
pub mod notes;

use crate::{output, ux_error};
use assistant::{AssistantClient, AssistantIdFile};
use clap::{Parser, Subcommand};
use config::Config;

#[derive(Parser)]
#[command(
    name = "studynotes",
    author,
    version,
    about = "studynotes - exam revision notes from your study material",
    long_about = "Runs a four-stage pipeline against an OpenAI assistant:\n\n  bootstrap  provision \
                  the assistant and upload the corpus\n  ask        question the assistant \
                  interactively\n  notes      generate ten revision notes\n  cleanup    delete \
                  everything that was provisioned\n\nConfiguration comes from studynotes.toml (or \
                  $SN_CONFIG) and the environment; OPENAI_API_KEY is required."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Create the assistant and attach the study material")]
    Bootstrap,

    #[command(about = "Ask questions and stream cited answers")]
    Ask,

    #[command(about = "Generate and save ten exam revision notes")]
    Notes,

    #[command(about = "Delete the assistant, uploaded files and generated notes")]
    Cleanup
}

/// Builds the API client, or explains what is missing and exits.
pub(crate) fn assistant_client(config: &Config) -> AssistantClient {
    match AssistantClient::from_config(config) {
        Ok(client) => client,
        Err(assistant::ServiceError::MissingApiKey) => {
            ux_error::missing_api_key().display();
            std::process::exit(1);
        }
        Err(err) => {
            ux_error::client_setup_failed(&err.to_string()).display();
            std::process::exit(1);
        }
    }
}

/// Reads the provisioned assistant id, printing a hint when there is none.
pub(crate) fn load_assistant_id(config: &Config) -> Option<String> {
    let id_file = AssistantIdFile::new(&config.paths.assistant_id_file);
    match id_file.load() {
        Ok(Some(id)) => Some(id),
        Ok(None) => {
            ux_error::assistant_not_provisioned(&config.paths.assistant_id_file).display();
            None
        }
        Err(err) => {
            output::error(&err.to_string());
            None
        }
    }
}
