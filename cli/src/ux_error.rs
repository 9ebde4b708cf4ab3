use colored::Colorize;

#[derive(Debug)]
pub struct UxError {
    pub what: String,
    pub why: Option<String>,
    pub how_to_fix: Vec<String>,
    pub suggested_command: Option<String>
}

impl UxError {
    pub fn new(what: impl Into<String>) -> Self {
        Self {
            what: what.into(),
            why: None,
            how_to_fix: Vec::new(),
            suggested_command: None
        }
    }

    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why = Some(reason.into());
        self
    }

    pub fn fix(mut self, suggestion: impl Into<String>) -> Self {
        self.how_to_fix.push(suggestion.into());
        self
    }

    pub fn suggest(mut self, cmd: impl Into<String>) -> Self {
        self.suggested_command = Some(cmd.into());
        self
    }

    pub fn display(&self) {
        eprintln!();
        eprintln!("{} {}", "error:".red().bold(), self.what.white().bold());

        if let Some(why) = &self.why {
            eprintln!("       {}", why.dimmed());
        }

        if !self.how_to_fix.is_empty() {
            eprintln!();
            eprintln!("{}", "How to fix:".yellow().bold());
            for (i, fix) in self.how_to_fix.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, fix);
            }
        }

        if let Some(cmd) = &self.suggested_command {
            eprintln!();
            eprintln!("{}", "Try this:".green().bold());
            eprintln!("  $ {}", cmd.cyan());
        }
        eprintln!();
    }
}

impl std::fmt::Display for UxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.what)
    }
}

impl std::error::Error for UxError {}

pub fn missing_api_key() -> UxError {
    UxError::new("OpenAI API key is not configured")
        .why("Every stage except local file handling talks to the OpenAI API")
        .fix("Export OPENAI_API_KEY in your shell")
        .fix("Or set openai.api_key in studynotes.toml")
        .suggest("export OPENAI_API_KEY=sk-...")
}

pub fn assistant_not_provisioned(id_file: &str) -> UxError {
    UxError::new(format!("Assistant ID not found in '{}'", id_file))
        .why("The assistant is created by the bootstrap stage, which writes its id there")
        .fix("Provision the assistant first")
        .suggest("studynotes bootstrap")
}

pub fn invalid_config(err: &config::ConfigError) -> UxError {
    UxError::new("Configuration could not be loaded")
        .why(err.to_string())
        .fix("Check studynotes.toml (or the file named by SN_CONFIG)")
        .fix("Check the SN_* and OPENAI_* environment variables")
}

pub fn client_setup_failed(reason: &str) -> UxError {
    UxError::new("Could not set up the OpenAI client")
        .why(reason.to_string())
        .fix("Check openai.base_url and openai.timeout_seconds")
}
