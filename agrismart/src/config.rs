use anyhow::Context;
use clap::Parser;
use llm::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use std::{path::PathBuf, time::Duration};

/// Command line and environment settings.
///
/// The Gemini API key is only read from `GEMINI_API_KEY` so it never shows
/// up in process listings.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to bind the HTTP server
    #[arg(long, env = "AGRISMART_ADDR", default_value = "127.0.0.1:5000")]
    pub addr: String,

    /// CSV file with the farm's yield history
    #[arg(long, env = "FARM_DATA", default_value = "farm_data.csv")]
    pub farm_data: PathBuf,

    /// File whose contents replace the built-in assistant persona
    #[arg(long, env = "AGRISMART_PERSONA_FILE")]
    pub persona_file: Option<PathBuf>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the Gemini API
    #[arg(long, env = "GEMINI_URL", default_value = DEFAULT_BASE_URL)]
    pub gemini_url: String,

    /// Upstream request timeout in seconds
    #[arg(long, env = "GEMINI_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl Cli {
    /// Gateway settings, taking the key from `GEMINI_API_KEY`.
    pub fn gemini_config(&self) -> anyhow::Result<GeminiConfig> {
        let key = std::env::var("GEMINI_API_KEY").context("GEMINI_API_KEY is not set")?;
        Ok(self.gemini_config_with_key(key))
    }

    pub fn gemini_config_with_key(&self, key: impl Into<String>) -> GeminiConfig {
        let mut config = GeminiConfig::new(key)
            .with_model(&self.model)
            .with_base_url(&self.gemini_url);
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }

    /// Persona text from `--persona-file`, or the built-in one.
    pub fn persona(&self) -> anyhow::Result<String> {
        match &self.persona_file {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading persona from {}", path.display()))?;
                Ok(text.trim().to_string())
            }
            None => Ok(advisor::DEFAULT_PERSONA.to_string()),
        }
    }
}
