//! Run config: API base, key, model, sampling, operation cap, output directory.
//! Filled from env / .env, then overridden by [`RunOptions`](super::RunOptions).

use std::path::PathBuf;

use cleangraph::{ToolChoiceMode, DEFAULT_MAX_OPERATIONS, DEFAULT_OUTPUT_DIR};

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Settings for one batch of files.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// OpenAI API base URL, e.g. `https://api.openai.com/v1`.
    pub api_base: String,
    pub api_key: String,
    /// Model name, e.g. `gpt-4o-mini`.
    pub model: String,
    /// Sampling temperature 0–2. Default: unset (use API default).
    pub temperature: Option<f32>,
    pub tool_choice: Option<ToolChoiceMode>,
    /// Operation cap per file.
    pub max_operations: usize,
    /// Directory cleaned files are written to.
    pub output_dir: PathBuf,
    /// Log each file's summary and turn count.
    pub debug: bool,
    /// Print each operation and its result while the loop runs.
    pub stream: bool,
    /// Debug-level logs (node enter/exit, tool calls).
    pub verbose: bool,
}

impl RunConfig {
    /// Fill config from env vars (and .env). Call `dotenv::dotenv().ok()` first.
    ///
    /// `OPENAI_API_KEY` required; `OPENAI_API_BASE`, `OPENAI_MODEL`, `MAX_OPERATIONS`,
    /// `OUTPUT_DIR` have defaults. `OPENAI_TEMPERATURE`, `OPENAI_TOOL_CHOICE`
    /// (auto|none|required) and `DEBUG` optional. Unparsable optional values are ignored.
    pub fn from_env() -> Result<Self, Error> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "OPENAI_API_KEY is not set; please configure it in .env",
            )
        })?;
        let api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let model = std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let temperature = std::env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok());
        let tool_choice = std::env::var("OPENAI_TOOL_CHOICE")
            .ok()
            .and_then(|s| s.parse().ok());
        let max_operations = std::env::var("MAX_OPERATIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_OPERATIONS);
        let output_dir = std::env::var("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));
        let debug = std::env::var("DEBUG")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Ok(Self {
            api_base,
            api_key,
            model,
            temperature,
            tool_choice,
            max_operations,
            output_dir,
            debug,
            stream: false,
            verbose: false,
        })
    }

    /// Apply overrides from `RunOptions`; only set fields override.
    pub fn apply_options(&mut self, options: &super::RunOptions) {
        if let Some(m) = &options.model {
            self.model = m.clone();
        }
        if let Some(t) = options.temperature {
            self.temperature = Some(t);
        }
        if let Some(tc) = options.tool_choice {
            self.tool_choice = Some(tc);
        }
        if let Some(n) = options.max_operations {
            self.max_operations = n;
        }
        if let Some(dir) = &options.output_dir {
            self.output_dir = dir.clone();
        }
        if options.stream {
            self.stream = true;
        }
        if options.verbose {
            self.debug = true;
        }
        self.verbose = options.verbose;
    }
}
