//! Optional overrides for a run (CLI args or programmatic).

use std::path::PathBuf;

use cleangraph::ToolChoiceMode;

/// Optional overrides applied on top of the env config by
/// [`RunConfig::apply_options`](super::RunConfig::apply_options).
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub model: Option<String>,
    /// Override sampling temperature (0–2).
    pub temperature: Option<f32>,
    pub tool_choice: Option<ToolChoiceMode>,
    /// Override the per-file operation cap.
    pub max_operations: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub stream: bool,
    pub verbose: bool,
}
