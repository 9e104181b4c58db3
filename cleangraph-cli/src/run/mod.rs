//! Run entry points: run with env config, run_with_options, or run_with_config.

pub use crate::config::Error;

mod common;
mod run_with_config;

use std::path::PathBuf;

use cleangraph::PipelineState;

use crate::config::{RunConfig, RunOptions};

#[cfg(test)]
pub(crate) use common::format_event;
pub(crate) use common::run_clean_pipeline;
pub use run_with_config::run_with_config;

/// Clean `files` with config from env (.env is loaded here).
pub async fn run(files: &[PathBuf]) -> Result<PipelineState, Error> {
    dotenv::dotenv().ok();
    let config = RunConfig::from_env()?;
    run_with_config(&config, files).await
}

/// Like [`run`], with `options` applied on top of the env config.
pub async fn run_with_options(
    files: &[PathBuf],
    options: &RunOptions,
) -> Result<PipelineState, Error> {
    dotenv::dotenv().ok();
    let mut config = RunConfig::from_env()?;
    config.apply_options(options);
    run_with_config(&config, files).await
}
