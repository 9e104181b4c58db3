//! cleangraph-cli library: env config, node logging, and the batch run.
//!
//! Reads OpenAI config from .env, builds the think → act → observe cleaning
//! graph, cleans each file and returns the batch state.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! let state = cleangraph_cli::run(&["people.csv".into()]).await?;
//! for path in &state.cleaned_file_paths {
//!     println!("{}", path.display());
//! }
//! ```

mod config;
mod middleware;
mod run;

pub use cleangraph::{FileFailure, PipelineState};
pub use config::{Error, RunConfig, RunOptions};
pub use middleware::{LoggingMiddleware, WithNodeLogging};
pub use run::{run, run_with_config, run_with_options};

#[cfg(test)]
mod tests;
