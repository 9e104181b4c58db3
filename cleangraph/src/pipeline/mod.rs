//! Batch pipeline: load → bounded cleaning loop → save, one file at a time.
//!
//! A failure on one file (load, graph execution, save) is recorded in
//! [`PipelineState::failures`] and the batch moves on to the next file.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::engine::TableEngine;
use crate::error::AgentError;
use crate::react::{CleaningRunner, RunError};
use crate::state::CleanState;
use crate::stream::StreamEvent;
use crate::table::{cleaned_path, is_tabular, save_table, FileFormat, TableError};

/// Default directory cleaned files are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "cleaned";

/// A file that could not be cleaned, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Canonical state of one batch run.
#[derive(Clone, Debug)]
pub struct PipelineState {
    /// Files handed in, in processing order.
    pub uploaded_file_paths: Vec<PathBuf>,
    /// Written cleaned files, in processing order.
    pub cleaned_file_paths: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
    /// Log each file's final summary and operation count.
    pub debug: bool,
    /// Output directory for cleaned files.
    pub working_dir: PathBuf,
}

impl PipelineState {
    pub fn new(uploaded_file_paths: Vec<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            uploaded_file_paths,
            cleaned_file_paths: Vec::new(),
            failures: Vec::new(),
            debug: false,
            working_dir: working_dir.into(),
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Uploaded paths with a supported tabular extension.
    pub fn tabular_files(&self) -> Vec<PathBuf> {
        self.uploaded_file_paths
            .iter()
            .filter(|p| is_tabular(p))
            .cloned()
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Outcome of cleaning one file.
#[derive(Debug)]
pub struct CleanedFile {
    pub output_path: PathBuf,
    pub state: CleanState,
}

/// Per-event callback used when streaming a file's run.
pub type EventCallback<'a> = &'a mut (dyn FnMut(&Path, &StreamEvent<CleanState>) + Send);

/// Cleans one file: load, run the loop, save to `<output_dir>/cleaned_<name>`.
pub async fn clean_file(
    runner: &CleaningRunner,
    path: &Path,
    output_dir: &Path,
    on_event: Option<EventCallback<'_>>,
) -> Result<CleanedFile, RunError> {
    let format = FileFormat::from_path(path)?;
    let mut engine = TableEngine::new();
    engine.load_path(path)?;

    let label = path.display().to_string();
    let state = match on_event {
        Some(callback) => {
            runner
                .stream_with_callback(
                    engine,
                    &label,
                    Some(|event: &StreamEvent<CleanState>| callback(path, event)),
                )
                .await?
        }
        None => runner.invoke(engine, &label).await?,
    };

    let table = state.engine.table().ok_or_else(|| {
        RunError::Execution(AgentError::ExecutionFailed(
            "table missing after cleaning".into(),
        ))
    })?;
    std::fs::create_dir_all(output_dir).map_err(|source| TableError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let output_path = cleaned_path(path, output_dir);
    save_table(table, &output_path, format.output())?;
    Ok(CleanedFile { output_path, state })
}

/// Cleans every tabular file in `state.uploaded_file_paths`, sequentially.
///
/// Non-tabular uploads are skipped with a log line. Returns the state with
/// `cleaned_file_paths` and `failures` filled in.
pub async fn clean_files(
    runner: &CleaningRunner,
    mut state: PipelineState,
    mut on_event: Option<EventCallback<'_>>,
) -> PipelineState {
    for path in &state.uploaded_file_paths {
        if !is_tabular(path) {
            info!(path = %path.display(), "skipping non-tabular file");
        }
    }
    let files = state.tabular_files();
    info!(files = files.len(), output_dir = %state.working_dir.display(), "cleaning batch");

    for path in files {
        info!(path = %path.display(), "cleaning file");
        let callback = on_event
            .as_mut()
            .map(|f| &mut **f as &mut (dyn FnMut(&Path, &StreamEvent<CleanState>) + Send));
        match clean_file(runner, &path, &state.working_dir, callback).await {
            Ok(done) => {
                info!(
                    path = %path.display(),
                    output = %done.output_path.display(),
                    operations = done.state.operations_applied,
                    "cleaned file"
                );
                if state.debug {
                    debug!(
                        turns = done.state.turn_count,
                        summary = done.state.last_assistant_reply().unwrap_or(""),
                        "cleaning summary"
                    );
                }
                state.cleaned_file_paths.push(done.output_path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to clean file");
                state.failures.push(FileFailure {
                    path,
                    error: e.to_string(),
                });
            }
        }
    }
    state
}
