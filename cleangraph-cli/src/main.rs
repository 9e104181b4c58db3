//! cleangraph binary: clean tabular files with an LLM-driven operation loop.

use std::path::PathBuf;

use clap::Parser;
use cleangraph::ToolChoiceMode;
use cleangraph_cli::{run_with_options, RunOptions};

#[derive(Parser, Debug)]
#[command(name = "cleangraph")]
#[command(about = "Clean CSV/TSV/spreadsheet files with an LLM choosing table operations")]
struct Args {
    /// Files to clean; non-tabular files are skipped.
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,

    /// Output directory (default: OUTPUT_DIR or "cleaned").
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Operation cap per file (default: MAX_OPERATIONS or 30).
    #[arg(long, value_name = "N")]
    max_operations: Option<usize>,

    /// Model name (default: OPENAI_MODEL or gpt-4o-mini).
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature, 0–2.
    #[arg(long)]
    temperature: Option<f32>,

    /// auto, none or required.
    #[arg(long, value_parser = parse_tool_choice)]
    tool_choice: Option<ToolChoiceMode>,

    /// Debug-level logs.
    #[arg(short, long)]
    verbose: bool,

    /// Print each operation and its result as the loop runs.
    #[arg(long)]
    stream: bool,
}

fn parse_tool_choice(s: &str) -> Result<ToolChoiceMode, String> {
    s.parse()
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,cleangraph=debug,cleangraph_cli=debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let options = RunOptions {
        model: args.model,
        temperature: args.temperature,
        tool_choice: args.tool_choice,
        max_operations: args.max_operations,
        output_dir: args.output_dir,
        stream: args.stream,
        verbose: args.verbose,
    };

    let state = match run_with_options(&args.files, &options).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    for path in &state.cleaned_file_paths {
        println!("cleaned: {}", path.display());
    }
    for failure in &state.failures {
        eprintln!("failed: {}: {}", failure.path.display(), failure.error);
    }
    if state.has_failures() {
        std::process::exit(1);
    }
    Ok(())
}
