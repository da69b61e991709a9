//! Storyboard - bulk AI image generation CLI.

mod adapters;
mod cassette;
mod cli;
mod config;
mod context;
mod error;
mod model;
mod output;
mod params;
mod ports;
mod runner;
mod text;

use std::path::Path;
use std::process;

use clap::Parser;

use crate::cli::Cli;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::model::resolve_model;
use crate::params::{validate_concurrency, validate_size};
use crate::runner::{RunOptions, RunSummary};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(summary) => {
            eprintln!(
                "Completed: {} images generated, {} failed.",
                summary.succeeded, summary.failed
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> Result<RunSummary, error::ImageError> {
    // Load config
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(error::ImageError::Config)?;

    // Read and split the input first: an unreadable or empty file aborts
    // before any directory is created or remote call is made.
    let paragraphs = text::load_paragraphs(Path::new(&cli.text_file))?;
    eprintln!("Found {} paragraphs to process.", paragraphs.len());

    // Validate parameters
    validate_size(&cli.size).map_err(error::ImageError::InvalidArgument)?;
    validate_concurrency(cli.concurrent).map_err(error::ImageError::InvalidArgument)?;

    let resolved_model = resolve_model(&cli.model);
    if cli.verbose {
        eprintln!("Model: {} (resolved from '{}')", resolved_model, cli.model);
        eprintln!("Concurrency: {}", cli.concurrent);
    }

    // Create context based on mode (live / recording / replaying)
    let replay_path = std::env::var("STORYBOARD_REPLAY").ok();
    let is_recording = std::env::var("STORYBOARD_REC").is_ok_and(|v| v == "true" || v == "1");

    let (ctx, recording_session) = if let Some(ref cassette_path) = replay_path {
        if cli.verbose {
            eprintln!("Replaying from: {cassette_path}");
        }
        (ServiceContext::replaying(Path::new(cassette_path))?, None)
    } else {
        let api_key = cli
            .api_key
            .clone()
            .or_else(|| config.openai_key())
            .ok_or(error::ImageError::MissingApiKey { env_var: "OPENAI_API_KEY".into() })?;
        if is_recording {
            if cli.verbose {
                eprintln!("Recording mode enabled");
            }
            let (ctx, session) = ServiceContext::recording(api_key);
            (ctx, Some(session))
        } else {
            (ServiceContext::live(api_key), None)
        }
    };

    let output_dir = std::path::PathBuf::from(&cli.output_dir);
    output::ensure_output_dir(&output_dir)?;

    let options = RunOptions {
        output_dir,
        model: resolved_model,
        size: cli.size.clone(),
        concurrency: cli.concurrent,
    };
    let summary = runner::run(ctx.generator, paragraphs, options).await;

    // Finish recording if active
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    Ok(summary)
}
