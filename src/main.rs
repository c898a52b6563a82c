//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `indexnow_submitter` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use indexnow_submitter::app::{format_summary, log_analytics, read_url_list};
use indexnow_submitter::cli::{Cli, Command};
use indexnow_submitter::initialization::init_logger_with;
use indexnow_submitter::IndexNowSubmitter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the current directory, falling back to the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();

    init_logger_with(
        cli.log_level.clone().into(),
        cli.log_format.clone(),
        cli.log_file.as_deref(),
    )
    .context("Failed to initialize logger")?;

    let mut submitter = match IndexNowSubmitter::new(cli.submitter.to_config()) {
        Ok(submitter) => submitter,
        Err(e) => {
            eprintln!("indexnow error: {e}");
            process::exit(1);
        }
    };

    let outcome = run(&mut submitter, cli.command).await;

    let analytics = submitter.analytics();
    log_analytics(&analytics);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&analytics).context("Failed to serialize analytics")?
        );
    } else {
        println!("{}", format_summary(&analytics));
    }

    if let Err(e) = outcome {
        eprintln!("indexnow error: {e:#}");
        process::exit(1);
    }
    Ok(())
}

async fn run(submitter: &mut IndexNowSubmitter, command: Command) -> Result<()> {
    match command {
        Command::Submit { urls } => {
            if let [url] = urls.as_slice() {
                submitter.submit_single_url(url).await?;
            } else {
                submitter.submit_urls(&urls).await?;
            }
        }
        Command::File { path } => {
            let urls = read_url_list(&path).await?;
            submitter.submit_urls(&urls).await?;
        }
        Command::Sitemap { url, since } => {
            submitter.submit_from_sitemap(&url, since).await?;
        }
    }
    Ok(())
}
