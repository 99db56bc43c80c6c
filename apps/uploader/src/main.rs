mod config;
mod errors;
mod models;
mod render;
mod upload;
mod workflow;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{parse_timeout, Config};
use crate::models::upload::UploadRequest;
use crate::render::render;
use crate::upload::{ResumeUploader, UploadClient};
use crate::workflow::{UploadWorkflow, WorkflowState};

/// Upload a resume and print the links to the generated portfolio.
///
/// Reads API_BASE_URL (required), BACKEND_API_KEY and UPLOAD_TIMEOUT_SECS
/// from the environment or a .env file.
#[derive(Parser)]
#[command(name = "portfolio-uploader", version)]
struct Cli {
    /// Resume to upload (.pdf or .docx)
    file: PathBuf,

    /// Declared media type; derived from the file extension when omitted
    #[arg(long)]
    media_type: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "UPLOAD_TIMEOUT_SECS", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Save the generated portfolio HTML into this directory
    #[arg(long)]
    download_dir: Option<PathBuf>,
}

/// How a run ended; mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Succeeded,
    /// The file never reached the backend.
    Rejected,
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Succeeded => ExitCode::SUCCESS,
            Outcome::Rejected => ExitCode::from(2),
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok(); // before parsing so .env can feed `env = ...` args
    let cli = Cli::parse();

    // Load configuration first (fails on missing required env vars)
    let mut config = Config::from_env()?;
    if cli.timeout.is_some() {
        config = config.with_timeout(cli.timeout);
    }

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting portfolio uploader v{}", env!("CARGO_PKG_VERSION"));
    info!("Backend: {}", config.api_base_url);
    match config.timeout {
        Some(t) => info!("Upload timeout: {}s", t.as_secs()),
        None => warn!("No upload timeout configured; a stalled backend will block indefinitely"),
    }

    let client = UploadClient::new(config)?;
    Ok(run(&cli, &client).await?.into())
}

/// One select → submit → (download) cycle, printing each state as it is reached.
async fn run<B>(cli: &Cli, backend: &B) -> Result<Outcome>
where
    B: ResumeUploader + ?Sized,
{
    let request = UploadRequest::from_path(&cli.file, cli.media_type.as_deref()).await?;

    let mut workflow = UploadWorkflow::new();
    if let Err(e) = workflow.select_file(request) {
        eprintln!("Error: {e}");
        return Ok(Outcome::Rejected);
    }

    let request = workflow.begin_submit()?;
    println!("{}", render(workflow.state()));
    let result = backend.upload(&request).await;
    workflow.finish(result);
    println!("{}", render(workflow.state()));

    let portfolio = match workflow.state() {
        WorkflowState::Succeeded(portfolio) => portfolio,
        _ => return Ok(Outcome::Failed),
    };

    if let Some(dir) = &cli.download_dir {
        match backend.download(portfolio, dir).await {
            Ok(path) => println!("Saved {}", path.display()),
            Err(e) => {
                eprintln!("Error: {e}");
                return Ok(Outcome::Failed);
            }
        }
    }

    Ok(Outcome::Succeeded)
}
