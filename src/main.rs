//! glycorisk - submit a risk assessment from the command line.
//!
//! Reads the form as JSON from a file or stdin, validates it, asks the
//! prediction service for a classification and prints the result.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use glycorisk::adapters::cli::{render_field_errors, render_outcome, OutputFormat};
use glycorisk::adapters::predictor::{HttpPredictor, HttpPredictorConfig};
use glycorisk::application::{SubmissionController, SubmitError};
use glycorisk::config::AppConfig;
use glycorisk::domain::assessment::RiskAssessmentInput;
use glycorisk::telemetry;

#[derive(Parser)]
#[command(name = "glycorisk")]
#[command(about = "Diabetes risk assessment client", long_about = None)]
#[command(version)]
struct Cli {
    /// Form JSON to submit (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Prediction endpoint URL, overriding configuration
    #[arg(long)]
    endpoint: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load_validated(cli.endpoint).context("Failed to load configuration")?;

    telemetry::init_tracing(&config.logging).context("Failed to initialize logging")?;

    let input = read_input(cli.file.as_deref())?;

    let predictor = HttpPredictor::new(HttpPredictorConfig::from(&config.predictor))?;
    tracing::debug!(endpoint = predictor.endpoint_url(), "Prediction client ready");
    let controller = SubmissionController::new(Arc::new(predictor));

    match controller.submit_raw(&input).await {
        Ok(outcome) => {
            println!("{}", render_outcome(&outcome, cli.format));
            Ok(if outcome.is_failure() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Err(SubmitError::Invalid(errors)) => {
            println!("{}", render_field_errors(&errors, cli.format));
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn read_input(path: Option<&std::path::Path>) -> Result<RiskAssessmentInput> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Input is not a valid assessment form")
}
