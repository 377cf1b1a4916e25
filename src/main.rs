mod api;
mod app;
mod cli;
mod config;
mod error;
mod session;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use console::Style;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use api::{EvaluationClient, FormData};
use cli::{Cli, Command};
use config::AppConfig;

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "teacher_eval=debug"
    } else {
        "teacher_eval=error"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref())?
        .with_cli_overrides(cli.base_url, cli.timeout_secs)
        .validated()?;
    tracing::debug!(base_url = %config.base_url, "configuration loaded");

    let client = EvaluationClient::from_config(&config)?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Health => {
            let healthy = app::health(client).await?;
            Ok(if healthy {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Info => {
            app::info(&client).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Evaluate {
            job_post,
            qualification,
            expertise,
            json,
        } => {
            let form = FormData::new(job_post, qualification, expertise);
            app::evaluate(client, form, json).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Interactive => {
            app::interactive(client).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", Style::new().red().bold().apply_to("✗"));
            ExitCode::FAILURE
        }
    }
}
