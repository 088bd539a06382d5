use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use staffbook_cli::cli::Cli;
use staffbook_cli::commands::{self, Outcome};
use staffbook_cli::config::CliConfig;
use staffbook_cli::render::render;
use staffbook_core::error::CoreError;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // --- Configuration ---
    let mut config = CliConfig::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    if let Some(slot) = cli.slot.clone() {
        config.slot = slot;
    }
    if let Some(seed) = cli.seed.clone() {
        config.seed_path = Some(seed);
    }

    // --- Tracing ---
    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staffbook=info".into()),
        )
        .with(fmt_layer)
        .init();

    tracing::debug!(data_dir = %config.data_dir.display(), slot = %config.slot, "Loaded configuration");

    match run(cli, &config) {
        Ok(code) => code,
        Err(err) => {
            match err.downcast_ref::<CoreError>() {
                Some(core) => eprintln!("error[{}]: {}", core.kind(), core.message()),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &CliConfig) -> anyhow::Result<ExitCode> {
    let mut store = commands::open_store(config)?;
    let outcome = commands::execute(&mut store, cli.command)?;
    println!("{}", render(&outcome, cli.json)?);

    let code = match &outcome {
        Outcome::Invalid(_) => ExitCode::FAILURE,
        Outcome::Checked(result) if !result.is_valid => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    };
    Ok(code)
}
