mod cli;
mod commands;
mod dataset;
mod domain;
mod error;
mod services;

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use cli::*;
pub use commands::*;
pub use domain::constants::*;
pub use domain::models::*;
pub use error::DashboardError;
pub use services::config::{resolve_from_cli, DashboardConfig};
pub use services::distribution::histogram;
pub use services::explain::{clamp_row, explain};
pub use services::fairness::evaluate as evaluate_fairness;
pub use services::output::{print_error, print_one};
pub use services::policy::{classify_with, decision_rows, inversion_warning, outcomes_report};
pub use services::render::*;
pub use services::report::{build_dashboard_report, schema_report};
pub use services::storage::ArtifactCache;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(code = error::error_code(&err), "command failed");
            print_error(cli.json, &err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve_from_cli(cli)?;
    tracing::debug!(?config, "configuration resolved");
    let mut cache = ArtifactCache::new();

    if handle_session_command(cli, &config, &mut cache)? {
        return Ok(());
    }
    if handle_dashboard_commands(cli, &config, &mut cache)? {
        return Ok(());
    }
    handle_section_commands(cli, &config, &mut cache)?;
    Ok(())
}

/// Logs go to stderr so `--json` stdout stays parseable.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("GOVDASH_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}
