//! monobump - change propagation and publish ordering for monorepo releases

use clap::Parser;
use monobump::cli::{CliArgs, Command};
use monobump::orchestrator::{verify_changes, Orchestrator};
use monobump::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(&args);

    if args.no_color {
        colored::control::set_override(false);
    }

    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the stderr tracing subscriber; `RUST_LOG` overrides the CLI level
fn init_logging(args: &CliArgs) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(args.verbose)
        .with_writer(io::stderr)
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let output_config = OutputConfig::from_cli(args.json(), args.verbose, args.quiet, args.no_color);
    let formatter = create_formatter(output_config);
    let mut stdout = io::stdout().lock();

    let exit_code = match &args.command {
        Command::Plan { .. } => {
            let outcome = Orchestrator::new(&args.config)?.plan()?;
            formatter.format_release(&outcome, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Command::Apply {
            dry_run,
            keep_changes,
            ..
        } => {
            let outcome = Orchestrator::new(&args.config)?.apply(*dry_run, *keep_changes)?;
            formatter.format_release(&outcome, &mut stdout)?;
            ExitCode::SUCCESS
        }
        Command::Verify {
            record, changed, ..
        } => {
            let missing = verify_changes(record, changed)?;
            formatter.format_missing(&missing, &mut stdout)?;
            if missing.is_empty() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
    };

    stdout.flush()?;
    Ok(exit_code)
}
