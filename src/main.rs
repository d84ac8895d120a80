//! ssh-index CLI - atomic single-file deploys over SFTP
//!
//! Usage: ssh-index <COMMAND>
//!
//! Commands:
//!   deploy    Upload the built artifact as a new revision
//!   activate  Point the entry point at an uploaded revision
//!   list      List uploaded revisions, newest first

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ssh_index::commands;
use ssh_index::presentation::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match commands::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            commands::report_error(&cli, &err);
            ExitCode::from(commands::exit_code(&err))
        }
    }
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ssh_index={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
