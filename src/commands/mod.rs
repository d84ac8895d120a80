//! Command runners
//!
//! Each subcommand loads its settings, wires the infrastructure through
//! `presentation::factory` and renders its result. `main` only parses the
//! command line, installs logging and maps errors to exit codes.

pub mod activate;
pub mod deploy;
pub mod list;
mod project_root;

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::config::{self, ColorMode, DeployConfig};
use crate::error::{ErrorKind, SshIndexError, SshIndexResult};
use crate::presentation::cli::{Cli, Commands};
use crate::presentation::{create_renderer, factory, OutputFormat, Renderer};

pub use deploy::DeployOptions;
pub use project_root::discover_project_root;

/// Settings and output for one invocation
pub struct Invocation {
    pub config: DeployConfig,
    pub format: OutputFormat,
    pub renderer: Box<dyn Renderer>,
}

impl Invocation {
    /// Load configuration for `cli`, starting the project search at `cwd`
    ///
    /// Precedence: config file, then `[targets.<name>]`, then `SSH_INDEX_*`
    /// variables from `env`. Unknown keys are reported through the renderer
    /// before required keys are checked.
    pub fn load<F>(cli: &Cli, cwd: &std::path::Path, env: F) -> SshIndexResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_root = discover_project_root(cwd);
        let format = output_format(cli);

        let (mut raw, warnings) = config::load(cli.config.as_deref(), &project_root)?;
        if let Some(name) = &cli.target {
            raw = raw.select_target(name)?;
        }
        let raw = config::with_env_overrides(raw, env)?;

        let color = factory::use_color(cli.color, raw.output.color.unwrap_or_default(), format);
        let renderer = create_renderer(format, color, raw.output.unicode.unwrap_or(true));
        if !warnings.is_empty() {
            match format {
                OutputFormat::Json => renderer.config_warnings(&mut io::stdout(), &warnings)?,
                OutputFormat::Text => renderer.config_warnings(&mut io::stderr(), &warnings)?,
            }
        }

        let config = raw.resolve(&project_root, cli.target.as_deref())?;
        Ok(Self {
            config,
            format,
            renderer,
        })
    }
}

/// Run the parsed command against the process environment
pub fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine current directory")?;
    let invocation = Invocation::load(cli, &cwd, |key| std::env::var(key).ok())?;
    let config = &invocation.config;
    let renderer = invocation.renderer.as_ref();
    let command = command_name(&cli.command);
    let events = factory::create_event_sink(invocation.format, command);
    let provider = factory::create_session_provider(config);
    let mut out = io::stdout();

    match &cli.command {
        Commands::Deploy {
            revision,
            activate,
            dist_dir,
            file_pattern,
        } => {
            let options = DeployOptions {
                revision: revision.clone(),
                activate: *activate,
                dist_dir: dist_dir.clone(),
                file_pattern: file_pattern.clone(),
            };
            deploy::run(provider, config, &options, events, renderer, &mut out)?;
        }
        Commands::Activate { revision } => {
            activate::run(
                provider,
                config,
                revision.as_deref(),
                events,
                renderer,
                &mut out,
            )?;
        }
        Commands::List => {
            list::run(provider, config, events, renderer, &mut out)?;
        }
    }
    out.flush()?;
    Ok(())
}

pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Deploy { .. } => "deploy",
        Commands::Activate { .. } => "activate",
        Commands::List => "list",
    }
}

pub fn output_format(cli: &Cli) -> OutputFormat {
    if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    }
}

/// Classify an error for exit codes and JSON output
pub fn error_kind(err: &anyhow::Error) -> ErrorKind {
    match err.downcast_ref::<SshIndexError>() {
        Some(err) => err.kind(),
        None => ErrorKind::Failure,
    }
}

/// Process exit code for a failed run: 2 for bad input, 1 otherwise
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match error_kind(err) {
        ErrorKind::NothingToDo => 0,
        ErrorKind::BadInput => 2,
        ErrorKind::Failure => 1,
    }
}

/// Render a failed run: JSON on stdout, text on stderr
///
/// Uses only the command-line flags, since configuration may be what failed.
pub fn report_error(cli: &Cli, err: &anyhow::Error) {
    let format = output_format(cli);
    let color = factory::use_color(cli.color, ColorMode::Auto, format);
    let renderer = create_renderer(format, color, true);
    let message = err.to_string();
    let command = command_name(&cli.command);
    let kind = error_kind(err);

    let written = match format {
        OutputFormat::Json => renderer.error(&mut io::stdout(), command, kind, &message),
        OutputFormat::Text => renderer.error(&mut io::stderr(), command, kind, &message),
    };
    if let Err(e) = written {
        tracing::debug!(error = %e, "could not write error report");
    }
}
