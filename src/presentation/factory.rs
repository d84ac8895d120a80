//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use is_terminal::IsTerminal;

use crate::application::{ActivateUseCase, RevisionRepository, UploadUseCase};
use crate::config::{ColorMode, DeployConfig};
use crate::domain::ports::{DeployEventSink, SessionProvider};
use crate::infrastructure::{JsonEventSink, SftpSessionProvider, TracingEventSink};

use super::cli::ColorWhen;
use super::output::OutputFormat;

/// Create the SFTP session provider for the configured host
pub fn create_session_provider(config: &DeployConfig) -> SftpSessionProvider {
    SftpSessionProvider::new(config.connect.clone())
}

/// Event sink for the output format: NDJSON on stdout, or the log stream
pub fn create_event_sink(format: OutputFormat, command: &'static str) -> Arc<dyn DeployEventSink> {
    match format {
        OutputFormat::Json => Arc::new(JsonEventSink::stdout(command)),
        OutputFormat::Text => Arc::new(TracingEventSink),
    }
}

pub fn create_revision_repository<P: SessionProvider>(
    provider: P,
    config: &DeployConfig,
    events: Arc<dyn DeployEventSink>,
) -> RevisionRepository<P> {
    RevisionRepository::new(provider, config.layout.clone()).with_events(events)
}

pub fn create_upload_use_case<P: SessionProvider>(
    provider: P,
    config: &DeployConfig,
    events: Arc<dyn DeployEventSink>,
) -> UploadUseCase<P> {
    UploadUseCase::new(provider, config.layout.clone()).with_events(events)
}

pub fn create_activate_use_case<P: SessionProvider>(
    provider: P,
    config: &DeployConfig,
    events: Arc<dyn DeployEventSink>,
) -> ActivateUseCase<P> {
    ActivateUseCase::new(provider, config.layout.clone()).with_events(events)
}

/// Decide whether text output is colored
///
/// The `--color` flag wins over the `[output] color` setting. `auto`
/// colors only a terminal stdout without `NO_COLOR`. JSON is never colored.
pub fn use_color(flag: Option<ColorWhen>, configured: ColorMode, format: OutputFormat) -> bool {
    if format == OutputFormat::Json {
        return false;
    }
    let mode = match flag {
        Some(ColorWhen::Always) => ColorMode::Always,
        Some(ColorWhen::Never) => ColorMode::Never,
        Some(ColorWhen::Auto) => ColorMode::Auto,
        None => configured,
    };
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal(),
    }
}
