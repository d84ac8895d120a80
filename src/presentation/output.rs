//! Output Rendering
//!
//! Provides a unified interface for rendering command results as
//! human-readable text or as JSON lines.

use std::io::{self, Write};

use crossterm::style::Stylize;
use serde::Serialize;

use crate::application::{ActivationResult, UploadResult};
use crate::config::ConfigWarning;
use crate::domain::entities::RevisionDescriptor;
use crate::error::ErrorKind;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON lines for scripting
    Json,
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    warning: &'static str,
    active: &'static str,
    inactive: &'static str,
    arrow: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            warning: "⚠",
            active: "●",
            inactive: "○",
            arrow: "↳",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            warning: "[WARN]",
            active: "*",
            inactive: "-",
            arrow: "->",
        }
    }
}

/// What a `deploy` invocation did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployReport {
    /// Revision key that was deployed
    pub revision: String,
    /// `None` when the revision was already uploaded
    pub upload: Option<UploadResult>,
    /// Set when the revision was activated as part of the deploy
    pub activation: Option<ActivationResult>,
    /// How to activate later, when it was not activated now
    pub hint: Option<String>,
}

/// Renders command results
///
/// Implementations:
/// - `TextRenderer` - human-readable, optional colors
/// - `JsonRenderer` - one JSON object per line
pub trait Renderer {
    fn config_warnings(&self, out: &mut dyn Write, warnings: &[ConfigWarning]) -> io::Result<()>;

    fn revisions(
        &self,
        out: &mut dyn Write,
        remote_dir: &str,
        revisions: &[RevisionDescriptor],
    ) -> io::Result<()>;

    fn deploy(&self, out: &mut dyn Write, report: &DeployReport) -> io::Result<()>;

    fn activation(&self, out: &mut dyn Write, result: &ActivationResult) -> io::Result<()>;

    fn error(
        &self,
        out: &mut dyn Write,
        command: &str,
        kind: ErrorKind,
        message: &str,
    ) -> io::Result<()>;
}

/// Text renderer
pub struct TextRenderer {
    /// Whether to use colors
    pub color: bool,
    /// Whether to use unicode
    pub unicode: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            color: true,
            unicode: true,
        }
    }
}

impl TextRenderer {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }

    fn success(&self, icon: &str) -> String {
        if self.color {
            icon.green().to_string()
        } else {
            icon.to_string()
        }
    }

    fn failure(&self, icon: &str) -> String {
        if self.color {
            icon.red().to_string()
        } else {
            icon.to_string()
        }
    }

    fn warning(&self, icon: &str) -> String {
        if self.color {
            icon.yellow().to_string()
        } else {
            icon.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dark_grey().to_string()
        } else {
            text.to_string()
        }
    }
}

impl Renderer for TextRenderer {
    fn config_warnings(&self, out: &mut dyn Write, warnings: &[ConfigWarning]) -> io::Result<()> {
        let icons = self.icons();
        for warning in warnings {
            let location = match warning.line {
                Some(line) => format!("{}:{}", warning.file.display(), line),
                None => warning.file.display().to_string(),
            };
            write!(
                out,
                "{} Unknown config key '{}' in {}",
                self.warning(icons.warning),
                warning.key,
                location
            )?;
            if let Some(suggestion) = &warning.suggestion {
                write!(out, " (did you mean '{}'?)", suggestion)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn revisions(
        &self,
        out: &mut dyn Write,
        remote_dir: &str,
        revisions: &[RevisionDescriptor],
    ) -> io::Result<()> {
        if revisions.is_empty() {
            return writeln!(out, "No revisions uploaded to {}", remote_dir);
        }

        let icons = self.icons();
        writeln!(out, "Revisions in {} ({})", remote_dir, revisions.len())?;
        writeln!(out)?;

        let width = revisions
            .iter()
            .map(|r| r.revision.chars().count())
            .max()
            .unwrap_or(0);
        for revision in revisions {
            let marker = if revision.active {
                self.success(icons.active)
            } else {
                icons.inactive.to_string()
            };
            let timestamp = revision.timestamp.format("%Y-%m-%d %H:%M:%S UTC");
            write!(
                out,
                "  {} {:<width$}  {}",
                marker,
                revision.revision,
                self.dim(&timestamp.to_string()),
                width = width
            )?;
            if revision.active {
                write!(out, "  (active)")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn deploy(&self, out: &mut dyn Write, report: &DeployReport) -> io::Result<()> {
        let icons = self.icons();
        match &report.upload {
            Some(upload) => {
                writeln!(
                    out,
                    "{} Uploaded revision {} ({} bytes)",
                    self.success(icons.check),
                    upload.revision_key,
                    upload.bytes
                )?;
                writeln!(out, "  {} {}", icons.arrow, upload.remote_path)?;
            }
            None => writeln!(
                out,
                "{} Revision {} is already uploaded",
                icons.inactive, report.revision
            )?,
        }

        if let Some(activation) = &report.activation {
            self.activation(out, activation)?;
        }
        if let Some(hint) = &report.hint {
            writeln!(out)?;
            writeln!(out, "{}", hint)?;
        }
        Ok(())
    }

    fn activation(&self, out: &mut dyn Write, result: &ActivationResult) -> io::Result<()> {
        let icons = self.icons();
        writeln!(
            out,
            "{} Activated revision {}",
            self.success(icons.check),
            result.activated_revision_key
        )?;
        if result.entry_point_was_absent {
            writeln!(
                out,
                "  {} entry point did not exist before; it was created",
                self.warning(icons.warning)
            )?;
        }
        Ok(())
    }

    fn error(
        &self,
        out: &mut dyn Write,
        _command: &str,
        _kind: ErrorKind,
        message: &str,
    ) -> io::Result<()> {
        writeln!(out, "{} Error: {}", self.failure(self.icons().cross), message)
    }
}

/// JSON renderer - one compact object per line, so it interleaves with the
/// NDJSON event stream
pub struct JsonRenderer;

impl JsonRenderer {
    fn write_line(out: &mut dyn Write, value: &serde_json::Value) -> io::Result<()> {
        writeln!(out, "{}", value)
    }
}

fn kind_name(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::NothingToDo => "nothing_to_do",
        ErrorKind::BadInput => "bad_input",
        ErrorKind::Failure => "failure",
    }
}

impl Renderer for JsonRenderer {
    fn config_warnings(&self, out: &mut dyn Write, warnings: &[ConfigWarning]) -> io::Result<()> {
        for warning in warnings {
            Self::write_line(
                out,
                &serde_json::json!({
                    "event": "config_warning",
                    "key": warning.key,
                    "file": warning.file.display().to_string(),
                    "line": warning.line,
                    "suggestion": warning.suggestion,
                }),
            )?;
        }
        Ok(())
    }

    fn revisions(
        &self,
        out: &mut dyn Write,
        remote_dir: &str,
        revisions: &[RevisionDescriptor],
    ) -> io::Result<()> {
        Self::write_line(
            out,
            &serde_json::json!({
                "event": "complete",
                "command": "list",
                "status": "success",
                "remote_dir": remote_dir,
                "revisions": revisions,
            }),
        )
    }

    fn deploy(&self, out: &mut dyn Write, report: &DeployReport) -> io::Result<()> {
        let status = if report.upload.is_some() {
            "success"
        } else {
            "unchanged"
        };
        Self::write_line(
            out,
            &serde_json::json!({
                "event": "complete",
                "command": "deploy",
                "status": status,
                "revision": report.revision,
                "remote_path": report.upload.as_ref().map(|u| u.remote_path.as_str()),
                "bytes": report.upload.as_ref().map(|u| u.bytes),
                "activated": report.activation.is_some(),
                "hint": report.hint,
            }),
        )
    }

    fn activation(&self, out: &mut dyn Write, result: &ActivationResult) -> io::Result<()> {
        Self::write_line(
            out,
            &serde_json::json!({
                "event": "complete",
                "command": "activate",
                "status": "success",
                "revision": result.activated_revision_key,
                "entry_point_was_absent": result.entry_point_was_absent,
            }),
        )
    }

    fn error(
        &self,
        out: &mut dyn Write,
        command: &str,
        kind: ErrorKind,
        message: &str,
    ) -> io::Result<()> {
        Self::write_line(
            out,
            &serde_json::json!({
                "event": "error",
                "command": command,
                "kind": kind_name(kind),
                "message": message,
            }),
        )
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, color: bool, unicode: bool) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { color, unicode }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
