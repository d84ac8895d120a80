//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Creating use cases with infrastructure dependencies
//! - Output formatting (text/JSON)
//!
//! ## Structure
//!
//! - `cli` - Command line definition
//! - `factory` - Creates use cases with proper dependencies (dependency injection)
//! - `output` - Output rendering abstractions
//!
//! ## Usage
//!
//! ```ignore
//! use ssh_index::presentation::factory;
//!
//! let provider = factory::create_session_provider(&config);
//! let use_case = factory::create_upload_use_case(provider, &config, events);
//! let result = use_case.execute(&bytes, &key)?;
//! ```

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, ColorWhen, Commands};
pub use output::{create_renderer, DeployReport, OutputFormat, Renderer};
