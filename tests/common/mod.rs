//! Common test utilities for ssh-index integration tests.
//!
//! This module provides:
//! - `TestEnv`: isolated project and home directories plus CLI helpers
//! - `Project`: a resolved configuration over an in-memory remote
//! - Fixtures: reusable config and artifact content

#![allow(dead_code)]

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
