//! Domain Services
//!
//! Stateless business logic over domain entities.

mod revision_catalog;

pub use revision_catalog::catalog;
