//! Activate Module
//!
//! Points the entry point at an uploaded revision.
//!
//! ## Structure
//!
//! - `result` - `ActivationResult`
//! - `use_case` - `ActivateUseCase`

mod result;
mod use_case;

pub use result::ActivationResult;
pub use use_case::ActivateUseCase;
