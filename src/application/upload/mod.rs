//! Upload Module
//!
//! Writes a new revision file next to the existing ones.
//!
//! ## Structure
//!
//! - `result` - `UploadResult`
//! - `use_case` - `UploadUseCase`
//!
//! ## Usage
//!
//! ```ignore
//! use ssh_index::application::upload::UploadUseCase;
//!
//! let use_case = UploadUseCase::new(provider, layout);
//! let result = use_case.execute(&bytes, &key)?;
//! ```

mod result;
mod use_case;

pub use result::UploadResult;
pub use use_case::UploadUseCase;
