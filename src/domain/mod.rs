//! Domain Layer
//!
//! Revision naming and cataloguing rules, free of network I/O.
//!
//! ## Structure
//!
//! - `entities/` - `RemoteFile`, `RevisionDescriptor`
//! - `value_objects/` - `RevisionKey`, `KeyPrefix`, `RemoteDir`, naming rules
//! - `services/` - revision catalog (filter, derive, sort, flag active)
//! - `ports/` - remote session and deploy event interfaces

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
