//! Core FatturaPA document model, builder, code catalogs and validation.
//!
//! The types mirror the FatturaElettronica schema (version 1.2.x): one
//! header shared by one or more bodies. Validation reports findings as
//! data; only builder preconditions and encoding failures are errors.

mod builder;
pub mod codes;
mod error;
mod types;
mod validation;

pub use builder::*;
pub use codes::*;
pub use error::*;
pub use types::*;
pub use validation::*;
