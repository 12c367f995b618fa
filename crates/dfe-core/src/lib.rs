#![deny(missing_docs)]
#![doc = "Shared error and provenance types for the free-energy reweighting workspace."]

pub mod errors;
pub mod provenance;

pub use errors::{DfeError, ErrorInfo};
pub use provenance::{RunProvenance, SchemaVersion};
