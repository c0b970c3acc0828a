//! Core data models for probelens.
//!
//! This crate holds the pieces every other probelens crate leans on: the
//! [`Probe`](models::Probe) interval model, the [`ProbeCatalog`](models::ProbeCatalog)
//! built from BED-like files, and small IO helpers for transparently reading
//! gzipped or plain-text inputs.

pub mod errors;
pub mod models;
pub mod utils;

// re-export for cleaner imports
pub use self::errors::CatalogError;
pub use self::models::{Probe, ProbeCatalog};
