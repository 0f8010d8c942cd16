//! Core types and data loading for California infectious disease data.
//!
//! Everything textual in the source files is parsed here, once: years and
//! counts become integers, `CI.upper` becomes an `f64` and sex becomes an
//! enum. Downstream crates never compare raw CSV text.

pub mod dataset;
pub mod error;
pub mod record;
#[cfg(feature = "api")]
pub mod source;
pub mod topology;

/// Embedded sample disease table used by tests and as a CLI default.
pub static SAMPLE_DISEASE_CSV: &str = include_str!("../../fixtures/infectious-disease-data.csv");

/// Embedded sample county topology matching [`SAMPLE_DISEASE_CSV`].
pub static SAMPLE_TOPOLOGY_JSON: &str = include_str!("../../fixtures/california-map.json");
