//! Filtering, aggregation and map coloring for disease observations.
//!
//! This crate turns the flat record table of [`cid_core`] into the series a
//! chart draws and the colors a choropleth fills. Every function here is a
//! pure function of the records and a [`selection::Selection`]; the
//! [`dashboard::Dashboard`] owns the selection and recomputes on each change.

pub mod aggregate;
pub mod bucket;
pub mod color;
pub mod config;
pub mod dashboard;
pub mod filter;
pub mod selection;
