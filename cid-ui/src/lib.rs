//! Shared Dioxus components, browser loading and D3.js bridge for the
//! California infectious disease dashboard.
//!
//! This crate provides:
//! - `loader`: fetches the disease CSV and county TopoJSON concurrently
//! - `js_bridge`: Rust wrappers around the page's D3.js renderers
//! - `state`: Reactive AppState wrapping the `cid_data::dashboard::Dashboard`
//! - `components`: Reusable RSX components (search, selectors, containers)

pub mod components;
pub mod js_bridge;
pub mod loader;
pub mod state;
