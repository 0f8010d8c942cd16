//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use cid_data::config::DashboardConfig;
use cid_data::dashboard::{Dashboard, DashboardView};
use cid_data::selection::SelectionError;
use dioxus::prelude::*;

/// Shared application state for the dashboard.
#[derive(Clone, Copy)]
pub struct AppState {
    /// The selection state machine; every control writes through it
    pub dashboard: Signal<Dashboard>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Text typed into the disease search box
    pub search_text: Signal<String>,
}

impl AppState {
    /// Create a new AppState with the default dashboard configuration.
    pub fn new() -> Self {
        Self::with_config(DashboardConfig::default())
    }

    pub fn with_config(config: DashboardConfig) -> Self {
        Self {
            dashboard: Signal::new(Dashboard::new(config)),
            error_msg: Signal::new(None),
            search_text: Signal::new(String::new()),
        }
    }

    /// Record the outcome of a dashboard transition. A rejected input leaves
    /// the previous view on screen and surfaces the reason.
    pub fn report(&mut self, result: Result<(), SelectionError>) {
        match result {
            Ok(()) => self.error_msg.set(None),
            Err(e) => {
                log::warn!("[CID] ui: rejected input: {}", e);
                self.error_msg.set(Some(e.to_string()));
            }
        }
    }

    pub fn select_disease(&mut self, disease: &str) {
        let result = self.dashboard.write().select_disease(disease).map(drop_view);
        self.report(result);
    }

    pub fn select_county(&mut self, county: &str) {
        let result = self.dashboard.write().select_county(county).map(drop_view);
        self.report(result);
    }

    pub fn set_year_range(&mut self, start: i32, end: i32) {
        let result = self.dashboard.write().set_year_range(start, end).map(drop_view);
        self.report(result);
    }

    /// Whether controls should accept input.
    pub fn interactive(&self) -> bool {
        self.dashboard.read().phase().is_interactive()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn drop_view(_: &DashboardView) {}
