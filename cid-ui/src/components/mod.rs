//! Reusable Dioxus RSX components for the disease dashboard.

mod chart_container;
mod chart_header;
mod county_selector;
mod disease_search;
mod error_display;
mod loading_spinner;
mod year_range_slider;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use county_selector::CountySelector;
pub use disease_search::DiseaseSearch;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use year_range_slider::YearRangeSlider;
