//! Dashboard configuration.
//!
//! Every field has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! {
//!   "default_county": "Alameda",
//!   "series": { "sex": "statewide", "total": "all_counties" },
//!   "color_strategy": { "kind": "gradient", "start": "#ffcc5c", "end": "#ff6f69" }
//! }
//! ```

use crate::bucket::{ColorStrategy, Palette};
use crate::selection::YearRange;
use cid_core::record::STATEWIDE_COUNTY;
use serde::{Deserialize, Serialize};

/// Which rows feed a chart series.
///
/// The table carries both per-county rows and a statewide `California` row
/// for every year, so each series names its source explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSource {
    /// Rows of the currently selected county.
    #[default]
    SelectedCounty,
    /// The statewide `California` rows.
    Statewide,
    /// Every per-county row, statewide rows excluded.
    AllCounties,
}

impl SeriesSource {
    pub fn matches(self, county: &str, selected_county: &str) -> bool {
        match self {
            SeriesSource::SelectedCounty => county == selected_county,
            SeriesSource::Statewide => county == STATEWIDE_COUNTY,
            SeriesSource::AllCounties => county != STATEWIDE_COUNTY,
        }
    }
}

/// Sources of the two line charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesSources {
    /// Male/Female series
    pub sex: SeriesSource,
    /// County-or-total series, fed by `Total` rows
    pub total: SeriesSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub default_county: String,
    /// Clamped into the dataset's year span on load.
    pub default_years: YearRange,
    pub series: SeriesSources,
    pub color_strategy: ColorStrategy,
    pub palette: Palette,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_county: STATEWIDE_COUNTY.to_string(),
            default_years: YearRange {
                start: 2000,
                end: 2005,
            },
            series: SeriesSources::default(),
            color_strategy: ColorStrategy::default(),
            palette: Palette::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
