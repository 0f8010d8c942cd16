//! Arguments shared by every command, and turning them into a loaded `Dashboard`.

use anyhow::Context;
use cid_core::source::load_dataset;
use cid_data::config::{DashboardConfig, SeriesSource};
use cid_data::dashboard::Dashboard;
use clap::{Args, ValueEnum};
use log::info;

pub const DEFAULT_DISEASES_CSV: &str = "fixtures/infectious-disease-data.csv";
pub const DEFAULT_TOPOLOGY: &str = "fixtures/california-map.json";

#[derive(Args, Debug, Clone)]
pub struct Inputs {
    /// Disease table CSV (path or http(s) URL)
    #[arg(long, default_value = DEFAULT_DISEASES_CSV)]
    pub diseases_csv: String,

    /// County TopoJSON (path or http(s) URL)
    #[arg(long, default_value = DEFAULT_TOPOLOGY)]
    pub topology: String,

    /// Dashboard configuration JSON; missing keys keep their defaults
    #[arg(long)]
    pub config: Option<String>,

    /// Print JSON instead of a text table
    #[arg(long)]
    pub json: bool,
}

impl Inputs {
    pub async fn load_config(&self) -> anyhow::Result<DashboardConfig> {
        let Some(path) = &self.config else {
            return Ok(DashboardConfig::default());
        };
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config {}", path))?;
        DashboardConfig::from_json(&json).with_context(|| format!("Invalid config {}", path))
    }

    /// Load both inputs and hand them to a dashboard built from the config
    /// file, after `configure` has applied any command-line overrides.
    pub async fn open_dashboard(
        &self,
        configure: impl FnOnce(&mut DashboardConfig),
    ) -> anyhow::Result<Dashboard> {
        let mut config = self.load_config().await?;
        configure(&mut config);

        let dataset = load_dataset(&self.diseases_csv, &self.topology)
            .await
            .with_context(|| {
                format!("Failed to load {} and {}", self.diseases_csv, self.topology)
            })?;
        info!(
            "Loaded {} records and {} counties",
            dataset.records().len(),
            dataset.counties().len()
        );
        let mut dashboard = Dashboard::new(config);
        dashboard
            .on_loaded(dataset)
            .context("Dataset has no usable records")?;
        Ok(dashboard)
    }
}

/// Selection overrides; anything left out keeps the dashboard's default.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectionArgs {
    #[arg(short, long)]
    pub disease: Option<String>,

    /// County name as it appears in the table, or "California" for statewide rows
    #[arg(short, long)]
    pub county: Option<String>,

    /// First year, inclusive
    #[arg(long)]
    pub start: Option<i32>,

    /// Last year, inclusive
    #[arg(long)]
    pub end: Option<i32>,
}

impl SelectionArgs {
    /// Apply the overrides in the order a user would: disease, county, years.
    pub fn apply(&self, dashboard: &mut Dashboard) -> anyhow::Result<()> {
        if let Some(disease) = &self.disease {
            dashboard.select_disease(disease)?;
        }
        if let Some(county) = &self.county {
            dashboard.select_county(county)?;
        }
        if self.start.is_some() || self.end.is_some() {
            let current = dashboard.selection().years;
            dashboard.set_year_range(
                self.start.unwrap_or(current.start),
                self.end.unwrap_or(current.end),
            )?;
        }
        Ok(())
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceArg {
    /// Rows of the selected county
    SelectedCounty,
    /// The statewide "California" rows
    Statewide,
    /// Every county row, statewide rows excluded
    AllCounties,
}

impl From<SourceArg> for SeriesSource {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::SelectedCounty => SeriesSource::SelectedCounty,
            SourceArg::Statewide => SeriesSource::Statewide,
            SourceArg::AllCounties => SeriesSource::AllCounties,
        }
    }
}
