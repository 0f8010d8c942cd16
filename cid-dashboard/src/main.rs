//! California Infectious Disease Dashboard
//!
//! A county choropleth, a year range slider, and per-year sex and county
//! line charts for one disease at a time.
//!
//! Data flow:
//! 1. On mount: fetch the disease CSV and the county TopoJSON concurrently.
//! 2. Hand the joined dataset to the `Dashboard`, which applies the default
//!    selection and computes the first view.
//! 3. Every disease, county or year change recomputes the view; the observer
//!    registered here pushes it to the D3 renderers.
//! 4. A failed load leaves the controls disabled and shows the error.

use cid_core::dataset::Dataset;
use cid_data::aggregate::YearlyAggregate;
use cid_data::dashboard::{DashboardView, Phase};
use cid_ui::components::{
    ChartContainer, ChartHeader, CountySelector, DiseaseSearch, ErrorDisplay, LoadingSpinner,
    YearRangeSlider,
};
use cid_ui::js_bridge;
use cid_ui::loader::{self, DISEASE_CSV_URL, TOPOLOGY_URL};
use cid_ui::state::AppState;
use dioxus::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;

const MAP_ID: &str = "county-map";
const SEX_CHART_ID: &str = "sex-chart";
const COUNTY_CHART_ID: &str = "county-chart";
const SEX_BARS_ID: &str = "sex-bars";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("disease-dashboard-root"))
        .launch(App);
}

#[derive(Serialize)]
struct SexPoint {
    year: i32,
    male: u64,
    female: u64,
}

#[derive(Serialize)]
struct CountyPoint {
    year: i32,
    cases: u64,
}

/// Builds renderer payloads from a view. Holds the parts of the dataset
/// that do not change between views.
struct ViewRenderer {
    topology: serde_json::Value,
    labels: BTreeMap<String, String>,
}

impl ViewRenderer {
    fn new(dataset: &Dataset) -> Self {
        let topology = serde_json::from_str(dataset.topology_json()).unwrap_or_else(|e| {
            log::warn!("[CID] dashboard: topology not re-parseable: {}", e);
            serde_json::Value::Null
        });
        let labels = dataset
            .counties()
            .iter()
            .map(|c| (c.name.clone(), c.label().to_string()))
            .collect();
        Self { topology, labels }
    }

    fn render(&self, view: &DashboardView) {
        let series: Vec<YearlyAggregate> = view.aggregation.series();
        let disease = view.selection.disease.as_deref().unwrap_or("");
        let county = self
            .labels
            .get(&view.selection.county)
            .map(String::as_str)
            .unwrap_or(&view.selection.county);

        let map = json!({
            "topology": self.topology,
            "colors": view.county_colors,
            "labels": self.labels,
            "selected": view.selection.county,
        });
        js_bridge::render_choropleth(MAP_ID, &map.to_string());

        let sex_points: Vec<SexPoint> = series
            .iter()
            .map(|a| SexPoint {
                year: a.year,
                male: a.male,
                female: a.female,
            })
            .collect();
        let sex = json!({
            "data": sex_points,
            "config": {
                "title": format!("{} cases by sex, {}", disease, county),
                "series": ["male", "female"],
                "yMax": view.aggregation.highest_gender_value,
            },
        });
        js_bridge::render_line_chart(SEX_CHART_ID, &sex.to_string());

        let county_points: Vec<CountyPoint> = series
            .iter()
            .map(|a| CountyPoint {
                year: a.year,
                cases: a.county_or_total,
            })
            .collect();
        let totals = json!({
            "data": county_points,
            "config": {
                "title": format!("{} cases, {}", disease, county),
                "series": ["cases"],
                "yMax": view.aggregation.highest_county_value,
            },
        });
        js_bridge::render_line_chart(COUNTY_CHART_ID, &totals.to_string());

        let bars: Vec<serde_json::Value> = view
            .sex_distribution
            .bars()
            .iter()
            .map(|(sex, value)| json!({ "label": sex.to_string(), "value": value }))
            .collect();
        let distribution = json!({
            "data": bars,
            "config": {
                "title": format!("{} cases by sex, {} - {}", disease, view.selection.years.start, view.selection.years.end),
                "barSize": view.sex_distribution.bar_size,
            },
        });
        js_bridge::render_bar_chart(SEX_BARS_ID, &distribution.to_string());
    }
}

fn clear_charts() {
    for id in [MAP_ID, SEX_CHART_ID, COUNTY_CHART_ID, SEX_BARS_ID] {
        js_bridge::destroy_chart(id);
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    // ─── Load both files once, then hand them to the dashboard ───
    use_effect(move || {
        spawn(async move {
            match loader::fetch_dataset(DISEASE_CSV_URL, TOPOLOGY_URL).await {
                Ok(dataset) => {
                    let renderer = ViewRenderer::new(&dataset);
                    let result = {
                        let mut dashboard = state.dashboard.write();
                        dashboard.subscribe(move |view| renderer.render(view));
                        dashboard.on_loaded(dataset).map(|_| ())
                    };
                    state.report(result);

                    let registered = js_bridge::register_county_click(move |county: String| {
                        state.select_county(&county);
                    });
                    if let Err(e) = registered {
                        log::warn!("[CID] dashboard: map clicks unavailable: {:?}", e);
                    }
                }
                Err(e) => {
                    log::error!("[CID] dashboard: load failed: {}", e);
                    state.dashboard.write().on_load_failed(e.to_string());
                    state.error_msg.set(Some(e.to_string()));
                    clear_charts();
                }
            }
        });
    });

    let dashboard = state.dashboard.read();
    let phase = dashboard.phase().clone();
    let selection = dashboard.selection().clone();
    drop(dashboard);

    let disabled = !phase.is_interactive();
    let failed = matches!(phase, Phase::Failed(_));
    let disease = selection.disease.clone().unwrap_or_default();
    let subtitle = format!(
        "{}, {} - {}",
        selection.county, selection.years.start, selection.years.end
    );

    // ─── Render ───
    rsx! {
        div {
            style: "max-width: 1100px; margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone(), fatal: failed }
            }

            if phase == Phase::Uninitialized {
                LoadingSpinner {
                    sources: vec![DISEASE_CSV_URL.to_string(), TOPOLOGY_URL.to_string()],
                }
            } else {
                div {
                    style: "display: flex; gap: 24px; flex-wrap: wrap; align-items: center;",
                    DiseaseSearch {}
                    CountySelector {}
                }
                YearRangeSlider {}

                div {
                    style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px;",
                    div {
                        ChartHeader { title: "Cases by county".to_string(), subtitle: disease.clone() }
                        ChartContainer { id: MAP_ID.to_string(), disabled, min_height: 480 }
                    }
                    div {
                        ChartHeader { title: format!("{} by sex", disease), subtitle: subtitle.clone() }
                        ChartContainer { id: SEX_CHART_ID.to_string(), disabled }
                        ChartHeader { title: format!("{} cases", disease), subtitle: subtitle.clone() }
                        ChartContainer { id: COUNTY_CHART_ID.to_string(), disabled }
                        ChartContainer { id: SEX_BARS_ID.to_string(), disabled, min_height: 160 }
                    }
                }

                p {
                    style: "font-size: 11px; color: #888; text-align: center; margin-top: 4px;",
                    "Click a county on the map to chart it. Source: California Department of Public Health."
                }
            }
        }
    }
}
