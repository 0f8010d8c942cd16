//! Selection state and the recompute-and-notify loop.
//!
//! A [`Dashboard`] starts `Uninitialized`, becomes `Loaded` when a dataset
//! arrives (or `Failed` when loading fails) and moves to `Filtered` on every
//! user interaction. Each transition runs the whole pipeline from the full
//! dataset and hands the fresh [`DashboardView`] to every observer.

use crate::aggregate::{aggregate, sex_distribution, Aggregation, SexDistribution};
use crate::bucket::county_colors;
use crate::color::Rgb;
use crate::config::DashboardConfig;
use crate::selection::{Selection, SelectionError, YearRange};
use cid_core::dataset::Dataset;
use serde::Serialize;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loaded,
    Filtered,
    /// Loading failed; the message is shown and controls stay disabled.
    Failed(String),
}

impl Phase {
    /// Whether the controls accept input.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Phase::Loaded | Phase::Filtered)
    }
}

/// Everything the renderers draw for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub aggregation: Aggregation,
    pub sex_distribution: SexDistribution,
    pub county_colors: BTreeMap<String, Rgb>,
}

/// Callback run after every recompute.
pub type Observer = Box<dyn FnMut(&DashboardView)>;

pub struct Dashboard {
    config: DashboardConfig,
    phase: Phase,
    dataset: Option<Dataset>,
    diseases: Vec<String>,
    span: Option<RangeInclusive<i32>>,
    selection: Selection,
    view: Option<DashboardView>,
    observers: Vec<Observer>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        let selection = Selection {
            disease: None,
            county: config.default_county.clone(),
            years: config.default_years,
        };
        Self {
            config,
            phase: Phase::Uninitialized,
            dataset: None,
            diseases: Vec::new(),
            span: None,
            selection,
            view: None,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    /// Distinct disease names, in load order.
    pub fn diseases(&self) -> &[String] {
        &self.diseases
    }

    pub fn year_span(&self) -> Option<RangeInclusive<i32>> {
        self.span.clone()
    }

    /// The most recent view, `None` before the first successful load.
    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&DashboardView) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Diseases starting with `query`, ignoring case. An empty query matches all.
    pub fn search_diseases(&self, query: &str) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        self.diseases
            .iter()
            .filter(|d| d.to_lowercase().starts_with(&query))
            .map(String::as_str)
            .collect()
    }

    /// `Uninitialized → Loaded`: apply defaults and compute the first view.
    ///
    /// The default disease is the first one in load order; the configured
    /// year range is clamped into the dataset's span.
    pub fn on_loaded(&mut self, dataset: Dataset) -> Result<&DashboardView, SelectionError> {
        let diseases = dataset.diseases();
        let (Some(first), Some(span)) = (diseases.first().cloned(), dataset.year_span()) else {
            self.on_load_failed("the disease table has no records");
            return Err(SelectionError::NotLoaded);
        };
        self.selection = Selection {
            disease: Some(first),
            county: self.config.default_county.clone(),
            years: self.config.default_years.clamp_to(&span),
        };
        log::info!(
            "[CID] dashboard: Loaded {} diseases, years {}-{}, default {:?}",
            diseases.len(),
            span.start(),
            span.end(),
            self.selection.disease
        );
        self.diseases = diseases;
        self.span = Some(span);
        self.dataset = Some(dataset);
        self.phase = Phase::Loaded;
        self.recompute()
    }

    /// Any state → `Failed`.
    pub fn on_load_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::error!("[CID] dashboard: Load failed: {}", message);
        self.dataset = None;
        self.view = None;
        self.phase = Phase::Failed(message);
    }

    /// Disease dropdown / search selection.
    pub fn select_disease(&mut self, disease: &str) -> Result<&DashboardView, SelectionError> {
        self.ensure_interactive()?;
        if !self.diseases.iter().any(|d| d == disease) {
            return Err(SelectionError::UnknownDisease(disease.to_string()));
        }
        self.selection.disease = Some(disease.to_string());
        self.filtered()
    }

    /// Map click. A county without records is valid and yields zero series.
    pub fn select_county(&mut self, county: &str) -> Result<&DashboardView, SelectionError> {
        self.ensure_interactive()?;
        self.selection.county = county.trim().to_string();
        self.filtered()
    }

    /// Year slider.
    pub fn set_year_range(&mut self, start: i32, end: i32) -> Result<&DashboardView, SelectionError> {
        self.ensure_interactive()?;
        let span = self.span.clone().ok_or(SelectionError::NotLoaded)?;
        self.selection.years = YearRange::new(start, end)?.within(&span)?;
        self.filtered()
    }

    fn ensure_interactive(&self) -> Result<(), SelectionError> {
        if self.phase.is_interactive() {
            Ok(())
        } else {
            Err(SelectionError::NotLoaded)
        }
    }

    fn filtered(&mut self) -> Result<&DashboardView, SelectionError> {
        self.phase = Phase::Filtered;
        self.recompute()
    }

    /// Run the full pipeline for the current selection and notify observers.
    pub fn recompute(&mut self) -> Result<&DashboardView, SelectionError> {
        let dataset = self.dataset.as_ref().ok_or(SelectionError::NotLoaded)?;
        let records = dataset.records();
        let view = DashboardView {
            selection: self.selection.clone(),
            aggregation: aggregate(records, &self.selection, self.config.series),
            sex_distribution: sex_distribution(records, &self.selection, self.config.series.sex),
            county_colors: county_colors(
                records,
                dataset.counties(),
                &self.selection,
                &self.config.color_strategy,
                &self.config.palette,
            ),
        };
        log::debug!("[CID] dashboard: Recomputed for {:?}", view.selection);
        for observer in self.observers.iter_mut() {
            observer(&view);
        }
        let view: &DashboardView = self.view.insert(view);
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::ColorStrategy;
    use cid_core::{SAMPLE_DISEASE_CSV, SAMPLE_TOPOLOGY_JSON};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dataset() -> Dataset {
        Dataset::from_sources(SAMPLE_DISEASE_CSV, SAMPLE_TOPOLOGY_JSON).unwrap()
    }

    fn loaded() -> Dashboard {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        dashboard.on_loaded(dataset()).unwrap();
        dashboard
    }

    #[test]
    fn starts_uninitialized_and_rejects_input() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        assert_eq!(dashboard.phase(), &Phase::Uninitialized);
        assert!(dashboard.view().is_none());
        assert_eq!(dashboard.selection().disease, None);
        assert_eq!(
            dashboard.select_county("Alameda").err(),
            Some(SelectionError::NotLoaded)
        );
    }

    #[test]
    fn load_applies_defaults() {
        let dashboard = loaded();
        assert_eq!(dashboard.phase(), &Phase::Loaded);
        let selection = dashboard.selection();
        assert_eq!(selection.disease.as_deref(), Some("Anaplasmosis"));
        assert_eq!(selection.county, "California");
        // default 2000-2005 clamped into the 2001-2005 span
        assert_eq!(selection.years, YearRange { start: 2001, end: 2005 });
        assert_eq!(dashboard.view().unwrap().aggregation.per_year.len(), 5);
    }

    #[test]
    fn interactions_move_to_filtered_and_recompute() {
        let mut dashboard = loaded();
        let palette = dashboard.config().palette.clone();
        dashboard.select_disease("Measles").unwrap();
        assert_eq!(dashboard.phase(), &Phase::Filtered);
        let view = dashboard.select_county("Alameda").unwrap();
        assert_eq!(view.aggregation.per_year[&2003].male, 10);
        assert_eq!(view.aggregation.per_year[&2003].female, 5);
        assert_eq!(view.aggregation.per_year[&2003].county_or_total, 15);
        assert_eq!(view.county_colors["Alameda"], palette.selected);

        let view = dashboard.set_year_range(2004, 2005).unwrap();
        assert_eq!(view.aggregation.per_year.len(), 2);
        assert_eq!(view.aggregation.highest_gender_value, 0);
        assert_eq!(view.county_colors["Fresno"], palette.buckets[2]);
    }

    #[test]
    fn invalid_selections_are_rejected_without_side_effects() {
        let mut dashboard = loaded();
        let before = dashboard.selection().clone();
        assert_eq!(
            dashboard.select_disease("Ebola").err(),
            Some(SelectionError::UnknownDisease("Ebola".to_string()))
        );
        assert!(matches!(
            dashboard.set_year_range(2005, 2001),
            Err(SelectionError::InvertedRange { .. })
        ));
        assert!(matches!(
            dashboard.set_year_range(1999, 2003),
            Err(SelectionError::OutOfSpan { .. })
        ));
        assert_eq!(dashboard.selection(), &before);
        assert_eq!(dashboard.phase(), &Phase::Loaded);
    }

    #[test]
    fn unknown_county_yields_zero_series() {
        let mut dashboard = loaded();
        let palette = dashboard.config().palette.clone();
        dashboard.select_disease("Measles").unwrap();
        let view = dashboard.select_county("Alpine").unwrap();
        assert!(view
            .aggregation
            .per_year
            .values()
            .all(|a| a.male == 0 && a.female == 0 && a.county_or_total == 0));
        assert_eq!(view.county_colors["Alpine"], palette.selected);
    }

    #[test]
    fn observers_see_every_recompute() {
        let seen: Rc<RefCell<Vec<Selection>>> = Rc::new(RefCell::new(Vec::new()));
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        let sink = seen.clone();
        dashboard.subscribe(move |view| sink.borrow_mut().push(view.selection.clone()));

        dashboard.on_loaded(dataset()).unwrap();
        dashboard.select_disease("Measles").unwrap();
        dashboard.select_county("Fresno").unwrap();
        let _ = dashboard.select_disease("Ebola");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[2].county, "Fresno");
        assert_eq!(seen[2].disease.as_deref(), Some("Measles"));
    }

    #[test]
    fn load_failure_disables_controls() {
        let mut dashboard = loaded();
        dashboard.on_load_failed("network unreachable");
        assert_eq!(dashboard.phase(), &Phase::Failed("network unreachable".to_string()));
        assert!(!dashboard.phase().is_interactive());
        assert!(dashboard.view().is_none());
        assert_eq!(
            dashboard.set_year_range(2001, 2002).err(),
            Some(SelectionError::NotLoaded)
        );
    }

    #[test]
    fn empty_dataset_fails_the_load() {
        let mut dashboard = Dashboard::new(DashboardConfig::default());
        let result = dashboard.on_loaded(Dataset::from_parts(Vec::new(), Vec::new()));
        assert_eq!(result.err(), Some(SelectionError::NotLoaded));
        assert!(matches!(dashboard.phase(), Phase::Failed(_)));
    }

    #[test]
    fn search_is_case_insensitive_prefix() {
        let dashboard = loaded();
        assert_eq!(dashboard.search_diseases("me"), vec!["Measles"]);
        assert_eq!(dashboard.search_diseases("  PER"), vec!["Pertussis"]);
        assert_eq!(dashboard.search_diseases("").len(), 3);
        assert!(dashboard.search_diseases("asles").is_empty());
    }

    #[test]
    fn gradient_strategy_from_config() {
        let config = DashboardConfig {
            color_strategy: ColorStrategy::Gradient {
                start: Rgb::new(0, 0, 0),
                end: Rgb::new(255, 255, 255),
            },
            ..DashboardConfig::default()
        };
        let empty = config.palette.empty;
        let mut dashboard = Dashboard::new(config);
        dashboard.on_loaded(dataset()).unwrap();
        let view = dashboard.select_disease("Measles").unwrap();
        // Los Angeles (60) is the largest total in 2001-2005
        assert_eq!(view.county_colors["Los Angeles"], Rgb::new(255, 255, 255));
        assert_eq!(view.county_colors["Alpine"], empty);
    }
}
