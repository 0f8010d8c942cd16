//! Choropleth coloring: discrete confidence-interval buckets or a gradient
//! by relative case count.

use crate::color::Rgb;
use crate::filter::in_scope;
use crate::selection::Selection;
use cid_core::record::{DiseaseRecord, Sex};
use cid_core::topology::County;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Upper bounds (exclusive) of the first three buckets, applied to `CI.upper`.
pub const CI_UPPER_THRESHOLDS: [f64; 3] = [0.898, 2.801, 5.801];

/// Severity class of a county, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Bucket {
    Low,
    Moderate,
    High,
    Severe,
}

impl Bucket {
    /// Classify a confidence-interval upper bound. NaN classifies as `Low`.
    pub fn from_ci_upper(u: f64) -> Bucket {
        let [t0, t1, t2] = CI_UPPER_THRESHOLDS;
        if u.is_nan() || u < t0 {
            Bucket::Low
        } else if u < t1 {
            Bucket::Moderate
        } else if u < t2 {
            Bucket::High
        } else {
            Bucket::Severe
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fill colors for the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// One color per [`Bucket`], lowest severity first.
    pub buckets: [Rgb; 4],
    /// Counties without data.
    pub empty: Rgb,
    /// The currently selected county, regardless of its data.
    pub selected: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            buckets: [
                Rgb::new(0xce, 0xce, 0xce),
                Rgb::new(0xff, 0xcc, 0x5c),
                Rgb::new(0xff, 0x6f, 0x69),
                Rgb::new(0x2d, 0xb7, 0xe2),
            ],
            empty: Rgb::new(0x88, 0xd8, 0xb0),
            selected: Rgb::new(0x21, 0x96, 0xf3),
        }
    }
}

impl Palette {
    pub fn bucket(&self, bucket: Bucket) -> Rgb {
        self.buckets[bucket.index()]
    }
}

/// How a county's data becomes a color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColorStrategy {
    /// Discrete buckets by the county's highest in-scope `CI.upper`.
    Threshold,
    /// Linear blend by the county's case total relative to the largest total.
    Gradient { start: Rgb, end: Rgb },
}

impl Default for ColorStrategy {
    fn default() -> Self {
        ColorStrategy::Threshold
    }
}

/// `total / max_total` in `[0, 1]`, or `None` when no county has any cases.
pub fn gradient_ratio(total: u64, max_total: u64) -> Option<f64> {
    if max_total == 0 {
        return None;
    }
    Some((total as f64 / max_total as f64).clamp(0.0, 1.0))
}

/// In-scope `Total` rows of one county, summed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct CountySummary {
    total: u64,
    ci_upper: f64,
}

fn summarize_counties<'a>(
    records: &'a [DiseaseRecord],
    selection: &'a Selection,
) -> HashMap<&'a str, CountySummary> {
    let mut summaries: HashMap<&str, CountySummary> = HashMap::new();
    for record in in_scope(records, selection) {
        if record.sex != Sex::Total || record.is_statewide() {
            continue;
        }
        let summary = summaries.entry(record.county.as_str()).or_default();
        summary.total = summary.total.saturating_add(record.count);
        summary.ci_upper = summary.ci_upper.max(record.ci_upper);
    }
    summaries
}

/// Fill color for every county of the map, keyed by county name.
///
/// The selected county always gets `palette.selected`. Counties without an
/// in-scope `Total` row get `palette.empty`, as does every county when the
/// gradient's largest total is zero.
pub fn county_colors(
    records: &[DiseaseRecord],
    counties: &[County],
    selection: &Selection,
    strategy: &ColorStrategy,
    palette: &Palette,
) -> BTreeMap<String, Rgb> {
    let summaries = summarize_counties(records, selection);
    let max_total = summaries.values().map(|s| s.total).max().unwrap_or(0);

    counties
        .iter()
        .map(|county| {
            let color = if county.name == selection.county {
                palette.selected
            } else {
                match (summaries.get(county.name.as_str()), strategy) {
                    (None, _) => palette.empty,
                    (Some(summary), ColorStrategy::Threshold) => {
                        palette.bucket(Bucket::from_ci_upper(summary.ci_upper))
                    }
                    (Some(summary), ColorStrategy::Gradient { start, end }) => {
                        match gradient_ratio(summary.total, max_total) {
                            Some(ratio) => start.lerp(*end, ratio),
                            None => palette.empty,
                        }
                    }
                }
            };
            (county.name.clone(), color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::YearRange;

    fn total(county: &str, year: i32, count: u64, ci_upper: f64) -> DiseaseRecord {
        DiseaseRecord {
            disease: "Measles".to_string(),
            year,
            county: county.to_string(),
            sex: Sex::Total,
            count,
            ci_upper,
        }
    }

    fn county(name: &str) -> County {
        County {
            name: name.to_string(),
            full_name: None,
        }
    }

    fn selection(selected: &str) -> Selection {
        Selection {
            disease: Some("Measles".to_string()),
            county: selected.to_string(),
            years: YearRange::new(2000, 2005).unwrap(),
        }
    }

    #[test]
    fn thresholds_are_numeric() {
        assert_eq!(Bucket::from_ci_upper(0.0), Bucket::Low);
        assert_eq!(Bucket::from_ci_upper(0.897), Bucket::Low);
        assert_eq!(Bucket::from_ci_upper(0.898), Bucket::Moderate);
        assert_eq!(Bucket::from_ci_upper(2.801), Bucket::High);
        assert_eq!(Bucket::from_ci_upper(5.801), Bucket::Severe);
        // "10.5" < "2.801" as text
        assert_eq!(Bucket::from_ci_upper(10.5), Bucket::Severe);
        assert_eq!(Bucket::from_ci_upper(f64::NAN), Bucket::Low);
    }

    #[test]
    fn thresholds_are_monotonic() {
        let mut previous = Bucket::Low;
        for step in 0..1000 {
            let bucket = Bucket::from_ci_upper(step as f64 * 0.01);
            assert!(bucket >= previous);
            previous = bucket;
        }
        assert_eq!(previous, Bucket::Severe);
    }

    #[test]
    fn ratio_without_data_is_none() {
        assert_eq!(gradient_ratio(0, 0), None);
        assert_eq!(gradient_ratio(5, 10), Some(0.5));
        assert_eq!(gradient_ratio(10, 10), Some(1.0));
    }

    #[test]
    fn threshold_colors_use_highest_ci_upper() {
        let records = vec![
            total("Alameda", 2003, 15, 1.679),
            total("Alameda", 2004, 2, 3.1),
            total("Fresno", 2004, 30, 0.5),
        ];
        let counties = vec![county("Alameda"), county("Fresno"), county("Alpine")];
        let palette = Palette::default();
        let colors = county_colors(
            &records,
            &counties,
            &selection("California"),
            &ColorStrategy::Threshold,
            &palette,
        );
        assert_eq!(colors["Alameda"], palette.bucket(Bucket::High));
        assert_eq!(colors["Fresno"], palette.bucket(Bucket::Low));
        assert_eq!(colors["Alpine"], palette.empty);
    }

    #[test]
    fn selected_county_overrides_data_color() {
        let records = vec![total("Alameda", 2003, 15, 9.0)];
        let counties = vec![county("Alameda")];
        let palette = Palette::default();
        for strategy in [
            ColorStrategy::Threshold,
            ColorStrategy::Gradient {
                start: Rgb::new(0, 0, 0),
                end: Rgb::new(255, 255, 255),
            },
        ] {
            let colors =
                county_colors(&records, &counties, &selection("Alameda"), &strategy, &palette);
            assert_eq!(colors["Alameda"], palette.selected);
        }
    }

    #[test]
    fn gradient_spans_start_to_end() {
        let start = Rgb::new(0, 0, 0);
        let end = Rgb::new(200, 100, 50);
        let records = vec![
            total("Alameda", 2003, 0, 0.1),
            total("Fresno", 2004, 20, 0.1),
            total("Los Angeles", 2005, 10, 0.1),
            // statewide rows never count toward the largest total
            total("California", 2005, 1000, 0.1),
        ];
        let counties = vec![county("Alameda"), county("Fresno"), county("Los Angeles")];
        let colors = county_colors(
            &records,
            &counties,
            &selection("California"),
            &ColorStrategy::Gradient { start, end },
            &Palette::default(),
        );
        assert_eq!(colors["Alameda"], start);
        assert_eq!(colors["Fresno"], end);
        assert_eq!(colors["Los Angeles"], Rgb::new(100, 50, 25));
    }

    #[test]
    fn gradient_without_cases_uses_empty_color() {
        let records = vec![total("Alameda", 2003, 0, 0.1), total("Fresno", 2003, 0, 0.1)];
        let counties = vec![county("Alameda"), county("Fresno"), county("Alpine")];
        let palette = Palette::default();
        let colors = county_colors(
            &records,
            &counties,
            &selection("California"),
            &ColorStrategy::Gradient {
                start: Rgb::new(0, 0, 0),
                end: Rgb::new(255, 255, 255),
            },
            &palette,
        );
        assert!(colors.values().all(|c| *c == palette.empty));
    }

    #[test]
    fn out_of_scope_rows_are_ignored() {
        let records = vec![total("Alameda", 2010, 99, 9.0)];
        let counties = vec![county("Alameda")];
        let palette = Palette::default();
        let colors = county_colors(
            &records,
            &counties,
            &selection("California"),
            &ColorStrategy::Threshold,
            &palette,
        );
        assert_eq!(colors["Alameda"], palette.empty);
    }

    #[test]
    fn huge_totals_saturate() {
        let records = vec![
            total("Alameda", 2003, u64::MAX, 0.1),
            total("Alameda", 2004, 1, 0.1),
            total("Fresno", 2003, 0, 0.1),
        ];
        let counties = vec![county("Alameda"), county("Fresno")];
        let start = Rgb::new(0, 0, 0);
        let end = Rgb::new(255, 255, 255);
        let colors = county_colors(
            &records,
            &counties,
            &selection("California"),
            &ColorStrategy::Gradient { start, end },
            &Palette::default(),
        );
        assert_eq!(colors["Alameda"], end);
        assert_eq!(colors["Fresno"], start);
    }
}
