//! Plain text rendering of command results.

use cid_core::dataset::Dataset;
use cid_data::aggregate::{Aggregation, SexDistribution};
use cid_data::color::Rgb;
use cid_data::selection::Selection;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Shape of the loaded table, as printed by `summary`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub records: usize,
    pub diseases: usize,
    pub map_counties: usize,
    pub record_counties: usize,
    pub first_year: Option<i32>,
    pub last_year: Option<i32>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let span = dataset.year_span();
        Self {
            records: dataset.records().len(),
            diseases: dataset.diseases().len(),
            map_counties: dataset.counties().len(),
            record_counties: dataset.record_counties().len(),
            first_year: span.as_ref().map(|s| *s.start()),
            last_year: span.as_ref().map(|s| *s.end()),
        }
    }
}

pub fn selection_line(selection: &Selection) -> String {
    format!(
        "{} in {}, {}-{}",
        selection.disease.as_deref().unwrap_or("(no disease)"),
        selection.county,
        selection.years.start,
        selection.years.end
    )
}

pub fn aggregation_table(
    selection: &Selection,
    aggregation: &Aggregation,
    distribution: &SexDistribution,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", selection_line(selection));
    let _ = writeln!(out, "{:>6} {:>10} {:>10} {:>10}", "year", "male", "female", "county");
    for entry in aggregation.series() {
        let _ = writeln!(
            out,
            "{:>6} {:>10} {:>10} {:>10}",
            entry.year, entry.male, entry.female, entry.county_or_total
        );
    }
    let _ = writeln!(
        out,
        "highest by sex {}, highest county {}",
        aggregation.highest_gender_value, aggregation.highest_county_value
    );
    let _ = writeln!(
        out,
        "range totals: male {}, female {}",
        distribution.male, distribution.female
    );
    out
}

pub fn colors_table(selection: &Selection, colors: &BTreeMap<String, Rgb>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", selection_line(selection));
    let width = colors.keys().map(|k| k.len()).max().unwrap_or(0);
    for (county, color) in colors {
        let _ = writeln!(out, "{:<width$}  {}", county, color);
    }
    out
}

pub fn summary_table(summary: &DatasetSummary) -> String {
    let years = match (summary.first_year, summary.last_year) {
        (Some(first), Some(last)) => format!("{}-{}", first, last),
        _ => "none".to_string(),
    };
    format!(
        "records: {}\ndiseases: {}\nmap counties: {}\ncounties in table: {}\nyears: {}\n",
        summary.records, summary.diseases, summary.map_counties, summary.record_counties, years
    )
}
