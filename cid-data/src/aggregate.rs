//! Per-year sums for the sex and county line charts.

use crate::config::{SeriesSource, SeriesSources};
use crate::filter::in_scope;
use crate::selection::Selection;
use cid_core::record::{DiseaseRecord, Sex};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sums for one year of the selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct YearlyAggregate {
    pub year: i32,
    pub male: u64,
    pub female: u64,
    pub county_or_total: u64,
}

/// Result of one aggregation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Aggregation {
    /// Exactly one entry per year of the selected range, zeros included.
    pub per_year: BTreeMap<i32, YearlyAggregate>,
    /// `max(male, female)` over all years, for the sex chart's y-axis.
    pub highest_gender_value: u64,
    /// Largest `county_or_total`, for the county chart's y-axis.
    pub highest_county_value: u64,
}

impl Aggregation {
    /// Entries in year order, as the charts consume them.
    pub fn series(&self) -> Vec<YearlyAggregate> {
        self.per_year.values().copied().collect()
    }
}

/// Sum the in-scope records per year.
///
/// `Male`/`Female` rows count when `sources.sex` accepts their county;
/// `Total` rows count when `sources.total` does. Sums saturate at
/// `u64::MAX`. Extrema are computed from the returned entries only.
pub fn aggregate(
    records: &[DiseaseRecord],
    selection: &Selection,
    sources: SeriesSources,
) -> Aggregation {
    let mut per_year: BTreeMap<i32, YearlyAggregate> = selection
        .years
        .years()
        .map(|year| {
            (
                year,
                YearlyAggregate {
                    year,
                    ..Default::default()
                },
            )
        })
        .collect();

    for record in in_scope(records, selection) {
        let Some(entry) = per_year.get_mut(&record.year) else {
            continue;
        };
        let county = record.county.as_str();
        match record.sex {
            Sex::Male if sources.sex.matches(county, &selection.county) => {
                entry.male = entry.male.saturating_add(record.count)
            }
            Sex::Female if sources.sex.matches(county, &selection.county) => {
                entry.female = entry.female.saturating_add(record.count)
            }
            Sex::Total if sources.total.matches(county, &selection.county) => {
                entry.county_or_total = entry.county_or_total.saturating_add(record.count)
            }
            _ => {}
        }
    }

    let highest_gender_value = per_year
        .values()
        .map(|a| a.male.max(a.female))
        .max()
        .unwrap_or(0);
    let highest_county_value = per_year
        .values()
        .map(|a| a.county_or_total)
        .max()
        .unwrap_or(0);

    log::debug!(
        "[CID] aggregate: {} years, highest gender {}, highest county {}",
        per_year.len(),
        highest_gender_value,
        highest_county_value
    );

    Aggregation {
        per_year,
        highest_gender_value,
        highest_county_value,
    }
}

/// Male and female case totals over the whole selected range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SexDistribution {
    pub male: u64,
    pub female: u64,
    /// `max(male, female)`, the bar chart's axis length.
    pub bar_size: u64,
}

impl SexDistribution {
    pub fn bars(&self) -> [(Sex, u64); 2] {
        [(Sex::Male, self.male), (Sex::Female, self.female)]
    }
}

pub fn sex_distribution(
    records: &[DiseaseRecord],
    selection: &Selection,
    source: SeriesSource,
) -> SexDistribution {
    let mut distribution = SexDistribution::default();
    for record in in_scope(records, selection) {
        if !source.matches(&record.county, &selection.county) {
            continue;
        }
        match record.sex {
            Sex::Male => distribution.male = distribution.male.saturating_add(record.count),
            Sex::Female => distribution.female = distribution.female.saturating_add(record.count),
            Sex::Total => {}
        }
    }
    distribution.bar_size = distribution.male.max(distribution.female);
    distribution
}
