use crate::error::LoadError;
use crate::record::{parse_disease_csv, DiseaseRecord};
use crate::topology::{parse_topology, County};
use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::rc::Rc;

/// The disease table joined with the county topology, loaded once.
///
/// Cheaply cloneable (via `Rc`) so UI components and the pipeline can share
/// one copy in a single-threaded WASM environment. Never mutated after load.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Rc<[DiseaseRecord]>,
    counties: Rc<[County]>,
    topology_json: Rc<str>,
}

impl Dataset {
    /// Build a dataset from the raw text of both input files.
    pub fn from_sources(disease_csv: &str, topology_json: &str) -> Result<Self, LoadError> {
        let records = parse_disease_csv(disease_csv)?;
        if records.is_empty() {
            return Err(LoadError::Empty("disease table"));
        }
        let counties = parse_topology(topology_json)?;
        Ok(Self {
            records: records.into(),
            counties: counties.into(),
            topology_json: topology_json.into(),
        })
    }

    /// Build a dataset from already typed parts (no topology document).
    pub fn from_parts(records: Vec<DiseaseRecord>, counties: Vec<County>) -> Self {
        Self {
            records: records.into(),
            counties: counties.into(),
            topology_json: "".into(),
        }
    }

    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    pub fn counties(&self) -> &[County] {
        &self.counties
    }

    /// The raw topology document, handed unchanged to the map renderer.
    pub fn topology_json(&self) -> &str {
        &self.topology_json
    }

    /// Distinct disease names in load order.
    pub fn diseases(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.disease.as_str()))
    }

    /// Distinct county values of the table (statewide rows included) in load order.
    pub fn record_counties(&self) -> Vec<String> {
        distinct(self.records.iter().map(|r| r.county.as_str()))
    }

    /// Earliest through latest year observed in the table.
    pub fn year_span(&self) -> Option<RangeInclusive<i32>> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some(min..=max)
    }
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
