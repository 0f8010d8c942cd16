//! County names from the TopoJSON boundary document.
//!
//! Only the properties of the `subunits` object are read; arcs and geometry
//! are left to the map renderer, which receives the raw document.

use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Name of the topology object holding one geometry per county.
pub const SUBUNITS_OBJECT: &str = "subunits";

/// A county shape on the choropleth, joined to records by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct County {
    pub name: String,
    pub full_name: Option<String>,
}

impl County {
    /// Tooltip label: the full name when the topology provides one.
    pub fn label(&self) -> &str {
        self.full_name.as_deref().unwrap_or(&self.name)
    }
}

#[derive(Debug, Deserialize)]
struct Topology {
    objects: HashMap<String, GeometryCollection>,
}

#[derive(Debug, Deserialize)]
struct GeometryCollection {
    #[serde(default)]
    geometries: Vec<Geometry>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(default)]
    properties: Option<Properties>,
}

#[derive(Debug, Deserialize)]
struct Properties {
    name: Option<String>,
    #[serde(rename = "fullName")]
    full_name: Option<String>,
}

/// Extract the counties of the `subunits` object, in document order.
///
/// Geometries without a `name` are ignored; a county split across several
/// geometries is reported once.
pub fn parse_topology(json: &str) -> Result<Vec<County>, LoadError> {
    let topology: Topology = serde_json::from_str(json)?;
    let subunits = topology
        .objects
        .get(SUBUNITS_OBJECT)
        .ok_or_else(|| LoadError::MissingObject(SUBUNITS_OBJECT.to_string()))?;

    let mut seen = HashSet::new();
    let counties: Vec<County> = subunits
        .geometries
        .iter()
        .filter_map(|g| g.properties.as_ref())
        .filter_map(|p| {
            let name = p.name.as_ref()?.trim().to_string();
            if name.is_empty() || !seen.insert(name.clone()) {
                return None;
            }
            Some(County {
                name,
                full_name: p.full_name.clone(),
            })
        })
        .collect();

    log::info!("[CID] topology: Loaded {} counties", counties.len());
    Ok(counties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_TOPOLOGY_JSON;

    #[test]
    fn parse_sample_topology() {
        let counties = parse_topology(SAMPLE_TOPOLOGY_JSON).unwrap();
        let names: Vec<&str> = counties.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alameda", "Fresno", "Los Angeles", "Alpine"]);
        assert_eq!(counties[0].label(), "Alameda County");
        assert_eq!(counties[3].label(), "Alpine");
    }

    #[test]
    fn missing_subunits_is_an_error() {
        let json = r#"{"type":"Topology","objects":{"land":{"geometries":[]}},"arcs":[]}"#;
        match parse_topology(json) {
            Err(LoadError::MissingObject(name)) => assert_eq!(name, "subunits"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn duplicate_and_unnamed_geometries_are_dropped() {
        let json = r#"{"objects":{"subunits":{"geometries":[
            {"properties":{"name":"Marin"}},
            {"properties":{"name":"Marin","fullName":"Marin County"}},
            {"properties":{}},
            {"type":"Polygon"}
        ]}}}"#;
        let counties = parse_topology(json).unwrap();
        assert_eq!(counties.len(), 1);
        assert_eq!(counties[0].full_name, None);
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(matches!(
            parse_topology("{not json"),
            Err(LoadError::Topology(_))
        ));
    }
}
