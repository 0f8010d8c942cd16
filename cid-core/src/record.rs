use crate::error::LoadError;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// County value reserved for statewide aggregate rows.
pub const STATEWIDE_COUNTY: &str = "California";

/// The sex breakdown of a surveillance row.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
    Total,
}

impl FromStr for Sex {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Male" => Ok(Sex::Male),
            "Female" => Ok(Sex::Female),
            "Total" => Ok(Sex::Total),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Total => "Total",
        };
        f.write_str(s)
    }
}

/// One row of the surveillance table.
///
/// Rows whose `county` is [`STATEWIDE_COUNTY`] are statewide aggregates and
/// share the schema of the per-county rows.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DiseaseRecord {
    pub disease: String,
    pub year: i32,
    pub county: String,
    pub sex: Sex,
    /// Reported case count
    pub count: u64,
    /// Upper bound of the rate's 95% confidence interval
    pub ci_upper: f64,
}

impl DiseaseRecord {
    pub fn is_statewide(&self) -> bool {
        self.county == STATEWIDE_COUNTY
    }
}

/// A CSV row exactly as it appears in the file. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Disease")]
    disease: String,
    #[serde(rename = "County")]
    county: String,
    #[serde(rename = "Year")]
    year: String,
    #[serde(rename = "Sex")]
    sex: String,
    #[serde(rename = "Count")]
    count: String,
    #[serde(rename = "CI.upper", default)]
    ci_upper: String,
}

/// Why a raw row could not become a record.
#[derive(Debug, PartialEq, Clone)]
enum Rejection {
    Year(String),
    Sex(String),
}

fn is_missing(ess: &str) -> bool {
    matches!(
        ess.trim().to_lowercase().as_str(),
        "" | "null" | "n/a" | "na" | "-"
    )
}

/// Parse a count column. `None` means the text was not a non-negative integer.
fn parse_count(ess: &str) -> Option<u64> {
    if is_missing(ess) {
        return Some(0);
    }
    ess.trim().parse::<u64>().ok()
}

/// Parse a decimal column. `None` means the text was not a finite number.
fn parse_decimal(ess: &str) -> Option<f64> {
    if is_missing(ess) {
        return Some(0.0);
    }
    ess.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl RawRow {
    /// Convert to a record, reporting whether a numeric field fell back to zero.
    fn into_record(self) -> Result<(DiseaseRecord, bool), Rejection> {
        let year = self
            .year
            .trim()
            .parse::<i32>()
            .map_err(|_| Rejection::Year(self.year.clone()))?;
        let sex = self
            .sex
            .parse::<Sex>()
            .map_err(|_| Rejection::Sex(self.sex.clone()))?;
        let count = parse_count(&self.count);
        let ci_upper = parse_decimal(&self.ci_upper);
        let coerced = count.is_none() || ci_upper.is_none();
        let record = DiseaseRecord {
            disease: self.disease.trim().to_string(),
            year,
            county: self.county.trim().to_string(),
            sex,
            count: count.unwrap_or_default(),
            ci_upper: ci_upper.unwrap_or_default(),
        };
        Ok((record, coerced))
    }
}

/// Parse the surveillance CSV into typed records.
///
/// Expected columns (with headers, any order): `Disease, County, Year, Sex,
/// Count, CI.upper`. Rows with a non-integer `Year` or an unknown `Sex` are
/// skipped; a malformed `Count` or `CI.upper` is treated as zero.
///
/// # Example CSV
/// ```text
/// Disease,County,Year,Sex,Count,Population,Rate,CI.lower,CI.upper,Unstable
/// Measles,Alameda,2003,Male,10,724000,1.381,0.662,2.54,*
/// ```
pub fn parse_disease_csv(csv_data: &str) -> Result<Vec<DiseaseRecord>, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let mut records = Vec::new();
    let mut skipped = 0u32;
    let mut coerced = 0u32;
    for result in rdr.deserialize::<RawRow>() {
        let raw = result?;
        match raw.into_record() {
            Ok((record, fell_back)) => {
                if fell_back {
                    coerced += 1;
                }
                records.push(record);
            }
            Err(rejection) => {
                log::warn!("[CID] loader: skipping row, {:?}", rejection);
                skipped += 1;
            }
        }
    }
    log::info!(
        "[CID] loader: Loaded {} records, skipped {}, coerced {} malformed numeric fields",
        records.len(),
        skipped,
        coerced
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SAMPLE_DISEASE_CSV;

    #[test]
    fn sex_parses_known_values_only() {
        assert_eq!("Male".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!(" Female ".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("Total".parse::<Sex>(), Ok(Sex::Total));
        assert!("male".parse::<Sex>().is_err());
        assert!("".parse::<Sex>().is_err());
    }

    #[test]
    fn parse_sample_skips_unparseable_year() {
        let records = parse_disease_csv(SAMPLE_DISEASE_CSV).unwrap();
        assert_eq!(records.len(), 17);
        assert!(records.iter().all(|r| r.year >= 2001 && r.year <= 2005));
    }

    #[test]
    fn parse_converts_numeric_fields() {
        let csv = "\
Disease,County,Year,Sex,Count,CI.upper
Measles,Alameda,2003,Male,10,2.54
";
        let records = parse_disease_csv(csv).unwrap();
        assert_eq!(
            records[0],
            DiseaseRecord {
                disease: "Measles".to_string(),
                year: 2003,
                county: "Alameda".to_string(),
                sex: Sex::Male,
                count: 10,
                ci_upper: 2.54,
            }
        );
    }

    #[test]
    fn malformed_count_and_ci_fall_back_to_zero() {
        let csv = "\
Disease,County,Year,Sex,Count,CI.upper
Pertussis,Alameda,2004,Total,n/a,abc
Pertussis,Alameda,2005,Total,-3,NaN
";
        let records = parse_disease_csv(csv).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.count == 0 && r.ci_upper == 0.0));
    }

    #[test]
    fn unknown_sex_is_skipped() {
        let csv = "\
Disease,County,Year,Sex,Count,CI.upper
Measles,Alameda,2003,Unknown,10,2.54
Measles,Alameda,2003,Total,10,2.54
";
        let records = parse_disease_csv(csv).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sex, Sex::Total);
    }

    #[test]
    fn missing_ci_column_defaults_to_zero() {
        let csv = "\
Disease,County,Year,Sex,Count
Measles,Alameda,2003,Total,4
";
        let records = parse_disease_csv(csv).unwrap();
        assert_eq!(records[0].ci_upper, 0.0);
        assert_eq!(records[0].count, 4);
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "\
Disease,County,Sex,Count
Measles,Alameda,Total,4
";
        assert!(parse_disease_csv(csv).is_err());
    }

    #[test]
    fn statewide_rows_are_recognized() {
        let records = parse_disease_csv(SAMPLE_DISEASE_CSV).unwrap();
        let statewide = records.iter().filter(|r| r.is_statewide()).count();
        assert_eq!(statewide, 5);
    }
}
