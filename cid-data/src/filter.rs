use crate::selection::Selection;
use cid_core::record::DiseaseRecord;

/// Whether a record belongs to the selected disease and year range.
///
/// County is not part of the predicate. Consumers apply their own county
/// rule on top (see [`crate::config::SeriesSource`]).
pub fn is_in_scope(record: &DiseaseRecord, selection: &Selection) -> bool {
    match selection.disease.as_deref() {
        Some(disease) => record.disease == disease && selection.years.contains(record.year),
        None => false,
    }
}

/// Iterate the in-scope records of `records`.
pub fn in_scope<'a>(
    records: &'a [DiseaseRecord],
    selection: &'a Selection,
) -> impl Iterator<Item = &'a DiseaseRecord> + 'a {
    records.iter().filter(move |r| is_in_scope(r, selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::YearRange;
    use cid_core::record::Sex;

    fn record(disease: &str, year: i32) -> DiseaseRecord {
        DiseaseRecord {
            disease: disease.to_string(),
            year,
            county: "Alameda".to_string(),
            sex: Sex::Total,
            count: 1,
            ci_upper: 1.0,
        }
    }

    fn selection(disease: Option<&str>, start: i32, end: i32) -> Selection {
        Selection {
            disease: disease.map(str::to_string),
            county: "Fresno".to_string(),
            years: YearRange::new(start, end).unwrap(),
        }
    }

    #[test]
    fn matches_disease_and_inclusive_years() {
        let sel = selection(Some("Measles"), 2000, 2005);
        assert!(is_in_scope(&record("Measles", 2000), &sel));
        assert!(is_in_scope(&record("Measles", 2005), &sel));
        assert!(!is_in_scope(&record("Measles", 2006), &sel));
        assert!(!is_in_scope(&record("Mumps", 2003), &sel));
    }

    #[test]
    fn county_is_not_part_of_the_predicate() {
        let sel = selection(Some("Measles"), 2000, 2005);
        assert!(is_in_scope(&record("Measles", 2003), &sel));
    }

    #[test]
    fn undefined_disease_matches_nothing() {
        let sel = selection(None, 2000, 2005);
        assert!(!is_in_scope(&record("Measles", 2003), &sel));
    }

    #[test]
    fn years_compare_numerically() {
        // "2010" < "2005" as text; numerically it is out of range.
        let sel = selection(Some("Measles"), 2000, 2005);
        assert!(!is_in_scope(&record("Measles", 2010), &sel));
        let records = vec![record("Measles", 999), record("Measles", 2001)];
        assert_eq!(in_scope(&records, &sel).count(), 1);
    }
}
