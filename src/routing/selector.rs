//! Nearest-K selection of filming locations for a year

use serde::Serialize;
use tracing::{debug, warn};

use crate::geo::distance::haversine_km;
use crate::models::{Coordinate, GeoRecord, RankedCandidate};
use crate::{FilmRouteError, Result};

/// Outcome of a selection.
///
/// A year with no records is an empty result, not a failure.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub enum Selection {
    Matched(Vec<RankedCandidate>),
    NoMatchingYear { year: i32 },
}

impl Selection {
    /// Candidates in ascending distance; empty when no record matched the year
    #[must_use]
    pub fn candidates(&self) -> &[RankedCandidate] {
        match self {
            Selection::Matched(candidates) => candidates,
            Selection::NoMatchingYear { .. } => &[],
        }
    }

    #[must_use]
    pub fn is_no_matching_year(&self) -> bool {
        matches!(self, Selection::NoMatchingYear { .. })
    }

    /// Escalate a missing year into `FilmRouteError::NoMatchingYear`
    pub fn into_candidates(self) -> Result<Vec<RankedCandidate>> {
        match self {
            Selection::Matched(candidates) => Ok(candidates),
            Selection::NoMatchingYear { year } => Err(FilmRouteError::NoMatchingYear { year }),
        }
    }
}

/// Select the `k` records of `year` closest to `reference`.
///
/// Ties in distance keep dataset order. Matching records with an invalid
/// coordinate are skipped.
pub fn select(
    records: &[GeoRecord],
    year: i32,
    reference: Coordinate,
    k: usize,
) -> Result<Selection> {
    reference.validate()?;

    let mut matched_year = false;
    let mut ranked: Vec<RankedCandidate> = Vec::new();
    for record in records.iter().filter(|record| record.year == year) {
        matched_year = true;
        if !record.coordinate.is_valid() {
            warn!(
                "Skipping '{}': invalid coordinate {}",
                record.title, record.coordinate
            );
            continue;
        }
        ranked.push(RankedCandidate {
            record: record.clone(),
            distance_km: haversine_km(reference, record.coordinate),
        });
    }

    if !matched_year {
        debug!("No records for year {}", year);
        return Ok(Selection::NoMatchingYear { year });
    }

    // `sort_by` is stable, so equal distances stay in dataset order.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    let available = ranked.len();
    ranked.truncate(k);

    debug!(
        "Selected {} of {} candidates for year {} near {}",
        ranked.len(),
        available,
        year,
        reference
    );
    Ok(Selection::Matched(ranked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::distance;
    use rstest::rstest;

    const KM_PER_DEGREE_LAT: f64 = 111.194_926_644_558_7;

    /// A record `km` kilometers due north of `reference`
    fn north_of(reference: Coordinate, km: f64, title: &str, year: i32) -> GeoRecord {
        GeoRecord::new(
            title,
            year,
            Coordinate::new(reference.latitude + km / KM_PER_DEGREE_LAT, reference.longitude),
        )
    }

    fn titles(selection: &Selection) -> Vec<&str> {
        selection
            .candidates()
            .iter()
            .map(|c| c.record.title.as_str())
            .collect()
    }

    #[test]
    fn test_worked_example_picks_two_closest_in_order() {
        let reference = Coordinate::new(40.0, -74.0);
        let records = vec![
            north_of(reference, 5.0, "five", 2000),
            north_of(reference, 1.0, "one", 2000),
            north_of(reference, 3.0, "three", 2000),
            north_of(reference, 0.5, "other year", 2001),
        ];

        let selection = select(&records, 2000, reference, 2).unwrap();
        assert_eq!(titles(&selection), vec!["one", "three"]);

        let distances: Vec<f64> = selection.candidates().iter().map(|c| c.distance_km).collect();
        assert!((distances[0] - 1.0).abs() < 1e-6);
        assert!((distances[1] - 3.0).abs() < 1e-6);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 3)]
    #[case(10, 4)]
    fn test_returns_at_most_k(#[case] k: usize, #[case] expected: usize) {
        let reference = Coordinate::new(10.0, 10.0);
        let records: Vec<GeoRecord> = (1..=4)
            .map(|i| north_of(reference, f64::from(i) * 10.0, &format!("r{i}"), 1995))
            .collect();

        let selection = select(&records, 1995, reference, k).unwrap();
        assert!(!selection.is_no_matching_year());
        assert_eq!(selection.candidates().len(), expected);
    }

    #[test]
    fn test_results_are_sorted_and_filtered_by_year() {
        let reference = Coordinate::new(49.84, 24.03);
        let records = vec![
            GeoRecord::new("a", 2010, Coordinate::new(50.45, 30.52)),
            GeoRecord::new("b", 2011, Coordinate::new(49.85, 24.02)),
            GeoRecord::new("c", 2010, Coordinate::new(52.23, 21.01)),
            GeoRecord::new("d", 2010, Coordinate::new(49.80, 24.00)),
            GeoRecord::new("e", 2010, Coordinate::new(48.92, 24.71)),
        ];

        let selection = select(&records, 2010, reference, 10).unwrap();
        let candidates = selection.candidates();
        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|c| c.record.year == 2010));
        assert!(candidates.windows(2).all(|w| w[0].distance_km <= w[1].distance_km));
        for candidate in candidates {
            let expected = distance(reference, candidate.record.coordinate).unwrap();
            assert_eq!(candidate.distance_km, expected);
        }
    }

    #[test]
    fn test_ties_keep_dataset_order() {
        let reference = Coordinate::new(0.0, 0.0);
        let records = vec![
            GeoRecord::new("east", 1980, Coordinate::new(0.0, 1.0)),
            GeoRecord::new("near", 1980, Coordinate::new(0.0, 0.5)),
            GeoRecord::new("west", 1980, Coordinate::new(0.0, -1.0)),
        ];

        let selection = select(&records, 1980, reference, 3).unwrap();
        assert_eq!(titles(&selection), vec!["near", "east", "west"]);
    }

    #[test]
    fn test_missing_year_is_reported_as_empty() {
        let reference = Coordinate::new(0.0, 0.0);
        let records = vec![GeoRecord::new("a", 1999, Coordinate::new(1.0, 1.0))];

        let selection = select(&records, 2020, reference, 10).unwrap();
        assert_eq!(selection, Selection::NoMatchingYear { year: 2020 });
        assert!(selection.candidates().is_empty());

        let err = selection.into_candidates().unwrap_err();
        assert!(matches!(err, FilmRouteError::NoMatchingYear { year: 2020 }));
    }

    #[test]
    fn test_empty_dataset_has_no_matching_year() {
        let selection = select(&[], 2000, Coordinate::new(0.0, 0.0), 10).unwrap();
        assert!(selection.is_no_matching_year());
    }

    #[test]
    fn test_invalid_reference_fails() {
        let records = vec![GeoRecord::new("a", 1999, Coordinate::new(1.0, 1.0))];
        let err = select(&records, 1999, Coordinate::new(100.0, 0.0), 10).unwrap_err();
        assert!(matches!(err, FilmRouteError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_invalid_record_is_skipped() {
        let reference = Coordinate::new(0.0, 0.0);
        let records = vec![
            GeoRecord::new("broken", 2005, Coordinate::new(0.0, 400.0)),
            GeoRecord::new("fine", 2005, Coordinate::new(0.0, 1.0)),
        ];

        let selection = select(&records, 2005, reference, 10).unwrap();
        assert_eq!(titles(&selection), vec!["fine"]);
    }
}
