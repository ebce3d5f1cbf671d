//! IMDb `locations.list` parsing
//!
//! The file is ISO-8859-1 encoded. The body starts two lines below the
//! `LOCATIONS LIST` header and the last two `\n`-separated segments are a
//! footer; with a trailing newline that is the footer line plus an empty
//! segment. Body lines look like:
//!
//! ```text
//! Vertigo (1958)\t\t\t\tSan Francisco, California, USA\t(Mission Dolores)
//! "Friends" (1994) {The One Where (#1.1)}\t\tNew York City, New York, USA
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{GeoCache, GeoRecordSource};
use crate::models::GeoRecord;
use crate::{FilmRouteError, Result};

const HEADER: &str = "LOCATIONS LIST";
const HEADER_GAP: usize = 2;
const FOOTER_LINES: usize = 2;

/// A title and the raw location string it was filmed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationEntry {
    pub title: String,
    pub year: i32,
    pub location: String,
}

/// Parser for `locations.list` content
pub struct LocationsListParser;

impl LocationsListParser {
    /// Read a file and decode it as ISO-8859-1
    pub fn load_entries<P: AsRef<Path>>(path: P) -> Result<Vec<LocationEntry>> {
        let path = path.as_ref();
        info!("Loading locations list from: {:?}", path);
        let bytes = fs::read(path)?;
        Self::parse(&decode_latin1(&bytes))
    }

    /// Parse the whole file content
    pub fn parse(content: &str) -> Result<Vec<LocationEntry>> {
        let lines: Vec<&str> = content
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        let header = lines
            .iter()
            .position(|line| line.trim_end() == HEADER)
            .ok_or_else(|| FilmRouteError::parse(format!("missing '{HEADER}' header")))?;

        let start = header + HEADER_GAP;
        let end = lines.len().saturating_sub(FOOTER_LINES);
        if start >= end {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut skipped = 0usize;
        for line in &lines[start..end] {
            match Self::parse_line(line) {
                Some(entry) => entries.push(entry),
                None => skipped += 1,
            }
        }

        info!(
            "Parsed {} location entries ({} lines skipped)",
            entries.len(),
            skipped
        );
        Ok(entries)
    }

    /// Parse one body line; `None` if it has no location or no numeric year
    #[must_use]
    pub fn parse_line(line: &str) -> Option<LocationEntry> {
        let mut line = line;

        // trailing "(note)" column
        let last_tab = line.rfind('\t')?;
        if line[last_tab + 1..].starts_with('(') {
            line = &line[..last_tab];
        }

        let tab = line.rfind('\t')?;
        let location = line[tab + 1..].trim();
        let mut title = &line[..tab];

        if title.contains('}') {
            if let Some(brace) = title.find('{') {
                title = &title[..brace];
            }
        }
        if let Some(tab) = title.find('\t') {
            title = &title[..tab];
        }
        for marker in ["(TV)", "(V)"] {
            if let Some(pos) = title.rfind(marker) {
                title = &title[..pos];
            }
        }
        let title = title.trim();

        let year = parse_year(title)?;
        if location.is_empty() {
            return None;
        }

        Some(LocationEntry {
            title: title.to_string(),
            year,
            location: location.to_string(),
        })
    }
}

/// Year from a trailing `(YYYY)`; variants like `(1999/I)` or `(????)` yield `None`
fn parse_year(title: &str) -> Option<i32> {
    let (_, last) = title.rsplit_once(' ')?;
    let digits = last.strip_prefix('(')?.strip_suffix(')')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// `locations.list` file whose location strings are resolved through a geocache
#[derive(Debug, Clone)]
pub struct LocationsListSource {
    path: PathBuf,
    geocache: GeoCache,
}

impl LocationsListSource {
    pub fn new(path: impl Into<PathBuf>, geocache: GeoCache) -> Self {
        Self {
            path: path.into(),
            geocache,
        }
    }

    /// Attach coordinates to entries, dropping those the cache cannot resolve
    #[must_use]
    pub fn resolve(entries: Vec<LocationEntry>, geocache: &GeoCache) -> Vec<GeoRecord> {
        let total = entries.len();
        let records: Vec<GeoRecord> = entries
            .into_iter()
            .filter_map(|entry| {
                let coordinate = geocache.lookup(&entry.location)?;
                Some(GeoRecord::new(entry.title, entry.year, coordinate))
            })
            .collect();
        debug!(
            "Resolved {} of {} locations through the geocache",
            records.len(),
            total
        );
        records
    }
}

impl GeoRecordSource for LocationsListSource {
    fn records(&self) -> Result<Vec<GeoRecord>> {
        let entries = LocationsListParser::load_entries(&self.path)?;
        Ok(Self::resolve(entries, &self.geocache))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinate;
    use rstest::rstest;

    const SAMPLE: &str = "CRC: 0x1234\n\
        ==============\n\
        LOCATIONS LIST\n\
        ==============\n\
        Vertigo (1958)\t\t\t\tSan Francisco, California, USA\t(Mission Dolores)\n\
        \"Friends\" (1994) {The One Where (#1.1)}\t\tNew York City, New York, USA\n\
        Some Special (2001) (TV)\t\tLviv, Ukraine\n\
        Untitled (????)\t\tNowhere\n\
        --------------------------------------------------------------------------------\n\
        footer\n";

    #[rstest]
    #[case(
        "Vertigo (1958)\t\t\t\tSan Francisco, California, USA\t(Mission Dolores)",
        "Vertigo (1958)",
        1958,
        "San Francisco, California, USA"
    )]
    #[case(
        "\"Friends\" (1994) {The One Where (#1.1)}\t\tNew York City, New York, USA",
        "\"Friends\" (1994)",
        1994,
        "New York City, New York, USA"
    )]
    #[case("Some Special (2001) (TV)\t\tLviv, Ukraine", "Some Special (2001)", 2001, "Lviv, Ukraine")]
    #[case("Home Tape (1999) (V)\tKyiv, Ukraine", "Home Tape (1999)", 1999, "Kyiv, Ukraine")]
    fn test_parse_line(
        #[case] line: &str,
        #[case] title: &str,
        #[case] year: i32,
        #[case] location: &str,
    ) {
        let entry = LocationsListParser::parse_line(line).unwrap();
        assert_eq!(entry.title, title);
        assert_eq!(entry.year, year);
        assert_eq!(entry.location, location);
    }

    #[rstest]
    #[case("Untitled (????)\t\tNowhere")]
    #[case("Remake (1999/I)\t\tParis, France")]
    #[case("no tabs at all (2000)")]
    #[case("")]
    fn test_parse_line_skips_unusable(#[case] line: &str) {
        assert!(LocationsListParser::parse_line(line).is_none());
    }

    #[test]
    fn test_parse_skips_header_and_footer() {
        let entries = LocationsListParser::parse(SAMPLE).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Vertigo (1958)", "\"Friends\" (1994)", "Some Special (2001)"]
        );
    }

    #[test]
    fn test_parse_keeps_last_record_before_trailing_newline() {
        let content = "LOCATIONS LIST\n====\nA (1999)\t\tKyiv\nB (1999)\t\tLviv\n-----\n";
        let entries = LocationsListParser::parse(content).unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A (1999)", "B (1999)"]);
    }

    #[test]
    fn test_parse_without_trailing_newline_drops_two_footer_lines() {
        let content = "LOCATIONS LIST\r\n====\r\nA (1999)\t\tKyiv\r\n-----\r\nfooter";
        let entries = LocationsListParser::parse(content).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].location, "Kyiv");
    }

    #[test]
    fn test_parse_requires_header() {
        let err = LocationsListParser::parse("just some text\n").unwrap_err();
        assert!(matches!(err, FilmRouteError::Parse { .. }));
    }

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_latin1(b"Malm\xf6, Sweden"), "Malmö, Sweden");
    }

    #[test]
    fn test_resolve_drops_unknown_locations() {
        let cache = GeoCache::from_reader(
            r#"{"Lviv, Ukraine": [49.84, 24.03], "San Francisco, California, USA": null}"#
                .as_bytes(),
        )
        .unwrap();

        let entries = LocationsListParser::parse(SAMPLE).unwrap();
        let records = LocationsListSource::resolve(entries, &cache);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Some Special (2001)");
        assert_eq!(records[0].year, 2001);
        assert_eq!(records[0].coordinate, Coordinate::new(49.84, 24.03));
    }
}
