//! CSV loading and cleaning for the titles dataset.
//!
//! Reads the catalogue export (`netflix_titles.csv`), resolves columns by
//! header name, and converts each row into a [`TitleRecord`]. Rows whose
//! `date_added` (or `release_year`) cannot be parsed are dropped and reported
//! as [`ParseWarning`]s; structural problems abort the load with a
//! [`LoadError`].

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use dashboard_core::data_processors::{split_list, DateParser, DurationParser};
use dashboard_core::error::{DropReason, LoadError, ParseWarning, Result};
use dashboard_core::models::{ContentType, TitleRecord};
use tracing::{debug, info, warn};

/// Columns without which the file cannot be cleaned or aggregated.
pub const REQUIRED_COLUMNS: &[&str] = &["type", "date_added", "release_year"];

// ── Public types ──────────────────────────────────────────────────────────────

/// Knobs for [`load_titles`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Drop rows that are byte-for-byte repeats of an earlier row.
    pub dedupe: bool,
}

/// Output of a successful load.
///
/// `rows_read == records.len() + dropped_rows + duplicates_removed` always
/// holds.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDataset {
    /// File the dataset was read from.
    pub path: PathBuf,
    /// The clean dataset, in file order.
    pub records: Vec<TitleRecord>,
    /// Data rows read (excluding the header).
    pub rows_read: u64,
    /// Rows excluded because a date or year cell could not be parsed.
    pub dropped_rows: u64,
    /// Rows excluded as exact duplicates (only when `dedupe` is set).
    pub duplicates_removed: u64,
    /// One entry per dropped row.
    pub warnings: Vec<ParseWarning>,
}

impl LoadedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and clean the titles CSV at `path`.
///
/// Fails with [`LoadError`] when the file is missing, unreadable, not valid
/// CSV or lacks one of [`REQUIRED_COLUMNS`]. Loading is deterministic: the
/// same file always yields the same dataset and counts.
pub fn load_titles(path: &Path, options: &LoadOptions) -> Result<LoadedDataset> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let file = File::open(path).map_err(|source| LoadError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = read_titles(file, path, options)?;

    info!(
        "Loaded {} titles from {} ({} rows read, {} dropped, {} duplicates)",
        dataset.records.len(),
        path.display(),
        dataset.rows_read,
        dataset.dropped_rows,
        dataset.duplicates_removed,
    );

    Ok(dataset)
}

/// Clean titles from any reader. `source` is only used for error messages.
pub fn read_titles<R: Read>(
    reader: R,
    source: &Path,
    options: &LoadOptions,
) -> Result<LoadedDataset> {
    let csv_error = |e: csv::Error| LoadError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let columns = ColumnMap::from_headers(&headers);

    let missing = columns.missing(REQUIRED_COLUMNS);
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns {
            path: source.to_path_buf(),
            columns: missing,
        });
    }

    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut seen_rows: HashSet<String> = HashSet::new();
    let mut rows_read = 0u64;
    let mut duplicates_removed = 0u64;

    for (idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(csv_error)?;
        rows_read += 1;

        // Header is line 1; fall back to the row index if the reader did not
        // track a position.
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);

        if options.dedupe {
            let key = record.iter().collect::<Vec<_>>().join("\u{1f}");
            if !seen_rows.insert(key) {
                duplicates_removed += 1;
                continue;
            }
        }

        match clean_row(&record, &columns, line) {
            Ok(title) => records.push(title),
            Err(warning) => {
                debug!("Dropping row: {}", warning);
                warnings.push(warning);
            }
        }
    }

    let dropped_rows = warnings.len() as u64;
    if dropped_rows > 0 {
        warn!(
            "{} rows have invalid or missing 'date_added'/'release_year' values and were skipped",
            dropped_rows
        );
    }

    Ok(LoadedDataset {
        path: source.to_path_buf(),
        records,
        rows_read,
        dropped_rows,
        duplicates_removed,
        warnings,
    })
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Header name → column index, keyed by trimmed lowercase name.
struct ColumnMap {
    index: HashMap<String, usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let index = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let name = name.trim_start_matches('\u{feff}').trim().to_lowercase();
                (name, i)
            })
            .collect();
        Self { index }
    }

    fn missing(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.index.contains_key(**name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Cell text for `column`, or `""` when the column or the cell is absent.
    fn get<'r>(&self, record: &'r csv::StringRecord, column: &str) -> &'r str {
        self.index
            .get(column)
            .and_then(|&i| record.get(i))
            .unwrap_or("")
    }
}

/// Convert one CSV row into a [`TitleRecord`], or explain why it was dropped.
fn clean_row(
    record: &csv::StringRecord,
    columns: &ColumnMap,
    line: u64,
) -> std::result::Result<TitleRecord, ParseWarning> {
    let raw_date = columns.get(record, "date_added");
    let date_added = match DateParser::parse(raw_date) {
        Some(date) => date,
        None => {
            let reason = if raw_date.trim().is_empty() {
                DropReason::MissingDate
            } else {
                DropReason::InvalidDate
            };
            return Err(ParseWarning {
                line,
                field: "date_added",
                value: raw_date.to_string(),
                reason,
            });
        }
    };

    let raw_year = columns.get(record, "release_year");
    let Some(release_year) = parse_year(raw_year) else {
        return Err(ParseWarning {
            line,
            field: "release_year",
            value: raw_year.to_string(),
            reason: DropReason::InvalidReleaseYear,
        });
    };

    let text = |column: &str| columns.get(record, column).trim().to_string();
    let country = text("country");

    Ok(TitleRecord {
        show_id: text("show_id"),
        content_type: ContentType::parse(columns.get(record, "type")),
        title: text("title"),
        director: text("director"),
        cast: text("cast"),
        countries: split_list(&country),
        country,
        date_added,
        release_year,
        rating: text("rating"),
        duration: DurationParser::parse(columns.get(record, "duration")),
        listed_in: split_list(columns.get(record, "listed_in")),
        description: text("description"),
    })
}

/// Accepts `"2019"` and spreadsheet-style `"2019.0"`.
fn parse_year(raw: &str) -> Option<i32> {
    let trimmed = raw.trim();
    if let Ok(year) = trimmed.parse::<i32>() {
        return Some(year);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value.fract() == 0.0 && value.abs() < f64::from(i32::MAX) {
        Some(value as i32)
    } else {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::Duration;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description";

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    fn load(lines: &[&str]) -> Result<LoadedDataset> {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "titles.csv", lines);
        load_titles(&path, &LoadOptions::default())
    }

    // ── load_titles ───────────────────────────────────────────────────────────

    #[test]
    fn test_load_parses_full_row() {
        let dataset = load(&[
            HEADER,
            r#"s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,"September 25, 2021",2020,PG-13,90 min,Documentaries,"As her father nears the end of his life, filmmaker Kirsten Johnson stages his death.""#,
        ])
        .unwrap();

        assert_eq!(dataset.len(), 1);
        let title = &dataset.records[0];
        assert_eq!(title.show_id, "s1");
        assert_eq!(title.content_type, ContentType::Movie);
        assert_eq!(title.title, "Dick Johnson Is Dead");
        assert_eq!(title.director, "Kirsten Johnson");
        assert_eq!(title.cast, "");
        assert_eq!(title.date_added, NaiveDate::from_ymd_opt(2021, 9, 25).unwrap());
        assert_eq!(title.release_year, 2020);
        assert_eq!(title.rating, "PG-13");
        assert_eq!(title.duration, Duration::Minutes(90));
        assert!(title.listed_in.contains("Documentaries"));
        assert!(title.description.starts_with("As her father"));
    }

    #[test]
    fn test_load_drops_empty_date_added() {
        let dataset = load(&[
            HEADER,
            r#"s1,Movie,A,,,India,"January 1, 2020",2019,TV-MA,100 min,Dramas,x"#,
            r#"s2,TV Show,B,,,India,,2018,TV-14,2 Seasons,Dramas,y"#,
            r#"s3,Movie,C,,,USA,"March 3, 2021",2021,R,95 min,Comedies,z"#,
        ])
        .unwrap();

        assert_eq!(dataset.rows_read, 3);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dropped_rows, 1);
        assert_eq!(dataset.warnings[0].reason, DropReason::MissingDate);
        assert_eq!(dataset.warnings[0].line, 3);
    }

    #[test]
    fn test_load_drops_unparseable_date() {
        let dataset = load(&[
            HEADER,
            r#"s1,Movie,A,,,India,someday soon,2019,TV-MA,100 min,Dramas,x"#,
        ])
        .unwrap();

        assert!(dataset.is_empty());
        assert_eq!(dataset.dropped_rows, 1);
        assert_eq!(dataset.warnings[0].reason, DropReason::InvalidDate);
        assert_eq!(dataset.warnings[0].value, "someday soon");
    }

    #[test]
    fn test_load_drops_bad_release_year() {
        let dataset = load(&[
            HEADER,
            r#"s1,Movie,A,,,India,"May 1, 2020",unknown,TV-MA,100 min,Dramas,x"#,
            r#"s2,Movie,B,,,India,"May 2, 2020",2019.0,TV-MA,100 min,Dramas,x"#,
        ])
        .unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].release_year, 2019);
        assert_eq!(dataset.warnings[0].reason, DropReason::InvalidReleaseYear);
    }

    #[test]
    fn test_load_missing_type_column_is_error() {
        let result = load(&[
            "title,date_added,release_year",
            r#"A,"May 1, 2020",2019"#,
        ]);

        match result {
            Err(LoadError::MissingColumns { columns, .. }) => {
                assert_eq!(columns, vec!["type".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_load_missing_optional_columns_tolerated() {
        let dataset = load(&[
            "type,date_added,release_year",
            r#"TV Show,"May 1, 2020",2019"#,
        ])
        .unwrap();

        let title = &dataset.records[0];
        assert_eq!(title.content_type, ContentType::TvShow);
        assert_eq!(title.title, "");
        assert!(title.countries.is_empty());
        assert!(title.listed_in.is_empty());
        assert_eq!(title.rating, "");
        assert_eq!(title.duration, Duration::Unknown(String::new()));
    }

    #[test]
    fn test_load_header_names_are_case_insensitive() {
        let dataset = load(&[
            "\u{feff}Type, Date_Added ,RELEASE_YEAR",
            r#"Movie,"May 1, 2020",2019"#,
        ])
        .unwrap();
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_load_short_rows_are_padded() {
        let dataset = load(&[HEADER, r#"s1,Movie,A,,,India,"May 1, 2020",2019"#]).unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].rating, "");
        assert!(dataset.records[0].listed_in.is_empty());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_titles(
            Path::new("/tmp/does-not-exist-netflix-test-xyz.csv"),
            &LoadOptions::default(),
        );
        assert!(matches!(result, Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_utf8_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("titles.csv");
        let mut bytes = b"type,date_added,release_year\nMovie,".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        std::fs::write(&path, bytes).unwrap();

        let result = load_titles(&path, &LoadOptions::default());
        assert!(matches!(result, Err(LoadError::Csv { .. })));
    }

    #[test]
    fn test_load_empty_file_has_no_rows() {
        let dataset = load(&[HEADER]).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.rows_read, 0);
        assert_eq!(dataset.dropped_rows, 0);
    }

    #[test]
    fn test_load_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "titles.csv",
            &[
                HEADER,
                r#"s1,Movie,A,,,India,"January 1, 2020",2019,TV-MA,100 min,Dramas,x"#,
                r#"s2,TV Show,B,,,India,,2018,TV-14,2 Seasons,Dramas,y"#,
            ],
        );

        let first = load_titles(&path, &LoadOptions::default()).unwrap();
        let second = load_titles(&path, &LoadOptions::default()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_load_dedupe_counts_duplicates_separately() {
        let row = r#"s1,Movie,A,,,India,"January 1, 2020",2019,TV-MA,100 min,Dramas,x"#;
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "titles.csv", &[HEADER, row, row]);

        let kept = load_titles(&path, &LoadOptions::default()).unwrap();
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.duplicates_removed, 0);

        let deduped = load_titles(&path, &LoadOptions { dedupe: true }).unwrap();
        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped.duplicates_removed, 1);
        assert_eq!(
            deduped.rows_read,
            deduped.len() as u64 + deduped.dropped_rows + deduped.duplicates_removed
        );
    }

    // ── parse_year ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_year_variants() {
        assert_eq!(parse_year("2019"), Some(2019));
        assert_eq!(parse_year(" 2019 "), Some(2019));
        assert_eq!(parse_year("2019.0"), Some(2019));
        assert_eq!(parse_year("2019.5"), None);
        assert_eq!(parse_year(""), None);
    }
}
