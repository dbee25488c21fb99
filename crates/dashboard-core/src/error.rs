use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while loading the titles dataset.
///
/// Any of these aborts the load; no partial dataset is ever returned.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The dataset file does not exist.
    #[error("Dataset not found: {0}")]
    NotFound(PathBuf),

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not structurally valid delimited text.
    #[error("Malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The header row lacks one or more required columns.
    #[error("Missing required column(s) in {path}: {}", columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, LoadError>;

// ── ParseWarning ──────────────────────────────────────────────────────────────

/// Why a row was excluded from the clean dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingDate,
    InvalidDate,
    InvalidReleaseYear,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DropReason::MissingDate => "missing date_added",
            DropReason::InvalidDate => "unparseable date_added",
            DropReason::InvalidReleaseYear => "unparseable release_year",
        };
        f.write_str(text)
    }
}

/// Non-fatal per-row problem: the row is dropped and loading continues.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ParseWarning {
    /// 1-based line number in the source file (header is line 1).
    pub line: u64,
    /// Column whose value was rejected.
    pub field: &'static str,
    /// The offending raw value.
    pub value: String,
    pub reason: DropReason,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} ({} = {:?})",
            self.line, self.reason, self.field, self.value
        )
    }
}
