use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Bucket label used when `type` or `rating` is empty.
pub const NOT_SPECIFIED: &str = "Not Specified";

/// Kind of catalogue entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    #[serde(rename = "TV Show")]
    TvShow,
    /// The `type` cell was empty.
    #[serde(rename = "Not Specified")]
    NotSpecified,
    /// Any other non-empty value, kept verbatim.
    Other(String),
}

impl ContentType {
    /// Classify a raw `type` cell.
    ///
    /// Matching ignores case and inner whitespace, so `"TV Show"`, `"TVShow"`
    /// and `"tv show"` all map to [`ContentType::TvShow`].
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ContentType::NotSpecified;
        }
        let squashed: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        match squashed.as_str() {
            "movie" => ContentType::Movie,
            "tvshow" => ContentType::TvShow,
            _ => ContentType::Other(trimmed.to_string()),
        }
    }

    /// Display label, also used as the grouping key in summary tables.
    pub fn label(&self) -> &str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
            ContentType::NotSpecified => NOT_SPECIFIED,
            ContentType::Other(s) => s,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parsed form of the `duration` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Duration {
    /// Running time of a movie, e.g. `"90 min"`.
    Minutes(u32),
    /// Season count of a show, e.g. `"3 Seasons"`.
    Seasons(u32),
    /// Empty or unrecognised text.
    Unknown(String),
}

impl Duration {
    pub fn minutes(&self) -> Option<u32> {
        match self {
            Duration::Minutes(m) => Some(*m),
            _ => None,
        }
    }

    pub fn seasons(&self) -> Option<u32> {
        match self {
            Duration::Seasons(s) => Some(*s),
            _ => None,
        }
    }
}

/// One row of the clean dataset.
///
/// Every record here has a valid `date_added`; rows without one never make it
/// out of the loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleRecord {
    #[serde(default)]
    pub show_id: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub cast: String,
    /// Raw `country` cell as it appeared in the file.
    #[serde(default)]
    pub country: String,
    /// Distinct, trimmed country names parsed from `country`.
    #[serde(default)]
    pub countries: BTreeSet<String>,
    pub date_added: NaiveDate,
    pub release_year: i32,
    /// Content rating code; empty when the cell was blank.
    #[serde(default)]
    pub rating: String,
    pub duration: Duration,
    /// Distinct, trimmed genre labels parsed from `listed_in`.
    #[serde(default)]
    pub listed_in: BTreeSet<String>,
    #[serde(default)]
    pub description: String,
}

impl TitleRecord {
    pub fn year_added(&self) -> i32 {
        self.date_added.year()
    }

    pub fn month_added(&self) -> u32 {
        self.date_added.month()
    }

    /// Rating grouping key: the rating itself, or [`NOT_SPECIFIED`] when blank.
    pub fn rating_label(&self) -> &str {
        if self.rating.trim().is_empty() {
            NOT_SPECIFIED
        } else {
            self.rating.trim()
        }
    }

    pub fn is_movie(&self) -> bool {
        self.content_type == ContentType::Movie
    }

    pub fn is_tv_show(&self) -> bool {
        self.content_type == ContentType::TvShow
    }
}

/// A `(year, month)` key for the time-based table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A `(release_year, type)` key for the content-trend table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrendKey {
    pub release_year: i32,
    pub content_type: String,
}

impl fmt::Display for TrendKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.release_year, self.content_type)
    }
}
