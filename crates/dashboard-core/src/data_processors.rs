use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::trace;

use crate::models::Duration;

// ── DateParser ────────────────────────────────────────────────────────────────

/// Parses the `date_added` column.
pub struct DateParser;

impl DateParser {
    /// Formats tried in order. The catalogue export writes `"September 25, 2021"`;
    /// the others cover re-saved copies of the file.
    pub const FORMATS: &'static [&'static str] =
        &["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d", "%m/%d/%Y", "%d-%b-%y"];

    /// Parse a raw cell. Returns `None` for empty or unrecognised text.
    pub fn parse(raw: &str) -> Option<NaiveDate> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        for fmt in Self::FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
                return Some(date);
            }
        }

        trace!("DateParser: no format matched \"{}\"", trimmed);
        None
    }
}

// ── DurationParser ────────────────────────────────────────────────────────────

fn duration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)^\s*(\d+)\s*(min|mins|minutes?|seasons?)\s*$").expect("regex is valid")
    })
}

/// Parses the `duration` column into minutes or a season count.
pub struct DurationParser;

impl DurationParser {
    /// `"90 min"` → `Minutes(90)`, `"1 Season"` / `"3 Seasons"` → `Seasons(n)`,
    /// anything else → `Unknown(raw)`.
    pub fn parse(raw: &str) -> Duration {
        let Some(caps) = duration_regex().captures(raw) else {
            return Duration::Unknown(raw.trim().to_string());
        };

        let Ok(value) = caps[1].parse::<u32>() else {
            return Duration::Unknown(raw.trim().to_string());
        };

        if caps[2].to_lowercase().starts_with("season") {
            Duration::Seasons(value)
        } else {
            Duration::Minutes(value)
        }
    }
}

// ── ListSplitter ──────────────────────────────────────────────────────────────

/// Split a comma-separated multi-valued cell (`country`, `listed_in`) into a
/// set of trimmed, non-empty values.
pub fn split_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── DateParser ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_long_month_format() {
        assert_eq!(
            DateParser::parse("September 25, 2021"),
            NaiveDate::from_ymd_opt(2021, 9, 25)
        );
    }

    #[test]
    fn test_parse_leading_whitespace() {
        // The export pads some cells with a leading space.
        assert_eq!(
            DateParser::parse(" August 4, 2017"),
            NaiveDate::from_ymd_opt(2017, 8, 4)
        );
    }

    #[test]
    fn test_parse_alternate_formats() {
        let expected = NaiveDate::from_ymd_opt(2020, 1, 15);
        assert_eq!(DateParser::parse("2020-01-15"), expected);
        assert_eq!(DateParser::parse("01/15/2020"), expected);
        assert_eq!(DateParser::parse("Jan 15, 2020"), expected);
        assert_eq!(DateParser::parse("15-Jan-20"), expected);
    }

    #[test]
    fn test_parse_empty_and_garbage() {
        assert!(DateParser::parse("").is_none());
        assert!(DateParser::parse("   ").is_none());
        assert!(DateParser::parse("not a date").is_none());
        assert!(DateParser::parse("February 30, 2020").is_none());
    }

    // ── DurationParser ────────────────────────────────────────────────────────

    #[test]
    fn test_duration_minutes() {
        assert_eq!(DurationParser::parse("90 min"), Duration::Minutes(90));
        assert_eq!(DurationParser::parse(" 125 min "), Duration::Minutes(125));
    }

    #[test]
    fn test_duration_seasons() {
        assert_eq!(DurationParser::parse("1 Season"), Duration::Seasons(1));
        assert_eq!(DurationParser::parse("3 Seasons"), Duration::Seasons(3));
    }

    #[test]
    fn test_duration_unknown() {
        assert_eq!(
            DurationParser::parse(""),
            Duration::Unknown(String::new())
        );
        assert_eq!(
            DurationParser::parse("feature length"),
            Duration::Unknown("feature length".to_string())
        );
    }

    // ── split_list ────────────────────────────────────────────────────────────

    #[test]
    fn test_split_list_trims_and_dedups() {
        let set = split_list("India, United States,India ,, ");
        let values: Vec<&str> = set.iter().map(String::as_str).collect();
        assert_eq!(values, vec!["India", "United States"]);
    }

    #[test]
    fn test_split_list_empty() {
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }
}
