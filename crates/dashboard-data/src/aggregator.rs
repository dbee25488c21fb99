//! Summary tables over the clean dataset.
//!
//! Every table is an independent pure function of `&[TitleRecord]`; none
//! reads another table's output. Counts are exact.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use dashboard_core::models::{TitleRecord, TrendKey, YearMonth};
use serde::Serialize;

/// Number of bins used for the movie running-time histogram.
pub const DEFAULT_HISTOGRAM_BINS: u32 = 30;

// ── SummaryTable ──────────────────────────────────────────────────────────────

/// One `(key, count)` pair of a summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow<K> {
    pub key: K,
    pub count: u64,
}

/// Ordered, read-only sequence of `(key, count)` pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SummaryTable<K> {
    rows: Vec<SummaryRow<K>>,
}

impl<K> Default for SummaryTable<K> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<K> SummaryTable<K> {
    fn from_rows(rows: Vec<SummaryRow<K>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SummaryRow<K>] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &SummaryRow<K>> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all bucket counts.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Largest single bucket count, `0` for an empty table.
    pub fn max_count(&self) -> u64 {
        self.rows.iter().map(|r| r.count).max().unwrap_or(0)
    }
}

impl<K: PartialEq> SummaryTable<K> {
    /// Count for `key`, or `0` when the key has no bucket.
    pub fn count_of<Q>(&self, key: &Q) -> u64
    where
        K: PartialEq<Q>,
        Q: ?Sized,
    {
        self.rows
            .iter()
            .find(|r| r.key == *key)
            .map(|r| r.count)
            .unwrap_or(0)
    }
}

impl<K: Clone> SummaryTable<K> {
    /// The first `n` rows, keeping the table's order.
    pub fn top_n(&self, n: usize) -> SummaryTable<K> {
        Self::from_rows(self.rows.iter().take(n).cloned().collect())
    }
}

// ── Keys ──────────────────────────────────────────────────────────────────────

/// Inclusive running-time range of one histogram bin, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct MinuteBin {
    pub lower: u32,
    pub upper: u32,
}

impl std::fmt::Display for MinuteBin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{} min", self.lower, self.upper)
    }
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total_titles: u64,
    pub movies: u64,
    pub tv_shows: u64,
    /// Distinct countries listed across all records.
    pub countries: u64,
}

// ── TitleAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that groups title records into summary tables.
pub struct TitleAggregator;

impl TitleAggregator {
    /// Count per `(release_year, type)`, years ascending then type label.
    pub fn content_trend(records: &[TitleRecord]) -> SummaryTable<TrendKey> {
        let mut map: BTreeMap<TrendKey, u64> = BTreeMap::new();
        for record in records {
            let key = TrendKey {
                release_year: record.release_year,
                content_type: record.content_type.label().to_string(),
            };
            *map.entry(key).or_default() += 1;
        }
        in_key_order(map)
    }

    /// Count per listed country; a record counts once for each of its
    /// countries. Records without a country contribute nothing.
    pub fn by_country(records: &[TitleRecord]) -> SummaryTable<String> {
        Self::fan_out(records, |r| r.countries.iter())
    }

    /// Count per genre from `listed_in`, same fan-out rule as countries.
    pub fn by_genre(records: &[TitleRecord]) -> SummaryTable<String> {
        Self::fan_out(records, |r| r.listed_in.iter())
    }

    /// Count per rating; blank ratings land in `"Not Specified"`.
    pub fn by_rating(records: &[TitleRecord]) -> SummaryTable<String> {
        let mut map: BTreeMap<String, u64> = BTreeMap::new();
        for record in records {
            *map.entry(record.rating_label().to_string()).or_default() += 1;
        }
        ranked(map)
    }

    /// Count per content type; blank types land in `"Not Specified"`.
    pub fn by_type(records: &[TitleRecord]) -> SummaryTable<String> {
        let mut map: BTreeMap<String, u64> = BTreeMap::new();
        for record in records {
            *map.entry(record.content_type.label().to_string())
                .or_default() += 1;
        }
        ranked(map)
    }

    /// Count per `(year, month)` of `date_added`, chronological.
    pub fn by_month(records: &[TitleRecord]) -> SummaryTable<YearMonth> {
        let mut map: BTreeMap<YearMonth, u64> = BTreeMap::new();
        for record in records {
            let key = YearMonth {
                year: record.year_added(),
                month: record.month_added(),
            };
            *map.entry(key).or_default() += 1;
        }
        in_key_order(map)
    }

    /// Histogram of movie running times in `bins` equal-width buckets spanning
    /// the observed minimum to maximum. Empty buckets are kept so the chart
    /// has no gaps; movies without a minutes duration are skipped.
    pub fn movie_runtime_histogram(records: &[TitleRecord], bins: u32) -> SummaryTable<MinuteBin> {
        let minutes: Vec<u32> = records
            .iter()
            .filter(|r| r.is_movie())
            .filter_map(|r| r.duration.minutes())
            .collect();

        let (Some(&min), Some(&max)) = (minutes.iter().min(), minutes.iter().max()) else {
            return SummaryTable::default();
        };

        // Bin arithmetic runs in u64 so extreme minute values cannot overflow.
        let bins = u64::from(bins.max(1));
        let span = u64::from(max - min) + 1;
        let width = span.div_ceil(bins).max(1);
        let bin_count = span.div_ceil(width);

        let mut counts = vec![0u64; bin_count as usize];
        for m in minutes {
            counts[(u64::from(m - min) / width) as usize] += 1;
        }

        let rows = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| {
                let lower = u64::from(min) + i as u64 * width;
                let upper = (lower + width - 1).min(u64::from(u32::MAX));
                SummaryRow {
                    key: MinuteBin {
                        lower: lower as u32,
                        upper: upper as u32,
                    },
                    count,
                }
            })
            .collect();
        SummaryTable::from_rows(rows)
    }

    /// Count of TV shows per season count, most common first.
    pub fn season_counts(records: &[TitleRecord]) -> SummaryTable<u32> {
        let mut map: BTreeMap<u32, u64> = BTreeMap::new();
        for seasons in records
            .iter()
            .filter(|r| r.is_tv_show())
            .filter_map(|r| r.duration.seasons())
        {
            *map.entry(seasons).or_default() += 1;
        }
        ranked(map)
    }

    /// Headline KPIs.
    pub fn overview(records: &[TitleRecord]) -> Overview {
        let distinct_countries: std::collections::BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.countries.iter().map(String::as_str))
            .collect();

        Overview {
            total_titles: records.len() as u64,
            movies: records.iter().filter(|r| r.is_movie()).count() as u64,
            tv_shows: records.iter().filter(|r| r.is_tv_show()).count() as u64,
            countries: distinct_countries.len() as u64,
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Shared driver for multi-valued fields.
    fn fan_out<'a, I>(
        records: &'a [TitleRecord],
        values: impl Fn(&'a TitleRecord) -> I,
    ) -> SummaryTable<String>
    where
        I: Iterator<Item = &'a String>,
    {
        let mut map: BTreeMap<String, u64> = BTreeMap::new();
        for record in records {
            for value in values(record) {
                *map.entry(value.clone()).or_default() += 1;
            }
        }
        ranked(map)
    }
}

/// Key order used to break count ties in ranked tables.
trait TieOrder {
    fn tie_cmp(&self, other: &Self) -> Ordering;
}

impl TieOrder for u32 {
    fn tie_cmp(&self, other: &Self) -> Ordering {
        self.cmp(other)
    }
}

/// Case-insensitive, with byte order deciding between labels that differ
/// only in case.
impl TieOrder for String {
    fn tie_cmp(&self, other: &Self) -> Ordering {
        self.to_lowercase()
            .cmp(&other.to_lowercase())
            .then_with(|| self.cmp(other))
    }
}

/// Rows ordered by count descending, ties by [`TieOrder`].
fn ranked<K: TieOrder>(map: BTreeMap<K, u64>) -> SummaryTable<K> {
    let mut rows: Vec<SummaryRow<K>> = map
        .into_iter()
        .map(|(key, count)| SummaryRow { key, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.tie_cmp(&b.key)));
    SummaryTable::from_rows(rows)
}

fn in_key_order<K>(map: BTreeMap<K, u64>) -> SummaryTable<K> {
    SummaryTable::from_rows(
        map.into_iter()
            .map(|(key, count)| SummaryRow { key, count })
            .collect(),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────
