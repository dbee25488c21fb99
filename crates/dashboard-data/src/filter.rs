//! Record filters driven by the dashboard controls.

use std::collections::BTreeSet;

use dashboard_core::models::{ContentType, TitleRecord};

/// Active filter state for one session.
///
/// An empty `types` or `countries` set means "no restriction" for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    /// Inclusive `(from, to)` range on the year of `date_added`.
    pub year_added: Option<(i32, i32)>,
    /// Content-type labels to keep (e.g. `"Movie"`, `"TV Show"`).
    pub types: BTreeSet<String>,
    /// Countries to keep; a record passes if any of its countries matches.
    pub countries: BTreeSet<String>,
}

impl TitleFilter {
    /// A filter that keeps everything.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_year_range(mut self, from: i32, to: i32) -> Self {
        self.year_added = Some((from.min(to), from.max(to)));
        self
    }

    /// Restrict to these content types. Each value is classified the same
    /// way as a `type` cell, so `"tv show"` selects `"TV Show"`.
    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.types = types
            .into_iter()
            .map(|t| ContentType::parse(t.as_ref()).label().to_string())
            .collect();
        self
    }

    pub fn with_countries<I, S>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_unrestricted(&self) -> bool {
        self.year_added.is_none() && self.types.is_empty() && self.countries.is_empty()
    }

    /// `true` when `record` passes every active criterion.
    pub fn matches(&self, record: &TitleRecord) -> bool {
        if let Some((from, to)) = self.year_added {
            let year = record.year_added();
            if year < from || year > to {
                return false;
            }
        }

        if !self.types.is_empty() && !self.types.contains(record.content_type.label()) {
            return false;
        }

        if !self.countries.is_empty()
            && !record.countries.iter().any(|c| self.countries.contains(c))
        {
            return false;
        }

        true
    }

    /// Records passing the filter, in their original order.
    pub fn apply(&self, records: &[TitleRecord]) -> Vec<TitleRecord> {
        records
            .iter()
            .filter(|r| self.matches(r))
            .cloned()
            .collect()
    }

    /// Toggle `label` in the type set.
    ///
    /// Toggling from the unrestricted state keeps every other known type, so
    /// the first toggle hides `label` rather than showing only it.
    pub fn toggle_type(&mut self, label: &str, known: &[String]) {
        if self.types.is_empty() {
            self.types = known.iter().filter(|k| *k != label).cloned().collect();
        } else if !self.types.remove(label) {
            self.types.insert(label.to_string());
        }

        if known.iter().all(|k| self.types.contains(k)) {
            self.types.clear();
        }
    }
}

/// Smallest and largest year of `date_added` in `records`.
pub fn year_bounds(records: &[TitleRecord]) -> Option<(i32, i32)> {
    let years = records.iter().map(TitleRecord::year_added);
    let min = years.clone().min()?;
    let max = years.max()?;
    Some((min, max))
}

/// Distinct content-type labels present in `records`, sorted.
pub fn known_types(records: &[TitleRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.content_type.label().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::{ContentType, Duration};
    use dashboard_core::data_processors::split_list;

    fn make_record(kind: ContentType, country: &str, added: (i32, u32, u32)) -> TitleRecord {
        TitleRecord {
            show_id: String::new(),
            content_type: kind,
            title: "t".to_string(),
            director: String::new(),
            cast: String::new(),
            country: country.to_string(),
            countries: split_list(country),
            date_added: NaiveDate::from_ymd_opt(added.0, added.1, added.2).unwrap(),
            release_year: added.0,
            rating: "TV-MA".to_string(),
            duration: Duration::Minutes(90),
            listed_in: BTreeSet::new(),
            description: String::new(),
        }
    }

    fn sample() -> Vec<TitleRecord> {
        vec![
            make_record(ContentType::Movie, "India, United States", (2015, 3, 1)),
            make_record(ContentType::TvShow, "India", (2019, 7, 4)),
            make_record(ContentType::Movie, "Japan", (2021, 1, 9)),
            make_record(ContentType::TvShow, "", (2010, 12, 31)),
        ]
    }

    #[test]
    fn test_unrestricted_filter_keeps_all() {
        let records = sample();
        let filter = TitleFilter::all();
        assert!(filter.is_unrestricted());
        assert_eq!(filter.apply(&records), records);
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let filtered = TitleFilter::all().with_year_range(2015, 2019).apply(&sample());
        let years: Vec<i32> = filtered.iter().map(|r| r.year_added()).collect();
        assert_eq!(years, vec![2015, 2019]);
    }

    #[test]
    fn test_year_range_normalises_backwards_bounds() {
        let filter = TitleFilter::all().with_year_range(2019, 2015);
        assert_eq!(filter.year_added, Some((2015, 2019)));
    }

    #[test]
    fn test_type_filter() {
        let filtered = TitleFilter::all().with_types(["TV Show"]).apply(&sample());
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|r| r.is_tv_show()));
    }

    #[test]
    fn test_type_filter_ignores_case_and_spacing() {
        let filter = TitleFilter::all().with_types(["tv show", "MOVIE"]);
        assert_eq!(
            filter.types.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["Movie", "TV Show"]
        );

        let records = vec![make_record(ContentType::parse("tv show"), "India", (2019, 7, 4))];
        let filtered = TitleFilter::all().with_types(["TVShow"]).apply(&records);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_country_filter_matches_any_listed_country() {
        let filtered = TitleFilter::all()
            .with_countries(["United States"])
            .apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].country, "India, United States");
    }

    #[test]
    fn test_country_filter_excludes_records_without_country() {
        let filtered = TitleFilter::all()
            .with_countries(["India", "Japan"])
            .apply(&sample());
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|r| !r.countries.is_empty()));
    }

    #[test]
    fn test_combined_filters() {
        let filtered = TitleFilter::all()
            .with_year_range(2014, 2022)
            .with_types(["Movie"])
            .with_countries(["India"])
            .apply(&sample());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].year_added(), 2015);
    }

    #[test]
    fn test_toggle_type_from_unrestricted_hides_label() {
        let known = known_types(&sample());
        let mut filter = TitleFilter::all();

        filter.toggle_type("Movie", &known);
        assert_eq!(filter.types, BTreeSet::from(["TV Show".to_string()]));

        filter.toggle_type("Movie", &known);
        assert!(filter.types.is_empty(), "all types selected collapses to unrestricted");
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(year_bounds(&sample()), Some((2010, 2021)));
        assert_eq!(year_bounds(&[]), None);
    }

    #[test]
    fn test_known_types_sorted() {
        assert_eq!(known_types(&sample()), vec!["Movie", "TV Show"]);
    }
}
