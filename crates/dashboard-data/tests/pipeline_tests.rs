//! End-to-end checks over the load → filter → summarise pipeline.

use std::io::Write;
use std::path::{Path, PathBuf};

use dashboard_data::analysis::{analyze_dataset, summarize};
use dashboard_data::core::error::LoadError;
use dashboard_data::core::models::NOT_SPECIFIED;
use dashboard_data::filter::TitleFilter;
use dashboard_data::reader::{load_titles, LoadOptions};
use tempfile::TempDir;

const HEADER: &str = "show_id,type,title,director,cast,country,date_added,release_year,rating,duration,listed_in,description";

fn write_file(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("netflix_titles.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn write_rows(dir: &Path, rows: &[&str]) -> PathBuf {
    let mut contents = String::from(HEADER);
    contents.push('\n');
    for row in rows {
        contents.push_str(row);
        contents.push('\n');
    }
    write_file(dir, &contents)
}

fn catalogue() -> Vec<&'static str> {
    vec![
        r#"s1,Movie,Dick Johnson Is Dead,Kirsten Johnson,,United States,"September 25, 2021",2020,PG-13,90 min,Documentaries,"As her father nears the end of his life...""#,
        r#"s2,TV Show,Blood & Water,,Ama Qamata,South Africa,"September 24, 2021",2021,TV-MA,2 Seasons,"International TV Shows, TV Dramas, TV Mysteries","After crossing paths at a party...""#,
        r#"s3,TV Show,Ganglands,Julien Leclercq,,,"September 24, 2021",2021,TV-MA,1 Season,"Crime TV Shows, International TV Shows","To protect his family...""#,
        r#"s4,Movie,Sankofa,Haile Gerima,,"United States, Ghana, Burkina Faso, United Kingdom, Germany, Ethiopia","September 24, 2021",1993,TV-MA,125 min,"Dramas, Independent Movies, International Movies","On a photo shoot in Ghana...""#,
        r#"s5,Movie,The Starling,Theodore Melfi,,United States,,2021,PG-13,104 min,"Comedies, Dramas","A woman adjusting to life...""#,
        r#"s6,TV Show,Kota Factory,,,India,"September 24, 2021",2021,,2 Seasons,"International TV Shows, Romantic TV Shows","In a city of coaching centers...""#,
        r#"s7,Movie,Jeans,S. Shankar,,India,"not a date",1998,TV-14,166 min,"Comedies, International Movies","When the father of the man...""#,
        r#"s8,Movie,Grown Ups,Dennis Dugan,,United States,"December 1, 2019",2010,PG-13,103 min,Comedies,"Mourning the loss...""#,
    ]
}

#[test]
fn every_clean_record_has_a_date_and_counts_balance() {
    let tmp = TempDir::new().unwrap();
    let path = write_rows(tmp.path(), &catalogue());

    let dataset = load_titles(&path, &LoadOptions::default()).unwrap();

    assert_eq!(dataset.rows_read, 8);
    assert_eq!(dataset.dropped_rows, 2);
    assert_eq!(dataset.records.len() as u64 + dataset.dropped_rows, dataset.rows_read);
    assert_eq!(dataset.warnings.len(), 2);
}

#[test]
fn loading_twice_is_identical() {
    let tmp = TempDir::new().unwrap();
    let path = write_rows(tmp.path(), &catalogue());

    let first = load_titles(&path, &LoadOptions::default()).unwrap();
    let second = load_titles(&path, &LoadOptions::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn rating_table_sums_to_dataset_size() {
    let tmp = TempDir::new().unwrap();
    let path = write_rows(tmp.path(), &catalogue());
    let dataset = load_titles(&path, &LoadOptions::default()).unwrap();

    let summary = summarize(&dataset.records);

    assert_eq!(summary.by_rating.total(), dataset.records.len() as u64);
    assert_eq!(summary.by_rating.count_of(NOT_SPECIFIED), 1);
}

#[test]
fn fan_out_totals_equal_listed_entries() {
    let tmp = TempDir::new().unwrap();
    let path = write_rows(tmp.path(), &catalogue());
    let dataset = load_titles(&path, &LoadOptions::default()).unwrap();
    let summary = summarize(&dataset.records);

    let countries: usize = dataset.records.iter().map(|r| r.countries.len()).sum();
    let genres: usize = dataset.records.iter().map(|r| r.listed_in.len()).sum();

    assert_eq!(summary.by_country.total(), countries as u64);
    assert_eq!(summary.by_genre.total(), genres as u64);
    assert_eq!(summary.by_country.count_of("United States"), 3);
    assert_eq!(summary.by_genre.count_of("International TV Shows"), 3);
}

#[test]
fn three_rows_with_one_missing_date() {
    let tmp = TempDir::new().unwrap();
    let path = write_rows(
        tmp.path(),
        &[
            r#"s1,Movie,A,,,India,"January 1, 2020",2019,PG,90 min,Dramas,"#,
            r#"s2,Movie,B,,,India,,2019,PG,90 min,Dramas,"#,
            r#"s3,TV Show,C,,,India,"February 2, 2021",2020,PG,1 Season,Dramas,"#,
        ],
    );

    let summary = analyze_dataset(&path, &LoadOptions::default(), &TitleFilter::all()).unwrap();

    assert_eq!(summary.diagnostics.clean_rows, 2);
    assert_eq!(summary.diagnostics.dropped_rows, 1);
}

#[test]
fn country_split_counts_each_listed_country() {
    let tmp = TempDir::new().unwrap();
    let path = write_rows(
        tmp.path(),
        &[
            r#"s1,Movie,A,,,"India, USA","January 1, 2020",2019,PG,90 min,Dramas,"#,
            r#"s2,Movie,B,,,India,"January 2, 2020",2019,PG,90 min,Dramas,"#,
        ],
    );

    let summary = analyze_dataset(&path, &LoadOptions::default(), &TitleFilter::all()).unwrap();

    assert_eq!(summary.by_country.count_of("India"), 2);
    assert_eq!(summary.by_country.count_of("USA"), 1);
}

#[test]
fn missing_type_column_is_a_load_error() {
    let tmp = TempDir::new().unwrap();
    let path = write_file(
        tmp.path(),
        "show_id,title,date_added,release_year\ns1,A,\"January 1, 2020\",2019\n",
    );

    let result = analyze_dataset(&path, &LoadOptions::default(), &TitleFilter::all());

    match result {
        Err(LoadError::MissingColumns { columns, .. }) => assert_eq!(columns, vec!["type"]),
        other => panic!("expected MissingColumns, got {:?}", other.map(|s| s.overview)),
    }
}

#[test]
fn filters_narrow_every_table() {
    let tmp = TempDir::new().unwrap();
    let path = write_rows(tmp.path(), &catalogue());
    let filter = TitleFilter::all()
        .with_types(["Movie"])
        .with_countries(["United States"]);

    let summary = analyze_dataset(&path, &LoadOptions::default(), &filter).unwrap();

    assert_eq!(summary.overview.total_titles, 3);
    assert_eq!(summary.overview.tv_shows, 0);
    assert_eq!(summary.by_type.total(), 3);
    assert!(summary.season_counts.is_empty());
}
