//! Tests for reshaping and combining indicator tables.

use std::fs;

use polars::prelude::*;
use tempfile::TempDir;
use wdi_ingest::read_indicator_csv;
use wdi_model::{AnalysisConfig, COUNTRY_NAME, POPULATION_GROWTH, YEARS, YearRange};
use wdi_transform::{
    TransformError, axis_years, build_chart_tables, merging, reshape_indicator,
    select_countries, slicing_and_rename,
};

const PREAMBLE: &str = "\"Data Source\",\"World Development Indicators\",\n\"\",\n\"Last Updated Date\",\"2023-12-18\",\n\"\",\n";
const HEADER: &str = "\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",\"2012\",\"2013\",\"2014\",\"2015\",\"2016\",\"2017\",\"2018\",\"2019\",\"2020\",\n";

fn row(country: &str, indicator: &str, values: &[f64]) -> String {
    let cells: Vec<String> = values.iter().map(|v| format!("\"{v}\"")).collect();
    format!(
        "\"{country}\",\"XXX\",\"{indicator}\",\"CODE\",{},\n",
        cells.join(",")
    )
}

fn load(rows: &[String]) -> DataFrame {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wdi.csv");
    let mut contents = format!("{PREAMBLE}{HEADER}");
    for line in rows {
        contents.push_str(line);
    }
    fs::write(&path, contents).unwrap();
    read_indicator_csv(&path, 4).unwrap()
}

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn ramp(start: f64) -> Vec<f64> {
    (0..9).map(|offset| start + f64::from(offset)).collect()
}

#[test]
fn single_row_file_transposes_into_year_rows() {
    let raw = load(&[row("Testland", POPULATION_GROWTH, &ramp(1.0))]);

    let views = reshape_indicator(
        &raw,
        POPULATION_GROWTH,
        &names(&["Testland"]),
        &YearRange::default(),
    )
    .unwrap();

    assert_eq!(views.wide.height(), 1);
    assert_eq!(views.wide.width(), 10);
    assert_eq!(views.transposed.height(), 9);
    assert_eq!(
        axis_years(&views.transposed, YEARS).unwrap(),
        (2012..=2020).collect::<Vec<_>>()
    );
    let testland = select_countries(&views.transposed, &names(&["Testland"])).unwrap();
    let expected: Vec<Option<f64>> = ramp(1.0).into_iter().map(Some).collect();
    assert_eq!(testland[0].values, expected);
}

#[test]
fn wide_rows_follow_source_order() {
    let raw = load(&[
        row("Algeria", POPULATION_GROWTH, &ramp(1.0)),
        row("Brazil", POPULATION_GROWTH, &ramp(2.0)),
        row("Chad", POPULATION_GROWTH, &ramp(3.0)),
    ]);

    let views = reshape_indicator(
        &raw,
        POPULATION_GROWTH,
        &names(&["Chad", "Brazil", "Algeria"]),
        &YearRange::default(),
    )
    .unwrap();

    let order: Vec<Option<&str>> = views
        .wide
        .column(COUNTRY_NAME)
        .unwrap()
        .str()
        .unwrap()
        .iter()
        .collect();
    assert_eq!(order, vec![Some("Algeria"), Some("Brazil"), Some("Chad")]);
}

#[test]
fn reshaping_is_idempotent() {
    let raw = load(&[
        row("Algeria", POPULATION_GROWTH, &ramp(1.0)),
        row("Nepal", "Other", &ramp(5.0)),
    ]);
    let countries = names(&["Algeria", "Nepal", "Spain"]);

    let first = reshape_indicator(&raw, POPULATION_GROWTH, &countries, &YearRange::default())
        .unwrap();
    let second = reshape_indicator(&raw, POPULATION_GROWTH, &countries, &YearRange::default())
        .unwrap();

    assert!(first.wide.equals_missing(&second.wide));
    assert!(first.transposed.equals_missing(&second.transposed));
    assert_eq!(first.wide.height(), 1);
    assert_eq!(first.transposed.height(), 9);
}

#[test]
fn names_match_exactly_including_whitespace() {
    let raw = load(&[row("Nepal ", " Pop", &ramp(1.0))]);

    let padded_request = reshape_indicator(&raw, "Pop", &names(&["Nepal"]), &YearRange::default())
        .unwrap();
    assert_eq!(padded_request.wide.height(), 0);

    let exact = reshape_indicator(&raw, " Pop", &names(&["Nepal "]), &YearRange::default())
        .unwrap();
    assert_eq!(exact.wide.height(), 1);
    let series = select_countries(&exact.transposed, &names(&["Nepal "])).unwrap();
    assert_eq!(series[0].values[8], Some(9.0));
    assert!(select_countries(&exact.transposed, &names(&["Nepal"])).is_err());
}

#[test]
fn missing_country_is_reported_on_selection() {
    let raw = load(&[row("Algeria", POPULATION_GROWTH, &ramp(1.0))]);
    let views = reshape_indicator(
        &raw,
        POPULATION_GROWTH,
        &names(&["Algeria", "Spain"]),
        &YearRange::default(),
    )
    .unwrap();

    let err = select_countries(&views.transposed, &names(&["Spain"])).unwrap_err();
    assert!(matches!(err, TransformError::MissingCountry { ref country, .. } if country == "Spain"));
}

#[test]
fn slice_is_named_by_label() {
    let raw = load(&[row("Algeria", POPULATION_GROWTH, &ramp(1.0))]);
    let views = reshape_indicator(
        &raw,
        POPULATION_GROWTH,
        &names(&["Algeria"]),
        &YearRange::default(),
    )
    .unwrap();

    let sliced = slicing_and_rename(&views.wide, 2012, "Population Growth").unwrap();

    assert_eq!(sliced.width(), 2);
    let second = sliced.get_column_names()[1].to_string();
    assert_eq!(second, "Population Growth");
    assert_ne!(second, "2012");
}

#[test]
fn keyed_merge_aligns_by_country() {
    let first = DataFrame::new(vec![
        Series::new(COUNTRY_NAME.into(), vec!["A", "B", "C"]).into(),
        Series::new("x".into(), vec![1.0, 2.0, 3.0]).into(),
    ])
    .unwrap();
    let second = DataFrame::new(vec![
        Series::new(COUNTRY_NAME.into(), vec!["C", "A", "B"]).into(),
        Series::new("y".into(), vec![30.0, 10.0, 20.0]).into(),
    ])
    .unwrap();

    let merged = merging(&[first, second]).unwrap();

    assert_eq!(merged.height(), 2);
    let countries = merged.column(COUNTRY_NAME).unwrap().str().unwrap();
    let y = merged.column("y").unwrap().f64().unwrap();
    assert_eq!(countries.get(0), Some("B"));
    assert_eq!(y.get(0), Some(20.0));
    assert_eq!(countries.get(1), Some("C"));
    assert_eq!(y.get(1), Some(30.0));
}

#[test]
fn chart_tables_cover_every_configured_indicator() {
    let config = AnalysisConfig::default();
    let countries = ["Algeria", "Nepal", "Brazil", "India", "Spain"];
    let mut rows = Vec::new();
    for (i, spec) in config.indicators.iter().enumerate() {
        for (j, country) in countries.iter().enumerate() {
            rows.push(row(country, &spec.name, &ramp((i * 10 + j) as f64)));
        }
    }
    let raw = load(&rows);

    let tables = build_chart_tables(&raw, &config).unwrap();

    assert_eq!(tables.views.len(), 4);
    assert_eq!(tables.correlation_inputs.len(), 4);
    assert!(tables.correlation_inputs.iter().all(|t| t.height() == 5));
    assert_eq!(tables.correlation.height(), 4);
    assert_eq!(tables.correlation.width(), 5);
    assert_eq!(
        tables.views_for(POPULATION_GROWTH).unwrap().transposed.height(),
        9
    );
    assert!(matches!(
        tables.views_for("GDP"),
        Err(TransformError::UnknownIndicator { .. })
    ));
}
