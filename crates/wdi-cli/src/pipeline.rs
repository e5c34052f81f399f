//! Pipeline stages behind the `render` command.
//!
//! Each stage is a plain function so tests can run it without the binary:
//! `ingest` loads the export, `reshape` builds every table, `render` draws
//! the charts (collecting per-chart failures) and `export_tables` writes the
//! tables as CSV.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};

use wdi_chart::render_chart;
use wdi_ingest::{check_file_size, check_unique_pairs, read_indicator_csv, validate_encoding, write_csv_table};
use wdi_model::{AnalysisConfig, ChartKind};
use wdi_transform::{ChartTables, ColumnSummary, build_chart_tables, country_names, describe};

use crate::types::{ChartOutput, IndicatorSummary};

/// Loads the analysis config, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<AnalysisConfig> {
    match path {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("load config {}", path.display())),
        None => Ok(AnalysisConfig::default()),
    }
}

// ============================================================================
// Stage 1: Ingest
// ============================================================================

/// Checks and loads the WDI export.
pub fn ingest(path: &Path, skip_rows: usize) -> Result<DataFrame> {
    check_file_size(path).with_context(|| format!("check {}", path.display()))?;
    validate_encoding(path).with_context(|| format!("check {}", path.display()))?;
    let raw = read_indicator_csv(path, skip_rows)
        .with_context(|| format!("read {}", path.display()))?;

    let duplicates = check_unique_pairs(&raw).context("check country/indicator pairs")?;
    for pair in &duplicates {
        warn!(
            country = %pair.country,
            indicator = %pair.indicator,
            occurrences = pair.occurrences,
            "duplicate country/indicator rows"
        );
    }
    Ok(raw)
}

// ============================================================================
// Stage 2: Reshape
// ============================================================================

/// Builds every view and the correlation table, and summarizes coverage.
pub fn reshape(raw: &DataFrame, config: &AnalysisConfig) -> Result<(ChartTables, Vec<IndicatorSummary>)> {
    let tables = build_chart_tables(raw, config).context("reshape indicators")?;

    let mut summaries = Vec::with_capacity(tables.views.len());
    for (views, spec) in tables.views.iter().zip(&config.indicators) {
        let found = country_names(&views.wide)
            .with_context(|| format!("read countries of '{}'", views.indicator))?;
        let missing: Vec<String> = config
            .countries
            .iter()
            .filter(|country| !found.contains(*country))
            .cloned()
            .collect();
        summaries.push(IndicatorSummary {
            indicator: views.indicator.clone(),
            label: spec.label.clone(),
            countries: found.len(),
            missing,
        });
    }

    if let Some((indicator, columns)) = describe_first_indicator(&tables)? {
        for column in columns {
            debug!(
                indicator,
                column = %column.column,
                count = column.count,
                mean = ?column.mean,
                std = ?column.std,
                min = ?column.min,
                max = ?column.max,
                "describe"
            );
        }
    }
    Ok((tables, summaries))
}

/// Descriptive statistics of the first configured indicator's yearly values.
pub fn describe_first_indicator(tables: &ChartTables) -> Result<Option<(&str, Vec<ColumnSummary>)>> {
    let Some(views) = tables.views.first() else {
        return Ok(None);
    };
    let columns = describe(&views.transposed)
        .with_context(|| format!("describe '{}'", views.indicator))?;
    Ok(Some((views.indicator.as_str(), columns)))
}

// ============================================================================
// Stage 3: Render
// ============================================================================

/// Renders every chart; a failed chart is recorded and the rest continue.
pub fn render(tables: &ChartTables, config: &AnalysisConfig, output_dir: &Path) -> Vec<ChartOutput> {
    ChartKind::ALL
        .iter()
        .map(|kind| {
            let start = Instant::now();
            let result = render_chart(*kind, tables, config, output_dir);
            let duration_ms = start.elapsed().as_millis();
            match result {
                Ok(path) => {
                    info!(chart = %kind, path = %path.display(), duration_ms, "chart written");
                    ChartOutput {
                        kind: *kind,
                        path,
                        error: None,
                        duration_ms,
                    }
                }
                Err(error) => {
                    warn!(chart = %kind, %error, "chart failed");
                    ChartOutput {
                        kind: *kind,
                        path: output_dir.join(kind.file_name()),
                        error: Some(error.to_string()),
                        duration_ms,
                    }
                }
            }
        })
        .collect()
}

// ============================================================================
// Stage 4: Export (optional)
// ============================================================================

/// File-name stem for an indicator: lowercase words joined by `_`.
pub fn slug(indicator: &str) -> String {
    indicator
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Writes every wide and transposed view plus the correlation table as CSV.
pub fn export_tables(tables: &ChartTables, output_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(tables.views.len() * 2 + 1);
    for views in &tables.views {
        let stem = slug(&views.indicator);
        for (suffix, df) in [("wide", &views.wide), ("transposed", &views.transposed)] {
            let path = output_dir.join(format!("{stem}_{suffix}.csv"));
            write_csv_table(df, &path).with_context(|| format!("export {}", path.display()))?;
            written.push(path);
        }
    }
    let path = output_dir.join("correlation_input.csv");
    write_csv_table(&tables.correlation, &path)
        .with_context(|| format!("export {}", path.display()))?;
    written.push(path);
    debug!(files = written.len(), "exported tables");
    Ok(written)
}

/// Creates the output directory if needed.
pub fn ensure_output_dir(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))
}
