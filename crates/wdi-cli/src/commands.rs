use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{info, info_span};

use wdi_cli::pipeline::{ensure_output_dir, export_tables, ingest, load_config, render, reshape};
use wdi_cli::types::RunResult;
use wdi_ingest::{list_indicators, read_csv_schema};
use wdi_transform::{describe, reshape_indicator};

use crate::cli::{DescribeArgs, IndicatorsArgs, RenderArgs};
use crate::summary::{apply_table_style, print_describe};

pub fn run_render(args: &RenderArgs) -> Result<RunResult> {
    let run_span = info_span!("render_run", source = %args.csv.display());
    let _run_guard = run_span.enter();
    let config = load_config(args.config.as_deref())?;

    // =========================================================================
    // Stage 1: Ingest
    // =========================================================================
    let ingest_span = info_span!("ingest", path = %args.csv.display());
    let ingest_start = Instant::now();
    let raw = ingest_span.in_scope(|| ingest(&args.csv, config.skip_rows))?;
    info!(
        rows = raw.height(),
        columns = raw.width(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // =========================================================================
    // Stage 2: Reshape
    // =========================================================================
    let reshape_span = info_span!("reshape", indicators = config.indicators.len());
    let reshape_start = Instant::now();
    let (tables, indicators) = reshape_span.in_scope(|| reshape(&raw, &config))?;
    info!(
        indicators = tables.views.len(),
        correlation_rows = tables.correlation.height(),
        duration_ms = reshape_start.elapsed().as_millis(),
        "reshape complete"
    );

    // =========================================================================
    // Stage 3: Render
    // =========================================================================
    ensure_output_dir(&args.output_dir)?;
    let render_span = info_span!("render", output_dir = %args.output_dir.display());
    let render_start = Instant::now();
    let charts = render_span.in_scope(|| render(&tables, &config, &args.output_dir));
    let failed = charts.iter().filter(|chart| !chart.succeeded()).count();
    info!(
        charts = charts.len(),
        failed,
        duration_ms = render_start.elapsed().as_millis(),
        "render complete"
    );

    // =========================================================================
    // Stage 4: Export
    // =========================================================================
    let exported = if args.export_tables {
        let export_span = info_span!("export", output_dir = %args.output_dir.display());
        export_span.in_scope(|| export_tables(&tables, &args.output_dir))?
    } else {
        Vec::new()
    };

    Ok(RunResult {
        source: args.csv.clone(),
        output_dir: args.output_dir.clone(),
        rows: raw.height(),
        indicators,
        charts,
        exported,
        has_errors: failed > 0,
    })
}

pub fn run_indicators(args: &IndicatorsArgs) -> Result<()> {
    let raw = ingest(&args.csv, args.skip_rows)?;
    let needle = args.contains.as_deref().map(str::to_lowercase);
    let indicators = list_indicators(&raw).context("list indicators")?;

    let mut table = Table::new();
    table.set_header(vec!["Indicator Name"]);
    apply_table_style(&mut table);
    let mut shown = 0usize;
    for indicator in indicators {
        if let Some(needle) = &needle
            && !indicator.to_lowercase().contains(needle)
        {
            continue;
        }
        table.add_row(vec![indicator]);
        shown += 1;
    }
    println!("{table}");
    println!("{shown} indicator(s)");

    let headers = read_csv_schema(&args.csv, args.skip_rows).context("read header")?;
    let years = headers.year_columns();
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => println!("{} year column(s): {first}-{last}", years.len()),
        _ => println!("no year columns"),
    }
    Ok(())
}

pub fn run_describe(args: &DescribeArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let raw = ingest(&args.csv, config.skip_rows)?;
    let views = reshape_indicator(&raw, &args.indicator, &config.countries, &config.years)
        .with_context(|| format!("reshape '{}'", args.indicator))?;
    if views.wide.height() == 0 {
        anyhow::bail!(
            "indicator '{}' has no rows for the configured countries",
            args.indicator
        );
    }
    let columns = describe(&views.transposed).context("describe")?;
    print_describe(&args.indicator, &columns);
    Ok(())
}
