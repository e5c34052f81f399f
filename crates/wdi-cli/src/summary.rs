use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use wdi_cli::types::{ChartOutput, RunResult};
use wdi_transform::ColumnSummary;

pub fn print_summary(result: &RunResult) {
    println!("Source: {} ({} rows)", result.source.display(), result.rows);
    println!("Output: {}", result.output_dir.display());

    let mut indicators = Table::new();
    indicators.set_header(vec![
        header_cell("Indicator"),
        header_cell("Label"),
        header_cell("Countries"),
        header_cell("Missing"),
    ]);
    apply_summary_table_style(&mut indicators);
    align_column(&mut indicators, 2, CellAlignment::Right);
    for summary in &result.indicators {
        let missing = if summary.missing.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(summary.missing.join(", ")).fg(Color::Yellow)
        };
        indicators.add_row(vec![
            Cell::new(&summary.indicator),
            Cell::new(&summary.label),
            Cell::new(summary.countries),
            missing,
        ]);
    }
    println!("{indicators}");

    let mut charts = Table::new();
    charts.set_header(vec![
        header_cell("Chart"),
        header_cell("File"),
        header_cell("Status"),
        header_cell("ms"),
    ]);
    apply_summary_table_style(&mut charts);
    align_column(&mut charts, 2, CellAlignment::Center);
    align_column(&mut charts, 3, CellAlignment::Right);
    for chart in &result.charts {
        charts.add_row(vec![
            Cell::new(chart.kind.as_str())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(chart.path.display()),
            status_cell(chart),
            dim_cell(chart.duration_ms),
        ]);
    }
    println!("{charts}");

    if !result.exported.is_empty() {
        println!("Exported tables:");
        for path in &result.exported {
            println!("  {}", path.display());
        }
    }

    let failures: Vec<&ChartOutput> = result.charts.iter().filter(|c| !c.succeeded()).collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for chart in failures {
            if let Some(error) = &chart.error {
                eprintln!("- {}: {error}", chart.kind);
            }
        }
    }
}

pub fn print_describe(indicator: &str, columns: &[ColumnSummary]) {
    println!("{indicator}");
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("count"),
        header_cell("mean"),
        header_cell("std"),
        header_cell("min"),
        header_cell("25%"),
        header_cell("50%"),
        header_cell("75%"),
        header_cell("max"),
    ]);
    apply_table_style(&mut table);
    for index in 1..9 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in columns {
        table.add_row(vec![
            Cell::new(&column.column).add_attribute(Attribute::Bold),
            Cell::new(column.count),
            stat_cell(column.mean),
            stat_cell(column.std),
            stat_cell(column.min),
            stat_cell(column.p25),
            stat_cell(column.p50),
            stat_cell(column.p75),
            stat_cell(column.max),
        ]);
    }
    println!("{table}");
}

fn status_cell(chart: &ChartOutput) -> Cell {
    if chart.succeeded() {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn stat_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format!("{value:.6}")),
        None => dim_cell("NaN"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
