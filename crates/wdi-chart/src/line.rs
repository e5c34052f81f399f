//! Line chart: one line per country over the year axis.

use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use wdi_model::{LineChartOptions, TAB10, YEARS, palette_pick};
use wdi_transform::{CountrySeries, IndicatorViews, axis_years, select_countries};

use crate::error::{ChartError, Result};
use crate::style::{CAPTION_SIZE, CHART_SIZE, FONT, LABEL_SIZE, padded_range, to_rgb};

#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub years: Vec<i32>,
    pub series: Vec<CountrySeries>,
}

/// Resolves the configured countries against the transposed view.
pub fn prepare_line(views: &IndicatorViews, options: &LineChartOptions) -> Result<LinePlot> {
    let years = axis_years(&views.transposed, YEARS)?;
    let series = select_countries(&views.transposed, &options.countries)?;
    Ok(LinePlot {
        title: options.display_title(),
        x_label: options.x_label.clone(),
        y_label: options.y_label.clone(),
        years,
        series,
    })
}

/// Splits a series at nulls into drawable runs.
fn line_runs(years: &[i32], values: &[Option<f64>]) -> Vec<Vec<(i32, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (year, value) in years.iter().zip(values) {
        match value {
            Some(value) => current.push((*year, *value)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

pub fn render_line(plot: &LinePlot, out_path: &Path) -> Result<()> {
    let (first, last) = match (plot.years.first(), plot.years.last()) {
        (Some(first), Some(last)) if first < last => (*first, *last),
        (Some(year), Some(_)) => (*year - 1, *year + 1),
        _ => return Err(ChartError::EmptyData("line chart has no years".to_string())),
    };
    let (y_min, y_max) = padded_range(plot.series.iter().flat_map(CountrySeries::observed));

    let root = BitMapBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&plot.title, (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc(&plot.x_label)
        .y_desc(&plot.y_label)
        .x_labels(plot.years.len())
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    for (index, series) in plot.series.iter().enumerate() {
        let color = to_rgb(palette_pick(TAB10, index));
        for run in line_runs(&plot.years, &series.values) {
            chart.draw_series(LineSeries::new(run, color.stroke_width(2)))?;
        }
        let points: Vec<(i32, f64)> = plot
            .years
            .iter()
            .zip(&series.values)
            .filter_map(|(year, value)| value.map(|value| (*year, value)))
            .collect();
        chart
            .draw_series(
                points
                    .into_iter()
                    .map(|point| Circle::new(point, 4, color.filled())),
            )?
            .label(series.country.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, LABEL_SIZE))
        .draw()?;

    root.present()?;
    debug!(path = %out_path.display(), series = plot.series.len(), "rendered line chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
    use wdi_model::FDI_NET_INFLOWS;
    use wdi_transform::TransformError;

    fn views() -> IndicatorViews {
        let transposed = DataFrame::new(vec![
            Series::new("Algeria".into(), vec![Some(0.8), None, Some(1.1)]).into_column(),
            Series::new("Nepal".into(), vec![Some(0.1), Some(0.2), Some(0.3)]).into_column(),
            Series::new(YEARS.into(), vec![2012i32, 2013, 2014]).into_column(),
        ])
        .unwrap();
        IndicatorViews {
            indicator: "FDI".to_string(),
            wide: DataFrame::empty(),
            transposed,
        }
    }

    fn options(countries: &[&str]) -> LineChartOptions {
        LineChartOptions {
            countries: countries.iter().map(|c| (*c).to_string()).collect(),
            ..LineChartOptions::default()
        }
    }

    #[test]
    fn prepare_uses_indicator_as_default_title() {
        let plot = prepare_line(&views(), &options(&["Nepal", "Algeria"])).unwrap();
        assert_eq!(plot.title, FDI_NET_INFLOWS);
        assert_eq!(plot.years, vec![2012, 2013, 2014]);
        assert_eq!(plot.series[0].country, "Nepal");
    }

    #[test]
    fn missing_country_fails_before_drawing() {
        let result = prepare_line(&views(), &options(&["Algeria", "Spain"]));
        assert!(matches!(
            result,
            Err(ChartError::Transform(TransformError::MissingCountry { .. }))
        ));
    }

    #[test]
    fn nulls_break_lines() {
        let runs = line_runs(&[2012, 2013, 2014, 2015], &[Some(1.0), None, Some(3.0), Some(4.0)]);
        assert_eq!(runs, vec![vec![(2012, 1.0)], vec![(2014, 3.0), (2015, 4.0)]]);
        assert!(line_runs(&[2012], &[None]).is_empty());
    }

    #[test]
    fn renders_png_with_gaps() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineplot.png");
        let plot = prepare_line(&views(), &options(&["Algeria", "Nepal"])).unwrap();
        render_line(&plot, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
