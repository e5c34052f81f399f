//! Grouped bar chart: one group per selected year, one bar per country.

use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use wdi_model::{BarChartOptions, Rgb};
use wdi_transform::{IndicatorViews, axis_years, require_column, rows_for_years, select_countries};

use crate::error::{ChartError, Result};
use crate::style::{
    CAPTION_SIZE, CHART_SIZE, FONT, LABEL_SIZE, category_label, to_rgb, zero_based_range,
};

/// Total width of one bar group in category units.
pub const GROUP_WIDTH: f64 = 0.65;

#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    pub country: String,
    pub color: Rgb,
    /// One value per category.
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

/// Keeps the configured years of the transposed view and pairs each country
/// with its color.
pub fn prepare_bar(views: &IndicatorViews, options: &BarChartOptions) -> Result<BarPlot> {
    if options.colors.len() < options.countries.len() {
        return Err(ChartError::NotEnoughColors {
            needed: options.countries.len(),
            available: options.colors.len(),
        });
    }
    require_column(&views.transposed, &options.x_column)?;
    let rows = rows_for_years(&views.transposed, &options.x_column, &options.years)?;
    let categories = axis_years(&rows, &options.x_column)?
        .into_iter()
        .map(|year| year.to_string())
        .collect();
    let series = select_countries(&rows, &options.countries)?
        .into_iter()
        .zip(&options.colors)
        .map(|(series, color)| BarSeries {
            country: series.country,
            color: *color,
            values: series.values,
        })
        .collect();

    Ok(BarPlot {
        title: options.title.clone(),
        x_label: options.x_label.clone(),
        y_label: options.y_label.clone(),
        categories,
        series,
    })
}

/// Horizontal extent of bar `index` of `count` within the group at `category`.
fn bar_span(category: usize, index: usize, count: usize) -> (f64, f64) {
    let width = GROUP_WIDTH / count.max(1) as f64;
    let start = category as f64 - GROUP_WIDTH / 2.0 + index as f64 * width;
    (start, start + width)
}

pub fn render_bar(plot: &BarPlot, out_path: &Path) -> Result<()> {
    if plot.categories.is_empty() {
        return Err(ChartError::EmptyData(
            "bar chart has no rows for the selected years".to_string(),
        ));
    }
    let (y_min, y_max) = zero_based_range(
        plot.series
            .iter()
            .flat_map(|series| series.values.iter().flatten().copied()),
    );
    let count = plot.categories.len();
    let x_axis = -0.5..count as f64 - 0.5;

    let root = BitMapBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&plot.title, (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_axis, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(&plot.x_label)
        .y_desc(&plot.y_label)
        .x_labels(count)
        .x_label_formatter(&|x| category_label(&plot.categories, *x))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    let bars = plot.series.len();
    for (index, series) in plot.series.iter().enumerate() {
        let color = to_rgb(series.color);
        let rects: Vec<Rectangle<(f64, f64)>> = series
            .values
            .iter()
            .enumerate()
            .filter_map(|(category, value)| {
                let value = (*value)?;
                let (x0, x1) = bar_span(category, index, bars);
                Some(Rectangle::new([(x0, 0.0), (x1, value)], color.filled()))
            })
            .collect();
        chart
            .draw_series(rects)?
            .label(series.country.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font((FONT, LABEL_SIZE))
        .draw()?;

    root.present()?;
    debug!(path = %out_path.display(), groups = count, bars, "rendered bar chart");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
    use wdi_model::YEARS;
    use wdi_transform::TransformError;

    fn views() -> IndicatorViews {
        let years: Vec<i32> = (2012..=2020).collect();
        let transposed = DataFrame::new(vec![
            Series::new("Chad".into(), (0..9).map(f64::from).collect::<Vec<_>>()).into_column(),
            Series::new("Peru".into(), (10..19).map(f64::from).collect::<Vec<_>>()).into_column(),
            Series::new(YEARS.into(), years).into_column(),
        ])
        .unwrap();
        IndicatorViews {
            indicator: "CO2".to_string(),
            wide: DataFrame::empty(),
            transposed,
        }
    }

    fn options(countries: &[&str], colors: usize) -> BarChartOptions {
        let defaults = BarChartOptions::default();
        BarChartOptions {
            countries: countries.iter().map(|c| (*c).to_string()).collect(),
            colors: defaults.colors.into_iter().take(colors).collect(),
            ..BarChartOptions::default()
        }
    }

    #[test]
    fn keeps_only_selected_years() {
        let plot = prepare_bar(&views(), &options(&["Peru", "Chad"], 2)).unwrap();
        assert_eq!(plot.categories, vec!["2012", "2014", "2016", "2018", "2020"]);
        assert_eq!(plot.series[0].country, "Peru");
        assert_eq!(
            plot.series[1].values,
            vec![Some(0.0), Some(2.0), Some(4.0), Some(6.0), Some(8.0)]
        );
    }

    #[test]
    fn too_few_colors() {
        let result = prepare_bar(&views(), &options(&["Peru", "Chad"], 1));
        assert!(matches!(
            result,
            Err(ChartError::NotEnoughColors {
                needed: 2,
                available: 1
            })
        ));
    }

    #[test]
    fn missing_columns_are_named() {
        let result = prepare_bar(&views(), &options(&["Spain"], 1));
        assert!(matches!(
            result,
            Err(ChartError::Transform(TransformError::MissingCountry { .. }))
        ));

        let mut bad_axis = options(&["Chad"], 1);
        bad_axis.x_column = "Year".to_string();
        assert!(matches!(
            prepare_bar(&views(), &bad_axis),
            Err(ChartError::Transform(TransformError::MissingColumn { .. }))
        ));
    }

    #[test]
    fn bars_fill_the_group_width() {
        let (start, _) = bar_span(2, 0, 5);
        let (_, end) = bar_span(2, 4, 5);
        assert!((start - (2.0 - GROUP_WIDTH / 2.0)).abs() < 1e-12);
        assert!((end - (2.0 + GROUP_WIDTH / 2.0)).abs() < 1e-12);
    }

    #[test]
    fn renders_grouped_bars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("barplot.png");
        let plot = prepare_bar(&views(), &options(&["Chad", "Peru"], 2)).unwrap();
        render_bar(&plot, &path).unwrap();
        assert!(path.metadata().unwrap().len() > 0);
    }
}
