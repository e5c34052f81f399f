//! Box chart of each country's yearly values.

use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use wdi_model::{BoxChartOptions, SET3, palette_pick};
use wdi_transform::{BoxStats, IndicatorViews, select_countries};

use crate::error::{ChartError, Result};
use crate::style::{
    CAPTION_SIZE, CHART_SIZE, FONT, LABEL_SIZE, category_label, padded_range, to_rgb,
};

const BOX_HALF_WIDTH: f64 = 0.25;
const CAP_HALF_WIDTH: f64 = 0.12;

#[derive(Debug, Clone, PartialEq)]
pub struct CountryBox {
    pub country: String,
    /// `None` when the country has no observations.
    pub stats: Option<BoxStats>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub boxes: Vec<CountryBox>,
}

pub fn prepare_box(views: &IndicatorViews, options: &BoxChartOptions) -> Result<BoxPlot> {
    let boxes = select_countries(&views.transposed, &options.countries)?
        .into_iter()
        .map(|series| CountryBox {
            stats: BoxStats::from_values(&series.values),
            country: series.country,
        })
        .collect();
    Ok(BoxPlot {
        title: options.title.clone(),
        x_label: options.x_label.clone(),
        y_label: options.y_label.clone(),
        boxes,
    })
}

pub fn render_box(plot: &BoxPlot, out_path: &Path) -> Result<()> {
    let extremes: Vec<f64> = plot
        .boxes
        .iter()
        .filter_map(|entry| entry.stats.as_ref())
        .flat_map(|stats| {
            let mut values = vec![stats.whisker_low, stats.whisker_high];
            values.extend(&stats.outliers);
            values
        })
        .collect();
    if extremes.is_empty() {
        return Err(ChartError::EmptyData(
            "no country has observations for the box chart".to_string(),
        ));
    }
    let (y_min, y_max) = padded_range(extremes);
    let labels: Vec<String> = plot.boxes.iter().map(|entry| entry.country.clone()).collect();
    let count = labels.len();
    let x_axis = -0.5..count as f64 - 0.5;

    let root = BitMapBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&plot.title, (FONT, CAPTION_SIZE))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_axis, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(&plot.x_label)
        .y_desc(&plot.y_label)
        .x_labels(count)
        .x_label_formatter(&|x| category_label(&labels, *x))
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    for (index, entry) in plot.boxes.iter().enumerate() {
        let Some(stats) = &entry.stats else {
            continue;
        };
        let x = index as f64;
        let fill = to_rgb(palette_pick(SET3, index));
        let left = x - BOX_HALF_WIDTH;
        let right = x + BOX_HALF_WIDTH;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, stats.q1), (right, stats.q3)],
            fill.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(left, stats.q1), (right, stats.q3)],
            BLACK.stroke_width(1),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(left, stats.median), (right, stats.median)],
            BLACK.stroke_width(2),
        )))?;
        for (edge, whisker) in [(stats.q1, stats.whisker_low), (stats.q3, stats.whisker_high)] {
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x, edge), (x, whisker)],
                BLACK.stroke_width(1),
            )))?;
            chart.draw_series(std::iter::once(PathElement::new(
                vec![(x - CAP_HALF_WIDTH, whisker), (x + CAP_HALF_WIDTH, whisker)],
                BLACK.stroke_width(1),
            )))?;
        }
        chart.draw_series(
            stats
                .outliers
                .iter()
                .map(|value| Circle::new((x, *value), 3, BLACK.stroke_width(1))),
        )?;
    }

    root.present()?;
    debug!(path = %out_path.display(), boxes = count, "rendered box chart");
    Ok(())
}
