//! Annotated correlation heatmap of the merged correlation table.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::DataFrame;
use tracing::debug;

use wdi_model::{CorrelationOptions, PURPLES, Rgb, sequential};
use wdi_transform::{CorrelationMatrix, correlation_matrix};

use crate::error::{ChartError, Result};
use crate::style::{CAPTION_SIZE, CHART_SIZE, FONT, LABEL_SIZE, category_label, to_rgb};

/// Fill for cells without a defined correlation.
pub const MISSING_CELL: Rgb = Rgb::new(0xd0, 0xd0, 0xd0);

#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapPlot {
    pub title: String,
    pub matrix: CorrelationMatrix,
}

impl HeatmapPlot {
    /// Finite value range used for the color scale.
    fn value_range(&self) -> Option<(f64, f64)> {
        self.matrix
            .values
            .iter()
            .flatten()
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((low, high)) => Some((f64::min(low, value), f64::max(high, value))),
            })
    }

    /// Cell fill and optional annotation.
    pub fn cell(&self, row: usize, col: usize) -> (Rgb, Option<String>) {
        let value = self.matrix.get(row, col).unwrap_or(f64::NAN);
        match self.value_range() {
            Some((low, high)) if value.is_finite() => {
                let t = if high > low {
                    (value - low) / (high - low)
                } else {
                    0.5
                };
                (sequential(PURPLES, t), Some(format!("{value:.2}")))
            }
            _ => (MISSING_CELL, None),
        }
    }
}

/// Computes the Pearson matrix over the numeric columns of the merged table.
pub fn prepare_heatmap(correlation: &DataFrame, options: &CorrelationOptions) -> Result<HeatmapPlot> {
    let matrix = correlation_matrix(correlation)?;
    if matrix.is_empty() {
        return Err(ChartError::EmptyData(
            "correlation table has no numeric columns".to_string(),
        ));
    }
    Ok(HeatmapPlot {
        title: options.title.clone(),
        matrix,
    })
}

pub fn render_heatmap(plot: &HeatmapPlot, out_path: &Path) -> Result<()> {
    let labels = &plot.matrix.labels;
    let n = labels.len();
    let axis = -0.5..n as f64 - 0.5;
    // Row 0 is drawn at the top.
    let row_label = |y: &f64| category_label(labels, (n as f64 - 1.0) - *y);

    let root = BitMapBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&plot.title, (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(180)
        .build_cartesian_2d(axis.clone(), axis)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(n)
        .y_labels(n)
        .x_label_formatter(&|x| category_label(labels, *x))
        .y_label_formatter(&row_label)
        .label_style((FONT, LABEL_SIZE))
        .draw()?;

    for row in 0..n {
        for col in 0..n {
            let (fill, annotation) = plot.cell(row, col);
            let x = col as f64;
            let y = (n - 1 - row) as f64;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - 0.5, y - 0.5), (x + 0.5, y + 0.5)],
                to_rgb(fill).filled(),
            )))?;
            if let Some(text) = annotation {
                let ink = if fill.luminance() < 0.5 { WHITE } else { BLACK };
                let style = (FONT, LABEL_SIZE)
                    .into_font()
                    .color(&ink)
                    .pos(Pos::new(HPos::Center, VPos::Center));
                chart.draw_series(std::iter::once(Text::new(text, (x, y), style)))?;
            }
        }
    }

    root.present()?;
    debug!(path = %out_path.display(), size = n, "rendered correlation heatmap");
    Ok(())
}
