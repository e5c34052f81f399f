//! Pie chart of one indicator's values in one year.
//!
//! Each wedge label is looked up by name in the wide view, so a label can
//! never be paired with another country's value.

use std::path::Path;

use plotters::element::Pie;
use plotters::prelude::*;
use tracing::debug;

use wdi_model::{PieChartOptions, Rgb, SET2, palette_pick};
use wdi_transform::{IndicatorViews, country_values_at_year};

use crate::error::{ChartError, Result};
use crate::style::{CAPTION_SIZE, CHART_SIZE, FONT, LABEL_SIZE, to_rgb};

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PiePlot {
    pub title: String,
    pub wedges: Vec<Wedge>,
}

impl PiePlot {
    pub fn total(&self) -> f64 {
        self.wedges.iter().map(|wedge| wedge.value).sum()
    }
}

pub fn prepare_pie(views: &IndicatorViews, options: &PieChartOptions) -> Result<PiePlot> {
    let values = country_values_at_year(&views.wide, &options.countries, options.year)?;
    let wedges = values
        .into_iter()
        .enumerate()
        .map(|(index, (label, value))| match value {
            None => Err(ChartError::InvalidWedge {
                reason: format!("no value for {}", options.year),
                label,
            }),
            Some(value) if value < 0.0 => Err(ChartError::InvalidWedge {
                reason: format!("negative value {value}"),
                label,
            }),
            Some(value) => Ok(Wedge {
                label,
                value,
                color: palette_pick(SET2, index),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(PiePlot {
        title: options.display_title(),
        wedges,
    })
}

pub fn render_pie(plot: &PiePlot, out_path: &Path) -> Result<()> {
    if plot.total() <= 0.0 {
        return Err(ChartError::EmptyData("pie wedges sum to zero".to_string()));
    }
    let sizes: Vec<f64> = plot.wedges.iter().map(|wedge| wedge.value).collect();
    let colors: Vec<RGBColor> = plot.wedges.iter().map(|wedge| to_rgb(wedge.color)).collect();
    let labels: Vec<String> = plot.wedges.iter().map(|wedge| wedge.label.clone()).collect();

    let root = BitMapBackend::new(out_path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(&plot.title, (FONT, CAPTION_SIZE))?;
    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) * 0.35;

    let mut pie = Pie::new(
        &center,
        &radius,
        sizes.as_slice(),
        colors.as_slice(),
        labels.as_slice(),
    );
    pie.label_style((FONT, LABEL_SIZE).into_font().color(&BLACK));
    pie.percentages((FONT, LABEL_SIZE).into_font().color(&BLACK));
    root.draw(&pie)?;

    root.present()?;
    debug!(path = %out_path.display(), wedges = sizes.len(), "rendered pie chart");
    Ok(())
}
