//! Chart dispatch from [`ChartKind`] to the matching renderer.

use std::path::{Path, PathBuf};

use tracing::info_span;

use wdi_model::{AnalysisConfig, ChartKind};
use wdi_transform::ChartTables;

use crate::bar::{prepare_bar, render_bar};
use crate::boxplot::{prepare_box, render_box};
use crate::error::Result;
use crate::heatmap::{prepare_heatmap, render_heatmap};
use crate::line::{prepare_line, render_line};
use crate::pie::{prepare_pie, render_pie};

/// Renders one chart into `output_dir`, overwriting any existing file, and
/// returns the written path.
pub fn render_chart(
    kind: ChartKind,
    tables: &ChartTables,
    config: &AnalysisConfig,
    output_dir: &Path,
) -> Result<PathBuf> {
    let out_path = output_dir.join(kind.file_name());
    let span = info_span!("chart", chart = %kind, path = %out_path.display());
    let _guard = span.enter();

    match kind {
        ChartKind::Line => {
            let views = tables.views_for(&config.line.indicator)?;
            render_line(&prepare_line(views, &config.line)?, &out_path)?;
        }
        ChartKind::Bar => {
            let views = tables.views_for(&config.bar.indicator)?;
            render_bar(&prepare_bar(views, &config.bar)?, &out_path)?;
        }
        ChartKind::Box => {
            let views = tables.views_for(&config.boxplot.indicator)?;
            render_box(&prepare_box(views, &config.boxplot)?, &out_path)?;
        }
        ChartKind::Pie => {
            let views = tables.views_for(&config.pie.indicator)?;
            render_pie(&prepare_pie(views, &config.pie)?, &out_path)?;
        }
        ChartKind::CorrelationHeatmap => {
            let plot = prepare_heatmap(&tables.correlation, &config.correlation)?;
            render_heatmap(&plot, &out_path)?;
        }
    }
    Ok(out_path)
}
