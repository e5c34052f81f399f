//! PNG charts for reshaped WDI indicator tables.
//!
//! Every chart is split into a `prepare_*` step, which resolves countries and
//! values by name and fails before anything is drawn, and a `render_*` step
//! that draws the prepared plot with `plotters` and writes the PNG.
//!
//! | Chart | Source | File |
//! |-------|--------|------|
//! | line | transposed view | `lineplot.png` |
//! | bar | transposed view, selected years | `barplot.png` |
//! | box | transposed view | `boxplot.png` |
//! | pie | wide view, one year | `pieplot.png` |
//! | correlation heatmap | merged correlation table | `correlation_heatmap.png` |

mod bar;
mod boxplot;
mod error;
mod heatmap;
mod line;
mod pie;
mod render;
mod style;

pub use bar::{BarPlot, BarSeries, GROUP_WIDTH, prepare_bar, render_bar};
pub use boxplot::{BoxPlot, CountryBox, prepare_box, render_box};
pub use error::{ChartError, Result};
pub use heatmap::{HeatmapPlot, MISSING_CELL, prepare_heatmap, render_heatmap};
pub use line::{LinePlot, prepare_line, render_line};
pub use pie::{PiePlot, Wedge, prepare_pie, render_pie};
pub use render::render_chart;
pub use style::CHART_SIZE;
