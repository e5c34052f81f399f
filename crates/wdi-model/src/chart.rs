use std::fmt;

use serde::{Deserialize, Serialize};

/// The five charts produced per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Box,
    Pie,
    CorrelationHeatmap,
}

impl ChartKind {
    /// All charts in rendering order.
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Box,
        ChartKind::Pie,
        ChartKind::CorrelationHeatmap,
    ];

    /// Fixed output filename; existing files are overwritten.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::Line => "lineplot.png",
            ChartKind::Bar => "barplot.png",
            ChartKind::Box => "boxplot.png",
            ChartKind::Pie => "pieplot.png",
            ChartKind::CorrelationHeatmap => "correlation_heatmap.png",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Box => "box",
            ChartKind::Pie => "pie",
            ChartKind::CorrelationHeatmap => "correlation_heatmap",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
