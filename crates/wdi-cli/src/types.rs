use std::path::PathBuf;

use wdi_model::ChartKind;

#[derive(Debug)]
pub struct RunResult {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    /// Data rows in the source table.
    pub rows: usize,
    pub indicators: Vec<IndicatorSummary>,
    pub charts: Vec<ChartOutput>,
    pub exported: Vec<PathBuf>,
    pub has_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSummary {
    pub indicator: String,
    pub label: String,
    /// Configured countries found in the source.
    pub countries: usize,
    pub missing: Vec<String>,
}

#[derive(Debug)]
pub struct ChartOutput {
    pub kind: ChartKind,
    pub path: PathBuf,
    pub error: Option<String>,
    pub duration_ms: u128,
}

impl ChartOutput {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}
