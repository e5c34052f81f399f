//! Summary statistics: quantiles, box-plot statistics and `describe`.

use polars::prelude::DataFrame;

use wdi_ingest::column_f64_values;

use crate::correlation::numeric_columns;
use crate::error::Result;
use crate::frame::require_column;

/// Linear-interpolation quantile of sorted values (`q` in `[0, 1]`).
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

fn sorted_observations(values: &[Option<f64>]) -> Vec<f64> {
    let mut observed: Vec<f64> = values.iter().flatten().copied().collect();
    observed.sort_by(f64::total_cmp);
    observed
}

/// Statistics for one box of a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation within 1.5 IQR below `q1`.
    pub whisker_low: f64,
    /// Largest observation within 1.5 IQR above `q3`.
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// Computes box statistics, ignoring nulls. `None` without observations.
    pub fn from_values(values: &[Option<f64>]) -> Option<Self> {
        let sorted = sorted_observations(values);
        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - 1.5 * iqr;
        let high_fence = q3 + 1.5 * iqr;

        let inside = sorted
            .iter()
            .copied()
            .filter(|value| (low_fence..=high_fence).contains(value));
        let (whisker_low, whisker_high) = inside.fold((f64::INFINITY, f64::NEG_INFINITY), |acc, v| {
            (acc.0.min(v), acc.1.max(v))
        });
        let outliers = sorted
            .iter()
            .copied()
            .filter(|value| !(low_fence..=high_fence).contains(value))
            .collect();

        Some(Self {
            count: sorted.len(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}

/// Descriptive statistics for one numeric column, nulls excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; needs two observations.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

impl ColumnSummary {
    pub fn from_values(column: impl Into<String>, values: &[Option<f64>]) -> Self {
        let sorted = sorted_observations(values);
        let count = sorted.len();
        let mean = (count > 0).then(|| sorted.iter().sum::<f64>() / count as f64);
        let std = match mean {
            Some(mean) if count > 1 => {
                let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
                Some((squares / (count - 1) as f64).sqrt())
            }
            _ => None,
        };
        Self {
            column: column.into(),
            count,
            mean,
            std,
            min: sorted.first().copied(),
            p25: quantile(&sorted, 0.25),
            p50: quantile(&sorted, 0.5),
            p75: quantile(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }
}

/// Summarizes every numeric column of `df`, in column order.
pub fn describe(df: &DataFrame) -> Result<Vec<ColumnSummary>> {
    numeric_columns(df)
        .into_iter()
        .map(|name| -> Result<ColumnSummary> {
            let values = column_f64_values(require_column(df, &name)?)?;
            Ok(ColumnSummary::from_values(name, &values))
        })
        .collect()
}
