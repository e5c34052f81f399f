//! Ordered construction of every table the charts need.

use polars::prelude::DataFrame;
use tracing::{debug, info};

use wdi_model::AnalysisConfig;

use crate::correlation::{merging, slicing_and_rename};
use crate::error::{Result, TransformError};
use crate::reshape::{IndicatorViews, reshape_indicator};

/// Reshaped views of every configured indicator plus the correlation table.
#[derive(Debug, Clone)]
pub struct ChartTables {
    /// One entry per configured indicator, in configuration order.
    pub views: Vec<IndicatorViews>,
    /// Single-year tables, one per indicator, before merging.
    pub correlation_inputs: Vec<DataFrame>,
    /// Merged correlation input table.
    pub correlation: DataFrame,
}

impl ChartTables {
    pub fn views_for(&self, indicator: &str) -> Result<&IndicatorViews> {
        self.views
            .iter()
            .find(|views| views.indicator == indicator)
            .ok_or_else(|| TransformError::UnknownIndicator {
                indicator: indicator.to_string(),
            })
    }
}

/// Reshapes every configured indicator in order, then slices and merges the
/// correlation table for the configured year.
pub fn build_chart_tables(raw: &DataFrame, config: &AnalysisConfig) -> Result<ChartTables> {
    let mut views = Vec::with_capacity(config.indicators.len());
    let mut correlation_inputs = Vec::with_capacity(config.indicators.len());

    for spec in &config.indicators {
        let indicator_views = reshape_indicator(raw, &spec.name, &config.countries, &config.years)?;
        if indicator_views.wide.height() == 0 {
            info!(indicator = %spec.name, "indicator has no rows for the configured countries");
        }
        correlation_inputs.push(slicing_and_rename(
            &indicator_views.wide,
            config.correlation.year,
            &spec.label,
        )?);
        views.push(indicator_views);
    }

    let correlation = merging(&correlation_inputs)?;
    debug!(
        indicators = views.len(),
        correlation_rows = correlation.height(),
        correlation_columns = correlation.width(),
        "built chart tables"
    );
    Ok(ChartTables {
        views,
        correlation_inputs,
        correlation,
    })
}
