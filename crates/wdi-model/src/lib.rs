//! Shared model types for the WDI chart pipeline.

pub mod chart;
pub mod color;
pub mod config;
pub mod error;
pub mod years;

pub use chart::ChartKind;
pub use color::{PURPLES, Rgb, SET2, SET3, TAB10, palette_pick, sequential};
pub use config::{
    AnalysisConfig, BarChartOptions, BoxChartOptions, CEREAL_YIELD, CO2_EMISSIONS,
    CorrelationOptions, DEFAULT_SKIP_ROWS, FDI_NET_INFLOWS, IndicatorSpec, LineChartOptions,
    POPULATION_GROWTH, PieChartOptions,
};
pub use error::{ModelError, Result};
pub use years::YearRange;

/// Source column holding the country name.
pub const COUNTRY_NAME: &str = "Country Name";
/// Source column holding the indicator name.
pub const INDICATOR_NAME: &str = "Indicator Name";
/// Derived numeric year column of a transposed view.
pub const YEARS: &str = "Years";
