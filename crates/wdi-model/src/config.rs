//! Analysis configuration.
//!
//! [`AnalysisConfig::default`] reproduces the fixed analysis: five countries,
//! four indicators, years 2012 to 2020. A JSON file can override any subset
//! of fields; missing fields keep their defaults.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::error::{ModelError, Result};
use crate::years::YearRange;

pub const POPULATION_GROWTH: &str = "Population growth (annual %)";
pub const CO2_EMISSIONS: &str = "CO2 emissions (kg per PPP $ of GDP)";
pub const CEREAL_YIELD: &str = "Cereal yield (kg per hectare)";
pub const FDI_NET_INFLOWS: &str = "Foreign direct investment, net inflows (% of GDP)";

/// Number of preamble lines before the header in a WDI export.
pub const DEFAULT_SKIP_ROWS: usize = 4;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

/// An indicator to reshape, with the label used in the correlation table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSpec {
    /// Exact `Indicator Name` value in the source table.
    pub name: String,
    /// Human-readable column label for the correlation heatmap.
    pub label: String,
}

impl IndicatorSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartOptions {
    pub indicator: String,
    pub countries: Vec<String>,
    /// Chart title; the indicator name when unset.
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
}

impl LineChartOptions {
    /// The configured title, or the indicator name.
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.indicator.clone())
    }
}

impl Default for LineChartOptions {
    fn default() -> Self {
        Self {
            indicator: FDI_NET_INFLOWS.to_string(),
            countries: names(&["Algeria", "Nepal", "Brazil", "India", "Spain"]),
            title: None,
            x_label: "Years".to_string(),
            y_label: "net inflows (% of GDP)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartOptions {
    pub indicator: String,
    /// Column holding the category axis (the transposed view's year column).
    pub x_column: String,
    pub countries: Vec<String>,
    /// Years kept as bar groups; every other year keeps grouped bars legible.
    pub years: Vec<i32>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub colors: Vec<Rgb>,
}

impl Default for BarChartOptions {
    fn default() -> Self {
        Self {
            indicator: CO2_EMISSIONS.to_string(),
            x_column: "Years".to_string(),
            countries: names(&["Algeria", "Nepal", "Brazil", "India", "Spain"]),
            years: vec![2012, 2014, 2016, 2018, 2020],
            title: "Comparison of CO2 Emissions per PPP $ of GDP".to_string(),
            x_label: "Years".to_string(),
            y_label: "kg per PPP $ of GDP".to_string(),
            colors: vec![
                Rgb::new(0x87, 0xce, 0xeb),
                Rgb::new(0x32, 0xcd, 0x32),
                Rgb::new(0xf0, 0x80, 0x80),
                Rgb::new(0xff, 0xd7, 0x00),
                Rgb::new(0xba, 0x55, 0xd3),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxChartOptions {
    pub indicator: String,
    /// Box order, left to right.
    pub countries: Vec<String>,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for BoxChartOptions {
    fn default() -> Self {
        Self {
            indicator: CEREAL_YIELD.to_string(),
            countries: names(&["Algeria", "Brazil", "India", "Nepal", "Spain"]),
            title: "Cereal Yield Boxplot(kg per hectare)".to_string(),
            x_label: "Country".to_string(),
            y_label: "(kg per hectare)".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieChartOptions {
    pub indicator: String,
    pub year: i32,
    /// Wedge labels in drawing order; each is looked up by name.
    pub countries: Vec<String>,
    /// Chart title; `<indicator> in <year>` when unset.
    pub title: Option<String>,
}

impl PieChartOptions {
    /// The configured title, or `<indicator> in <year>`.
    pub fn display_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("{} in {}", self.indicator, self.year))
    }
}

impl Default for PieChartOptions {
    fn default() -> Self {
        Self {
            indicator: POPULATION_GROWTH.to_string(),
            year: 2020,
            countries: names(&["Algeria", "Brazil", "Spain", "India", "Nepal"]),
            title: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationOptions {
    /// Year whose values feed the correlation table.
    pub year: i32,
    pub title: String,
}

impl Default for CorrelationOptions {
    fn default() -> Self {
        Self {
            year: 2012,
            title: "Correlation Heatmap".to_string(),
        }
    }
}

/// Everything the pipeline needs besides the source file itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Physical lines skipped before the header row.
    pub skip_rows: usize,
    pub countries: Vec<String>,
    /// Indicators to reshape, in pipeline order.
    pub indicators: Vec<IndicatorSpec>,
    pub years: YearRange,
    pub line: LineChartOptions,
    pub bar: BarChartOptions,
    #[serde(rename = "box")]
    pub boxplot: BoxChartOptions,
    pub pie: PieChartOptions,
    pub correlation: CorrelationOptions,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            skip_rows: DEFAULT_SKIP_ROWS,
            countries: names(&["Algeria", "Nepal", "Brazil", "India", "Spain"]),
            indicators: vec![
                IndicatorSpec::new(POPULATION_GROWTH, "Population Growth"),
                IndicatorSpec::new(CO2_EMISSIONS, "CO2 Emission"),
                IndicatorSpec::new(CEREAL_YIELD, "Cereal Yield"),
                IndicatorSpec::new(FDI_NET_INFLOWS, "Foreign Direct Investment"),
            ],
            years: YearRange::default(),
            line: LineChartOptions::default(),
            bar: BarChartOptions::default(),
            boxplot: BoxChartOptions::default(),
            pie: PieChartOptions::default(),
            correlation: CorrelationOptions::default(),
        }
    }
}

impl AnalysisConfig {
    /// Loads a JSON config file; absent fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ModelError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AnalysisConfig =
            serde_json::from_str(&contents).map_err(|source| ModelError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Looks up a configured indicator by its source name.
    pub fn indicator(&self, name: &str) -> Option<&IndicatorSpec> {
        self.indicators.iter().find(|spec| spec.name == name)
    }

    /// Checks cross-references between the chart options and the indicator,
    /// country and year settings.
    pub fn validate(&self) -> Result<()> {
        self.years.validate()?;
        if self.countries.is_empty() {
            return Err(invalid("country list is empty"));
        }
        if self.indicators.is_empty() {
            return Err(invalid("indicator list is empty"));
        }

        let mut seen_names = BTreeSet::new();
        let mut seen_labels = BTreeSet::new();
        for spec in &self.indicators {
            if !seen_names.insert(spec.name.as_str()) {
                return Err(invalid(format!("indicator '{}' listed twice", spec.name)));
            }
            if spec.label.trim().is_empty() {
                return Err(invalid(format!("indicator '{}' has an empty label", spec.name)));
            }
            if !seen_labels.insert(spec.label.as_str()) {
                return Err(invalid(format!("label '{}' used twice", spec.label)));
            }
        }

        for (chart, indicator) in [
            ("line", &self.line.indicator),
            ("bar", &self.bar.indicator),
            ("box", &self.boxplot.indicator),
            ("pie", &self.pie.indicator),
        ] {
            if self.indicator(indicator).is_none() {
                return Err(invalid(format!(
                    "{chart} chart uses indicator '{indicator}' which is not in the indicator list"
                )));
            }
        }

        for (chart, countries) in [
            ("line", &self.line.countries),
            ("bar", &self.bar.countries),
            ("box", &self.boxplot.countries),
            ("pie", &self.pie.countries),
        ] {
            if countries.is_empty() {
                return Err(invalid(format!("{chart} chart has no countries")));
            }
        }

        if self.bar.colors.len() < self.bar.countries.len() {
            return Err(invalid(format!(
                "bar chart has {} colors for {} countries",
                self.bar.colors.len(),
                self.bar.countries.len()
            )));
        }
        if self.bar.years.is_empty() {
            return Err(invalid("bar chart has no years"));
        }
        if let Some(year) = self.bar.years.iter().find(|year| !self.years.contains(**year)) {
            return Err(invalid(format!("bar chart year {year} is outside the year range")));
        }
        if !self.years.contains(self.pie.year) {
            return Err(invalid(format!(
                "pie chart year {} is outside the year range",
                self.pie.year
            )));
        }
        if !self.years.contains(self.correlation.year) {
            return Err(invalid(format!(
                "correlation year {} is outside the year range",
                self.correlation.year
            )));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ModelError {
    ModelError::InvalidConfig(message.into())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AnalysisConfig::default();
        config.validate().unwrap();
        assert_eq!(config.skip_rows, 4);
        assert_eq!(config.indicators.len(), 4);
        assert_eq!(config.pie.display_title(), "Population growth (annual %) in 2020");
        assert_eq!(config.line.display_title(), FDI_NET_INFLOWS);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r##"{{"pie": {{"year": 2019}}, "bar": {{"colors": ["red", "blue", "green", "gold", "#000000"]}}}}"##
        )
        .unwrap();

        let config = AnalysisConfig::from_json_file(file.path()).unwrap();

        assert_eq!(config.pie.year, 2019);
        assert_eq!(config.pie.indicator, POPULATION_GROWTH);
        assert_eq!(config.bar.colors[0], Rgb::new(255, 0, 0));
        assert_eq!(config.years, YearRange::default());
    }

    #[test]
    fn rejects_chart_indicator_outside_list() {
        let mut config = AnalysisConfig::default();
        config.line.indicator = "GDP growth (annual %)".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("line chart"));
    }

    #[test]
    fn rejects_too_few_bar_colors() {
        let mut config = AnalysisConfig::default();
        config.bar.colors.truncate(2);
        assert!(matches!(
            config.validate(),
            Err(ModelError::InvalidConfig(_))
        ));
    }

    #[test]
    fn rejects_years_outside_range() {
        let mut config = AnalysisConfig::default();
        config.correlation.year = 2005;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.bar.years.push(2021);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_labels() {
        let mut config = AnalysisConfig::default();
        config.indicators[1].label = config.indicators[0].label.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reports_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(matches!(
            AnalysisConfig::from_json_file(file.path()),
            Err(ModelError::ConfigParse { .. })
        ));
    }
}
