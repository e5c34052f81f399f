//! Error types for chart rendering.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

use wdi_transform::TransformError;

/// Errors raised while preparing or drawing a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Lookup or reshaping failure, including `MissingCountry`.
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Fewer colors than plotted series.
    #[error("{needed} series need colors but only {available} were given")]
    NotEnoughColors { needed: usize, available: usize },

    /// A pie wedge with a missing or negative value.
    #[error("invalid wedge '{label}': {reason}")]
    InvalidWedge { label: String, reason: String },

    /// Nothing drawable was left after validation.
    #[error("nothing to draw: {0}")]
    EmptyData(String),

    /// The plotting backend failed (file I/O, font lookup, encoding).
    #[error("chart backend error: {0}")]
    Backend(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for ChartError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        Self::Backend(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_errors_pass_through() {
        let err: ChartError = TransformError::MissingCountry {
            country: "Spain".to_string(),
            available: vec!["Chad".to_string()],
        }
        .into();
        assert_eq!(err.to_string(), "country 'Spain' not found (available: Chad)");
    }

    #[test]
    fn color_shortage_message() {
        let err = ChartError::NotEnoughColors {
            needed: 5,
            available: 3,
        };
        assert_eq!(err.to_string(), "5 series need colors but only 3 were given");
    }
}
