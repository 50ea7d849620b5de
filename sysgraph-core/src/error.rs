use thiserror::Error;

use crate::line_chart::{AxisAlign, SeriesId};

/// Common error type for Sysgraph components.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sample at {time}ms is older than the last recorded sample at {last}ms")]
    OutOfOrderSample { last: i64, time: i64 },

    #[error("Sample value must be finite, got {0}")]
    NonFiniteValue(f64),

    #[error("Invalid color '{0}', expected #rgb or #rrggbb")]
    InvalidColor(String),

    #[error("Unit ladder must contain at least one unit")]
    EmptyUnitLadder,

    #[error("Unit base must be greater than 1, got {0}")]
    InvalidUnitBase(f64),

    #[error("No sub-chart registered for the {0} axis")]
    MissingSubChart(AxisAlign),

    #[error("Unknown data series {0}")]
    UnknownSeries(SeriesId),
}

/// Result type alias using Sysgraph's Error.
pub type Result<T> = std::result::Result<T, Error>;
