//! Sysgraph chart engine
//!
//! Renderer-independent core of the Sysgraph system monitor:
//!
//! - [`data_series`] - Time-ordered samples and per-column sampling
//! - [`unit_label`] - Unit ladders, round label steps and axis scale
//! - [`scrollbar`] - Scroll range and position of the time window
//! - [`menu`] - Series visibility buttons
//! - [`line_chart`] - Two-axis chart with zoom, scroll and rendering
//! - [`frame`] - Output of [`LineChart::render`] for a drawing backend
//! - [`config`] - Configuration loading (JSON5 format)
//! - [`error`] - Error types

pub mod color;
pub mod config;
pub mod data_series;
pub mod error;
pub mod frame;
pub mod line_chart;
pub mod menu;
pub mod scrollbar;
pub mod unit_label;

// Re-export commonly used types at the crate root
pub use color::Rgb;
pub use config::{ChartConfig, LogFormat, LoggingConfig, dump_config, load_config, parse_config};
pub use data_series::{DataSeries, Sample, SampleValue, linear_interpolation};
pub use error::{Error, Result};
pub use frame::{AxisFrame, AxisLabel, ChartFrame, ScrollbarFrame, SeriesLine, TimeTick};
pub use line_chart::{AxisAlign, Gesture, LineChart, SeriesId, suitable_time_step};
pub use menu::{Menu, MenuButton, MenuEvent};
pub use scrollbar::Scrollbar;
pub use unit_label::{
    LabelLayout, SuitableUnit, UnitLabel, suitable_step_size, suitable_unit, top_label_value,
};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json())
                .with(filter)
                .try_init()
                .map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
