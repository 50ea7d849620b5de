use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::unit_label::LabelLayout;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Common logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Line chart tuning. Scales are in milliseconds per pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Most zoomed-in scale.
    #[serde(default = "default_min_scale")]
    pub min_scale: f64,

    /// Most zoomed-out scale.
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,

    /// Scale of a freshly created chart.
    #[serde(default = "default_scale")]
    pub default_scale: f64,

    /// Zoom factor applied per wheel notch.
    #[serde(default = "default_zoom_rate")]
    pub zoom_rate: f64,

    /// Pixels panned per wheel notch.
    #[serde(default = "default_wheel_scroll_px")]
    pub wheel_scroll_px: f64,

    /// Pixels panned per pixel dragged.
    #[serde(default = "default_drag_rate")]
    pub drag_rate: f64,

    /// Width of one sampled column in pixels.
    #[serde(default = "default_column_width")]
    pub column_width: f64,

    /// Height of an axis label in pixels.
    #[serde(default = "default_font_height")]
    pub font_height: f64,

    /// Minimum vertical gap between axis labels.
    #[serde(default = "default_min_label_spacing")]
    pub min_label_spacing: f64,

    /// Maximum number of labels on a Y axis.
    #[serde(default = "default_max_vertical_labels")]
    pub max_vertical_labels: usize,

    /// Minimum horizontal distance between time gridlines.
    #[serde(default = "default_min_time_label_spacing")]
    pub min_time_label_spacing: f64,

    /// Candidate gridline intervals, ascending.
    #[serde(default = "default_time_steps_ms")]
    pub time_steps_ms: Vec<i64>,
}

fn default_min_scale() -> f64 {
    10.0
}

fn default_max_scale() -> f64 {
    60_000.0
}

fn default_scale() -> f64 {
    100.0
}

fn default_zoom_rate() -> f64 {
    1.25
}

fn default_wheel_scroll_px() -> f64 {
    40.0
}

fn default_drag_rate() -> f64 {
    1.0
}

fn default_column_width() -> f64 {
    1.0
}

fn default_font_height() -> f64 {
    12.0
}

fn default_min_label_spacing() -> f64 {
    8.0
}

fn default_max_vertical_labels() -> usize {
    8
}

fn default_min_time_label_spacing() -> f64 {
    80.0
}

fn default_time_steps_ms() -> Vec<i64> {
    const SECOND: i64 = 1000;
    const MINUTE: i64 = 60 * SECOND;
    const HOUR: i64 = 60 * MINUTE;
    vec![
        SECOND,
        5 * SECOND,
        30 * SECOND,
        MINUTE,
        5 * MINUTE,
        30 * MINUTE,
        HOUR,
        5 * HOUR,
        10 * HOUR,
    ]
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            min_scale: default_min_scale(),
            max_scale: default_max_scale(),
            default_scale: default_scale(),
            zoom_rate: default_zoom_rate(),
            wheel_scroll_px: default_wheel_scroll_px(),
            drag_rate: default_drag_rate(),
            column_width: default_column_width(),
            font_height: default_font_height(),
            min_label_spacing: default_min_label_spacing(),
            max_vertical_labels: default_max_vertical_labels(),
            min_time_label_spacing: default_min_time_label_spacing(),
            time_steps_ms: default_time_steps_ms(),
        }
    }
}

impl ChartConfig {
    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("default_scale", self.default_scale),
            ("column_width", self.column_width),
            ("font_height", self.font_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!("chart.{name} must be positive")));
            }
        }

        if self.min_scale > self.max_scale {
            return Err(Error::Config(
                "chart.min_scale must not exceed chart.max_scale".to_string(),
            ));
        }
        if self.default_scale < self.min_scale || self.default_scale > self.max_scale {
            return Err(Error::Config(
                "chart.default_scale must lie between min_scale and max_scale".to_string(),
            ));
        }
        if !self.zoom_rate.is_finite() || self.zoom_rate <= 1.0 {
            return Err(Error::Config("chart.zoom_rate must be above 1".to_string()));
        }
        if self.time_steps_ms.is_empty() || self.time_steps_ms.iter().any(|&s| s <= 0) {
            return Err(Error::Config(
                "chart.time_steps_ms must be a non-empty list of positive intervals".to_string(),
            ));
        }
        if self.time_steps_ms.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::Config(
                "chart.time_steps_ms must be strictly ascending".to_string(),
            ));
        }

        Ok(())
    }

    /// Label limits handed to every axis.
    pub fn label_layout(&self) -> LabelLayout {
        LabelLayout {
            font_height: self.font_height,
            min_label_spacing: self.min_label_spacing,
            max_labels: self.max_vertical_labels,
        }
    }

    /// Clamp a scale into `[min_scale, max_scale]`.
    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

/// Load a configuration file in JSON5 format.
pub fn load_config<T: for<'de> Deserialize<'de>>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    json5::from_str(&content).map_err(|e| {
        Error::Config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Load a configuration from a JSON5 string.
pub fn parse_config<T: for<'de> Deserialize<'de>>(content: &str) -> Result<T> {
    json5::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
}

/// Pretty-print a configuration as JSON, which is valid JSON5.
pub fn dump_config<T: Serialize>(config: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chart_config() {
        let config: ChartConfig = parse_config("{}").unwrap();

        assert_eq!(config, ChartConfig::default());
        assert_eq!(config.default_scale, 100.0);
        assert_eq!(config.time_steps_ms.len(), 9);
        assert_eq!(config.time_steps_ms[0], 1000);
        assert_eq!(config.time_steps_ms[8], 36_000_000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_chart_config() {
        let json5 = r#"
        {
            min_scale: 5,
            max_scale: 1000,
            default_scale: 50,
            // comments are fine in JSON5
            time_steps_ms: [1000, 10000],
        }
        "#;

        let config: ChartConfig = parse_config(json5).unwrap();

        assert_eq!(config.min_scale, 5.0);
        assert_eq!(config.max_scale, 1000.0);
        assert_eq!(config.default_scale, 50.0);
        assert_eq!(config.time_steps_ms, vec![1000, 10000]);
        assert_eq!(config.zoom_rate, 1.25);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inverted_scale_bounds() {
        let config = ChartConfig {
            min_scale: 500.0,
            max_scale: 100.0,
            ..ChartConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unsorted_time_steps() {
        let config = ChartConfig {
            time_steps_ms: vec![5000, 1000],
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ChartConfig {
            time_steps_ms: Vec::new(),
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config() {
        let config: LoggingConfig = parse_config(r#"{ level: "debug", format: "json" }"#).unwrap();
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);

        let config: LoggingConfig = parse_config("{}").unwrap();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Text);
    }

    #[test]
    fn test_dump_config_parses_back() {
        let config = ChartConfig {
            zoom_rate: 2.0,
            ..ChartConfig::default()
        };
        let dumped = dump_config(&config).unwrap();
        assert!(dumped.contains("\"zoom_rate\": 2.0"));
        let parsed: ChartConfig = parse_config(&dumped).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_clamp_scale() {
        let config = ChartConfig::default();
        assert_eq!(config.clamp_scale(1.0), 10.0);
        assert_eq!(config.clamp_scale(1e9), 60_000.0);
        assert_eq!(config.clamp_scale(250.0), 250.0);
    }
}
