//! Whiteboard configuration.

use crate::shapes::{DEFAULT_COLOR, DEFAULT_STROKE_WIDTH, MAX_STROKE_WIDTH, MIN_STROKE_WIDTH};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Tunables of the canvas. Every field has a default, so a partial JSON
/// object is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Stroke color selected at startup.
    pub default_color: String,
    /// Stroke width selected at startup.
    pub default_stroke_width: f64,
    /// Upper bound of the toolbar stroke width.
    pub max_stroke_width: f64,
    /// Colors offered by the toolbar.
    pub palette: Vec<String>,
    /// Distance the arrow keys pan the canvas.
    pub pan_step: f64,
    /// Content of a freshly placed text element.
    pub text_placeholder: String,
    /// Stroke width given to text elements.
    pub text_stroke_width: f64,
    /// Maximum history entries; `None` keeps everything.
    pub history_limit: Option<usize>,
    /// Prefix of exported file names.
    pub export_prefix: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR.to_string(),
            default_stroke_width: DEFAULT_STROKE_WIDTH,
            max_stroke_width: MAX_STROKE_WIDTH,
            palette: vec![
                "#FFFFFF".to_string(),
                "#DC2626".to_string(),
                "#F59E0B".to_string(),
            ],
            pan_step: 20.0,
            text_placeholder: "Texto".to_string(),
            text_stroke_width: 1.0,
            history_limit: None,
            export_prefix: "Rabisco".to_string(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_stroke_width.is_finite() || self.default_stroke_width < MIN_STROKE_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "defaultStrokeWidth must be at least {MIN_STROKE_WIDTH}"
            )));
        }
        if !self.max_stroke_width.is_finite() || self.max_stroke_width < self.default_stroke_width {
            return Err(ConfigError::Invalid(
                "maxStrokeWidth must be at least defaultStrokeWidth".to_string(),
            ));
        }
        if !self.text_stroke_width.is_finite() || self.text_stroke_width < MIN_STROKE_WIDTH {
            return Err(ConfigError::Invalid(format!(
                "textStrokeWidth must be at least {MIN_STROKE_WIDTH}"
            )));
        }
        if !self.pan_step.is_finite() || self.pan_step <= 0.0 {
            return Err(ConfigError::Invalid("panStep must be positive".to_string()));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "historyLimit must keep at least one entry".to_string(),
            ));
        }
        if self.export_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("exportPrefix must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CanvasConfig::default();
        assert_eq!(config.default_color, "#FFFFFF");
        assert_eq!(config.default_stroke_width, 2.0);
        assert_eq!(config.max_stroke_width, 10.0);
        assert_eq!(config.palette.len(), 3);
        assert_eq!(config.pan_step, 20.0);
        assert_eq!(config.history_limit, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = CanvasConfig::from_json(r#"{"panStep": 40, "historyLimit": 10}"#).unwrap();
        assert_eq!(config.pan_step, 40.0);
        assert_eq!(config.history_limit, Some(10));
        assert_eq!(config.text_placeholder, "Texto");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CanvasConfig::from_json(r#"{"defaultStrokeWidth": 0.5}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{"defaultStrokeWidth": 6, "maxStrokeWidth": 4}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{"panStep": -1}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{"historyLimit": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
