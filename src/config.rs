//! Runtime configuration supplied by the host page as JSON.
//!
//! Every field is optional; missing fields take the defaults in
//! [`crate::consts`]. An empty object (`{}`) is a valid config.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::consts::{DEFAULT_HEADER_HEIGHT, DEFAULT_MARGIN_X, DEFAULT_MARGIN_Y, DEFAULT_TICK_INTERVAL_MS};
use crate::error::ConfigError;

/// How the hour hand angle is derived from a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HourHandFormula {
    /// `floor(((h mod 12) + 1 - 12) * π/6)`: floors the angle in radians and
    /// runs eleven hours behind. Kept as the default for visual parity with
    /// earlier builds of the tool.
    #[default]
    Legacy,
    /// `floor(h mod 12) * π/6`: one twelfth of a turn per whole hour.
    Standard,
}

/// Which scan-conversion drives straight segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineAlgorithm {
    /// Integer Bresenham, far endpoint excluded.
    #[default]
    Bresenham,
    /// Slope-intercept `y = floor(x * m + b)`, both endpoints included.
    Polynomial,
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SketchConfig {
    /// Height of the page chrome above the canvas; subtracted from page-y.
    pub header_height: i32,
    /// Horizontal window space not given to the canvas.
    pub margin_x: u32,
    /// Vertical window space below the canvas.
    pub margin_y: u32,
    /// Clock animation period in milliseconds.
    pub tick_interval_ms: u32,
    pub hour_hand: HourHandFormula,
    pub line_algorithm: LineAlgorithm,
    /// Browser console log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            margin_x: DEFAULT_MARGIN_X,
            margin_y: DEFAULT_MARGIN_Y,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            hour_hand: HourHandFormula::default(),
            line_algorithm: LineAlgorithm::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl SketchConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or wrongly typed
    /// fields, and [`ConfigError::Invalid`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("tick_interval_ms must be positive"));
        }
        if self.header_height < 0 {
            return Err(ConfigError::Invalid("header_height must not be negative"));
        }
        if !matches!(self.log_level.as_str(), "error" | "warn" | "info" | "debug" | "trace") {
            return Err(ConfigError::Invalid("log_level must be one of error, warn, info, debug, trace"));
        }
        Ok(())
    }

    /// Canvas size for a window of the given inner size, in CSS pixels.
    ///
    /// Never returns a zero dimension.
    #[must_use]
    pub fn canvas_size(&self, inner_width: u32, inner_height: u32) -> (u32, u32) {
        let header = u32::try_from(self.header_height).unwrap_or(0);
        let width = inner_width.saturating_sub(self.margin_x).max(1);
        let height = inner_height.saturating_sub(header).saturating_sub(self.margin_y).max(1);
        (width, height)
    }
}
