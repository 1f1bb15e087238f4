use serde::{Deserialize, Serialize};

use crate::api::error::{ConfigError, TraceError};

/// Hit-testing distances for guided tracing, in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// Radius around a stroke's first guide point that accepts a pointer-down.
    pub start: f32,
    /// Radius around the target guide point that counts as reaching it.
    pub hit: f32,
    /// Maximum distance from the active segment before a stroke attempt is dropped.
    pub stray: f32,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            start: 40.0,
            hit: 28.0,
            stray: 30.0,
        }
    }
}

impl Tolerances {
    /// Check that every tolerance is a positive finite distance and that the
    /// start tolerance is at least as forgiving as the hit tolerance.
    pub fn validate(&self) -> Result<(), TraceError> {
        for (name, value) in [("start", self.start), ("hit", self.hit), ("stray", self.stray)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TraceError::InvalidTolerance { name, value });
            }
        }
        if self.start < self.hit {
            return Err(TraceError::InvalidTolerance {
                name: "start",
                value: self.start,
            });
        }
        Ok(())
    }
}

/// Settings for the pixel-coverage completion model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverageConfig {
    /// Radius of the disk stamped around every pointer sample (grid cells).
    pub stamp_radius: i32,
    /// Coverage fraction (0.0 - 1.0) that triggers the celebration.
    pub threshold: f32,
    /// How long the celebration stays up, in seconds.
    pub celebration_secs: f32,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            stamp_radius: 5,
            threshold: 0.40,
            celebration_secs: 5.0,
        }
    }
}

/// Largest accepted stamp radius, in grid cells.
pub const MAX_STAMP_RADIUS: i32 = 64;

/// Top-level tracer configuration. Every field has a default, so a partial
/// (or empty) JSON object is valid input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    pub tolerances: Tolerances,
    pub coverage: CoverageConfig,
    /// Delay between completing a letter and loading the next one (seconds).
    pub auto_advance_secs: f32,
    /// Lifetime of a toast notification (seconds).
    pub toast_secs: f32,
    /// Canvas width in canvas units (default: 400).
    pub canvas_width: f32,
    /// Canvas height in canvas units (default: 400).
    pub canvas_height: f32,
    /// Maximum number of wire events exported per tick (default: 32).
    pub max_events: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            tolerances: Tolerances::default(),
            coverage: CoverageConfig::default(),
            auto_advance_secs: 1.5,
            toast_secs: 3.0,
            canvas_width: 400.0,
            canvas_height: 400.0,
            max_events: 32,
        }
    }
}

impl TracerConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tolerances.validate()?;

        if !(0..=MAX_STAMP_RADIUS).contains(&self.coverage.stamp_radius) {
            return Err(ConfigError::OutOfRange {
                field: "coverage.stamp_radius",
                value: self.coverage.stamp_radius as f32,
            });
        }
        let threshold = self.coverage.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(ConfigError::OutOfRange {
                field: "coverage.threshold",
                value: threshold,
            });
        }

        let durations = [
            ("coverage.celebration_secs", self.coverage.celebration_secs),
            ("auto_advance_secs", self.auto_advance_secs),
            ("toast_secs", self.toast_secs),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        for (field, value) in [("canvas_width", self.canvas_width), ("canvas_height", self.canvas_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }

        Ok(())
    }
}
