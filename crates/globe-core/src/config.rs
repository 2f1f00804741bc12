//! Session configuration.
//!
//! Every field here is session-defining: changing any of them means tearing the
//! session down and building a new one.

use crate::animation::MotionParams;
use crate::constants::*;
use crate::host::Marker;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub long: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub render_size: u32,
    pub device_pixel_ratio: u32,
    pub focus_duration_ms: u64,
    pub idle_angular_velocity: f64,
    pub smoothing_factor: f64,
    pub markers: Vec<GeoPoint>,
    pub theme: Theme,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            render_size: DEFAULT_RENDER_SIZE,
            device_pixel_ratio: DEFAULT_DEVICE_PIXEL_RATIO,
            focus_duration_ms: DEFAULT_FOCUS_DURATION_MS,
            idle_angular_velocity: DEFAULT_IDLE_ANGULAR_VELOCITY,
            smoothing_factor: DEFAULT_SMOOTHING_FACTOR,
            markers: Vec::new(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid globe config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl SessionConfig {
    /// Parse a camelCase JSON object; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_size == 0 {
            return Err(ConfigError::Invalid {
                field: "renderSize",
                reason: "must be at least 1 pixel",
            });
        }
        if self.device_pixel_ratio == 0 {
            return Err(ConfigError::Invalid {
                field: "devicePixelRatio",
                reason: "must be at least 1",
            });
        }
        if !self.idle_angular_velocity.is_finite() {
            return Err(ConfigError::Invalid {
                field: "idleAngularVelocity",
                reason: "must be a finite number",
            });
        }
        // idle rotation never reverses
        if self.idle_angular_velocity < 0.0 {
            return Err(ConfigError::Invalid {
                field: "idleAngularVelocity",
                reason: "must not be negative",
            });
        }
        if !(self.smoothing_factor > 0.0 && self.smoothing_factor <= 1.0) {
            return Err(ConfigError::Invalid {
                field: "smoothingFactor",
                reason: "must lie in (0, 1]",
            });
        }
        Ok(())
    }

    pub fn focus_duration(&self) -> Duration {
        Duration::from_millis(self.focus_duration_ms)
    }

    pub fn motion(&self) -> MotionParams {
        MotionParams {
            idle_step: self.idle_angular_velocity,
            smoothing: self.smoothing_factor,
        }
    }

    /// Backing-store dimension handed to the host each frame.
    pub fn render_dimension(&self) -> u32 {
        self.render_size.saturating_mul(self.device_pixel_ratio)
    }

    pub fn render_markers(&self) -> Vec<Marker> {
        self.markers
            .iter()
            .map(|p| Marker {
                location: [p.lat, p.long],
                size: MARKER_SIZE,
            })
            .collect()
    }
}
