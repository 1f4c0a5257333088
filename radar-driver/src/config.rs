use crate::constants::{
    DEFAULT_CHUNK_SIZE, DEFAULT_FRAME_PAUSE_MS, DEFAULT_MAX_RANGE, DEFAULT_SWEEP_CAPACITY,
};
use crate::error::RadarError;
use crate::render::SweepIndicator;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Static settings of a receiving session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RadarConfig {
    /// Number of points held before the sweep is reset.
    pub sweep_capacity: usize,
    /// Outer radius of the display in cm. Radial lines end here.
    pub max_range: f64,
    /// Maximum number of bytes taken per read.
    pub chunk_size: usize,
    /// Pause after each rendered frame.
    pub frame_pause: Duration,
    /// Read timeout of the connection. `None` blocks until data arrives.
    pub read_timeout: Option<Duration>,
    pub sweep_indicator: SweepIndicator,
}

impl Default for RadarConfig {
    fn default() -> Self {
        RadarConfig {
            sweep_capacity: DEFAULT_SWEEP_CAPACITY,
            max_range: DEFAULT_MAX_RANGE,
            chunk_size: DEFAULT_CHUNK_SIZE,
            frame_pause: Duration::from_millis(DEFAULT_FRAME_PAUSE_MS),
            read_timeout: None,
            sweep_indicator: SweepIndicator::default(),
        }
    }
}

impl RadarConfig {
    pub fn validate(&self) -> Result<(), RadarError> {
        if self.sweep_capacity == 0 {
            return Err(RadarError::InvalidConfig(
                "Sweep capacity must be at least one point.".to_string(),
            ));
        }
        if !self.max_range.is_finite() || self.max_range <= 0. {
            return Err(RadarError::InvalidConfig(format!(
                "Maximum range must be a positive number. Observed = {}.",
                self.max_range
            )));
        }
        if self.chunk_size == 0 {
            return Err(RadarError::InvalidConfig(
                "Read chunk size must be at least one byte.".to_string(),
            ));
        }
        if self.read_timeout == Some(Duration::ZERO) {
            // a zero timeout is rejected by the socket APIs
            return Err(RadarError::InvalidConfig(
                "Read timeout must be longer than zero.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = RadarConfig::default();
        assert_eq!(config.sweep_capacity, 19);
        assert_eq!(config.max_range, 100.);
        assert_eq!(config.chunk_size, 1024);
        assert_eq!(config.frame_pause, Duration::from_millis(10));
        assert_eq!(config.read_timeout, None);
        assert_eq!(config.sweep_indicator, SweepIndicator::Fixed(90.));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        let invalid = [
            RadarConfig {
                sweep_capacity: 0,
                ..Default::default()
            },
            RadarConfig {
                max_range: 0.,
                ..Default::default()
            },
            RadarConfig {
                max_range: f64::NAN,
                ..Default::default()
            },
            RadarConfig {
                chunk_size: 0,
                ..Default::default()
            },
            RadarConfig {
                read_timeout: Some(Duration::ZERO),
                ..Default::default()
            },
        ];
        for config in invalid {
            assert!(matches!(
                config.validate(),
                Err(RadarError::InvalidConfig(_))
            ));
        }

        let config = RadarConfig {
            sweep_capacity: 18,
            read_timeout: Some(Duration::from_millis(250)),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
