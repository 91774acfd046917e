//! Configuration for the Waterline level detector.
//!
//! Configuration is split the way the sensor API splits it: `SensorConfig`
//! describes the radar service session (range interval, update rate,
//! hardware averaging), `ProcessingConfig` describes the detector running
//! on top of it (sweep averaging, thresholding, peak sorting, history).
//!
//! A subset of `ProcessingConfig` is live-updatable between sweeps via
//! [`crate::processing::LevelProcessor::update_config`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Measurement range interval in metres.
///
/// # Parsing formats
/// - `0.1-0.6` - start and end distance in metres
/// - `10cm-60cm` - start and end distance in centimetres
///
/// # Example
/// ```
/// use waterline::config::RangeInterval;
///
/// let interval: RangeInterval = "0.1-0.6".parse().unwrap();
/// assert!((interval.span_m() - 0.5).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeInterval {
    /// Start of the measurement range in metres
    pub start_m: f32,
    /// End of the measurement range in metres
    pub end_m: f32,
}

impl RangeInterval {
    pub fn new(start_m: f32, end_m: f32) -> Self {
        Self { start_m, end_m }
    }

    /// Range span in metres
    pub fn span_m(&self) -> f32 {
        self.end_m - self.start_m
    }
}

impl Default for RangeInterval {
    fn default() -> Self {
        Self::new(0.1, 0.6)
    }
}

impl fmt::Display for RangeInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}-{:.2}m", self.start_m, self.end_m)
    }
}

impl FromStr for RangeInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| format!("invalid range interval: {}", s))?;

        let parse_distance = |part: &str| -> Result<f32, String> {
            let part = part.trim();
            if let Some(num) = part.strip_suffix("cm") {
                let cm: f32 = num
                    .trim()
                    .parse()
                    .map_err(|_| format!("invalid distance: {}", part))?;
                return Ok(cm / 100.0);
            }
            let num = part.strip_suffix('m').unwrap_or(part);
            num.trim()
                .parse()
                .map_err(|_| format!("invalid distance: {}", part))
        };

        let start_m = parse_distance(start)?;
        let end_m = parse_distance(end)?;
        if start_m < 0.0 {
            return Err("range start must be non-negative".to_string());
        }
        if end_m <= start_m {
            return Err("range end must be beyond range start".to_string());
        }
        Ok(Self::new(start_m, end_m))
    }
}

/// Sensor service configuration
///
/// Describes the envelope service session the detector consumes. The
/// session itself (transport, negotiation) is set up by the caller; the
/// detector only needs the parameters that shape the data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    /// Measurement range interval
    pub range_interval: RangeInterval,
    /// Target sweep rate in Hz; must be set before processing starts
    pub update_rate_hz: Option<f32>,
    /// Receiver gain (0-1 range)
    pub gain: f32,
    /// Number of hardware-accelerated samples per distance point (1-63)
    pub hw_accelerated_average_samples: u32,
    /// Distance-axis downsampling factor (must be 1, 2, or 4)
    pub downsampling_factor: u32,
    /// Whether the service normalizes the noise floor across the sweep
    pub noise_level_normalization: bool,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            range_interval: RangeInterval::default(),
            update_rate_hz: None,
            gain: 0.2,
            hw_accelerated_average_samples: 10,
            downsampling_factor: 1,
            noise_level_normalization: true,
        }
    }
}

/// Threshold computation mode
///
/// Only `Fixed` is implemented; `Recorded` and `Cfar` are declared so
/// configuration round-trips, and are rejected when the processor is
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum ThresholdType {
    /// Constant threshold level over the full sweep
    Fixed,
    /// Threshold recorded from a background measurement
    Recorded,
    /// Constant-false-alarm-rate threshold from local statistics
    Cfar,
}

/// Peak ranking policy
///
/// Decides which detected peak is reported as the main one. Ties keep
/// the post-merge ascending-distance order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum PeakSorting {
    /// Nearest peak first
    Closest,
    /// Largest envelope amplitude first
    Strongest,
    /// Largest amplitude compensated by r² spreading loss first
    StrongestReflector,
    /// Largest amplitude compensated by r spreading loss first
    StrongestFlatReflector,
}

/// Detector processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Number of sweeps averaged into one detection sweep (>= 1)
    pub nbr_average: f32,
    /// Threshold computation mode
    pub threshold_type: ThresholdType,
    /// Threshold level used by the fixed mode
    pub fixed_threshold_level: f32,
    /// Peak ranking policy
    pub peak_sorting: PeakSorting,
    /// Length of the detection history kept for display, in seconds
    pub history_length_s: f32,
    /// Display hint: show the first-distance-above-threshold track
    pub show_first_above_threshold: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            nbr_average: 5.0,
            threshold_type: ThresholdType::Fixed,
            fixed_threshold_level: 800.0,
            peak_sorting: PeakSorting::Strongest,
            history_length_s: 10.0,
            show_first_above_threshold: false,
        }
    }
}

/// Severity of a configuration alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    /// Processing cannot start with this setting
    Blocking,
    /// Processing works but the result quality may suffer
    Advisory,
}

/// A single finding from the pre-flight configuration check
#[derive(Debug, Clone)]
pub struct ConfigAlert {
    pub severity: AlertSeverity,
    pub field: &'static str,
    pub message: String,
}

impl ConfigAlert {
    fn blocking(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Blocking,
            field,
            message: message.into(),
        }
    }

    fn advisory(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Advisory,
            field,
            message: message.into(),
        }
    }
}

/// Pre-flight configuration check.
///
/// Returns alerts rather than erroring so a front end can surface all of
/// them at once. Blocking alerts become [`crate::error::DetectorError::Config`]
/// when the processor is constructed.
pub fn check_config(sensor: &SensorConfig, processing: &ProcessingConfig) -> Vec<ConfigAlert> {
    let mut alerts = Vec::new();

    match sensor.update_rate_hz {
        None => alerts.push(ConfigAlert::blocking("update_rate_hz", "Must be set")),
        Some(rate) if rate <= 0.0 => {
            alerts.push(ConfigAlert::blocking("update_rate_hz", "Must be positive"));
        }
        Some(_) => {}
    }

    if !matches!(sensor.downsampling_factor, 1 | 2 | 4) {
        alerts.push(ConfigAlert::blocking(
            "downsampling_factor",
            "Must be 1, 2, or 4",
        ));
    }

    if processing.nbr_average < 1.0 {
        alerts.push(ConfigAlert::blocking("nbr_average", "Must be at least 1"));
    }

    if processing.history_length_s < 0.0 {
        alerts.push(ConfigAlert::blocking(
            "history_length_s",
            "Must be non-negative",
        ));
    }

    if processing.threshold_type == ThresholdType::Fixed {
        if processing.fixed_threshold_level <= 0.0 {
            alerts.push(ConfigAlert::blocking(
                "fixed_threshold_level",
                "Must be positive",
            ));
        }
        if !sensor.noise_level_normalization {
            alerts.push(ConfigAlert::advisory(
                "noise_level_normalization",
                "Enabling noise level normalization is recommended with a fixed threshold",
            ));
        }
    }

    alerts
}
