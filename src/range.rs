//! Distance axis shared by every stage of the detection pipeline.

use crate::constants::AXIS_SPACING_EPSILON;
use crate::error::{DetectorError, Result};

/// Fixed distance axis mapping sweep bins to physical distances.
///
/// Bin `i` maps to `start + i * spacing` metres. The axis is computed once
/// from the sensor range interval and the session-reported bin count, and
/// shared read-only by all pipeline stages.
#[derive(Debug, Clone)]
pub struct RangeAxis {
    distances: Vec<f32>,
    spacing: f32,
}

impl RangeAxis {
    /// Build a linearly spaced axis over `[start_m, end_m]` with `num_bins` points.
    ///
    /// # Arguments
    /// * `start_m` - Distance of the first bin in metres
    /// * `end_m` - Distance of the last bin in metres
    /// * `num_bins` - Number of distance bins reported by the session
    pub fn new(start_m: f32, end_m: f32, num_bins: usize) -> Result<Self> {
        if num_bins < 2 {
            return Err(DetectorError::Config(format!(
                "range axis needs at least 2 bins, got {}",
                num_bins
            )));
        }
        let spacing = (end_m - start_m) / (num_bins - 1) as f32;
        if !spacing.is_finite() || spacing < AXIS_SPACING_EPSILON {
            return Err(DetectorError::Config(format!(
                "range interval {}..{} m is too narrow for {} bins",
                start_m, end_m, num_bins
            )));
        }

        let distances = (0..num_bins)
            .map(|i| start_m + i as f32 * spacing)
            .collect();

        Ok(Self { distances, spacing })
    }

    /// Number of distance bins.
    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }

    /// Bin spacing in metres.
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Physical distance of bin `i` in metres.
    ///
    /// Panics if `i` is out of range; peak indices are produced by the
    /// pipeline and always lie on the axis.
    pub fn distance(&self, i: usize) -> f32 {
        self.distances[i]
    }

    /// All bin distances in metres, ascending.
    pub fn distances(&self) -> &[f32] {
        &self.distances
    }
}
