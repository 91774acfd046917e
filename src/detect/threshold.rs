use crate::config::{ProcessingConfig, ThresholdType};
use crate::error::{DetectorError, Result};

/// Per-bin comparison levels, same length as the sweep.
///
/// Bins without a valid threshold are NaN ("masked"); no detection is
/// possible there. The fixed mode never masks, adaptive modes mask edge
/// bins that lack enough neighbours.
pub type ThresholdCurve = Vec<f32>;

/// Fixed-level threshold: the same configured constant in every bin.
#[derive(Debug)]
pub struct FixedThreshold {
    level: f32,
}

impl FixedThreshold {
    pub fn new(level: f32) -> Self {
        Self { level }
    }

    pub fn compute(&self, mean_sweep: &[f32]) -> ThresholdCurve {
        vec![self.level; mean_sweep.len()]
    }
}

/// Threshold computation, dispatched on the configured mode.
///
/// `Recorded` and `Cfar` are declared configuration modes without an
/// implementation here; selecting them fails at construction rather than
/// falling back to a default at detection time.
#[derive(Debug)]
pub enum ThresholdEngine {
    Fixed(FixedThreshold),
}

impl ThresholdEngine {
    pub fn new(config: &ProcessingConfig) -> Result<Self> {
        match config.threshold_type {
            ThresholdType::Fixed => Ok(Self::Fixed(FixedThreshold::new(
                config.fixed_threshold_level,
            ))),
            ThresholdType::Recorded => Err(DetectorError::Config(
                "recorded threshold mode is not implemented".to_string(),
            )),
            ThresholdType::Cfar => Err(DetectorError::Config(
                "CFAR threshold mode is not implemented".to_string(),
            )),
        }
    }

    /// Compute the threshold curve for a completed mean sweep.
    pub fn compute(&self, mean_sweep: &[f32]) -> ThresholdCurve {
        match self {
            Self::Fixed(threshold) => threshold.compute(mean_sweep),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessingConfig;

    #[test]
    fn test_fixed_threshold_is_constant() {
        let config = ProcessingConfig {
            fixed_threshold_level: 800.0,
            ..ProcessingConfig::default()
        };
        let engine = ThresholdEngine::new(&config).unwrap();

        let curve = engine.compute(&[0.0; 7]);
        assert_eq!(curve.len(), 7);
        assert!(curve.iter().all(|&t| t == 800.0));
    }

    #[test]
    fn test_unimplemented_modes_rejected() {
        for mode in [ThresholdType::Recorded, ThresholdType::Cfar] {
            let config = ProcessingConfig {
                threshold_type: mode,
                ..ProcessingConfig::default()
            };
            assert!(ThresholdEngine::new(&config).is_err());
        }
    }
}
