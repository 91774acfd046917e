use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::f32::consts::PI;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct NoiseConfig {
    pub seed: Option<u64>,
    pub additive: Option<AdditiveNoiseConfig>,
    pub drift: Option<AmplitudeDriftConfig>,
}

impl NoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_awgn(mut self, std_dev: f32) -> Self {
        self.additive = Some(AdditiveNoiseConfig { std_dev });
        self
    }

    pub fn with_drift(mut self, fraction: f32, period_sweeps: f32) -> Self {
        self.drift = Some(AmplitudeDriftConfig {
            fraction,
            period_sweeps,
        });
        self
    }
}

/// Additive white Gaussian noise on the envelope amplitudes.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AdditiveNoiseConfig {
    pub std_dev: f32,
}

/// Slow sinusoidal gain drift across sweeps, emulating temperature or
/// supply-voltage wander in the receiver chain.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AmplitudeDriftConfig {
    /// Peak gain deviation as a fraction of unity
    pub fraction: f32,
    /// Drift period in sweeps
    pub period_sweeps: f32,
}

fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Applies configured impairments to synthetic sweeps.
pub struct NoiseGenerator {
    config: NoiseConfig,
    rng: ChaCha8Rng,
}

impl NoiseGenerator {
    pub fn new(config: NoiseConfig) -> Self {
        let rng = create_rng(config.seed);
        Self { config, rng }
    }

    /// Impair one sweep in place.
    ///
    /// `sweep_index` drives the drift phase so a regenerated sequence is
    /// reproducible from the same seed. Envelope amplitudes stay
    /// non-negative.
    pub fn apply(&mut self, sweep: &mut [f32], sweep_index: u64) {
        if let Some(ref drift) = self.config.drift {
            let phase = 2.0 * PI * (sweep_index as f32) / drift.period_sweeps;
            let gain = 1.0 + drift.fraction * phase.sin();
            for sample in sweep.iter_mut() {
                *sample *= gain;
            }
        }

        if let Some(ref additive) = self.config.additive {
            let normal = match Normal::new(0.0, additive.std_dev as f64) {
                Ok(normal) => normal,
                Err(_) => return,
            };
            for sample in sweep.iter_mut() {
                *sample = (*sample + normal.sample(&mut self.rng) as f32).max(0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_noise_is_passthrough() {
        let mut generator = NoiseGenerator::new(NoiseConfig::default());
        let mut sweep = vec![1.0, 2.0, 3.0];
        generator.apply(&mut sweep, 0);
        assert_eq!(sweep, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_seeded_noise_is_reproducible() {
        let config = NoiseConfig::default().with_seed(42).with_awgn(10.0);
        let mut a = NoiseGenerator::new(config.clone());
        let mut b = NoiseGenerator::new(config);

        let mut sweep_a = vec![100.0; 16];
        let mut sweep_b = vec![100.0; 16];
        a.apply(&mut sweep_a, 0);
        b.apply(&mut sweep_b, 0);
        assert_eq!(sweep_a, sweep_b);
    }

    #[test]
    fn test_noise_keeps_amplitudes_non_negative() {
        let config = NoiseConfig::default().with_seed(7).with_awgn(100.0);
        let mut generator = NoiseGenerator::new(config);

        let mut sweep = vec![0.0; 256];
        generator.apply(&mut sweep, 0);
        assert!(sweep.iter().all(|&a| a >= 0.0));
    }

    #[test]
    fn test_drift_modulates_gain() {
        let config = NoiseConfig::default().with_drift(0.5, 4.0);
        let mut generator = NoiseGenerator::new(config);

        // Quarter period: sin = 1, gain = 1.5
        let mut sweep = vec![100.0];
        generator.apply(&mut sweep, 1);
        assert!((sweep[0] - 150.0).abs() < 1e-3);
    }
}
