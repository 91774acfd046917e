use crate::range::RangeAxis;

/// Width of a synthetic envelope pulse in metres (standard deviation of
/// its Gaussian shape), roughly matching a short-profile radar pulse.
pub const DEFAULT_PULSE_WIDTH_M: f32 = 0.02;

/// Decay length of the synthetic direct leakage in metres.
pub const LEAKAGE_DECAY_M: f32 = 0.05;

/// A synthetic point reflector in the measurement range.
#[derive(Debug, Clone, Copy)]
pub struct Reflector {
    pub distance_m: f32,
    pub amplitude: f32,
    pub width_m: f32,
}

impl Reflector {
    pub fn new(distance_m: f32, amplitude: f32) -> Self {
        Self {
            distance_m,
            amplitude,
            width_m: DEFAULT_PULSE_WIDTH_M,
        }
    }
}

/// Generate a clean synthetic envelope sweep.
///
/// Each reflector contributes a Gaussian-shaped pulse centred at its
/// distance.
pub fn generate_envelope_sweep(axis: &RangeAxis, reflectors: &[Reflector]) -> Vec<f32> {
    generate_envelope_sweep_with_leakage(axis, reflectors, 0.0)
}

/// Generate a synthetic envelope sweep with direct leakage.
///
/// The leakage is an exponential tail decaying from the range start, the
/// way the transmitter bleeds into the first bins of a real measurement.
pub fn generate_envelope_sweep_with_leakage(
    axis: &RangeAxis,
    reflectors: &[Reflector],
    leakage_amplitude: f32,
) -> Vec<f32> {
    let start = axis.distance(0);
    axis.distances()
        .iter()
        .map(|&r| {
            let mut amplitude = leakage_amplitude * (-(r - start) / LEAKAGE_DECAY_M).exp();
            for reflector in reflectors {
                let delta = r - reflector.distance_m;
                amplitude += reflector.amplitude
                    * (-(delta * delta) / (2.0 * reflector.width_m * reflector.width_m)).exp();
            }
            amplitude
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_peaks_at_reflector() {
        let axis = RangeAxis::new(0.1, 0.6, 101).unwrap();
        let sweep = generate_envelope_sweep(&axis, &[Reflector::new(0.35, 1000.0)]);

        let peak_bin = sweep
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
            .unwrap();
        assert!((axis.distance(peak_bin) - 0.35).abs() < axis.spacing());
    }

    #[test]
    fn test_leakage_decays_from_range_start() {
        let axis = RangeAxis::new(0.1, 0.6, 101).unwrap();
        let sweep = generate_envelope_sweep_with_leakage(&axis, &[], 500.0);

        assert!((sweep[0] - 500.0).abs() < 1.0);
        assert!(sweep[0] > sweep[10]);
        assert!(sweep[10] > sweep[50]);
    }

    #[test]
    fn test_empty_scene_is_silent() {
        let axis = RangeAxis::new(0.1, 0.6, 51).unwrap();
        let sweep = generate_envelope_sweep(&axis, &[]);
        assert!(sweep.iter().all(|&a| a == 0.0));
    }
}
