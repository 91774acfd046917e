mod noise;
mod signal;

pub use noise::{
    AdditiveNoiseConfig, AmplitudeDriftConfig, NoiseConfig, NoiseGenerator,
};
pub use signal::{
    DEFAULT_PULSE_WIDTH_M, Reflector, generate_envelope_sweep,
    generate_envelope_sweep_with_leakage,
};
