//! Numeric constants for the detection pipeline
//!
//! These constants pin physical limits and epsilon values used throughout
//! the sweep processing pipeline.

/// Maximum separation, in metres, at which two detected peaks are treated
/// as reflections of the same physical surface and merged into one.
pub const PEAK_MERGE_LIMIT_M: f32 = 0.005;

/// Minimum usable bin spacing on the distance axis, in metres.
/// Axes narrower than this per bin are degenerate.
pub const AXIS_SPACING_EPSILON: f32 = 1e-9;
