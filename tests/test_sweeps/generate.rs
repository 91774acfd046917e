/// Build a sweep with a single triangular pulse.
///
/// The pulse rises over `half_width` bins to `peak_amplitude` at
/// `center`, then falls symmetrically. The rest of the sweep sits at
/// `base`.
pub fn pulse_sweep(
    num_bins: usize,
    center: usize,
    half_width: usize,
    peak_amplitude: f32,
    base: f32,
) -> Vec<f32> {
    (0..num_bins)
        .map(|i| {
            let offset = i.abs_diff(center);
            if offset <= half_width {
                let fraction = 1.0 - offset as f32 / (half_width + 1) as f32;
                base + (peak_amplitude - base) * fraction
            } else {
                base
            }
        })
        .collect()
}

/// Build a sweep with a flat-topped pulse of `width` bins starting at
/// `start`, with single lower shoulder bins on each side.
pub fn plateau_sweep(
    num_bins: usize,
    start: usize,
    width: usize,
    amplitude: f32,
    shoulder: f32,
) -> Vec<f32> {
    let mut sweep = vec![0.0; num_bins];
    sweep[start - 1] = shoulder;
    for bin in sweep.iter_mut().skip(start).take(width) {
        *bin = amplitude;
    }
    sweep[start + width] = shoulder;
    sweep
}
