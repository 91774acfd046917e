//! Peak and threshold-crossing scans over a mean sweep.
//!
//! Both scans compare a sweep against a per-bin threshold curve. Masked
//! (NaN) threshold bins never compare as crossed, so masked regions fall
//! out of both scans without special-casing.

/// Find the first bin where the sweep exceeds its threshold.
///
/// Scans from bin 0. Returns `None` when the threshold is entirely masked
/// or never exceeded. Used for tank monitoring where the direct leakage
/// swamps any well-shaped peak.
pub fn find_first_crossing(sweep: &[f32], threshold: &[f32]) -> Option<usize> {
    if threshold.iter().all(|t| t.is_nan()) {
        return None;
    }

    sweep
        .iter()
        .zip(threshold)
        .position(|(&sample, &level)| sample > level)
}

/// Find local maxima strictly above threshold.
///
/// A peak is a single point or a plateau of equal points, all above their
/// threshold, whose closest neighbours on both sides are lower and also
/// above their threshold, so at least 3 consecutive in-range bins are
/// needed. For a plateau the reported bin is its midpoint, biased toward
/// the upper end when the plateau length is even.
///
/// Returns peak bin indices in ascending order.
pub fn find_peaks(sweep: &[f32], threshold: &[f32]) -> Vec<usize> {
    let n = sweep.len();
    if n < 3 || threshold.iter().all(|t| t.is_nan()) {
        return Vec::new();
    }

    let mut found_peaks = Vec::new();

    let mut d = 1;
    while d < n - 1 {
        // Skip forward while the threshold has not started yet
        if threshold[d - 1].is_nan() {
            d += 1;
            continue;
        }

        // Stop when the threshold ends
        if threshold[d + 1].is_nan() {
            break;
        }

        // If the current point is not over threshold, the next cannot start a peak
        if sweep[d] <= threshold[d] {
            d += 2;
            continue;
        }

        if sweep[d - 1] <= threshold[d - 1] {
            d += 1;
            continue;
        }

        // The left flank must be strictly rising
        if sweep[d - 1] >= sweep[d] {
            d += 1;
            continue;
        }

        // Walk the plateau starting at d; it is a peak only if the walk
        // ends on a strictly lower in-range point over its threshold.
        let mut d_upper = d + 1;
        loop {
            if d_upper >= n - 1 {
                break;
            }

            if threshold[d_upper].is_nan() {
                break;
            }

            if sweep[d_upper] <= threshold[d_upper] {
                break;
            }

            if sweep[d_upper] > sweep[d] {
                // The true peak lies further right
                break;
            }
            if sweep[d_upper] < sweep[d] {
                let delta = d_upper - d;
                found_peaks.push(d + (delta - 1).div_ceil(2));
                break;
            }
            // Equal: plateau extends
            d_upper += 1;
        }

        // Resume past the examined window, never re-scanning it
        d = d_upper;
    }

    found_peaks
}
