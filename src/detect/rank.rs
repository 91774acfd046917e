use crate::config::PeakSorting;
use crate::range::RangeAxis;

/// Order merged peaks best-first according to the configured policy.
///
/// The sort is stable, so equal keys keep the post-merge ascending-index
/// order.
pub fn sort_peaks(
    peak_indices: &[usize],
    sweep: &[f32],
    axis: &RangeAxis,
    policy: PeakSorting,
) -> Vec<usize> {
    let key = |i: usize| -> f32 {
        let amplitude = sweep[i];
        let r = axis.distance(i);
        match policy {
            PeakSorting::Closest => r,
            PeakSorting::Strongest => -amplitude,
            PeakSorting::StrongestReflector => -amplitude * r * r,
            PeakSorting::StrongestFlatReflector => -amplitude * r,
        }
    };

    let mut ranked = peak_indices.to_vec();
    ranked.sort_by(|&a, &b| key(a).total_cmp(&key(b)));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1 m to 3 m in 1 m steps
    fn axis() -> RangeAxis {
        RangeAxis::new(1.0, 3.0, 3).unwrap()
    }

    #[test]
    fn test_closest_ranks_near_peak_first() {
        let sweep = vec![100.0, 100.0, 100.0];
        assert_eq!(
            sort_peaks(&[0, 1], &sweep, &axis(), PeakSorting::Closest),
            vec![0, 1]
        );
    }

    #[test]
    fn test_strongest_ranks_by_amplitude() {
        let sweep = vec![50.0, 200.0, 100.0];
        assert_eq!(
            sort_peaks(&[0, 1, 2], &sweep, &axis(), PeakSorting::Strongest),
            vec![1, 2, 0]
        );
    }

    #[test]
    fn test_strongest_reflector_compensates_spreading() {
        // Equal amplitudes at 1 m and 2 m: 100*4 beats 100*1
        let sweep = vec![100.0, 100.0, 0.0];
        assert_eq!(
            sort_peaks(&[0, 1], &sweep, &axis(), PeakSorting::StrongestReflector),
            vec![1, 0]
        );
    }

    #[test]
    fn test_strongest_flat_reflector() {
        // 60*1 < 40*2, so the farther peak wins
        let sweep = vec![60.0, 40.0, 0.0];
        assert_eq!(
            sort_peaks(
                &[0, 1],
                &sweep,
                &axis(),
                PeakSorting::StrongestFlatReflector
            ),
            vec![1, 0]
        );
    }

    #[test]
    fn test_ties_keep_input_order() {
        let sweep = vec![100.0, 100.0, 100.0];
        assert_eq!(
            sort_peaks(&[0, 1, 2], &sweep, &axis(), PeakSorting::Strongest),
            vec![0, 1, 2]
        );
    }
}
