//! Greedy merging of peaks that belong to the same physical reflector.

/// Collapse nearby peaks into single representative peaks.
///
/// Repeatedly finds the peak with the most neighbours within
/// `merge_radius_bins` (strictly less than, counting itself; ties go to
/// the lowest index), replaces that cluster with one peak at the rounded
/// mean of its members, and re-sorts. Stops when no peak has a neighbour
/// besides itself.
///
/// Intentionally quadratic per round: the peak count is tiny (typically
/// <= 3) and the greedy order and tie-breaks define the output, so this
/// must not be swapped for a cleverer clustering.
///
/// Returns merged peak indices in ascending order.
pub fn merge_peaks(peak_indices: &[usize], merge_radius_bins: usize) -> Vec<usize> {
    let mut merged: Vec<usize> = peak_indices.to_vec();

    loop {
        if merged.is_empty() {
            break;
        }

        let neighbor_counts: Vec<usize> = merged
            .iter()
            .map(|&p| {
                merged
                    .iter()
                    .filter(|&&q| p.abs_diff(q) < merge_radius_bins)
                    .count()
            })
            .collect();

        // First peak with the maximum neighbour count
        let max_count = neighbor_counts.iter().copied().max().unwrap_or(0);
        if max_count <= 1 {
            break;
        }
        let i_peak = neighbor_counts
            .iter()
            .position(|&c| c == max_count)
            .unwrap_or(0);

        let peak = merged[i_peak];
        let cluster: Vec<usize> = merged
            .iter()
            .copied()
            .filter(|&q| q.abs_diff(peak) < merge_radius_bins)
            .collect();
        merged.retain(|&q| q.abs_diff(peak) >= merge_radius_bins);

        let mean = cluster.iter().sum::<usize>() as f32 / cluster.len() as f32;
        merged.push(mean.round() as usize);

        merged.sort_unstable();
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_peaks_collapse() {
        assert_eq!(merge_peaks(&[10, 11], 3), vec![11]);
    }

    #[test]
    fn test_distant_peaks_survive() {
        assert_eq!(merge_peaks(&[10, 20], 3), vec![10, 20]);
    }

    #[test]
    fn test_cluster_merges_to_mean() {
        // All three within radius of 21: mean 21
        assert_eq!(merge_peaks(&[20, 21, 22], 3), vec![21]);
    }

    #[test]
    fn test_densest_cluster_merges_first() {
        // 30/31/32 outnumber 10/11; after both rounds two peaks remain
        assert_eq!(merge_peaks(&[10, 11, 30, 31, 32], 3), vec![11, 31]);
    }

    #[test]
    fn test_zero_radius_is_a_no_op() {
        assert_eq!(merge_peaks(&[5, 6, 7], 0), vec![5, 6, 7]);
    }

    #[test]
    fn test_single_peak_unchanged() {
        assert_eq!(merge_peaks(&[42], 3), vec![42]);
    }

    #[test]
    fn test_chain_merges_iteratively() {
        // 10 and 12 are within radius of 11 but not of each other;
        // the middle peak has the most neighbours and absorbs both.
        assert_eq!(merge_peaks(&[10, 11, 12], 2), vec![11]);
    }
}
