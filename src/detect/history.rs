use std::collections::VecDeque;

use serde::Serialize;

/// One recorded detection: the sweep it was seen on and its distance.
#[derive(Debug, Clone, Copy)]
pub struct HistoryEntry {
    pub sweep_index: u64,
    pub distance_m: f32,
}

/// A history entry expressed relative to the current sweep, for display.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HistoryPoint {
    /// Seconds before now (zero or negative)
    pub offset_s: f32,
    /// Detected distance in metres
    pub distance_m: f32,
}

/// Time-windowed sequence of detections.
///
/// Entries are appended at the tail with non-decreasing sweep indices and
/// evicted from the head once they age past the horizon, so the sequence
/// is always sorted by sweep index.
#[derive(Debug, Default)]
pub struct PeakHistory {
    entries: VecDeque<HistoryEntry>,
}

impl PeakHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, sweep_index: u64, distance_m: f32) {
        self.entries.push_back(HistoryEntry {
            sweep_index,
            distance_m,
        });
    }

    /// Drop entries older than the horizon.
    ///
    /// An entry exactly at the horizon boundary is retained.
    pub fn evict(&mut self, current_sweep_index: u64, horizon_sweeps: f32) {
        while let Some(head) = self.entries.front() {
            if (current_sweep_index - head.sweep_index) as f32 > horizon_sweeps {
                self.entries.pop_front();
            } else {
                break;
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Express the history as (seconds-from-now, distance) display points.
    pub fn relative_to(&self, current_sweep_index: u64, update_rate_hz: f32) -> Vec<HistoryPoint> {
        self.entries
            .iter()
            .map(|entry| HistoryPoint {
                offset_s: (entry.sweep_index as f64 - current_sweep_index as f64) as f32
                    / update_rate_hz,
                distance_m: entry.distance_m,
            })
            .collect()
    }
}

/// The three independent detection tracks kept for display.
#[derive(Debug, Default)]
pub struct DetectionHistory {
    pub main_peak: PeakHistory,
    pub minor_peaks: PeakHistory,
    pub first_crossing: PeakHistory,
}

impl DetectionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evict aged entries from every track independently.
    pub fn evict_all(&mut self, current_sweep_index: u64, horizon_sweeps: f32) {
        self.main_peak.evict(current_sweep_index, horizon_sweeps);
        self.minor_peaks.evict(current_sweep_index, horizon_sweeps);
        self.first_crossing.evict(current_sweep_index, horizon_sweeps);
    }
}
