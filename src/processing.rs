use serde::{Deserialize, Serialize};

use crate::config::{AlertSeverity, PeakSorting, ProcessingConfig, SensorConfig, check_config};
use crate::constants::PEAK_MERGE_LIMIT_M;
use crate::detect::{
    DetectionHistory, HistoryPoint, SweepAverager, ThresholdCurve, ThresholdEngine,
    find_first_crossing, find_peaks, merge_peaks, sort_peaks,
};
use crate::error::{DetectorError, Result};
use crate::range::RangeAxis;

/// Optional per-sweep metadata from the transport layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SweepInfo {
    /// Transport sequence number, if the client provides one
    pub sequence_number: Option<u64>,
    /// Set when the receiver clipped during this sweep
    #[serde(default)]
    pub data_saturated: bool,
}

/// Immutable per-sweep result snapshot.
///
/// `last_mean_sweep` and `threshold` are carried from the most recent
/// averaging emission and are stale between emissions; both are absent
/// before the first emission. `found_peaks` and `first_crossing` are
/// present only on emission sweeps.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// The raw sweep fed to this call
    pub sweep: Vec<f32>,
    /// Most recently completed mean sweep
    pub last_mean_sweep: Option<Vec<f32>>,
    /// Threshold curve from the most recent emission
    pub threshold: Option<ThresholdCurve>,
    /// Main-peak detections within the history horizon
    pub main_peak_history: Vec<HistoryPoint>,
    /// Minor-peak detections within the history horizon
    pub minor_peaks_history: Vec<HistoryPoint>,
    /// First-above-threshold detections within the history horizon
    pub first_crossing_history: Vec<HistoryPoint>,
    /// Index of this sweep (increments by one per call)
    pub sweep_index: u64,
    /// Ranked peak bins, best first; `Some` only on emission sweeps
    pub found_peaks: Option<Vec<usize>>,
    /// First bin above threshold; `Some` only on emission sweeps with a crossing
    pub first_crossing: Option<usize>,
}

impl SweepOutcome {
    /// Distance of the best-ranked peak in metres, if this was an
    /// emission sweep with at least one detection.
    pub fn main_peak_distance_m(&self, axis: &RangeAxis) -> Option<f32> {
        self.found_peaks
            .as_ref()
            .and_then(|peaks| peaks.first())
            .map(|&bin| axis.distance(bin))
    }
}

/// Streaming water-level detector.
///
/// Owns the full pipeline state: the sweep averager, threshold engine,
/// detection history, and the monotonic sweep counter. One instance per
/// session; `advance` is called once per incoming sweep, in order, from a
/// single thread of control.
#[derive(Debug)]
pub struct LevelProcessor {
    axis: RangeAxis,
    averager: SweepAverager,
    threshold_engine: ThresholdEngine,
    peak_sorting: PeakSorting,
    merge_radius_bins: usize,
    history: DetectionHistory,
    history_length_s: f32,
    update_rate_hz: f32,
    last_mean_sweep: Option<Vec<f32>>,
    threshold: Option<ThresholdCurve>,
    sweep_index: u64,
}

impl LevelProcessor {
    /// Build a processor for a session.
    ///
    /// `num_bins` is the per-sweep data length reported by the session.
    /// Fails on any blocking configuration alert, an unimplemented
    /// threshold mode, or a degenerate range axis.
    pub fn new(
        sensor: &SensorConfig,
        processing: &ProcessingConfig,
        num_bins: usize,
    ) -> Result<Self> {
        let blocking: Vec<String> = check_config(sensor, processing)
            .into_iter()
            .filter(|alert| alert.severity == AlertSeverity::Blocking)
            .map(|alert| format!("{}: {}", alert.field, alert.message))
            .collect();
        if !blocking.is_empty() {
            return Err(DetectorError::Config(blocking.join("; ")));
        }

        let update_rate_hz = sensor
            .update_rate_hz
            .ok_or_else(|| DetectorError::Config("update_rate_hz: Must be set".to_string()))?;

        let axis = RangeAxis::new(
            sensor.range_interval.start_m,
            sensor.range_interval.end_m,
            num_bins,
        )?;
        let threshold_engine = ThresholdEngine::new(processing)?;
        let merge_radius_bins = (PEAK_MERGE_LIMIT_M / axis.spacing()).round() as usize;

        Ok(Self {
            averager: SweepAverager::new(axis.len(), processing.nbr_average),
            axis,
            threshold_engine,
            peak_sorting: processing.peak_sorting,
            merge_radius_bins,
            history: DetectionHistory::new(),
            history_length_s: processing.history_length_s,
            update_rate_hz,
            last_mean_sweep: None,
            threshold: None,
            sweep_index: 0,
        })
    }

    pub fn axis(&self) -> &RangeAxis {
        &self.axis
    }

    pub fn sweep_index(&self) -> u64 {
        self.sweep_index
    }

    /// Apply a processing configuration update between sweeps.
    ///
    /// Validates first and mutates only on success, so a rejected update
    /// leaves the in-flight accumulation cycle untouched.
    pub fn update_config(&mut self, processing: &ProcessingConfig) -> Result<()> {
        if processing.nbr_average < 1.0 {
            return Err(DetectorError::Config(
                "nbr_average: Must be at least 1".to_string(),
            ));
        }
        if processing.history_length_s < 0.0 {
            return Err(DetectorError::Config(
                "history_length_s: Must be non-negative".to_string(),
            ));
        }
        let threshold_engine = ThresholdEngine::new(processing)?;

        self.threshold_engine = threshold_engine;
        self.averager.set_nbr_average(processing.nbr_average);
        self.peak_sorting = processing.peak_sorting;
        self.history_length_s = processing.history_length_s;
        Ok(())
    }

    /// Process one sweep.
    ///
    /// Always increments the sweep index and returns a snapshot. Threshold
    /// computation, detection, and history maintenance run only on the
    /// sweeps where the averager emits a completed mean.
    pub fn advance(&mut self, sweep: &[f32], info: Option<&SweepInfo>) -> Result<SweepOutcome> {
        if sweep.len() != self.axis.len() {
            return Err(DetectorError::SweepLength {
                expected: self.axis.len(),
                actual: sweep.len(),
            });
        }

        if let Some(info) = info
            && info.data_saturated
        {
            log::warn!("sweep {} saturated the receiver", self.sweep_index);
        }

        let mut found_peaks = None;
        let mut first_crossing = None;

        if let Some(mean_sweep) = self.averager.accumulate(sweep) {
            let threshold = self.threshold_engine.compute(&mean_sweep);

            first_crossing = find_first_crossing(&mean_sweep, &threshold);

            let mut peaks = find_peaks(&mean_sweep, &threshold);
            if peaks.len() > 1 {
                peaks = merge_peaks(&peaks, self.merge_radius_bins);
                peaks = sort_peaks(&peaks, &mean_sweep, &self.axis, self.peak_sorting);
            }

            if let Some(&main) = peaks.first() {
                self.history
                    .main_peak
                    .record(self.sweep_index, self.axis.distance(main));
                log::debug!(
                    "sweep {}: main peak at {:.3} m ({} peak(s))",
                    self.sweep_index,
                    self.axis.distance(main),
                    peaks.len()
                );
            }
            for &minor in peaks.iter().skip(1) {
                self.history
                    .minor_peaks
                    .record(self.sweep_index, self.axis.distance(minor));
            }
            if let Some(bin) = first_crossing {
                self.history
                    .first_crossing
                    .record(self.sweep_index, self.axis.distance(bin));
            }

            let horizon_sweeps = self.history_length_s * self.update_rate_hz;
            self.history.evict_all(self.sweep_index, horizon_sweeps);

            self.threshold = Some(threshold);
            self.last_mean_sweep = Some(mean_sweep);
            found_peaks = Some(peaks);
        }

        let outcome = SweepOutcome {
            sweep: sweep.to_vec(),
            last_mean_sweep: self.last_mean_sweep.clone(),
            threshold: self.threshold.clone(),
            main_peak_history: self
                .history
                .main_peak
                .relative_to(self.sweep_index, self.update_rate_hz),
            minor_peaks_history: self
                .history
                .minor_peaks
                .relative_to(self.sweep_index, self.update_rate_hz),
            first_crossing_history: self
                .history
                .first_crossing
                .relative_to(self.sweep_index, self.update_rate_hz),
            sweep_index: self.sweep_index,
            found_peaks,
            first_crossing,
        };

        self.sweep_index += 1;

        Ok(outcome)
    }
}
