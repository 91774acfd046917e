mod test_sweeps;

use waterline::config::{PeakSorting, ProcessingConfig, SensorConfig};
use waterline::processing::LevelProcessor;

fn sensor_config() -> SensorConfig {
    SensorConfig {
        update_rate_hz: Some(40.0),
        ..SensorConfig::default()
    }
}

fn processing_config(nbr_average: f32) -> ProcessingConfig {
    ProcessingConfig {
        nbr_average,
        fixed_threshold_level: 1.0,
        ..ProcessingConfig::default()
    }
}

#[test]
fn test_pipeline_detects_level_on_emission() {
    let num_bins = 620;
    let mut processor =
        LevelProcessor::new(&sensor_config(), &processing_config(5.0), num_bins).unwrap();

    let sweep = test_sweeps::pulse_sweep(num_bins, 310, 2, 3000.0, 0.0);

    for call in 0..4 {
        let outcome = processor.advance(&sweep, None).unwrap();
        assert_eq!(outcome.sweep_index, call);
        assert!(outcome.found_peaks.is_none(), "no emission before the 5th sweep");
    }

    let outcome = processor.advance(&sweep, None).unwrap();
    assert_eq!(outcome.sweep_index, 4);
    assert_eq!(outcome.found_peaks, Some(vec![310]));

    let level = outcome.main_peak_distance_m(processor.axis()).unwrap();
    let expected = processor.axis().distance(310);
    assert!((level - expected).abs() < 1e-6);
}

#[test]
fn test_emission_cadence_is_exact() {
    let num_bins = 64;
    let mut processor =
        LevelProcessor::new(&sensor_config(), &processing_config(5.0), num_bins).unwrap();
    let sweep = vec![0.0; num_bins];

    let mut emissions = Vec::new();
    for call in 0..20u64 {
        let outcome = processor.advance(&sweep, None).unwrap();
        assert_eq!(outcome.sweep_index, call);
        if outcome.found_peaks.is_some() {
            emissions.push(call);
        }
    }

    assert_eq!(emissions, vec![4, 9, 14, 19]);
}

#[test]
fn test_plateau_reported_at_biased_midpoint() {
    let num_bins = 300;
    let mut processor =
        LevelProcessor::new(&sensor_config(), &processing_config(1.0), num_bins).unwrap();

    // Flat top of width 4 starting at bin 100: midpoint biased up is 102
    let sweep = test_sweeps::plateau_sweep(num_bins, 100, 4, 5.0, 2.0);

    let outcome = processor.advance(&sweep, None).unwrap();
    assert_eq!(outcome.found_peaks, Some(vec![102]));
}

#[test]
fn test_nearby_peaks_merge_into_one() {
    // 620 bins over 0.5 m is ~0.8 mm per bin, so the 5 mm merge limit
    // spans several bins
    let num_bins = 620;
    let mut processor =
        LevelProcessor::new(&sensor_config(), &processing_config(1.0), num_bins).unwrap();

    let mut sweep = vec![0.0; num_bins];
    sweep[299] = 2.0;
    sweep[300] = 3.0;
    sweep[301] = 2.0;
    sweep[303] = 2.0;
    sweep[304] = 3.0;
    sweep[305] = 2.0;

    let outcome = processor.advance(&sweep, None).unwrap();
    assert_eq!(outcome.found_peaks, Some(vec![302]));
}

#[test]
fn test_distant_peaks_rank_by_policy() {
    let num_bins = 620;
    let mut sweep = vec![0.0; num_bins];
    sweep[149] = 2.0;
    sweep[150] = 3.0;
    sweep[151] = 2.0;
    sweep[449] = 4.0;
    sweep[450] = 6.0;
    sweep[451] = 4.0;

    let mut strongest =
        LevelProcessor::new(&sensor_config(), &processing_config(1.0), num_bins).unwrap();
    let outcome = strongest.advance(&sweep, None).unwrap();
    assert_eq!(outcome.found_peaks, Some(vec![450, 150]));

    let closest_config = ProcessingConfig {
        peak_sorting: PeakSorting::Closest,
        ..processing_config(1.0)
    };
    let mut closest = LevelProcessor::new(&sensor_config(), &closest_config, num_bins).unwrap();
    let outcome = closest.advance(&sweep, None).unwrap();
    assert_eq!(outcome.found_peaks, Some(vec![150, 450]));
}

#[test]
fn test_first_crossing_without_peak() {
    // Monotonically falling direct leakage: above threshold from bin 0
    // but never shaped like a peak
    let num_bins = 200;
    let mut processor =
        LevelProcessor::new(&sensor_config(), &processing_config(1.0), num_bins).unwrap();

    let sweep: Vec<f32> = (0..num_bins)
        .map(|i| 3000.0 * (1.0 - i as f32 / num_bins as f32))
        .collect();

    let outcome = processor.advance(&sweep, None).unwrap();
    assert_eq!(outcome.found_peaks, Some(Vec::new()));
    assert_eq!(outcome.first_crossing, Some(0));
    assert_eq!(outcome.first_crossing_history.len(), 1);
    assert!(outcome.main_peak_history.is_empty());
}

#[test]
fn test_history_ages_out_after_horizon() {
    let sensor = SensorConfig {
        update_rate_hz: Some(10.0),
        ..SensorConfig::default()
    };
    let processing = ProcessingConfig {
        history_length_s: 2.0,
        ..processing_config(1.0)
    };
    let num_bins = 64;
    let mut processor = LevelProcessor::new(&sensor, &processing, num_bins).unwrap();

    let pulse = test_sweeps::pulse_sweep(num_bins, 32, 1, 5.0, 0.0);
    let silent = vec![0.0; num_bins];

    let outcome = processor.advance(&pulse, None).unwrap();
    assert_eq!(outcome.main_peak_history.len(), 1);

    // horizon = 2 s * 10 Hz = 20 sweeps; the detection from sweep 0 is
    // retained through sweep 20 and gone at sweep 21
    let mut last = None;
    for _ in 0..20 {
        last = Some(processor.advance(&silent, None).unwrap());
    }
    assert_eq!(last.unwrap().main_peak_history.len(), 1);

    let outcome = processor.advance(&silent, None).unwrap();
    assert!(outcome.main_peak_history.is_empty());
}

#[test]
fn test_live_config_update_between_sweeps() {
    let num_bins = 620;
    let mut processor =
        LevelProcessor::new(&sensor_config(), &processing_config(2.0), num_bins).unwrap();

    let mut sweep = vec![0.0; num_bins];
    sweep[149] = 2.0;
    sweep[150] = 3.0;
    sweep[151] = 2.0;
    sweep[449] = 4.0;
    sweep[450] = 6.0;
    sweep[451] = 4.0;

    assert!(processor.advance(&sweep, None).unwrap().found_peaks.is_none());

    // Switch ranking mid-cycle; the accumulation cycle still completes
    // on its original schedule
    let updated = ProcessingConfig {
        peak_sorting: PeakSorting::Closest,
        ..processing_config(2.0)
    };
    processor.update_config(&updated).unwrap();

    let outcome = processor.advance(&sweep, None).unwrap();
    assert_eq!(outcome.found_peaks, Some(vec![150, 450]));
}
