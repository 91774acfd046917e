use anyhow::Context;
use crossbeam_channel::bounded;
use std::path::Path;
use std::thread;
use std::time::Duration;

use waterline::config::{AlertSeverity, ProcessingConfig, check_config};
use waterline::processing::LevelProcessor;
use waterline::recording::load_recording;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .context("usage: waterline <recording.json>")?;
    let recording = load_recording(Path::new(&path))?;

    let sensor_config = recording.sensor_config.clone();
    let processing_config = ProcessingConfig::default();
    let data_length = recording.data_length;

    println!("=== Waterline - Radar Level Detector ===");
    println!("Recording: {}", path);
    println!("Range interval: {}", sensor_config.range_interval);
    if let Some(rate) = sensor_config.update_rate_hz {
        println!("Update rate: {} Hz", rate);
    }
    println!("Sweep averaging: {}", processing_config.nbr_average);
    println!(
        "Threshold: {:?} at {}",
        processing_config.threshold_type, processing_config.fixed_threshold_level
    );
    println!("Peak sorting: {:?}", processing_config.peak_sorting);
    println!();

    for alert in check_config(&sensor_config, &processing_config) {
        match alert.severity {
            AlertSeverity::Blocking => eprintln!("error: {}: {}", alert.field, alert.message),
            AlertSeverity::Advisory => eprintln!("note: {}: {}", alert.field, alert.message),
        }
    }

    let mut processor = LevelProcessor::new(&sensor_config, &processing_config, data_length)?;

    let update_rate = sensor_config
        .update_rate_hz
        .context("recording has no update rate")?;
    let sweep_interval = Duration::from_secs_f32(1.0 / update_rate);

    let (sweep_tx, sweep_rx) = bounded(10);

    // Pace the recorded frames at the sensor's sweep rate
    let producer = thread::spawn(move || {
        for frame in recording.frames {
            if sweep_tx.send(frame).is_err() {
                break;
            }
            thread::sleep(sweep_interval);
        }
    });

    println!("Replaying. Press Ctrl-C to stop.\n");

    loop {
        let frame = match sweep_rx.recv() {
            Ok(frame) => frame,
            Err(_) => break,
        };

        let outcome = processor.advance(&frame.sweep, Some(&frame.info))?;

        if let Some(distance) = outcome.main_peak_distance_m(processor.axis()) {
            println!("Sweep {:>4}: {:.2} cm", outcome.sweep_index, distance * 100.0);
        } else if outcome.found_peaks.is_some() {
            log::debug!("sweep {}: no peak detected", outcome.sweep_index);
        }
    }

    producer
        .join()
        .map_err(|_| anyhow::anyhow!("replay thread panicked"))?;

    Ok(())
}
