//! Sweep recording file I/O.
//!
//! Recordings capture a session's sensor configuration together with the
//! raw sweeps and their transport metadata, so a detection run can be
//! replayed and re-tuned offline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::SensorConfig;
use crate::error::{DetectorError, Result};
use crate::processing::SweepInfo;

/// One captured sweep with its transport metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepFrame {
    #[serde(default)]
    pub info: SweepInfo,
    pub sweep: Vec<f32>,
}

/// A recorded session: sensor configuration plus captured frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRecording {
    pub sensor_config: SensorConfig,
    /// Per-sweep data length reported by the session
    pub data_length: usize,
    pub frames: Vec<SweepFrame>,
}

impl SweepRecording {
    pub fn new(sensor_config: SensorConfig, data_length: usize) -> Self {
        Self {
            sensor_config,
            data_length,
            frames: Vec::new(),
        }
    }

    /// Append one captured sweep.
    pub fn sample(&mut self, info: SweepInfo, sweep: Vec<f32>) {
        self.frames.push(SweepFrame { info, sweep });
    }
}

/// Save a recording as JSON. Refuses to overwrite an existing file.
pub fn save_recording(path: &Path, recording: &SweepRecording) -> Result<()> {
    if path.exists() {
        return Err(DetectorError::Recording(format!(
            "'{}' already exists, won't overwrite",
            path.display()
        )));
    }

    let json = serde_json::to_string(recording)
        .map_err(|e| DetectorError::Recording(e.to_string()))?;
    fs::write(path, json).map_err(|e| DetectorError::Recording(e.to_string()))
}

/// Load a recording saved by [`save_recording`].
pub fn load_recording(path: &Path) -> Result<SweepRecording> {
    let content =
        fs::read_to_string(path).map_err(|e| DetectorError::Recording(e.to_string()))?;
    let recording: SweepRecording =
        serde_json::from_str(&content).map_err(|e| DetectorError::Recording(e.to_string()))?;

    if recording
        .frames
        .iter()
        .any(|frame| frame.sweep.len() != recording.data_length)
    {
        return Err(DetectorError::Recording(format!(
            "'{}' contains frames that do not match its data length {}",
            path.display(),
            recording.data_length
        )));
    }

    Ok(recording)
}
