mod csv;
mod json;
mod text;

use chrono::Utc;

pub use self::csv::CsvFormatter;
pub use self::json::JsonFormatter;
pub use self::text::TextFormatter;

use crate::processing::SweepOutcome;
use crate::range::RangeAxis;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Csv,
}

/// One displayable detection row, built from an emission sweep.
pub struct DetectionOutput {
    pub sweep_index: u64,
    pub main_distance_m: Option<f32>,
    pub minor_distances_m: Vec<f32>,
    pub first_crossing_m: Option<f32>,
}

impl DetectionOutput {
    /// Build a row from a sweep outcome.
    ///
    /// Returns `None` for non-emission sweeps, which carry no detection
    /// result of their own.
    pub fn from_outcome(outcome: &SweepOutcome, axis: &RangeAxis) -> Option<Self> {
        let peaks = outcome.found_peaks.as_ref()?;
        Some(Self {
            sweep_index: outcome.sweep_index,
            main_distance_m: peaks.first().map(|&bin| axis.distance(bin)),
            minor_distances_m: peaks
                .iter()
                .skip(1)
                .map(|&bin| axis.distance(bin))
                .collect(),
            first_crossing_m: outcome.first_crossing.map(|bin| axis.distance(bin)),
        })
    }
}

pub trait Formatter: Send {
    fn format(&self, output: &DetectionOutput) -> String;

    fn header(&self) -> Option<&'static str> {
        None
    }
}

pub fn create_formatter(format: OutputFormat, show_first_crossing: bool) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(show_first_crossing)),
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Csv => Box::new(CsvFormatter),
    }
}

pub fn iso8601_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
