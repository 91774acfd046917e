use super::{DetectionOutput, Formatter, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, output: &DetectionOutput) -> String {
        let level = output
            .main_distance_m
            .map_or(String::new(), |d| format!("{:.4}", d));
        let first = output
            .first_crossing_m
            .map_or(String::new(), |d| format!("{:.4}", d));
        let minors: Vec<String> = output
            .minor_distances_m
            .iter()
            .map(|d| format!("{:.4}", d))
            .collect();
        format!(
            "{},{},{},{},{}",
            iso8601_timestamp(),
            output.sweep_index,
            level,
            minors.join(";"),
            first
        )
    }

    fn header(&self) -> Option<&'static str> {
        Some("ts,sweep_index,level_m,minor_m,first_crossing_m")
    }
}
