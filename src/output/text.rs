use super::{DetectionOutput, Formatter};

pub struct TextFormatter {
    show_first_crossing: bool,
}

impl TextFormatter {
    pub fn new(show_first_crossing: bool) -> Self {
        Self {
            show_first_crossing,
        }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, output: &DetectionOutput) -> String {
        let level = output
            .main_distance_m
            .map_or("-".to_string(), |d| format!("{:.2} cm", d * 100.0));

        let mut line = format!("Sweep {:>5}: level {:>9}", output.sweep_index, level);

        if !output.minor_distances_m.is_empty() {
            let minors: Vec<String> = output
                .minor_distances_m
                .iter()
                .map(|d| format!("{:.2}", d * 100.0))
                .collect();
            line.push_str(&format!(" (minor: {} cm)", minors.join(", ")));
        }

        if self.show_first_crossing {
            let first = output
                .first_crossing_m
                .map_or("-".to_string(), |d| format!("{:.2} cm", d * 100.0));
            line.push_str(&format!(" [first above threshold: {}]", first));
        }

        line
    }
}
