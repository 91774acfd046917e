use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::path::PathBuf;

use waterline::config::{PeakSorting, ProcessingConfig, ThresholdType};
use waterline::output::{DetectionOutput, Formatter, OutputFormat, create_formatter};
use waterline::processing::LevelProcessor;
use waterline::recording::load_recording;

#[derive(Parser, Debug)]
#[command(name = "analyze_recording")]
#[command(about = "Analyze sweep recordings for water-level statistics", long_about = None)]
struct Args {
    /// Recording files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Sweeps averaged into one detection sweep
    #[arg(short = 'a', long, default_value_t = 5.0)]
    nbr_average: f32,

    /// Threshold mode: fixed, recorded, cfar
    #[arg(short = 't', long, value_enum, default_value = "fixed")]
    threshold: ThresholdType,

    /// Fixed threshold level
    #[arg(short = 'l', long, default_value_t = 800.0)]
    threshold_level: f32,

    /// Peak sorting policy
    #[arg(short = 's', long, value_enum, default_value = "strongest")]
    sorting: PeakSorting,

    /// History length in seconds
    #[arg(long, default_value_t = 10.0)]
    history_length: f32,

    /// Update rate override in Hz (defaults to the recorded rate)
    #[arg(long)]
    update_rate: Option<f32>,

    /// Print every averaged-sweep detection, not just the summary
    #[arg(short = 'd', long)]
    dump: bool,

    /// Include the first-above-threshold distance in dumped detections
    #[arg(long)]
    show_first: bool,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f32,
    std_dev: f32,
    min: f32,
    max: f32,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f32>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct FileAnalysis {
    filename: String,
    level_m: Option<StatsSummary>,
    first_crossing_m: Option<StatsSummary>,
    minor_peak_count: usize,
    sweep_count: usize,
    emission_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let processing = ProcessingConfig {
        nbr_average: args.nbr_average,
        threshold_type: args.threshold,
        fixed_threshold_level: args.threshold_level,
        peak_sorting: args.sorting,
        history_length_s: args.history_length,
        show_first_above_threshold: args.show_first,
    };

    let dump_formatter = if args.dump {
        let formatter = create_formatter(args.format, args.show_first);
        if let Some(header) = formatter.header() {
            println!("{}", header);
        }
        Some(formatter)
    } else {
        None
    };

    let results: Vec<FileAnalysis> = args
        .files
        .iter()
        .map(|path| {
            analyze_file(
                path,
                &processing,
                args.update_rate,
                dump_formatter.as_deref(),
            )
        })
        .collect();

    match args.format {
        OutputFormat::Text => print_text(&results, &processing),
        OutputFormat::Csv => print_csv(&results),
        OutputFormat::Json => print_json(&results)?,
    }

    Ok(())
}

fn analyze_file(
    path: &PathBuf,
    processing: &ProcessingConfig,
    update_rate: Option<f32>,
    dump_formatter: Option<&dyn Formatter>,
) -> FileAnalysis {
    let filename = path
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    match analyze_file_impl(path, processing, update_rate, dump_formatter) {
        Ok(mut analysis) => {
            analysis.filename = filename;
            analysis
        }
        Err(e) => FileAnalysis {
            filename,
            level_m: None,
            first_crossing_m: None,
            minor_peak_count: 0,
            sweep_count: 0,
            emission_count: 0,
            error: Some(e.to_string()),
        },
    }
}

fn analyze_file_impl(
    path: &PathBuf,
    processing: &ProcessingConfig,
    update_rate: Option<f32>,
    dump_formatter: Option<&dyn Formatter>,
) -> anyhow::Result<FileAnalysis> {
    let recording = load_recording(path)?;

    let mut sensor = recording.sensor_config.clone();
    if let Some(rate) = update_rate {
        sensor.update_rate_hz = Some(rate);
    }

    let mut processor = LevelProcessor::new(&sensor, processing, recording.data_length)?;

    let mut level_stats: Stats<f32> = Stats::new();
    let mut first_crossing_stats: Stats<f32> = Stats::new();
    let mut minor_peak_count = 0;
    let mut sweep_count = 0;
    let mut emission_count = 0;

    for frame in &recording.frames {
        let outcome = processor.advance(&frame.sweep, Some(&frame.info))?;
        sweep_count += 1;

        let Some(ref peaks) = outcome.found_peaks else {
            continue;
        };
        emission_count += 1;

        if let Some(formatter) = dump_formatter
            && let Some(row) = DetectionOutput::from_outcome(&outcome, processor.axis())
        {
            println!("{}", formatter.format(&row));
        }

        if let Some(distance) = outcome.main_peak_distance_m(processor.axis()) {
            level_stats.update(distance);
        }
        minor_peak_count += peaks.len().saturating_sub(1);

        if let Some(bin) = outcome.first_crossing {
            first_crossing_stats.update(processor.axis().distance(bin));
        }
    }

    Ok(FileAnalysis {
        filename: String::new(),
        level_m: StatsSummary::from_stats(&level_stats),
        first_crossing_m: StatsSummary::from_stats(&first_crossing_stats),
        minor_peak_count,
        sweep_count,
        emission_count,
        error: None,
    })
}

fn print_text(results: &[FileAnalysis], processing: &ProcessingConfig) {
    eprintln!(
        "Averaging: {}, Threshold: {:?} at {}, Sorting: {:?}",
        processing.nbr_average,
        processing.threshold_type,
        processing.fixed_threshold_level,
        processing.peak_sorting
    );
    eprintln!();

    println!(
        "{:<40} {:>10} {:>8} {:>10} {:>8} {:>8}",
        "File", "Level", "Std", "FirstCross", "Sweeps", "Means"
    );
    println!("{}", "-".repeat(90));

    for result in results {
        if let Some(ref err) = result.error {
            println!("{:<40} ERROR: {}", result.filename, err);
            continue;
        }

        let level = result
            .level_m
            .as_ref()
            .map(|s| format!("{:.2} cm", s.mean * 100.0))
            .unwrap_or_else(|| "-".to_string());
        let level_std = result
            .level_m
            .as_ref()
            .map(|s| format!("{:.2}", s.std_dev * 100.0))
            .unwrap_or_else(|| "-".to_string());
        let first = result
            .first_crossing_m
            .as_ref()
            .map(|s| format!("{:.2} cm", s.mean * 100.0))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<40} {:>10} {:>8} {:>10} {:>8} {:>8}",
            result.filename, level, level_std, first, result.sweep_count, result.emission_count
        );
    }

    for result in results {
        if result.error.is_some() {
            continue;
        }

        if let Some(ref level) = result.level_m {
            eprintln!();
            eprintln!("Level statistics for {}:", result.filename);
            eprintln!("  Mean: {:.2} cm", level.mean * 100.0);
            eprintln!("  Std dev: {:.2} cm", level.std_dev * 100.0);
            eprintln!("  Min: {:.2} cm", level.min * 100.0);
            eprintln!("  Max: {:.2} cm", level.max * 100.0);
            eprintln!("  Detections: {} of {} means", level.count, result.emission_count);
            if result.minor_peak_count > 0 {
                eprintln!("  Minor peaks: {}", result.minor_peak_count);
            }
        }
    }
}

fn print_csv(results: &[FileAnalysis]) {
    println!(
        "filename,level_mean_m,level_std_m,level_min_m,level_max_m,first_crossing_mean_m,detections,sweep_count,emission_count,minor_peak_count,error"
    );
    for result in results {
        let level_mean = result
            .level_m
            .as_ref()
            .map(|s| format!("{:.4}", s.mean))
            .unwrap_or_default();
        let level_std = result
            .level_m
            .as_ref()
            .map(|s| format!("{:.4}", s.std_dev))
            .unwrap_or_default();
        let level_min = result
            .level_m
            .as_ref()
            .map(|s| format!("{:.4}", s.min))
            .unwrap_or_default();
        let level_max = result
            .level_m
            .as_ref()
            .map(|s| format!("{:.4}", s.max))
            .unwrap_or_default();
        let first_mean = result
            .first_crossing_m
            .as_ref()
            .map(|s| format!("{:.4}", s.mean))
            .unwrap_or_default();
        let detections = result
            .level_m
            .as_ref()
            .map(|s| s.count.to_string())
            .unwrap_or_default();
        let error = result.error.as_deref().unwrap_or("");

        println!(
            "{},{},{},{},{},{},{},{},{},{},{}",
            result.filename,
            level_mean,
            level_std,
            level_min,
            level_max,
            first_mean,
            detections,
            result.sweep_count,
            result.emission_count,
            result.minor_peak_count,
            error
        );
    }
}

fn print_json(results: &[FileAnalysis]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}
