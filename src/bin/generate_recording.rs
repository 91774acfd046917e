use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use waterline::config::{RangeInterval, SensorConfig};
use waterline::processing::SweepInfo;
use waterline::range::RangeAxis;
use waterline::recording::{SweepRecording, save_recording};
use waterline::simulation::{
    NoiseConfig, NoiseGenerator, Reflector, generate_envelope_sweep_with_leakage,
};

#[derive(Parser, Debug)]
#[command(name = "generate_recording")]
#[command(about = "Generate synthetic sweep recordings with configurable noise for detector testing")]
struct Args {
    /// TOML noise configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "data/synthetic")]
    output_dir: PathBuf,

    /// Targets: comma-separated distance:amplitude pairs (e.g., "0.35:5000,0.5:1500")
    #[arg(short, long, default_value = "0.35:5000")]
    targets: String,

    /// Number of sweeps per recording
    #[arg(short = 'n', long, default_value_t = 400)]
    sweeps: u32,

    /// Number of recordings to generate
    #[arg(long, default_value_t = 1)]
    trials: u32,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,

    /// Measurement range interval (e.g., "0.1-0.6")
    #[arg(short, long, default_value = "0.1-0.6")]
    range: RangeInterval,

    /// Number of distance bins per sweep
    #[arg(short, long, default_value_t = 620)]
    bins: usize,

    /// Sweep rate in Hz
    #[arg(long, default_value_t = 40.0)]
    update_rate: f32,

    /// Direct leakage amplitude at the range start
    #[arg(long, default_value_t = 0.0)]
    leakage: f32,

    /// Output filename prefix
    #[arg(long, default_value = "synth")]
    prefix: String,

    /// Generate manifest.json
    #[arg(long)]
    manifest: bool,

    /// AWGN standard deviation (CLI override)
    #[arg(long)]
    noise_std: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    awgn: Option<AwgnSection>,
    drift: Option<DriftSection>,
}

#[derive(Debug, Deserialize)]
struct AwgnSection {
    std_dev: f32,
}

#[derive(Debug, Deserialize)]
struct DriftSection {
    fraction: f32,
    period_sweeps: f32,
}

#[derive(Debug, serde::Serialize)]
struct ManifestEntry {
    file: String,
    trial: u32,
    seed: u64,
}

#[derive(Debug, serde::Serialize)]
struct Manifest {
    range: String,
    bins: usize,
    update_rate_hz: f32,
    sweeps: u32,
    targets: Vec<ManifestTarget>,
    files: Vec<ManifestEntry>,
}

#[derive(Debug, serde::Serialize)]
struct ManifestTarget {
    distance_m: f32,
    amplitude: f32,
}

fn parse_targets(s: &str) -> Result<Vec<Reflector>> {
    s.split(',')
        .map(|pair| {
            let (distance, amplitude) = pair
                .trim()
                .split_once(':')
                .context("Target format is 'distance:amplitude'")?;
            let distance_m: f32 = distance.trim().parse().context("Invalid target distance")?;
            let amplitude: f32 = amplitude.trim().parse().context("Invalid target amplitude")?;
            Ok(Reflector::new(distance_m, amplitude))
        })
        .collect()
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn build_noise_config(toml: &TomlConfig, args: &Args, seed: u64) -> NoiseConfig {
    let mut config = NoiseConfig::default().with_seed(seed);

    if let Some(std_dev) = args.noise_std {
        config = config.with_awgn(std_dev);
    } else if let Some(ref awgn) = toml.awgn {
        config = config.with_awgn(awgn.std_dev);
    }

    if let Some(ref drift) = toml.drift {
        config = config.with_drift(drift.fraction, drift.period_sweeps);
    }

    config
}

fn main() -> Result<()> {
    let args = Args::parse();

    fs::create_dir_all(&args.output_dir).context("Failed to create output directory")?;

    let toml_config = if let Some(ref config_path) = args.config {
        load_toml_config(config_path)?
    } else {
        TomlConfig::default()
    };

    let targets = parse_targets(&args.targets)?;
    let axis = RangeAxis::new(args.range.start_m, args.range.end_m, args.bins)?;
    let base_seed = args.seed.unwrap_or(0);

    let sensor_config = SensorConfig {
        range_interval: args.range,
        update_rate_hz: Some(args.update_rate),
        ..SensorConfig::default()
    };

    let mut manifest_entries = Vec::new();

    for trial in 0..args.trials {
        let seed = base_seed + trial as u64;
        let noise_config = build_noise_config(&toml_config, &args, seed);
        let mut noise = NoiseGenerator::new(noise_config);

        let mut recording = SweepRecording::new(sensor_config.clone(), args.bins);
        for sweep_index in 0..args.sweeps {
            let mut sweep =
                generate_envelope_sweep_with_leakage(&axis, &targets, args.leakage);
            noise.apply(&mut sweep, sweep_index as u64);

            let info = SweepInfo {
                sequence_number: Some(sweep_index as u64),
                data_saturated: false,
            };
            recording.sample(info, sweep);
        }

        let filename = format!("{}_t{:02}.json", args.prefix, trial);
        let filepath = args.output_dir.join(&filename);
        save_recording(&filepath, &recording).context("Failed to write recording")?;

        manifest_entries.push(ManifestEntry {
            file: filename,
            trial,
            seed,
        });

        eprint!("\rGenerating: {}/{}", trial + 1, args.trials);
    }
    eprintln!();

    if args.manifest {
        let manifest = Manifest {
            range: args.range.to_string(),
            bins: args.bins,
            update_rate_hz: args.update_rate,
            sweeps: args.sweeps,
            targets: targets
                .iter()
                .map(|t| ManifestTarget {
                    distance_m: t.distance_m,
                    amplitude: t.amplitude,
                })
                .collect(),
            files: manifest_entries,
        };
        let manifest_path = args.output_dir.join("manifest.json");
        let manifest_json =
            serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest")?;
        fs::write(&manifest_path, manifest_json).context("Failed to write manifest")?;
        eprintln!("Manifest written to: {}", manifest_path.display());
    }

    eprintln!(
        "Generated {} recordings in {}",
        args.trials,
        args.output_dir.display()
    );
    Ok(())
}
