use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

use epicenter_locator::api::{CsvFormatter, CsvSink, FormattedEstimate, JsonFormatter, TextFormatter};
use epicenter_locator::benchmark::{n_log_n, ComplexityAnalysis};
use epicenter_locator::utils::{init_logging, AppConfig, LogFormat, LogLevel};
use epicenter_locator::{EpicenterLocator, GeoBounds, Point, Station, StationGenerator};

#[derive(Parser, Debug)]
#[command(name = "epicenter", about = "Divide & conquer earthquake epicenter locator")]
struct Args {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Locate a synthetic earthquake in central California
    Demo {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long, default_value_t = 12)]
        stations: usize,
    },
    /// Sweep station counts and record timing and accuracy
    Analyze {
        #[arg(long)]
        seed: Option<u64>,

        #[arg(long)]
        trials: Option<usize>,

        /// Comma-separated station counts
        #[arg(long, value_delimiter = ',')]
        sizes: Vec<usize>,

        /// CSV output path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Add location error (km) and n*log2(n) columns
        #[arg(long)]
        extended: bool,
    },
    /// Locate from a JSON file: { "bounds": {...}, "stations": [...] }
    Locate {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Deserialize)]
struct LocateRequest {
    bounds: GeoBounds,
    stations: Vec<Station>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(format) = args.log_format {
        config.logging.format = format;
    }
    init_logging(&config.logging);

    let locator = EpicenterLocator::new(config.locator.clone());

    match args.command {
        Command::Demo { seed, stations } => run_demo(&locator, seed, stations),
        Command::Analyze { seed, trials, sizes, output, extended } => {
            let mut bench = config.benchmark.clone();
            if seed.is_some() {
                bench.seed = seed;
            }
            if let Some(trials) = trials {
                bench.trials = trials;
            }
            if !sizes.is_empty() {
                bench.sizes = sizes;
            }
            if let Some(output) = output {
                bench.output = output;
            }
            run_analysis(ComplexityAnalysis::new(locator, bench), extended)
        }
        Command::Locate { input, json } => run_locate(&locator, &input, json),
    }
}

fn run_demo(locator: &EpicenterLocator, seed: Option<u64>, count: usize) -> Result<(), Box<dyn Error>> {
    println!("Earthquake Epicenter Location - Divide & Conquer");
    println!("================================================\n");

    let true_epicenter = Point::new(35.5, -119.5);
    let region = GeoBounds::new(34.0, 37.0, -121.0, -118.0);

    let generator = match seed {
        Some(seed) => StationGenerator::seeded(seed),
        None => StationGenerator::from_entropy(),
    };
    let stations = generator
        .with_wave_velocity(locator.config().wave_velocity)
        .generate(count, true_epicenter, &region);

    let text = TextFormatter::new();
    println!("True epicenter: ({}, {})", true_epicenter.lat, true_epicenter.lon);
    print!("{}", text.format_stations(&stations));

    let start = Instant::now();
    let (result, stats) = locator.locate_with_stats(&stations, &region)?;
    let elapsed = start.elapsed();

    let formatted = FormattedEstimate::new(&result, stations.len())
        .with_truth(&true_epicenter)
        .with_stats(&stats)
        .with_computation_time_us(elapsed.as_micros() as u64);
    println!();
    print!("{}", text.format_estimate(&formatted));
    Ok(())
}

fn run_analysis(analysis: ComplexityAnalysis, extended: bool) -> Result<(), Box<dyn Error>> {
    let output = analysis.config().output.clone();
    let truth = analysis.config().true_epicenter;
    let formatter = if extended { CsvFormatter::extended() } else { CsvFormatter::new() };
    let mut sink = CsvSink::create(&output, formatter)?;
    let text = TextFormatter::new();

    println!("=== DIVIDE & CONQUER COMPLEXITY ANALYSIS ===");
    println!("{}", text.summary_header());

    let mut write_result: std::io::Result<()> = Ok(());
    let summaries = analysis.run_with(|summary| {
        println!("{}", text.format_summary(summary));
        if write_result.is_ok() {
            write_result = sink.write_summary(summary);
        }
    })?;
    write_result?;
    sink.finish()?;

    if let (Some(first), Some(last)) = (summaries.first(), summaries.last()) {
        if first.avg_time_ms > 0.0 && first.stations > 1 {
            let measured = last.avg_time_ms / first.avg_time_ms;
            let expected = n_log_n(last.stations) / n_log_n(first.stations);
            println!(
                "\nGrowth {} -> {} stations: measured x{:.1}, n log n predicts x{:.1}",
                first.stations, last.stations, measured, expected
            );
        }
    }

    println!("\nResults saved to {}", output.display());
    println!("True epicenter: ({}, {})", truth.lat, truth.lon);
    info!(sizes = summaries.len(), path = %output.display(), "analysis complete");
    Ok(())
}

fn run_locate(locator: &EpicenterLocator, input: &Path, json: bool) -> Result<(), Box<dyn Error>> {
    let content = fs::read_to_string(input)?;
    let request: LocateRequest = serde_json::from_str(&content)?;

    let start = Instant::now();
    let (result, stats) = locator.locate_with_stats(&request.stations, &request.bounds)?;
    let elapsed = start.elapsed();

    let formatted = FormattedEstimate::new(&result, request.stations.len())
        .with_stats(&stats)
        .with_computation_time_us(elapsed.as_micros() as u64);

    if json {
        println!("{}", JsonFormatter::pretty().format_json(&formatted)?);
    } else {
        print!("{}", TextFormatter::new().format_estimate(&formatted));
    }
    Ok(())
}
