use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use windspeed::output::{WindReport, iso8601_timestamp};

#[derive(Parser, Debug)]
#[command(name = "monitor")]
#[command(about = "Decode wind reports from a serial device, file or stdin", long_about = None)]
struct Args {
    /// Serial device or capture file to read ("-" for stdin). When omitted,
    /// the first /dev/ttyACM* or /dev/ttyUSB* device is used, else stdin.
    input: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Print a summary when the input ends
    #[arg(short, long)]
    summary: bool,

    /// Increase log verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct Record {
    ts: String,
    ws_ms: f32,
}

#[derive(Debug, Serialize)]
struct StatsSummary {
    count: usize,
    skipped: usize,
    mean: f32,
    std_dev: f32,
    min: f32,
    max: f32,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f32>, skipped: usize) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            skipped,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }
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

    let input = args.input.clone().or_else(|| {
        let port = find_serial_port(Path::new("/dev"));
        match &port {
            Some(path) => log::info!("Found serial device {}", path.display()),
            None => log::info!("No serial device found, reading stdin"),
        }
        port
    });

    let reader: Box<dyn BufRead> = match input {
        Some(ref path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            log::info!("Reading reports from {}", path.display());
            Box::new(BufReader::new(file))
        }
        _ => Box::new(io::stdin().lock()),
    };

    let mut stats: Stats<f32> = Stats::new();
    let mut skipped = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line.context("Failed to read report line")?;
        let report = match WindReport::parse_line(&line) {
            Ok(report) => report,
            Err(e) => {
                log::debug!("Skipping line {}: {}", index + 1, e);
                skipped += 1;
                continue;
            }
        };

        let ws_ms = report.rounded();
        stats.update(ws_ms);

        match args.format {
            OutputFormat::Text => println!("{} wind {:.2} m/s", iso8601_timestamp(), ws_ms),
            OutputFormat::Json => {
                let record = Record {
                    ts: iso8601_timestamp(),
                    ws_ms,
                };
                println!("{}", serde_json::to_string(&record)?);
            }
        }
    }

    if args.summary {
        print_summary(StatsSummary::from_stats(&stats, skipped), args.format)?;
    }

    Ok(())
}

/// First `ttyACM*` device in `dev`, else the first `ttyUSB*`, by name order
fn find_serial_port(dev: &Path) -> Option<PathBuf> {
    let mut names: Vec<String> = std::fs::read_dir(dev)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    names.sort();

    ["ttyACM", "ttyUSB"].iter().find_map(|prefix| {
        names
            .iter()
            .find(|name| name.starts_with(prefix))
            .map(|name| dev.join(name))
    })
}

fn print_summary(summary: Option<StatsSummary>, format: OutputFormat) -> anyhow::Result<()> {
    let Some(summary) = summary else {
        eprintln!("No reports decoded");
        return Ok(());
    };

    match format {
        OutputFormat::Text => {
            println!(
                "Reports: {} (skipped {})",
                summary.count, summary.skipped
            );
            println!(
                "Wind: mean {:.2} m/s, std {:.2}, min {:.2}, max {:.2}",
                summary.mean, summary.std_dev, summary.min, summary.max
            );
        }
        OutputFormat::Json => println!("{}", serde_json::to_string(&summary)?),
    }
    Ok(())
}
