use anyhow::Context;
use clap::Parser;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader};
use std::path::PathBuf;

use windspeed::config::{ReferenceVoltage, StationConfig};
use windspeed::output::{OutputFormat, TextSink, WriterSink, create_formatter};
use windspeed::sensor::{AnalogSource, LineSource};
use windspeed::{Scheduler, WindProcessor};

#[derive(Parser, Debug)]
#[command(name = "windspeed")]
#[command(about = "Sample an analog anemometer and report the smoothed wind speed once per second", long_about = None)]
struct Args {
    /// Raw ADC readings, one per line ("-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Read from a simulated noisy anemometer (takes precedence over --input)
    #[cfg(feature = "simulation")]
    #[arg(long)]
    simulate: bool,

    /// Mean wind speed of the simulated sensor in m/s
    #[cfg(feature = "simulation")]
    #[arg(long, default_value_t = 5.0)]
    wind: f32,

    /// Gust amplitude of the simulated sensor in m/s
    #[cfg(feature = "simulation")]
    #[arg(long, default_value_t = 0.0)]
    gust: f32,

    /// Voltage noise standard deviation of the simulated sensor
    #[cfg(feature = "simulation")]
    #[arg(long, default_value_t = 0.01)]
    noise: f32,

    /// Seed for the simulated sensor
    #[cfg(feature = "simulation")]
    #[arg(long)]
    seed: Option<u64>,

    /// Report destination: serial device or file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report format: json (wire format), text, csv
    #[arg(short = 'f', long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Stop after this many reports
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// TOML file overriding sensor and ADC parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// ADC reference voltage ("default" or e.g. "3.3v")
    #[arg(long)]
    reference: Option<ReferenceVoltage>,

    /// Increase log verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
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

    let mut config = match args.config {
        Some(ref path) => StationConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => StationConfig::default(),
    };
    if let Some(reference) = args.reference {
        config.adc.reference = reference;
    }
    config.validate()?;

    log::info!("ADC reference: {}", config.adc.reference);
    log::info!(
        "Sensor: {:.2} V at 0 m/s, {:.2} V swing to {:.1} m/s",
        config.sensor.v_offset,
        config.sensor.v_range,
        config.sensor.ws_max
    );
    log::info!("Serial link: {} baud", config.serial.baud_rate);

    let mut processor = WindProcessor::new(&config);
    let mut source = open_source(&args, &config, &processor)?;
    let mut sink = open_sink(args.output.as_ref())?;
    let formatter = create_formatter(args.format, args.verbose > 0);

    let mut scheduler = Scheduler::default();
    if let Some(count) = args.count {
        scheduler = scheduler.with_limit(count);
    }
    log::info!("Reporting every {} ms", scheduler.period().as_millis());

    let reports = scheduler.run(&mut processor, source.as_mut(), sink.as_mut(), formatter.as_ref())?;
    log::info!("Wrote {} reports", reports);

    Ok(())
}

#[cfg(feature = "simulation")]
fn open_source(
    args: &Args,
    config: &StationConfig,
    processor: &WindProcessor,
) -> anyhow::Result<Box<dyn AnalogSource>> {
    use windspeed::simulation::{NoiseConfig, SimulatedSensor, WindProfile};

    if args.simulate {
        let mut noise = NoiseConfig::new(args.noise);
        if let Some(seed) = args.seed {
            noise = noise.with_seed(seed);
        }
        let profile = WindProfile::steady(args.wind).with_gusts(args.gust, 30.0);
        log::info!(
            "Simulating {:.1} m/s wind (gusts ±{:.1} m/s, noise {:.3} V)",
            args.wind,
            args.gust,
            args.noise
        );
        return Ok(Box::new(SimulatedSensor::new(
            *processor.transfer(),
            profile,
            &noise,
        )?));
    }

    open_input(args.input.as_ref(), config)
}

#[cfg(not(feature = "simulation"))]
fn open_source(
    args: &Args,
    config: &StationConfig,
    _processor: &WindProcessor,
) -> anyhow::Result<Box<dyn AnalogSource>> {
    open_input(args.input.as_ref(), config)
}

fn open_input(
    input: Option<&PathBuf>,
    config: &StationConfig,
) -> anyhow::Result<Box<dyn AnalogSource>> {
    match input {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            log::info!("Reading raw samples from {}", path.display());
            Ok(Box::new(LineSource::new(
                BufReader::new(file),
                config.adc.max_raw,
            )))
        }
        _ => {
            log::info!("Reading raw samples from stdin");
            Ok(Box::new(LineSource::new(
                io::stdin().lock(),
                config.adc.max_raw,
            )))
        }
    }
}

fn open_sink(output: Option<&PathBuf>) -> anyhow::Result<Box<dyn TextSink>> {
    match output {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open output {}", path.display()))?;
            log::info!("Writing reports to {}", path.display());
            Ok(Box::new(WriterSink::new(file)))
        }
        None => Ok(Box::new(WriterSink::new(io::stdout()))),
    }
}
