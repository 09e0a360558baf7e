//! Command-line entry point: replays a transaction log file and prints one
//! month's balances and statistics as JSON.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use time::Month;
use tracing_subscriber::{
    EnvFilter, Layer, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use dompet::{
    CsvRecordSource, EngineConfig, Error, JsonRecordSource, PeriodResult, aggregate_from_source,
};

/// Replay a flat transaction log and report one month's opening/closing
/// balances and statistics.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the transaction log; CSV by default, JSON when the file
    /// extension is `.json`.
    data: PathBuf,

    /// The month to report on (1-12).
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=12))]
    month: u8,

    /// The year to report on.
    #[arg(short, long)]
    year: i32,

    /// Optional TOML file overriding the synonym tables and the fuel rule.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer().with_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .from_env_lossy(),
            ),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(result) => {
            let json = serde_json::to_string_pretty(&result)
                .expect("PeriodResult always serializes to JSON");
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<PeriodResult, Error> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    let month = Month::try_from(cli.month).expect("month range is validated by clap");

    let is_json = cli
        .data
        .extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));

    if is_json {
        aggregate_from_source(&JsonRecordSource::new(&cli.data), month, cli.year, &config)
    } else {
        aggregate_from_source(&CsvRecordSource::new(&cli.data), month, cli.year, &config)
    }
}
