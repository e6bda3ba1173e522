use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace};

use tweetflow::codec::decode_batch;
use tweetflow::config::{load_config, EtlConfig};
use tweetflow::error::{describe_error_code, EtlError};
use tweetflow::etl::{extract_transform_load, validate, RunSummary};
use tweetflow::scheduler::Scheduler;
use tweetflow::storage::LocationConfig;

/// Hourly engagement summaries from raw post batches
#[derive(Parser)]
#[command(name = "tweetflow")]
#[command(about = "Validate, repair and aggregate social-media post batches", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline once
    Run {
        /// Fail before writing anything when the batch has validation findings
        #[arg(long)]
        enforce_validation: bool,

        /// Read the raw batch from this local file instead of the configured source
        #[arg(long)]
        input: Option<PathBuf>,

        /// Write the summary to this local file instead of the configured sink
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the run summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report the quality problems of a local CSV batch without repairing it
    Validate {
        /// CSV file to check
        input: PathBuf,

        /// Print the findings as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the pipeline on the configured cadence until interrupted
    Schedule,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        2 => "trace",
        _ => "trace,aws_config=debug,aws_smithy_runtime=debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .with_target(cli.verbose >= 2)
        .with_thread_ids(cli.verbose >= 3)
        .with_line_number(cli.verbose >= 3)
        .init();

    debug!("tweetflow started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match cli.command {
        Commands::Run {
            enforce_validation,
            input,
            output,
            json,
        } => {
            run_pipeline(
                cli.config.as_deref(),
                enforce_validation,
                input,
                output,
                json,
            )
            .await
        }
        Commands::Validate { input, json } => run_validate(&input, json).await,
        Commands::Schedule => run_schedule(cli.config.as_deref()).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {:#}", e);
        let exit_code = match e.downcast_ref::<EtlError>() {
            Some(etl) => {
                eprintln!("Error: {}", etl.user_message());
                eprintln!("  [E{:04}] {}", etl.code(), describe_error_code(etl.code()));
                etl.exit_code()
            }
            None => {
                eprintln!("Error: {e:#}");
                1
            }
        };
        std::process::exit(exit_code);
    }
}

async fn configured(path: Option<&Path>) -> anyhow::Result<EtlConfig> {
    Ok(load_config(path).await?)
}

async fn run_pipeline(
    config_path: Option<&Path>,
    enforce_validation: bool,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = configured(config_path).await?;
    config.enforce_validation |= enforce_validation;
    if let Some(input) = input {
        config.source = LocationConfig::file(input);
    }
    if let Some(output) = output {
        config.sink = LocationConfig::file(output);
    }

    let summary = extract_transform_load(&config).await?;
    print_summary(&summary, json)
}

fn print_summary(summary: &RunSummary, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
        return Ok(());
    }

    println!(
        "Processed {} record(s) into {} hourly row(s)",
        summary.records_read, summary.hours_written
    );
    if !summary.findings.is_empty() {
        println!("Validation findings:");
        for finding in &summary.findings {
            println!("  - {}", finding);
        }
    }
    Ok(())
}

async fn run_validate(input: &Path, json: bool) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let dataset = decode_batch(&bytes)?;
    let report = validate(&dataset);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.is_clean() {
        println!("{}: {} record(s), no findings", input.display(), dataset.len());
    } else {
        println!("{}: {} record(s)", input.display(), dataset.len());
        for finding in report.findings() {
            println!("  - {}", finding);
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(EtlError::validation_failed(report.into_findings()).into())
    }
}

async fn run_schedule(config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = configured(config_path).await?;
    info!(
        every = ?config.schedule.every,
        retries = config.schedule.retries,
        "Starting scheduler"
    );

    let runs = Scheduler::new(config)?.run_forever().await?;
    info!(runs, "Scheduler finished");
    Ok(())
}
