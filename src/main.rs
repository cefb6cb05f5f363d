//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `etl_bench` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use etl_bench::bench::parse_input_spec;
use etl_bench::config::{
    DEFAULT_GENERATOR_SEED, DEFAULT_INPUT_SIZES, DEFAULT_OUTPUT_DIR, DEFAULT_STAGING_DB_PATH,
    DEFAULT_WORKER_COUNT,
};
use etl_bench::generate::generate_inputs;
use etl_bench::initialization::init_logger_with;
use etl_bench::report::write_report_json;
use etl_bench::{
    run_benchmark, BenchConfig, JsonRenderer, LogFormat, LogLevel, ReportRenderer, StagingMode,
    TextRenderer,
};

/// Benchmarks streaming, staged and staged+parallel CSV ETL strategies.
#[derive(Debug, Parser)]
#[command(name = "etl_bench", version, about)]
struct Cli {
    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run every strategy against every input file
    Run(RunArgs),
    /// Write synthetic input files (file1.csv, file2.csv, ...)
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Input files as PATH or PATH:RECORD_COUNT, in benchmark order
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Directory receiving <strategy>/new_<file> outputs
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Staging store path (SQLite file)
    #[arg(long, env = "ETL_BENCH_STAGING_DB", default_value = DEFAULT_STAGING_DB_PATH)]
    staging_db: PathBuf,

    /// Staging table lifecycle: isolated clears it per run, accumulate never does
    #[arg(long, value_enum, default_value_t = StagingMode::Isolated)]
    staging_mode: StagingMode,

    /// Worker count for the staged+parallel transform
    #[arg(long, default_value_t = DEFAULT_WORKER_COUNT)]
    workers: usize,

    /// Also write the timing series as JSON to this path
    #[arg(long)]
    series_json: Option<PathBuf>,

    /// Write the full report (series and per-run outcomes) as JSON to this path
    #[arg(long)]
    report_json: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Directory to write the files into
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Record counts, one file per value
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_INPUT_SIZES.to_vec())]
    sizes: Vec<usize>,

    /// Random seed
    #[arg(long, default_value_t = DEFAULT_GENERATOR_SEED)]
    seed: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_logger_with(cli.log_level.into(), cli.log_format)
        .context("Failed to initialize logger")?;

    let result = match cli.command {
        Command::Run(args) => run(args).await,
        Command::Generate(args) => generate(args),
    };

    if let Err(e) = result {
        eprintln!("etl_bench error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}

async fn run(args: RunArgs) -> Result<()> {
    let inputs = args
        .inputs
        .iter()
        .map(|spec| parse_input_spec(spec))
        .collect::<Result<Vec<_>>>()?;

    let config = BenchConfig {
        inputs,
        output_dir: args.output_dir,
        staging_db_path: args.staging_db,
        staging_mode: args.staging_mode,
        worker_count: args.workers,
    };

    let mut renderers: Vec<Box<dyn ReportRenderer>> = vec![Box::new(TextRenderer)];
    if let Some(path) = args.series_json {
        renderers.push(Box::new(JsonRenderer::new(path)));
    }

    let report = run_benchmark(&config, &renderers).await?;

    if let Some(path) = &args.report_json {
        write_report_json(&report, path)?;
        println!("Report saved in {}", path.display());
    }
    println!(
        "✅ Benchmarked {} run{} in {:.1}s - outputs in {}",
        report.outcomes.len(),
        if report.outcomes.len() == 1 { "" } else { "s" },
        report.elapsed_seconds,
        config.output_dir.display()
    );
    Ok(())
}

fn generate(args: GenerateArgs) -> Result<()> {
    let inputs = generate_inputs(&args.dir, &args.sizes, args.seed)?;
    let specs: Vec<String> = inputs
        .iter()
        .filter_map(|i| i.record_count.map(|c| format!("{}:{}", i.path.display(), c)))
        .collect();
    println!("Generated {} file(s): {}", inputs.len(), specs.join(" "));
    Ok(())
}
