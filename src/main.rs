use anyhow::Result;
use clap::Parser;
use leetpress::press::{DEFAULT_BREAK_LOG_PATH, DEFAULT_OUTPUT_PATH};
use leetpress::LeetPressBuilder;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Press the LeetCode problem catalog into a single HTML document.
///
/// A plain invocation starts a new run, or resumes the previous one if it
/// left a break log behind.
#[derive(Debug, Parser)]
#[command(name = "leetpress", version, about)]
struct Args {
    /// Path of the concatenated HTML document.
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Path of the break marker left behind by an interrupted run.
    #[arg(long, default_value = DEFAULT_BREAK_LOG_PATH)]
    break_log: PathBuf,

    /// Include paid-only problems.
    #[arg(long)]
    include_paid: bool,
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("leetpress=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let press = LeetPressBuilder::default()
        .output_path(args.output)
        .break_log_path(args.break_log)
        .include_paid(args.include_paid)
        .build()?;

    press.run().await?;
    Ok(())
}
