use anyhow::{Context, Result};
use auxide_probe::diff::{compare_reports, DEFAULT_TOLERANCE};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "floatdiff")]
#[command(about = "Compare two text files allowing float tolerance")]
struct Cli {
    /// Reference file.
    file1: PathBuf,

    /// Output file to compare.
    file2: PathBuf,

    /// Tolerance.
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tol: f64,

    /// Positional tolerance; overrides --tol when numeric.
    #[arg(hide = true)]
    pos_tol: Option<String>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let tol = cli
        .pos_tol
        .as_deref()
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(cli.tol);

    let reference = std::fs::read_to_string(&cli.file1)
        .with_context(|| format!("read {}", cli.file1.display()))?;
    let candidate = std::fs::read_to_string(&cli.file2)
        .with_context(|| format!("read {}", cli.file2.display()))?;

    let report = compare_reports(&reference, &candidate, tol);
    tracing::debug!(mismatches = report.mismatches.len(), tol, "compared");
    print!("{}", report);
    Ok(())
}
