use anyhow::{Context, Result};
use auxide_probe::config::RunParams;
use auxide_probe::harness::run_probe;
use auxide_probe::report::{write_table, write_wav};
use auxide_probe::units;
use clap::Parser;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "auxide-probe")]
#[command(about = "Run a processing unit across a control transition and print its output")]
struct Cli {
    /// Total frames to compute (non-positive or non-numeric: 128).
    #[arg(allow_hyphen_values = true)]
    frames: Option<String>,

    /// Sample rate passed to the unit (non-positive or non-numeric: 48000).
    #[arg(allow_hyphen_values = true)]
    sample_rate: Option<String>,

    /// Reference unit to drive.
    #[arg(long, default_value = "gated-sine")]
    unit: String,

    /// Frames in the first block.
    #[arg(long, default_value_t = auxide_probe::config::DEFAULT_SPLIT)]
    split: usize,

    /// Also write the output channels to this WAV file.
    #[arg(long)]
    wav: Option<PathBuf>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let params = RunParams::from_args(cli.frames.as_deref(), cli.sample_rate.as_deref())
        .with_split(cli.split);
    tracing::debug!(?params, unit = %cli.unit, "starting probe run");

    let unit = units::by_name(&cli.unit)?;
    let output = run_probe(unit, params)?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_table(&mut out, &output.outputs).context("write report")?;

    if let Some(path) = cli.wav {
        write_wav(&path, &output.outputs, output.sample_rate)
            .with_context(|| format!("write wav {}", path.display()))?;
    }
    Ok(())
}
