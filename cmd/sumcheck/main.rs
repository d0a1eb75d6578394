use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

#[path = "../../internal/config/mod.rs"]
mod config;
#[path = "../../internal/error/mod.rs"]
mod error;
#[path = "../../internal/health/mod.rs"]
mod health;
#[path = "../../internal/input/mod.rs"]
mod input;
#[path = "../../internal/logging/mod.rs"]
mod logging;
#[path = "../../internal/output/mod.rs"]
mod output;
#[path = "../../internal/runner/mod.rs"]
mod runner;
#[path = "../../internal/sum/mod.rs"]
mod sum;

#[derive(Parser)]
#[command(name = "sumcheck", version)]
#[command(about = "Sum configured numbers, health-check a URL and write a summary file")]
struct Args {
    /// Path to the JSON config file
    #[arg(long, short, env = "SUMCHECK_CONFIG", default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Where input data comes from: "file" or "stdin"
    #[arg(long, value_name = "SOURCE")]
    source: Option<String>,

    /// Input file, used when the source is "file"
    #[arg(long)]
    input: Option<PathBuf>,

    /// Summary output file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log file (lines are appended)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// URL to health-check
    #[arg(long)]
    url: Option<String>,

    /// Do not echo the summary to stdout
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn overrides(&self) -> config::Overrides {
        config::Overrides {
            data_source: self.source.clone(),
            input_file: self.input.clone(),
            output_file: self.output.clone(),
            log_file: self.log_file.clone(),
            url: self.url.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Nothing is logged to a file until the config says where the file is.
    let (loaded, _guards) = match setup(&args) {
        Ok(ready) => ready,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return ExitCode::FAILURE;
        }
    };

    match runner::run(&loaded).await {
        Ok(report) => {
            tracing::debug!(sum = report.sum, status = %report.status, "run complete");
            if !args.quiet {
                print!("{}", output::render_summary(report.sum, &report.input));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn setup(args: &Args) -> Result<(config::LoadedConfig, logging::LogGuards)> {
    let loaded = config::load(&args.config, &args.overrides())
        .with_context(|| format!("load configuration ({})", args.config.display()))?;
    let guards = logging::init_run_logging(&loaded.config.log_file)
        .context("initialize logging")?;
    Ok((loaded, guards))
}
