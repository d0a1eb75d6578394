use crate::config::{ConfigOrigin, LoadedConfig};
use crate::error::Result;
use crate::health::HealthClient;
use crate::{input, output, sum};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct RunReport {
    pub sum: i64,
    pub status: StatusCode,
    pub input: String,
}

/// Runs the pipeline once: input, sum, health check, summary file.
pub async fn run(loaded: &LoadedConfig) -> Result<RunReport> {
    let cfg = &loaded.config;

    match &loaded.origin {
        ConfigOrigin::File(path) => info!("Configuration loaded from {}", path.display()),
        ConfigOrigin::Environment => info!("Config file not found, configuration taken from environment"),
    }
    if !loaded.env_fields.is_empty() {
        info!("Values taken from environment: {}", loaded.env_fields.join(", "));
    }
    for entry in &loaded.rejected_numbers {
        warn!("Skipping non-integer NUMBERS entry {:?}", entry);
    }

    let data = input::read_input(cfg.data_source, cfg.input_file.as_deref())?;
    debug!(
        source = %cfg.data_source,
        bytes = data.len(),
        "input data read"
    );

    let total = sum::calculate_sum(&cfg.numbers)?;
    info!("Sum of numbers: {}", total);

    let client = HealthClient::new(cfg.timeout)?;
    let status = client.check(&cfg.url).await?;
    info!("HTTP request to {} successful ({})", cfg.url, status);

    output::write_summary(&cfg.output_file, total, &data)?;
    info!("Summary written to {}", cfg.output_file.display());

    Ok(RunReport {
        sum: total,
        status,
        input: data,
    })
}
