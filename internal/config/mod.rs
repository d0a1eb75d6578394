use crate::error::{Result, SumcheckError};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_NUMBERS: &str = "NUMBERS";
const ENV_URL: &str = "URL";
const ENV_LOG_FILE: &str = "LOG_FILE";
const ENV_OUTPUT_FILE: &str = "OUTPUT_FILE";
const ENV_DATA_SOURCE: &str = "DATA_SOURCE";
const ENV_INPUT_FILE: &str = "INPUT_FILE";
const ENV_TIMEOUT_SECS: &str = "TIMEOUT_SECS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    File,
    Stdin,
}

impl FromStr for DataSource {
    type Err = SumcheckError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(DataSource::File),
            "stdin" => Ok(DataSource::Stdin),
            _ => Err(SumcheckError::InvalidDataSource(value.to_string())),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File => f.write_str("file"),
            DataSource::Stdin => f.write_str("stdin"),
        }
    }
}

/// On-disk shape of `config.json`. Every field is optional so that missing
/// entries can be filled from the environment.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    numbers: Option<Vec<i64>>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    log_file: Option<String>,
    #[serde(default)]
    output_file: Option<String>,
    #[serde(default)]
    data_source: Option<String>,
    #[serde(default)]
    input_file: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
}

/// The validated config record. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub numbers: Vec<i64>,
    pub url: String,
    pub log_file: PathBuf,
    pub output_file: PathBuf,
    pub data_source: DataSource,
    pub input_file: Option<PathBuf>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Environment,
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub origin: ConfigOrigin,
    /// Environment variables that supplied a value the file left empty.
    pub env_fields: Vec<&'static str>,
    /// `NUMBERS` entries that were not integers and got skipped.
    pub rejected_numbers: Vec<String>,
}

/// Command-line values that take precedence over both file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_source: Option<String>,
    pub input_file: Option<PathBuf>,
    pub output_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub url: Option<String>,
}

pub fn load(path: &Path, overrides: &Overrides) -> Result<LoadedConfig> {
    load_with(path, overrides, |key| env::var(key).ok())
}

pub fn load_with<F>(path: &Path, overrides: &Overrides, lookup: F) -> Result<LoadedConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let (file, origin) = match read_file(path)? {
        Some(file) => (file, ConfigOrigin::File(path.to_path_buf())),
        None => (FileConfig::default(), ConfigOrigin::Environment),
    };

    let mut env_fields = Vec::new();
    let mut rejected_numbers = Vec::new();
    let mut fallback = |value: Option<String>, key: &'static str| -> Option<String> {
        if let Some(value) = non_empty(value) {
            return Some(value);
        }
        let value = non_empty(lookup(key));
        if value.is_some() {
            env_fields.push(key);
        }
        value
    };

    let url = fallback(file.url, ENV_URL);
    let log_file = fallback(file.log_file, ENV_LOG_FILE);
    let output_file = fallback(file.output_file, ENV_OUTPUT_FILE);
    let data_source = fallback(file.data_source, ENV_DATA_SOURCE);
    let input_file = fallback(file.input_file, ENV_INPUT_FILE);
    let timeout_raw = fallback(
        file.timeout_secs.map(|secs| secs.to_string()),
        ENV_TIMEOUT_SECS,
    );
    let numbers = match file.numbers.filter(|numbers| !numbers.is_empty()) {
        Some(numbers) => numbers,
        None => {
            let raw = fallback(None, ENV_NUMBERS).unwrap_or_default();
            let (numbers, rejected) = parse_numbers(&raw);
            rejected_numbers = rejected;
            numbers
        }
    };

    let timeout_secs = timeout_raw
        .and_then(|raw| raw.parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let data_source = overrides
        .data_source
        .clone()
        .or(data_source)
        .unwrap_or_default()
        .parse::<DataSource>()?;

    let url = non_empty(overrides.url.clone())
        .or(url)
        .ok_or(SumcheckError::MissingField("url"))?;
    validate_url(&url)?;

    let log_file = overrides
        .log_file
        .clone()
        .or_else(|| log_file.map(PathBuf::from))
        .ok_or(SumcheckError::MissingField("log_file"))?;
    let output_file = overrides
        .output_file
        .clone()
        .or_else(|| output_file.map(PathBuf::from))
        .ok_or(SumcheckError::MissingField("output_file"))?;
    let input_file = overrides
        .input_file
        .clone()
        .or_else(|| input_file.map(PathBuf::from));
    if data_source == DataSource::File && input_file.is_none() {
        return Err(SumcheckError::MissingField("input_file"));
    }

    Ok(LoadedConfig {
        config: Config {
            numbers,
            url,
            log_file,
            output_file,
            data_source,
            input_file,
            timeout: Duration::from_secs(timeout_secs),
        },
        origin,
        env_fields,
        rejected_numbers,
    })
}

/// Splits a comma-separated list, keeping entries that parse as integers.
pub fn parse_numbers(raw: &str) -> (Vec<i64>, Vec<String>) {
    let mut numbers = Vec::new();
    let mut rejected = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse::<i64>() {
            Ok(n) => numbers.push(n),
            Err(_) => rejected.push(entry.to_string()),
        }
    }
    (numbers, rejected)
}

fn read_file(path: &Path) -> Result<Option<FileConfig>> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SumcheckError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let file = serde_json::from_str(&data).map_err(|source| SumcheckError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(file))
}

fn validate_url(raw: &str) -> Result<()> {
    let invalid = |reason: String| SumcheckError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = url::Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
