use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SumcheckError {
    #[error("Error reading config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error decoding config file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid data source: {0:?} (expected \"file\" or \"stdin\")")]
    InvalidDataSource(String),

    #[error("Missing configuration value: {0}")]
    MissingField(&'static str),

    #[error("Invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Error reading file {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error reading from stdin: {0}")]
    Stdin(#[source] std::io::Error),

    #[error("Sum of numbers overflows a 64-bit integer")]
    SumOverflow,

    #[error("Error building HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Error making HTTP GET request to {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Unexpected HTTP response status from {url}: {status}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Error saving file {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error opening log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, SumcheckError>;
