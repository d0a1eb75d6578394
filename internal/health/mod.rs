use crate::error::{Result, SumcheckError};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::debug;

pub struct HealthClient {
    http: Client,
}

impl HealthClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("sumcheck/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(SumcheckError::HttpClient)?;

        Ok(Self { http })
    }

    /// Issues a single GET and accepts only `200 OK`.
    pub async fn check(&self, url: &str) -> Result<StatusCode> {
        debug!(%url, "sending health check request");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| SumcheckError::Request {
                url: url.to_string(),
                source,
            })?;

        match response.status() {
            StatusCode::OK => Ok(StatusCode::OK),
            status => Err(SumcheckError::UnexpectedStatus {
                url: url.to_string(),
                status,
            }),
        }
    }
}
