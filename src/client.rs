//! Authenticated HTTP client for the management API.

use crate::{
    config::Connection,
    error::SensorError,
};
use eyre::Result;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Thin wrapper around [`reqwest::Client`] that joins paths onto the base
/// URL and attaches the access token to every request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    connection: Connection,
    http: reqwest::Client,
}

impl ApiClient {
    /// The servers this sensor targets usually run with self-signed
    /// certificates, so certificate validation is off. Every request gets a
    /// bounded timeout; a hung server must not hang the poll.
    pub fn new(connection: Connection, request_timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(request_timeout)
            .build()?;
        Ok(Self { connection, http })
    }

    /// Issue `GET {base_url}{path}` with the given query parameters and
    /// deserialize the JSON body.
    ///
    /// Single attempt: transport failures, non-200 statuses and malformed
    /// bodies are all returned as errors, never retried.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> Result<T, SensorError> {
        let mut url = self.connection.base_url.join(path).map_err(SensorError::Url)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("access_token", &self.connection.access_token);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        debug!(%path, "GET");
        let response = self.http.get(url).send().await.map_err(SensorError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(SensorError::Transport)?;
        if status != reqwest::StatusCode::OK {
            return Err(SensorError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_str(&body).map_err(SensorError::Parse)
    }
}
