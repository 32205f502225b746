//! # Configuration Module
//!
//! Connection parameters and per-run settings for the sensor.
//!
//! The server connection is a single immutable value created at startup and
//! handed to every component that needs it; nothing reads ambient state.

use eyre::Result;
use serde::{
    Deserialize,
    Serialize,
};
use std::time::Duration;
use url::Url;

/// Where and how to reach the management API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub base_url: Url,
    pub access_token: String,
}

impl Connection {
    /// Build the connection from validated CLI parameters.
    /// The management API lives under `https://{host}:{port}/api/v{version}/`.
    pub fn new(host: &str, port: u16, api_version: u8, access_token: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(&format!("https://{host}:{port}/api/v{api_version}/"))?;
        Ok(Self {
            base_url,
            access_token: access_token.into(),
        })
    }

    /// Point the sensor at an arbitrary base URL (plain HTTP included).
    /// Tests use this to target a local mock server.
    pub fn with_base_url(base_url: Url, access_token: impl Into<String>) -> Self {
        Self {
            base_url,
            access_token: access_token.into(),
        }
    }
}

/// Everything one poll cycle needs besides the connection itself.
#[derive(Debug, Clone)]
pub struct Config {
    pub connection: Connection,
    /// Upper bound for every single request.
    pub request_timeout: Duration,
    /// Server timezone offset in minutes, forwarded to the event-log endpoint.
    pub timezone_offset_minutes: i32,
    /// Longer login-error lookback window.
    pub long_window: Duration,
    /// Shorter login-error lookback window.
    pub short_window: Duration,
}
