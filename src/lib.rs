//! # TrueConf PRTG Sensor
//!
//! A PRTG custom sensor that polls a TrueConf Server's HTTP management API
//! and reports operational metrics as a PRTG JSON document.
//!
//! ## Channels
//!
//! - **Users**: online and offline counts over the whole user directory
//! - **Conferences**: total, running and stopped counts
//! - **Participants**: user and guest counts across running conferences
//! - **Login errors**: failed admin and user logins over two lookback
//!   windows (5 and 1 minutes by default)
//!
//! ## Architecture
//!
//! The tool is built with a modular architecture where each collector is
//! self-contained:
//!
//! - **`config`**: connection parameters and per-run settings
//! - **`client`**: authenticated HTTP access to the management API
//! - **`pagination`**: drivers for the API's two pagination conventions
//! - **`classify`**: pure record classifiers
//! - **`metrics`**: wire records and per-family count summaries
//! - **`collectors`**: self-contained collection modules plus the
//!   orchestrator that runs them sequentially
//! - **`report`**: the PRTG document types
//!
//! ## Usage
//!
//! ```bash
//! # Poll a server and print the PRTG document
//! trueconf-prtg-sensor SECRET-TOKEN vcs.example.org 443 4
//!
//! # Human-readable table instead of JSON
//! trueconf-prtg-sensor SECRET-TOKEN vcs.example.org 443 4 --pretty
//! ```

pub mod classify;
pub mod client;
pub mod collectors;
pub mod config;
pub mod error;
pub mod metrics;
pub mod pagination;
pub mod report;

pub use client::ApiClient;
pub use collectors::*;
pub use config::{
    Config,
    Connection,
};
pub use error::SensorError;
pub use metrics::*;
