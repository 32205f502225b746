//! # TrueConf PRTG Sensor - Main Entry Point
//!
//! One poll cycle per invocation, cron-style:
//!
//! 1. Build the connection from the CLI parameters
//! 2. Run every collector sequentially against the management API
//! 3. Print the PRTG document on stdout (logs go to stderr)
//!
//! Any failure replaces the whole report with the PRTG error document and
//! a non-zero exit code; partial channel lists are never emitted.

use clap::{
    error::ErrorKind,
    Parser,
};
use eyre::Result;
use std::time::Duration;
use tracing::info;
use trueconf_prtg_sensor::{
    report,
    Collector,
    Config,
    Connection,
    Orchestrator,
};

#[derive(Parser, Debug)]
#[command(name = "trueconf-prtg-sensor")]
#[command(about = "PRTG custom sensor for the TrueConf Server management API")]
#[command(version)]
struct Cli {
    /// Management API access token
    access_token: String,

    /// Server host name
    host: String,

    /// Server HTTPS port
    port: u16,

    /// Management API version (the N in /api/vN/)
    api_version: u8,

    /// Per-request timeout (e.g. "15s", "30s")
    #[arg(long, default_value = "15s")]
    timeout: String,

    /// Server timezone offset in minutes, forwarded to the event-log endpoint
    #[arg(long, default_value_t = 180, allow_hyphen_values = true)]
    timezone_offset: i32,

    /// Longer login-error lookback window (e.g. "5m")
    #[arg(long, default_value = "5m")]
    long_window: String,

    /// Shorter login-error lookback window (e.g. "1m")
    #[arg(long, default_value = "1m")]
    short_window: String,

    /// Render a human-readable table instead of the PRTG document
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    // PRTG reads stdout unconditionally, so even argument errors must come
    // back as the error document. Help and version stay on the terminal.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => err.exit(),
        Err(err) => fail(&format!("argument error: {err}")),
    };

    // Setup logging. Stdout carries the report document, so logs go to stderr.
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("trueconf_prtg_sensor={log_level}"))
        .with_writer(std::io::stderr)
        .init();

    color_eyre::install().expect("color_eyre init");

    if let Err(err) = run(cli).await {
        fail(&format!("{err}"));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let connection = Connection::new(&cli.host, cli.port, cli.api_version, cli.access_token)?;
    info!(base_url = %connection.base_url, "starting sensor poll");

    let config = Config {
        connection,
        request_timeout: parse_duration(&cli.timeout)?,
        timezone_offset_minutes: cli.timezone_offset,
        long_window: parse_duration(&cli.long_window)?,
        short_window: parse_duration(&cli.short_window)?,
    };

    let mut orchestrator = Orchestrator::new(config)?;
    orchestrator.collect().await?;
    tracing::debug!(summary = %orchestrator.summary(), "collected data");

    if cli.pretty {
        println!("{}", orchestrator.format());
    } else {
        let document = report::success_document(orchestrator.channels());
        println!("{}", serde_json::to_string(&document)?);
    }

    info!("sensor poll completed");
    Ok(())
}

fn parse_duration(duration_str: &str) -> Result<Duration> {
    humantime::parse_duration(duration_str).map_err(|e| eyre::eyre!("Invalid duration '{}': {}", duration_str, e))
}

/// Print the PRTG error document and terminate with a failing exit code.
fn fail(message: &str) -> ! {
    println!("{}", serde_json::json!(report::error_document(message)));
    std::process::exit(1);
}
