use crate::{
    classify::{
        classify_login_event,
        LoginFailure,
    },
    client::ApiClient,
    collectors::Collector,
    error::SensorError,
    metrics::{
        LogEventRecord,
        LoginErrorCounts,
    },
    pagination::{
        paginate_counted,
        CountedPage,
    },
    report::Channel,
};
use chrono::{
    FixedOffset,
    Utc,
};
use eyre::{
    eyre,
    Result,
};
use serde::Deserialize;
use std::{
    future::Future,
    pin::Pin,
};
use tracing::debug;

/// Events requested per page; the server caps page size at 1000.
const PAGE_SIZE: u32 = 1000;

/// Timestamp format the event-log endpoint expects for `date_from`/`date_to`.
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Counts failed logins within one lookback window.
///
/// The endpoint filters server-side by time range, so two windows mean two
/// independent collections, never one fetch filtered twice.
pub struct EventLogCollector {
    client: ApiClient,
    window: chrono::Duration,
    window_label: String,
    timezone: FixedOffset,
    timezone_offset_minutes: i32,
    counts: Option<LoginErrorCounts>,
}

impl EventLogCollector {
    pub fn new(client: ApiClient, window: std::time::Duration, timezone_offset_minutes: i32) -> Result<Self> {
        let timezone = FixedOffset::east_opt(timezone_offset_minutes * 60)
            .ok_or_else(|| eyre!("timezone offset out of range: {timezone_offset_minutes} minutes"))?;
        let window_label = humantime::format_duration(window).to_string();
        let window =
            chrono::Duration::from_std(window).map_err(|err| eyre!("window '{window_label}' too large: {err}"))?;
        Ok(Self {
            client,
            window,
            window_label,
            timezone,
            timezone_offset_minutes,
            counts: None,
        })
    }

    /// Drain the event log for `[now - window, now]`, expressed in the
    /// server's configured offset.
    async fn fetch_events(&self) -> Result<Vec<LogEventRecord>, SensorError> {
        let now = Utc::now().with_timezone(&self.timezone);
        let date_to = now.format(TIME_FORMAT).to_string();
        let date_from = (now - self.window).format(TIME_FORMAT).to_string();

        let client = &self.client;
        let timezone_offset_minutes = self.timezone_offset_minutes;
        paginate_counted("logs/events", move |page_id| {
            let mut params = vec![
                ("date_from", date_from.clone()),
                ("date_to", date_to.clone()),
                ("timezone", timezone_offset_minutes.to_string()),
                ("page_size", PAGE_SIZE.to_string()),
            ];
            if let Some(page_id) = page_id {
                params.push(("page_id", page_id.to_string()));
            }
            async move {
                let page: EventLogPage = client.get("logs/events", &params).await?;
                Ok(CountedPage {
                    items: page.list,
                    total: page.cnt,
                })
            }
        })
        .await
    }
}

impl Collector for EventLogCollector {
    fn collect(&mut self) -> Pin<Box<dyn Future<Output = Result<(), SensorError>> + Send + '_>> {
        Box::pin(async move {
            let events = self.fetch_events().await?;
            let mut counts = LoginErrorCounts::default();
            for event in &events {
                match classify_login_event(event) {
                    Some(LoginFailure::Admin) => counts.admin += 1,
                    Some(LoginFailure::User) => counts.user += 1,
                    None => {}
                }
            }
            debug!(
                window = %self.window_label,
                events = events.len(),
                admin_errors = counts.admin,
                user_errors = counts.user,
                "event log collected"
            );
            self.counts = Some(counts);
            Ok(())
        })
    }

    fn channels(&self) -> Vec<Channel> {
        match &self.counts {
            Some(counts) => vec![
                Channel::new(format!("User Login Errors ({})", self.window_label), counts.user),
                Channel::new(format!("Admin Login Errors ({})", self.window_label), counts.admin),
            ],
            None => Vec::new(),
        }
    }

    fn summary(&self) -> serde_json::Value {
        match &self.counts {
            Some(counts) => serde_json::json!({
                "window": self.window_label,
                "admin": counts.admin,
                "user": counts.user,
            }),
            None => serde_json::json!({"error": "no data collected yet"}),
        }
    }

    fn name(&self) -> &'static str {
        "EventLogCollector"
    }
}

// Wire shape of `GET logs/events`. `cnt` is the total across all pages.
#[derive(Debug, Deserialize)]
struct EventLogPage {
    list: Vec<LogEventRecord>,
    cnt: usize,
}
