use crate::{
    client::ApiClient,
    collectors::{
        Collector,
        ConferenceCollector,
        EventLogCollector,
        ParticipantCollector,
        UserCollector,
    },
    config::Config,
    error::SensorError,
    report::Channel,
};
use comfy_table::{
    presets,
    Attribute,
    Cell,
    ContentArrangement,
    Table,
};
use eyre::Result;
use std::{
    future::Future,
    pin::Pin,
};
use tracing::debug;

/// Orchestrates all collectors and manages the overall collection flow.
///
/// Collection is strictly sequential, one request in flight at a time, and
/// any collector failure aborts the whole run.
pub struct Orchestrator {
    user_collector: UserCollector,
    conference_collector: ConferenceCollector,
    participant_collector: ParticipantCollector,
    long_window_errors: EventLogCollector,
    short_window_errors: EventLogCollector,
}

impl Orchestrator {
    /// Create the shared API client once and hand clones to each collector.
    pub fn new(config: Config) -> Result<Self> {
        let client = ApiClient::new(config.connection.clone(), config.request_timeout)?;

        Ok(Self {
            user_collector: UserCollector::new(client.clone()),
            conference_collector: ConferenceCollector::new(client.clone()),
            participant_collector: ParticipantCollector::new(client.clone()),
            long_window_errors: EventLogCollector::new(
                client.clone(),
                config.long_window,
                config.timezone_offset_minutes,
            )?,
            short_window_errors: EventLogCollector::new(client, config.short_window, config.timezone_offset_minutes)?,
        })
    }

    /// Render the channels as a table for humans. PRTG never sees this.
    pub fn format(&self) -> String {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Channel").add_attribute(Attribute::Bold),
                Cell::new("Value").add_attribute(Attribute::Bold),
            ]);

        for channel in self.channels() {
            table.add_row(vec![Cell::new(&channel.channel), Cell::new(channel.value.to_string())]);
        }

        format!("{table}\n")
    }
}

impl Collector for Orchestrator {
    fn collect(&mut self) -> Pin<Box<dyn Future<Output = Result<(), SensorError>> + Send + '_>> {
        Box::pin(async move {
            let collectors: [&mut (dyn Collector + Send); 5] = [
                &mut self.user_collector,
                &mut self.conference_collector,
                &mut self.participant_collector,
                &mut self.long_window_errors,
                &mut self.short_window_errors,
            ];
            for collector in collectors {
                debug!(collector = collector.name(), "collecting");
                collector.collect().await?;
            }
            Ok(())
        })
    }

    fn channels(&self) -> Vec<Channel> {
        let collectors: [&dyn Collector; 5] = [
            &self.user_collector,
            &self.conference_collector,
            &self.participant_collector,
            &self.long_window_errors,
            &self.short_window_errors,
        ];
        collectors.into_iter().flat_map(|collector| collector.channels()).collect()
    }

    fn summary(&self) -> serde_json::Value {
        serde_json::json!({
            "users": self.user_collector.summary(),
            "conferences": self.conference_collector.summary(),
            "participants": self.participant_collector.summary(),
            "login_errors": {
                "long_window": self.long_window_errors.summary(),
                "short_window": self.short_window_errors.summary(),
            },
        })
    }

    fn name(&self) -> &'static str {
        "Orchestrator"
    }
}
