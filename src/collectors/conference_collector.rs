use crate::{
    classify::{
        classify_conference_state,
        ConferenceState,
    },
    client::ApiClient,
    collectors::Collector,
    error::SensorError,
    metrics::{
        ConferenceCounts,
        ConferenceRecord,
    },
    pagination::{
        paginate_counted,
        CountedPage,
    },
    report::Channel,
};
use serde::Deserialize;
use std::{
    future::Future,
    pin::Pin,
};
use tracing::debug;

/// Conferences requested per page.
const PAGE_SIZE: u32 = 300;

/// Drain the count-paginated conference list.
///
/// Shared with the participant collector, which needs the full records to
/// find the running conferences.
pub(crate) async fn fetch_conferences(client: &ApiClient) -> Result<Vec<ConferenceRecord>, SensorError> {
    paginate_counted("conferences", |page_id| {
        let mut params = vec![("page_size", PAGE_SIZE.to_string())];
        if let Some(page_id) = page_id {
            params.push(("page_id", page_id.to_string()));
        }
        async move {
            let page: ConferencesPage = client.get("conferences", &params).await?;
            Ok(CountedPage {
                items: page.conferences,
                total: page.cnt,
            })
        }
    })
    .await
}

/// Counts conferences by state.
pub struct ConferenceCollector {
    client: ApiClient,
    counts: Option<ConferenceCounts>,
}

impl ConferenceCollector {
    pub fn new(client: ApiClient) -> Self {
        Self { client, counts: None }
    }
}

impl Collector for ConferenceCollector {
    fn collect(&mut self) -> Pin<Box<dyn Future<Output = Result<(), SensorError>> + Send + '_>> {
        Box::pin(async move {
            let conferences = fetch_conferences(&self.client).await?;
            let mut counts = ConferenceCounts {
                total: conferences.len() as i64,
                ..ConferenceCounts::default()
            };
            for conference in &conferences {
                match classify_conference_state(&conference.state) {
                    ConferenceState::Running => counts.running += 1,
                    ConferenceState::Stopped => counts.stopped += 1,
                    ConferenceState::Other => {}
                }
            }
            debug!(
                total = counts.total,
                running = counts.running,
                stopped = counts.stopped,
                "conference list collected"
            );
            self.counts = Some(counts);
            Ok(())
        })
    }

    fn channels(&self) -> Vec<Channel> {
        match &self.counts {
            Some(counts) => vec![
                Channel::new("Conferences Total", counts.total),
                Channel::new("Conferences Running", counts.running),
                Channel::new("Conferences Stopped", counts.stopped),
            ],
            None => Vec::new(),
        }
    }

    fn summary(&self) -> serde_json::Value {
        match &self.counts {
            Some(counts) => serde_json::json!(counts),
            None => serde_json::json!({"error": "no data collected yet"}),
        }
    }

    fn name(&self) -> &'static str {
        "ConferenceCollector"
    }
}

// Wire shape of `GET conferences`. `cnt` is the total across all pages.
#[derive(Debug, Deserialize)]
struct ConferencesPage {
    conferences: Vec<ConferenceRecord>,
    cnt: usize,
}
