use crate::{
    classify::{
        classify_user_status,
        UserPresence,
    },
    client::ApiClient,
    collectors::Collector,
    error::SensorError,
    metrics::{
        UserCounts,
        UserRecord,
    },
    pagination::{
        paginate_cursor,
        CursorPage,
    },
    report::Channel,
};
use serde::Deserialize;
use std::{
    future::Future,
    pin::Pin,
};
use tracing::debug;

/// Counts directory users by presence.
pub struct UserCollector {
    client: ApiClient,
    counts: Option<UserCounts>,
}

impl UserCollector {
    pub fn new(client: ApiClient) -> Self {
        Self { client, counts: None }
    }

    /// Drain the cursor-paginated user directory.
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, SensorError> {
        let client = &self.client;
        paginate_cursor("users", |cursor| {
            let mut params = Vec::new();
            if let Some(page_id) = cursor {
                params.push(("page_id", page_id.to_string()));
            }
            async move {
                let page: UsersPage = client.get("users", &params).await?;
                Ok(CursorPage {
                    items: page.users,
                    next_page_id: page.next_page_id,
                })
            }
        })
        .await
    }
}

impl Collector for UserCollector {
    fn collect(&mut self) -> Pin<Box<dyn Future<Output = Result<(), SensorError>> + Send + '_>> {
        Box::pin(async move {
            let users = self.fetch_users().await?;
            let mut counts = UserCounts::default();
            for user in &users {
                match classify_user_status(user.status) {
                    Some(UserPresence::Online) => counts.online += 1,
                    Some(UserPresence::Offline) => counts.offline += 1,
                    // Statuses outside the known set belong to neither bucket.
                    None => debug!(status = user.status, "dropping unrecognized user status"),
                }
            }
            debug!(
                total = users.len(),
                online = counts.online,
                offline = counts.offline,
                "user directory collected"
            );
            self.counts = Some(counts);
            Ok(())
        })
    }

    fn channels(&self) -> Vec<Channel> {
        match &self.counts {
            Some(counts) => vec![
                Channel::new("Users Online", counts.online),
                Channel::new("Users Offline", counts.offline),
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
        "UserCollector"
    }
}

// Wire shape of `GET users`.
#[derive(Debug, Deserialize)]
struct UsersPage {
    users: Vec<UserRecord>,
    next_page_id: i64,
}
