// ThingSpeak feed repository implementation
use crate::application::telemetry_repository::{FeedError, FeedRepository};
use crate::domain::feed::{RawSample, CHANNEL_COUNT};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ThingSpeakRepository {
    client: reqwest::Client,
    base_url: String,
    channel_id: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    feeds: Vec<FeedEntry>,
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    #[serde(default)]
    created_at: Option<Value>,
    #[serde(default)]
    field1: Option<Value>,
    #[serde(default)]
    field2: Option<Value>,
    #[serde(default)]
    field3: Option<Value>,
    #[serde(default)]
    field4: Option<Value>,
    #[serde(default)]
    field5: Option<Value>,
    #[serde(default)]
    field6: Option<Value>,
}

impl FeedEntry {
    fn into_raw(self) -> RawSample {
        let fields: [Option<Value>; CHANNEL_COUNT] =
            [self.field1, self.field2, self.field3, self.field4, self.field5, self.field6];
        RawSample {
            created_at: match self.created_at {
                Some(Value::String(s)) => s,
                _ => String::new(),
            },
            fields: fields.map(field_text),
        }
    }
}

/// ThingSpeak sends numbers as strings, but tolerate bare numbers too.
fn field_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl ThingSpeakRepository {
    pub fn new(base_url: String, channel_id: String, api_key: String, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            channel_id,
            api_key,
        })
    }

    fn build_feed_url(&self, limit: usize) -> String {
        format!(
            "{}/{}/feeds.json?api_key={}&results={}",
            self.base_url,
            urlencoding::encode(&self.channel_id),
            urlencoding::encode(&self.api_key),
            limit
        )
    }
}

#[async_trait]
impl FeedRepository for ThingSpeakRepository {
    async fn fetch_feed(&self, limit: usize) -> Result<Vec<RawSample>, FeedError> {
        let url = self.build_feed_url(limit);
        tracing::debug!("Fetching feed for channel {} (results={})", self.channel_id, limit);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.without_url().to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Status { status, body });
        }

        let data = response
            .json::<FeedResponse>()
            .await
            .map_err(|e| FeedError::Decode(e.without_url().to_string()))?;

        tracing::debug!("Feed returned {} entries", data.feeds.len());
        Ok(data.feeds.into_iter().map(FeedEntry::into_raw).collect())
    }
}
