// Repository trait for the streetlight telemetry feed
use crate::domain::feed::{EmptyFeed, RawSample};
use async_trait::async_trait;

/// Everything that makes a fetch cycle fall back to synthetic data.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("feed unreachable: {0}")]
    Transport(String),

    #[error("feed answered with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("feed payload could not be decoded: {0}")]
    Decode(String),

    #[error(transparent)]
    Empty(#[from] EmptyFeed),
}

#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Fetch the most recent `limit` feed records, oldest first.
    async fn fetch_feed(&self, limit: usize) -> Result<Vec<RawSample>, FeedError>;
}
