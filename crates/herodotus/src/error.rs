use std::time::Duration;

use thiserror::Error;

use crate::QueryId;

#[derive(Debug, Error)]
pub enum HerodotusError {
    #[error("Failed to fetch: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Failed to decode: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Failed to parse or build URL")]
    Url,
    #[error("Herodotus API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("Query {0} failed")]
    QueryFailed(QueryId),
    #[error("Query {query_id} not done after {elapsed:?}")]
    Timeout { query_id: QueryId, elapsed: Duration },
}
