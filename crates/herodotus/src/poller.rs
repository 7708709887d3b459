use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use crate::{HerodotusClient, HerodotusError, QueryId, QueryStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    /// Measured from the first status request.
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self { interval: Duration::from_secs(5), timeout: Duration::from_secs(30 * 60) }
    }
}

/// Polls the status of `query_id` every `config.interval` until it is `DONE`.
///
/// There is no backoff and no retry: a failed status request ends polling with its error.
pub async fn poll_until_done(
    client: &HerodotusClient,
    query_id: &QueryId,
    config: PollConfig,
) -> Result<(), HerodotusError> {
    let started = Instant::now();
    let mut polls = 0u64;
    loop {
        polls += 1;
        match client.batch_query_status(query_id).await? {
            QueryStatus::Done => {
                info!(%query_id, polls, elapsed = ?started.elapsed(), "Query is done");
                return Ok(());
            }
            QueryStatus::Failed => return Err(HerodotusError::QueryFailed(query_id.clone())),
            QueryStatus::InProgress(status) => {
                debug!(%query_id, %status, polls, "Query not done yet");
            }
        }

        sleep(config.interval).await;
        let elapsed = started.elapsed();
        if elapsed >= config.timeout {
            return Err(HerodotusError::Timeout { query_id: query_id.clone(), elapsed });
        }
    }
}
