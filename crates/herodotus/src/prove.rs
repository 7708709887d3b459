use alloy_primitives::{Address, B256};
use tracing::info;

use crate::{
    dashboard_url, poll_until_done, BatchQuery, HerodotusClient, HerodotusError, PollConfig,
    QueryId, QueryTime,
};

/// Storage of one account to attest at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofRequest {
    pub origin_chain_id: u64,
    pub destination_chain_id: String,
    pub time: QueryTime,
    pub account: Address,
    pub slots: Vec<B256>,
}

impl ProofRequest {
    pub fn batch_query(&self) -> BatchQuery {
        BatchQuery::new(self.destination_chain_id.clone()).with_slots(
            self.origin_chain_id,
            self.time,
            self.account,
            self.slots.iter().copied(),
        )
    }
}

/// Submits `request` (or resumes `existing`) and waits until the proof is available on the
/// destination chain.
pub async fn prove_slots(
    client: &HerodotusClient,
    request: &ProofRequest,
    existing: Option<QueryId>,
    poll: PollConfig,
) -> Result<QueryId, HerodotusError> {
    let query_id = match existing {
        Some(query_id) => {
            info!(%query_id, "Resuming Herodotus query");
            query_id
        }
        None => client.submit_batch_query(&request.batch_query()).await?,
    };

    info!(%query_id, dashboard = %dashboard_url(&query_id), "Herodotus query submitted");
    info!(
        timeout = ?poll.timeout,
        "This might take up to 20 minutes, most queries are much faster"
    );

    poll_until_done(client, &query_id, poll).await?;
    Ok(query_id)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use alloy_primitives::address;
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::{PATH_BATCH_QUERY_STATUS, PATH_SUBMIT_BATCH_QUERY};

    fn request() -> ProofRequest {
        ProofRequest {
            origin_chain_id: 11155111,
            destination_chain_id: "SN_SEPOLIA".to_string(),
            time: QueryTime::Block(10173637),
            account: address!("aB20520fabd94812483B43c8c917D1490e15ee88"),
            slots: vec![B256::repeat_byte(1), B256::repeat_byte(2), B256::repeat_byte(3)],
        }
    }

    const FAST: PollConfig =
        PollConfig { interval: Duration::from_millis(10), timeout: Duration::from_secs(5) };

    #[tokio::test]
    async fn submits_then_polls() -> eyre::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let submit = server
            .mock("POST", PATH_SUBMIT_BATCH_QUERY)
            .match_query(Matcher::Any)
            .match_body(Matcher::Json(serde_json::to_value(request().batch_query())?))
            .with_status(200)
            .with_body(json!({ "internalId": "01HNEW" }).to_string())
            .create_async()
            .await;
        let status = server
            .mock("GET", PATH_BATCH_QUERY_STATUS)
            .match_query(Matcher::UrlEncoded("batchQueryId".into(), "01HNEW".into()))
            .with_status(200)
            .with_body(json!({ "queryStatus": "DONE" }).to_string())
            .create_async()
            .await;

        let client = HerodotusClient::new(server.url().parse()?, "key".to_string());
        let query_id = prove_slots(&client, &request(), None, FAST).await?;
        assert_eq!(query_id, QueryId("01HNEW".to_string()));
        submit.assert_async().await;
        status.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn existing_query_is_not_resubmitted() -> eyre::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let submit = server
            .mock("POST", PATH_SUBMIT_BATCH_QUERY)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;
        let _status = server
            .mock("GET", PATH_BATCH_QUERY_STATUS)
            .match_query(Matcher::UrlEncoded("batchQueryId".into(), "01HOLD".into()))
            .with_status(200)
            .with_body(json!({ "queryStatus": "DONE" }).to_string())
            .create_async()
            .await;

        let client = HerodotusClient::new(server.url().parse()?, "key".to_string());
        let existing = Some(QueryId("01HOLD".to_string()));
        let query_id = prove_slots(&client, &request(), existing, FAST).await?;
        assert_eq!(query_id, QueryId("01HOLD".to_string()));
        submit.assert_async().await;
        Ok(())
    }

    #[test]
    fn batch_query_contains_all_slots() {
        assert_eq!(request().batch_query().slot_count(), 3);
    }
}
