use std::fmt;

use reqwest::{Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::{BatchQuery, HerodotusError};

pub const HERODOTUS_API_URL: &str = "https://api.herodotus.cloud";
pub const HERODOTUS_DASHBOARD_URL: &str = "https://dashboard.herodotus.dev/explorer/query/";
pub const PATH_SUBMIT_BATCH_QUERY: &str = "/submit-batch-query";
pub const PATH_BATCH_QUERY_STATUS: &str = "/batch-query-status";

/// Id the service assigns to a submitted batch query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryId(pub String);

impl fmt::Display for QueryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for QueryId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum QueryStatus {
    Done,
    Failed,
    /// Any other status reported while the query is in flight.
    InProgress(String),
}

impl From<String> for QueryStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "DONE" => Self::Done,
            "FAILED" => Self::Failed,
            _ => Self::InProgress(value),
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStatus::Done => f.write_str("DONE"),
            QueryStatus::Failed => f.write_str("FAILED"),
            QueryStatus::InProgress(status) => f.write_str(status),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitBatchQueryResponse {
    internal_id: QueryId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchQueryStatusResponse {
    query_status: QueryStatus,
}

pub fn dashboard_url(query_id: &QueryId) -> String {
    format!("{HERODOTUS_DASHBOARD_URL}{query_id}")
}

#[derive(Clone)]
pub struct HerodotusClient {
    client: reqwest::Client,
    url: Url,
    api_key: String,
}

impl fmt::Debug for HerodotusClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HerodotusClient").field("url", &self.url).finish_non_exhaustive()
    }
}

impl HerodotusClient {
    pub fn new(url: Url, api_key: String) -> Self {
        Self { client: reqwest::Client::new(), url, api_key }
    }

    /// Submits `query` and returns the id to track it with.
    pub async fn submit_batch_query(&self, query: &BatchQuery) -> Result<QueryId, HerodotusError> {
        let url = self.url.join(PATH_SUBMIT_BATCH_QUERY).map_err(|_| HerodotusError::Url)?;
        debug!(slots = query.slot_count(), %url, "submitting batch query");

        let response = self
            .client
            .post(url)
            .query(&[("apiKey", self.api_key.as_str())])
            .json(query)
            .send()
            .await?;
        let response: SubmitBatchQueryResponse = read_json(response).await?;
        Ok(response.internal_id)
    }

    pub async fn batch_query_status(
        &self,
        query_id: &QueryId,
    ) -> Result<QueryStatus, HerodotusError> {
        let url = self.url.join(PATH_BATCH_QUERY_STATUS).map_err(|_| HerodotusError::Url)?;
        let response = self
            .client
            .get(url)
            .query(&[("batchQueryId", query_id.0.as_str()), ("apiKey", self.api_key.as_str())])
            .send()
            .await?;
        let response: BatchQueryStatusResponse = read_json(response).await?;
        Ok(response.query_status)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, HerodotusError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(HerodotusError::Api { status: status.as_u16(), body });
    }
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{Address, B256};
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::QueryTime;

    fn client(server: &mockito::ServerGuard) -> HerodotusClient {
        HerodotusClient::new(server.url().parse().unwrap(), "test-key".to_string())
    }

    #[test]
    fn status_strings() {
        assert_eq!(QueryStatus::from("DONE".to_string()), QueryStatus::Done);
        assert_eq!(QueryStatus::from("FAILED".to_string()), QueryStatus::Failed);
        assert_eq!(
            QueryStatus::from("PROCESSING".to_string()),
            QueryStatus::InProgress("PROCESSING".to_string())
        );
        assert_eq!(QueryStatus::InProgress("PROVING".to_string()).to_string(), "PROVING");
    }

    #[test]
    fn dashboard_link() {
        assert_eq!(
            dashboard_url(&QueryId("01HXYZ".to_string())),
            "https://dashboard.herodotus.dev/explorer/query/01HXYZ"
        );
    }

    #[tokio::test]
    async fn submit_batch_query_returns_internal_id() -> eyre::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let query = BatchQuery::new("SN_SEPOLIA").with_slots(
            11155111,
            QueryTime::Block(10173637),
            Address::ZERO,
            [B256::ZERO],
        );
        let mock = server
            .mock("POST", PATH_SUBMIT_BATCH_QUERY)
            .match_query(Matcher::UrlEncoded("apiKey".into(), "test-key".into()))
            .match_body(Matcher::Json(serde_json::to_value(&query)?))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "internalId": "01HQUERY" }).to_string())
            .create_async()
            .await;

        let query_id = client(&server).submit_batch_query(&query).await?;
        assert_eq!(query_id, QueryId("01HQUERY".to_string()));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn batch_query_status_sends_id_and_key() -> eyre::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", PATH_BATCH_QUERY_STATUS)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("batchQueryId".into(), "01HQUERY".into()),
                Matcher::UrlEncoded("apiKey".into(), "test-key".into()),
            ]))
            .with_status(200)
            .with_body(json!({ "queryStatus": "PROCESSING" }).to_string())
            .create_async()
            .await;

        let status = client(&server).batch_query_status(&QueryId("01HQUERY".to_string())).await?;
        assert_eq!(status, QueryStatus::InProgress("PROCESSING".to_string()));
        mock.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn api_errors_keep_status_and_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", PATH_SUBMIT_BATCH_QUERY)
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body("invalid api key")
            .create_async()
            .await;

        let err = client(&server).submit_batch_query(&BatchQuery::new("SN_SEPOLIA")).await;
        match err {
            Err(HerodotusError::Api { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_response_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", PATH_BATCH_QUERY_STATUS)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status":"DONE"}"#)
            .create_async()
            .await;

        let err = client(&server).batch_query_status(&QueryId("q".to_string())).await;
        assert!(matches!(err, Err(HerodotusError::Serde(_))));
    }
}
