use alloy_primitives::B256;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("Failed to fetch: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Failed to decode: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Transport error: {0}")]
    Transport(#[from] alloy_transport::TransportError),
    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy_contract::Error),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("JSON-RPC error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("Malformed call result: {0}")]
    Decode(String),
    #[error("Slot {slot} has not been proven")]
    NotProven { slot: B256 },
    #[error("Slot value is not correct, {actual} != {expected} (slot {slot})")]
    ValueMismatch { slot: B256, expected: B256, actual: B256 },
}
