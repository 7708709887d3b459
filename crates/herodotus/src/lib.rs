//! Client for the Herodotus storage-proof API.
//!
//! A proof is requested by submitting a batch query naming the account and slots to attest at
//! a given block of the origin chain. The service answers with an id which is then polled until
//! the attested values are available on the destination chain.

mod client;
mod error;
mod poller;
mod prove;
mod query;

pub use client::{
    dashboard_url, HerodotusClient, QueryId, QueryStatus, HERODOTUS_API_URL,
    HERODOTUS_DASHBOARD_URL, PATH_BATCH_QUERY_STATUS, PATH_SUBMIT_BATCH_QUERY,
};
pub use error::HerodotusError;
pub use poller::{poll_until_done, PollConfig};
pub use prove::{prove_slots, ProofRequest};
pub use query::{AccountQuery, BatchQuery, QueryTime, TimeQuery};

/// Ethereum Sepolia.
pub const DEFAULT_ORIGIN_CHAIN_ID: u64 = 11155111;
/// Starknet Sepolia.
pub const DEFAULT_DESTINATION_CHAIN_ID: &str = "SN_SEPOLIA";
