//! Reads storage values attested by Herodotus back from a facts registry and checks them
//! against the values the transfer is known to have written.

mod error;
mod evm;
mod source;
mod starknet;
mod verify;

use std::future::Future;

use alloy_primitives::{Address, B256};

pub use error::VerifierError;
pub use evm::EvmFactsRegistry;
pub use source::SourceChainStorage;
pub use starknet::{
    get_slot_value_selector, starknet_keccak, StarknetBlockId, StarknetFactsRegistry,
    STARKNET_SEPOLIA_FACTS_REGISTRY,
};
pub use verify::{verify_slots, SlotCheck};

/// Source of storage values of `account` at `block_number`.
pub trait SlotReader {
    /// `None` when the reader has no value for the slot, e.g. it was never proven.
    fn slot_value(
        &self,
        account: Address,
        block_number: u64,
        slot: B256,
    ) -> impl Future<Output = Result<Option<B256>, VerifierError>> + Send;
}

#[cfg(test)]
pub(crate) mod test_utils {
    use serde_json::{json, Value};

    /// Mock body answering a JSON-RPC request with `result`, echoing the request id.
    pub(crate) fn rpc_result(
        result: Value,
    ) -> impl Fn(&mockito::Request) -> Vec<u8> + Send + Sync + 'static {
        move |request| {
            let id = request
                .body()
                .ok()
                .and_then(|body| serde_json::from_slice::<Value>(body).ok())
                .and_then(|body| body.get("id").cloned())
                .unwrap_or(json!(0));
            json!({ "jsonrpc": "2.0", "id": id, "result": result }).to_string().into_bytes()
        }
    }
}
