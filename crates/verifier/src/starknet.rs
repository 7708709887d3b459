//! Herodotus facts registry on Starknet, queried with a raw `starknet_call`.
//!
//! ```cairo
//! fn get_slot_value(self: @TContractState, account: felt252, block: u256, slot: u256) -> Option<u256>;
//! ```
//!
//! Felts are carried in [`U256`]. A `u256` argument is serialized as two felts, low 128 bits
//! first, and `Option::Some(x)` comes back as `[0, x.low, x.high]` while `None` is `[1]`.

use std::{fmt, str::FromStr};

use alloy_primitives::{keccak256, Address, B256, U256};
use reqwest::Url;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::json;
use tracing::debug;

use crate::{SlotReader, VerifierError};

pub const STARKNET_SEPOLIA_FACTS_REGISTRY: &str =
    "0x01b2111317eb693c3ee46633edd45a4876db14a3a53acdbf4e5166976d8e869d";

const GET_SLOT_VALUE: &str = "get_slot_value";

/// Keccak-256 truncated to the 250 bits a Starknet selector holds.
pub fn starknet_keccak(data: &[u8]) -> U256 {
    let mask = (U256::from(1) << 250) - U256::from(1);
    U256::from_be_bytes(keccak256(data).0) & mask
}

pub fn get_slot_value_selector() -> U256 {
    starknet_keccak(GET_SLOT_VALUE.as_bytes())
}

fn low_mask() -> U256 {
    (U256::from(1) << 128) - U256::from(1)
}

/// `[low, high]` felts of a Cairo `u256`.
fn split_u256(value: U256) -> [U256; 2] {
    [value & low_mask(), value >> 128]
}

fn join_u256(low: U256, high: U256) -> Result<U256, VerifierError> {
    if low > low_mask() || high > low_mask() {
        return Err(VerifierError::Decode(format!("u256 limb out of range: {low:#x}, {high:#x}")));
    }
    Ok((high << 128) | low)
}

fn felt_hex(value: U256) -> String {
    format!("{value:#x}")
}

fn parse_felt(value: &str) -> Result<U256, VerifierError> {
    U256::from_str(value).map_err(|e| VerifierError::Decode(format!("bad felt {value:?}: {e}")))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarknetBlockId {
    #[default]
    Latest,
    Pending,
    Number(u64),
}

impl Serialize for StarknetBlockId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            StarknetBlockId::Latest => serializer.serialize_str("latest"),
            StarknetBlockId::Pending => serializer.serialize_str("pending"),
            StarknetBlockId::Number(block_number) => {
                json!({ "block_number": block_number }).serialize(serializer)
            }
        }
    }
}

impl FromStr for StarknetBlockId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(Self::Latest),
            "pending" => Ok(Self::Pending),
            number => number
                .parse()
                .map(Self::Number)
                .map_err(|_| format!("expected latest, pending or a block number, got {s}")),
        }
    }
}

impl fmt::Display for StarknetBlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarknetBlockId::Latest => f.write_str("latest"),
            StarknetBlockId::Pending => f.write_str("pending"),
            StarknetBlockId::Number(block_number) => write!(f, "{block_number}"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Vec<String>>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Clone, Debug)]
pub struct StarknetFactsRegistry {
    client: reqwest::Client,
    rpc_url: Url,
    registry: U256,
    block_id: StarknetBlockId,
}

impl StarknetFactsRegistry {
    pub fn new(rpc_url: Url, registry: U256) -> Self {
        Self { client: reqwest::Client::new(), rpc_url, registry, block_id: StarknetBlockId::Latest }
    }

    /// Registry deployed on Starknet Sepolia.
    pub fn sepolia(rpc_url: Url) -> Result<Self, VerifierError> {
        Ok(Self::new(rpc_url, parse_felt(STARKNET_SEPOLIA_FACTS_REGISTRY)?))
    }

    pub fn with_block_id(mut self, block_id: StarknetBlockId) -> Self {
        self.block_id = block_id;
        self
    }

    async fn call(&self, selector: U256, calldata: &[U256]) -> Result<Vec<U256>, VerifierError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "starknet_call",
            "params": {
                "request": {
                    "contract_address": felt_hex(self.registry),
                    "entry_point_selector": felt_hex(selector),
                    "calldata": calldata.iter().copied().map(felt_hex).collect::<Vec<_>>(),
                },
                "block_id": self.block_id,
            },
        });

        let response = self.client.post(self.rpc_url.clone()).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(VerifierError::Http { status: status.as_u16(), body });
        }
        let response: JsonRpcResponse = serde_json::from_str(&body)?;

        if let Some(JsonRpcError { code, message }) = response.error {
            return Err(VerifierError::Rpc { code, message });
        }
        let result = response
            .result
            .ok_or_else(|| VerifierError::Decode("response has neither result nor error".into()))?;
        result.iter().map(|felt| parse_felt(felt)).collect()
    }
}

/// Decodes a serialized `Option<u256>`.
fn decode_option_u256(result: &[U256]) -> Result<Option<U256>, VerifierError> {
    match result {
        [variant, low, high] if variant.is_zero() => join_u256(*low, *high).map(Some),
        [variant] if *variant == U256::from(1) => Ok(None),
        other => Err(VerifierError::Decode(format!("unexpected Option<u256> encoding: {other:?}"))),
    }
}

impl SlotReader for StarknetFactsRegistry {
    async fn slot_value(
        &self,
        account: Address,
        block_number: u64,
        slot: B256,
    ) -> Result<Option<B256>, VerifierError> {
        let [block_low, block_high] = split_u256(U256::from(block_number));
        let [slot_low, slot_high] = split_u256(U256::from_be_bytes(slot.0));
        let calldata = [
            U256::from_be_slice(account.as_slice()),
            block_low,
            block_high,
            slot_low,
            slot_high,
        ];

        debug!(%account, block_number, %slot, block_id = %self.block_id, "calling get_slot_value");
        let result = self.call(get_slot_value_selector(), &calldata).await?;
        Ok(decode_option_u256(&result)?.map(B256::from))
    }
}
