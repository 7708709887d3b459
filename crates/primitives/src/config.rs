use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to open config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Walkthrough data: which contract holds the `transfers` mapping and which
/// transfer we want to prove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofConfig {
    pub yab_contract_address: Address,
    /// Declaration slot of `mapping(bytes32 => TransferInfo) transfers`.
    #[serde(default)]
    pub transfers_mapping_slot: U256,
    pub test_transaction: TestTransaction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestTransaction {
    /// Informational only, the slots are derived from `input`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<B256>,
    pub input: TransferInput,
}

/// Call inputs of `YABTransfer.transfer(uint256 orderId, uint256 destAddress, uint256 amount)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInput {
    pub order_id: U256,
    pub dst_address: U256,
    pub amount: U256,
}

impl ProofConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|source| ConfigError::Io { path: path.to_owned(), source })?;
        serde_json::from_reader(BufReader::new(file))
            .map_err(|source| ConfigError::Parse { path: path.to_owned(), source })
    }
}

impl TransferInput {
    pub const fn new(order_id: U256, dst_address: U256, amount: U256) -> Self {
        Self { order_id, dst_address, amount }
    }

    /// Words the `destAddress` and `amount` slots hold once the transfer is processed.
    pub fn expected_values(&self) -> [B256; 2] {
        [B256::from(self.dst_address), B256::from(self.amount)]
    }
}
