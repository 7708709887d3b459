use std::{collections::BTreeMap, fmt};

use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

/// The point in the origin chain's history at which storage is attested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryTime {
    Block(u64),
    Timestamp(u64),
}

impl fmt::Display for QueryTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryTime::Block(number) => write!(f, "block:{number}"),
            QueryTime::Timestamp(timestamp) => write!(f, "timestamp:{timestamp}"),
        }
    }
}

/// Body of `POST /submit-batch-query`.
///
/// `data` is keyed by origin chain id, then by [`QueryTime`], then by account address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchQuery {
    pub destination_chain_id: String,
    /// Always "0" on testnets.
    pub fee: String,
    pub data: BTreeMap<String, BTreeMap<String, TimeQuery>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeQuery {
    pub accounts: BTreeMap<String, AccountQuery>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountQuery {
    pub slots: Vec<B256>,
}

impl BatchQuery {
    pub fn new(destination_chain_id: impl Into<String>) -> Self {
        Self {
            destination_chain_id: destination_chain_id.into(),
            fee: "0".to_string(),
            data: BTreeMap::new(),
        }
    }

    pub fn with_fee(mut self, fee: impl Into<String>) -> Self {
        self.fee = fee.into();
        self
    }

    /// Adds `slots` of `account` at `time` on `origin_chain_id`. Slots already requested for
    /// the same account and time are not repeated.
    pub fn with_slots(
        mut self,
        origin_chain_id: u64,
        time: QueryTime,
        account: Address,
        slots: impl IntoIterator<Item = B256>,
    ) -> Self {
        let account = self
            .data
            .entry(origin_chain_id.to_string())
            .or_default()
            .entry(time.to_string())
            .or_default()
            .accounts
            .entry(format!("{account:#x}"))
            .or_default();
        for slot in slots {
            if !account.slots.contains(&slot) {
                account.slots.push(slot);
            }
        }
        self
    }

    pub fn slot_count(&self) -> usize {
        self.data
            .values()
            .flat_map(|times| times.values())
            .flat_map(|time| time.accounts.values())
            .map(|account| account.slots.len())
            .sum()
    }
}
