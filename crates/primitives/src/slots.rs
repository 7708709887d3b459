//! Storage slot derivation for `YABTransfer.transfers`.
//!
//! ```solidity
//! struct TransferInfo {
//!     uint256 destAddress;
//!     uint256 amount;
//!     bool isUsed;
//! }
//! mapping(bytes32 => TransferInfo) public transfers;
//!
//! bytes32 index = keccak256(abi.encodePacked(orderId, destAddress, amount));
//! ```
//!
//! A mapping value lives at `keccak256(key . p)` where `p` is the declaration slot of the
//! mapping, and struct members are laid out in consecutive slots from there.

use alloy_primitives::{keccak256, B256, U256};
use alloy_sol_types::SolValue;
use tracing::info;

use crate::TransferInput;

/// Key of a transfer in the `transfers` mapping.
pub fn transfer_index(order_id: U256, dst_address: U256, amount: U256) -> B256 {
    keccak256((order_id, dst_address, amount).abi_encode_packed())
}

/// Slot of the value stored under `key` in a mapping declared at `declaration_slot`.
pub fn mapping_slot(key: B256, declaration_slot: U256) -> U256 {
    let mut data = [0u8; 64];
    data[..32].copy_from_slice(key.as_slice());
    data[32..].copy_from_slice(&declaration_slot.to_be_bytes::<32>());
    U256::from_be_bytes(keccak256(data).0)
}

/// Slot of the struct member `offset` slots past `base`. Storage addressing wraps at 2^256.
fn member_slot(base: U256, offset: u64) -> B256 {
    base.wrapping_add(U256::from(offset)).into()
}

/// Slots of one `TransferInfo` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferSlots {
    pub index: B256,
    pub dest_address: B256,
    pub amount: B256,
    /// Proven with the other members, never compared against the input.
    pub is_used: B256,
}

impl TransferSlots {
    pub fn derive(input: &TransferInput, transfers_mapping_slot: U256) -> Self {
        let index = transfer_index(input.order_id, input.dst_address, input.amount);
        let base = mapping_slot(index, transfers_mapping_slot);

        let slots = Self {
            index,
            dest_address: member_slot(base, 0),
            amount: member_slot(base, 1),
            is_used: member_slot(base, 2),
        };

        info!(
            transfers_mapping_key = %slots.index,
            %transfers_mapping_slot,
            dest_address_slot = %slots.dest_address,
            amount_slot = %slots.amount,
            is_used_slot = %slots.is_used,
            "derived transfer slots"
        );

        slots
    }

    /// All member slots in declaration order, as submitted for proving.
    pub fn proof_slots(&self) -> Vec<B256> {
        vec![self.dest_address, self.amount, self.is_used]
    }

    /// `(slot, expected word)` pairs for the members that mirror the call inputs.
    pub fn checked_slots(&self, input: &TransferInput) -> Vec<(B256, B256)> {
        let [dst_address, amount] = input.expected_values();
        vec![(self.dest_address, dst_address), (self.amount, amount)]
    }
}
