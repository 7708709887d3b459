use alloy_primitives::{Address, B256};
use tracing::info;

use crate::{SlotReader, VerifierError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCheck {
    pub slot: B256,
    pub value: B256,
}

/// Reads every slot of `expected` once and compares it with the expected word.
///
/// Stops at the first slot that is missing or holds a different value.
pub async fn verify_slots<R: SlotReader>(
    reader: &R,
    account: Address,
    block_number: u64,
    expected: &[(B256, B256)],
) -> Result<Vec<SlotCheck>, VerifierError> {
    let mut checks = Vec::with_capacity(expected.len());
    for &(slot, expected) in expected {
        let value = reader
            .slot_value(account, block_number, slot)
            .await?
            .ok_or(VerifierError::NotProven { slot })?;
        info!(%slot, slot_value = %value, correct_value = %expected, "read slot");

        if value != expected {
            return Err(VerifierError::ValueMismatch { slot, expected, actual: value });
        }
        checks.push(SlotCheck { slot, value });
    }
    Ok(checks)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use alloy_primitives::U256;
    use parking_lot::Mutex;

    use super::*;

    #[derive(Default)]
    struct MemoryReader {
        values: HashMap<(Address, u64, B256), B256>,
        reads: Mutex<Vec<B256>>,
    }

    impl MemoryReader {
        fn with(mut self, block_number: u64, slot: B256, value: B256) -> Self {
            self.values.insert((Address::ZERO, block_number, slot), value);
            self
        }
    }

    impl SlotReader for MemoryReader {
        async fn slot_value(
            &self,
            account: Address,
            block_number: u64,
            slot: B256,
        ) -> Result<Option<B256>, VerifierError> {
            self.reads.lock().push(slot);
            Ok(self.values.get(&(account, block_number, slot)).copied())
        }
    }

    fn word(value: u64) -> B256 {
        B256::from(U256::from(value))
    }

    #[tokio::test]
    async fn matching_values_pass() {
        let reader = MemoryReader::default().with(10, word(1), word(100)).with(10, word(2), word(7));
        let checks =
            verify_slots(&reader, Address::ZERO, 10, &[(word(1), word(100)), (word(2), word(7))])
                .await
                .unwrap();
        assert_eq!(
            checks,
            vec![
                SlotCheck { slot: word(1), value: word(100) },
                SlotCheck { slot: word(2), value: word(7) }
            ]
        );
    }

    #[tokio::test]
    async fn mismatch_stops_at_first_bad_slot() {
        let reader = MemoryReader::default().with(10, word(1), word(99)).with(10, word(2), word(7));
        let err =
            verify_slots(&reader, Address::ZERO, 10, &[(word(1), word(100)), (word(2), word(7))])
                .await
                .unwrap_err();
        match err {
            VerifierError::ValueMismatch { slot, expected, actual } => {
                assert_eq!(slot, word(1));
                assert_eq!(expected, word(100));
                assert_eq!(actual, word(99));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(*reader.reads.lock(), vec![word(1)]);
    }

    #[tokio::test]
    async fn values_are_read_at_the_requested_block() {
        let reader = MemoryReader::default().with(11, word(1), word(100));
        let err = verify_slots(&reader, Address::ZERO, 10, &[(word(1), word(100))])
            .await
            .unwrap_err();
        assert!(matches!(err, VerifierError::NotProven { slot } if slot == word(1)));
    }

    #[tokio::test]
    async fn nothing_to_check() {
        let reader = MemoryReader::default();
        assert!(verify_slots(&reader, Address::ZERO, 1, &[]).await.unwrap().is_empty());
    }
}
