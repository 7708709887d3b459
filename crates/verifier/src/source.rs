use alloy_eips::BlockId;
use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use tracing::debug;

use crate::{SlotReader, VerifierError};

/// Reads storage directly from the origin chain with `eth_getStorageAt`, to check derived
/// slots before asking for a proof.
#[derive(Debug, Clone)]
pub struct SourceChainStorage<P> {
    provider: P,
}

impl<P> SourceChainStorage<P>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub async fn latest_block_number(&self) -> Result<u64, VerifierError> {
        Ok(self.provider.get_block_number().await?)
    }
}

impl<P> SlotReader for SourceChainStorage<P>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    async fn slot_value(
        &self,
        account: Address,
        block_number: u64,
        slot: B256,
    ) -> Result<Option<B256>, VerifierError> {
        debug!(%account, block_number, %slot, "eth_getStorageAt");
        let value = self
            .provider
            .get_storage_at(account, U256::from_be_bytes(slot.0))
            .block_id(BlockId::number(block_number))
            .await?;
        Ok(Some(B256::from(value)))
    }
}
