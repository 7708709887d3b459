use alloy_primitives::{Address, B256, U256};
use alloy_provider::Provider;
use tracing::debug;
use yab_contracts::FactsRegistry;

use crate::{SlotReader, VerifierError};

/// Herodotus facts registry deployed on an EVM destination chain.
///
/// The registry stores attested values in a plain mapping, so an unproven slot and a slot
/// proven to hold zero read the same and are both reported as `None`.
#[derive(Debug, Clone)]
pub struct EvmFactsRegistry<P> {
    provider: P,
    registry: Address,
}

impl<P> EvmFactsRegistry<P>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    pub fn new(provider: P, registry: Address) -> Self {
        Self { provider, registry }
    }
}

impl<P> SlotReader for EvmFactsRegistry<P>
where
    P: Provider + Clone + Send + Sync + 'static,
{
    async fn slot_value(
        &self,
        account: Address,
        block_number: u64,
        slot: B256,
    ) -> Result<Option<B256>, VerifierError> {
        debug!(registry = %self.registry, %account, block_number, %slot, "reading attested slot");
        let registry = FactsRegistry::new(self.registry, self.provider.clone());
        let value = registry
            .accountStorageSlotValues(account, U256::from(block_number), slot)
            .call()
            .await?
            ._0;
        Ok((!value.is_zero()).then_some(value))
    }
}
