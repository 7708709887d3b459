use alloy_eips::BlockId;
use alloy_provider::ProviderBuilder;
use clap::Parser;
use eyre::{Result, WrapErr};
use reqwest::Url;
use tracing::info;
use yab_contracts::YABTransfer;
use yab_verifier::{verify_slots, SourceChainStorage};

use crate::ConfigArgs;

/// Reads the derived slots straight from the chain the YAB contract lives on.
#[derive(Debug, Parser)]
pub struct CheckSlotsCommand {
    #[clap(flatten)]
    pub config: ConfigArgs,

    /// The RPC URL of the origin chain node
    #[clap(long, env = "SOURCE_RPC_URL")]
    pub source_rpc_url: Url,

    /// Block to read storage at, defaults to the latest block
    #[clap(long)]
    pub block_number: Option<u64>,
}

impl CheckSlotsCommand {
    pub async fn execute(&self) -> Result<()> {
        let (config, slots) = self.config.load()?;
        let provider = ProviderBuilder::new().on_http(self.source_rpc_url.clone());
        let storage = SourceChainStorage::new(provider.clone());

        let block_number = match self.block_number {
            Some(block_number) => block_number,
            None => storage.latest_block_number().await?,
        };

        let yab = YABTransfer::new(config.yab_contract_address, provider);
        let transfer = yab
            .transfers(slots.index)
            .block(BlockId::number(block_number))
            .call()
            .await
            .wrap_err("failed to read transfers entry")?;
        info!(
            index = %slots.index,
            dest_address = %transfer.destAddress,
            amount = %transfer.amount,
            is_used = transfer.isUsed,
            "transfers entry"
        );

        let expected = slots.checked_slots(&config.test_transaction.input);
        verify_slots(&storage, config.yab_contract_address, block_number, &expected).await?;
        info!(block_number, "Derived slots hold the transfer inputs");
        Ok(())
    }
}
