use std::{path::PathBuf, str::FromStr, time::Duration};

use alloy_primitives::{Address, U256};
use alloy_provider::ProviderBuilder;
use clap::{Args, ValueEnum};
use eyre::{eyre, WrapErr};
use reqwest::Url;
use tracing::info;
use yab_herodotus::{
    prove_slots, HerodotusClient, PollConfig, ProofRequest, QueryId, QueryTime,
    DEFAULT_DESTINATION_CHAIN_ID, DEFAULT_ORIGIN_CHAIN_ID, HERODOTUS_API_URL,
};
use yab_primitives::{ProofConfig, TransferSlots};
use yab_verifier::{
    verify_slots, EvmFactsRegistry, SlotCheck, StarknetBlockId, StarknetFactsRegistry,
};

/// Block the walkthrough proves storage at.
pub const DEFAULT_BLOCK_NUMBER: u64 = 10173637;

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Path to the walkthrough config: contract address, mapping slot and test transfer
    #[clap(long, env = "YAB_CONFIG", default_value = "config.json")]
    pub config: PathBuf,
}

impl ConfigArgs {
    pub fn load(&self) -> eyre::Result<(ProofConfig, TransferSlots)> {
        let config = ProofConfig::load(&self.config)?;
        let slots =
            TransferSlots::derive(&config.test_transaction.input, config.transfers_mapping_slot);
        Ok((config, slots))
    }
}

#[derive(Debug, Clone, Args)]
pub struct HerodotusArgs {
    /// Herodotus API key
    #[clap(long, env = "HERODOTUS_API_KEY")]
    pub herodotus_api_key: String,

    #[clap(long, env = "HERODOTUS_API_URL", default_value = HERODOTUS_API_URL)]
    pub herodotus_api_url: Url,

    /// Id of a query submitted earlier. Skips submitting a new one, so leave it empty when the
    /// slots or block change.
    #[clap(long)]
    pub query_id: Option<String>,

    /// Chain the slots are read from
    #[clap(long, default_value_t = DEFAULT_ORIGIN_CHAIN_ID)]
    pub origin_chain_id: u64,

    /// Chain the proven values are made available on
    #[clap(long, default_value = DEFAULT_DESTINATION_CHAIN_ID)]
    pub destination_chain_id: String,

    #[clap(long, default_value_t = 5)]
    pub poll_interval_secs: u64,

    #[clap(long, default_value_t = 30 * 60)]
    pub timeout_secs: u64,
}

impl HerodotusArgs {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_secs(self.poll_interval_secs),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn proof_request(
        &self,
        config: &ProofConfig,
        slots: &TransferSlots,
        block_number: u64,
    ) -> ProofRequest {
        ProofRequest {
            origin_chain_id: self.origin_chain_id,
            destination_chain_id: self.destination_chain_id.clone(),
            time: QueryTime::Block(block_number),
            account: config.yab_contract_address,
            slots: slots.proof_slots(),
        }
    }

    pub async fn prove(
        &self,
        config: &ProofConfig,
        slots: &TransferSlots,
        block_number: u64,
    ) -> eyre::Result<QueryId> {
        let client =
            HerodotusClient::new(self.herodotus_api_url.clone(), self.herodotus_api_key.clone());
        let request = self.proof_request(config, slots, block_number);
        let existing = self.query_id.clone().filter(|id| !id.is_empty()).map(QueryId::from);

        let query_id = prove_slots(&client, &request, existing, self.poll_config())
            .await
            .wrap_err("failed to prove slots with Herodotus")?;
        Ok(query_id)
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Starknet,
    Evm,
}

#[derive(Debug, Clone, Args)]
pub struct DestinationArgs {
    /// Kind of chain the facts registry lives on
    #[clap(long, default_value = "starknet")]
    pub destination: Destination,

    #[clap(long, env = "STARKNET_RPC_URL")]
    pub starknet_rpc_url: Option<Url>,

    /// Starknet block the registry is read at: latest, pending or a number
    #[clap(long, default_value = "latest")]
    pub starknet_block_id: StarknetBlockId,

    #[clap(long, env = "EVM_RPC_URL")]
    pub evm_rpc_url: Option<Url>,

    /// Facts registry address. Defaults to the Starknet Sepolia deployment.
    #[clap(long)]
    pub facts_registry: Option<String>,
}

impl DestinationArgs {
    /// Reads the proven `destAddress` and `amount` slots and checks them against the inputs of
    /// the test transfer.
    pub async fn access(
        &self,
        config: &ProofConfig,
        slots: &TransferSlots,
        block_number: u64,
    ) -> eyre::Result<Vec<SlotCheck>> {
        let account = config.yab_contract_address;
        let expected = slots.checked_slots(&config.test_transaction.input);

        let checks = match self.destination {
            Destination::Starknet => {
                let rpc_url = self
                    .starknet_rpc_url
                    .clone()
                    .ok_or_else(|| eyre!("--starknet-rpc-url is required for Starknet"))?;
                let registry = match &self.facts_registry {
                    Some(registry) => StarknetFactsRegistry::new(
                        rpc_url,
                        U256::from_str(registry).wrap_err("invalid Starknet registry address")?,
                    ),
                    None => StarknetFactsRegistry::sepolia(rpc_url)?,
                }
                .with_block_id(self.starknet_block_id);
                verify_slots(&registry, account, block_number, &expected).await?
            }
            Destination::Evm => {
                let rpc_url = self
                    .evm_rpc_url
                    .clone()
                    .ok_or_else(|| eyre!("--evm-rpc-url is required for an EVM destination"))?;
                let registry = self
                    .facts_registry
                    .as_deref()
                    .ok_or_else(|| eyre!("--facts-registry is required for an EVM destination"))?
                    .parse::<Address>()
                    .wrap_err("invalid facts registry address")?;
                let provider = ProviderBuilder::new().on_http(rpc_url);
                let registry = EvmFactsRegistry::new(provider, registry);
                verify_slots(&registry, account, block_number, &expected).await?
            }
        };

        info!(checked = checks.len(), block_number, "Proven slot values are correct");
        Ok(checks)
    }
}
