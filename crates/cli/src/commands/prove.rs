use clap::Parser;
use eyre::Result;
use tracing::info;

use crate::{ConfigArgs, HerodotusArgs, DEFAULT_BLOCK_NUMBER};

#[derive(Debug, Parser)]
pub struct ProveCommand {
    #[clap(flatten)]
    pub config: ConfigArgs,

    /// Block at which the slots are proven
    #[clap(long, default_value_t = DEFAULT_BLOCK_NUMBER)]
    pub block_number: u64,

    #[clap(flatten)]
    pub herodotus: HerodotusArgs,
}

impl ProveCommand {
    pub async fn execute(&self) -> Result<()> {
        let (config, slots) = self.config.load()?;
        let query_id = self.herodotus.prove(&config, &slots, self.block_number).await?;
        info!(%query_id, block_number = self.block_number, "Slots proven");
        Ok(())
    }
}
