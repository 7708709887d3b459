use clap::Parser;
use eyre::Result;
use tracing::info;

use crate::{ConfigArgs, DestinationArgs, HerodotusArgs, DEFAULT_BLOCK_NUMBER};

/// Derives the slots, proves them with Herodotus and reads the proven values back.
#[derive(Debug, Parser)]
pub struct RunCommand {
    #[clap(flatten)]
    pub config: ConfigArgs,

    #[clap(long, default_value_t = DEFAULT_BLOCK_NUMBER)]
    pub block_number: u64,

    #[clap(flatten)]
    pub herodotus: HerodotusArgs,

    #[clap(flatten)]
    pub destination: DestinationArgs,
}

impl RunCommand {
    pub async fn execute(&self) -> Result<()> {
        let (config, slots) = self.config.load()?;
        let query_id = self.herodotus.prove(&config, &slots, self.block_number).await?;
        let checks = self.destination.access(&config, &slots, self.block_number).await?;
        info!(%query_id, verified = checks.len(), "Done");
        Ok(())
    }
}
