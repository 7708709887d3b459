use clap::Parser;
use eyre::Result;

use crate::{ConfigArgs, DestinationArgs, DEFAULT_BLOCK_NUMBER};

#[derive(Debug, Parser)]
pub struct AccessSlotsCommand {
    #[clap(flatten)]
    pub config: ConfigArgs,

    /// Block the slots were proven at
    #[clap(long, default_value_t = DEFAULT_BLOCK_NUMBER)]
    pub block_number: u64,

    #[clap(flatten)]
    pub destination: DestinationArgs,
}

impl AccessSlotsCommand {
    pub async fn execute(&self) -> Result<()> {
        let (config, slots) = self.config.load()?;
        self.destination.access(&config, &slots, self.block_number).await?;
        Ok(())
    }
}
