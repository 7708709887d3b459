use clap::Parser;
use eyre::Result;
use tracing::info;

use crate::ConfigArgs;

#[derive(Debug, Parser)]
pub struct GetSlotsCommand {
    #[clap(flatten)]
    pub config: ConfigArgs,
}

impl GetSlotsCommand {
    pub async fn execute(&self) -> Result<()> {
        let (config, slots) = self.config.load()?;
        for (slot, expected) in slots.checked_slots(&config.test_transaction.input) {
            info!(%slot, %expected, "expected slot value");
        }
        Ok(())
    }
}
