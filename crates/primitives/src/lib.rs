mod config;
mod slots;

pub use config::{ConfigError, ProofConfig, TestTransaction, TransferInput};
pub use slots::{mapping_slot, transfer_index, TransferSlots};
