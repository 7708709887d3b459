mod args;
mod commands;

use std::str::FromStr;

pub use args::{ConfigArgs, Destination, DestinationArgs, HerodotusArgs, DEFAULT_BLOCK_NUMBER};
pub use commands::{
    access_slots::AccessSlotsCommand, check_slots::CheckSlotsCommand, get_slots::GetSlotsCommand,
    prove::ProveCommand, run::RunCommand,
};
use tracing::Level;

pub fn initialize_tracing_log() {
    let level_env = std::env::var("RUST_LOG").unwrap_or("info".to_owned());
    let level = if let Ok(level) = Level::from_str(&level_env) {
        level
    } else {
        eprint!("Invalid log level {level_env}, defaulting to info");
        Level::INFO
    };

    tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_target(true)
        .with_file(true)
        .init();
}
