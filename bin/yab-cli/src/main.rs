use clap::{Parser, Subcommand};
use yab_cmd::{
    initialize_tracing_log, AccessSlotsCommand, CheckSlotsCommand, GetSlotsCommand, ProveCommand,
    RunCommand,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "yab-cli", long_about = None)]
pub struct Cli {
    /// The command to execute
    #[clap(subcommand)]
    command: Commands,
}

/// Commands to be executed
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Derive the storage slots of the test transfer
    #[command(name = "get-slots")]
    GetSlots(GetSlotsCommand),

    /// Compare the derived slots against the origin chain's storage
    #[command(name = "check-slots")]
    CheckSlots(CheckSlotsCommand),

    /// Prove the slots with Herodotus and wait for the proof
    #[command(name = "prove")]
    Prove(ProveCommand),

    /// Read the proven values from the facts registry
    #[command(name = "access-slots")]
    AccessSlots(AccessSlotsCommand),

    /// get-slots, prove and access-slots in one go
    #[command(name = "run")]
    Run(RunCommand),
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    initialize_tracing_log();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("tokio runtime build failed");
    match cli.command {
        Commands::GetSlots(cmd) => runtime.block_on(async { cmd.execute().await }),
        Commands::CheckSlots(cmd) => runtime.block_on(async { cmd.execute().await }),
        Commands::Prove(cmd) => runtime.block_on(async { cmd.execute().await }),
        Commands::AccessSlots(cmd) => runtime.block_on(async { cmd.execute().await }),
        Commands::Run(cmd) => runtime.block_on(async { cmd.execute().await }),
    }
}
