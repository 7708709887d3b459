mod facts_registry;
mod yab_transfer;

pub use facts_registry::*;
pub use yab_transfer::*;
