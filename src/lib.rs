//! Facade over the upkeep workspace crates.

pub use upkeep_core::*;
pub use upkeep_provider as provider;
