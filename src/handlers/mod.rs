// handlers/mod.rs - request handlers for the status application
//
// Every endpoint is public; there is no authentication tier.
pub mod public;

pub use public::*;
