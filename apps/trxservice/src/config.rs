//! Environment-driven settings for the node channel and the RPC client.

mod env;
mod load;
mod parse;
mod types;

pub use load::load_config;
pub use types::{AppConfig, TronConfig};
