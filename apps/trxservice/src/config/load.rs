use super::env::Env;
use super::parse::{opt_trimmed, parse_node_addrs, parse_secs};
use super::{AppConfig, TronConfig};
use anyhow::{Context, Result};
use tron::NodeEndpointSet;

/// Reads `TRON_*` variables from the process environment.
pub fn load_config() -> Result<AppConfig> {
    let env: Env = envy::from_env().context("load trxservice env config")?;
    from_env(env)
}

fn from_env(env: Env) -> Result<AppConfig> {
    let node_group = env.tron_node_group.trim().to_string();
    if node_group.is_empty() {
        anyhow::bail!("TRON_NODE_GROUP must be non-empty");
    }
    let addrs = parse_node_addrs("TRON_NODE_ADDRS", &env.tron_node_addrs)?;

    Ok(AppConfig {
        tron: TronConfig {
            endpoints: NodeEndpointSet::new().with(node_group.clone(), addrs),
            node_group,
            api_key: opt_trimmed(env.tron_api_key),
            call_timeout: parse_secs("TRON_GRPC_TIMEOUT_SECS", env.tron_grpc_timeout_secs)?,
            connect_timeout: parse_secs(
                "TRON_CONNECT_TIMEOUT_SECS",
                env.tron_connect_timeout_secs,
            )?,
        },
    })
}
