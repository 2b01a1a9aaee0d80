use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub(super) struct Env {
    /// Logical endpoint name the node addresses are registered under.
    pub tron_node_group: String,

    /// Comma-separated `host:port` or URLs.
    pub tron_node_addrs: String,

    pub tron_api_key: Option<String>,

    pub tron_grpc_timeout_secs: u64,

    pub tron_connect_timeout_secs: u64,
}

impl Default for Env {
    fn default() -> Self {
        Self {
            tron_node_group: "tron_node".to_string(),
            tron_node_addrs: String::new(),
            tron_api_key: None,
            tron_grpc_timeout_secs: 30,
            tron_connect_timeout_secs: 10,
        }
    }
}
