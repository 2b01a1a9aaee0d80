use std::time::Duration;
use tron::NodeEndpointSet;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tron: TronConfig,
}

#[derive(Debug, Clone)]
pub struct TronConfig {
    pub node_group: String,
    pub endpoints: NodeEndpointSet,
    pub api_key: Option<String>,
    pub call_timeout: Duration,
    pub connect_timeout: Duration,
}

impl TronConfig {
    /// `static:///<group>`
    pub fn channel_target(&self) -> String {
        format!("{}:///{}", tron::resolver::STATIC_SCHEME, self.node_group)
    }
}
