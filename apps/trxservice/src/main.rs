mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tron::{
    BalanceService, CallOptions, ChannelOptions, ContractClient, NodeChannel, ResolverRegistry,
    StaticResolverBuilder, TronGrpc,
};

#[derive(Parser)]
#[command(name = "trxservice", about = "TRX / TRC20 balances and contract calls over Tron gRPC")]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = config::load_config()?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(
        node_group = %cfg.tron.node_group,
        node_addrs = cfg.tron.endpoints.get(&cfg.tron.node_group).map_or(0, <[String]>::len),
        call_timeout_secs = cfg.tron.call_timeout.as_secs(),
        api_key = cfg.tron.api_key.is_some(),
        "config loaded"
    );

    let mut registry = ResolverRegistry::new();
    registry.register(StaticResolverBuilder::new(cfg.tron.endpoints.clone()));
    let channel = NodeChannel::dial(
        &cfg.tron.channel_target(),
        &registry,
        ChannelOptions {
            connect_timeout: cfg.tron.connect_timeout,
        },
    )
    .context("dial tron node channel")?;

    let grpc = TronGrpc::with_options(
        channel.clone(),
        CallOptions {
            timeout: cfg.tron.call_timeout,
            api_key: cfg.tron.api_key.clone(),
        },
    )
    .context("configure tron grpc client")?;
    let client = ContractClient::new(grpc);
    let balances = BalanceService::new(client.clone());

    let res = commands::run(cli.command, &client, &balances).await;
    channel.close();
    res
}
