pub mod abi;
pub mod address;
pub mod balance;
pub mod balancer;
pub mod contract;
pub mod error;
pub mod grpc;
pub mod protocol;
pub mod resolver;
pub mod transaction;

pub use address::TronAddress;
pub use balance::{BalanceService, BalanceSource};
pub use balancer::{ChannelOptions, NodeChannel};
pub use contract::{ContractCallRequest, ContractCallResult, ContractClient, TokenTransfer};
pub use error::{Error, Result};
pub use grpc::{API_KEY_HEADER, CallOptions, TronGrpc, WalletApi};
pub use resolver::{NodeEndpointSet, ResolverRegistry, StaticResolverBuilder};
pub use transaction::UnsignedTransaction;
