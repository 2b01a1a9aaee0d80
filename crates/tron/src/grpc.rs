use crate::balancer::NodeChannel;
use crate::error::{Error, Result};
use crate::protocol::{Account, TransactionExtention, TriggerSmartContract};
use std::future::Future;
use std::time::{Duration, Instant};
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::{AsciiMetadataValue, MetadataValue};
use tonic_prost::ProstCodec;

/// Metadata header carrying the TronGrid API key.
pub const API_KEY_HEADER: &str = "tron-pro-api-key";

pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(30);

const GET_ACCOUNT: &str = "/protocol.Wallet/GetAccount";
const TRIGGER_CONTRACT: &str = "/protocol.Wallet/TriggerContract";
const TRIGGER_CONSTANT_CONTRACT: &str = "/protocol.Wallet/TriggerConstantContract";

/// The subset of the node's `protocol.Wallet` service used by the contract client.
pub trait WalletApi: Send + Sync {
    fn get_account(&self, account: Account) -> impl Future<Output = Result<Account>> + Send;

    fn trigger_constant_contract(
        &self,
        call: TriggerSmartContract,
    ) -> impl Future<Output = Result<TransactionExtention>> + Send;

    fn trigger_contract(
        &self,
        call: TriggerSmartContract,
    ) -> impl Future<Output = Result<TransactionExtention>> + Send;
}

#[derive(Debug, Clone)]
pub struct CallOptions {
    /// Deadline applied to every call independently.
    pub timeout: Duration,
    pub api_key: Option<String>,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_CALL_TIMEOUT,
            api_key: None,
        }
    }
}

/// gRPC wallet client over a shared [`NodeChannel`].
///
/// Cheap to clone; every call picks a subchannel and attaches its own deadline and API key.
#[derive(Clone)]
pub struct TronGrpc {
    channel: NodeChannel,
    timeout: Duration,
    api_key: Option<AsciiMetadataValue>,
}

impl TronGrpc {
    pub fn new(channel: NodeChannel) -> Self {
        Self {
            channel,
            timeout: DEFAULT_CALL_TIMEOUT,
            api_key: None,
        }
    }

    pub fn with_options(channel: NodeChannel, opts: CallOptions) -> Result<Self> {
        let mut grpc = Self::new(channel);
        grpc.set_timeout(opts.timeout);
        if let Some(key) = opts.api_key.as_deref() {
            grpc.set_api_key(key)?;
        }
        Ok(grpc)
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Attaches `key` to every subsequent call. An empty key disables the header.
    pub fn set_api_key(&mut self, key: &str) -> Result<()> {
        if key.is_empty() {
            self.api_key = None;
            return Ok(());
        }
        let value = MetadataValue::try_from(key)
            .map_err(|_| Error::InvalidConfig("api key is not a valid header value".to_string()))?;
        self.api_key = Some(value);
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn channel(&self) -> &NodeChannel {
        &self.channel
    }

    fn request<T>(&self, msg: T) -> tonic::Request<T> {
        let mut req = tonic::Request::new(msg);
        req.set_timeout(self.timeout);
        if let Some(key) = &self.api_key {
            req.metadata_mut().insert(API_KEY_HEADER, key.clone());
        }
        req
    }

    async fn unary<Req, Resp>(&self, path: &'static str, msg: Req) -> Result<Resp>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        let sub = self.channel.pick()?;
        tracing::debug!(method = path, node = sub.addr(), "wallet rpc");

        let mut grpc = tonic::client::Grpc::new(sub.channel());
        let req = self.request(msg);
        let call = async {
            grpc.ready()
                .await
                .map_err(|e| Error::Unavailable(format!("{}: {e}", sub.addr())))?;
            let codec: ProstCodec<Req, Resp> = ProstCodec::default();
            let resp = grpc
                .unary(req, PathAndQuery::from_static(path), codec)
                .await?;
            Ok::<_, Error>(resp.into_inner())
        };

        let started = Instant::now();
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Err(Error::Rpc(status))) => {
                Err(deadline_error(status, started.elapsed(), self.timeout))
            }
            Ok(res) => res,
            Err(_) => Err(Error::Timeout(self.timeout)),
        }
    }
}

// tonic enforces `grpc-timeout` locally and reports expiry as `Cancelled` ("Timeout expired"),
// racing the outer `tokio::time::timeout`.
fn deadline_error(status: tonic::Status, elapsed: Duration, timeout: Duration) -> Error {
    match status.code() {
        tonic::Code::DeadlineExceeded => Error::Timeout(timeout),
        tonic::Code::Cancelled if elapsed >= timeout => Error::Timeout(timeout),
        _ => Error::Rpc(status),
    }
}

impl WalletApi for TronGrpc {
    async fn get_account(&self, account: Account) -> Result<Account> {
        self.unary(GET_ACCOUNT, account).await
    }

    async fn trigger_constant_contract(
        &self,
        call: TriggerSmartContract,
    ) -> Result<TransactionExtention> {
        self.unary(TRIGGER_CONSTANT_CONTRACT, call).await
    }

    async fn trigger_contract(&self, call: TriggerSmartContract) -> Result<TransactionExtention> {
        self.unary(TRIGGER_CONTRACT, call).await
    }
}
