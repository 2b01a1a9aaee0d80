use std::time::Duration;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures surfaced by the Tron client.
///
/// Caller-input errors (`InvalidAddress`, `InvalidPayload`, `Abi`, `InvalidConfig`) and node
/// rejections are never retried. Transport failures are passed through unchanged; retry policy
/// belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid address {input:?}: {reason}")]
    InvalidAddress { input: String, reason: String },

    #[error("invalid call data: {0}")]
    InvalidPayload(String),

    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("contract {contract} rejected call (code={code}): {message}")]
    ContractRejected {
        contract: String,
        code: i32,
        message: String,
    },

    #[error("cannot parse {context}: {data:?}")]
    Parse { context: String, data: String },

    #[error("abi encode: {0}")]
    Abi(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("node returned no transaction")]
    MissingTransaction,

    #[error("rpc deadline of {0:?} exceeded")]
    Timeout(Duration),

    #[error("node unavailable: {0}")]
    Unavailable(String),

    #[error("rpc failed: {0}")]
    Rpc(#[source] tonic::Status),

    #[error("invalid channel target {0:?} (expected scheme:///endpoint)")]
    InvalidTarget(String),

    #[error("no resolver registered for scheme {0:?}")]
    UnknownScheme(String),
}

impl Error {
    pub(crate) fn invalid_address(input: &str, reason: impl ToString) -> Self {
        Self::InvalidAddress {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn parse(context: impl Into<String>, data: impl Into<String>) -> Self {
        Self::Parse {
            context: context.into(),
            data: data.into(),
        }
    }

    /// True for transport-level failures: deadline, unreachable node, or an RPC status that
    /// either carries a transport code or was raised locally by the transport.
    ///
    /// Statuses the node itself returns with application codes (`InvalidArgument`,
    /// `Unimplemented`, ...) are not transport failures.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Timeout(_) | Self::Unavailable(_) => true,
            Self::Rpc(status) => {
                matches!(
                    status.code(),
                    tonic::Code::Unavailable
                        | tonic::Code::DeadlineExceeded
                        | tonic::Code::Cancelled
                        | tonic::Code::Aborted
                        | tonic::Code::ResourceExhausted
                ) || std::error::Error::source(status).is_some()
            }
            _ => false,
        }
    }
}

impl From<tonic::Status> for Error {
    fn from(status: tonic::Status) -> Self {
        match status.code() {
            tonic::Code::Unavailable => Self::Unavailable(status.message().to_string()),
            _ => Self::Rpc(status),
        }
    }
}
