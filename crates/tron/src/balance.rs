use crate::contract::ContractClient;
use crate::error::Result;
use crate::grpc::WalletApi;
use alloy::primitives::U256;
use std::future::Future;

/// Where balances come from. Implemented by [`ContractClient`]; tests substitute fixtures.
pub trait BalanceSource: Send + Sync {
    /// TRX balance of `addr` in sun.
    fn balance(&self, addr: &str) -> impl Future<Output = Result<i64>> + Send;

    /// TRC20 `balanceOf(holder)` on `contract`, in token base units.
    fn trc20_balance(
        &self,
        holder: &str,
        contract: &str,
    ) -> impl Future<Output = Result<U256>> + Send;
}

impl<W: WalletApi> BalanceSource for ContractClient<W> {
    async fn balance(&self, addr: &str) -> Result<i64> {
        self.account_balance(addr).await
    }

    async fn trc20_balance(&self, holder: &str, contract: &str) -> Result<U256> {
        self.token_balance(holder, contract).await
    }
}

/// Read-only balance queries for upper layers.
#[derive(Clone)]
pub struct BalanceService<S> {
    source: S,
}

impl<S: BalanceSource> BalanceService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub async fn get_balance(&self, addr: &str) -> Result<i64> {
        let balance = self.source.balance(addr).await.inspect_err(|err| {
            tracing::warn!(%addr, %err, "trx balance lookup failed");
        })?;
        tracing::debug!(%addr, balance, "trx balance");
        Ok(balance)
    }

    pub async fn get_trc20_token_balance(&self, holder: &str, contract: &str) -> Result<U256> {
        let balance = self
            .source
            .trc20_balance(holder, contract)
            .await
            .inspect_err(|err| {
                tracing::warn!(%holder, %contract, %err, "trc20 balance lookup failed");
            })?;
        tracing::debug!(%holder, %contract, %balance, "trc20 balance");
        Ok(balance)
    }
}
