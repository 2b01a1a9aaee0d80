use crate::abi::{
    TRC20_DECIMALS_SELECTOR, TRC20_NAME_SELECTOR, TRC20_SYMBOL_SELECTOR, encode_balance_of,
    encode_transfer, pack_json, parse_numeric_property, parse_string_property,
};
use crate::address::TronAddress;
use crate::error::{Error, Result};
use crate::grpc::{TronGrpc, WalletApi};
use crate::protocol::{Account, TransactionExtention, TriggerSmartContract};
use crate::transaction::UnsignedTransaction;
use alloy::primitives::U256;

/// TRC10 token attached to a trigger call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTransfer {
    pub token_id: i64,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCallRequest {
    /// `None` calls as [`TronAddress::ZERO`].
    pub caller: Option<TronAddress>,
    pub contract: TronAddress,
    pub data: Vec<u8>,
    pub constant: bool,
    /// Sun; only applied to non-constant calls, and only when positive.
    pub fee_limit_sun: i64,
    pub call_value_sun: i64,
    pub token: Option<TokenTransfer>,
}

impl ContractCallRequest {
    pub fn constant(contract: TronAddress, data: Vec<u8>) -> Self {
        Self {
            caller: None,
            contract,
            data,
            constant: true,
            fee_limit_sun: 0,
            call_value_sun: 0,
            token: None,
        }
    }

    pub fn trigger(
        caller: Option<TronAddress>,
        contract: TronAddress,
        data: Vec<u8>,
        fee_limit_sun: i64,
    ) -> Self {
        Self {
            caller,
            contract,
            data,
            constant: false,
            fee_limit_sun,
            call_value_sun: 0,
            token: None,
        }
    }

    fn to_message(&self) -> TriggerSmartContract {
        let mut msg = TriggerSmartContract {
            owner_address: self
                .caller
                .unwrap_or(TronAddress::ZERO)
                .prefixed_bytes()
                .to_vec(),
            contract_address: self.contract.prefixed_bytes().to_vec(),
            data: self.data.clone(),
            ..Default::default()
        };
        if !self.constant {
            if self.call_value_sun > 0 {
                msg.call_value = self.call_value_sun;
            }
            if let Some(token) = self.token.filter(|t| t.amount > 0) {
                msg.call_token_value = token.amount;
                msg.token_id = token.token_id;
            }
        }
        msg
    }
}

#[derive(Debug, Clone)]
pub struct ContractCallResult {
    /// Unsigned transaction skeleton. Always present for non-constant calls.
    pub transaction: Option<UnsignedTransaction>,
    pub constant_result: Vec<Vec<u8>>,
    pub code: i32,
    pub message: String,
    pub energy_used: i64,
}

impl ContractCallResult {
    fn from_extention(
        ext: &TransactionExtention,
        transaction: Option<UnsignedTransaction>,
    ) -> Self {
        Self {
            transaction,
            constant_result: ext.constant_result.clone(),
            code: ext.code(),
            message: ext.message(),
            energy_used: ext.energy_used,
        }
    }

    pub fn txid(&self) -> Option<[u8; 32]> {
        self.transaction.as_ref().map(UnsignedTransaction::txid)
    }

    /// First return slot as lowercase hex, the shape the property decoders expect.
    pub fn first_result_hex(&self) -> Option<String> {
        self.constant_result.first().map(hex::encode)
    }
}

fn parse_caller(s: &str) -> Result<Option<TronAddress>> {
    if s.is_empty() {
        return Ok(None);
    }
    TronAddress::parse_base58(s).map(Some)
}

fn parse_payload(s: &str) -> Result<Vec<u8>> {
    let bare = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(bare).map_err(|e| Error::InvalidPayload(format!("{s:?}: {e}")))
}

fn reject_if_failed(contract: &TronAddress, ext: &TransactionExtention) -> Result<()> {
    let code = ext.code();
    if code == 0 {
        return Ok(());
    }
    let message = ext.message();
    tracing::warn!(%contract, code, %message, "contract call rejected");
    Err(Error::ContractRejected {
        contract: contract.to_string(),
        code,
        message,
    })
}

fn with_contract(err: Error, contract: &TronAddress) -> Error {
    match err {
        Error::Parse { context, data } => Error::Parse {
            context: format!("{context} of contract {contract}"),
            data,
        },
        other => other,
    }
}

/// Builds, dispatches and decodes smart-contract calls.
///
/// Holds no per-call state; clone it or share it by reference across tasks.
#[derive(Clone)]
pub struct ContractClient<W = TronGrpc> {
    wallet: W,
}

impl<W: WalletApi> ContractClient<W> {
    pub fn new(wallet: W) -> Self {
        Self { wallet }
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    /// Calls `contract` with hex call data. An empty `caller` means [`TronAddress::ZERO`].
    pub async fn call(
        &self,
        caller: &str,
        contract: &str,
        payload_hex: &str,
        constant: bool,
        fee_limit_sun: i64,
    ) -> Result<ContractCallResult> {
        let caller = parse_caller(caller)?;
        let contract = TronAddress::parse_base58(contract)?;
        let data = parse_payload(payload_hex)?;
        self.trigger(ContractCallRequest {
            caller,
            contract,
            data,
            constant,
            fee_limit_sun,
            call_value_sun: 0,
            token: None,
        })
        .await
    }

    pub async fn trigger(&self, req: ContractCallRequest) -> Result<ContractCallResult> {
        tracing::debug!(
            contract = %req.contract,
            constant = req.constant,
            data_len = req.data.len(),
            "trigger contract"
        );
        if req.constant {
            self.trigger_constant(&req).await
        } else {
            self.trigger_mutating(&req).await
        }
    }

    async fn trigger_constant(&self, req: &ContractCallRequest) -> Result<ContractCallResult> {
        let ext = self
            .wallet
            .trigger_constant_contract(req.to_message())
            .await?;
        reject_if_failed(&req.contract, &ext)?;
        let tx = UnsignedTransaction::from_extention(&ext).ok();
        Ok(ContractCallResult::from_extention(&ext, tx))
    }

    async fn trigger_mutating(&self, req: &ContractCallRequest) -> Result<ContractCallResult> {
        let ext = self.wallet.trigger_contract(req.to_message()).await?;
        reject_if_failed(&req.contract, &ext)?;

        // The node built the skeleton without our fee limit.
        let mut tx = UnsignedTransaction::from_extention(&ext)?;
        if req.fee_limit_sun > 0 {
            tx.set_fee_limit(req.fee_limit_sun);
        }
        Ok(ContractCallResult::from_extention(&ext, Some(tx)))
    }

    // First return slot of a constant call, as hex.
    async fn constant_slot(
        &self,
        contract: TronAddress,
        data: Vec<u8>,
        what: &str,
    ) -> Result<String> {
        let res = self
            .trigger(ContractCallRequest::constant(contract, data))
            .await?;
        res.first_result_hex().ok_or_else(|| {
            Error::parse(format!("{what} of contract {contract} (empty result)"), "")
        })
    }

    /// TRX balance in sun.
    pub async fn account_balance(&self, addr: &str) -> Result<i64> {
        let addr = TronAddress::parse_base58(addr)?;
        let account = self
            .wallet
            .get_account(Account {
                address: addr.prefixed_bytes().to_vec(),
                ..Default::default()
            })
            .await?;
        if account.address != addr.prefixed_bytes() {
            return Err(Error::AccountNotFound(addr.to_string()));
        }
        Ok(account.balance)
    }

    /// TRC20 `balanceOf(holder)`.
    pub async fn token_balance(&self, holder: &str, contract: &str) -> Result<U256> {
        let holder = TronAddress::parse_base58(holder)?;
        let contract = TronAddress::parse_base58(contract)?;
        let data = self
            .constant_slot(contract, encode_balance_of(holder), "balanceOf")
            .await?;
        parse_numeric_property(&data).map_err(|e| with_contract(e, &contract))
    }

    /// Builds an unsigned TRC20 `transfer(to, amount)` from `from`, with `fee_limit_sun` applied.
    pub async fn send_token(
        &self,
        from: &str,
        to: &str,
        contract: &str,
        amount: U256,
        fee_limit_sun: i64,
    ) -> Result<ContractCallResult> {
        let caller = parse_caller(from)?;
        let to = TronAddress::parse_base58(to)?;
        let contract = TronAddress::parse_base58(contract)?;
        self.trigger(ContractCallRequest::trigger(
            caller,
            contract,
            encode_transfer(to, amount),
            fee_limit_sun,
        ))
        .await
    }

    pub async fn token_name(&self, contract: &str) -> Result<String> {
        let contract = TronAddress::parse_base58(contract)?;
        let data = self
            .constant_slot(contract, TRC20_NAME_SELECTOR.to_vec(), "name")
            .await?;
        parse_string_property(&data).map_err(|e| with_contract(e, &contract))
    }

    pub async fn token_symbol(&self, contract: &str) -> Result<String> {
        let contract = TronAddress::parse_base58(contract)?;
        let data = self
            .constant_slot(contract, TRC20_SYMBOL_SELECTOR.to_vec(), "symbol")
            .await?;
        parse_string_property(&data).map_err(|e| with_contract(e, &contract))
    }

    pub async fn token_decimals(&self, contract: &str) -> Result<U256> {
        let contract = TronAddress::parse_base58(contract)?;
        let data = self
            .constant_slot(contract, TRC20_DECIMALS_SELECTOR.to_vec(), "decimals")
            .await?;
        parse_numeric_property(&data).map_err(|e| with_contract(e, &contract))
    }

    /// Constant call of `method` (e.g. `balanceOf(address)`) with JSON-described parameters.
    pub async fn trigger_constant_json(
        &self,
        from: &str,
        contract: &str,
        method: &str,
        params_json: &str,
    ) -> Result<ContractCallResult> {
        let caller = parse_caller(from)?;
        let contract = TronAddress::parse_base58(contract)?;
        let data = pack_json(method, params_json)?;
        self.trigger(ContractCallRequest {
            caller,
            ..ContractCallRequest::constant(contract, data)
        })
        .await
    }

    /// State-changing call of `method` with JSON-described parameters, optional TRX call value
    /// and optional TRC10 token transfer (`token_id` is decimal; empty means none).
    #[allow(clippy::too_many_arguments)]
    pub async fn trigger_json(
        &self,
        from: &str,
        contract: &str,
        method: &str,
        params_json: &str,
        fee_limit_sun: i64,
        call_value_sun: i64,
        token_id: &str,
        token_amount: i64,
    ) -> Result<ContractCallResult> {
        let caller = TronAddress::parse_base58(from)?;
        let contract = TronAddress::parse_base58(contract)?;
        let data = pack_json(method, params_json)?;

        let token = if !token_id.is_empty() && token_amount > 0 {
            let token_id = token_id
                .parse::<i64>()
                .map_err(|e| Error::InvalidPayload(format!("token id {token_id:?}: {e}")))?;
            Some(TokenTransfer {
                token_id,
                amount: token_amount,
            })
        } else {
            None
        };

        self.trigger(ContractCallRequest {
            call_value_sun,
            token,
            ..ContractCallRequest::trigger(Some(caller), contract, data, fee_limit_sun)
        })
        .await
    }
}
