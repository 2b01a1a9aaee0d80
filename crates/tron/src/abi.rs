//! Contract ABI helpers: call-data builders and return-value decoders.
//!
//! TRC20 calls use the standard selector literals below so nothing is hashed on the hot path.
//! Generic JSON-described calls go through `alloy`'s dynamic ABI encoder.

use crate::address::TronAddress;
use crate::error::{Error, Result};
use alloy::dyn_abi::{DynSolType, DynSolValue};
use alloy::primitives::{U256, keccak256};
use serde_json::Value;

/// `transfer(address,uint256)`
pub const TRC20_TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];
/// `balanceOf(address)`
pub const TRC20_BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];
/// `name()`
pub const TRC20_NAME_SELECTOR: [u8; 4] = [0x06, 0xfd, 0xde, 0x03];
/// `symbol()`
pub const TRC20_SYMBOL_SELECTOR: [u8; 4] = [0x95, 0xd8, 0x9b, 0x41];
/// `decimals()`
pub const TRC20_DECIMALS_SELECTOR: [u8; 4] = [0x31, 0x3c, 0xe5, 0x67];
/// `Transfer(address,address,uint256)` event topic.
pub const TRC20_TRANSFER_EVENT_TOPIC: &str =
    "ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";

const SLOT_HEX_LEN: usize = 64;

pub fn selector(sig: &str) -> [u8; 4] {
    let hash = keccak256(sig.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

pub fn encode_address(addr: TronAddress) -> [u8; 32] {
    let mut out = [0u8; 32];
    out[12..].copy_from_slice(addr.evm().as_slice());
    out
}

pub fn encode_uint(v: U256) -> [u8; 32] {
    v.to_be_bytes()
}

/// Right-aligns a big-endian value into one 32-byte slot.
pub fn left_pad_32(bytes: &[u8]) -> Result<[u8; 32]> {
    if bytes.len() > 32 {
        return Err(Error::Abi(format!(
            "value of {} bytes does not fit a 32-byte slot",
            bytes.len()
        )));
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(bytes);
    Ok(out)
}

pub fn encode_balance_of(owner: TronAddress) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + 32);
    out.extend_from_slice(&TRC20_BALANCE_OF_SELECTOR);
    out.extend_from_slice(&encode_address(owner));
    out
}

pub fn encode_transfer(to: TronAddress, amount: U256) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + 32 + 32);
    out.extend_from_slice(&TRC20_TRANSFER_SELECTOR);
    out.extend_from_slice(&encode_address(to));
    out.extend_from_slice(&encode_uint(amount));
    out
}

/// Packs `method` with a JSON parameter list such as
/// `[{"address":"T..."},{"uint256":"100"}]` into call data.
///
/// An empty string is treated as no parameters. `address` values may be base58 or hex.
pub fn pack_json(method: &str, params_json: &str) -> Result<Vec<u8>> {
    let params: Vec<serde_json::Map<String, Value>> = if params_json.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(params_json).map_err(|e| Error::Abi(format!("params json: {e}")))?
    };

    let mut values = Vec::with_capacity(params.len());
    for (i, entry) in params.iter().enumerate() {
        let mut fields = entry.iter();
        let (Some((ty, value)), None) = (fields.next(), fields.next()) else {
            return Err(Error::Abi(format!(
                "param #{i} must be an object with exactly one type key"
            )));
        };
        let ty = DynSolType::parse(ty).map_err(|e| Error::Abi(format!("param #{i} type: {e}")))?;
        let text = param_text(&ty, value)?;
        let v = ty
            .coerce_str(&text)
            .map_err(|e| Error::Abi(format!("param #{i} value {text:?}: {e}")))?;
        values.push(v);
    }

    let mut out = selector(method).to_vec();
    out.extend(DynSolValue::Tuple(values).abi_encode_params());
    Ok(out)
}

// Renders a JSON value in the textual syntax `DynSolType::coerce_str` understands, turning Tron
// addresses into their 20-byte hex form.
fn param_text(ty: &DynSolType, value: &Value) -> Result<String> {
    match (ty, value) {
        (DynSolType::Address, Value::String(s)) => {
            Ok(TronAddress::parse_text(s)?.evm().to_string())
        }
        (DynSolType::Array(inner) | DynSolType::FixedArray(inner, _), Value::Array(items)) => {
            let parts = items
                .iter()
                .map(|item| param_text(inner, item))
                .collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", parts.join(",")))
        }
        (_, Value::String(s)) => Ok(s.clone()),
        (_, Value::Number(n)) => Ok(n.to_string()),
        (_, Value::Bool(b)) => Ok(b.to_string()),
        (_, other) => Err(Error::Abi(format!("unsupported value {other} for type {ty:?}"))),
    }
}

fn strip_0x(data: &str) -> &str {
    data.strip_prefix("0x")
        .or_else(|| data.strip_prefix("0X"))
        .unwrap_or(data)
}

/// Decodes one 32-byte slot (64 hex chars) as an unsigned big-endian integer.
pub fn parse_numeric_property(data: &str) -> Result<U256> {
    let data = strip_0x(data);
    if data.len() != SLOT_HEX_LEN || !data.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::parse("numeric property", data));
    }
    U256::from_str_radix(data, 16).map_err(|_| Error::parse("numeric property", data))
}

/// Decodes a string return value, either ABI-dynamic (offset, length, data) or a single
/// NUL-padded 32-byte slot.
pub fn parse_string_property(data: &str) -> Result<String> {
    let data = strip_0x(data);
    if !data.is_ascii() {
        return Err(Error::parse("string property", data));
    }

    if data.len() > 2 * SLOT_HEX_LEN {
        let len = parse_numeric_property(&data[SLOT_HEX_LEN..2 * SLOT_HEX_LEN])
            .map_err(|_| Error::parse("string property length", data))?;
        let available = (data.len() - 2 * SLOT_HEX_LEN) / 2;
        let len = u64::try_from(len)
            .ok()
            .and_then(|l| usize::try_from(l).ok())
            .filter(|l| *l <= available)
            .ok_or_else(|| Error::parse("string property (length overruns data)", data))?;
        let start = 2 * SLOT_HEX_LEN;
        let bytes = hex::decode(&data[start..start + 2 * len])
            .map_err(|_| Error::parse("string property", data))?;
        return String::from_utf8(bytes).map_err(|_| Error::parse("string property (utf-8)", data));
    }

    if data.len() == SLOT_HEX_LEN {
        let mut bytes = hex::decode(data).map_err(|_| Error::parse("string property", data))?;
        if let Some(nul) = bytes.iter().position(|b| *b == 0) {
            bytes.truncate(nul);
        }
        return String::from_utf8(bytes).map_err(|_| Error::parse("string property (utf-8)", data));
    }

    Err(Error::parse("string property", data))
}
