use crate::error::{Error, Result};
use alloy::primitives::Address;
use std::fmt;
use std::str::FromStr;

/// Network prefix byte of every Tron address ("41" in hex, "T" in base58).
pub const ADDRESS_PREFIX: u8 = 0x41;

/// A Tron account/contract address: prefix byte followed by the 20-byte hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TronAddress([u8; 21]);

impl TronAddress {
    /// `410000000000000000000000000000000000000000`, the implicit caller of constant calls.
    pub const ZERO: Self = {
        let mut out = [0u8; 21];
        out[0] = ADDRESS_PREFIX;
        Self(out)
    };

    pub fn from_evm(addr: Address) -> Self {
        let mut out = [0u8; 21];
        out[0] = ADDRESS_PREFIX;
        out[1..].copy_from_slice(addr.as_slice());
        Self(out)
    }

    pub fn from_prefixed_bytes(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 21] = bytes.try_into().map_err(|_| {
            Error::invalid_address(
                &hex::encode(bytes),
                format!("expected 21 bytes, got {}", bytes.len()),
            )
        })?;
        if arr[0] != ADDRESS_PREFIX {
            return Err(Error::invalid_address(
                &hex::encode(bytes),
                format!("unexpected prefix 0x{:02x}", arr[0]),
            ));
        }
        Ok(Self(arr))
    }

    /// Parses the checksummed base58 form (`T...`).
    pub fn parse_base58(s: &str) -> Result<Self> {
        let payload = decode_checked(s)?;
        Self::from_prefixed_bytes(&payload).map_err(|e| match e {
            Error::InvalidAddress { reason, .. } => Error::invalid_address(s, reason),
            other => other,
        })
    }

    /// Parses the hex form, with or without `0x`, with or without the `41` prefix.
    pub fn parse_hex(s: &str) -> Result<Self> {
        let bytes = from_hex(s)?;
        match bytes.len() {
            20 => Ok(Self::from_evm(Address::from_slice(&bytes))),
            _ => Self::from_prefixed_bytes(&bytes).map_err(|e| match e {
                Error::InvalidAddress { reason, .. } => Error::invalid_address(s, reason),
                other => other,
            }),
        }
    }

    /// Accepts either textual form; hex is recognised by a `0x` or `41` prefix and length.
    pub fn parse_text(s: &str) -> Result<Self> {
        let bare = s.strip_prefix("0x").unwrap_or(s);
        let looks_hex = s.starts_with("0x") || (bare.len() == 42 && bare.starts_with("41"));
        if looks_hex {
            Self::parse_hex(s)
        } else {
            Self::parse_base58(s)
        }
    }

    pub fn prefixed_bytes(&self) -> [u8; 21] {
        self.0
    }

    /// The 20-byte hash as it appears inside ABI argument slots.
    pub fn evm(&self) -> Address {
        Address::from_slice(&self.0[1..])
    }

    pub fn to_base58(&self) -> String {
        encode_checked(&self.0)
    }

    /// Lowercase hex including the `41` prefix, without `0x`.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for TronAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TronAddress({})", self.to_base58())
    }
}

impl FromStr for TronAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_text(s)
    }
}

/// Base58check decode: verifies the 4-byte double-sha256 checksum and strips it.
pub fn decode_checked(s: &str) -> Result<Vec<u8>> {
    bs58::decode(s)
        .with_check(None)
        .into_vec()
        .map_err(|e| Error::invalid_address(s, e))
}

pub fn encode_checked(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

pub fn from_hex(s: &str) -> Result<Vec<u8>> {
    let bare = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if bare.len() % 2 != 0 {
        return Err(Error::invalid_address(s, "odd hex length"));
    }
    hex::decode(bare).map_err(|e| Error::invalid_address(s, e))
}

/// Lowercase hex of an address; a bare 20-byte hash gets the network prefix prepended.
pub fn to_hex(bytes: &[u8]) -> String {
    if bytes.len() == 20 {
        let mut out = Vec::with_capacity(21);
        out.push(ADDRESS_PREFIX);
        out.extend_from_slice(bytes);
        return hex::encode(out);
    }
    hex::encode(bytes)
}
