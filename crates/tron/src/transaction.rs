use crate::error::{Error, Result};
use crate::protocol::{Transaction, TransactionExtention, transaction};
use prost::Message;
use sha2::{Digest, Sha256};

/// `sha256(raw_data_bytes)`, the Tron transaction id.
pub fn txid_of(raw: &transaction::Raw) -> [u8; 32] {
    let digest = Sha256::digest(raw.encode_to_vec());
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Re-serializes `raw_data` and overwrites `txid` after local edits to the transaction.
///
/// The node hashes the skeleton before the caller's fee limit is known, so any local mutation of
/// `raw_data` must be followed by this call before the transaction is signed.
pub fn recompute_hash(ext: &mut TransactionExtention) -> Result<()> {
    let raw = ext
        .transaction
        .as_ref()
        .and_then(|tx| tx.raw_data.as_ref())
        .ok_or(Error::MissingTransaction)?;
    ext.txid = txid_of(raw).to_vec();
    Ok(())
}

/// An unsigned transaction skeleton returned by a trigger call.
///
/// Raw data is only reachable through methods that keep `txid` in sync with it.
#[derive(Debug, Clone, PartialEq)]
pub struct UnsignedTransaction {
    raw: transaction::Raw,
    ret: Vec<transaction::Result>,
    txid: [u8; 32],
}

impl UnsignedTransaction {
    pub fn new(raw: transaction::Raw, ret: Vec<transaction::Result>) -> Self {
        let txid = txid_of(&raw);
        Self { raw, ret, txid }
    }

    /// Takes the transaction out of a node response. The txid is recomputed locally rather than
    /// trusted from the response.
    pub fn from_extention(ext: &TransactionExtention) -> Result<Self> {
        let tx = ext.transaction.as_ref().ok_or(Error::MissingTransaction)?;
        let raw = tx.raw_data.clone().ok_or(Error::MissingTransaction)?;
        Ok(Self::new(raw, tx.ret.clone()))
    }

    /// Sets the fee limit (sun) and recomputes the txid. Negative values clamp to zero.
    pub fn set_fee_limit(&mut self, fee_limit_sun: i64) {
        self.raw.fee_limit = fee_limit_sun.max(0);
        self.txid = txid_of(&self.raw);
    }

    pub fn fee_limit(&self) -> i64 {
        self.raw.fee_limit
    }

    pub fn txid(&self) -> [u8; 32] {
        self.txid
    }

    pub fn raw(&self) -> &transaction::Raw {
        &self.raw
    }

    /// Canonical protobuf bytes of `raw_data`, i.e. the preimage of [`Self::txid`].
    pub fn raw_bytes(&self) -> Vec<u8> {
        self.raw.encode_to_vec()
    }

    pub fn into_transaction(self) -> Transaction {
        Transaction {
            raw_data: Some(self.raw),
            signature: Vec::new(),
            ret: self.ret,
        }
    }
}
