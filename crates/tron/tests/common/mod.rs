#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use tron::protocol::{
    Account, Return, Transaction, TransactionExtention, TriggerSmartContract, transaction,
};
use tron::{Error, Result, WalletApi};

pub const USDT: &str = "TR7NHqjeKQxGTCi8q8ZY4pL8otSzgjLj6t";
pub const HOLDER: &str = "TJRabPrwbZy45sbavfcjinPJC18kjpRTv8";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAccount(Account),
    Constant(TriggerSmartContract),
    Trigger(TriggerSmartContract),
}

/// Scripted wallet: replays queued replies in order and records every request.
#[derive(Default)]
pub struct MockWallet {
    replies: Mutex<VecDeque<Result<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

pub enum Reply {
    Account(Account),
    Extention(TransactionExtention),
}

impl MockWallet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(Ok(reply));
        self
    }

    pub fn fail(self, err: Error) -> Self {
        self.replies.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn next(&self, call: Call) -> Result<Reply> {
        self.calls.lock().unwrap().push(call);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Unavailable("no scripted reply".to_string())))
    }

    fn next_extention(&self, call: Call) -> Result<TransactionExtention> {
        match self.next(call)? {
            Reply::Extention(ext) => Ok(ext),
            Reply::Account(_) => panic!("scripted an account for a trigger call"),
        }
    }
}

impl WalletApi for MockWallet {
    async fn get_account(&self, account: Account) -> Result<Account> {
        match self.next(Call::GetAccount(account))? {
            Reply::Account(acc) => Ok(acc),
            Reply::Extention(_) => panic!("scripted an extention for get_account"),
        }
    }

    async fn trigger_constant_contract(
        &self,
        call: TriggerSmartContract,
    ) -> Result<TransactionExtention> {
        self.next_extention(Call::Constant(call))
    }

    async fn trigger_contract(&self, call: TriggerSmartContract) -> Result<TransactionExtention> {
        self.next_extention(Call::Trigger(call))
    }
}

pub fn slot(value: u64) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    out[24..].copy_from_slice(&value.to_be_bytes());
    out
}

pub fn constant_ok(results: Vec<Vec<u8>>) -> Reply {
    Reply::Extention(TransactionExtention {
        constant_result: results,
        result: Some(Return {
            result: true,
            ..Default::default()
        }),
        ..Default::default()
    })
}

pub fn rejected(code: i32, message: &str) -> Reply {
    Reply::Extention(TransactionExtention {
        result: Some(Return {
            result: false,
            code,
            message: message.as_bytes().to_vec(),
        }),
        ..Default::default()
    })
}

/// A trigger response whose txid the node computed before any fee limit was set.
pub fn skeleton_reply() -> (Reply, transaction::Raw) {
    let raw = transaction::Raw {
        ref_block_bytes: vec![0x8c, 0x21],
        ref_block_hash: vec![0x5e; 8],
        expiration: 1_735_689_660_000,
        timestamp: 1_735_689_600_000,
        contract: vec![transaction::Contract {
            r#type: transaction::contract::ContractType::TriggerSmartContract as i32,
            parameter: Some(prost_types::Any {
                type_url: "type.googleapis.com/protocol.TriggerSmartContract".to_string(),
                value: vec![0x0a, 0x15, 0x41],
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    let ext = TransactionExtention {
        transaction: Some(Transaction {
            raw_data: Some(raw.clone()),
            ..Default::default()
        }),
        txid: tron::transaction::txid_of(&raw).to_vec(),
        result: Some(Return {
            result: true,
            ..Default::default()
        }),
        energy_used: 14_650,
        ..Default::default()
    };
    (Reply::Extention(ext), raw)
}
