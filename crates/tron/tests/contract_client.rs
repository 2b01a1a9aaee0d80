mod common;

use alloy::primitives::U256;
use common::{
    Call, HOLDER, MockWallet, Reply, USDT, constant_ok, rejected, skeleton_reply, slot,
};
use sha2::{Digest, Sha256};
use tron::protocol::Account;
use tron::{BalanceService, ContractClient, Error, TronAddress};

fn usdt() -> TronAddress {
    TronAddress::parse_base58(USDT).unwrap()
}

fn holder() -> TronAddress {
    TronAddress::parse_base58(HOLDER).unwrap()
}

fn dynamic_string(s: &str) -> Vec<u8> {
    let mut out = slot(32);
    out.extend(slot(s.len() as u64));
    let mut data = s.as_bytes().to_vec();
    data.resize(s.len().div_ceil(32) * 32, 0);
    out.extend(data);
    out
}

fn fixed_string(s: &str) -> Vec<u8> {
    let mut out = vec![0u8; 32];
    out[..s.len()].copy_from_slice(s.as_bytes());
    out
}

#[tokio::test]
async fn token_balance_decodes_first_slot() {
    let client = ContractClient::new(MockWallet::new().reply(constant_ok(vec![slot(1_000_000)])));

    let balance = client.token_balance(HOLDER, USDT).await.unwrap();
    assert_eq!(balance, U256::from(1_000_000u64));

    let calls = client.wallet().calls();
    let [Call::Constant(req)] = calls.as_slice() else {
        panic!("expected one constant call, got {calls:?}");
    };
    assert_eq!(req.owner_address, TronAddress::ZERO.prefixed_bytes().to_vec());
    assert_eq!(req.contract_address, usdt().prefixed_bytes().to_vec());
    assert_eq!(
        hex::encode(&req.data),
        format!("70a08231{}5cbdd86a2fa8dc4bddd8a8f69dba48572eec07fb", "0".repeat(24))
    );
}

#[tokio::test]
async fn node_rejection_surfaces_code_and_message() {
    let wallet = MockWallet::new().reply(rejected(1, "REVERT opcode executed"));
    let client = ContractClient::new(wallet);

    let err = client.token_balance(HOLDER, USDT).await.unwrap_err();
    match err {
        Error::ContractRejected {
            contract,
            code,
            message,
        } => {
            assert_eq!(contract, USDT);
            assert_eq!(code, 1);
            assert_eq!(message, "REVERT opcode executed");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_constant_result_is_a_parse_error_naming_the_contract() {
    let client = ContractClient::new(MockWallet::new().reply(constant_ok(Vec::new())));

    let err = client.token_balance(HOLDER, USDT).await.unwrap_err();
    let Error::Parse { context, .. } = err else {
        panic!("expected parse error, got {err}");
    };
    assert!(context.contains(USDT), "{context}");
}

#[tokio::test]
async fn token_metadata_reads_both_string_layouts() {
    let wallet = MockWallet::new()
        .reply(constant_ok(vec![dynamic_string("Tether USD")]))
        .reply(constant_ok(vec![fixed_string("USDT")]))
        .reply(constant_ok(vec![slot(6)]));
    let client = ContractClient::new(wallet);

    assert_eq!(client.token_name(USDT).await.unwrap(), "Tether USD");
    assert_eq!(client.token_symbol(USDT).await.unwrap(), "USDT");
    assert_eq!(client.token_decimals(USDT).await.unwrap(), U256::from(6u64));

    let selectors: Vec<String> = client
        .wallet()
        .calls()
        .iter()
        .map(|c| match c {
            Call::Constant(req) => hex::encode(&req.data),
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(selectors, vec!["06fdde03", "95d89b41", "313ce567"]);
}

#[tokio::test]
async fn send_token_applies_fee_limit_and_recomputes_txid() {
    let (reply, raw) = skeleton_reply();
    let client = ContractClient::new(MockWallet::new().reply(reply));

    let res = client
        .send_token(HOLDER, HOLDER, USDT, U256::from(2_500_000u64), 15_000_000)
        .await
        .unwrap();

    let tx = res.transaction.as_ref().unwrap();
    assert_eq!(tx.fee_limit(), 15_000_000);
    assert_eq!(tx.txid().as_slice(), Sha256::digest(tx.raw_bytes()).as_slice());
    assert_ne!(tx.txid(), tron::transaction::txid_of(&raw));
    assert_eq!(res.txid(), Some(tx.txid()));
    assert_eq!(res.energy_used, 14_650);

    let calls = client.wallet().calls();
    let [Call::Trigger(req)] = calls.as_slice() else {
        panic!("expected one state-changing trigger, got {calls:?}");
    };
    assert_eq!(req.owner_address, holder().prefixed_bytes().to_vec());
    assert_eq!(hex::encode(&req.data[..4]), "a9059cbb");
    assert_eq!(U256::from_be_slice(&req.data[36..68]), U256::from(2_500_000u64));
}

#[tokio::test]
async fn zero_fee_limit_keeps_node_txid() {
    let (reply, raw) = skeleton_reply();
    let client = ContractClient::new(MockWallet::new().reply(reply));

    let res = client
        .send_token(HOLDER, HOLDER, USDT, U256::from(1u64), 0)
        .await
        .unwrap();

    let tx = res.transaction.unwrap();
    assert_eq!(tx.fee_limit(), 0);
    assert_eq!(tx.txid(), tron::transaction::txid_of(&raw));
}

#[tokio::test]
async fn rejected_trigger_yields_no_transaction() {
    let wallet = MockWallet::new().reply(rejected(2, "contract validate error"));
    let client = ContractClient::new(wallet);

    let err = client
        .send_token(HOLDER, HOLDER, USDT, U256::from(1u64), 10)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ContractRejected { code: 2, .. }), "{err}");
}

#[tokio::test]
async fn bad_inputs_fail_before_any_rpc() {
    let client = ContractClient::new(MockWallet::new());

    let err = client.call("not-an-address", USDT, "0x", true, 0).await.unwrap_err();
    assert!(matches!(err, Error::InvalidAddress { .. }), "{err}");

    let err = client.call("", "Tbogus", "0x", true, 0).await.unwrap_err();
    assert!(matches!(err, Error::InvalidAddress { .. }), "{err}");

    let err = client.call("", USDT, "0xzz", true, 0).await.unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)), "{err}");

    assert!(client.wallet().calls().is_empty());
}

#[tokio::test]
async fn call_with_hex_payload_returns_raw_result() {
    let client = ContractClient::new(MockWallet::new().reply(constant_ok(vec![slot(7)])));

    let res = client.call("", USDT, "0x313ce567", true, 0).await.unwrap();
    assert_eq!(res.code, 0);
    assert_eq!(res.first_result_hex().unwrap(), hex::encode(slot(7)));
}

#[tokio::test]
async fn trigger_json_packs_params_value_and_token() {
    let (reply, _) = skeleton_reply();
    let client = ContractClient::new(MockWallet::new().reply(reply));

    let params = format!(r#"[{{"address":"{HOLDER}"}},{{"uint256":"100"}}]"#);
    client
        .trigger_json(
            HOLDER,
            USDT,
            "transfer(address,uint256)",
            &params,
            20_000_000,
            5,
            "1000001",
            3,
        )
        .await
        .unwrap();

    let calls = client.wallet().calls();
    let [Call::Trigger(req)] = calls.as_slice() else {
        panic!("expected one trigger, got {calls:?}");
    };
    assert_eq!(req.call_value, 5);
    assert_eq!(req.token_id, 1_000_001);
    assert_eq!(req.call_token_value, 3);
    assert_eq!(
        req.data,
        tron::abi::encode_transfer(holder(), U256::from(100u64))
    );
}

#[tokio::test]
async fn trigger_json_requires_caller_and_numeric_token_id() {
    let client = ContractClient::new(MockWallet::new());

    let err = client
        .trigger_json("", USDT, "decimals()", "", 0, 0, "", 0)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidAddress { .. }), "{err}");

    let err = client
        .trigger_json(HOLDER, USDT, "decimals()", "", 0, 0, "trx", 1)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(_)), "{err}");
}

#[tokio::test]
async fn account_balance_checks_returned_address() {
    let found = Account {
        address: holder().prefixed_bytes().to_vec(),
        balance: 12_345_678,
        ..Default::default()
    };
    let client = ContractClient::new(
        MockWallet::new()
            .reply(Reply::Account(found))
            .reply(Reply::Account(Account::default())),
    );

    assert_eq!(client.account_balance(HOLDER).await.unwrap(), 12_345_678);
    assert!(matches!(
        client.account_balance(HOLDER).await,
        Err(Error::AccountNotFound(_))
    ));
}

#[tokio::test]
async fn balance_service_over_contract_client() {
    let wallet = MockWallet::new()
        .reply(Reply::Account(Account {
            address: holder().prefixed_bytes().to_vec(),
            balance: 99,
            ..Default::default()
        }))
        .reply(constant_ok(vec![slot(1_000_000)]));
    let svc = BalanceService::new(ContractClient::new(wallet));

    assert_eq!(svc.get_balance(HOLDER).await.unwrap(), 99);
    assert_eq!(
        svc.get_trc20_token_balance(HOLDER, USDT).await.unwrap(),
        U256::from(1_000_000u64)
    );
}

#[tokio::test]
async fn transport_errors_pass_through_unchanged() {
    let client = ContractClient::new(
        MockWallet::new().fail(Error::Unavailable("connection refused".to_string())),
    );
    let err = client.token_balance(HOLDER, USDT).await.unwrap_err();
    assert!(err.is_transport(), "{err}");
}
