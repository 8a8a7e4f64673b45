use async_trait::async_trait;
use ethereum_types::{Address, H256, U256};
use legion_core::{error::{Error, Result}, BlockTag, RpcProvider};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Default)]
struct RecordingProvider {
    responses: HashMap<&'static str, Value>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

#[async_trait]
impl RpcProvider for RecordingProvider {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.calls.lock().push((method.to_string(), params));
        self.responses
            .get(method)
            .cloned()
            .ok_or_else(|| Error::RpcRejected { code: -32601, message: "method not found".into() })
    }
}

fn provider(responses: &[(&'static str, Value)]) -> RecordingProvider {
    RecordingProvider {
        responses: responses.iter().cloned().collect(),
        ..Default::default()
    }
}

#[tokio::test]
async fn balance_sends_address_and_block() {
    let p = provider(&[("eth_getBalance", json!("0xde0b6b3a7640000"))]);
    let balance = p.balance(Address::zero(), BlockTag::Number(16)).await.unwrap();
    assert_eq!(balance, U256::from(1_000_000_000_000_000_000u64));

    let calls = p.calls.lock();
    assert_eq!(calls[0].0, "eth_getBalance");
    assert_eq!(
        calls[0].1,
        vec![json!("0x0000000000000000000000000000000000000000"), json!("0x10")]
    );
}

#[tokio::test]
async fn storage_word_is_left_padded() {
    let p = provider(&[("eth_getStorageAt", json!("0x2a"))]);
    let word = p
        .storage_at(Address::repeat_byte(0x11), U256::from(3), BlockTag::Latest)
        .await
        .unwrap();
    assert_eq!(word, H256::from_low_u64_be(42));
    assert_eq!(p.calls.lock()[0].1[1], json!("0x3"));
}

#[tokio::test]
async fn missing_block_is_not_found() {
    let p = provider(&[("eth_getBlockByNumber", Value::Null)]);
    let res = p.block(BlockTag::Number(1)).await;
    assert!(matches!(res, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn accounts_are_decoded() {
    let p = provider(&[(
        "eth_accounts",
        json!(["0x1111111111111111111111111111111111111111", "0x2222222222222222222222222222222222222222"]),
    )]);
    let accounts = p.accounts().await.unwrap();
    assert_eq!(accounts, vec![Address::repeat_byte(0x11), Address::repeat_byte(0x22)]);
}

#[tokio::test]
async fn rejected_calls_propagate() {
    let p = provider(&[]);
    let res = p.client_version().await;
    assert!(matches!(res, Err(Error::RpcRejected { code: -32601, .. })));
}
