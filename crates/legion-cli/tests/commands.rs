use async_trait::async_trait;
use ethers::signers::{LocalWallet, Signer};
use ethers::utils::hash_message;
use legion_cli::chains::ChainNames;
use legion_cli::cli::ScanAction;
use legion_cli::commands::{investigate, node, query, scan};
use legion_cli::{AppConfig, Session};
use legion_core::{utils, BlockTag, ClientKind, Endpoint, Error, Result, RpcProvider, Scheme};
use legion_core::utils::StorageValue;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

type Handler = Box<dyn Fn(&[Value]) -> Result<Value> + Send + Sync>;

#[derive(Default)]
struct MockNode {
    handlers: HashMap<&'static str, Handler>,
    calls: Mutex<Vec<(String, Vec<Value>)>>,
}

impl MockNode {
    fn reply(mut self, method: &'static str, value: Value) -> Self {
        self.handlers.insert(method, Box::new(move |_: &[Value]| Ok(value.clone())));
        self
    }

    fn handle<F>(mut self, method: &'static str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        self.handlers.insert(method, Box::new(f));
        self
    }

    fn params_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .lock()
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, p)| p.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RpcProvider for MockNode {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        self.calls.lock().push((method.to_string(), params.clone()));
        match self.handlers.get(method) {
            Some(handler) => handler(&params),
            None => Err(Error::RpcRejected {
                code: -32601,
                message: format!("the method {} does not exist/is not available", method),
            }),
        }
    }
}

struct ClientVersionResponder(&'static str);

impl Respond for ClientVersionResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = body.get("id").cloned().unwrap_or(json!(0));
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": self.0,
        }))
    }
}

fn session(default_uri: Option<String>) -> Session {
    Session::with_default_uri(AppConfig::default(), ChainNames::builtin(), default_uri)
}

fn local_endpoint() -> Endpoint {
    Endpoint {
        uri: "http://127.0.0.1:8545".to_string(),
        scheme: Scheme::Http,
        host: "127.0.0.1".to_string(),
        port: 8545,
    }
}

const PARITY_VERSION: &str = "Parity-Ethereum//v2.7.2-stable-2662d19-20200206/x86_64-unknown-linux-gnu/rustc1.41.0";
const GETH_VERSION: &str = "Geth/v1.13.14-stable-2bd6bd01/linux-amd64/go1.21.7";

const ACCOUNT: &str = "0x00000000000000000000000000000000000000aa";

#[tokio::test]
async fn commands_without_node_report_not_connected() {
    let mut session = session(None);
    assert!(matches!(session.ensure_connection().await, Err(Error::NotConnected)));
    assert_eq!(session.client_kind(), ClientKind::Unknown);
}

#[tokio::test]
async fn default_node_is_connected_on_first_use() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ClientVersionResponder(PARITY_VERSION))
        .mount(&server)
        .await;

    let mut session = session(Some(server.uri()));
    assert!(session.connection().is_none());

    let connection = session.ensure_connection().await.unwrap();
    assert_eq!(connection.client_kind, ClientKind::Parity);
    assert!(connection.client_version.as_deref().unwrap().starts_with("Parity-Ethereum"));
    assert_eq!(session.client_kind(), ClientKind::Parity);
}

#[tokio::test]
async fn scan_add_uses_the_default_node_kind() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ClientVersionResponder(GETH_VERSION))
        .mount(&server)
        .await;

    let mut session = session(Some(server.uri()));
    scan::handle(&mut session, ScanAction::Add { name: Some("eth1/GethDatadir".to_string()) })
        .await
        .unwrap();
    assert_eq!(session.selection.selected(), vec!["eth1/GethDatadir"]);
    assert_eq!(session.client_kind(), ClientKind::Geth);

    scan::handle(&mut session, ScanAction::AddList { names: vec!["eth1/NodeVersion,eth1/ParityDevLogs".to_string()] })
        .await
        .unwrap();
    assert_eq!(session.selection.selected(), vec!["eth1/GethDatadir", "eth1/NodeVersion"]);
}

#[tokio::test]
async fn scan_add_without_any_node_is_unsupported() {
    let mut session = session(None);
    let res = scan::handle(&mut session, ScanAction::Add { name: Some("eth1/GethDatadir".to_string()) }).await;
    assert!(matches!(res, Err(Error::Unsupported(_))));
    assert!(session.selection.is_empty());
}

#[tokio::test]
async fn attach_classifies_the_client() {
    let mut session = session(None);
    let node = MockNode::default().reply("web3_clientVersion", json!("Geth/v1.9.25-stable/linux-amd64/go1.15.6"));
    let connection = session.attach(local_endpoint(), Arc::new(node)).await;
    assert_eq!(connection.client_kind, ClientKind::Geth);

    let silent = MockNode::default();
    let connection = session.attach(local_endpoint(), Arc::new(silent)).await;
    assert_eq!(connection.client_kind, ClientKind::Unknown);
    assert!(connection.client_version.is_none());
}

#[tokio::test]
async fn balance_defaults_to_head_block() {
    let node = MockNode::default()
        .reply("eth_blockNumber", json!("0x10"))
        .reply("eth_getBalance", json!("0xde0b6b3a7640000"));
    let address = utils::require_address(ACCOUNT).unwrap();

    let (block, balance) = query::fetch_balance(&node, address, None).await.unwrap();
    assert_eq!(block, BlockTag::Number(16));
    assert_eq!(utils::format_ether(&balance), "1");
    assert_eq!(node.params_of("eth_getBalance")[1], json!("0x10"));

    let (block, _) = query::fetch_balance(&node, address, Some("latest")).await.unwrap();
    assert_eq!(block, BlockTag::Latest);
}

#[tokio::test]
async fn storage_keeps_reading_after_a_failed_slot() {
    let node = MockNode::default().handle("eth_getStorageAt", |params: &[Value]| {
        match params[1].as_str() {
            Some("0x1") => Err(Error::RemoteCallFailure("timeout".to_string())),
            Some("0x0") => Ok(json!("0x000000000000000000000000000000000000000000000000000000000000002a")),
            _ => Ok(json!("0x0000000000000000000000000000000000000000000000000000000000000000")),
        }
    });
    let address = utils::require_address(ACCOUNT).unwrap();

    let slots = query::read_storage(&node, address, Some(3), BlockTag::Latest).await.unwrap();
    assert_eq!(slots.len(), 3);
    assert!(matches!(&slots[0].1, Ok(StorageValue::Integer(v)) if v.as_u64() == 42));
    assert!(slots[1].1.is_err());
    assert!(slots[2].1.is_ok());
}

#[tokio::test]
async fn oversized_slot_count_is_rejected_before_any_call() {
    let node = MockNode::default().reply(
        "eth_getStorageAt",
        json!("0x0000000000000000000000000000000000000000000000000000000000000000"),
    );
    let address = utils::require_address(ACCOUNT).unwrap();

    let res = query::read_storage(&node, address, Some(u64::MAX), BlockTag::Latest).await;
    assert!(matches!(res, Err(Error::ValidationError(_))));
    assert!(node.params_of("eth_getStorageAt").is_empty());

    let slots = query::read_storage(&node, address, None, BlockTag::Latest).await.unwrap();
    assert_eq!(slots.len(), 10);
}

#[test]
fn raw_params_are_json_or_strings() {
    let params = query::parse_params(&[
        "0x10".to_string(),
        "true".to_string(),
        r#"{"to": "0x01"}"#.to_string(),
        "12".to_string(),
    ]);
    assert_eq!(params, vec![json!("0x10"), json!(true), json!({"to": "0x01"}), json!(12)]);
}

fn wallet() -> LocalWallet {
    "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318"
        .parse()
        .unwrap()
}

fn signature_for(wallet: &LocalWallet, message: &str) -> String {
    let signature = wallet.sign_hash(hash_message(message)).unwrap();
    format!("0x{}", hex::encode(signature.to_vec()))
}

#[test]
fn ecrecover_finds_the_signer() {
    let wallet = wallet();
    let signature = signature_for(&wallet, "legion");

    let signer = query::ecrecover_message("legion", &signature).unwrap();
    assert_eq!(utils::format_address(&signer), format!("{:?}", wallet.address()));

    let other = query::ecrecover_message("outra", &signature).unwrap();
    assert_ne!(utils::format_address(&other), format!("{:?}", wallet.address()));

    assert!(matches!(
        query::ecrecover_message("legion", "0x1234"),
        Err(Error::ValidationError(_))
    ));
}

#[tokio::test]
async fn eth_sign_is_verified_against_the_account() {
    let wallet = wallet();
    let address = format!("{:?}", wallet.address());
    let signature = signature_for(&wallet, "legion");

    let node = MockNode::default()
        .reply("eth_coinbase", json!(address))
        .reply("eth_sign", json!(signature));

    let outcome = investigate::sign_and_verify(&node, "legion", None).await.unwrap();
    assert!(outcome.verified());
    assert_eq!(utils::format_address(&outcome.account), address);
    assert_eq!(node.params_of("eth_sign")[1], json!("0x6c6567696f6e"));

    let stranger = utils::require_address(ACCOUNT).unwrap();
    let outcome = investigate::sign_and_verify(&node, "legion", Some(stranger)).await.unwrap();
    assert!(!outcome.verified());
}

#[tokio::test]
async fn signing_without_accounts_is_not_found() {
    let node = MockNode::default()
        .reply("eth_coinbase", json!("0x0000000000000000000000000000000000000000"))
        .reply("eth_accounts", json!([]));
    let res = investigate::sign_and_verify(&node, "legion", None).await;
    assert!(matches!(res, Err(Error::NotFound(_))));
}

#[tokio::test]
async fn node_info_fields_fail_independently() {
    let node = MockNode::default()
        .reply("web3_clientVersion", json!("Geth/v1.13.5-stable/linux-amd64/go1.21.4"))
        .reply("eth_chainId", json!("0x1"))
        .reply("net_peerCount", json!("0x19"))
        .reply("eth_accounts", json!([]));

    let fields = node::collect_node_info(&node, &ChainNames::builtin()).await;
    let field = |label: &str| fields.iter().find(|(l, _)| *l == label).map(|(_, v)| v.clone()).unwrap();

    assert!(field("Versão").unwrap().starts_with("Geth/"));
    assert!(field("Chain").unwrap().starts_with("1 ("));
    assert_eq!(field("Peers").unwrap(), "25");
    assert_eq!(field("Contas").unwrap(), "nenhuma");
    assert!(matches!(field("Bloco"), Err(Error::RpcRejected { .. })));
    assert!(field("Coinbase").is_err());
}

#[test]
fn admin_methods_follow_client_kind() {
    let geth = investigate::admin_methods(ClientKind::Geth);
    let parity = investigate::admin_methods(ClientKind::Parity);
    assert!(geth.contains(&"admin_peers"));
    assert!(!geth.contains(&"parity_netPeers"));
    assert!(parity.contains(&"parity_netPeers"));
    assert_eq!(investigate::admin_methods(ClientKind::Unknown).len(), geth.len() + parity.len());
}
