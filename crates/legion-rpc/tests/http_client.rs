use legion_core::{BlockTag, Error, RpcProvider};
use legion_rpc::{resolve_endpoint, NodeClient, RpcConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};
use wiremock::matchers::method;

/// Responde chamadas JSON-RPC ecoando o id da requisição
struct JsonRpcResponder;

impl Respond for JsonRpcResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = body.get("id").cloned().unwrap_or(json!(0));
        let method = body.get("method").and_then(Value::as_str).unwrap_or_default();
        let reply = match method {
            "web3_clientVersion" => json!({"jsonrpc": "2.0", "id": id, "result": "Geth/v1.13.5-stable/linux-amd64/go1.21.4"}),
            "eth_blockNumber" => json!({"jsonrpc": "2.0", "id": id, "result": "0x10"}),
            "eth_getBalance" => json!({"jsonrpc": "2.0", "id": id, "result": "0x64"}),
            _ => json!({"jsonrpc": "2.0", "id": id, "error": {"code": -32601, "message": "the method does not exist/is not available"}}),
        };
        ResponseTemplate::new(200).set_body_json(reply)
    }
}

async fn client_for(server: &MockServer) -> NodeClient {
    let endpoint = resolve_endpoint(&server.uri()).unwrap();
    NodeClient::connect(endpoint, RpcConfig::default()).await.unwrap()
}

#[tokio::test]
async fn http_requests_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(JsonRpcResponder)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.client_version().await.unwrap().starts_with("Geth/"));
    assert_eq!(client.block_number().await.unwrap(), 16);
    let balance = client
        .balance(Default::default(), BlockTag::Number(16))
        .await
        .unwrap();
    assert_eq!(balance.as_u64(), 100);
}

#[tokio::test]
async fn node_errors_are_rejections() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(JsonRpcResponder)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let res = client.request("admin_datadir", vec![]).await;
    assert!(matches!(res, Err(Error::RpcRejected { code: -32601, .. })));
}

#[tokio::test]
async fn slow_node_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let endpoint = resolve_endpoint(&server.uri()).unwrap();
    let config = RpcConfig { timeout: Duration::from_millis(200) };
    let client = NodeClient::connect(endpoint, config).await.unwrap();
    let res = client.block_number().await;
    assert!(matches!(res, Err(Error::TimeoutError(_))));
}
