use legion_core::Error;
use legion_ens::SubgraphClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn domain(name: &str, created: &str) -> serde_json::Value {
    json!({
        "id": "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae",
        "name": name,
        "labelhash": "0x4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0",
        "createdAt": created,
        "isMigrated": true,
        "owner": { "id": "0x1111111111111111111111111111111111111111" },
        "resolver": { "address": "0x2222222222222222222222222222222222222222" },
        "registration": { "registrationDate": created, "expiryDate": "1900000000" }
    })
}

#[tokio::test]
async fn info_sends_variables_and_parses_domains() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "name": "legion.eth" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "domains": [domain("legion.eth", "1580000000")] }
        })))
        .mount(&server)
        .await;

    let client = SubgraphClient::new(server.uri());
    let records = client.info("Legion.eth").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name.as_deref(), Some("legion.eth"));
    assert_eq!(records[0].resolver.as_deref(), Some("0x2222222222222222222222222222222222222222"));
    assert!(records[0].migrated);
}

#[tokio::test]
async fn names_owned_by_reads_account_domains() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "variables": { "owner": "0xabababababababababababababababababababab" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "account": { "domains": [domain("a.eth", "1"), domain("b.eth", "2")] } }
        })))
        .mount(&server)
        .await;

    let client = SubgraphClient::new(server.uri());
    let records = client
        .names_owned_by("0xABABABABABABABABABABABABABABABABABABABAB")
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].created_at.unwrap().timestamp(), 2);
}

#[tokio::test]
async fn unknown_account_has_no_names() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "account": null } })))
        .mount(&server)
        .await;

    let client = SubgraphClient::new(server.uri());
    assert!(client.names_owned_by("0x00").await.unwrap().is_empty());
}

#[tokio::test]
async fn subdomains_are_nested_under_the_parent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "domains": [{ "subdomains": [domain("www.legion.eth", "10")] }] }
        })))
        .mount(&server)
        .await;

    let client = SubgraphClient::new(server.uri());
    let records = client.subdomains("legion.eth").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name.as_deref(), Some("www.legion.eth"));
}

#[tokio::test]
async fn non_success_status_is_remote_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = SubgraphClient::new(server.uri());
    let err = client.info("legion.eth").await.unwrap_err();
    assert!(matches!(err, Error::RemoteCallFailure(_)));
    assert!(err.is_warning());
}

#[tokio::test]
async fn graphql_errors_are_remote_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errors": [{ "message": "indexing error" }]
        })))
        .mount(&server)
        .await;

    let client = SubgraphClient::new(server.uri());
    match client.info("legion.eth").await {
        Err(Error::RemoteCallFailure(msg)) => assert!(msg.contains("indexing error")),
        other => panic!("resultado inesperado: {:?}", other),
    }
}
