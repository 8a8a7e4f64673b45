use colored::Colorize;
use legion_core::{utils, ClientKind, Result, RpcProvider};
use serde_json::Value;

use crate::chains::ChainNames;
use crate::commands::required;
use crate::output;
use crate::session::Session;

pub async fn sethost(session: &mut Session, host: Option<String>) -> Result<()> {
    let host = required(host, "host")?;
    let connection = session.connect(&host).await?;

    output::success(format!("Conectado a {}", connection.endpoint));
    output::field(
        "Cliente",
        connection.client_version.as_deref().unwrap_or("desconhecido"),
    );
    output::field("Tipo", connection.client_kind);
    if connection.client_kind == ClientKind::Unknown {
        output::warning("Cliente não identificado: plugins de scan indisponíveis para este node");
    }
    Ok(())
}

fn describe(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Campos de `getnodeinfo`, cada um consultado de forma independente
pub async fn collect_node_info(
    provider: &dyn RpcProvider,
    chains: &ChainNames,
) -> Vec<(&'static str, Result<String>)> {
    let mut fields = Vec::new();

    fields.push(("Versão", provider.client_version().await));
    fields.push(("Bloco", provider.block_number().await.map(|n| n.to_string())));
    fields.push((
        "Chain",
        provider.chain_id().await.map(|id| match chains.name(id) {
            Some(name) => format!("{} ({})", id, name),
            None => id.to_string(),
        }),
    ));
    fields.push((
        "Protocolo",
        provider.request("eth_protocolVersion", vec![]).await.map(describe),
    ));
    fields.push(("Escutando", provider.request("net_listening", vec![]).await.map(describe)));
    fields.push((
        "Peers",
        provider
            .request("net_peerCount", vec![])
            .await
            .and_then(|v| utils::parse_quantity(&v))
            .map(|n| n.to_string()),
    ));
    fields.push((
        "Sincronizando",
        provider.request("eth_syncing", vec![]).await.map(|v| match v {
            Value::Bool(false) => "não".to_string(),
            other => other.to_string(),
        }),
    ));
    fields.push(("Minerando", provider.request("eth_mining", vec![]).await.map(describe)));
    fields.push((
        "Hashrate",
        provider
            .request("eth_hashrate", vec![])
            .await
            .and_then(|v| utils::parse_quantity(&v))
            .map(|n| n.to_string()),
    ));
    fields.push((
        "Gas price",
        provider
            .request("eth_gasPrice", vec![])
            .await
            .and_then(|v| utils::parse_quantity(&v))
            .map(|wei| format!("{} gwei", utils::format_token_amount(&wei, 9))),
    ));
    fields.push((
        "Coinbase",
        provider.coinbase().await.map(|a| utils::format_address(&a)),
    ));
    fields.push((
        "Contas",
        provider.accounts().await.map(|accounts| {
            if accounts.is_empty() {
                "nenhuma".to_string()
            } else {
                accounts.iter().map(utils::format_address).collect::<Vec<_>>().join(", ")
            }
        }),
    ));
    fields
}

pub async fn getnodeinfo(session: &mut Session) -> Result<()> {
    let provider = session.provider().await?;
    if let Some(connection) = session.connection() {
        output::title(&format!("Node {}", connection.endpoint));
        output::field("Tipo", connection.client_kind);
    }
    for (label, value) in collect_node_info(provider.as_ref(), &session.chains).await {
        output::optional_field(label, &value);
    }
    Ok(())
}

pub async fn version(session: &mut Session) -> Result<()> {
    output::field("Legion", env!("CARGO_PKG_VERSION"));
    match session.connection() {
        Some(connection) => {
            output::field("Node", &connection.endpoint);
            output::field(
                "Cliente",
                connection.client_version.as_deref().unwrap_or("desconhecido"),
            );
        }
        None => output::field("Node", "não conectado".dimmed()),
    }
    Ok(())
}
