//! Plugins específicos do Geth (namespaces `admin_`, `txpool_`, `personal_`).

use serde_json::json;

use super::exposure::MethodExposure;
use crate::probe::Severity;
use crate::settings::ProbeSettings;

pub fn account_import(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/GethAccountImport",
        &["personal_importRawKey"],
        vec![json!(settings.import_key), json!(settings.password)],
        Severity::Critical,
        "Importação de chaves habilitada",
        "O node aceitou importar uma chave privada arbitrária",
    )
}

pub fn datadir() -> MethodExposure {
    MethodExposure::new(
        "eth1/GethDatadir",
        &["admin_datadir"],
        vec![],
        Severity::Low,
        "Diretório de dados exposto",
        "O caminho do diretório de dados do node é público",
    )
}

pub fn node_info() -> MethodExposure {
    MethodExposure::new(
        "eth1/GethNodeInfo",
        &["admin_nodeInfo"],
        vec![],
        Severity::Low,
        "Informações do node expostas",
        "admin_nodeInfo revela enode, portas e protocolos do node",
    )
}

pub fn start_websocket() -> MethodExposure {
    MethodExposure::new(
        "eth1/GethStartWebsocket",
        &["admin_startWS"],
        vec![],
        Severity::High,
        "Servidor WebSocket pode ser iniciado remotamente",
        "O node permite iniciar o endpoint WebSocket via RPC",
    )
}

pub fn stop_websocket() -> MethodExposure {
    MethodExposure::new(
        "eth1/GethStopWebsocket",
        &["admin_stopWS"],
        vec![],
        Severity::High,
        "Servidor WebSocket pode ser parado remotamente",
        "O node permite derrubar o endpoint WebSocket via RPC",
    )
}

pub fn txpool_inspection() -> MethodExposure {
    MethodExposure::new(
        "eth1/GethTxPoolInspection",
        &["txpool_inspect"],
        vec![],
        Severity::Low,
        "Inspeção da txpool exposta",
        "txpool_inspect lista um resumo das transações pendentes",
    )
}

pub fn txpool_status() -> MethodExposure {
    MethodExposure::new(
        "eth1/GethTxPoolStatus",
        &["txpool_status"],
        vec![],
        Severity::Low,
        "Status da txpool exposto",
        "txpool_status revela o volume de transações pendentes e enfileiradas",
    )
}

pub fn start_rpc() -> MethodExposure {
    MethodExposure::new(
        "eth1/GethStartRPC",
        &["admin_startHTTP", "admin_startRPC"],
        vec![],
        Severity::High,
        "Servidor HTTP-RPC pode ser iniciado remotamente",
        "O node permite iniciar o endpoint HTTP-RPC via RPC",
    )
}

pub fn stop_rpc() -> MethodExposure {
    MethodExposure::new(
        "eth1/GethStopRPC",
        &["admin_stopHTTP", "admin_stopRPC"],
        vec![],
        Severity::High,
        "Servidor HTTP-RPC pode ser parado remotamente",
        "O node permite derrubar o endpoint HTTP-RPC via RPC",
    )
}
