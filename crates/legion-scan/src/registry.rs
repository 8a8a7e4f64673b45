//! Tabelas de capacidade: fábricas de plugins e plugins aplicáveis por cliente

use legion_core::ClientKind;
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::plugins::{accounts, geth, network, node, parity};
use crate::probe::Probe;
use crate::settings::ProbeSettings;

/// Constrói um plugin a partir das configurações vigentes
pub type ProbeFactory = fn(&ProbeSettings) -> Box<dyn Probe>;

/// Plugins aplicáveis a qualquer cliente conhecido
pub const SUPPORTED_BY_ALL_CLIENTS: [&str; 13] = [
    "eth1/AccountCreation",
    "eth1/PeerlistLeak",
    "eth1/MiningStatus",
    "eth1/HashrateStatus",
    "eth1/NetworkListening",
    "eth1/PeerCountStatus",
    "eth1/PeerlistManipulation",
    "eth1/NodeVersion",
    "eth1/TxPoolContent",
    "eth1/NodeSync",
    "eth1/SHA3Consistency",
    "eth1/OpenAccounts",
    "eth1/AccountUnlock",
];

pub const GETH_SPECIFIC: [&str; 9] = [
    "eth1/GethAccountImport",
    "eth1/GethDatadir",
    "eth1/GethNodeInfo",
    "eth1/GethStartWebsocket",
    "eth1/GethStopWebsocket",
    "eth1/GethTxPoolInspection",
    "eth1/GethTxPoolStatus",
    "eth1/GethStartRPC",
    "eth1/GethStopRPC",
];

pub const PARITY_SPECIFIC: [&str; 12] = [
    "eth1/ParityGasCeiling",
    "eth1/ParityGasFloor",
    "eth1/ParityDevLogs",
    "eth1/ParityChangeCoinbase",
    "eth1/ParityChangeTarget",
    "eth1/ParityChangeExtra",
    "eth1/ParitySyncMode",
    "eth1/ParityDropPeers",
    "eth1/ParityUpgrade",
    "eth1/ParityTxPoolStatistics",
    "eth1/ParityTxCeiling",
    "eth1/ParityMinGasPrice",
];

static FACTORIES: Lazy<BTreeMap<&'static str, ProbeFactory>> = Lazy::new(|| {
    let entries: [(&'static str, ProbeFactory); 34] = [
        // comuns
        ("eth1/AccountCreation", |s| Box::new(accounts::account_creation(s))),
        ("eth1/PeerlistLeak", |_| Box::new(network::PeerlistLeak)),
        ("eth1/MiningStatus", |s| Box::new(node::MiningStatus::new(s))),
        ("eth1/HashrateStatus", |s| Box::new(node::HashrateStatus::new(s))),
        ("eth1/NetworkListening", |_| Box::new(network::NetworkListening)),
        ("eth1/PeerCountStatus", |s| Box::new(network::PeerCountStatus::new(s))),
        ("eth1/PeerlistManipulation", |s| Box::new(network::PeerlistManipulation::new(s))),
        ("eth1/NodeVersion", |s| Box::new(node::NodeVersion::new(s))),
        ("eth1/TxPoolContent", |_| Box::new(node::txpool_content())),
        ("eth1/NodeSync", |s| Box::new(node::NodeSync::new(s))),
        ("eth1/SHA3Consistency", |s| Box::new(node::Sha3Consistency::new(s))),
        ("eth1/OpenAccounts", |_| Box::new(accounts::OpenAccounts)),
        ("eth1/AccountUnlock", |s| Box::new(accounts::AccountUnlock::new(s))),
        // geth
        ("eth1/GethAccountImport", |s| Box::new(geth::account_import(s))),
        ("eth1/GethDatadir", |_| Box::new(geth::datadir())),
        ("eth1/GethNodeInfo", |_| Box::new(geth::node_info())),
        ("eth1/GethStartWebsocket", |_| Box::new(geth::start_websocket())),
        ("eth1/GethStopWebsocket", |_| Box::new(geth::stop_websocket())),
        ("eth1/GethTxPoolInspection", |_| Box::new(geth::txpool_inspection())),
        ("eth1/GethTxPoolStatus", |_| Box::new(geth::txpool_status())),
        ("eth1/GethStartRPC", |_| Box::new(geth::start_rpc())),
        ("eth1/GethStopRPC", |_| Box::new(geth::stop_rpc())),
        // parity
        ("eth1/ParityGasCeiling", |s| Box::new(parity::gas_ceiling(s))),
        ("eth1/ParityGasFloor", |s| Box::new(parity::gas_floor(s))),
        ("eth1/ParityDevLogs", |_| Box::new(parity::dev_logs())),
        ("eth1/ParityChangeCoinbase", |s| Box::new(parity::change_coinbase(s))),
        ("eth1/ParityChangeTarget", |s| Box::new(parity::change_target(s))),
        ("eth1/ParityChangeExtra", |s| Box::new(parity::change_extra(s))),
        ("eth1/ParitySyncMode", |s| Box::new(parity::sync_mode(s))),
        ("eth1/ParityDropPeers", |_| Box::new(parity::drop_peers())),
        ("eth1/ParityUpgrade", |_| Box::new(parity::upgrade())),
        ("eth1/ParityTxPoolStatistics", |_| Box::new(parity::txpool_statistics())),
        ("eth1/ParityTxCeiling", |s| Box::new(parity::tx_ceiling(s))),
        ("eth1/ParityMinGasPrice", |s| Box::new(parity::min_gas_price(s))),
    ];
    entries.into_iter().collect()
});

/// Fábrica registrada para o nome, se existir
pub fn factory(name: &str) -> Option<ProbeFactory> {
    FACTORIES.get(name).copied()
}

/// Todos os nomes com fábrica, ordenados
pub fn list_all() -> Vec<&'static str> {
    FACTORIES.keys().copied().collect()
}

/// Plugins aplicáveis ao cliente, ordenados. Cliente desconhecido não tem nenhum.
pub fn supported_by(kind: ClientKind) -> Vec<&'static str> {
    let specific: &[&'static str] = match kind {
        ClientKind::Geth => &GETH_SPECIFIC,
        ClientKind::Parity => &PARITY_SPECIFIC,
        ClientKind::Unknown => return Vec::new(),
    };
    let mut names: Vec<&'static str> = SUPPORTED_BY_ALL_CLIENTS.iter().chain(specific).copied().collect();
    names.sort_unstable();
    names
}

pub fn is_supported(name: &str, kind: ClientKind) -> bool {
    supported_by(kind).contains(&name)
}
