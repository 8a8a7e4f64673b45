//! Plugins específicos do Parity/OpenEthereum (namespace `parity_`).

use serde_json::json;

use super::exposure::MethodExposure;
use crate::probe::Severity;
use crate::settings::ProbeSettings;

fn quantity(value: u64) -> serde_json::Value {
    json!(format!("0x{:x}", value))
}

pub fn gas_ceiling(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityGasCeiling",
        &["parity_setGasCeilTarget"],
        vec![quantity(settings.gas_ceiling)],
        Severity::High,
        "Teto de gas alterável remotamente",
        "O node aceitou alterar o gas ceiling alvo dos blocos",
    )
}

pub fn gas_floor(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityGasFloor",
        &["parity_setGasFloorTarget"],
        vec![quantity(settings.gas_floor)],
        Severity::High,
        "Piso de gas alterável remotamente",
        "O node aceitou alterar o gas floor alvo dos blocos",
    )
}

pub fn dev_logs() -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityDevLogs",
        &["parity_devLogs"],
        vec![],
        Severity::Low,
        "Logs de desenvolvimento expostos",
        "parity_devLogs retorna os logs internos do node",
    )
}

pub fn change_coinbase(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityChangeCoinbase",
        &["parity_setAuthor"],
        vec![json!(settings.author)],
        Severity::High,
        "Coinbase alterável remotamente",
        "O node aceitou trocar o autor dos blocos minerados",
    )
}

pub fn change_target(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityChangeTarget",
        &["parity_setChain"],
        vec![json!(settings.target_chain)],
        Severity::High,
        "Chain alvo alterável remotamente",
        "O node aceitou trocar a chain em que opera",
    )
}

pub fn change_extra(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityChangeExtra",
        &["parity_setExtraData"],
        vec![json!(format!("0x{}", hex::encode(settings.extra_data.as_bytes())))],
        Severity::High,
        "Extra data alterável remotamente",
        "O node aceitou trocar o extra data dos blocos minerados",
    )
}

pub fn sync_mode(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/ParitySyncMode",
        &["parity_setMode"],
        vec![json!(settings.mode)],
        Severity::High,
        "Modo de operação alterável remotamente",
        "O node aceitou trocar o modo de sincronização",
    )
}

pub fn drop_peers() -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityDropPeers",
        &["parity_dropNonReservedPeers"],
        vec![],
        Severity::Critical,
        "Peers podem ser derrubados remotamente",
        "O node aceitou desconectar todos os peers não reservados",
    )
}

pub fn upgrade() -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityUpgrade",
        &["parity_upgradeReady"],
        vec![],
        Severity::Medium,
        "Mecanismo de upgrade exposto",
        "parity_upgradeReady está acessível, indicando o namespace de upgrade aberto",
    )
}

pub fn txpool_statistics() -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityTxPoolStatistics",
        &["parity_pendingTransactionsStats"],
        vec![],
        Severity::Low,
        "Estatísticas da txpool expostas",
        "parity_pendingTransactionsStats revela a propagação das transações pendentes",
    )
}

pub fn tx_ceiling(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityTxCeiling",
        &["parity_setMaxTransactionGas"],
        vec![quantity(settings.gas_limit)],
        Severity::High,
        "Limite de gas por transação alterável remotamente",
        "O node aceitou alterar o gas máximo por transação",
    )
}

pub fn min_gas_price(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/ParityMinGasPrice",
        &["parity_setMinGasPrice"],
        vec![quantity(settings.gas_price)],
        Severity::High,
        "Preço mínimo de gas alterável remotamente",
        "O node aceitou alterar o preço mínimo de gas aceito",
    )
}
