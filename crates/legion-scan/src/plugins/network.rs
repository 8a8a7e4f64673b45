//! Plugins de rede: escuta, peers e manipulação da lista de peers

use async_trait::async_trait;
use ethereum_types::U256;
use legion_core::{utils, ClientKind, Error, Result};
use serde_json::{json, Value};

use super::exposure::{first_accepted, is_effective};
use crate::probe::{Issue, Probe, ScanContext, Severity};
use crate::settings::ProbeSettings;

/// Métodos a tentar conforme o cliente; cliente desconhecido tenta ambos
fn client_methods(kind: ClientKind, geth: &'static str, parity: &'static str) -> Vec<&'static str> {
    match kind {
        ClientKind::Geth => vec![geth],
        ClientKind::Parity => vec![parity],
        ClientKind::Unknown => vec![geth, parity],
    }
}

pub struct NetworkListening;

#[async_trait]
impl Probe for NetworkListening {
    fn name(&self) -> &'static str {
        "eth1/NetworkListening"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let listening = ctx.node.request("net_listening", vec![]).await?;
        match listening {
            Value::Bool(true) => Ok(Vec::new()),
            Value::Bool(false) => Ok(vec![Issue::new(
                Severity::Medium,
                "Node não está escutando",
                "net_listening retornou false; o node não aceita conexões de peers",
            )]),
            other => Err(Error::DecodeError(format!("resposta inesperada de net_listening: {}", other))),
        }
    }
}

pub struct PeerCountStatus {
    minimum: u64,
}

impl PeerCountStatus {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            minimum: settings.minimum_peercount,
        }
    }
}

#[async_trait]
impl Probe for PeerCountStatus {
    fn name(&self) -> &'static str {
        "eth1/PeerCountStatus"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let raw = ctx.node.request("net_peerCount", vec![]).await?;
        let count = utils::parse_quantity(&raw)?;
        if count >= U256::from(self.minimum) {
            return Ok(Vec::new());
        }
        Ok(vec![Issue::new(
            Severity::Medium,
            "Poucos peers conectados",
            format!("O node tem {} peers, abaixo do mínimo de {}", count, self.minimum),
        )
        .with_raw(raw)])
    }
}

/// Verifica se a lista de peers do node está exposta
pub struct PeerlistLeak;

#[async_trait]
impl Probe for PeerlistLeak {
    fn name(&self) -> &'static str {
        "eth1/PeerlistLeak"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let methods = client_methods(ctx.target.client_kind, "admin_peers", "parity_netPeers");
        let Some((method, value)) = first_accepted(ctx, &methods, &[]).await? else {
            return Ok(Vec::new());
        };
        if !is_effective(&value) {
            return Ok(Vec::new());
        }
        Ok(vec![Issue::new(
            Severity::Medium,
            "Lista de peers exposta",
            format!("{} revela os peers conectados ao node", method),
        )
        .with_raw(value)])
    }
}

/// Tenta adicionar um peer arbitrário ao node
pub struct PeerlistManipulation {
    enode: String,
}

impl PeerlistManipulation {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            enode: settings.test_enode.clone(),
        }
    }
}

#[async_trait]
impl Probe for PeerlistManipulation {
    fn name(&self) -> &'static str {
        "eth1/PeerlistManipulation"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        if self.enode.trim().is_empty() {
            return Err(Error::ValidationError(
                "test_enode não configurado (scan set test_enode <enode>)".to_string(),
            ));
        }
        let methods = client_methods(ctx.target.client_kind, "admin_addPeer", "parity_addReservedPeer");
        let Some((method, value)) = first_accepted(ctx, &methods, &[json!(self.enode)]).await? else {
            return Ok(Vec::new());
        };
        if !is_effective(&value) {
            return Ok(Vec::new());
        }
        Ok(vec![Issue::new(
            Severity::High,
            "Lista de peers manipulável",
            format!("{} aceitou adicionar o peer {}", method, self.enode),
        )
        .with_raw(value)])
    }
}
