//! Plugins sobre o estado do node: versão, sincronização, mineração e SHA3

use async_trait::async_trait;
use ethereum_types::U256;
use legion_core::{utils, ClientKind, Error, Result};
use serde_json::{json, Value};
use tracing::debug;

use super::exposure::MethodExposure;
use crate::probe::{Issue, Probe, ScanContext, Severity};
use crate::settings::ProbeSettings;

/// Extrai `major.minor.patch` da primeira ocorrência de `v<digitos>` na string
pub fn parse_version(text: &str) -> Option<(u64, u64, u64)> {
    let bytes = text.as_bytes();
    for (idx, _) in text.match_indices('v') {
        if !bytes.get(idx + 1).map_or(false, u8::is_ascii_digit) {
            continue;
        }
        if let Some(version) = parse_triplet(&text[idx + 1..]) {
            return Some(version);
        }
    }
    parse_triplet(text.trim_start_matches('v'))
}

fn parse_triplet(text: &str) -> Option<(u64, u64, u64)> {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let mut parts = text[..end].split('.').map(|p| p.parse::<u64>().ok());
    let major = parts.next()??;
    let minor = parts.next()??;
    let patch = parts.next().flatten().unwrap_or(0);
    Some((major, minor, patch))
}

/// Verifica a versão divulgada e se está desatualizada
pub struct NodeVersion {
    minimum_geth: String,
    minimum_parity: String,
}

impl NodeVersion {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            minimum_geth: settings.minimum_geth_version.clone(),
            minimum_parity: settings.minimum_parity_version.clone(),
        }
    }
}

#[async_trait]
impl Probe for NodeVersion {
    fn name(&self) -> &'static str {
        "eth1/NodeVersion"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let version = ctx.node.client_version().await?;
        let mut issues = vec![Issue::new(
            Severity::Info,
            "Versão do cliente divulgada",
            format!("O node informa a versão {}", version),
        )
        .with_raw(json!(version))];

        let kind = ClientKind::from_client_version(&version);
        let minimum = match kind {
            ClientKind::Geth => &self.minimum_geth,
            ClientKind::Parity => &self.minimum_parity,
            ClientKind::Unknown => return Ok(issues),
        };
        let (Some(current), Some(required)) = (parse_version(&version), parse_version(minimum)) else {
            debug!("Não foi possível comparar as versões {} e {}", version, minimum);
            return Ok(issues);
        };
        if current < required {
            issues.push(Issue::new(
                Severity::Medium,
                "Cliente desatualizado",
                format!(
                    "{} {}.{}.{} é anterior à versão mínima {}",
                    kind, current.0, current.1, current.2, minimum
                ),
            ));
        }
        Ok(issues)
    }
}

/// Compara a altura do node com o estado de sincronização e com o node de referência
pub struct NodeSync {
    threshold: u64,
}

impl NodeSync {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            threshold: settings.block_threshold,
        }
    }
}

#[async_trait]
impl Probe for NodeSync {
    fn name(&self) -> &'static str {
        "eth1/NodeSync"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let mut issues = Vec::new();

        let syncing = ctx.node.request("eth_syncing", vec![]).await?;
        if let Value::Object(status) = &syncing {
            let current = status.get("currentBlock").map(utils::parse_quantity).transpose()?;
            let highest = status.get("highestBlock").map(utils::parse_quantity).transpose()?;
            if let (Some(current), Some(highest)) = (current, highest) {
                let lag = highest.saturating_sub(current);
                if lag > U256::from(self.threshold) {
                    issues.push(
                        Issue::new(
                            Severity::Medium,
                            "Node sincronizando",
                            format!("O node está {} blocos atrás do topo informado", lag),
                        )
                        .with_raw(syncing.clone()),
                    );
                }
            }
        }

        if let Some(reference) = ctx.reference {
            let local = ctx.node.block_number().await?;
            let canonical = reference.block_number().await?;
            let lag = canonical.saturating_sub(local);
            if lag > self.threshold {
                issues.push(
                    Issue::new(
                        Severity::Medium,
                        "Node atrasado em relação à referência",
                        format!("Bloco local {} e bloco de referência {} ({} de diferença)", local, canonical, lag),
                    )
                    .with_raw(json!({ "local": local, "reference": canonical })),
                );
            }
        }

        Ok(issues)
    }
}

/// Verifica se `web3_sha3` produz o hash esperado
pub struct Sha3Consistency {
    input: String,
    expected: String,
}

impl Sha3Consistency {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            input: settings.test_input.clone(),
            expected: settings.test_output.clone(),
        }
    }
}

#[async_trait]
impl Probe for Sha3Consistency {
    fn name(&self) -> &'static str {
        "eth1/SHA3Consistency"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let result = ctx.node.request("web3_sha3", vec![json!(self.input)]).await?;
        let hash = result
            .as_str()
            .ok_or_else(|| Error::DecodeError(format!("resposta inesperada de web3_sha3: {}", result)))?;
        if hash.eq_ignore_ascii_case(&self.expected) {
            return Ok(Vec::new());
        }
        Ok(vec![Issue::new(
            Severity::High,
            "SHA3 inconsistente",
            format!("web3_sha3({}) retornou {}, esperado {}", self.input, hash, self.expected),
        )
        .with_raw(result.clone())])
    }
}

/// Compara `eth_mining` com o estado esperado
pub struct MiningStatus {
    should_mine: bool,
}

impl MiningStatus {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            should_mine: settings.should_mine,
        }
    }
}

#[async_trait]
impl Probe for MiningStatus {
    fn name(&self) -> &'static str {
        "eth1/MiningStatus"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let mining = ctx
            .node
            .request("eth_mining", vec![])
            .await?
            .as_bool()
            .ok_or_else(|| Error::DecodeError("eth_mining não retornou booleano".to_string()))?;
        if mining == self.should_mine {
            return Ok(Vec::new());
        }
        let description = if mining {
            "O node está minerando, mas não deveria"
        } else {
            "O node deveria estar minerando, mas não está"
        };
        Ok(vec![Issue::new(Severity::Medium, "Estado de mineração inesperado", description)])
    }
}

/// Compara `eth_hashrate` com o mínimo configurado
pub struct HashrateStatus {
    minimum: u64,
}

impl HashrateStatus {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            minimum: settings.hash_rate,
        }
    }
}

#[async_trait]
impl Probe for HashrateStatus {
    fn name(&self) -> &'static str {
        "eth1/HashrateStatus"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let raw = ctx.node.request("eth_hashrate", vec![]).await?;
        let rate = utils::parse_quantity(&raw)?;
        if rate >= U256::from(self.minimum) {
            return Ok(Vec::new());
        }
        Ok(vec![Issue::new(
            Severity::Low,
            "Hashrate abaixo do esperado",
            format!("Hashrate {} abaixo do mínimo de {}", rate, self.minimum),
        )
        .with_raw(raw)])
    }
}

pub fn txpool_content() -> MethodExposure {
    MethodExposure::new(
        "eth1/TxPoolContent",
        &["txpool_content", "parity_pendingTransactions"],
        vec![],
        Severity::Medium,
        "Conteúdo da txpool exposto",
        "O node lista o conteúdo completo das transações pendentes",
    )
}
