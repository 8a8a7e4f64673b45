use async_trait::async_trait;
use legion_core::{ClientKind, Endpoint, Result, RpcProvider, Scheme};
use serde::Serialize;
use std::fmt;

/// Severidade de um achado
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

/// Achado produzido por um plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_data: Option<serde_json::Value>,
}

impl Issue {
    pub fn new(severity: Severity, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            raw_data: None,
        }
    }

    pub fn with_raw(mut self, raw: serde_json::Value) -> Self {
        self.raw_data = Some(raw);
        self
    }
}

/// Alvo do scan: dados do endpoint e tipo de cliente detectado
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanTarget {
    pub scheme: Scheme,
    pub host: String,
    pub port: u16,
    pub client_kind: ClientKind,
}

impl ScanTarget {
    pub fn from_endpoint(endpoint: &Endpoint, client_kind: ClientKind) -> Self {
        Self {
            scheme: endpoint.scheme,
            host: endpoint.host.clone(),
            port: endpoint.port,
            client_kind,
        }
    }
}

impl fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            Scheme::Ipc => write!(f, "{}", self.host),
            scheme => write!(f, "{}{}:{}", scheme.prefix(), self.host, self.port),
        }
    }
}

/// Contexto entregue a cada plugin durante o scan
pub struct ScanContext<'a> {
    pub target: &'a ScanTarget,
    pub node: &'a dyn RpcProvider,
    /// Node de referência para altura de bloco e saldos
    pub reference: Option<&'a dyn RpcProvider>,
}

impl<'a> ScanContext<'a> {
    /// Provedor usado para dados canônicos da chain
    pub fn chain_source(&self) -> &'a dyn RpcProvider {
        self.reference.unwrap_or(self.node)
    }
}

/// Verificação de segurança executada via RPC contra um node
#[async_trait]
pub trait Probe: Send + Sync {
    /// Nome do plugin, com namespace (`eth1/NodeSync`)
    fn name(&self) -> &'static str;

    /// Executa a verificação e retorna os achados
    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>>;
}
