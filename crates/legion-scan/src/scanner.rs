use chrono::Utc;
use legion_core::RpcProvider;
use std::time::Instant;
use tracing::{info, warn};

use crate::probe::{Probe, ScanContext, ScanTarget};
use crate::report::{ProbeResult, ProbeStatus, ScanReport};
use crate::selection::ProbeSelection;
use crate::settings::ProbeSettings;

/// Executa uma lista de plugins, em sequência, contra um node
pub struct Scanner<'a> {
    target: ScanTarget,
    probes: Vec<Box<dyn Probe>>,
    node: &'a dyn RpcProvider,
    reference: Option<&'a dyn RpcProvider>,
}

impl<'a> Scanner<'a> {
    pub fn new(target: ScanTarget, probes: Vec<Box<dyn Probe>>, node: &'a dyn RpcProvider) -> Self {
        Self {
            target,
            probes,
            node,
            reference: None,
        }
    }

    /// Node usado como referência de altura de bloco e saldos
    pub fn with_reference(mut self, reference: &'a dyn RpcProvider) -> Self {
        self.reference = Some(reference);
        self
    }

    pub async fn run(self) -> ScanReport {
        let started_at = Utc::now();
        let ctx = ScanContext {
            target: &self.target,
            node: self.node,
            reference: self.reference,
        };

        info!("Iniciando scan de {} com {} plugins", self.target, self.probes.len());
        let mut results = Vec::with_capacity(self.probes.len());
        for probe in &self.probes {
            let start = Instant::now();
            let outcome = probe.check(&ctx).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;

            let result = match outcome {
                Ok(issues) => ProbeResult {
                    probe: probe.name().to_string(),
                    status: if issues.is_empty() {
                        ProbeStatus::Passed
                    } else {
                        ProbeStatus::IssuesFound
                    },
                    issues,
                    error: None,
                    elapsed_ms,
                },
                Err(e) => {
                    warn!("Plugin {} falhou: {}", probe.name(), e);
                    ProbeResult {
                        probe: probe.name().to_string(),
                        status: ProbeStatus::Failed,
                        issues: Vec::new(),
                        error: Some(e.to_string()),
                        elapsed_ms,
                    }
                }
            };
            results.push(result);
        }

        ScanReport {
            client_kind: self.target.client_kind,
            target: self.target,
            started_at,
            finished_at: Utc::now(),
            results,
        }
    }
}

/// Executa os plugins selecionados; `None` quando nada foi selecionado
pub async fn execute(
    selection: &ProbeSelection,
    settings: &ProbeSettings,
    target: ScanTarget,
    node: &dyn RpcProvider,
    reference: Option<&dyn RpcProvider>,
) -> Option<ScanReport> {
    if selection.is_empty() {
        return None;
    }
    let probes = selection.instantiate(settings);
    let mut scanner = Scanner::new(target, probes, node);
    if let Some(reference) = reference {
        scanner = scanner.with_reference(reference);
    }
    Some(scanner.run().await)
}
