use chrono::{DateTime, Utc};
use legion_core::{ClientKind, Result};
use serde::Serialize;

use crate::probe::{Issue, ScanTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    Passed,
    IssuesFound,
    Failed,
}

/// Resultado de um plugin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub probe: String,
    pub status: ProbeStatus,
    pub issues: Vec<Issue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

/// Relatório de uma execução de scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub target: ScanTarget,
    pub client_kind: ClientKind,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub results: Vec<ProbeResult>,
}

impl ScanReport {
    pub fn issue_count(&self) -> usize {
        self.results.iter().map(|r| r.issues.len()).sum()
    }

    pub fn failed(&self) -> impl Iterator<Item = &ProbeResult> {
        self.results.iter().filter(|r| r.status == ProbeStatus::Failed)
    }

    pub fn result(&self, probe: &str) -> Option<&ProbeResult> {
        self.results.iter().find(|r| r.probe == probe)
    }

    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| legion_core::Error::DecodeError(format!("falha ao serializar relatório: {}", e)))
    }
}
