use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{MythrilError, Result};

/// Vulnerabilidade reportada pelo Mythril
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MythrilIssue {
    pub title: String,
    #[serde(rename = "swc-id", default)]
    pub swc_id: String,
    pub severity: String,
    #[serde(default)]
    pub function: Option<String>,
    /// Offset da instrução no bytecode
    #[serde(default)]
    pub address: Option<u64>,
    #[serde(default)]
    pub contract: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl fmt::Display for MythrilIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==== {} ====", self.title)?;
        writeln!(f, "SWC ID: {}", self.swc_id)?;
        writeln!(f, "Severidade: {}", self.severity)?;
        if let Some(function) = &self.function {
            writeln!(f, "Função: {}", function)?;
        }
        if let Some(address) = self.address {
            writeln!(f, "Endereço PC: {}", address)?;
        }
        write!(f, "{}", self.description.trim_end())
    }
}

/// Relatório `-o json` do Mythril
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MythrilReport {
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub issues: Vec<MythrilIssue>,
}

fn default_success() -> bool {
    true
}

impl MythrilReport {
    /// Interpreta a saída padrão do `myth analyze -o json`
    pub fn parse(output: &str) -> Result<Self> {
        let start = output
            .find('{')
            .ok_or_else(|| MythrilError::InvalidOutput("nenhum objeto JSON na saída".to_string()))?;
        let report: MythrilReport = serde_json::from_str(output[start..].trim_end())
            .map_err(|e| MythrilError::InvalidOutput(e.to_string()))?;
        if !report.success {
            let reason = report.error.clone().unwrap_or_else(|| "erro desconhecido".to_string());
            return Err(MythrilError::Analysis(reason));
        }
        Ok(report)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}
