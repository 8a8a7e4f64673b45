use legion_core::{Endpoint, Scheme};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{MythrilError, Result};
use crate::report::MythrilReport;

/// Módulos usados quando nenhum é informado
pub const DEFAULT_MODULES: [&str; 2] = ["ether_thief", "selfdestruct"];

/// Parâmetros fixos da análise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MythrilConfig {
    /// Executável do Mythril
    pub binary: String,
    pub strategy: String,
    pub loop_bound: u32,
    pub max_depth: u32,
    pub create_timeout: u64,
    /// Permite ao Mythril ler storage on-chain do contrato
    pub onchain_storage: bool,
    /// Tempo máximo do processo inteiro, em segundos
    pub process_timeout: u64,
}

impl Default for MythrilConfig {
    fn default() -> Self {
        Self {
            binary: "myth".to_string(),
            strategy: "bfs".to_string(),
            loop_bound: 3,
            max_depth: 64,
            create_timeout: 10,
            onchain_storage: true,
            process_timeout: 600,
        }
    }
}

/// Uma análise de contrato
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    pub contract: String,
    /// `host:port` do node
    pub rpc: String,
    pub tls: bool,
    pub modules: Vec<String>,
    pub tx_count: u32,
    /// Timeout de execução simbólica, em segundos
    pub timeout: u64,
}

impl ScanRequest {
    /// Monta a requisição para o endpoint conectado. IPC não é suportado.
    pub fn for_endpoint(
        contract: impl Into<String>,
        endpoint: &Endpoint,
        modules: Vec<String>,
        tx_count: u32,
        timeout: u64,
    ) -> Result<Self> {
        if endpoint.scheme == Scheme::Ipc {
            return Err(MythrilError::Unsupported(format!(
                "{} (use um endpoint HTTP ou WebSocket)",
                endpoint
            )));
        }
        let modules = if modules.is_empty() {
            DEFAULT_MODULES.iter().map(|m| m.to_string()).collect()
        } else {
            modules
        };
        Ok(Self {
            contract: contract.into(),
            rpc: format!("{}:{}", endpoint.host, endpoint.port),
            tls: endpoint.scheme.is_tls(),
            modules,
            tx_count,
            timeout,
        })
    }
}

/// Argumentos de linha de comando do `myth analyze`
pub fn build_args(config: &MythrilConfig, request: &ScanRequest) -> Vec<String> {
    let mut args = vec![
        "analyze".to_string(),
        "-a".to_string(),
        request.contract.clone(),
        "--rpc".to_string(),
        request.rpc.clone(),
    ];
    if request.tls {
        args.push("--rpctls".to_string());
    }
    args.extend([
        "-m".to_string(),
        request.modules.join(","),
        "-t".to_string(),
        request.tx_count.to_string(),
        "--execution-timeout".to_string(),
        request.timeout.to_string(),
        "--strategy".to_string(),
        config.strategy.clone(),
        "--loop-bound".to_string(),
        config.loop_bound.to_string(),
        "--max-depth".to_string(),
        config.max_depth.to_string(),
        "--create-timeout".to_string(),
        config.create_timeout.to_string(),
        "-o".to_string(),
        "json".to_string(),
    ]);
    if !config.onchain_storage {
        args.push("--no-onchain-data".to_string());
    }
    args
}

/// Executa o Mythril e interpreta o relatório
pub async fn run(config: &MythrilConfig, request: &ScanRequest) -> Result<MythrilReport> {
    let args = build_args(config, request);
    info!("Analisando contrato {} via {}", request.contract, request.rpc);
    debug!("{} {}", config.binary, args.join(" "));

    let child = Command::new(&config.binary)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => MythrilError::NotInstalled(config.binary.clone()),
            _ => MythrilError::Spawn(e.to_string()),
        })?;

    let output = tokio::time::timeout(Duration::from_secs(config.process_timeout), child.wait_with_output())
        .await
        .map_err(|_| MythrilError::Timeout(config.process_timeout))?
        .map_err(|e| MythrilError::Spawn(e.to_string()))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    match MythrilReport::parse(&stdout) {
        Ok(report) => {
            debug!("Mythril terminou com {} issues", report.issues.len());
            Ok(report)
        }
        // Código de saída diferente de zero também é usado quando há issues
        Err(MythrilError::InvalidOutput(_)) if !output.status.success() => Err(MythrilError::ProcessFailed {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }),
        Err(e) => Err(e),
    }
}
