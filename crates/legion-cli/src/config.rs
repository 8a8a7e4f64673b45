use legion_core::{Error, Result};
use legion_ens::{DEFAULT_SUBGRAPH_URL, ENS_REGISTRY};
use legion_mythril::MythrilConfig;
use legion_scan::ProbeSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Configuração da aplicação, lida de um arquivo JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Timeout de conexão e de cada chamada RPC, em segundos
    pub connect_timeout: u64,
    /// Node usado quando nenhum `sethost` foi feito e `WEB3_PROVIDER_URI` não está definida
    pub default_host: Option<String>,
    /// Arquivo no formato chainid.network com os nomes das chains
    pub chains_file: PathBuf,
    pub ens: EnsConfig,
    pub investigate: InvestigateConfig,
    pub probes: ProbeSettings,
    pub mythril: MythrilConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsConfig {
    pub registry: String,
    pub subgraph_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestigateConfig {
    /// Senha usada por `investigate accounts --intrusive`
    pub password: String,
    /// Mensagem padrão de `investigate sign`
    pub message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            default_host: None,
            chains_file: PathBuf::from("chains.json"),
            ens: EnsConfig::default(),
            investigate: InvestigateConfig::default(),
            probes: ProbeSettings::default(),
            mythril: MythrilConfig::default(),
        }
    }
}

impl Default for EnsConfig {
    fn default() -> Self {
        Self {
            registry: ENS_REGISTRY.to_string(),
            subgraph_url: DEFAULT_SUBGRAPH_URL.to_string(),
        }
    }
}

impl Default for InvestigateConfig {
    fn default() -> Self {
        Self {
            password: "legion".to_string(),
            message: "legion".to_string(),
        }
    }
}

impl AppConfig {
    /// Carrega o arquivo indicado ou usa os valores padrão
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::ValidationError(format!("não foi possível ler {}: {}", path.display(), e)))?;
        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| Error::ValidationError(format!("configuração inválida em {}: {}", path.display(), e)))?;
        info!("Configuração carregada de {}", path.display());
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout.max(1))
    }
}
