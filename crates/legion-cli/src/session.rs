use legion_core::{ClientKind, Endpoint, Error, Result, RpcProvider};
use legion_rpc::{resolve_endpoint, NodeClient, RpcConfig};
use legion_scan::{ProbeSelection, ProbeSettings, ScanTarget};
use std::sync::Arc;
use tracing::{info, warn};

use crate::chains::ChainNames;
use crate::config::AppConfig;

/// Variável de ambiente com o node padrão
pub const PROVIDER_URI_ENV: &str = "WEB3_PROVIDER_URI";

/// Conexão ativa com um node
pub struct Connection {
    pub endpoint: Endpoint,
    pub client_kind: ClientKind,
    pub client_version: Option<String>,
    provider: Arc<dyn RpcProvider>,
}

impl Connection {
    pub fn provider(&self) -> Arc<dyn RpcProvider> {
        Arc::clone(&self.provider)
    }

    pub fn target(&self) -> ScanTarget {
        ScanTarget::from_endpoint(&self.endpoint, self.client_kind)
    }
}

/// Estado do shell: conexão, seleção de plugins e configurações
///
/// Pertence ao loop do shell e é passado como `&mut` para cada comando.
pub struct Session {
    pub config: AppConfig,
    pub chains: ChainNames,
    pub selection: ProbeSelection,
    pub probe_settings: ProbeSettings,
    connection: Option<Connection>,
    default_uri: Option<String>,
}

impl Session {
    pub fn new(config: AppConfig, chains: ChainNames) -> Self {
        let env_uri = std::env::var(PROVIDER_URI_ENV).ok().filter(|v| !v.trim().is_empty());
        Self::with_default_uri(config, chains, env_uri)
    }

    /// `default_uri` tem precedência sobre `default_host` da configuração
    pub fn with_default_uri(config: AppConfig, chains: ChainNames, default_uri: Option<String>) -> Self {
        let default_uri = default_uri.or_else(|| config.default_host.clone());
        Self {
            probe_settings: config.probes.clone(),
            config,
            chains,
            selection: ProbeSelection::new(),
            connection: None,
            default_uri,
        }
    }

    pub fn connection(&self) -> Option<&Connection> {
        self.connection.as_ref()
    }

    /// Tipo do cliente conectado; desconhecido sem conexão
    pub fn client_kind(&self) -> ClientKind {
        self.connection
            .as_ref()
            .map_or(ClientKind::Unknown, |c| c.client_kind)
    }

    fn rpc_config(&self) -> RpcConfig {
        RpcConfig {
            timeout: self.config.timeout(),
        }
    }

    /// Abre um cliente para o host sem alterar a conexão da sessão
    pub async fn open(&self, host: &str) -> Result<(Endpoint, NodeClient)> {
        let endpoint = resolve_endpoint(host)?;
        let client = NodeClient::connect(endpoint.clone(), self.rpc_config()).await?;
        Ok((endpoint, client))
    }

    /// Conecta (ou reconecta) a sessão ao host
    pub async fn connect(&mut self, host: &str) -> Result<&Connection> {
        let (endpoint, client) = self.open(host).await?;
        Ok(self.attach(endpoint, Arc::new(client)).await)
    }

    /// Substitui a conexão atual e identifica o cliente
    pub async fn attach(&mut self, endpoint: Endpoint, provider: Arc<dyn RpcProvider>) -> &Connection {
        let client_version = match provider.client_version().await {
            Ok(version) => Some(version),
            Err(e) => {
                warn!("Não foi possível obter a versão do cliente em {}: {}", endpoint, e);
                None
            }
        };
        let client_kind = client_version
            .as_deref()
            .map_or(ClientKind::Unknown, ClientKind::from_client_version);
        info!("Conectado a {} ({})", endpoint, client_kind);

        self.connection.insert(Connection {
            endpoint,
            client_kind,
            client_version,
            provider,
        })
    }

    /// Conexão atual, conectando ao node padrão se ainda não houver
    pub async fn ensure_connection(&mut self) -> Result<&Connection> {
        if self.connection.is_none() {
            let Some(uri) = self.default_uri.clone() else {
                return Err(Error::NotConnected);
            };
            info!("Usando node padrão {}", uri);
            self.connect(&uri).await?;
        }
        self.connection.as_ref().ok_or(Error::NotConnected)
    }

    pub async fn provider(&mut self) -> Result<Arc<dyn RpcProvider>> {
        Ok(self.ensure_connection().await?.provider())
    }
}
