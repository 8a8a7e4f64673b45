/*!
 * Legion RPC
 *
 * Cliente RPC para interação com nodes Ethereum
 */

pub mod endpoint;

pub use endpoint::resolve_endpoint;

use async_trait::async_trait;
use legion_core::{Endpoint, Error, Result, RpcProvider, Scheme};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};
use web3::{
    transports::{Http, Ipc, WebSocket},
    Transport,
};

/// Configuração do cliente RPC
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// Timeout fixo aplicado à conexão e a cada chamada
    pub timeout: Duration,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

/// Enum para diferentes tipos de transporte
#[derive(Debug)]
pub enum TransportType {
    Http(Http),
    WebSocket(WebSocket),
    Ipc(Ipc),
}

/// Cliente RPC para Ethereum
#[derive(Debug)]
pub struct NodeClient {
    transport: TransportType,
    endpoint: Endpoint,
    config: RpcConfig,
}

impl NodeClient {
    /// Abre o transporte adequado ao esquema do endpoint
    pub async fn connect(endpoint: Endpoint, config: RpcConfig) -> Result<Self> {
        let transport = match endpoint.scheme {
            Scheme::Http | Scheme::Https => {
                let http = Http::new(&endpoint.uri)
                    .map_err(|e| Error::RemoteCallFailure(format!("Falha ao conectar via HTTP: {}", e)))?;
                TransportType::Http(http)
            }
            Scheme::Ws | Scheme::Wss => {
                let ws = tokio::time::timeout(config.timeout, WebSocket::new(&endpoint.uri))
                    .await
                    .map_err(|_| Error::TimeoutError(format!("conexão WebSocket com {}", endpoint.uri)))?
                    .map_err(|e| Error::RemoteCallFailure(format!("Falha ao conectar via WebSocket: {}", e)))?;
                TransportType::WebSocket(ws)
            }
            Scheme::Ipc => {
                let ipc = tokio::time::timeout(config.timeout, Ipc::new(&endpoint.uri))
                    .await
                    .map_err(|_| Error::TimeoutError(format!("conexão IPC com {}", endpoint.uri)))?
                    .map_err(|e| Error::RemoteCallFailure(format!("Falha ao conectar via IPC: {}", e)))?;
                TransportType::Ipc(ipc)
            }
        };

        info!(endpoint = %endpoint.uri, scheme = %endpoint.scheme, "transporte aberto");
        Ok(Self { transport, endpoint, config })
    }

    /// Endpoint ao qual o cliente está conectado
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn execute(&self, method: &str, params: Vec<Value>) -> web3::Result<Value> {
        match &self.transport {
            TransportType::Http(t) => t.execute(method, params).await,
            TransportType::WebSocket(t) => t.execute(method, params).await,
            TransportType::Ipc(t) => t.execute(method, params).await,
        }
    }
}

/// Converte erros do web3 separando recusas JSON-RPC de falhas de transporte
fn map_web3_error(method: &str, err: web3::Error) -> Error {
    match err {
        web3::Error::Rpc(rpc) => Error::RpcRejected {
            code: rpc.code.code(),
            message: rpc.message,
        },
        other => Error::RemoteCallFailure(format!("{}: {}", method, other)),
    }
}

#[async_trait]
impl RpcProvider for NodeClient {
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        debug!(method, "chamada RPC");
        tokio::time::timeout(self.config.timeout, self.execute(method, params))
            .await
            .map_err(|_| Error::TimeoutError(format!("{} após {:?}", method, self.config.timeout)))?
            .map_err(|e| map_web3_error(method, e))
    }
}
