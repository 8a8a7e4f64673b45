/*!
 * Legion Types
 *
 * Tipos comuns usados em toda a workspace Legion
 */

use ethereum_types::H256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Alias para hash de transação
pub type TransactionHash = H256;

/// Família de implementação do node Ethereum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ClientKind {
    Geth,
    Parity,
    Unknown,
}

impl ClientKind {
    /// Classifica o cliente a partir da resposta de `web3_clientVersion`
    pub fn from_client_version(version: &str) -> Self {
        let version = version.to_lowercase();
        if version.contains("geth") {
            ClientKind::Geth
        } else if version.contains("parity") || version.contains("openethereum") {
            ClientKind::Parity
        } else {
            ClientKind::Unknown
        }
    }

    /// Clientes conhecidos, para os quais existe tabela de capacidades
    pub fn known() -> [ClientKind; 2] {
        [ClientKind::Geth, ClientKind::Parity]
    }
}

impl fmt::Display for ClientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientKind::Geth => write!(f, "GETH"),
            ClientKind::Parity => write!(f, "PARITY"),
            ClientKind::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Esquema de transporte de um endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Ipc,
    Http,
    Https,
    Ws,
    Wss,
}

impl Scheme {
    /// Prefixo usado na URI (`https://`, ...). Vazio para IPC.
    pub fn prefix(&self) -> &'static str {
        match self {
            Scheme::Ipc => "",
            Scheme::Http => "http://",
            Scheme::Https => "https://",
            Scheme::Ws => "ws://",
            Scheme::Wss => "wss://",
        }
    }

    /// Indica transporte por WebSocket
    pub fn is_websocket(&self) -> bool {
        matches!(self, Scheme::Ws | Scheme::Wss)
    }

    /// Indica transporte com TLS
    pub fn is_tls(&self) -> bool {
        matches!(self, Scheme::Https | Scheme::Wss)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::Ipc => "ipc",
            Scheme::Http => "http",
            Scheme::Https => "https",
            Scheme::Ws => "ws",
            Scheme::Wss => "wss",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Scheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ipc" => Ok(Scheme::Ipc),
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            "ws" => Ok(Scheme::Ws),
            "wss" => Ok(Scheme::Wss),
            other => Err(Error::InvalidEndpoint(format!("esquema desconhecido: {}", other))),
        }
    }
}

/// Endpoint resolvido de um node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// URI completa (ou caminho do socket para IPC)
    pub uri: String,
    pub scheme: Scheme,
    /// Host da URL ou caminho do socket IPC
    pub host: String,
    /// Porta explícita ou padrão do esquema; 0 para IPC
    pub port: u16,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uri)
    }
}

/// Bloco de referência para consultas de estado
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockTag {
    Latest,
    Earliest,
    Pending,
    Number(u64),
}

impl BlockTag {
    /// Representação como parâmetro JSON-RPC
    pub fn to_param(&self) -> serde_json::Value {
        match self {
            BlockTag::Latest => serde_json::Value::String("latest".into()),
            BlockTag::Earliest => serde_json::Value::String("earliest".into()),
            BlockTag::Pending => serde_json::Value::String("pending".into()),
            BlockTag::Number(n) => serde_json::Value::String(format!("0x{:x}", n)),
        }
    }
}

impl fmt::Display for BlockTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockTag::Latest => write!(f, "latest"),
            BlockTag::Earliest => write!(f, "earliest"),
            BlockTag::Pending => write!(f, "pending"),
            BlockTag::Number(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for BlockTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "latest" => return Ok(BlockTag::Latest),
            "earliest" => return Ok(BlockTag::Earliest),
            "pending" => return Ok(BlockTag::Pending),
            _ => {}
        }
        let parsed = match s.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed
            .map(BlockTag::Number)
            .map_err(|_| Error::ValidationError(format!("bloco inválido: {}", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_client_versions() {
        assert_eq!(
            ClientKind::from_client_version("Geth/v1.10.26-stable-e5eb32ac/linux-amd64/go1.18.5"),
            ClientKind::Geth
        );
        assert_eq!(
            ClientKind::from_client_version("Parity-Ethereum//v2.7.2-stable-2662d19-20200206/x86_64-unknown-linux-gnu/rustc1.41.0"),
            ClientKind::Parity
        );
        assert_eq!(
            ClientKind::from_client_version("OpenEthereum//v3.3.5-stable/x86_64-linux-musl/rustc1.59.0"),
            ClientKind::Parity
        );
        assert_eq!(ClientKind::from_client_version("Nethermind/v1.20.0"), ClientKind::Unknown);
        assert_eq!(ClientKind::from_client_version(""), ClientKind::Unknown);
    }

    #[test]
    fn parses_block_tags() {
        assert_eq!("latest".parse::<BlockTag>().unwrap(), BlockTag::Latest);
        assert_eq!("100".parse::<BlockTag>().unwrap(), BlockTag::Number(100));
        assert_eq!("0x64".parse::<BlockTag>().unwrap(), BlockTag::Number(100));
        assert!("abc".parse::<BlockTag>().is_err());
        assert_eq!(BlockTag::Number(255).to_param(), serde_json::json!("0xff"));
    }
}
