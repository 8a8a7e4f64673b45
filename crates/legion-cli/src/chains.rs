use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

const KNOWN_CHAINS: [(u64, &str); 16] = [
    (1, "Ethereum Mainnet"),
    (3, "Ropsten"),
    (4, "Rinkeby"),
    (5, "Goerli"),
    (10, "OP Mainnet"),
    (56, "BNB Smart Chain Mainnet"),
    (61, "Ethereum Classic"),
    (100, "Gnosis"),
    (137, "Polygon Mainnet"),
    (1337, "Geth Testnet"),
    (8453, "Base"),
    (17000, "Holesky"),
    (31337, "Hardhat"),
    (42161, "Arbitrum One"),
    (43114, "Avalanche C-Chain"),
    (11155111, "Sepolia"),
];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChainEntry {
    name: String,
    chain_id: u64,
}

/// Nomes de chains indexados pelo chain id
#[derive(Debug, Clone)]
pub struct ChainNames {
    names: HashMap<u64, String>,
}

impl Default for ChainNames {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ChainNames {
    pub fn builtin() -> Self {
        Self {
            names: KNOWN_CHAINS.iter().map(|(id, name)| (*id, name.to_string())).collect(),
        }
    }

    /// Lê um arquivo chainid.network; sem arquivo usa a tabela embutida
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(_) => {
                debug!("{} ausente, usando tabela de chains embutida", path.display());
                return Self::builtin();
            }
        };
        match serde_json::from_str::<Vec<ChainEntry>>(&content) {
            Ok(entries) => Self {
                names: entries.into_iter().map(|e| (e.chain_id, e.name)).collect(),
            },
            Err(e) => {
                warn!("Arquivo de chains {} inválido: {}", path.display(), e);
                Self::builtin()
            }
        }
    }

    pub fn name(&self, chain_id: u64) -> Option<&str> {
        self.names.get(&chain_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_table_knows_mainnet() {
        assert_eq!(ChainNames::builtin().name(1), Some("Ethereum Mainnet"));
        assert_eq!(ChainNames::builtin().name(999_999), None);
    }

    #[test]
    fn file_replaces_builtin_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name":"Legion Devnet","chainId":4242,"shortName":"lgn"}}]"#).unwrap();
        let chains = ChainNames::load(file.path());
        assert_eq!(chains.name(4242), Some("Legion Devnet"));
        assert_eq!(chains.name(1), None);
    }

    #[test]
    fn missing_or_broken_file_falls_back() {
        assert_eq!(ChainNames::load(Path::new("/nonexistent/chains.json")).name(1), Some("Ethereum Mainnet"));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{").unwrap();
        assert_eq!(ChainNames::load(file.path()).name(5), Some("Goerli"));
    }
}
