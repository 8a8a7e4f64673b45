use legion_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parâmetros usados pelas fábricas de plugins
///
/// As fábricas leem estes valores no momento da instanciação, então
/// alterações via `scan set` valem para a próxima execução.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Senha usada em AccountCreation e GethAccountImport
    pub password: String,
    pub gas_ceiling: u64,
    pub gas_floor: u64,
    /// Preço mínimo de gas (wei) para ParityMinGasPrice
    pub gas_price: u64,
    /// Gas máximo por transação para ParityTxCeiling
    pub gas_limit: u64,
    pub author: String,
    pub target_chain: String,
    pub extra_data: String,
    /// Modo de operação do Parity (active, passive, dark, offline)
    pub mode: String,
    pub should_mine: bool,
    /// Hashrate mínimo esperado
    pub hash_rate: u64,
    pub minimum_peercount: u64,
    /// Node de referência (ex.: Infura) para altura de bloco e saldos
    pub reference_url: Option<String>,
    pub word_list: Vec<String>,
    /// Contas com saldo abaixo deste valor (wei) são ignoradas no AccountUnlock
    pub skip_below: u128,
    pub test_input: String,
    pub test_output: String,
    pub test_enode: String,
    /// Diferença máxima de blocos tolerada no NodeSync
    pub block_threshold: u64,
    /// Chave privada de teste para GethAccountImport
    pub import_key: String,
    pub minimum_geth_version: String,
    pub minimum_parity_version: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            password: "legion".to_string(),
            gas_ceiling: 30_000_000,
            gas_floor: 8_000_000,
            gas_price: 1,
            gas_limit: 21_000,
            author: "0x0000000000000000000000000000000000000000".to_string(),
            target_chain: "foundation".to_string(),
            extra_data: "legion".to_string(),
            mode: "active".to_string(),
            should_mine: false,
            hash_rate: 0,
            minimum_peercount: 1,
            reference_url: None,
            word_list: vec![
                String::new(),
                "password".to_string(),
                "123456".to_string(),
                "admin".to_string(),
                "legion".to_string(),
            ],
            skip_below: 0,
            // keccak256("hello world")
            test_input: "0x68656c6c6f20776f726c64".to_string(),
            test_output: "0x47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fad".to_string(),
            test_enode: String::new(),
            block_threshold: 10,
            import_key: "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318".to_string(),
            minimum_geth_version: "1.13.0".to_string(),
            minimum_parity_version: "3.3.5".to_string(),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| Error::ValidationError(format!("valor inválido para {}: {}", key, value)))
}

impl ProbeSettings {
    /// Altera um parâmetro pelo nome
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "password" => self.password = value.to_string(),
            "gas_ceiling" => self.gas_ceiling = parse(key, value)?,
            "gas_floor" => self.gas_floor = parse(key, value)?,
            "gas_price" => self.gas_price = parse(key, value)?,
            "gas_limit" => self.gas_limit = parse(key, value)?,
            "author" => self.author = value.to_string(),
            "target_chain" => self.target_chain = value.to_string(),
            "extra_data" => self.extra_data = value.to_string(),
            "mode" => self.mode = value.to_string(),
            "should_mine" => self.should_mine = parse(key, value)?,
            "hash_rate" => self.hash_rate = parse(key, value)?,
            "minimum_peercount" => self.minimum_peercount = parse(key, value)?,
            "reference_url" => {
                let value = value.trim();
                self.reference_url = match value {
                    "" | "none" => None,
                    url => Some(url.to_string()),
                };
            }
            "word_list" => {
                self.word_list = value.split(',').map(|w| w.trim().to_string()).collect();
            }
            "skip_below" => self.skip_below = parse(key, value)?,
            "test_input" => self.test_input = value.to_string(),
            "test_output" => self.test_output = value.to_string(),
            "test_enode" => self.test_enode = value.to_string(),
            "block_threshold" => self.block_threshold = parse(key, value)?,
            "import_key" => self.import_key = value.to_string(),
            "minimum_geth_version" => self.minimum_geth_version = value.to_string(),
            "minimum_parity_version" => self.minimum_parity_version = value.to_string(),
            other => return Err(Error::ValidationError(format!("parâmetro desconhecido: {}", other))),
        }
        Ok(())
    }

    /// Pares nome/valor para exibição
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("password", self.password.clone()),
            ("gas_ceiling", self.gas_ceiling.to_string()),
            ("gas_floor", self.gas_floor.to_string()),
            ("gas_price", self.gas_price.to_string()),
            ("gas_limit", self.gas_limit.to_string()),
            ("author", self.author.clone()),
            ("target_chain", self.target_chain.clone()),
            ("extra_data", self.extra_data.clone()),
            ("mode", self.mode.clone()),
            ("should_mine", self.should_mine.to_string()),
            ("hash_rate", self.hash_rate.to_string()),
            ("minimum_peercount", self.minimum_peercount.to_string()),
            ("reference_url", self.reference_url.clone().unwrap_or_else(|| "none".to_string())),
            ("word_list", self.word_list.join(",")),
            ("skip_below", self.skip_below.to_string()),
            ("test_input", self.test_input.clone()),
            ("test_output", self.test_output.clone()),
            ("test_enode", self.test_enode.clone()),
            ("block_threshold", self.block_threshold.to_string()),
            ("import_key", self.import_key.clone()),
            ("minimum_geth_version", self.minimum_geth_version.clone()),
            ("minimum_parity_version", self.minimum_parity_version.clone()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_updates_typed_fields() {
        let mut settings = ProbeSettings::default();
        settings.set("block_threshold", "25").unwrap();
        settings.set("should_mine", "true").unwrap();
        settings.set("word_list", "a, b,c").unwrap();
        settings.set("reference_url", "https://mainnet.example").unwrap();
        assert_eq!(settings.block_threshold, 25);
        assert!(settings.should_mine);
        assert_eq!(settings.word_list, vec!["a", "b", "c"]);
        assert_eq!(settings.reference_url.as_deref(), Some("https://mainnet.example"));

        settings.set("reference_url", "none").unwrap();
        assert!(settings.reference_url.is_none());
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut settings = ProbeSettings::default();
        assert!(settings.set("block_threshold", "ten").is_err());
        assert!(settings.set("no_such_key", "1").is_err());
        assert_eq!(settings, ProbeSettings::default());
    }

    #[test]
    fn every_entry_is_settable() {
        let mut settings = ProbeSettings::default();
        for (key, value) in ProbeSettings::default().entries() {
            settings.set(key, &value).unwrap();
        }
        assert_eq!(settings, ProbeSettings::default());
    }
}
