/*!
 * Legion Traits
 *
 * Traits comuns usados em toda a workspace Legion
 */

use async_trait::async_trait;
use ethereum_types::{Address, H256, U256};
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::types::{BlockTag, TransactionHash};
use crate::utils::{decode_hex, format_address, parse_address, parse_h256, parse_quantity};

/// Trait para provedores RPC
///
/// Implementações precisam apenas de [`RpcProvider::request`]; os demais
/// métodos são atalhos tipados sobre chamadas `eth_*`, `net_*` e `web3_*`.
#[async_trait]
pub trait RpcProvider: Send + Sync {
    /// Executa uma chamada JSON-RPC arbitrária
    async fn request(&self, method: &str, params: Vec<Value>) -> Result<Value>;

    /// Obtém a versão do cliente (`web3_clientVersion`)
    async fn client_version(&self) -> Result<String> {
        let value = self.request("web3_clientVersion", vec![]).await?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::DecodeError(format!("versão do cliente inválida: {}", value)))
    }

    /// Obtém o número do bloco atual
    async fn block_number(&self) -> Result<u64> {
        let value = self.request("eth_blockNumber", vec![]).await?;
        Ok(parse_quantity(&value)?.low_u64())
    }

    /// Obtém o chain id
    async fn chain_id(&self) -> Result<u64> {
        let value = self.request("eth_chainId", vec![]).await?;
        Ok(parse_quantity(&value)?.low_u64())
    }

    /// Lista as contas gerenciadas pelo node
    async fn accounts(&self) -> Result<Vec<Address>> {
        let value = self.request("eth_accounts", vec![]).await?;
        match value {
            Value::Array(items) => items.iter().map(parse_address).collect(),
            other => Err(Error::DecodeError(format!("lista de contas inválida: {}", other))),
        }
    }

    /// Obtém a conta coinbase
    async fn coinbase(&self) -> Result<Address> {
        let value = self.request("eth_coinbase", vec![]).await?;
        parse_address(&value)
    }

    /// Obtém o saldo de uma conta em wei
    async fn balance(&self, address: Address, block: BlockTag) -> Result<U256> {
        let value = self
            .request("eth_getBalance", vec![json!(format_address(&address)), block.to_param()])
            .await?;
        parse_quantity(&value)
    }

    /// Lê um slot de storage de um contrato
    async fn storage_at(&self, address: Address, slot: U256, block: BlockTag) -> Result<H256> {
        let value = self
            .request(
                "eth_getStorageAt",
                vec![json!(format_address(&address)), json!(format!("0x{:x}", slot)), block.to_param()],
            )
            .await?;
        parse_h256(&value)
    }

    /// Obtém o código de um contrato
    async fn code(&self, address: Address, block: BlockTag) -> Result<Vec<u8>> {
        let value = self
            .request("eth_getCode", vec![json!(format_address(&address)), block.to_param()])
            .await?;
        decode_hex(value.as_str().unwrap_or_default())
    }

    /// Obtém um bloco pelo número (sem transações completas)
    async fn block(&self, block: BlockTag) -> Result<Value> {
        let value = self
            .request("eth_getBlockByNumber", vec![block.to_param(), json!(false)])
            .await?;
        if value.is_null() {
            return Err(Error::NotFound(format!("bloco {}", block)));
        }
        Ok(value)
    }

    /// Obtém uma transação pelo hash
    async fn transaction(&self, hash: TransactionHash) -> Result<Value> {
        let value = self
            .request("eth_getTransactionByHash", vec![json!(format!("0x{:x}", hash))])
            .await?;
        if value.is_null() {
            return Err(Error::NotFound(format!("transação 0x{:x}", hash)));
        }
        Ok(value)
    }

    /// Chama um método de contrato (`eth_call` no bloco mais recente)
    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Vec<u8>> {
        let request = json!({
            "to": format_address(&to),
            "data": format!("0x{}", hex::encode(&data)),
        });
        let value = self.request("eth_call", vec![request, json!("latest")]).await?;
        decode_hex(value.as_str().unwrap_or_default())
    }
}
