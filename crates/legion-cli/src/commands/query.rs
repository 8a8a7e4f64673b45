use ethereum_types::{Address, U256};
use legion_core::{utils, BlockTag, Error, Result, RpcProvider};
use legion_core::utils::StorageValue;
use serde_json::Value;

use crate::commands::required;
use crate::output;
use crate::session::Session;

const DEFAULT_STORAGE_SLOTS: u64 = 10;
const MAX_STORAGE_SLOTS: u64 = 4096;

/// Bloco informado ou, na ausência, a altura atual do node
pub async fn block_or_head(provider: &dyn RpcProvider, block: Option<&str>) -> Result<BlockTag> {
    match block {
        Some(block) => block.parse(),
        None => Ok(BlockTag::Number(provider.block_number().await?)),
    }
}

pub async fn fetch_balance(
    provider: &dyn RpcProvider,
    address: Address,
    block: Option<&str>,
) -> Result<(BlockTag, U256)> {
    let block = block_or_head(provider, block).await?;
    let balance = provider.balance(address, block).await?;
    Ok((block, balance))
}

/// Quantidade de slots pedida, limitada a `MAX_STORAGE_SLOTS`
pub fn slot_count(count: Option<u64>) -> Result<u64> {
    match count.unwrap_or(DEFAULT_STORAGE_SLOTS) {
        n if n > MAX_STORAGE_SLOTS => Err(Error::ValidationError(format!(
            "no máximo {} slots por consulta, pedido {}",
            MAX_STORAGE_SLOTS, n
        ))),
        n => Ok(n),
    }
}

/// Lê os primeiros `count` slots; falhas individuais não interrompem a leitura
pub async fn read_storage(
    provider: &dyn RpcProvider,
    address: Address,
    count: Option<u64>,
    block: BlockTag,
) -> Result<Vec<(u64, Result<StorageValue>)>> {
    let count = slot_count(count)?;
    let mut slots = Vec::new();
    for slot in 0..count {
        let value = provider
            .storage_at(address, U256::from(slot), block)
            .await
            .map(|word| utils::decode_storage_word(&word));
        slots.push((slot, value));
    }
    Ok(slots)
}

/// Cada parâmetro é interpretado como JSON; se não for, vira string
pub fn parse_params(params: &[String]) -> Vec<Value> {
    params
        .iter()
        .map(|p| serde_json::from_str(p).unwrap_or_else(|_| Value::String(p.clone())))
        .collect()
}

/// Endereço que assinou `message` no formato personal_sign
pub fn ecrecover_message(message: &str, signature: &str) -> Result<Address> {
    let bytes = utils::decode_hex(signature)?;
    if bytes.len() != 65 {
        return Err(Error::ValidationError(format!(
            "assinatura deve ter 65 bytes, recebido {}",
            bytes.len()
        )));
    }
    utils::recover_signer(&utils::eth_message_hash(message.as_bytes()), &bytes)
        .ok_or_else(|| Error::ValidationError("assinatura inválida".to_string()))
}

pub async fn balance(session: &mut Session, address: Option<String>, block: Option<String>) -> Result<()> {
    let address = utils::require_address(&required(address, "address")?)?;
    let provider = session.provider().await?;
    let (block, balance) = fetch_balance(provider.as_ref(), address, block.as_deref()).await?;

    output::field("Endereço", utils::format_address(&address));
    output::field("Bloco", block);
    output::field("Saldo", format!("{} ETH ({} wei)", utils::format_ether(&balance), balance));
    Ok(())
}

pub async fn storage(
    session: &mut Session,
    address: Option<String>,
    count: Option<u64>,
    block: Option<String>,
) -> Result<()> {
    let address = utils::require_address(&required(address, "address")?)?;
    slot_count(count)?;
    let provider = session.provider().await?;
    let block = block_or_head(provider.as_ref(), block.as_deref()).await?;

    output::title(&format!("Storage de {} no bloco {}", utils::format_address(&address), block));
    for (slot, value) in read_storage(provider.as_ref(), address, count, block).await? {
        match value {
            Ok(value) => output::field(&format!("slot {}", slot), value),
            Err(e) => output::warning(format!("slot {}: {}", slot, e)),
        }
    }
    Ok(())
}

pub async fn code(session: &mut Session, address: Option<String>, block: Option<String>) -> Result<()> {
    let address = utils::require_address(&required(address, "address")?)?;
    let provider = session.provider().await?;
    let block = block_or_head(provider.as_ref(), block.as_deref()).await?;
    let code = provider.code(address, block).await?;

    if code.is_empty() {
        output::warning(format!("{} não possui código (EOA)", utils::format_address(&address)));
    } else {
        output::field("Tamanho", format!("{} bytes", code.len()));
        println!("0x{}", hex::encode(&code));
    }
    Ok(())
}

pub async fn block(session: &mut Session, block: Option<String>) -> Result<()> {
    let provider = session.provider().await?;
    let block = block_or_head(provider.as_ref(), block.as_deref()).await?;
    let data = provider.block(block).await?;
    println!("{}", output::pretty_json(&data));
    Ok(())
}

pub async fn transaction(session: &mut Session, hash: Option<String>) -> Result<()> {
    let raw = required(hash, "hash")?;
    let hash = utils::hex_to_h256(&raw)
        .ok_or_else(|| Error::ValidationError(format!("hash inválido: {}", raw)))?;
    let provider = session.provider().await?;
    let data = provider.transaction(hash).await?;
    println!("{}", output::pretty_json(&data));
    Ok(())
}

pub async fn command(session: &mut Session, method: Option<String>, params: Vec<String>) -> Result<()> {
    let method = required(method, "method")?;
    let provider = session.provider().await?;
    let result = provider.request(&method, parse_params(&params)).await?;
    println!("{}", output::pretty_json(&result));
    Ok(())
}

pub fn ecrecover(message: Option<String>, signature: Option<String>) -> Result<()> {
    let message = required(message, "message")?;
    let signature = required(signature, "signature")?;
    let signer = ecrecover_message(&message, &signature)?;
    output::field("Signatário", utils::format_address(&signer));
    Ok(())
}
