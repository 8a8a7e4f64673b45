/*!
 * Legion Utils
 *
 * Utilitários comuns usados em toda a workspace Legion
 */

use ethereum_types::{Address, H256, U256};
use serde_json::Value;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

use crate::error::{Error, Result};

/// Converte uma string hexadecimal para Address
pub fn hex_to_address(hex: &str) -> Option<Address> {
    let hex_str = hex.trim().trim_start_matches("0x");
    if hex_str.len() != 40 {
        return None;
    }
    Address::from_str(hex_str).ok()
}

/// Converte uma string hexadecimal para H256
pub fn hex_to_h256(hex: &str) -> Option<H256> {
    let hex_str = hex.trim().trim_start_matches("0x");
    if hex_str.len() != 64 {
        return None;
    }
    H256::from_str(hex_str).ok()
}

/// Converte uma string de endereço, com erro de validação
pub fn require_address(value: &str) -> Result<Address> {
    hex_to_address(value).ok_or_else(|| Error::ValidationError(format!("endereço inválido: {}", value)))
}

/// Formata um Address para exibição
pub fn format_address(address: &Address) -> String {
    format!("0x{:x}", address)
}

/// Formata um H256 para exibição
pub fn format_h256(hash: &H256) -> String {
    format!("0x{:x}", hash)
}

/// Decodifica uma string hexadecimal (com ou sem `0x`)
pub fn decode_hex(value: &str) -> Result<Vec<u8>> {
    let hex_str = value.trim().trim_start_matches("0x");
    if hex_str.len() % 2 == 1 {
        return hex::decode(format!("0{}", hex_str))
            .map_err(|e| Error::DecodeError(format!("hex inválido '{}': {}", value, e)));
    }
    hex::decode(hex_str).map_err(|e| Error::DecodeError(format!("hex inválido '{}': {}", value, e)))
}

/// Interpreta uma quantidade JSON-RPC (hex `0x..` ou número)
pub fn parse_quantity(value: &Value) -> Result<U256> {
    match value {
        Value::String(s) => {
            let hex_str = s.trim_start_matches("0x");
            if hex_str.is_empty() {
                return Ok(U256::zero());
            }
            U256::from_str_radix(hex_str, 16)
                .map_err(|_| Error::DecodeError(format!("quantidade inválida: {}", s)))
        }
        Value::Number(n) => n
            .as_u64()
            .map(U256::from)
            .ok_or_else(|| Error::DecodeError(format!("quantidade inválida: {}", n))),
        other => Err(Error::DecodeError(format!("quantidade inválida: {}", other))),
    }
}

/// Interpreta um endereço retornado pelo node
pub fn parse_address(value: &Value) -> Result<Address> {
    value
        .as_str()
        .and_then(hex_to_address)
        .ok_or_else(|| Error::DecodeError(format!("endereço inválido: {}", value)))
}

/// Interpreta uma palavra de 32 bytes retornada pelo node
pub fn parse_h256(value: &Value) -> Result<H256> {
    let bytes = decode_hex(value.as_str().unwrap_or_default())?;
    if bytes.len() > 32 {
        return Err(Error::DecodeError(format!("palavra maior que 32 bytes: {}", value)));
    }
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(H256::from(word))
}

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}

/// Calcula o namehash ENS (EIP-137) de um nome
pub fn namehash(name: &str) -> H256 {
    let mut node = [0u8; 32];
    if name.is_empty() {
        return H256::from(node);
    }
    for label in name.to_lowercase().rsplit('.') {
        let label_hash = keccak256(label.as_bytes());
        let mut buffer = [0u8; 64];
        buffer[..32].copy_from_slice(&node);
        buffer[32..].copy_from_slice(&label_hash);
        node = keccak256(&buffer);
    }
    H256::from(node)
}

/// Formata um valor com decimais para exibição
pub fn format_token_amount(amount: &U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let divisor = U256::from(10).pow(U256::from(decimals));
    let integer_part = amount / divisor;
    let fractional_part = amount % divisor;

    // Parte fracionária com zeros à esquerda
    let fractional_str = fractional_part.to_string();
    let mut padded_fractional = "0".repeat(decimals as usize - fractional_str.len());
    padded_fractional.push_str(&fractional_str);

    while padded_fractional.ends_with('0') {
        padded_fractional.pop();
    }

    if padded_fractional.is_empty() {
        integer_part.to_string()
    } else {
        format!("{}.{}", integer_part, padded_fractional)
    }
}

/// Formata um valor em wei como ether
pub fn format_ether(wei: &U256) -> String {
    format_token_amount(wei, 18)
}

/// Interpretação legível de um slot de storage: texto ou inteiro
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageValue {
    Text(String),
    Integer(U256),
}

impl std::fmt::Display for StorageValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageValue::Text(text) => write!(f, "{:?}", text),
            StorageValue::Integer(value) => write!(f, "{}", value),
        }
    }
}

/// Decodifica um slot como texto quando imprimível, senão como inteiro
///
/// Texto precisa estar alinhado à esquerda; o último byte pode carregar o
/// comprimento `len * 2` das strings curtas do Solidity.
pub fn decode_storage_word(word: &H256) -> StorageValue {
    let bytes = word.as_bytes();
    let text_len = bytes.iter().position(|b| *b == 0).unwrap_or(bytes.len());
    let tail = &bytes[text_len..];
    let tail_ok = match tail.split_last() {
        None => true,
        Some((last, middle)) => {
            middle.iter().all(|b| *b == 0) && (*last == 0 || *last as usize == text_len * 2)
        }
    };

    if text_len > 0 && tail_ok {
        if let Ok(text) = std::str::from_utf8(&bytes[..text_len]) {
            if text.chars().all(|c| !c.is_control()) {
                return StorageValue::Text(text.to_string());
            }
        }
    }
    StorageValue::Integer(U256::from_big_endian(bytes))
}

/// Calcula o hash de uma mensagem no formato Ethereum Signed Message
pub fn eth_message_hash(message: &[u8]) -> H256 {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());

    let mut buffer = Vec::with_capacity(prefix.len() + message.len());
    buffer.extend_from_slice(prefix.as_bytes());
    buffer.extend_from_slice(message);

    H256::from_slice(&keccak256(&buffer))
}

/// Recupera o endereço que assinou uma mensagem
///
/// Aceita `v` nas formas 0/1 e 27/28.
pub fn recover_signer(message_hash: &H256, signature: &[u8]) -> Option<Address> {
    if signature.len() != 65 {
        return None;
    }

    let v = signature[64];
    let recovery = if v >= 27 { v - 27 } else { v };

    let secp = secp256k1::Secp256k1::new();
    let recovery_id = secp256k1::ecdsa::RecoveryId::from_i32(recovery as i32).ok()?;
    let message = secp256k1::Message::from_slice(message_hash.as_bytes()).ok()?;
    let recoverable_sig =
        secp256k1::ecdsa::RecoverableSignature::from_compact(&signature[..64], recovery_id).ok()?;

    let public_key = secp.recover_ecdsa(&message, &recoverable_sig).ok()?;
    let public_key_serialized = public_key.serialize_uncompressed();

    // Últimos 20 bytes do Keccak-256 da chave pública sem o prefixo 0x04
    let hash = keccak256(&public_key_serialized[1..]);
    Some(Address::from_slice(&hash[12..32]))
}
