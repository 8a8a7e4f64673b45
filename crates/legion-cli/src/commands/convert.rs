use ethers::types::{Address, U256};
use ethers::utils::{format_units, keccak256, parse_units, to_checksum};
use legion_core::{utils, Error, Result};

use crate::cli::ConvertCommand;
use crate::commands::required;

/// Entrada com `0x` é tratada como bytes hexadecimais, senão como texto
fn input_bytes(value: &str) -> Result<Vec<u8>> {
    if value.starts_with("0x") {
        utils::decode_hex(value)
    } else {
        Ok(value.as_bytes().to_vec())
    }
}

pub fn to_hex(value: &str) -> Result<String> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        let number = U256::from_dec_str(value)
            .map_err(|e| Error::ValidationError(format!("número inválido {}: {}", value, e)))?;
        return Ok(format!("{:#x}", number));
    }
    Ok(format!("0x{}", hex::encode(value.as_bytes())))
}

pub fn to_text(value: &str) -> Result<String> {
    let bytes = utils::decode_hex(value)?;
    String::from_utf8(bytes).map_err(|e| Error::DecodeError(format!("bytes não são UTF-8: {}", e)))
}

pub fn to_bytes(value: &str) -> Result<String> {
    Ok(format!("{:?}", input_bytes(value)?))
}

pub fn to_wei(amount: &str, unit: &str) -> Result<String> {
    let wei: U256 = parse_units(amount, unit)
        .map_err(|e| Error::ValidationError(format!("valor inválido {} {}: {}", amount, unit, e)))?
        .into();
    Ok(wei.to_string())
}

pub fn from_wei(amount: &str, unit: &str) -> Result<String> {
    let wei = U256::from_dec_str(amount)
        .map_err(|e| Error::ValidationError(format!("valor em wei inválido {}: {}", amount, e)))?;
    format_units(wei, unit).map_err(|e| Error::ValidationError(format!("unidade inválida {}: {}", unit, e)))
}

pub fn to_checksum_address(address: &str) -> Result<String> {
    let hex = address.trim().trim_start_matches("0x");
    if hex.len() != 40 {
        return Err(Error::ValidationError(format!("endereço inválido: {}", address)));
    }
    let address: Address = hex
        .parse()
        .map_err(|_| Error::ValidationError(format!("endereço inválido: {}", address)))?;
    Ok(to_checksum(&address, None))
}

pub fn keccak(value: &str) -> Result<String> {
    Ok(format!("0x{}", hex::encode(keccak256(input_bytes(value)?))))
}

/// Executa a conversão e devolve o texto a ser exibido
pub fn convert(command: ConvertCommand) -> Result<String> {
    match command {
        ConvertCommand::ToHex { value } => to_hex(&required(value, "value")?),
        ConvertCommand::ToText { value } => to_text(&required(value, "value")?),
        ConvertCommand::ToBytes { value } => to_bytes(&required(value, "value")?),
        ConvertCommand::ToWei { amount, unit } => to_wei(&required(amount, "amount")?, &unit),
        ConvertCommand::FromWei { amount, unit } => from_wei(&required(amount, "amount")?, &unit),
        ConvertCommand::ToChecksumAddress { address } => to_checksum_address(&required(address, "address")?),
        ConvertCommand::Keccak { value } => keccak(&required(value, "value")?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_from_number_and_text() {
        assert_eq!(to_hex("255").unwrap(), "0xff");
        assert_eq!(to_hex("legion").unwrap(), "0x6c6567696f6e");
        assert_eq!(to_text("0x6c6567696f6e").unwrap(), "legion");
        assert!(to_text("0xff").is_err());
    }

    #[test]
    fn bytes_listing() {
        assert_eq!(to_bytes("0x0102").unwrap(), "[1, 2]");
        assert_eq!(to_bytes("hi").unwrap(), "[104, 105]");
    }

    #[test]
    fn wei_units() {
        assert_eq!(to_wei("1.5", "ether").unwrap(), "1500000000000000000");
        assert_eq!(to_wei("2", "gwei").unwrap(), "2000000000");
        assert_eq!(from_wei("1500000000000000000", "ether").unwrap(), "1.500000000000000000");
        assert!(to_wei("abc", "ether").is_err());
        assert!(from_wei("-1", "ether").is_err());
    }

    #[test]
    fn checksum_follows_eip55() {
        assert_eq!(
            to_checksum_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap(),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
        assert!(to_checksum_address("0x1234").is_err());
    }

    #[test]
    fn keccak_of_text_and_hex() {
        assert_eq!(
            keccak("").unwrap(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_eq!(keccak("0x").unwrap(), keccak("").unwrap());
    }

    #[test]
    fn missing_value_is_reported() {
        let err = convert(ConvertCommand::ToHex { value: None }).unwrap_err();
        assert_eq!(err, Error::MissingArgument("value".to_string()));
    }
}
