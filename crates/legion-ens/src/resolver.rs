use ethabi::{ParamType, Token};
use ethereum_types::{Address, H256};
use legion_core::{utils, Error, Result, RpcProvider};
use tracing::debug;

/// Endereço do registry ENS (o mesmo em mainnet e nas testnets oficiais)
pub const ENS_REGISTRY: &str = "0x00000000000C2E074eC69A0dFb2997BA6C7d2e1e";

const ENS_REGISTRY_BYTES: [u8; 20] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x0c, 0x2e, 0x07, 0x4e, 0xc6, 0x9a, 0x0d, 0xfb, 0x29, 0x97, 0xba, 0x6c, 0x7d,
    0x2e, 0x1e,
];

/// Resolve nomes ENS com chamadas `eth_call` ao registry e ao resolver
pub struct EnsResolver<'a> {
    provider: &'a dyn RpcProvider,
    registry: Address,
}

fn node_call(function: &str, node: H256) -> Vec<u8> {
    let mut data = ethabi::short_signature(function, &[ParamType::FixedBytes(32)]).to_vec();
    data.extend(ethabi::encode(&[Token::FixedBytes(node.as_bytes().to_vec())]));
    data
}

fn decode_single(kind: ParamType, output: &[u8]) -> Result<Token> {
    if output.is_empty() {
        return Err(Error::NotFound("contrato não retornou dados".to_string()));
    }
    ethabi::decode(&[kind], output)
        .map_err(|e| Error::DecodeError(format!("retorno ABI inválido: {}", e)))?
        .into_iter()
        .next()
        .ok_or_else(|| Error::DecodeError("retorno ABI vazio".to_string()))
}

fn decode_address(output: &[u8]) -> Result<Address> {
    match decode_single(ParamType::Address, output)? {
        Token::Address(address) => Ok(address),
        other => Err(Error::DecodeError(format!("esperado address, recebido {:?}", other))),
    }
}

/// Nome do registro reverso de um endereço (`<hex>.addr.reverse`)
pub fn reverse_name(address: &Address) -> String {
    format!("{}.addr.reverse", hex::encode(address.as_bytes()))
}

impl<'a> EnsResolver<'a> {
    pub fn new(provider: &'a dyn RpcProvider, registry: Address) -> Self {
        Self { provider, registry }
    }

    /// Resolver usando o registry oficial
    pub fn mainnet(provider: &'a dyn RpcProvider) -> Self {
        Self::new(provider, Address::from(ENS_REGISTRY_BYTES))
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    /// Contrato resolver configurado para o nome
    pub async fn resolver_of(&self, name: &str) -> Result<Option<Address>> {
        let node = utils::namehash(name);
        let output = self.provider.call(self.registry, node_call("resolver", node)).await?;
        let resolver = decode_address(&output)?;
        debug!("Resolver de {}: {:?}", name, resolver);
        Ok((!resolver.is_zero()).then_some(resolver))
    }

    /// Endereço apontado pelo nome
    pub async fn address(&self, name: &str) -> Result<Address> {
        let resolver = self
            .resolver_of(name)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} não possui resolver", name)))?;
        let output = self
            .provider
            .call(resolver, node_call("addr", utils::namehash(name)))
            .await?;
        let address = decode_address(&output)?;
        if address.is_zero() {
            return Err(Error::NotFound(format!("{} não aponta para nenhum endereço", name)));
        }
        Ok(address)
    }

    /// Nome primário do endereço, confirmado pela resolução direta
    pub async fn name(&self, address: Address) -> Result<String> {
        let reverse = reverse_name(&address);
        let resolver = self
            .resolver_of(&reverse)
            .await?
            .ok_or_else(|| Error::NotFound(format!("{} não possui registro reverso", utils::format_address(&address))))?;
        let output = self
            .provider
            .call(resolver, node_call("name", utils::namehash(&reverse)))
            .await?;
        let name = match decode_single(ParamType::String, &output)? {
            Token::String(name) => name,
            other => return Err(Error::DecodeError(format!("esperado string, recebido {:?}", other))),
        };
        if name.is_empty() {
            return Err(Error::NotFound(format!(
                "{} não possui nome primário",
                utils::format_address(&address)
            )));
        }

        let forward = self.address(&name).await?;
        if forward != address {
            return Err(Error::ValidationError(format!(
                "{} resolve para {}, não para {}",
                name,
                utils::format_address(&forward),
                utils::format_address(&address)
            )));
        }
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_constant_matches_bytes() {
        assert_eq!(utils::hex_to_address(ENS_REGISTRY), Some(Address::from(ENS_REGISTRY_BYTES)));
    }

    #[test]
    fn call_data_has_selector_and_node() {
        let node = utils::namehash("eth");
        let data = node_call("addr", node);
        // addr(bytes32)
        assert_eq!(&data[..4], &[0x3b, 0x3b, 0x57, 0xde]);
        assert_eq!(&data[4..], node.as_bytes());
    }

    #[test]
    fn reverse_name_is_lowercase_hex() {
        let address = Address::repeat_byte(0xab);
        assert_eq!(reverse_name(&address), format!("{}.addr.reverse", "ab".repeat(20)));
    }
}
