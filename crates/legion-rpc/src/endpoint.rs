//! Resolução do endereço informado pelo operador para um [`Endpoint`].

use legion_core::{Endpoint, Error, Result, Scheme};
use std::path::Path;
use url::Url;

/// Prefixos aceitos sem alteração
const KNOWN_PREFIXES: [&str; 4] = ["http://", "https://", "ws://", "wss://"];

/// Normaliza uma string livre para um endpoint de node
///
/// Um caminho existente no sistema de arquivos é tratado como socket IPC.
/// Sem esquema, `https://` é prefixado.
pub fn resolve_endpoint(input: &str) -> Result<Endpoint> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::MissingArgument("host".into()));
    }

    if Path::new(input).exists() {
        return Ok(Endpoint {
            uri: input.to_string(),
            scheme: Scheme::Ipc,
            host: input.to_string(),
            port: 0,
        });
    }

    let lowered = input.to_lowercase();
    let uri = if KNOWN_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        input.to_string()
    } else if input.contains("://") {
        return Err(Error::InvalidEndpoint(format!(
            "{} (use http://, https://, ws://, wss:// ou o caminho de um socket IPC)",
            input
        )));
    } else {
        format!("https://{}", input)
    };

    let url = Url::parse(&uri).map_err(|e| Error::InvalidEndpoint(format!("{}: {}", uri, e)))?;
    let scheme: Scheme = url.scheme().parse()?;
    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| Error::InvalidEndpoint(format!("{}: host ausente", uri)))?
        .to_string();
    let port = url.port_or_known_default().unwrap_or(match scheme {
        Scheme::Http | Scheme::Ws => 80,
        _ => 443,
    });

    Ok(Endpoint { uri, scheme, host, port })
}
