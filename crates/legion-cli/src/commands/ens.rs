use chrono::{DateTime, Utc};
use legion_core::{utils, Result};
use legion_ens::{EnsRecord, EnsResolver, SubgraphClient};

use crate::commands::required;
use crate::output;
use crate::session::Session;

fn date(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn short_hash(hash: &str) -> String {
    let chars: Vec<char> = hash.chars().collect();
    if chars.len() > 18 {
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        hash.to_string()
    }
}

/// Linhas da tabela de registros: nome, hash, criação, expiração, migrado
pub fn table_rows(records: &[EnsRecord]) -> Vec<[String; 5]> {
    records
        .iter()
        .map(|r| {
            [
                r.name.clone().unwrap_or_else(|| "[desconhecido]".to_string()),
                short_hash(&r.hash),
                date(r.created_at),
                date(r.expires_at),
                if r.migrated { "sim" } else { "não" }.to_string(),
            ]
        })
        .collect()
}

fn print_table(records: &[EnsRecord]) {
    if records.is_empty() {
        output::warning("Nenhum registro encontrado");
        return;
    }
    let header = ["Nome", "Hash", "Criado", "Expira", "Migrado"];
    let rows = table_rows(records);
    let width = rows
        .iter()
        .map(|r| r[0].chars().count())
        .chain(std::iter::once(header[0].len()))
        .max()
        .unwrap_or(0);

    println!("{:<width$}  {:<22}  {:<10}  {:<10}  {}", header[0], header[1], header[2], header[3], header[4], width = width);
    for row in rows {
        println!("{:<width$}  {:<22}  {:<10}  {:<10}  {}", row[0], row[1], row[2], row[3], row[4], width = width);
    }
}

fn subgraph(session: &Session) -> SubgraphClient {
    SubgraphClient::with_timeout(session.config.ens.subgraph_url.clone(), session.config.timeout() * 3)
}

pub async fn to_name(session: &mut Session, address: Option<String>) -> Result<()> {
    let address = utils::require_address(&required(address, "address")?)?;
    let registry = utils::require_address(&session.config.ens.registry)?;
    let provider = session.provider().await?;

    let name = EnsResolver::new(provider.as_ref(), registry).name(address).await?;
    output::field(&format!("Nome de {}", utils::format_address(&address)), name);
    Ok(())
}

pub async fn to_address(session: &mut Session, name: Option<String>) -> Result<()> {
    let name = required(name, "name")?;
    let registry = utils::require_address(&session.config.ens.registry)?;
    let provider = session.provider().await?;

    let address = EnsResolver::new(provider.as_ref(), registry).address(&name).await?;
    output::field(&format!("Endereço de {}", name), utils::format_address(&address));
    Ok(())
}

pub async fn info(session: &mut Session, name: Option<String>) -> Result<()> {
    let name = required(name, "name")?;
    let records = subgraph(session).info(&name).await?;
    print_table(&records);
    for record in &records {
        if let Some(owner) = &record.owner {
            output::field("Dono", owner);
        }
        if let Some(resolver) = &record.resolver {
            output::field("Resolver", resolver);
        }
        if let Some(labelhash) = &record.labelhash {
            output::field("Labelhash", labelhash);
        }
        output::field("Registrado", date(record.registered_at));
    }
    Ok(())
}

pub async fn list_names(session: &mut Session, owner: Option<String>) -> Result<()> {
    let owner = utils::require_address(&required(owner, "owner")?)?;
    let records = subgraph(session)
        .names_owned_by(&utils::format_address(&owner))
        .await?;
    print_table(&records);
    Ok(())
}

pub async fn list_subdomains(session: &mut Session, name: Option<String>) -> Result<()> {
    let name = required(name, "name")?;
    let records = subgraph(session).subdomains(&name).await?;
    print_table(&records);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_format_dates_and_flags() {
        let record = EnsRecord {
            name: Some("legion.eth".to_string()),
            hash: "0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae".to_string(),
            labelhash: None,
            created_at: DateTime::from_timestamp(1_580_000_000, 0),
            registered_at: None,
            expires_at: None,
            migrated: false,
            owner: None,
            resolver: None,
        };
        let rows = table_rows(&[record]);
        assert_eq!(rows[0][0], "legion.eth");
        assert_eq!(rows[0][1], "0x93cdeb70...3fc4ae");
        assert_eq!(rows[0][2], "2020-01-26");
        assert_eq!(rows[0][3], "-");
        assert_eq!(rows[0][4], "não");
    }

    #[test]
    fn short_hash_cuts_on_characters() {
        assert_eq!(short_hash("0xabc"), "0xabc");
        assert_eq!(short_hash("ação-número-çççççççç-fim"), "ação-númer...çç-fim");
    }
}
