use chrono::{DateTime, Utc};
use legion_core::{Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

/// Subgraph público do ENS
pub const DEFAULT_SUBGRAPH_URL: &str = "https://api.thegraph.com/subgraphs/name/ensdomains/ens";

const DOMAIN_FIELDS: &str = "id name labelhash createdAt isMigrated \
    owner { id } resolver { address } registration { registrationDate expiryDate }";

/// Registro ENS retornado pelo subgraph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnsRecord {
    pub name: Option<String>,
    /// namehash do domínio
    pub hash: String,
    pub labelhash: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub registered_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub migrated: bool,
    pub owner: Option<String>,
    pub resolver: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDomain {
    id: String,
    name: Option<String>,
    labelhash: Option<String>,
    created_at: Option<String>,
    #[serde(default)]
    is_migrated: bool,
    owner: Option<RawAccount>,
    resolver: Option<RawResolver>,
    registration: Option<RawRegistration>,
}

#[derive(Deserialize)]
struct RawAccount {
    id: String,
}

#[derive(Deserialize)]
struct RawResolver {
    address: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRegistration {
    registration_date: Option<String>,
    expiry_date: Option<String>,
}

#[derive(Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

/// Converte um timestamp em segundos (string) para data
fn timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let secs = value?.parse::<i64>().ok()?;
    DateTime::from_timestamp(secs, 0)
}

impl From<RawDomain> for EnsRecord {
    fn from(raw: RawDomain) -> Self {
        let (registered_at, expires_at) = match &raw.registration {
            Some(reg) => (
                timestamp(reg.registration_date.as_deref()),
                timestamp(reg.expiry_date.as_deref()),
            ),
            None => (None, None),
        };
        Self {
            name: raw.name,
            hash: raw.id,
            labelhash: raw.labelhash,
            created_at: timestamp(raw.created_at.as_deref()),
            registered_at,
            expires_at,
            migrated: raw.is_migrated,
            owner: raw.owner.map(|o| o.id),
            resolver: raw.resolver.and_then(|r| r.address),
        }
    }
}

fn parse_domains(value: Option<&Value>) -> Result<Vec<EnsRecord>> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let raw: Vec<RawDomain> = serde_json::from_value(value.clone())
        .map_err(|e| Error::DecodeError(format!("resposta do subgraph inválida: {}", e)))?;
    Ok(raw.into_iter().map(EnsRecord::from).collect())
}

/// Cliente GraphQL do subgraph do ENS
pub struct SubgraphClient {
    client: Client,
    url: String,
}

impl SubgraphClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_timeout(url, Duration::from_secs(30))
    }

    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_default();
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Executa uma consulta e devolve o campo `data`
    async fn query(&self, query: &str, variables: Value) -> Result<Value> {
        debug!("Consultando subgraph {}", self.url);
        let resp = self
            .client
            .post(&self.url)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| Error::RemoteCallFailure(format!("erro ao consultar subgraph: {}", e)))?;

        let status = resp.status();
        if !status.is_success() {
            warn!("Subgraph respondeu HTTP {}", status);
            return Err(Error::RemoteCallFailure(format!("subgraph respondeu HTTP {}", status)));
        }

        let body: GraphQlResponse = resp
            .json()
            .await
            .map_err(|e| Error::DecodeError(format!("erro ao decodificar resposta do subgraph: {}", e)))?;
        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(Error::RemoteCallFailure(messages.join("; ")));
        }
        body.data
            .ok_or_else(|| Error::DecodeError("resposta do subgraph sem dados".to_string()))
    }

    /// Detalhes de um domínio
    pub async fn info(&self, name: &str) -> Result<Vec<EnsRecord>> {
        let query = format!(
            "query Domain($name: String!) {{ domains(where: {{ name: $name }}) {{ {} }} }}",
            DOMAIN_FIELDS
        );
        let data = self.query(&query, json!({ "name": name.to_lowercase() })).await?;
        parse_domains(data.get("domains"))
    }

    /// Domínios pertencentes a um endereço
    pub async fn names_owned_by(&self, owner: &str) -> Result<Vec<EnsRecord>> {
        let query = format!(
            "query Owned($owner: String!) {{ account(id: $owner) {{ \
             domains(first: 1000, orderBy: createdAt) {{ {} }} }} }}",
            DOMAIN_FIELDS
        );
        let data = self.query(&query, json!({ "owner": owner.to_lowercase() })).await?;
        parse_domains(data.get("account").and_then(|a| a.get("domains")))
    }

    /// Subdomínios de um domínio
    pub async fn subdomains(&self, name: &str) -> Result<Vec<EnsRecord>> {
        let query = format!(
            "query Subdomains($name: String!) {{ domains(where: {{ name: $name }}) {{ \
             subdomains(first: 1000, orderBy: createdAt) {{ {} }} }} }}",
            DOMAIN_FIELDS
        );
        let data = self.query(&query, json!({ "name": name.to_lowercase() })).await?;
        let subdomains = data
            .get("domains")
            .and_then(Value::as_array)
            .and_then(|domains| domains.first())
            .and_then(|domain| domain.get("subdomains"));
        parse_domains(subdomains)
    }
}
