use ethereum_types::Address;
use legion_core::{utils, BlockTag, ClientKind, Error, Result, RpcProvider};
use serde_json::{json, Value};
use tracing::debug;

use crate::output;
use crate::session::Session;

const GETH_NAMESPACES: [&str; 6] = [
    "admin_nodeInfo",
    "admin_peers",
    "admin_datadir",
    "txpool_status",
    "txpool_inspect",
    "shh_version",
];

const PARITY_NAMESPACES: [&str; 6] = [
    "parity_nodeName",
    "parity_enode",
    "parity_netPeers",
    "parity_localTransactions",
    "parity_pendingTransactionsStats",
    "parity_devLogs",
];

/// Métodos administrativos de leitura consultados para o cliente
pub fn admin_methods(kind: ClientKind) -> Vec<&'static str> {
    match kind {
        ClientKind::Geth => GETH_NAMESPACES.to_vec(),
        ClientKind::Parity => PARITY_NAMESPACES.to_vec(),
        ClientKind::Unknown => GETH_NAMESPACES.iter().chain(&PARITY_NAMESPACES).copied().collect(),
    }
}

/// Consulta cada método e devolve a resposta ou o erro
pub async fn probe_admin(provider: &dyn RpcProvider, kind: ClientKind) -> Vec<(&'static str, Result<Value>)> {
    let mut results = Vec::new();
    for method in admin_methods(kind) {
        let result = provider.request(method, vec![]).await;
        debug!("{} -> {:?}", method, result.as_ref().map(|_| "ok"));
        results.push((method, result));
    }
    results
}

fn summarize(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > 120 {
        format!("{}...", text.chars().take(117).collect::<String>())
    } else {
        text
    }
}

pub async fn accounts(session: &mut Session, all: bool, intrusive: bool) -> Result<()> {
    let provider = session.provider().await?;

    output::title("Contas");
    let coinbase = provider.coinbase().await.map(|a| utils::format_address(&a));
    output::optional_field("Coinbase", &coinbase);

    match provider.accounts().await {
        Ok(accounts) if accounts.is_empty() => output::field("Contas", "nenhuma"),
        Ok(accounts) => {
            output::alert(format!("{} contas expostas via eth_accounts", accounts.len()));
            for account in accounts {
                if all {
                    let balance = provider
                        .balance(account, BlockTag::Latest)
                        .await
                        .map(|b| format!("{} ETH", utils::format_ether(&b)));
                    output::optional_field(&utils::format_address(&account), &balance);
                } else {
                    println!("  {}", utils::format_address(&account));
                }
            }
        }
        Err(e) => output::optional_field("Contas", &Err(e)),
    }

    if intrusive {
        let password = session.config.investigate.password.clone();
        match provider.request("personal_newAccount", vec![json!(password)]).await {
            Ok(created) => output::alert(format!(
                "personal_newAccount habilitado: conta {} criada",
                created.as_str().unwrap_or("?")
            )),
            Err(Error::RpcRejected { message, .. }) => {
                output::success(format!("personal_newAccount recusado ({})", message))
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

pub async fn admin(session: &mut Session, intrusive: bool) -> Result<()> {
    let provider = session.provider().await?;
    let kind = session.client_kind();

    output::title(&format!("Namespaces administrativos ({})", kind));
    for (method, result) in probe_admin(provider.as_ref(), kind).await {
        match result {
            Ok(value) => output::alert(format!("{:<32} exposto: {}", method, summarize(&value))),
            Err(Error::RpcRejected { .. }) => println!("{:<32} indisponível", method),
            Err(e) => output::warning(format!("{:<32} falhou: {}", method, e)),
        }
    }

    if intrusive {
        let enode = session.probe_settings.test_enode.clone();
        if enode.trim().is_empty() {
            return Err(Error::ValidationError(
                "test_enode não configurado (scan set test_enode <enode>)".to_string(),
            ));
        }
        let method = match kind {
            ClientKind::Parity => "parity_addReservedPeer",
            _ => "admin_addPeer",
        };
        match provider.request(method, vec![json!(enode)]).await {
            Ok(Value::Bool(true)) => output::alert(format!("{} aceitou o peer {}", method, enode)),
            Ok(other) => output::warning(format!("{} respondeu {}", method, other)),
            Err(Error::RpcRejected { message, .. }) => output::success(format!("{} recusado ({})", method, message)),
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Resultado de `eth_sign` conferido por recuperação do signatário
#[derive(Debug, Clone, PartialEq)]
pub struct SignOutcome {
    pub account: Address,
    pub signature: String,
    pub recovered: Option<Address>,
}

impl SignOutcome {
    pub fn verified(&self) -> bool {
        self.recovered == Some(self.account)
    }
}

/// Conta padrão para assinatura: coinbase, senão a primeira conta
async fn default_signer(provider: &dyn RpcProvider) -> Result<Address> {
    if let Ok(coinbase) = provider.coinbase().await {
        if !coinbase.is_zero() {
            return Ok(coinbase);
        }
    }
    provider
        .accounts()
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::NotFound("o node não expõe contas para assinar".to_string()))
}

pub async fn sign_and_verify(
    provider: &dyn RpcProvider,
    message: &str,
    account: Option<Address>,
) -> Result<SignOutcome> {
    let account = match account {
        Some(account) => account,
        None => default_signer(provider).await?,
    };
    let data = format!("0x{}", hex::encode(message.as_bytes()));
    let signature = provider
        .request("eth_sign", vec![json!(utils::format_address(&account)), json!(data)])
        .await?;
    let signature = signature
        .as_str()
        .ok_or_else(|| Error::DecodeError(format!("assinatura inesperada: {}", signature)))?
        .to_string();
    let bytes = utils::decode_hex(&signature)?;
    let recovered = utils::recover_signer(&utils::eth_message_hash(message.as_bytes()), &bytes);
    Ok(SignOutcome {
        account,
        signature,
        recovered,
    })
}

pub async fn sign(session: &mut Session, msg: Option<String>, account: Option<String>) -> Result<()> {
    let message = msg.unwrap_or_else(|| session.config.investigate.message.clone());
    let account = account.as_deref().map(utils::require_address).transpose()?;
    let provider = session.provider().await?;

    let outcome = sign_and_verify(provider.as_ref(), &message, account).await?;
    output::alert(format!(
        "eth_sign habilitado: {} assinou {:?}",
        utils::format_address(&outcome.account),
        message
    ));
    output::field("Assinatura", &outcome.signature);
    match outcome.recovered {
        Some(recovered) if outcome.verified() => output::success(format!(
            "Assinatura verificada: {}",
            utils::format_address(&recovered)
        )),
        Some(recovered) => output::warning(format!(
            "Signatário recuperado {} difere da conta",
            utils::format_address(&recovered)
        )),
        None => output::warning("Não foi possível recuperar o signatário"),
    }
    Ok(())
}
