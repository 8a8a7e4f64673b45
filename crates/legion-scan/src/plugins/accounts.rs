//! Plugins sobre contas gerenciadas pelo node

use async_trait::async_trait;
use ethereum_types::{Address, U256};
use legion_core::{utils, BlockTag, Error, Result};
use serde_json::{json, Value};
use tracing::debug;

use super::exposure::MethodExposure;
use crate::probe::{Issue, Probe, ScanContext, Severity};
use crate::settings::ProbeSettings;

const METHOD_NOT_FOUND: i64 = -32601;

pub fn account_creation(settings: &ProbeSettings) -> MethodExposure {
    MethodExposure::new(
        "eth1/AccountCreation",
        &["personal_newAccount"],
        vec![json!(settings.password)],
        Severity::High,
        "Criação de contas habilitada",
        "Qualquer cliente pode criar contas no keystore do node",
    )
}

/// Lista as contas do node; `None` quando `eth_accounts` não está exposto
async fn node_accounts(ctx: &ScanContext<'_>) -> Result<Option<Vec<Address>>> {
    match ctx.node.accounts().await {
        Ok(accounts) => Ok(Some(accounts)),
        Err(Error::RpcRejected { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Reporta contas expostas e seus saldos
pub struct OpenAccounts;

#[async_trait]
impl Probe for OpenAccounts {
    fn name(&self) -> &'static str {
        "eth1/OpenAccounts"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let Some(accounts) = node_accounts(ctx).await? else {
            return Ok(Vec::new());
        };

        let mut issues = Vec::with_capacity(accounts.len());
        for account in accounts {
            let balance = ctx.chain_source().balance(account, BlockTag::Latest).await?;
            let address = utils::format_address(&account);
            issues.push(
                Issue::new(
                    Severity::Medium,
                    "Conta exposta",
                    format!("Conta {} com saldo de {} ETH", address, utils::format_ether(&balance)),
                )
                .with_raw(json!({ "account": address, "balance": balance.to_string() })),
            );
        }
        Ok(issues)
    }
}

/// Tenta desbloquear as contas do node com uma lista de senhas
pub struct AccountUnlock {
    word_list: Vec<String>,
    skip_below: U256,
}

impl AccountUnlock {
    pub fn new(settings: &ProbeSettings) -> Self {
        Self {
            word_list: settings.word_list.clone(),
            skip_below: U256::from(settings.skip_below),
        }
    }
}

#[async_trait]
impl Probe for AccountUnlock {
    fn name(&self) -> &'static str {
        "eth1/AccountUnlock"
    }

    async fn check(&self, ctx: &ScanContext<'_>) -> Result<Vec<Issue>> {
        let Some(accounts) = node_accounts(ctx).await? else {
            return Ok(Vec::new());
        };

        let mut issues = Vec::new();
        'accounts: for account in accounts {
            if !self.skip_below.is_zero() {
                let balance = ctx.chain_source().balance(account, BlockTag::Latest).await?;
                if balance < self.skip_below {
                    debug!("Conta {:?} ignorada, saldo {} abaixo do limite", account, balance);
                    continue;
                }
            }

            let address = utils::format_address(&account);
            for word in &self.word_list {
                let params = vec![json!(address), json!(word), Value::Null];
                match ctx.node.request("personal_unlockAccount", params).await {
                    Ok(Value::Bool(true)) => {
                        issues.push(
                            Issue::new(
                                Severity::Critical,
                                "Conta desbloqueada com senha fraca",
                                format!("A conta {} foi desbloqueada com a senha \"{}\"", address, word),
                            )
                            .with_raw(json!({ "account": address, "password": word })),
                        );
                        continue 'accounts;
                    }
                    Ok(_) => {}
                    Err(Error::RpcRejected { code: METHOD_NOT_FOUND, .. }) => return Ok(issues),
                    Err(Error::RpcRejected { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }
        Ok(issues)
    }
}
