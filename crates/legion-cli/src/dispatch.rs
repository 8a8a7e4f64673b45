//! Roteamento de um comando já interpretado para o seu handler

use legion_core::{Error, Result};
use tracing::debug;

use crate::cli::{Command, EnsCommand, InvestigateCommand, QueryCommand, ScanArgs};
use crate::commands::{contract, convert, ens, investigate, node, query, scan};
use crate::output;
use crate::session::Session;

pub async fn execute(session: &mut Session, command: Command) -> Result<()> {
    debug!("Executando {:?}", command);
    match command {
        Command::Sethost { host } => node::sethost(session, host).await,
        Command::Getnodeinfo => node::getnodeinfo(session).await,
        Command::Version => node::version(session).await,
        Command::Investigate { target } => match target {
            InvestigateCommand::Accounts { all, intrusive } => investigate::accounts(session, all, intrusive).await,
            InvestigateCommand::Admin { intrusive } => investigate::admin(session, intrusive).await,
            InvestigateCommand::Sign { msg, account } => investigate::sign(session, msg, account).await,
        },
        Command::Query { query: q } => match q {
            QueryCommand::Balance { address, block } => query::balance(session, address, block).await,
            QueryCommand::Storage { address, count, block } => query::storage(session, address, count, block).await,
            QueryCommand::Code { address, block } => query::code(session, address, block).await,
            QueryCommand::Block { block } => query::block(session, block).await,
            QueryCommand::Transaction { hash } => query::transaction(session, hash).await,
            QueryCommand::Command { method, params } => query::command(session, method, params).await,
            QueryCommand::Ecrecover { message, signature } => query::ecrecover(message, signature),
        },
        Command::Ens { command } => match command {
            EnsCommand::ToName { address } => ens::to_name(session, address).await,
            EnsCommand::ToAddress { name } => ens::to_address(session, name).await,
            EnsCommand::Info { name } => ens::info(session, name).await,
            EnsCommand::ListNames { owner } => ens::list_names(session, owner).await,
            EnsCommand::ListSubdomains { name } => ens::list_subdomains(session, name).await,
        },
        Command::Scan(args) => scan_command(session, args).await,
        Command::Conversions { command } => {
            println!("{}", convert::convert(command)?);
            Ok(())
        }
    }
}

async fn scan_command(session: &mut Session, mut args: ScanArgs) -> Result<()> {
    match args.action.take() {
        Some(action) => scan::handle(session, action).await,
        None if args.contract.is_some() => contract::analyze(session, args).await,
        None => Err(Error::MissingArgument("contract".to_string())),
    }
}

/// Executa o comando e reporta o erro sem encerrar o shell
pub async fn run(session: &mut Session, command: Command) -> bool {
    match execute(session, command).await {
        Ok(()) => true,
        Err(e) => {
            debug!("Comando falhou: {:?}", e);
            output::report_error(&e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chains::ChainNames;
    use crate::cli::QueryCommand;
    use crate::config::AppConfig;

    fn offline_session() -> Session {
        Session::with_default_uri(AppConfig::default(), ChainNames::builtin(), None)
    }

    #[tokio::test]
    async fn scan_without_action_needs_a_contract() {
        let mut session = offline_session();
        let args = ScanArgs {
            action: None,
            contract: None,
            modules: None,
            tx_count: None,
            timeout: None,
        };
        let err = execute(&mut session, Command::Scan(args)).await.unwrap_err();
        assert_eq!(err, Error::MissingArgument("contract".to_string()));
    }

    #[tokio::test]
    async fn node_queries_need_a_connection() {
        let mut session = offline_session();
        let command = Command::Query {
            query: QueryCommand::Block { block: None },
        };
        assert_eq!(execute(&mut session, command).await.unwrap_err(), Error::NotConnected);
    }

    #[tokio::test]
    async fn argument_checks_come_before_connecting() {
        let mut session = offline_session();
        let command = Command::Query {
            query: QueryCommand::Balance { address: None, block: None },
        };
        assert_eq!(
            execute(&mut session, command).await.unwrap_err(),
            Error::MissingArgument("address".to_string())
        );
    }
}
