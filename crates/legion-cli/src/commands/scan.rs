use colored::Colorize;
use legion_core::{ClientKind, Error, Result, RpcProvider};
use legion_rpc::NodeClient;
use legion_scan::{registry, ProbeStatus, ScanReport};
use tracing::warn;

use crate::cli::ScanAction;
use crate::commands::required;
use crate::output;
use crate::session::Session;

/// Nomes separados por espaço ou vírgula
pub fn split_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .flat_map(|n| n.split(','))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_list(title: &str, names: &[&str]) {
    output::title(&format!("{} ({})", title, names.len()));
    for name in names {
        println!("  {}", name);
    }
}

/// Tipo do cliente atual, conectando ao node padrão se houver um
async fn current_kind(session: &mut Session) -> Result<ClientKind> {
    match session.ensure_connection().await {
        Ok(connection) => Ok(connection.client_kind),
        Err(Error::NotConnected) => Ok(ClientKind::Unknown),
        Err(e) => Err(e),
    }
}

pub async fn handle(session: &mut Session, action: ScanAction) -> Result<()> {
    match action {
        ScanAction::Add { name } => {
            let name = required(name, "name")?;
            let kind = current_kind(session).await?;
            session.selection.add(&name, kind)?;
            output::success(format!("{} selecionado", name));
        }
        ScanAction::AddList { names } => {
            let names = split_names(&names);
            if names.is_empty() {
                return Err(Error::MissingArgument("names".to_string()));
            }
            let kind = current_kind(session).await?;
            let rejected = session.selection.add_list(names.iter().map(String::as_str), kind);
            for err in &rejected {
                output::report_error(err);
            }
            output::success(format!("{} de {} plugins selecionados", names.len() - rejected.len(), names.len()));
        }
        ScanAction::Rm { name } => {
            let name = required(name, "name")?;
            if session.selection.remove(&name) {
                output::success(format!("{} removido", name));
            } else {
                output::warning(format!("{} não estava selecionado", name));
            }
        }
        ScanAction::ListAll => print_list("Plugins", &registry::list_all()),
        ScanAction::ListSelected => print_list("Selecionados", &session.selection.selected()),
        ScanAction::ListGeth => print_list("Plugins Geth", &registry::supported_by(ClientKind::Geth)),
        ScanAction::ListParity => print_list("Plugins Parity", &registry::supported_by(ClientKind::Parity)),
        ScanAction::Execute => execute(session).await?,
        ScanAction::Set { key, value } => {
            let key = required(key, "key")?;
            let value = value.unwrap_or_default();
            session.probe_settings.set(&key, &value)?;
            output::success(format!("{} = {}", key, value));
        }
        ScanAction::Settings => {
            output::title("Parâmetros dos plugins");
            for (key, value) in session.probe_settings.entries() {
                output::field(key, value);
            }
        }
    }
    Ok(())
}

/// Node de referência configurado; falha de conexão só gera aviso
async fn reference_node(session: &Session) -> Option<NodeClient> {
    let url = session.probe_settings.reference_url.clone()?;
    match session.open(&url).await {
        Ok((_, client)) => Some(client),
        Err(e) => {
            warn!("Node de referência {} indisponível: {}", url, e);
            output::warning(format!("Node de referência {} indisponível: {}", url, e));
            None
        }
    }
}

fn print_report(report: &ScanReport) -> Result<()> {
    for result in &report.results {
        let status = match result.status {
            ProbeStatus::Passed => "ok".green(),
            ProbeStatus::IssuesFound => format!("{} issues", result.issues.len()).red(),
            ProbeStatus::Failed => "falhou".yellow(),
        };
        println!("{:<32} {}", result.probe, status);
    }
    println!("{}", report.to_pretty_json()?);
    Ok(())
}

pub async fn execute(session: &mut Session) -> Result<()> {
    if session.selection.is_empty() {
        output::warning("Nenhum plugin selecionado (use scan add <plugin>)");
        return Ok(());
    }
    let (target, provider) = {
        let connection = session.ensure_connection().await?;
        (connection.target(), connection.provider())
    };
    let reference = reference_node(session).await;

    output::title(&format!("Executando {} plugins em {}", session.selection.len(), target));
    let report = legion_scan::execute(
        &session.selection,
        &session.probe_settings,
        target,
        provider.as_ref(),
        reference.as_ref().map(|r| r as &dyn RpcProvider),
    )
    .await;

    match report {
        Some(report) => print_report(&report),
        None => {
            output::warning("Nenhum plugin selecionado");
            Ok(())
        }
    }
}
