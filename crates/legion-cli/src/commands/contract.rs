use legion_core::{utils, Error, Result};
use legion_mythril::{run, ScanRequest};

use crate::cli::ScanArgs;
use crate::commands::required;
use crate::output;
use crate::session::Session;

const DEFAULT_TX_COUNT: u32 = 2;
const DEFAULT_TIMEOUT: u64 = 2;

/// Módulos separados por vírgula; vazio usa os padrões do Mythril
pub fn parse_modules(modules: Option<&str>) -> Vec<String> {
    modules
        .map(|m| {
            m.split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub async fn analyze(session: &mut Session, args: ScanArgs) -> Result<()> {
    let contract = utils::require_address(&required(args.contract, "contract")?)?;
    let contract = utils::format_address(&contract);
    let endpoint = session.ensure_connection().await?.endpoint.clone();

    let request = ScanRequest::for_endpoint(
        contract.clone(),
        &endpoint,
        parse_modules(args.modules.as_deref()),
        args.tx_count.unwrap_or(DEFAULT_TX_COUNT),
        args.timeout.unwrap_or(DEFAULT_TIMEOUT),
    )
    .map_err(Error::from)?;

    output::field("Analisando contrato", &contract);
    output::field("Node", &endpoint);
    output::field("Módulos", request.modules.join(","));

    let report = run(&session.config.mythril, &request).await.map_err(Error::from)?;
    if report.is_clean() {
        output::success("Nenhuma issue encontrada");
        return Ok(());
    }
    output::alert(format!("{} issues encontradas", report.issues.len()));
    for issue in &report.issues {
        println!("{}\n", issue);
    }
    Ok(())
}
