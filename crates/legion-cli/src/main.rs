use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use legion_cli::chains::ChainNames;
use legion_cli::{dispatch, logging, shell, AppConfig, Cli, Session};
use std::path::Path;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logs = logging::init(cli.verbose, cli.stderr)?;
    info!("Legion {} iniciando", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(cli.config.as_deref()).context("falha ao carregar a configuração")?;
    let chains = ChainNames::load(Path::new(&config.chains_file));
    let mut session = Session::new(config, chains);

    if let Some(host) = cli.host {
        let ok = dispatch::run(&mut session, legion_cli::Command::Sethost { host: Some(host) }).await;
        if !ok && cli.command.is_some() {
            drop(logs);
            std::process::exit(1);
        }
    }

    if let Some(command) = cli.command {
        if !dispatch::run(&mut session, command).await {
            drop(logs);
            std::process::exit(1);
        }
        return Ok(());
    }

    println!("{}", format!("Legion {}", env!("CARGO_PKG_VERSION")).bold());
    if let Some(path) = &logs.file {
        println!("Logs em {}", path.display());
    }
    println!("Digite `help` para a lista de comandos e `exit` para sair.");
    shell::run(&mut session).await
}
