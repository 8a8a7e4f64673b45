//! Shell interativo

use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use crate::cli::{Command, ShellLine};
use crate::dispatch;
use crate::session::Session;

/// O que fazer com uma linha digitada
#[derive(Debug, PartialEq)]
pub enum LineAction {
    Empty,
    Exit,
    Command(Command),
    /// Texto a exibir; `true` quando é um erro
    Message(String, bool),
}

pub fn parse_line(line: &str) -> LineAction {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineAction::Empty;
    }
    if matches!(line, "exit" | "quit") {
        return LineAction::Exit;
    }

    let Some(words) = shlex::split(line) else {
        return LineAction::Message("aspas não balanceadas".to_string(), true);
    };
    match ShellLine::try_parse_from(words) {
        Ok(parsed) => LineAction::Command(parsed.command),
        Err(e) => {
            let is_error = !matches!(
                e.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            );
            LineAction::Message(e.render().to_string(), is_error)
        }
    }
}

fn prompt(session: &Session) -> String {
    match session.connection() {
        Some(conn) => format!("legion({})> ", conn.endpoint),
        None => "legion> ".to_string(),
    }
}

/// Lê linhas do stdin até `exit`, `quit` ou EOF
pub async fn run(session: &mut Session) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("Shell iniciado");

    loop {
        print!("{}", prompt(session).cyan());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        match parse_line(&line) {
            LineAction::Empty => {}
            LineAction::Exit => break,
            LineAction::Message(text, true) => eprintln!("{}", text.trim_end()),
            LineAction::Message(text, false) => println!("{}", text.trim_end()),
            LineAction::Command(command) => {
                let ok = dispatch::run(session, command).await;
                debug!("Comando concluído (ok = {})", ok);
            }
        }
    }
    info!("Shell encerrado");
    Ok(())
}
