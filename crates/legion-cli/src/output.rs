//! Saída colorida do shell

use colored::Colorize;
use legion_core::Error;
use std::fmt::Display;

pub fn title(text: &str) {
    println!("{}", text.bold().underline());
}

pub fn field(label: &str, value: impl Display) {
    println!("{:<18} {}", format!("{}:", label).bold(), value);
}

/// Campo que pode não estar disponível no node
pub fn optional_field(label: &str, value: &Result<String, Error>) {
    match value {
        Ok(value) => field(label, value),
        Err(e) => field(label, format!("indisponível ({})", e.kind()).yellow()),
    }
}

pub fn success(text: impl Display) {
    println!("{}", text.to_string().green());
}

pub fn warning(text: impl Display) {
    println!("{}", text.to_string().yellow());
}

pub fn alert(text: impl Display) {
    println!("{}", text.to_string().red().bold());
}

/// Reporta um erro capturado na fronteira do comando
pub fn report_error(err: &Error) {
    let line = format!("[{}] {}", err.kind(), err);
    if err.is_warning() {
        println!("{}", line.yellow());
    } else {
        println!("{}", line.red());
    }
}

pub fn pretty_json(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
