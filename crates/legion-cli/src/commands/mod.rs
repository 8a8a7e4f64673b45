//! Handlers dos comandos do shell

pub mod contract;
pub mod convert;
pub mod ens;
pub mod investigate;
pub mod node;
pub mod query;
pub mod scan;

use legion_core::{Error, Result};

/// Argumento obrigatório; `MissingArgument` quando ausente ou vazio
pub fn required(value: Option<String>, name: &str) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::MissingArgument(name.to_string()))
}
