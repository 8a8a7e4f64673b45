/*!
 * Legion CLI
 *
 * Shell interativo e comandos de linha única para investigar nodes
 * Ethereum: conexão, consultas, fingerprint, plugins de scan, ENS e
 * análise de contratos com Mythril.
 */

pub mod chains;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod logging;
pub mod output;
pub mod session;
pub mod shell;

pub use cli::{Cli, Command};
pub use config::AppConfig;
pub use session::{Connection, Session};
