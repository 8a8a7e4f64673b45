/*!
 * Legion Mythril
 *
 * Executa `myth analyze` contra um contrato implantado no node conectado
 * e interpreta o relatório JSON produzido.
 */

mod errors;
mod report;
mod runner;

pub use errors::{MythrilError, Result};
pub use report::{MythrilIssue, MythrilReport};
pub use runner::{build_args, run, MythrilConfig, ScanRequest, DEFAULT_MODULES};
