/*!
 * Legion Scan
 *
 * Scanner de RPC: tabela de plugins, seleção condicionada ao tipo de
 * cliente e execução sequencial contra o node conectado.
 */

pub mod plugins;
pub mod probe;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod selection;
pub mod settings;

pub use probe::{Issue, Probe, ScanContext, ScanTarget, Severity};
pub use registry::{ProbeFactory, SUPPORTED_BY_ALL_CLIENTS};
pub use report::{ProbeResult, ProbeStatus, ScanReport};
pub use scanner::{execute, Scanner};
pub use selection::ProbeSelection;
pub use settings::ProbeSettings;
