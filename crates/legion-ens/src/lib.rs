/*!
 * Legion ENS
 *
 * Resolução de nomes ENS diretamente nos contratos (registry e resolver)
 * e consultas ao subgraph público do ENS.
 */

pub mod resolver;
pub mod subgraph;

pub use resolver::{EnsResolver, ENS_REGISTRY};
pub use subgraph::{EnsRecord, SubgraphClient, DEFAULT_SUBGRAPH_URL};
