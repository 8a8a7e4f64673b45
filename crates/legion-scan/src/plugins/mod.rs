//! Implementações dos plugins de segurança

pub mod accounts;
pub mod exposure;
pub mod geth;
pub mod network;
pub mod node;
pub mod parity;

pub use exposure::MethodExposure;
