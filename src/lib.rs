pub mod attach;
pub mod error;
pub mod mobility;
pub mod net;
pub mod scenario;
pub mod sim;
pub mod topo;

pub use error::{CollaboratorError, ConfigError, ScenarioError};

#[cfg(test)]
mod test;
