#[cfg(feature = "cli")]
pub mod cli;
pub mod file_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use file_config::{ClientConfig, ResolvedConfig};
