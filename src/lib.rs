pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::LoaderConfig;
pub use crate::core::{auth::CommandTokenProvider, client::AspectTypeClient, loader::AspectLoader};
pub use domain::model::{FileOutcome, RunReport};
pub use utils::error::{LoaderError, Result};
