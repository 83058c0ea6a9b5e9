pub mod auth;
pub mod client;
pub mod discovery;
pub mod loader;
pub mod resource_id;

pub use crate::domain::model::{DefinitionFile, FileOutcome, RunReport};
pub use crate::domain::ports::{ConfigProvider, TokenProvider};
pub use crate::utils::error::Result;
