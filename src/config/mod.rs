#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::auth::{
    CachedTokenProvider, CommandTokenProvider, StaticTokenProvider, DEFAULT_TOKEN_COMMAND,
};
use crate::core::client::{
    AspectTypeClient, DEFAULT_API_BASE_URL, DEFAULT_ID_PARAM, DEFAULT_RESOURCE_TYPE,
};
use crate::domain::ports::{ConfigProvider, TokenProvider};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_api_base_url, validate_definitions_path, validate_timeout, validate_token_command,
    validate_url_token, Validate, API_BASE_URL, DEFINITIONS_DIR, ID_PARAM, LOCATION, PROJECT_ID,
    RESOURCE_TYPE, TIMEOUT_SECONDS, TOKEN_COMMAND,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use toml_config::SettingsFile;

pub const MAX_TIMEOUT_SECONDS: u64 = 3600;

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub project_id: String,
    pub location: String,
    pub definitions_dir: PathBuf,
    pub api_base_url: String,
    pub resource_type: String,
    pub id_param: String,
    pub token_command: Vec<String>,
    pub timeout_seconds: Option<u64>,
    pub reuse_token: bool,
    pub dry_run: bool,
}

impl LoaderConfig {
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        definitions_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            definitions_dir: definitions_dir.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            resource_type: DEFAULT_RESOURCE_TYPE.to_string(),
            id_param: DEFAULT_ID_PARAM.to_string(),
            token_command: DEFAULT_TOKEN_COMMAND.iter().map(|s| s.to_string()).collect(),
            timeout_seconds: None,
            reuse_token: false,
            dry_run: false,
        }
    }

    /// Overlay values from a settings file onto the current ones.
    pub fn apply_settings(&mut self, settings: &SettingsFile) {
        let api = &settings.api;
        if let Some(base_url) = &api.base_url {
            self.api_base_url = base_url.clone();
        }
        if let Some(resource_type) = &api.resource_type {
            self.resource_type = resource_type.clone();
        }
        if let Some(id_param) = &api.id_param {
            self.id_param = id_param.clone();
        }
        if api.timeout_seconds.is_some() {
            self.timeout_seconds = api.timeout_seconds;
        }

        let auth = &settings.auth;
        if let Some(command) = &auth.token_command {
            self.token_command = command.clone();
        }
        if let Some(reuse) = auth.reuse_token {
            self.reuse_token = reuse;
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    pub fn build_client(&self) -> Result<AspectTypeClient> {
        AspectTypeClient::new(self.timeout())
    }

    /// `ASPECT_LOADER_ACCESS_TOKEN` wins over the token command when set.
    pub fn build_token_provider(&self) -> Result<Box<dyn TokenProvider>> {
        let provider: Box<dyn TokenProvider> = match StaticTokenProvider::from_env() {
            Some(static_token) => {
                tracing::debug!("Using access token from the environment");
                Box::new(static_token)
            }
            None => Box::new(CommandTokenProvider::new(&self.token_command)?),
        };

        if self.reuse_token {
            Ok(Box::new(CachedTokenProvider::new(provider)))
        } else {
            Ok(provider)
        }
    }
}

impl Validate for LoaderConfig {
    fn validate(&self) -> Result<()> {
        validate_url_token(PROJECT_ID, &self.project_id)?;
        validate_url_token(LOCATION, &self.location)?;
        validate_definitions_path(DEFINITIONS_DIR, &self.definitions_dir)?;
        validate_api_base_url(API_BASE_URL, &self.api_base_url)?;
        validate_url_token(RESOURCE_TYPE, &self.resource_type)?;
        validate_url_token(ID_PARAM, &self.id_param)?;
        validate_token_command(TOKEN_COMMAND, &self.token_command)?;
        if let Some(timeout) = self.timeout_seconds {
            validate_timeout(TIMEOUT_SECONDS, timeout, MAX_TIMEOUT_SECONDS)?;
        }
        Ok(())
    }
}

impl ConfigProvider for LoaderConfig {
    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn definitions_dir(&self) -> &Path {
        &self.definitions_dir
    }

    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn resource_type(&self) -> &str {
        &self.resource_type
    }

    fn id_param(&self) -> &str {
        &self.id_param
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}
