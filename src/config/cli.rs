use crate::config::toml_config::SettingsFile;
use crate::config::LoaderConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "aspect-loader")]
#[command(
    about = "Creates Dataplex Aspect Types from JSON definition files found in a specified folder."
)]
pub struct CliConfig {
    /// The Google Cloud project ID where the Aspect Types will be created.
    pub project_id: String,

    /// The Dataplex location (e.g. 'global', 'us-central1').
    pub location: String,

    /// Folder of '.json' files, one full API request body each. The filename
    /// determines the Aspect Type ID ('my_aspect.json' becomes 'my-aspect').
    pub definitions_dir: PathBuf,

    #[arg(long, help = "TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Override the Dataplex API base URL")]
    pub api_base_url: Option<String>,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Command that prints an access token, comma-separated"
    )]
    pub token_command: Option<Vec<String>>,

    #[arg(long, help = "HTTP request timeout in seconds")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Fetch the access token once instead of per file")]
    pub reuse_token: bool,

    #[arg(long, help = "Show what would be created without calling the API")]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the settings file, then command-line flags.
    pub fn resolve(&self) -> Result<LoaderConfig> {
        let mut config = LoaderConfig::new(
            self.project_id.clone(),
            self.location.clone(),
            self.definitions_dir.clone(),
        );

        if let Some(path) = &self.config {
            tracing::debug!("Loading settings from {}", path.display());
            config.apply_settings(&SettingsFile::from_file(path)?);
        }

        if let Some(base_url) = &self.api_base_url {
            config.api_base_url = base_url.clone();
        }
        if let Some(command) = &self.token_command {
            config.token_command = command.clone();
        }
        if self.timeout_seconds.is_some() {
            config.timeout_seconds = self.timeout_seconds;
        }
        config.reuse_token |= self.reuse_token;
        config.dry_run = self.dry_run;

        Ok(config)
    }
}
