use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Definitions directory not found: '{path}'")]
    DirectoryNotFound { path: String },

    #[error("Definition file not found: {path}")]
    DefinitionNotFound { path: String },

    #[error("Error reading file {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not obtain access token: {message}")]
    TokenError { message: String },

    #[error("Empty access token received from `{command}`")]
    EmptyToken { command: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}: {body}")]
    ApiStatusError { status: u16, url: String, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl LoaderError {
    /// Short message for the terminal, without nested error chains.
    pub fn user_friendly_message(&self) -> String {
        match self {
            LoaderError::DirectoryNotFound { path } => {
                format!("Definitions directory not found: '{}'", path)
            }
            LoaderError::DefinitionNotFound { path } => {
                format!("Definition file not found: {}", path)
            }
            LoaderError::ReadError { path, .. } => format!("Could not read {}", path),
            LoaderError::TokenError { .. } | LoaderError::EmptyToken { .. } => {
                "Could not obtain a Google Cloud access token".to_string()
            }
            LoaderError::ApiError(_) => "The Dataplex API could not be reached".to_string(),
            LoaderError::ApiStatusError { status, .. } => {
                format!("The Dataplex API rejected the request (HTTP {})", status)
            }
            LoaderError::IoError(e) => format!("File system error: {}", e),
            LoaderError::ConfigError { .. }
            | LoaderError::InvalidConfigValueError { .. }
            | LoaderError::MissingConfigError { .. } => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LoaderError::DirectoryNotFound { .. } => {
                "Check the definitions_dir argument points at an existing folder"
            }
            LoaderError::DefinitionNotFound { .. } | LoaderError::ReadError { .. } => {
                "Check the file exists and is readable UTF-8 text"
            }
            LoaderError::TokenError { .. } | LoaderError::EmptyToken { .. } => {
                "Ensure gcloud CLI is installed and authenticated (e.g. `gcloud auth application-default login`)"
            }
            LoaderError::ApiError(_) => "Check network connectivity and the API base URL",
            LoaderError::ApiStatusError { status, .. } => match status {
                401 | 403 => "Check the account has Dataplex permissions on the project",
                409 => "An Aspect Type with this ID already exists; rename the file or delete the existing resource",
                400 => "Check the definition file is a valid Aspect Type request body",
                _ => "Inspect the API response body for details",
            },
            LoaderError::IoError(_) => "Check file permissions and available disk space",
            LoaderError::ConfigError { .. }
            | LoaderError::InvalidConfigValueError { .. }
            | LoaderError::MissingConfigError { .. } => {
                "Review the command-line arguments and the settings file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
