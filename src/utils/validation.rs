use crate::utils::error::{LoaderError, Result};
use std::fmt;
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// A user-settable value, named the way the user sets it: a positional
/// argument, or a settings-file key with its optional command-line flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Argument(&'static str),
    Setting {
        key: &'static str,
        flag: Option<&'static str>,
    },
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigField::Argument(name) => write!(f, "<{}> argument", name),
            ConfigField::Setting {
                key,
                flag: Some(flag),
            } => write!(f, "{} ({})", key, flag),
            ConfigField::Setting { key, flag: None } => write!(f, "{}", key),
        }
    }
}

pub const PROJECT_ID: ConfigField = ConfigField::Argument("project_id");
pub const LOCATION: ConfigField = ConfigField::Argument("location");
pub const DEFINITIONS_DIR: ConfigField = ConfigField::Argument("definitions_dir");
pub const API_BASE_URL: ConfigField = ConfigField::Setting {
    key: "api.base_url",
    flag: Some("--api-base-url"),
};
pub const RESOURCE_TYPE: ConfigField = ConfigField::Setting {
    key: "api.resource_type",
    flag: None,
};
pub const ID_PARAM: ConfigField = ConfigField::Setting {
    key: "api.id_param",
    flag: None,
};
pub const TIMEOUT_SECONDS: ConfigField = ConfigField::Setting {
    key: "api.timeout_seconds",
    flag: Some("--timeout-seconds"),
};
pub const TOKEN_COMMAND: ConfigField = ConfigField::Setting {
    key: "auth.token_command",
    flag: Some("--token-command"),
};

fn invalid(field: ConfigField, value: impl Into<String>, reason: impl Into<String>) -> LoaderError {
    LoaderError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.into(),
        reason: reason.into(),
    }
}

/// The base URL must be absolute http(s) and able to take the
/// `projects/.../locations/...` path segments.
pub fn validate_api_base_url(field: ConfigField, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "the Dataplex API base URL cannot be empty"));
    }

    let url = Url::parse(value)
        .map_err(|e| invalid(field, value, format!("not an absolute URL: {}", e)))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(invalid(
                field,
                value,
                format!("scheme '{}' is not http or https", scheme),
            ))
        }
    }

    if url.cannot_be_a_base() {
        return Err(invalid(field, value, "URL cannot take resource path segments"));
    }
    Ok(())
}

pub fn validate_definitions_path(field: ConfigField, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();
    if display.is_empty() {
        return Err(invalid(field, display, "the definitions folder path is empty"));
    }
    if display.contains('\0') {
        return Err(invalid(field, display, "path contains a NUL byte"));
    }
    Ok(())
}

/// Project IDs, locations and API names are single tokens that end up in the
/// request URL; blanks and embedded whitespace are always a typo.
pub fn validate_url_token(field: ConfigField, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(field, value, "cannot be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(invalid(field, value, "cannot contain whitespace"));
    }
    Ok(())
}

pub fn validate_token_command(field: ConfigField, command: &[String]) -> Result<()> {
    if command.is_empty() {
        return Err(LoaderError::MissingConfigError {
            field: field.to_string(),
        });
    }
    if let Some(position) = command.iter().position(|part| part.trim().is_empty()) {
        return Err(invalid(
            field,
            command.join(","),
            format!("element {} of the credential command is blank", position + 1),
        ));
    }
    Ok(())
}

pub fn validate_timeout(field: ConfigField, seconds: u64, max_seconds: u64) -> Result<()> {
    if seconds == 0 {
        return Err(invalid(field, "0", "a request timeout must be at least 1 second"));
    }
    if seconds > max_seconds {
        return Err(invalid(
            field,
            seconds.to_string(),
            format!("a request timeout cannot exceed {} seconds", max_seconds),
        ));
    }
    Ok(())
}
