use crate::domain::ports::TokenProvider;
use crate::utils::error::{LoaderError, Result};
use crate::utils::validation::TOKEN_COMMAND;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tokio::sync::OnceCell;

pub const DEFAULT_TOKEN_COMMAND: [&str; 3] = ["gcloud", "auth", "print-access-token"];

/// Environment variable that, when set, replaces the token command entirely.
pub const ACCESS_TOKEN_ENV: &str = "ASPECT_LOADER_ACCESS_TOKEN";

/// Runs an external credential helper and reads the token from its stdout.
#[derive(Debug, Clone)]
pub struct CommandTokenProvider {
    program: String,
    args: Vec<String>,
}

impl CommandTokenProvider {
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| LoaderError::MissingConfigError {
                field: TOKEN_COMMAND.to_string(),
            })?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl TokenProvider for CommandTokenProvider {
    async fn access_token(&self) -> Result<String> {
        tracing::debug!("Requesting access token via `{}`", self.command_line());

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| LoaderError::TokenError {
                message: format!("could not run `{}`: {}", self.command_line(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(LoaderError::TokenError {
                message: format!(
                    "`{}` exited with {}. Stderr: {}",
                    self.command_line(),
                    output.status,
                    stderr.trim()
                ),
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(LoaderError::EmptyToken {
                command: self.command_line(),
            });
        }

        Ok(token)
    }

    fn describe(&self) -> String {
        format!("`{}`", self.command_line())
    }
}

#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Reads the token from [`ACCESS_TOKEN_ENV`], ignoring blank values.
    pub fn from_env() -> Option<Self> {
        std::env::var(ACCESS_TOKEN_ENV)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .map(Self::new)
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        if self.token.is_empty() {
            return Err(LoaderError::EmptyToken {
                command: self.describe(),
            });
        }
        Ok(self.token.clone())
    }

    fn describe(&self) -> String {
        "static token".to_string()
    }
}

/// Fetches from the inner provider once and hands out the same token after.
///
/// A failed fetch is not cached; the next call tries again.
pub struct CachedTokenProvider<T: TokenProvider> {
    inner: T,
    token: OnceCell<String>,
}

impl<T: TokenProvider> CachedTokenProvider<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            token: OnceCell::new(),
        }
    }
}

#[async_trait]
impl<T: TokenProvider> TokenProvider for CachedTokenProvider<T> {
    async fn access_token(&self) -> Result<String> {
        self.token
            .get_or_try_init(|| self.inner.access_token())
            .await
            .cloned()
    }

    fn describe(&self) -> String {
        format!("{} (cached)", self.inner.describe())
    }
}
