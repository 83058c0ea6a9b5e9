use crate::core::client::{endpoint_url, AspectTypeClient, EndpointTarget};
use crate::core::discovery::discover_definitions;
use crate::domain::model::{DefinitionFile, FileOutcome, RunReport};
use crate::domain::ports::{ConfigProvider, TokenProvider};
use crate::utils::error::{LoaderError, Result};
use std::path::Path;

/// Creates one Aspect Type per definition file, strictly in filename order.
pub struct AspectLoader<T: TokenProvider, C: ConfigProvider> {
    tokens: T,
    config: C,
    client: AspectTypeClient,
}

impl<T: TokenProvider, C: ConfigProvider> AspectLoader<T, C> {
    pub fn new(tokens: T, config: C, client: AspectTypeClient) -> Self {
        Self {
            tokens,
            config,
            client,
        }
    }

    /// Process every definition file.
    ///
    /// Only a missing definitions directory fails the run; per-file problems
    /// are logged, recorded in the report, and the next file is processed.
    pub async fn run(&self) -> Result<RunReport> {
        let dir = self.config.definitions_dir();
        let dir_display = dir.display().to_string();
        let mut report = RunReport::new(dir_display.clone());

        let definitions = discover_definitions(dir).await?;
        if definitions.is_empty() {
            tracing::warn!(
                "No .json files found in '{}'. Please ensure your definition files are present and end with '.json'. Exiting.",
                dir_display
            );
            return Ok(report);
        }

        tracing::info!(
            "Found {} JSON definition file(s) in '{}'.",
            definitions.len(),
            dir_display
        );
        if self.config.dry_run() {
            tracing::info!("Dry run: no tokens will be requested and nothing will be created");
        }

        for definition in &definitions {
            let outcome = self.process(definition).await;
            report.push(definition.filename.clone(), outcome);
        }

        tracing::info!(
            "Done: {} created, {} planned, {} skipped, {} failed",
            report.created(),
            report.planned(),
            report.skipped(),
            report.failed()
        );

        Ok(report)
    }

    async fn process(&self, definition: &DefinitionFile) -> FileOutcome {
        let Some(resource_id) = definition.resource_id.as_deref() else {
            tracing::warn!(
                "Could not derive a valid resource ID from filename '{}'. Skipping this file.",
                definition.filename
            );
            return FileOutcome::Skipped {
                reason: "no valid resource ID could be derived from the filename".to_string(),
            };
        };

        let resource_type = self.config.resource_type();
        tracing::info!(
            "Processing '{}' for {} ID: '{}'...",
            definition.path.display(),
            resource_type,
            resource_id
        );

        match self.create(&definition.path, resource_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                self.log_failure(&definition.path, resource_id, &e);
                FileOutcome::Failed {
                    resource_id: resource_id.to_string(),
                    error: e.to_string(),
                }
            }
        }
    }

    async fn create(&self, path: &Path, resource_id: &str) -> Result<FileOutcome> {
        let body = read_definition(path).await?;
        if let Err(e) = serde_json::from_str::<serde_json::Value>(&body) {
            // Sent anyway; the API reports the precise problem.
            tracing::warn!("'{}' is not valid JSON ({}); sending it unchanged", path.display(), e);
        }

        let url = endpoint_url(&self.endpoint_target(), resource_id)?;

        if self.config.dry_run() {
            tracing::info!("Would POST {} ({} bytes)", url, body.len());
            return Ok(FileOutcome::Planned {
                resource_id: resource_id.to_string(),
                url: url.to_string(),
            });
        }

        let token = self.tokens.access_token().await?;
        let response = self.client.create(&url, &token, body).await?;

        tracing::info!(
            "Successfully created {} with ID: {}",
            self.config.resource_type(),
            resource_id
        );
        tracing::info!("{}", response);

        Ok(FileOutcome::Created {
            resource_id: resource_id.to_string(),
            response,
        })
    }

    fn endpoint_target(&self) -> EndpointTarget<'_> {
        EndpointTarget {
            base_url: self.config.api_base_url(),
            project_id: self.config.project_id(),
            location: self.config.location(),
            resource_type: self.config.resource_type(),
            id_param: self.config.id_param(),
        }
    }

    fn log_failure(&self, path: &Path, resource_id: &str, error: &LoaderError) {
        let resource_type = self.config.resource_type();
        match error {
            LoaderError::ApiStatusError { status, url, body } => {
                tracing::error!("--- ERROR Creating {} with ID: {} ---", resource_type, resource_id);
                tracing::error!("  API URL: {}", url);
                tracing::error!("  Definition File: {}", path.display());
                tracing::error!("  Status: {}", status);
                tracing::error!("  Response: {}", body);
                tracing::error!("  Suggestion: {}", error.recovery_suggestion());
            }
            LoaderError::TokenError { .. } | LoaderError::EmptyToken { .. } => {
                tracing::error!(
                    "Error obtaining access token from {}: {}",
                    self.tokens.describe(),
                    error
                );
                tracing::error!("{}", error.recovery_suggestion());
            }
            LoaderError::ApiError(e) => {
                tracing::error!(
                    "An unexpected error occurred while calling the API for {}: {}",
                    resource_id,
                    e
                );
            }
            other => tracing::error!("Error: {}", other),
        }
    }
}

async fn read_definition(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoaderError::DefinitionNotFound {
                path: path.display().to_string(),
            }
        } else {
            LoaderError::ReadError {
                path: path.display().to_string(),
                source: e,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::StaticTokenProvider;
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    struct MockConfig {
        definitions_dir: PathBuf,
        api_base_url: String,
        dry_run: bool,
    }

    impl MockConfig {
        fn new(definitions_dir: &Path, api_base_url: String) -> Self {
            Self {
                definitions_dir: definitions_dir.to_path_buf(),
                api_base_url,
                dry_run: false,
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn project_id(&self) -> &str {
            "test-project"
        }

        fn location(&self) -> &str {
            "us-central1"
        }

        fn definitions_dir(&self) -> &Path {
            &self.definitions_dir
        }

        fn api_base_url(&self) -> &str {
            &self.api_base_url
        }

        fn resource_type(&self) -> &str {
            "aspectTypes"
        }

        fn id_param(&self) -> &str {
            "aspect_type_id"
        }

        fn dry_run(&self) -> bool {
            self.dry_run
        }
    }

    struct CountingTokens {
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl TokenProvider for CountingTokens {
        async fn access_token(&self) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok("counted-token".to_string())
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    struct FailingTokens;

    #[async_trait]
    impl TokenProvider for FailingTokens {
        async fn access_token(&self) -> Result<String> {
            Err(LoaderError::TokenError {
                message: "gcloud exited with status 1".to_string(),
            })
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    const ASPECTS_PATH: &str = "/v1/projects/test-project/locations/us-central1/aspectTypes";

    #[tokio::test]
    async fn test_token_fetched_per_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("one.json"), "{}").unwrap();
        std::fs::write(dir.path().join("two.json"), "{}").unwrap();

        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path(ASPECTS_PATH)
                .header("authorization", "Bearer counted-token");
            then.status(200).body("{}");
        });

        let calls = Arc::new(AtomicUsize::new(0));
        let loader = AspectLoader::new(
            CountingTokens {
                calls: calls.clone(),
            },
            MockConfig::new(dir.path(), server.url("/v1")),
            AspectTypeClient::new(None).unwrap(),
        );

        let report = loader.run().await.unwrap();

        api_mock.assert_hits(2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(report.created(), 2);
    }

    #[tokio::test]
    async fn test_token_failure_does_not_stop_run() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("b.json"), "{}").unwrap();

        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200);
        });

        let loader = AspectLoader::new(
            FailingTokens,
            MockConfig::new(dir.path(), server.url("/v1")),
            AspectTypeClient::new(None).unwrap(),
        );

        let report = loader.run().await.unwrap();

        api_mock.assert_hits(0);
        assert_eq!(report.failed(), 2);
        match &report.files[0].outcome {
            FileOutcome::Failed { resource_id, error } => {
                assert_eq!(resource_id, "a");
                assert!(error.contains("access token"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dry_run_never_requests_token() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Data Contract.json"), "{}").unwrap();

        let mut config = MockConfig::new(dir.path(), "https://dataplex.googleapis.com/v1".into());
        config.dry_run = true;
        let loader = AspectLoader::new(FailingTokens, config, AspectTypeClient::new(None).unwrap());

        let report = loader.run().await.unwrap();

        assert_eq!(report.planned(), 1);
        assert_eq!(
            report.files[0].outcome,
            FileOutcome::Planned {
                resource_id: "data-contract".to_string(),
                url: "https://dataplex.googleapis.com/v1/projects/test-project/locations/us-central1/aspectTypes?aspect_type_id=data-contract".to_string(),
            }
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_unreadable_entry_is_a_per_file_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("folder.json")).unwrap();
        std::fs::write(dir.path().join("real.json"), "{}").unwrap();

        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).query_param("aspect_type_id", "real");
            then.status(200).body("{}");
        });

        let loader = AspectLoader::new(
            StaticTokenProvider::new("t"),
            MockConfig::new(dir.path(), server.url("/v1")),
            AspectTypeClient::new(None).unwrap(),
        );

        let report = loader.run().await.unwrap();

        api_mock.assert();
        assert_eq!(report.failed(), 1);
        assert_eq!(report.created(), 1);
        assert_eq!(report.files[0].filename, "folder.json");
    }

    #[tokio::test]
    async fn test_read_definition_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_definition(&dir.path().join("gone.json")).await.unwrap_err();
        assert!(matches!(err, LoaderError::DefinitionNotFound { .. }));
    }
}
