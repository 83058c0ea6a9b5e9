use crate::utils::error::{LoaderError, Result};
use crate::utils::validation::API_BASE_URL;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://dataplex.googleapis.com/v1";
pub const DEFAULT_RESOURCE_TYPE: &str = "aspectTypes";
pub const DEFAULT_ID_PARAM: &str = "aspect_type_id";

/// Where one create request goes.
#[derive(Debug, Clone, Copy)]
pub struct EndpointTarget<'a> {
    pub base_url: &'a str,
    pub project_id: &'a str,
    pub location: &'a str,
    pub resource_type: &'a str,
    pub id_param: &'a str,
}

/// Build `<base>/projects/<p>/locations/<l>/<type>?<id_param>=<id>`.
pub fn endpoint_url(target: &EndpointTarget<'_>, resource_id: &str) -> Result<Url> {
    let mut url = Url::parse(target.base_url).map_err(|e| LoaderError::InvalidConfigValueError {
        field: API_BASE_URL.to_string(),
        value: target.base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;

    url.path_segments_mut()
        .map_err(|_| LoaderError::ConfigError {
            message: format!("API base URL cannot carry a path: {}", target.base_url),
        })?
        .pop_if_empty()
        .extend([
            "projects",
            target.project_id,
            "locations",
            target.location,
            target.resource_type,
        ]);

    url.query_pairs_mut().append_pair(target.id_param, resource_id);
    Ok(url)
}

pub struct AspectTypeClient {
    client: Client,
}

impl AspectTypeClient {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// POST `body` unchanged and return the response text on a 2xx.
    pub async fn create(&self, url: &Url, token: &str, body: String) -> Result<String> {
        tracing::debug!("POST {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .body(body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(LoaderError::ApiStatusError {
                status: status.as_u16(),
                url: url.to_string(),
                body: text,
            })
        }
    }
}
