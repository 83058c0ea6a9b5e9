use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;

pub trait ConfigProvider: Send + Sync {
    fn project_id(&self) -> &str;
    fn location(&self) -> &str;
    fn definitions_dir(&self) -> &Path;
    fn api_base_url(&self) -> &str;
    fn resource_type(&self) -> &str;
    fn id_param(&self) -> &str;
    fn dry_run(&self) -> bool;
}

/// Source of bearer tokens for the Dataplex API.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String>;

    /// Human-readable origin of the token, used in log lines.
    fn describe(&self) -> String;
}

#[async_trait]
impl<T: TokenProvider + ?Sized> TokenProvider for Box<T> {
    async fn access_token(&self) -> Result<String> {
        (**self).access_token().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
