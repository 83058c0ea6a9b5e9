use crate::core::resource_id::derive_resource_id;
use crate::domain::model::DefinitionFile;
use crate::utils::error::{LoaderError, Result};
use std::path::Path;

pub const DEFINITION_SUFFIX: &str = ".json";

/// List the `.json` definition files in `dir`, sorted by filename.
///
/// The suffix match is case-sensitive and entries are not filtered by file
/// type; anything unreadable surfaces later as a per-file error.
pub async fn discover_definitions(dir: &Path) -> Result<Vec<DefinitionFile>> {
    if !tokio::fs::metadata(dir)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        return Err(LoaderError::DirectoryNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut filenames = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            tracing::debug!("Ignoring non UTF-8 file name in {}", dir.display());
            continue;
        };
        if name.ends_with(DEFINITION_SUFFIX) {
            filenames.push(name);
        }
    }
    filenames.sort();

    Ok(filenames
        .into_iter()
        .map(|filename| {
            let resource_id = Some(derive_resource_id(&filename)).filter(|id| !id.is_empty());
            DefinitionFile {
                path: dir.join(&filename),
                filename,
                resource_id,
            }
        })
        .collect())
}
