// Filesystem script adapter - Script files on local disk

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Reads and writes scripts in the JSON interchange format
#[derive(Debug, Default, Clone)]
pub struct FsScriptStore;

impl FsScriptStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ScriptStorePort for FsScriptStore {
    async fn load(&self, path: &Path) -> Result<Script, DomainError> {
        debug!("Reading script from {}", path.display());
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            DomainError::Fs(format!("Failed to read script {}: {}", path.display(), e))
        })?;

        Script::from_json(&text).map_err(|e| match e {
            DomainError::MalformedScript(reason) => {
                DomainError::MalformedScript(format!("{}: {}", path.display(), reason))
            }
            other => other,
        })
    }

    async fn save(&self, script: &Script, path: &Path) -> Result<(), DomainError> {
        let text = script.to_json()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::Fs(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        tokio::fs::write(path, text).await.map_err(|e| {
            DomainError::Fs(format!("Failed to write script {}: {}", path.display(), e))
        })?;
        info!("Script saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load_in_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scripts/drafts/template.json");
        let store = FsScriptStore::new();
        let template = create_template();

        store.save(&template, &path).await.unwrap();
        let loaded = store.load(&path).await.unwrap();

        assert_eq!(loaded, template);
        let on_disk = std::fs::read_to_string(&path).unwrap();
        assert_eq!(on_disk, template.to_json().unwrap());
    }

    #[tokio::test]
    async fn test_missing_file_is_fs_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FsScriptStore::new()
            .load(&dir.path().join("absent.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Fs(_)));
    }

    #[tokio::test]
    async fn test_bad_content_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"title\": 3}").unwrap();

        let err = FsScriptStore::new().load(&path).await.unwrap_err();
        match err {
            DomainError::MalformedScript(reason) => assert!(reason.contains("broken.json")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
