use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::Path;

/// Writes exports under a base directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        Ok(full_path.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("exports");
        let storage = LocalStorage::new(base.to_string_lossy().into_owned());

        let path = storage.write_file("translations.csv", b"data").await.unwrap();

        assert!(path.ends_with("translations.csv"));
        assert_eq!(std::fs::read(base.join("translations.csv")).unwrap(), b"data");
    }
}
