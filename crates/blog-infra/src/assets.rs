//! Filesystem-backed asset storage for uploaded images.
//!
//! Files are named after their owner so re-uploading replaces the previous
//! asset in place. The returned value is the public URL path the API serves
//! the file under, not the filesystem location.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use blog_core::ports::{AssetError, AssetScope, AssetStore};

pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

fn extension(filename: &str) -> &str {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("bin")
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn save(
        &self,
        scope: AssetScope,
        owner: Uuid,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AssetError> {
        if bytes.is_empty() {
            return Err(AssetError::Rejected("empty upload".to_string()));
        }

        let file_name = format!("{}.{}", owner, extension(filename));
        let dir = self.root.join(scope.dir());
        tokio::fs::create_dir_all(&dir).await?;
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        tracing::debug!(scope = scope.dir(), %owner, "stored uploaded asset");
        Ok(format!("/media/{}/{}", scope.dir(), file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_root() -> PathBuf {
        std::env::temp_dir().join(format!("blog_assets_{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn save_writes_file_and_returns_public_path() {
        let root = tmp_root();
        let store = FsAssetStore::new(&root);
        let owner = Uuid::new_v4();

        let url = store
            .save(AssetScope::Avatars, owner, "selfie.png", vec![1, 2, 3])
            .await
            .unwrap();

        assert_eq!(url, format!("/media/authors/{owner}.png"));
        let on_disk = tokio::fs::read(root.join("authors").join(format!("{owner}.png")))
            .await
            .unwrap();
        assert_eq!(on_disk, vec![1, 2, 3]);
        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn reupload_replaces_previous_asset() {
        let root = tmp_root();
        let store = FsAssetStore::new(&root);
        let owner = Uuid::new_v4();

        store
            .save(AssetScope::Covers, owner, "a.jpg", vec![1])
            .await
            .unwrap();
        store
            .save(AssetScope::Covers, owner, "b.jpg", vec![2, 2])
            .await
            .unwrap();

        let on_disk = tokio::fs::read(root.join("blogs").join(format!("{owner}.jpg")))
            .await
            .unwrap();
        assert_eq!(on_disk, vec![2, 2]);
        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn empty_upload_is_rejected() {
        let store = FsAssetStore::new(tmp_root());
        let result = store
            .save(AssetScope::Avatars, Uuid::new_v4(), "x.png", Vec::new())
            .await;
        assert!(matches!(result, Err(AssetError::Rejected(_))));
    }

    #[tokio::test]
    async fn missing_extension_falls_back_to_bin() {
        let root = tmp_root();
        let store = FsAssetStore::new(&root);
        let owner = Uuid::new_v4();

        let url = store
            .save(AssetScope::Avatars, owner, "upload", vec![9])
            .await
            .unwrap();
        assert_eq!(url, format!("/media/authors/{owner}.bin"));
        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
