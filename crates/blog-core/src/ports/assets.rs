use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

/// Where an uploaded asset belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetScope {
    /// Author avatars.
    Avatars,
    /// Blog post covers.
    Covers,
}

impl AssetScope {
    /// Entity-scoped subfolder the asset lands in.
    pub fn dir(&self) -> &'static str {
        match self {
            AssetScope::Avatars => "authors",
            AssetScope::Covers => "blogs",
        }
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Asset write failed: {0}")]
    Io(String),

    #[error("Rejected upload: {0}")]
    Rejected(String),
}

impl From<std::io::Error> for AssetError {
    fn from(err: std::io::Error) -> Self {
        AssetError::Io(err.to_string())
    }
}

/// Storage for uploaded images. Returns the URL/path the owning record
/// should reference.
#[async_trait]
pub trait AssetStore: Send + Sync {
    async fn save(
        &self,
        scope: AssetScope,
        owner: Uuid,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AssetError>;
}
