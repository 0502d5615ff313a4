use std::marker::PhantomData;
use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::fs;
use tokio::sync::Mutex;

use blog_core::error::StoreError;

/// A collection persisted as one JSON array document on disk.
///
/// Every mutating operation reads the entire file, applies the change in
/// memory and rewrites the whole document (write-to-temp + rename, so a
/// reader never observes a partial file). This makes writes O(collection
/// size) and assumes a single writing process: two processes mutating the
/// same file interleave as last-write-wins and one update is lost. Within
/// one process a mutex serializes access, so the document always stays
/// syntactically valid.
pub struct JsonCollection<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<T>,
}

impl<T> JsonCollection<T>
where
    T: Serialize + DeserializeOwned + Send,
{
    /// Open a collection file, creating it as an empty array if missing.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        if fs::metadata(&path).await.is_err() {
            fs::write(&path, b"[]")
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
            _marker: PhantomData,
        })
    }

    async fn load(&self) -> Result<Vec<T>, StoreError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt(e.to_string()))
    }

    async fn persist(&self, items: &[T]) -> Result<(), StoreError> {
        let data =
            serde_json::to_vec_pretty(items).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, data)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    /// Read the whole collection.
    pub async fn read(&self) -> Result<Vec<T>, StoreError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Read-modify-rewrite. The closure returns its result plus whether the
    /// collection changed; the file is only rewritten on change.
    pub async fn mutate<R, F>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&mut Vec<T>) -> (R, bool) + Send,
        R: Send,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        let (result, changed) = f(&mut items);
        if changed {
            self.persist(&items).await?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp_path() -> PathBuf {
        std::env::temp_dir().join(format!("json_collection_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn open_creates_empty_array() {
        let path = tmp_path();
        let col = JsonCollection::<String>::open(&path).await.unwrap();
        assert!(col.read().await.unwrap().is_empty());
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn mutations_persist_across_reopen() {
        let path = tmp_path();
        let col = JsonCollection::<String>::open(&path).await.unwrap();
        col.mutate(|items| {
            items.push("a".to_string());
            items.push("b".to_string());
            ((), true)
        })
        .await
        .unwrap();

        let reopened = JsonCollection::<String>::open(&path).await.unwrap();
        assert_eq!(reopened.read().await.unwrap(), vec!["a", "b"]);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn unchanged_mutation_skips_rewrite() {
        let path = tmp_path();
        let col = JsonCollection::<String>::open(&path).await.unwrap();
        col.mutate(|items| {
            items.push("a".to_string());
            ((), true)
        })
        .await
        .unwrap();
        let before = fs::metadata(&path).await.unwrap().modified().unwrap();

        let found = col
            .mutate(|items| (items.iter().any(|i| i == "missing"), false))
            .await
            .unwrap();
        assert!(!found);
        let after = fs::metadata(&path).await.unwrap().modified().unwrap();
        assert_eq!(before, after);
        let _ = fs::remove_file(&path).await;
    }

    #[tokio::test]
    async fn file_stays_valid_json_under_many_writes() {
        let path = tmp_path();
        let col = JsonCollection::<u32>::open(&path).await.unwrap();
        for i in 0..50 {
            col.mutate(|items| {
                items.push(i);
                ((), true)
            })
            .await
            .unwrap();
        }
        let bytes = fs::read(&path).await.unwrap();
        let parsed: Vec<u32> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.len(), 50);
        let _ = fs::remove_file(&path).await;
    }
}
