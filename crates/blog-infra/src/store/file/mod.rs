//! JSON-file Entity Store backend.
//!
//! One array document per collection (`authors.json`, `blogs.json`) under a
//! data directory, mirroring the flat-file persistence mode. Filtering,
//! sorting and pagination happen in memory after a whole-collection read.

mod collection;

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use blog_core::domain::{Author, AuthorPatch, BlogPost, Comment, PostPatch};
use blog_core::error::StoreError;
use blog_core::ports::{AuthorQuery, AuthorStore, PostQuery, PostStore};

pub use collection::JsonCollection;

fn page<T>(mut items: Vec<T>, skip: u64, limit: u64) -> Vec<T> {
    let skip = (skip as usize).min(items.len());
    let mut items = items.split_off(skip);
    items.truncate(limit as usize);
    items
}

/// Author collection stored in `authors.json`.
pub struct FileAuthorStore {
    authors: JsonCollection<Author>,
}

impl FileAuthorStore {
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            authors: JsonCollection::open(data_dir.join("authors.json")).await?,
        })
    }
}

#[async_trait]
impl AuthorStore for FileAuthorStore {
    async fn list(&self, query: &AuthorQuery) -> Result<(Vec<Author>, u64), StoreError> {
        let mut authors = self.authors.read().await?;
        if let Some(name) = &query.name {
            let needle = name.to_lowercase();
            authors.retain(|author| author.name.to_lowercase().contains(&needle));
        }
        let total = authors.len() as u64;
        authors.sort_by_key(|author| author.created_at);
        if query.newest_first {
            authors.reverse();
        }
        Ok((page(authors, query.skip, query.limit), total))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Author>, StoreError> {
        let authors = self.authors.read().await?;
        Ok(authors.into_iter().find(|author| author.id == id))
    }

    async fn get_many(&self, ids: &[Uuid]) -> Result<Vec<Author>, StoreError> {
        let authors = self.authors.read().await?;
        Ok(authors
            .into_iter()
            .filter(|author| ids.contains(&author.id))
            .collect())
    }

    async fn all(&self) -> Result<Vec<Author>, StoreError> {
        self.authors.read().await
    }

    async fn create(&self, author: Author) -> Result<Author, StoreError> {
        self.authors
            .mutate(|authors| {
                authors.push(author.clone());
                (author, true)
            })
            .await
    }

    async fn merge(&self, id: Uuid, patch: &AuthorPatch) -> Result<Option<Author>, StoreError> {
        self.authors
            .mutate(|authors| {
                match authors.iter_mut().find(|author| author.id == id) {
                    Some(author) => {
                        patch.apply(author);
                        (Some(author.clone()), true)
                    }
                    None => (None, false),
                }
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Author>, StoreError> {
        self.authors
            .mutate(|authors| {
                match authors.iter().position(|author| author.id == id) {
                    Some(index) => (Some(authors.remove(index)), true),
                    None => (None, false),
                }
            })
            .await
    }
}

/// Blog post collection stored in `blogs.json`. Comments travel inside
/// their parent post, so deleting a post cascades them for free.
pub struct FilePostStore {
    posts: JsonCollection<BlogPost>,
}

impl FilePostStore {
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            posts: JsonCollection::open(data_dir.join("blogs.json")).await?,
        })
    }
}

#[async_trait]
impl PostStore for FilePostStore {
    async fn list(&self, query: &PostQuery) -> Result<(Vec<BlogPost>, u64), StoreError> {
        let mut posts = self.posts.read().await?;
        if let Some(title) = &query.title {
            let needle = title.to_lowercase();
            posts.retain(|post| post.title.to_lowercase().contains(&needle));
        }
        let total = posts.len() as u64;
        posts.sort_by_key(|post| post.created_at);
        if query.newest_first {
            posts.reverse();
        }
        Ok((page(posts, query.skip, query.limit), total))
    }

    async fn get(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError> {
        let posts = self.posts.read().await?;
        Ok(posts.into_iter().find(|post| post.id == id))
    }

    async fn create(&self, post: BlogPost) -> Result<BlogPost, StoreError> {
        self.posts
            .mutate(|posts| {
                posts.push(post.clone());
                (post, true)
            })
            .await
    }

    async fn merge(&self, id: Uuid, patch: &PostPatch) -> Result<Option<BlogPost>, StoreError> {
        self.posts
            .mutate(|posts| match posts.iter_mut().find(|post| post.id == id) {
                Some(post) => {
                    patch.apply(post);
                    (Some(post.clone()), true)
                }
                None => (None, false),
            })
            .await
    }

    async fn delete(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError> {
        self.posts
            .mutate(|posts| match posts.iter().position(|post| post.id == id) {
                Some(index) => (Some(posts.remove(index)), true),
                None => (None, false),
            })
            .await
    }

    async fn push_comment(
        &self,
        post_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Comment>, StoreError> {
        self.posts
            .mutate(|posts| match posts.iter_mut().find(|post| post.id == post_id) {
                Some(post) => {
                    post.comments.push(comment.clone());
                    post.updated_at = Utc::now();
                    (Some(comment), true)
                }
                None => (None, false),
            })
            .await
    }

    async fn pull_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, StoreError> {
        self.posts
            .mutate(|posts| {
                let Some(post) = posts.iter_mut().find(|post| post.id == post_id) else {
                    return (None, false);
                };
                match post.comments.iter().position(|c| c.id == comment_id) {
                    Some(index) => {
                        let removed = post.comments.remove(index);
                        post.updated_at = Utc::now();
                        (Some(removed), true)
                    }
                    None => (None, false),
                }
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::{NewAuthor, NewBlogPost, NewComment};
    use std::path::PathBuf;

    fn tmp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("blog_store_{}", Uuid::new_v4()))
    }

    fn author(name: &str) -> Author {
        Author::new(NewAuthor {
            name: name.to_string(),
            surname: "Doe".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            birth_date: "1990-01-01".to_string(),
            avatar: None,
            is_admin: None,
        })
    }

    fn post(title: &str) -> BlogPost {
        BlogPost::new(
            NewBlogPost {
                category: "rust".to_string(),
                title: title.to_string(),
                content: "content".to_string(),
                cover: None,
                read_time: None,
                author: None,
            },
            None,
        )
    }

    #[tokio::test]
    async fn create_then_get_roundtrip() {
        let dir = tmp_dir();
        let store = FileAuthorStore::open(&dir).await.unwrap();
        let created = store.create(author("Jane")).await.unwrap();
        let fetched = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn merge_leaves_unspecified_fields_untouched() {
        let dir = tmp_dir();
        let store = FileAuthorStore::open(&dir).await.unwrap();
        let created = store.create(author("Jane")).await.unwrap();

        let patch = AuthorPatch {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        let updated = store.merge(created.id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.email, "new@example.com");
        assert_eq!(updated.name, "Jane");
        assert_eq!(updated.birth_date, created.birth_date);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn delete_unknown_id_is_none_and_mutates_nothing() {
        let dir = tmp_dir();
        let store = FileAuthorStore::open(&dir).await.unwrap();
        store.create(author("Jane")).await.unwrap();

        assert!(store.delete(Uuid::new_v4()).await.unwrap().is_none());
        assert_eq!(store.all().await.unwrap().len(), 1);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn list_total_counts_filtered_set_before_pagination() {
        let dir = tmp_dir();
        let store = FileAuthorStore::open(&dir).await.unwrap();
        for name in ["Anna", "Annabel", "Hannah", "Bob"] {
            store.create(author(name)).await.unwrap();
        }

        let (items, total) = store
            .list(&AuthorQuery {
                name: Some("ann".to_string()),
                skip: 0,
                limit: 2,
                newest_first: false,
            })
            .await
            .unwrap();
        // Anna, Annabel, Hannah all contain "ann" case-insensitively.
        assert_eq!(total, 3);
        assert_eq!(items.len(), 2);
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn recent_posts_come_newest_first() {
        let dir = tmp_dir();
        let store = FilePostStore::open(&dir).await.unwrap();
        for title in ["first", "second", "third"] {
            store.create(post(title)).await.unwrap();
        }

        let (items, total) = store
            .list(&PostQuery {
                title: None,
                skip: 0,
                limit: 2,
                newest_first: true,
            })
            .await
            .unwrap();
        assert_eq!(total, 3);
        assert_eq!(items[0].title, "third");
        assert_eq!(items[1].title, "second");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn comment_push_and_pull() {
        let dir = tmp_dir();
        let store = FilePostStore::open(&dir).await.unwrap();
        let created = store.create(post("with comments")).await.unwrap();

        let comment = Comment::new(NewComment {
            text: "first!".to_string(),
            author: None,
            rating: None,
        });
        let keeper = Comment::new(NewComment {
            text: "second".to_string(),
            author: None,
            rating: Some(4),
        });
        store.push_comment(created.id, comment.clone()).await.unwrap();
        store.push_comment(created.id, keeper.clone()).await.unwrap();

        let stored = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored.comments.len(), 2);
        assert_eq!(stored.comments[0].text, "first!");

        let removed = store
            .pull_comment(created.id, comment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(removed.id, comment.id);

        // only the targeted comment is gone, the parent is intact
        let stored = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored.comments.len(), 1);
        assert_eq!(stored.comments[0].id, keeper.id);
        assert_eq!(stored.title, "with comments");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn concurrent_writers_never_corrupt_the_document() {
        let dir = tmp_dir();
        let store = std::sync::Arc::new(FileAuthorStore::open(&dir).await.unwrap());
        let seeded = store.create(author("Seed")).await.unwrap();

        // Several tasks mutate the same collection at once; the mutex must
        // serialize them so every write lands and the file stays parseable.
        let mut handles = Vec::new();
        for batch in 0..4 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                for i in 0..10 {
                    store
                        .create(author(&format!("Writer{batch}x{i}")))
                        .await
                        .unwrap();
                }
            }));
        }
        let merger = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..10 {
                    let patch = AuthorPatch {
                        email: Some(format!("seed{i}@example.com")),
                        ..Default::default()
                    };
                    assert!(store.merge(seeded.id, &patch).await.unwrap().is_some());
                }
            })
        };
        for handle in handles {
            handle.await.unwrap();
        }
        merger.await.unwrap();

        // The raw document still parses and holds every write.
        let bytes = tokio::fs::read(dir.join("authors.json")).await.unwrap();
        let parsed: Vec<Author> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed.len(), 41);
        let merged = parsed.iter().find(|a| a.id == seeded.id).unwrap();
        assert_eq!(merged.email, "seed9@example.com");
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn comment_ops_on_missing_post_are_none() {
        let dir = tmp_dir();
        let store = FilePostStore::open(&dir).await.unwrap();
        let comment = Comment::new(NewComment {
            text: "orphan".to_string(),
            author: None,
            rating: None,
        });
        assert!(store
            .push_comment(Uuid::new_v4(), comment)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .pull_comment(Uuid::new_v4(), Uuid::new_v4())
            .await
            .unwrap()
            .is_none());
        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
