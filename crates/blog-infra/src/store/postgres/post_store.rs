//! Blog post store backed by PostgreSQL.
//!
//! Comment operations load the parent row, edit the embedded JSON array and
//! write the row back. Concurrent comment writes to the same post can race;
//! the last write wins, same as the file backend.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use blog_core::domain::{BlogPost, Comment, PostPatch};
use blog_core::error::StoreError;
use blog_core::ports::{PostQuery, PostStore};

use super::author_store::query_err;
use super::entity::blog_post;

pub struct PostgresPostStore {
    db: DbConn,
}

impl PostgresPostStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn filtered(query: &PostQuery) -> Select<blog_post::Entity> {
        let mut select = blog_post::Entity::find();
        if let Some(title) = &query.title {
            select = select.filter(
                Expr::col(blog_post::Column::Title)
                    .ilike(format!("%{}%", super::author_store::escape_like(title))),
            );
        }
        select
    }

    async fn fetch(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError> {
        let model = blog_post::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(model.map(BlogPost::from))
    }

    async fn store(&self, post: BlogPost) -> Result<BlogPost, StoreError> {
        let updated = blog_post::ActiveModel::from(post)
            .update(&self.db)
            .await
            .map_err(query_err)?;
        Ok(BlogPost::from(updated))
    }
}

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn list(&self, query: &PostQuery) -> Result<(Vec<BlogPost>, u64), StoreError> {
        let total = Self::filtered(query)
            .count(&self.db)
            .await
            .map_err(query_err)?;

        let mut select = Self::filtered(query);
        select = if query.newest_first {
            select.order_by_desc(blog_post::Column::CreatedAt)
        } else {
            select.order_by_asc(blog_post::Column::CreatedAt)
        };

        let models = select
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok((models.into_iter().map(BlogPost::from).collect(), total))
    }

    async fn get(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError> {
        self.fetch(id).await
    }

    async fn create(&self, post: BlogPost) -> Result<BlogPost, StoreError> {
        let model = blog_post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(query_err)?;
        Ok(BlogPost::from(model))
    }

    async fn merge(&self, id: Uuid, patch: &PostPatch) -> Result<Option<BlogPost>, StoreError> {
        let Some(mut current) = self.fetch(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut current);
        Ok(Some(self.store(current).await?))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<BlogPost>, StoreError> {
        let Some(current) = self.fetch(id).await? else {
            return Ok(None);
        };
        blog_post::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(Some(current))
    }

    async fn push_comment(
        &self,
        post_id: Uuid,
        comment: Comment,
    ) -> Result<Option<Comment>, StoreError> {
        let Some(mut post) = self.fetch(post_id).await? else {
            return Ok(None);
        };
        post.comments.push(comment.clone());
        post.updated_at = Utc::now();
        self.store(post).await?;
        Ok(Some(comment))
    }

    async fn pull_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<Option<Comment>, StoreError> {
        let Some(mut post) = self.fetch(post_id).await? else {
            return Ok(None);
        };
        let Some(index) = post.comments.iter().position(|c| c.id == comment_id) else {
            return Ok(None);
        };
        let removed = post.comments.remove(index);
        post.updated_at = Utc::now();
        self.store(post).await?;
        Ok(Some(removed))
    }
}
