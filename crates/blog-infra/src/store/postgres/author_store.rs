//! Author store backed by PostgreSQL.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select,
};
use uuid::Uuid;

use blog_core::domain::{Author, AuthorPatch};
use blog_core::error::StoreError;
use blog_core::ports::{AuthorQuery, AuthorStore};

use super::entity::author;

pub(super) fn query_err(err: sea_orm::DbErr) -> StoreError {
    StoreError::Query(err.to_string())
}

pub struct PostgresAuthorStore {
    db: DbConn,
}

impl PostgresAuthorStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    fn filtered(query: &AuthorQuery) -> Select<author::Entity> {
        let mut select = author::Entity::find();
        if let Some(name) = &query.name {
            select = select
                .filter(Expr::col(author::Column::Name).ilike(format!("%{}%", escape_like(name))));
        }
        select
    }
}

/// Escape LIKE metacharacters so user input matches literally.
pub(super) fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait]
impl AuthorStore for PostgresAuthorStore {
    async fn list(&self, query: &AuthorQuery) -> Result<(Vec<Author>, u64), StoreError> {
        let total = Self::filtered(query)
            .count(&self.db)
            .await
            .map_err(query_err)?;

        let mut select = Self::filtered(query);
        select = if query.newest_first {
            select.order_by_desc(author::Column::CreatedAt)
        } else {
            select.order_by_asc(author::Column::CreatedAt)
        };

        let models = select
            .offset(query.skip)
            .limit(query.limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok((models.into_iter().map(Author::from).collect(), total))
    }

    async fn get(&self, id: Uuid) -> Result<Option<Author>, StoreError> {
        let model = author::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(model.map(Author::from))
    }

    async fn get_many(&self, ids: &[Uuid]) -> Result<Vec<Author>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = author::Entity::find()
            .filter(author::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(models.into_iter().map(Author::from).collect())
    }

    async fn all(&self) -> Result<Vec<Author>, StoreError> {
        let models = author::Entity::find()
            .order_by_asc(author::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(models.into_iter().map(Author::from).collect())
    }

    async fn create(&self, new_author: Author) -> Result<Author, StoreError> {
        let model = author::ActiveModel::from(new_author)
            .insert(&self.db)
            .await
            .map_err(query_err)?;
        Ok(Author::from(model))
    }

    async fn merge(&self, id: Uuid, patch: &AuthorPatch) -> Result<Option<Author>, StoreError> {
        let Some(model) = author::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        let mut current = Author::from(model);
        patch.apply(&mut current);

        let updated = author::ActiveModel::from(current)
            .update(&self.db)
            .await
            .map_err(query_err)?;
        Ok(Some(Author::from(updated)))
    }

    async fn delete(&self, id: Uuid) -> Result<Option<Author>, StoreError> {
        let Some(model) = author::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?
        else {
            return Ok(None);
        };

        author::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        Ok(Some(Author::from(model)))
    }
}
