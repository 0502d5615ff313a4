//! Blog post entity for SeaORM.
//!
//! Comments and read time are JSON columns: comments are embedded in their
//! parent document, so a post delete cascades them in the same row. The
//! author reference is a plain uuid without a foreign key (orphans are
//! tolerated by design).

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use blog_core::domain::{Comment, ReadTime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub cover: Option<String>,
    pub read_time: Option<Json>,
    pub author_id: Option<Uuid>,
    pub comments: Json,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub(crate) fn comments_to_json(comments: &[Comment]) -> Json {
    serde_json::to_value(comments).unwrap_or_else(|_| Json::Array(Vec::new()))
}

pub(crate) fn comments_from_json(json: Json) -> Vec<Comment> {
    serde_json::from_value(json).unwrap_or_default()
}

/// Conversion from SeaORM Model to domain BlogPost.
impl From<Model> for blog_core::domain::BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            category: model.category,
            title: model.title,
            content: model.content,
            cover: model.cover,
            read_time: model
                .read_time
                .and_then(|json| serde_json::from_value::<ReadTime>(json).ok()),
            author: model.author_id,
            comments: comments_from_json(model.comments),
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain BlogPost to SeaORM ActiveModel.
impl From<blog_core::domain::BlogPost> for ActiveModel {
    fn from(post: blog_core::domain::BlogPost) -> Self {
        Self {
            id: Set(post.id),
            category: Set(post.category),
            title: Set(post.title),
            content: Set(post.content),
            cover: Set(post.cover),
            read_time: Set(post
                .read_time
                .as_ref()
                .and_then(|rt| serde_json::to_value(rt).ok())),
            author_id: Set(post.author),
            comments: Set(comments_to_json(&post.comments)),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}
