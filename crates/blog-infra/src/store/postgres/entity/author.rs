//! Author entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

// email is deliberately not unique: format is validated at write time but
// uniqueness is an unresolved policy question, left unenforced.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "authors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub birth_date: String,
    pub avatar: String,
    pub is_admin: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain Author.
impl From<Model> for blog_core::domain::Author {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            surname: model.surname,
            email: model.email,
            birth_date: model.birth_date,
            avatar: model.avatar,
            is_admin: model.is_admin,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from domain Author to SeaORM ActiveModel.
impl From<blog_core::domain::Author> for ActiveModel {
    fn from(author: blog_core::domain::Author) -> Self {
        Self {
            id: Set(author.id),
            name: Set(author.name),
            surname: Set(author.surname),
            email: Set(author.email),
            birth_date: Set(author.birth_date),
            avatar: Set(author.avatar),
            is_admin: Set(author.is_admin),
            created_at: Set(author.created_at.into()),
            updated_at: Set(author.updated_at.into()),
        }
    }
}
