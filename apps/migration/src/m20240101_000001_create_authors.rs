//! Create `authors` table.
//!
//! Email is validated syntactically at the API layer but deliberately not
//! unique here.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Author::Table)
                    .if_not_exists()
                    .col(uuid(Author::Id).primary_key())
                    .col(string_len(Author::Name, 128).not_null())
                    .col(string_len(Author::Surname, 128).not_null())
                    .col(string_len(Author::Email, 255).not_null())
                    .col(string_len(Author::BirthDate, 32).not_null())
                    .col(string(Author::Avatar).not_null())
                    .col(boolean(Author::IsAdmin).not_null().default(false))
                    .col(timestamp_with_time_zone(Author::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Author::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Author::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Author {
    #[sea_orm(iden = "authors")]
    Table,
    Id,
    Name,
    Surname,
    Email,
    BirthDate,
    Avatar,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
}
