//! Create `blog_posts` table.
//!
//! Comments and read time live in JSON columns; the author reference is a
//! plain uuid with no foreign key, so author deletion leaves orphaned
//! references that are resolved best-effort at read time.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPost::Table)
                    .if_not_exists()
                    .col(uuid(BlogPost::Id).primary_key())
                    .col(string_len(BlogPost::Category, 128).not_null())
                    .col(string_len(BlogPost::Title, 255).not_null())
                    .col(text(BlogPost::Content).not_null())
                    .col(string_null(BlogPost::Cover))
                    .col(json_binary_null(BlogPost::ReadTime))
                    .col(uuid_null(BlogPost::AuthorId))
                    .col(json_binary(BlogPost::Comments).not_null())
                    .col(timestamp_with_time_zone(BlogPost::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(BlogPost::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPost::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BlogPost {
    #[sea_orm(iden = "blog_posts")]
    Table,
    Id,
    Category,
    Title,
    Content,
    Cover,
    ReadTime,
    AuthorId,
    Comments,
    CreatedAt,
    UpdatedAt,
}
