use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Authors: name search
        manager
            .create_index(
                Index::create()
                    .name("idx_author_name")
                    .table(Author::Table)
                    .col(Author::Name)
                    .to_owned(),
            )
            .await?;

        // BlogPosts: author reference lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_author")
                    .table(BlogPost::Table)
                    .col(BlogPost::AuthorId)
                    .to_owned(),
            )
            .await?;

        // BlogPosts: newest-first listings
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_post_created")
                    .table(BlogPost::Table)
                    .col(BlogPost::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_author_name")
                    .table(Author::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_blog_post_author")
                    .table(BlogPost::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_blog_post_created")
                    .table(BlogPost::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Author {
    #[sea_orm(iden = "authors")]
    Table,
    Name,
}

#[derive(DeriveIden)]
enum BlogPost {
    #[sea_orm(iden = "blog_posts")]
    Table,
    AuthorId,
    CreatedAt,
}
