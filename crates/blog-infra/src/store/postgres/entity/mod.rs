//! SeaORM entities for the database backend.

pub mod author;
pub mod blog_post;
