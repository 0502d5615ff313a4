//! Domain entities - the core business objects.

mod author;

mod blog_post;

mod comment;

pub use author::{Author, AuthorPatch, NewAuthor, placeholder_avatar};
pub use blog_post::{BlogPost, NewBlogPost, PostPatch, ReadTime};
pub use comment::{Comment, NewComment};
