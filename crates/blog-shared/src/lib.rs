//! # Blog Shared
//!
//! Response envelopes and DTOs shared between the server and clients.

pub mod dto;
pub mod page;
pub mod response;

pub use dto::{BlogPostResponse, CommentResponse};
pub use page::{Page, PageLinks, PageQuery};
pub use response::{ApiResponse, ErrorResponse};
