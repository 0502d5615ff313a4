//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod assets;
mod mailer;
mod render;
mod store;

pub use assets::{AssetError, AssetScope, AssetStore};
pub use mailer::{MailError, Mailer};
pub use render::{PostRenderer, RenderError};
pub use store::{AuthorQuery, AuthorStore, PostQuery, PostStore};
