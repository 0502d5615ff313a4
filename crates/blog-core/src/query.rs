//! Read-time population of author references.
//!
//! Posts and comments store the author as an id; responses inline only the
//! whitelisted `{name, avatar}` projection. The id itself is deliberately
//! omitted from the inlined shape, and unresolved references degrade to an
//! absent author rather than failing the read.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Author, BlogPost};

/// The inlined author projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorCard {
    pub name: String,
    pub avatar: String,
}

impl From<&Author> for AuthorCard {
    fn from(author: &Author) -> Self {
        Self {
            name: format!("{} {}", author.name, author.surname),
            avatar: author.avatar.clone(),
        }
    }
}

/// Lookup table for resolving author references in one batch.
#[derive(Debug, Default)]
pub struct AuthorLookup {
    cards: HashMap<Uuid, AuthorCard>,
}

impl AuthorLookup {
    pub fn new(authors: &[Author]) -> Self {
        Self {
            cards: authors
                .iter()
                .map(|author| (author.id, AuthorCard::from(author)))
                .collect(),
        }
    }

    /// Resolve a reference; dangling ids yield `None`.
    pub fn resolve(&self, id: Option<Uuid>) -> Option<AuthorCard> {
        id.and_then(|id| self.cards.get(&id).cloned())
    }
}

/// Every author id referenced by the given posts or their comments,
/// deduplicated, ready for a batched `get_many`.
pub fn referenced_author_ids(posts: &[BlogPost]) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = posts
        .iter()
        .flat_map(|post| {
            post.author
                .into_iter()
                .chain(post.comments.iter().filter_map(|comment| comment.author))
        })
        .collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}
