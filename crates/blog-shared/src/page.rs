//! Pagination envelope: normalized skip/limit plus prev/current/next links
//! computed against the total count of the unpaginated filtered set.

use serde::{Deserialize, Serialize};

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// Raw pagination parameters as they arrive on the query string.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl PageQuery {
    /// Clamp to sane values: limit defaults to 20, capped at 100.
    pub fn normalize(self) -> (u64, u64) {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (skip, limit)
    }
}

/// Links to the previous/current/next pages of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    pub current: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl PageLinks {
    pub fn build(base: &str, skip: u64, limit: u64, total: u64) -> Self {
        let page = |skip: u64| format!("{base}?skip={skip}&limit={limit}");
        let previous = (skip > 0).then(|| page(skip.saturating_sub(limit)));
        let next = (skip + limit < total).then(|| page(skip + limit));
        Self {
            previous,
            current: page(skip),
            next,
        }
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Count of the filtered set before pagination was applied.
    pub total: u64,
    pub links: PageLinks,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, base: &str, skip: u64, limit: u64) -> Self {
        Self {
            total,
            links: PageLinks::build(base, skip, limit, total),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_defaults_and_caps() {
        let (skip, limit) = PageQuery::default().normalize();
        assert_eq!((skip, limit), (0, 20));

        let (_, limit) = PageQuery {
            skip: None,
            limit: Some(1000),
        }
        .normalize();
        assert_eq!(limit, 100);

        let (_, limit) = PageQuery {
            skip: None,
            limit: Some(0),
        }
        .normalize();
        assert_eq!(limit, 1);
    }

    #[test]
    fn first_page_has_no_previous() {
        let links = PageLinks::build("/authors", 0, 10, 25);
        assert!(links.previous.is_none());
        assert_eq!(links.current, "/authors?skip=0&limit=10");
        assert_eq!(links.next.as_deref(), Some("/authors?skip=10&limit=10"));
    }

    #[test]
    fn last_page_has_no_next() {
        let links = PageLinks::build("/authors", 20, 10, 25);
        assert_eq!(links.previous.as_deref(), Some("/authors?skip=10&limit=10"));
        assert!(links.next.is_none());
    }

    #[test]
    fn single_page_has_neither() {
        let links = PageLinks::build("/blogPosts", 0, 20, 5);
        assert!(links.previous.is_none());
        assert!(links.next.is_none());
    }
}
