//! Book record and the write-side shapes that feed it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary key of a book row
pub type BookId = i64;

/// Maximum title length, in characters
pub const MAX_TITLE_CHARS: usize = 200;

/// A stored book, as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated input for inserting a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
}

impl NewBook {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            title: title.into(),
            description,
        }
    }
}

/// Validated partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl BookChanges {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
        }
    }

    pub fn description(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none()
    }
}

/// Pagination and filter for listing books
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookListQuery {
    pub skip: u32,
    pub limit: u32,
    /// Case-insensitive substring match on title
    pub title_contains: Option<String>,
}

impl BookListQuery {
    pub const DEFAULT_LIMIT: u32 = 10;
    pub const MAX_LIMIT: u32 = 100;
}

impl Default for BookListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: Self::DEFAULT_LIMIT,
            title_contains: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_book_serialization_shape() {
        let book = Book {
            id: 1,
            title: "Dune".to_string(),
            description: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Dune");
        assert!(json["description"].is_null());
        assert_eq!(json["created_at"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_changes_helpers() {
        assert!(BookChanges::default().is_empty());
        assert_eq!(BookChanges::title("A").title.as_deref(), Some("A"));
        assert!(BookChanges::description("d").title.is_none());
    }

    #[test]
    fn test_list_query_defaults() {
        let query = BookListQuery::default();
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 10);
        assert!(query.title_contains.is_none());
    }
}
