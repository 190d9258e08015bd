//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `id` is the insertion sequence and only orders listings; it is never exposed
/// over the API.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a link as it looks right after insertion: no clicks yet.
    pub fn new(id: i64, code: String, url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            url,
            clicks: 0,
            created_at,
            last_clicked: None,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }

    /// Records one redirect at `at`.
    pub fn record_click(&mut self, at: DateTime<Utc>) {
        self.clicks += 1;
        self.last_clicked = Some(at);
    }
}

/// Input data for creating a new link. Both fields are already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub url: String,
}

impl NewLink {
    pub fn new(code: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
        }
    }
}
