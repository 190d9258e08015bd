//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// Request to create a short link.
///
/// `url` is optional at the type level so a missing field is reported as an
/// invalid URL rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: Option<String>,

    /// Optional custom code; empty or absent means generate one.
    #[serde(default)]
    pub code: Option<String>,
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LinkResponse {
    pub code: String,
    pub url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub last_clicked: Option<DateTime<Utc>>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            url: link.url,
            clicks: link.clicks,
            created_at: link.created_at,
            last_clicked: link.last_clicked,
        }
    }
}

/// Acknowledgement body for operations without a payload.
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
