//! Blog data models
//!
//! Defines the blog record as exposed to clients, its storage row, and the
//! validated inputs accepted by the store.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Unique identifier for a blog record
pub type BlogId = String;

/// A stored blog post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    /// Unique identifier, assigned by the store on creation
    pub id: BlogId,
    /// Title of the post
    pub title: String,
    /// Author of the post, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Link to the post
    pub url: String,
    /// Number of likes
    #[serde(default)]
    pub likes: u64,
}

impl Blog {
    /// Generate a new unique ID for a blog record
    /// Uses UUID v4 for uniqueness
    pub fn generate_id() -> BlogId {
        Uuid::new_v4().to_string()
    }
}

/// Raw `blogs` table row
///
/// SQLite stores integers as `i64`; conversion to [`Blog`] checks the sign.
#[derive(Debug, Clone, FromRow)]
pub struct BlogRow {
    /// Record ID
    pub id: String,
    /// Title
    pub title: String,
    /// Author, NULL when unknown
    pub author: Option<String>,
    /// URL
    pub url: String,
    /// Like count as stored
    pub likes: i64,
}

impl TryFrom<BlogRow> for Blog {
    type Error = anyhow::Error;

    fn try_from(row: BlogRow) -> Result<Self, Self::Error> {
        let likes = u64::try_from(row.likes)
            .map_err(|_| anyhow::anyhow!("Blog {} has negative likes: {}", row.id, row.likes))?;

        Ok(Self {
            id: row.id,
            title: row.title,
            author: row.author,
            url: row.url,
            likes,
        })
    }
}

/// Validated fields for a record about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    /// Title of the post (non-empty)
    pub title: String,
    /// Author of the post
    pub author: Option<String>,
    /// Link to the post (non-empty)
    pub url: String,
    /// Initial like count
    pub likes: u64,
}

/// Validated partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogChanges {
    /// New title
    pub title: Option<String>,
    /// New author
    pub author: Option<String>,
    /// New URL
    pub url: Option<String>,
    /// New like count
    pub likes: Option<u64>,
}

impl BlogChanges {
    /// Whether no field would change
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.url.is_none() && self.likes.is_none()
    }
}
