use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a single blog post document.
///
/// Every content field is optional; a post with no title, no author and an
/// empty tag list is valid. The id is generated once at creation and never
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The writable fields of a post, as accepted by create and update.
///
/// Updates replace all four fields in one set-operation, so absent fields
/// clear their stored counterparts rather than leaving them untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub contents: Option<String>,
    pub tags: Vec<String>,
}

impl Post {
    /// Create a new post with a generated id and fresh timestamps.
    pub fn new(fields: PostFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: fields.title,
            author: fields.author,
            contents: fields.contents,
            tags: fields.tags,
            created_at: now,
            updated_at: now,
        }
    }
}
