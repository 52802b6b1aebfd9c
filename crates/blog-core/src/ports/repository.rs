use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostFields};
use crate::error::RepoError;

/// Field a post listing is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Author,
}

impl SortKey {
    /// Parse a wire-format field name (`createdAt`, `updatedAt`, `title`,
    /// `author`). Unknown names are rejected so callers can answer with a
    /// client error instead of silently sorting by nothing.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            _ => None,
        }
    }
}

/// Listing direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    /// Map the legacy encodings to the enum: `ascending`, `asc` and `1`
    /// mean ascending; everything else means descending.
    pub fn from_legacy(value: &str) -> Self {
        match value {
            "ascending" | "asc" | "1" => Self::Ascending,
            _ => Self::Descending,
        }
    }
}

/// Sort options for post listings. Defaults to newest-first by creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListOptions {
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

/// Exact-match filter applied to post listings.
///
/// `author` matches the author field verbatim; `tag` matches posts whose tag
/// sequence contains the value. An empty filter matches every post.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub author: Option<String>,
    pub tag: Option<String>,
}

impl PostFilter {
    pub fn by_author(author: &str) -> Self {
        Self {
            author: Some(author.to_string()),
            ..Self::default()
        }
    }

    pub fn by_tag(tag: &str) -> Self {
        Self {
            tag: Some(tag.to_string()),
            ..Self::default()
        }
    }
}

/// Post store contract.
///
/// Each operation is individually atomic; no multi-document transactions are
/// assumed. Lookups for unknown ids return `Ok(None)` (or a zero count),
/// never an error.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Persist a new post and return it as stored.
    async fn insert(&self, post: Post) -> Result<Post, RepoError>;

    /// Return all posts matching the filter, ordered per the options.
    async fn find(
        &self,
        filter: PostFilter,
        options: &ListOptions,
    ) -> Result<Vec<Post>, RepoError>;

    /// Remove the post with the given id and return it.
    async fn find_and_delete(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Replace all writable fields of the matching post in one set-update
    /// and return the post-update record.
    async fn update(&self, id: Uuid, fields: PostFields) -> Result<Option<Post>, RepoError>;

    /// Delete the post with the given id, returning the number of records
    /// removed (0 or 1).
    async fn delete(&self, id: Uuid) -> Result<u64, RepoError>;
}
