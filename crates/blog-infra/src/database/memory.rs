//! In-memory post store - used when no database is configured, and as the
//! test double for service-level tests.

use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Post, PostFields};
use blog_core::error::RepoError;
use blog_core::ports::{ListOptions, PostFilter, PostRepository, SortKey, SortOrder};

/// In-memory post store using a HashMap behind an async RwLock.
///
/// Note: data is lost on process restart.
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            posts: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn compare(a: &Post, b: &Post, key: SortKey) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortKey::Title => a.title.cmp(&b.title),
        SortKey::Author => a.author.cmp(&b.author),
    }
}

fn matches(post: &Post, filter: &PostFilter) -> bool {
    if let Some(author) = &filter.author {
        if post.author.as_deref() != Some(author.as_str()) {
            return false;
        }
    }
    if let Some(tag) = &filter.tag {
        if !post.tags.iter().any(|t| t == tag) {
            return false;
        }
    }
    true
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn insert(&self, new_post: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        posts.insert(new_post.id, new_post.clone());
        Ok(new_post)
    }

    async fn find(
        &self,
        filter: PostFilter,
        options: &ListOptions,
    ) -> Result<Vec<Post>, RepoError> {
        let posts = self.posts.read().await;
        let mut found: Vec<Post> = posts
            .values()
            .filter(|post| matches(post, &filter))
            .cloned()
            .collect();

        found.sort_by(|a, b| match options.sort_order {
            SortOrder::Ascending => compare(a, b, options.sort_by),
            SortOrder::Descending => compare(b, a, options.sort_by),
        });

        Ok(found)
    }

    async fn find_and_delete(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(&id))
    }

    async fn update(&self, id: Uuid, fields: PostFields) -> Result<Option<Post>, RepoError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.get_mut(&id) else {
            return Ok(None);
        };

        post.title = fields.title;
        post.author = fields.author;
        post.contents = fields.contents;
        post.tags = fields.tags;
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError> {
        let mut posts = self.posts.write().await;
        Ok(posts.remove(&id).map(|_| 1).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str) -> PostFields {
        PostFields {
            title: Some(title.to_string()),
            ..PostFields::default()
        }
    }

    #[tokio::test]
    async fn insert_and_find() {
        let repo = InMemoryPostRepository::new();
        repo.insert(Post::new(fields("one"))).await.unwrap();

        let all = repo
            .find(PostFilter::default(), &ListOptions::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].title.as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn delete_reports_removed_count() {
        let repo = InMemoryPostRepository::new();
        let post = repo.insert(Post::new(fields("one"))).await.unwrap();

        assert_eq!(repo.delete(post.id).await.unwrap(), 1);
        assert_eq!(repo.delete(post.id).await.unwrap(), 0);
    }
}
