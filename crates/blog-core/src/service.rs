//! Post service - mediates all reads and writes to the post store.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostFields};
use crate::error::RepoError;
use crate::ports::{ListOptions, PostFilter, PostRepository};

/// The service layer over the post store.
///
/// Holds a store client injected at construction; the service itself carries
/// no other state, performs no validation and does not retry. Store errors
/// propagate unchanged to the caller.
#[derive(Clone)]
pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// Create and persist a new post. Any field may be absent or empty.
    pub async fn create_post(&self, fields: PostFields) -> Result<Post, RepoError> {
        self.repo.insert(Post::new(fields)).await
    }

    /// List every post, sorted per the options.
    pub async fn list_all_posts(&self, options: &ListOptions) -> Result<Vec<Post>, RepoError> {
        self.repo.find(PostFilter::default(), options).await
    }

    /// List posts whose author equals the given value.
    pub async fn list_posts_by_author(
        &self,
        author: &str,
        options: &ListOptions,
    ) -> Result<Vec<Post>, RepoError> {
        self.repo.find(PostFilter::by_author(author), options).await
    }

    /// List posts whose tag sequence contains the given tag.
    pub async fn list_posts_by_tag(
        &self,
        tag: &str,
        options: &ListOptions,
    ) -> Result<Vec<Post>, RepoError> {
        self.repo.find(PostFilter::by_tag(tag), options).await
    }

    /// Fetch a post by id. Despite the name, this removes the post from the
    /// store and returns it; existing clients depend on the delete-on-read
    /// behavior, so it is kept as observed.
    pub async fn get_post_by_id(&self, post_id: Uuid) -> Result<Option<Post>, RepoError> {
        self.repo.find_and_delete(post_id).await
    }

    /// Replace all writable fields of the matching post as a single
    /// set-update. Returns the updated record, or `None` when no post
    /// matches the id.
    pub async fn update_post(
        &self,
        post_id: Uuid,
        fields: PostFields,
    ) -> Result<Option<Post>, RepoError> {
        self.repo.update(post_id, fields).await
    }

    /// Remove the matching post permanently. Returns the number of records
    /// removed (0 when the id matched nothing).
    pub async fn delete_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        self.repo.delete(post_id).await
    }
}
