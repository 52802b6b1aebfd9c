use std::sync::Arc;
use std::time::Duration;

use blog_core::domain::PostFields;
use blog_core::ports::{ListOptions, SortOrder};
use blog_core::service::PostService;

use super::memory::InMemoryPostRepository;

fn service() -> PostService {
    PostService::new(Arc::new(InMemoryPostRepository::new()))
}

fn fields(title: &str, author: &str, tags: &[&str]) -> PostFields {
    PostFields {
        title: Some(title.to_string()),
        author: Some(author.to_string()),
        contents: Some(format!("{title} contents")),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn ascending() -> ListOptions {
    ListOptions {
        sort_order: SortOrder::Ascending,
        ..ListOptions::default()
    }
}

// Creation timestamps are the default sort key; keep them distinct.
async fn tick() {
    tokio::time::sleep(Duration::from_millis(2)).await;
}

#[tokio::test]
async fn create_returns_stored_fields_and_fresh_id() {
    let service = service();
    let input = fields("Hello", "alice", &["intro", "misc"]);

    let post = service.create_post(input.clone()).await.unwrap();

    assert_eq!(post.title, input.title);
    assert_eq!(post.author, input.author);
    assert_eq!(post.contents, input.contents);
    assert_eq!(post.tags, input.tags);

    let other = service.create_post(input).await.unwrap();
    assert_ne!(post.id, other.id);
}

#[tokio::test]
async fn list_all_returns_newest_first_by_default() {
    let service = service();
    service.create_post(fields("first", "a", &[])).await.unwrap();
    tick().await;
    service.create_post(fields("second", "a", &[])).await.unwrap();
    tick().await;
    service.create_post(fields("third", "a", &[])).await.unwrap();

    let posts = service.list_all_posts(&ListOptions::default()).await.unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].title.as_deref(), Some("third"));
    assert_eq!(posts[2].title.as_deref(), Some("first"));
}

#[tokio::test]
async fn ascending_order_returns_oldest_first() {
    let service = service();
    service.create_post(fields("first", "a", &[])).await.unwrap();
    tick().await;
    service.create_post(fields("second", "a", &[])).await.unwrap();

    let posts = service.list_all_posts(&ascending()).await.unwrap();
    assert_eq!(posts[0].title.as_deref(), Some("first"));
    assert_eq!(posts[1].title.as_deref(), Some("second"));
}

#[tokio::test]
async fn author_and_tag_filters_return_exact_subsets() {
    let service = service();
    let a = service.create_post(fields("A", "alice", &["x"])).await.unwrap();
    tick().await;
    let b = service.create_post(fields("B", "bob", &["x", "y"])).await.unwrap();

    let by_tag = service
        .list_posts_by_tag("y", &ListOptions::default())
        .await
        .unwrap();
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].id, b.id);

    let by_author = service
        .list_posts_by_author("alice", &ListOptions::default())
        .await
        .unwrap();
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].id, a.id);

    let shared_tag = service
        .list_posts_by_tag("x", &ListOptions::default())
        .await
        .unwrap();
    assert_eq!(shared_tag.len(), 2);

    let nobody = service
        .list_posts_by_author("carol", &ListOptions::default())
        .await
        .unwrap();
    assert!(nobody.is_empty());
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let service = service();
    let post = service
        .create_post(fields("before", "alice", &["old"]))
        .await
        .unwrap();

    let replacement = PostFields {
        title: Some("after".to_string()),
        author: None,
        contents: None,
        tags: vec![],
    };
    let updated = service
        .update_post(post.id, replacement.clone())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, post.id);
    assert_eq!(updated.title.as_deref(), Some("after"));
    assert!(updated.author.is_none());
    assert!(updated.tags.is_empty());
    assert!(updated.updated_at >= post.updated_at);

    let listed = service.list_all_posts(&ListOptions::default()).await.unwrap();
    assert_eq!(listed[0].title.as_deref(), Some("after"));
}

#[tokio::test]
async fn update_of_unknown_id_is_absent_not_error() {
    let service = service();
    let result = service
        .update_post(uuid::Uuid::new_v4(), PostFields::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_removes_from_listing() {
    let service = service();
    let post = service.create_post(fields("doomed", "a", &[])).await.unwrap();

    assert_eq!(service.delete_post(post.id).await.unwrap(), 1);

    let posts = service.list_all_posts(&ListOptions::default()).await.unwrap();
    assert!(posts.iter().all(|p| p.id != post.id));

    assert_eq!(service.delete_post(post.id).await.unwrap(), 0);
}

#[tokio::test]
async fn get_post_by_id_removes_the_post() {
    let service = service();
    let post = service.create_post(fields("read me", "a", &[])).await.unwrap();

    let fetched = service.get_post_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, post.id);
    assert_eq!(fetched.title.as_deref(), Some("read me"));

    // Delete-on-read: the post is gone afterwards.
    assert!(service.get_post_by_id(post.id).await.unwrap().is_none());
    let posts = service.list_all_posts(&ListOptions::default()).await.unwrap();
    assert!(posts.is_empty());
}

#[cfg(feature = "postgres")]
mod postgres {
    use blog_core::domain::{Post, PostFields};
    use blog_core::ports::{ListOptions, PostFilter, PostRepository};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    use crate::database::entity::post;
    use crate::database::postgres_repo::PostgresPostRepository;

    fn model(title: &str, author: &str, tags: &[&str]) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: uuid::Uuid::new_v4(),
            title: Some(title.to_owned()),
            author: Some(author.to_owned()),
            contents: Some("Content".to_owned()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn find_maps_models_to_domain_posts() {
        let stored = model("Test Post", "alice", &["x"]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored.clone()]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let posts: Vec<Post> = repo
            .find(PostFilter::by_author("alice"), &ListOptions::default())
            .await
            .unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, stored.id);
        assert_eq!(posts[0].title.as_deref(), Some("Test Post"));
        assert_eq!(posts[0].tags, vec!["x".to_string()]);
    }

    #[tokio::test]
    async fn delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let removed = repo.delete(uuid::Uuid::new_v4()).await.unwrap();
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn find_and_delete_of_unknown_id_is_absent() {
        // Empty query result: nothing matched, no delete issued.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_and_delete(uuid::Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn find_and_delete_lost_race_is_absent() {
        // The fetch sees the row, but a concurrent delete wins: the delete
        // affects zero rows and the caller gets nothing.
        let stored = model("Contested", "alice", &[]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored.clone()]])
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo.find_and_delete(stored.id).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn update_lost_race_is_absent_not_error() {
        // The fetch sees the row, but it is gone by the time the update
        // runs (empty UPDATE .. RETURNING result): not-found, not an error.
        let stored = model("Contested", "alice", &[]);
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored.clone()]])
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result = repo
            .update(stored.id, PostFields::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
