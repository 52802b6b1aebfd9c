//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::domain::{Post, PostFields};
use blog_core::ports::{ListOptions, SortKey, SortOrder};
use blog_shared::dto::{CreatePostRequest, ListPostsQuery, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: &Post) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        author: post.author.clone(),
        contents: post.contents.clone(),
        tags: post.tags.clone(),
        created_at: post.created_at.to_rfc3339(),
        updated_at: post.updated_at.to_rfc3339(),
    }
}

fn parse_options(query: &ListPostsQuery) -> Result<ListOptions, AppError> {
    let sort_by = match query.sort_by.as_deref() {
        Some(name) => SortKey::from_name(name)
            .ok_or_else(|| AppError::BadRequest(format!("Unknown sortBy field '{name}'")))?,
        None => SortKey::default(),
    };

    let sort_order = query
        .sort_order
        .as_deref()
        .map(SortOrder::from_legacy)
        .unwrap_or_default();

    Ok(ListOptions {
        sort_by,
        sort_order,
    })
}

/// GET /api/v1/posts?author=&tag=&sortBy=&sortOrder=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let options = parse_options(&query)?;

    let posts = match (query.author, query.tag) {
        (Some(_), Some(_)) => {
            return Err(AppError::BadRequest(
                "Query posts by either author or tag, not both".to_string(),
            ));
        }
        (Some(author), None) => state.posts.list_posts_by_author(&author, &options).await?,
        (None, Some(tag)) => state.posts.list_posts_by_tag(&tag, &options).await?,
        (None, None) => state.posts.list_all_posts(&options).await?,
    };

    let body: Vec<PostResponse> = posts.iter().map(to_response).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/v1/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // No content validation: any field may be absent or empty.
    let post = state
        .posts
        .create_post(PostFields {
            title: req.title,
            author: req.author,
            contents: req.contents,
            tags: req.tags,
        })
        .await?;

    Ok(HttpResponse::Created().json(to_response(&post)))
}

/// GET /api/v1/posts/{id}
///
/// Returns the post and removes it from the store; clients depend on the
/// delete-on-read behavior, so it is preserved here.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    match state.posts.get_post_by_id(id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(to_response(&post))),
        None => Err(AppError::NotFound(format!("Post {id} not found"))),
    }
}

/// PATCH /api/v1/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let updated = state
        .posts
        .update_post(
            id,
            PostFields {
                title: req.title,
                author: req.author,
                contents: req.contents,
                tags: req.tags,
            },
        )
        .await?;

    match updated {
        Some(post) => Ok(HttpResponse::Ok().json(to_response(&post))),
        None => Err(AppError::NotFound(format!("Post {id} not found"))),
    }
}

/// DELETE /api/v1/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let removed = state.posts.delete_post(id).await?;
    if removed == 0 {
        return Err(AppError::NotFound(format!("Post {id} not found")));
    }

    Ok(HttpResponse::NoContent().finish())
}
