//! PostgreSQL post store implementation.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use blog_core::domain::{Post, PostFields};
use blog_core::error::RepoError;
use blog_core::ports::{ListOptions, PostFilter, PostRepository, SortKey, SortOrder};

use super::entity::post::{self, Entity as PostEntity};

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn sort_column(key: SortKey) -> post::Column {
    match key {
        SortKey::CreatedAt => post::Column::CreatedAt,
        SortKey::UpdatedAt => post::Column::UpdatedAt,
        SortKey::Title => post::Column::Title,
        SortKey::Author => post::Column::Author,
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn insert(&self, new_post: Post) -> Result<Post, RepoError> {
        let active: post::ActiveModel = new_post.into();
        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(model.into())
    }

    async fn find(
        &self,
        filter: PostFilter,
        options: &ListOptions,
    ) -> Result<Vec<Post>, RepoError> {
        let mut query = PostEntity::find();

        if let Some(author) = filter.author {
            query = query.filter(post::Column::Author.eq(author));
        }
        if let Some(tag) = filter.tag {
            // Tag containment on the text[] column.
            query = query.filter(Expr::cust_with_values("? = ANY(tags)", [tag]));
        }

        let column = sort_column(options.sort_by);
        query = match options.sort_order {
            SortOrder::Ascending => query.order_by_asc(column),
            SortOrder::Descending => query.order_by_desc(column),
        };

        let models = query
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_and_delete(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        else {
            return Ok(None);
        };

        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        // A concurrent caller removed the row between the fetch and the
        // delete; only the caller whose delete lands hands out the post.
        if result.rows_affected == 0 {
            return Ok(None);
        }

        Ok(Some(model.into()))
    }

    async fn update(&self, id: Uuid, fields: PostFields) -> Result<Option<Post>, RepoError> {
        let Some(model) = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
        else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.title = Set(fields.title);
        active.author = Set(fields.author);
        active.contents = Set(fields.contents);
        active.tags = Set(fields.tags);
        active.updated_at = Set(Utc::now().into());

        let updated = match active.update(&self.db).await {
            Ok(model) => model,
            // The row vanished between the fetch and the write: not-found,
            // not an error.
            Err(DbErr::RecordNotUpdated) => return Ok(None),
            Err(e) => return Err(RepoError::Query(e.to_string())),
        };

        Ok(Some(updated.into()))
    }

    async fn delete(&self, id: Uuid) -> Result<u64, RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected)
    }
}
