use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::models::Comment;
use crate::error::ServiceResult;
use crate::repository::traits::CommentStore;

/// Postgres repository for Comment operations
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for PgCommentRepository {
    async fn insert_comment(&self, comment: &Comment) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, owner_id, video_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(comment.id)
        .bind(comment.owner_id)
        .bind(comment.video_id)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_comment(&self, id: Uuid) -> ServiceResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, owner_id, video_id, content, created_at, updated_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn update_comment(&self, comment: &Comment) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE comments
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(comment.id)
        .bind(&comment.content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> ServiceResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn comments_for_video(
        &self,
        video_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, owner_id, video_id, content, created_at, updated_at
            FROM comments
            WHERE video_id = $1
            ORDER BY created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(video_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
