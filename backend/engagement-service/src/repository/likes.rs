use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::models::{Like, LikeTarget};
use crate::error::ServiceResult;
use crate::repository::traits::LikeStore;

/// Column holding the populated target id for a given target kind.
fn target_column(target: LikeTarget) -> &'static str {
    match target {
        LikeTarget::Video(_) => "video_id",
        LikeTarget::Comment(_) => "comment_id",
        LikeTarget::Tweet(_) => "tweet_id",
    }
}

/// Postgres repository for Like edges.
///
/// Uniqueness per (liked_by, target) is backed by partial unique indexes, so
/// the conditional insert/delete run as single atomic statements - no
/// check-then-act window.
#[derive(Clone)]
pub struct PgLikeRepository {
    pool: PgPool,
}

impl PgLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStore for PgLikeRepository {
    async fn insert_like_if_absent(&self, like: &Like) -> ServiceResult<bool> {
        let target = match like.target() {
            Some(target) => target,
            None => {
                return Err(crate::error::ServiceError::Internal(
                    "like edge has no populated target".into(),
                ))
            }
        };
        let col = target_column(target);

        let query = format!(
            "INSERT INTO likes (id, liked_by, {col}, created_at)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (liked_by, {col}) WHERE {col} IS NOT NULL DO NOTHING
             RETURNING id"
        );

        let inserted = sqlx::query_as::<_, (Uuid,)>(&query)
            .bind(like.id)
            .bind(like.liked_by)
            .bind(target.id())
            .bind(like.created_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(inserted.is_some())
    }

    async fn delete_like_if_present(
        &self,
        liked_by: Uuid,
        target: LikeTarget,
    ) -> ServiceResult<bool> {
        let col = target_column(target);
        let query = format!("DELETE FROM likes WHERE liked_by = $1 AND {col} = $2");

        let affected = sqlx::query(&query)
            .bind(liked_by)
            .bind(target.id())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(affected > 0)
    }

    async fn all_likes(&self) -> ServiceResult<Vec<Like>> {
        let likes = sqlx::query_as::<_, Like>(
            r#"
            SELECT id, liked_by, video_id, comment_id, tweet_id, created_at
            FROM likes
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }

    async fn liked_videos(&self, liked_by: Uuid) -> ServiceResult<Vec<Like>> {
        let likes = sqlx::query_as::<_, Like>(
            r#"
            SELECT id, liked_by, video_id, comment_id, tweet_id, created_at
            FROM likes
            WHERE liked_by = $1 AND video_id IS NOT NULL
            ORDER BY created_at DESC
            "#,
        )
        .bind(liked_by)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }
}
