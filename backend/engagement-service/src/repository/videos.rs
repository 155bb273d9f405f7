use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::models::{SortDirection, Video, VideoSortField};
use crate::error::ServiceResult;
use crate::repository::traits::VideoStore;

const VIDEO_COLUMNS: &str = "id, owner_id, title, description, video_file, thumbnail, \
     duration, views, is_published, created_at, updated_at";

/// Postgres repository for Video operations
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VideoStore for PgVideoRepository {
    async fn insert_video(&self, video: &Video) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO videos (id, owner_id, title, description, video_file, thumbnail,
                                duration, views, is_published, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(video.id)
        .bind(video.owner_id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.video_file)
        .bind(&video.thumbnail)
        .bind(video.duration)
        .bind(video.views)
        .bind(video.is_published)
        .bind(video.created_at)
        .bind(video.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_video(&self, id: Uuid) -> ServiceResult<Option<Video>> {
        let video = sqlx::query_as::<_, Video>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(video)
    }

    async fn update_video(&self, video: &Video) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE videos
            SET title = $2, description = $3, thumbnail = $4, is_published = $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(video.id)
        .bind(&video.title)
        .bind(&video.description)
        .bind(&video.thumbnail)
        .bind(video.is_published)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_video(&self, id: Uuid) -> ServiceResult<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_view(&self, id: Uuid) -> ServiceResult<()> {
        sqlx::query("UPDATE videos SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn videos_by_owner(&self, owner_id: Uuid) -> ServiceResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(&format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE owner_id = $1 ORDER BY created_at DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    async fn videos_page(
        &self,
        owner_id: Uuid,
        sort_by: VideoSortField,
        direction: SortDirection,
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Vec<Video>> {
        let order_clause = match direction {
            SortDirection::Ascending => "ASC",
            SortDirection::Descending => "DESC",
        };

        // sort_by.column() is a closed enum, never caller text
        let query = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE owner_id = $1 \
             ORDER BY {} {} LIMIT $2 OFFSET $3",
            sort_by.column(),
            order_clause
        );

        let videos = sqlx::query_as::<_, Video>(&query)
            .bind(owner_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    async fn owner_totals(&self, owner_id: Uuid) -> ServiceResult<(i64, i64)> {
        let totals: (i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*), COALESCE(SUM(views), 0)::BIGINT
            FROM videos
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(totals)
    }
}
