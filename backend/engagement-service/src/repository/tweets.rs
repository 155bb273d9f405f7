use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::models::Tweet;
use crate::error::ServiceResult;
use crate::repository::traits::TweetStore;

/// Postgres repository for Tweet operations
#[derive(Clone)]
pub struct PgTweetRepository {
    pool: PgPool,
}

impl PgTweetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetStore for PgTweetRepository {
    async fn insert_tweet(&self, tweet: &Tweet) -> ServiceResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tweets (id, owner_id, content, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(tweet.id)
        .bind(tweet.owner_id)
        .bind(&tweet.content)
        .bind(tweet.created_at)
        .bind(tweet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_tweet(&self, id: Uuid) -> ServiceResult<Option<Tweet>> {
        let tweet = sqlx::query_as::<_, Tweet>(
            r#"
            SELECT id, owner_id, content, created_at, updated_at
            FROM tweets
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tweet)
    }

    async fn update_tweet(&self, tweet: &Tweet) -> ServiceResult<()> {
        sqlx::query(
            r#"
            UPDATE tweets
            SET content = $2, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(tweet.id)
        .bind(&tweet.content)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_tweet(&self, id: Uuid) -> ServiceResult<bool> {
        let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn tweets_by_owner(&self, owner_id: Uuid) -> ServiceResult<Vec<Tweet>> {
        let tweets = sqlx::query_as::<_, Tweet>(
            r#"
            SELECT id, owner_id, content, created_at, updated_at
            FROM tweets
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tweets)
    }
}
