use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::models::Subscription;
use crate::error::ServiceResult;
use crate::repository::traits::SubscriptionStore;

/// Postgres repository for Subscription edges.
#[derive(Clone)]
pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionRepository {
    async fn insert_subscription_if_absent(&self, edge: &Subscription) -> ServiceResult<bool> {
        let inserted = sqlx::query_as::<_, (Uuid,)>(
            r#"
            INSERT INTO subscriptions (id, subscriber_id, channel_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (subscriber_id, channel_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(edge.id)
        .bind(edge.subscriber_id)
        .bind(edge.channel_id)
        .bind(edge.created_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(inserted.is_some())
    }

    async fn delete_subscription_if_present(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> ServiceResult<bool> {
        let affected = sqlx::query(
            r#"
            DELETE FROM subscriptions
            WHERE subscriber_id = $1 AND channel_id = $2
            "#,
        )
        .bind(subscriber_id)
        .bind(channel_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    async fn subscription_exists(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM subscriptions
                WHERE subscriber_id = $1 AND channel_id = $2
            )
            "#,
        )
        .bind(subscriber_id)
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn subscribers_of(&self, channel_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let subscribers: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT subscriber_id FROM subscriptions
            WHERE channel_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(channel_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subscribers)
    }

    async fn channels_of(&self, subscriber_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let channels: Vec<Uuid> = sqlx::query_scalar(
            r#"
            SELECT channel_id FROM subscriptions
            WHERE subscriber_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(subscriber_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(channels)
    }

    async fn count_subscribers(&self, channel_id: Uuid) -> ServiceResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE channel_id = $1")
                .bind(channel_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }

    async fn count_subscriptions(&self, subscriber_id: Uuid) -> ServiceResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM subscriptions WHERE subscriber_id = $1")
                .bind(subscriber_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
