/// Tweet operations: create, per-user listing, owner-gated mutation.
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::models::Tweet;
use crate::error::{ServiceError, ServiceResult};
use crate::repository::traits::TweetStore;
use crate::services::ownership::ensure_owner;

#[derive(Clone)]
pub struct TweetService {
    tweets: Arc<dyn TweetStore>,
}

impl TweetService {
    pub fn new(tweets: Arc<dyn TweetStore>) -> Self {
        Self { tweets }
    }

    async fn require_tweet(&self, tweet_id: Uuid) -> ServiceResult<Tweet> {
        self.tweets
            .find_tweet(tweet_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("tweet {tweet_id} not found")))
    }

    fn require_content(content: &str) -> ServiceResult<()> {
        if content.trim().is_empty() {
            return Err(ServiceError::InvalidInput("content is required".into()));
        }
        Ok(())
    }

    pub async fn create(&self, actor_id: Uuid, content: String) -> ServiceResult<Tweet> {
        Self::require_content(&content)?;

        let now = Utc::now();
        let tweet = Tweet {
            id: Uuid::new_v4(),
            owner_id: actor_id,
            content,
            created_at: now,
            updated_at: now,
        };
        self.tweets.insert_tweet(&tweet).await?;

        Ok(tweet)
    }

    pub async fn list_by_user(&self, user_id: Uuid) -> ServiceResult<Vec<Tweet>> {
        self.tweets.tweets_by_owner(user_id).await
    }

    pub async fn update(
        &self,
        actor_id: Uuid,
        tweet_id: Uuid,
        content: String,
    ) -> ServiceResult<Tweet> {
        let mut tweet = self.require_tweet(tweet_id).await?;
        ensure_owner(actor_id, &tweet)?;
        Self::require_content(&content)?;

        tweet.content = content;
        tweet.updated_at = Utc::now();
        self.tweets.update_tweet(&tweet).await?;

        Ok(tweet)
    }

    pub async fn delete(&self, actor_id: Uuid, tweet_id: Uuid) -> ServiceResult<()> {
        let tweet = self.require_tweet(tweet_id).await?;
        ensure_owner(actor_id, &tweet)?;

        self.tweets.delete_tweet(tweet_id).await?;
        Ok(())
    }
}
