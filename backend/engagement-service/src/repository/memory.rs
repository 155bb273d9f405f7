/// In-memory backend implementing every store trait.
///
/// Backs the test suite and lightweight embedding; all maps sit behind one
/// async `RwLock`, so each trait call is a single atomic step exactly like a
/// single statement against Postgres.
use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::models::{
    Comment, Like, LikeTarget, SortDirection, Subscription, Tweet, User, Video, VideoSortField,
};
use crate::error::ServiceResult;
use crate::repository::traits::{
    CommentStore, LikeStore, OwnerResolver, SubscriptionStore, TweetStore, UserStore, VideoStore,
};

#[derive(Default)]
struct Collections {
    users: HashMap<Uuid, User>,
    videos: HashMap<Uuid, Video>,
    tweets: HashMap<Uuid, Tweet>,
    comments: HashMap<Uuid, Comment>,
    likes: Vec<Like>,
    subscriptions: Vec<Subscription>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> ServiceResult<()> {
        self.inner.write().await.users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_user(&self, id: Uuid) -> ServiceResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> ServiceResult<Option<User>> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.username == username).cloned())
    }
}

#[async_trait]
impl VideoStore for MemoryStore {
    async fn insert_video(&self, video: &Video) -> ServiceResult<()> {
        self.inner
            .write()
            .await
            .videos
            .insert(video.id, video.clone());
        Ok(())
    }

    async fn find_video(&self, id: Uuid) -> ServiceResult<Option<Video>> {
        Ok(self.inner.read().await.videos.get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> ServiceResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.videos.get_mut(&video.id) {
            stored.title = video.title.clone();
            stored.description = video.description.clone();
            stored.thumbnail = video.thumbnail.clone();
            stored.is_published = video.is_published;
            stored.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn delete_video(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.inner.write().await.videos.remove(&id).is_some())
    }

    async fn record_view(&self, id: Uuid) -> ServiceResult<()> {
        if let Some(video) = self.inner.write().await.videos.get_mut(&id) {
            video.views += 1;
        }
        Ok(())
    }

    async fn videos_by_owner(&self, owner_id: Uuid) -> ServiceResult<Vec<Video>> {
        let inner = self.inner.read().await;
        let mut videos: Vec<Video> = inner
            .videos
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();
        videos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
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
        let inner = self.inner.read().await;
        let mut videos: Vec<Video> = inner
            .videos
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();

        videos.sort_by(|a, b| {
            let ord = match sort_by {
                VideoSortField::CreatedAt => a.created_at.cmp(&b.created_at),
                VideoSortField::Title => a.title.cmp(&b.title),
                VideoSortField::Views => a.views.cmp(&b.views),
                VideoSortField::Duration => {
                    a.duration.partial_cmp(&b.duration).unwrap_or(Ordering::Equal)
                }
            };
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        Ok(videos
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn owner_totals(&self, owner_id: Uuid) -> ServiceResult<(i64, i64)> {
        let inner = self.inner.read().await;
        let mut count = 0i64;
        let mut views = 0i64;
        for video in inner.videos.values().filter(|v| v.owner_id == owner_id) {
            count += 1;
            views += video.views;
        }
        Ok((count, views))
    }
}

#[async_trait]
impl TweetStore for MemoryStore {
    async fn insert_tweet(&self, tweet: &Tweet) -> ServiceResult<()> {
        self.inner
            .write()
            .await
            .tweets
            .insert(tweet.id, tweet.clone());
        Ok(())
    }

    async fn find_tweet(&self, id: Uuid) -> ServiceResult<Option<Tweet>> {
        Ok(self.inner.read().await.tweets.get(&id).cloned())
    }

    async fn update_tweet(&self, tweet: &Tweet) -> ServiceResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.tweets.get_mut(&tweet.id) {
            stored.content = tweet.content.clone();
            stored.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn delete_tweet(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.inner.write().await.tweets.remove(&id).is_some())
    }

    async fn tweets_by_owner(&self, owner_id: Uuid) -> ServiceResult<Vec<Tweet>> {
        let inner = self.inner.read().await;
        let mut tweets: Vec<Tweet> = inner
            .tweets
            .values()
            .filter(|t| t.owner_id == owner_id)
            .cloned()
            .collect();
        tweets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tweets)
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert_comment(&self, comment: &Comment) -> ServiceResult<()> {
        self.inner
            .write()
            .await
            .comments
            .insert(comment.id, comment.clone());
        Ok(())
    }

    async fn find_comment(&self, id: Uuid) -> ServiceResult<Option<Comment>> {
        Ok(self.inner.read().await.comments.get(&id).cloned())
    }

    async fn update_comment(&self, comment: &Comment) -> ServiceResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(stored) = inner.comments.get_mut(&comment.id) {
            stored.content = comment.content.clone();
            stored.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn delete_comment(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.inner.write().await.comments.remove(&id).is_some())
    }

    async fn comments_for_video(
        &self,
        video_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Vec<Comment>> {
        let inner = self.inner.read().await;
        let mut comments: Vec<Comment> = inner
            .comments
            .values()
            .filter(|c| c.video_id == video_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }
}

#[async_trait]
impl LikeStore for MemoryStore {
    async fn insert_like_if_absent(&self, like: &Like) -> ServiceResult<bool> {
        let target = like.target();
        let mut inner = self.inner.write().await;
        let exists = inner
            .likes
            .iter()
            .any(|l| l.liked_by == like.liked_by && l.target() == target);
        if exists {
            return Ok(false);
        }
        inner.likes.push(like.clone());
        Ok(true)
    }

    async fn delete_like_if_present(
        &self,
        liked_by: Uuid,
        target: LikeTarget,
    ) -> ServiceResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.likes.len();
        inner
            .likes
            .retain(|l| !(l.liked_by == liked_by && l.target() == Some(target)));
        Ok(inner.likes.len() < before)
    }

    async fn all_likes(&self) -> ServiceResult<Vec<Like>> {
        Ok(self.inner.read().await.likes.clone())
    }

    async fn liked_videos(&self, liked_by: Uuid) -> ServiceResult<Vec<Like>> {
        let inner = self.inner.read().await;
        let mut likes: Vec<Like> = inner
            .likes
            .iter()
            .filter(|l| l.liked_by == liked_by && l.video_id.is_some())
            .cloned()
            .collect();
        likes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(likes)
    }
}

#[async_trait]
impl SubscriptionStore for MemoryStore {
    async fn insert_subscription_if_absent(&self, edge: &Subscription) -> ServiceResult<bool> {
        let mut inner = self.inner.write().await;
        let exists = inner
            .subscriptions
            .iter()
            .any(|s| s.subscriber_id == edge.subscriber_id && s.channel_id == edge.channel_id);
        if exists {
            return Ok(false);
        }
        inner.subscriptions.push(edge.clone());
        Ok(true)
    }

    async fn delete_subscription_if_present(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> ServiceResult<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.subscriptions.len();
        inner
            .subscriptions
            .retain(|s| !(s.subscriber_id == subscriber_id && s.channel_id == channel_id));
        Ok(inner.subscriptions.len() < before)
    }

    async fn subscription_exists(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> ServiceResult<bool> {
        let inner = self.inner.read().await;
        Ok(inner
            .subscriptions
            .iter()
            .any(|s| s.subscriber_id == subscriber_id && s.channel_id == channel_id))
    }

    async fn subscribers_of(&self, channel_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let inner = self.inner.read().await;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| s.channel_id == channel_id)
            .map(|s| s.subscriber_id)
            .collect())
    }

    async fn channels_of(&self, subscriber_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        let inner = self.inner.read().await;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| s.subscriber_id == subscriber_id)
            .map(|s| s.channel_id)
            .collect())
    }

    async fn count_subscribers(&self, channel_id: Uuid) -> ServiceResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| s.channel_id == channel_id)
            .count() as i64)
    }

    async fn count_subscriptions(&self, subscriber_id: Uuid) -> ServiceResult<i64> {
        let inner = self.inner.read().await;
        Ok(inner
            .subscriptions
            .iter()
            .filter(|s| s.subscriber_id == subscriber_id)
            .count() as i64)
    }
}

#[async_trait]
impl OwnerResolver for MemoryStore {
    async fn resolve_owner(&self, target: LikeTarget) -> ServiceResult<Option<Uuid>> {
        let inner = self.inner.read().await;
        let owner = match target {
            LikeTarget::Video(id) => inner.videos.get(&id).map(|v| v.owner_id),
            LikeTarget::Comment(id) => inner.comments.get(&id).map(|c| c.owner_id),
            LikeTarget::Tweet(id) => inner.tweets.get(&id).map(|t| t.owner_id),
        };
        Ok(owner)
    }
}
