/// Store traits for the five collections plus the like/subscription edge
/// relations. Every backend (Postgres, in-memory) implements the same
/// interface; services only ever see trait objects.
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::models::{
    Comment, Like, LikeTarget, SortDirection, Subscription, Tweet, User, Video, VideoSortField,
};
use crate::error::ServiceResult;

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> ServiceResult<()>;
    async fn find_user(&self, id: Uuid) -> ServiceResult<Option<User>>;
    async fn find_user_by_username(&self, username: &str) -> ServiceResult<Option<User>>;
}

#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn insert_video(&self, video: &Video) -> ServiceResult<()>;
    async fn find_video(&self, id: Uuid) -> ServiceResult<Option<Video>>;
    async fn update_video(&self, video: &Video) -> ServiceResult<()>;
    async fn delete_video(&self, id: Uuid) -> ServiceResult<bool>;

    /// Bump the monotonic view counter.
    async fn record_view(&self, id: Uuid) -> ServiceResult<()>;

    /// Every video owned by the channel, newest first, publish status ignored.
    async fn videos_by_owner(&self, owner_id: Uuid) -> ServiceResult<Vec<Video>>;

    /// One pagination window of the owner's videos.
    async fn videos_page(
        &self,
        owner_id: Uuid,
        sort_by: VideoSortField,
        direction: SortDirection,
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Vec<Video>>;

    /// (video count, view sum) over the owner's videos; (0, 0) when none.
    async fn owner_totals(&self, owner_id: Uuid) -> ServiceResult<(i64, i64)>;
}

#[async_trait]
pub trait TweetStore: Send + Sync {
    async fn insert_tweet(&self, tweet: &Tweet) -> ServiceResult<()>;
    async fn find_tweet(&self, id: Uuid) -> ServiceResult<Option<Tweet>>;
    async fn update_tweet(&self, tweet: &Tweet) -> ServiceResult<()>;
    async fn delete_tweet(&self, id: Uuid) -> ServiceResult<bool>;
    async fn tweets_by_owner(&self, owner_id: Uuid) -> ServiceResult<Vec<Tweet>>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert_comment(&self, comment: &Comment) -> ServiceResult<()>;
    async fn find_comment(&self, id: Uuid) -> ServiceResult<Option<Comment>>;
    async fn update_comment(&self, comment: &Comment) -> ServiceResult<()>;
    async fn delete_comment(&self, id: Uuid) -> ServiceResult<bool>;

    /// One pagination window of a video's comments, oldest first.
    async fn comments_for_video(
        &self,
        video_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> ServiceResult<Vec<Comment>>;
}

/// Like edges. The conditional insert/delete pair is the atomic primitive the
/// toggle protocol is built on; a plain create/update API is deliberately
/// absent (an edge is present or absent, never edited).
#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Insert unless an edge for `(like.liked_by, like.target())` already
    /// exists. Returns true when a new edge was stored.
    async fn insert_like_if_absent(&self, like: &Like) -> ServiceResult<bool>;

    /// Delete the edge for `(liked_by, target)` if present. Returns true when
    /// an edge was removed.
    async fn delete_like_if_present(&self, liked_by: Uuid, target: LikeTarget)
        -> ServiceResult<bool>;

    /// Full edge scan, used by like attribution.
    async fn all_likes(&self) -> ServiceResult<Vec<Like>>;

    /// Edges by this actor whose target is a video, newest first.
    async fn liked_videos(&self, liked_by: Uuid) -> ServiceResult<Vec<Like>>;
}

/// Subscription edges, same conditional-primitive shape as [`LikeStore`].
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn insert_subscription_if_absent(&self, edge: &Subscription) -> ServiceResult<bool>;
    async fn delete_subscription_if_present(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> ServiceResult<bool>;
    async fn subscription_exists(
        &self,
        subscriber_id: Uuid,
        channel_id: Uuid,
    ) -> ServiceResult<bool>;
    async fn subscribers_of(&self, channel_id: Uuid) -> ServiceResult<Vec<Uuid>>;
    async fn channels_of(&self, subscriber_id: Uuid) -> ServiceResult<Vec<Uuid>>;
    async fn count_subscribers(&self, channel_id: Uuid) -> ServiceResult<i64>;
    async fn count_subscriptions(&self, subscriber_id: Uuid) -> ServiceResult<i64>;
}

/// Resolves a like target to the id of the user who owns it.
/// `None` means the target no longer exists (dangling edge).
#[async_trait]
pub trait OwnerResolver: Send + Sync {
    async fn resolve_owner(&self, target: LikeTarget) -> ServiceResult<Option<Uuid>>;
}

/// [`OwnerResolver`] over the three owned-content stores. Works with any
/// backend combination since it only needs by-id lookups.
pub struct StoreOwnerResolver {
    videos: Arc<dyn VideoStore>,
    comments: Arc<dyn CommentStore>,
    tweets: Arc<dyn TweetStore>,
}

impl StoreOwnerResolver {
    pub fn new(
        videos: Arc<dyn VideoStore>,
        comments: Arc<dyn CommentStore>,
        tweets: Arc<dyn TweetStore>,
    ) -> Self {
        Self {
            videos,
            comments,
            tweets,
        }
    }
}

#[async_trait]
impl OwnerResolver for StoreOwnerResolver {
    async fn resolve_owner(&self, target: LikeTarget) -> ServiceResult<Option<Uuid>> {
        let owner = match target {
            LikeTarget::Video(id) => self.videos.find_video(id).await?.map(|v| v.owner_id),
            LikeTarget::Comment(id) => self.comments.find_comment(id).await?.map(|c| c.owner_id),
            LikeTarget::Tweet(id) => self.tweets.find_tweet(id).await?.map(|t| t.owner_id),
        };
        Ok(owner)
    }
}

/// Blob store collaborator. The engine only ever hands it opaque locators;
/// media bytes never pass through this service.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn delete_asset(&self, locator: &str) -> ServiceResult<()>;
}

/// [`MediaStore`] for deployments where asset cleanup is handled out of band.
#[derive(Debug, Clone, Default)]
pub struct NoopMediaStore;

#[async_trait]
impl MediaStore for NoopMediaStore {
    async fn delete_asset(&self, _locator: &str) -> ServiceResult<()> {
        Ok(())
    }
}
