/// Aggregation engine: derived, read-only channel views computed across the
/// video, subscription and like collections. Never mutates state; empty
/// groups degrade to zeros, never to errors.
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::models::{ChannelProfile, ChannelStats, Video};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::traits::{LikeStore, OwnerResolver, SubscriptionStore, UserStore, VideoStore};

#[derive(Clone)]
pub struct DashboardService {
    users: Arc<dyn UserStore>,
    videos: Arc<dyn VideoStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
    likes: Arc<dyn LikeStore>,
    resolver: Arc<dyn OwnerResolver>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserStore>,
        videos: Arc<dyn VideoStore>,
        subscriptions: Arc<dyn SubscriptionStore>,
        likes: Arc<dyn LikeStore>,
        resolver: Arc<dyn OwnerResolver>,
    ) -> Self {
        Self {
            users,
            videos,
            subscriptions,
            likes,
            resolver,
        }
    }

    /// Likes received across everything the channel owns.
    ///
    /// Each edge names exactly one target, so resolving that single target
    /// and comparing owners can never double count. Dangling edges (target
    /// deleted after the like) resolve to no owner and contribute zero.
    async fn attributed_likes(&self, channel_id: Uuid) -> ServiceResult<i64> {
        let mut total = 0i64;
        for like in self.likes.all_likes().await? {
            let target = match like.target() {
                Some(target) => target,
                None => continue,
            };
            if self.resolver.resolve_owner(target).await? == Some(channel_id) {
                total += 1;
            }
        }
        Ok(total)
    }

    /// The five channel counters. All fields are always present; a channel
    /// with no content and no audience reports all zeros.
    pub async fn channel_stats(&self, channel_id: Uuid) -> ServiceResult<ChannelStats> {
        let (total_videos, total_views) = self.videos.owner_totals(channel_id).await?;
        let subscriber_count = self.subscriptions.count_subscribers(channel_id).await?;
        let subscribed_channel_count = self.subscriptions.count_subscriptions(channel_id).await?;
        let total_likes = self.attributed_likes(channel_id).await?;

        Ok(ChannelStats {
            total_videos,
            total_views,
            subscriber_count,
            subscribed_channel_count,
            total_likes,
        })
    }

    /// Every video the channel owns, publish status ignored. This is the
    /// owner's dashboard view, not the public listing.
    pub async fn channel_videos(&self, channel_id: Uuid) -> ServiceResult<Vec<Video>> {
        self.videos.videos_by_owner(channel_id).await
    }

    /// Public profile for a channel handle: the user record plus its
    /// subscription counters.
    pub async fn channel_info(&self, username: &str) -> ServiceResult<ChannelProfile> {
        let user = self
            .users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user '{username}' not found")))?;

        let subscriber_count = self.subscriptions.count_subscribers(user.id).await?;
        let subscribed_channel_count = self.subscriptions.count_subscriptions(user.id).await?;

        Ok(ChannelProfile {
            user,
            subscriber_count,
            subscribed_channel_count,
        })
    }
}
