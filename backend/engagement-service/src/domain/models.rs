use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - identity is issued by the external identity provider;
/// this service only resolves ids and handles.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Video entity - `video_file` and `thumbnail` are opaque blob locators
/// owned by the media store collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tweet entity - a short owned text post
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tweet {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment entity - an owned text post attached to a video
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub video_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Like edge - exactly one of `video_id`, `comment_id`, `tweet_id` is set.
/// Uniqueness per (liked_by, target) is enforced by the toggle protocol and
/// backed by partial unique indexes in the Postgres schema.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub liked_by: Uuid,
    pub video_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub tweet_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Build a fresh edge for the given actor and target.
    pub fn new(liked_by: Uuid, target: LikeTarget) -> Self {
        let mut like = Like {
            id: Uuid::new_v4(),
            liked_by,
            video_id: None,
            comment_id: None,
            tweet_id: None,
            created_at: Utc::now(),
        };
        match target {
            LikeTarget::Video(id) => like.video_id = Some(id),
            LikeTarget::Comment(id) => like.comment_id = Some(id),
            LikeTarget::Tweet(id) => like.tweet_id = Some(id),
        }
        like
    }

    /// The populated target field, if the row is well formed.
    pub fn target(&self) -> Option<LikeTarget> {
        match (self.video_id, self.comment_id, self.tweet_id) {
            (Some(id), None, None) => Some(LikeTarget::Video(id)),
            (None, Some(id), None) => Some(LikeTarget::Comment(id)),
            (None, None, Some(id)) => Some(LikeTarget::Tweet(id)),
            _ => None,
        }
    }
}

/// The half of a like's composite key that names what was liked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    pub fn id(&self) -> Uuid {
        match self {
            LikeTarget::Video(id) | LikeTarget::Comment(id) | LikeTarget::Tweet(id) => *id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LikeTarget::Video(_) => "video",
            LikeTarget::Comment(_) => "comment",
            LikeTarget::Tweet(_) => "tweet",
        }
    }
}

/// Subscription edge - subscriber follows channel
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscription {
    pub id: Uuid,
    pub subscriber_id: Uuid,
    pub channel_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(subscriber_id: Uuid, channel_id: Uuid) -> Self {
        Subscription {
            id: Uuid::new_v4(),
            subscriber_id,
            channel_id,
            created_at: Utc::now(),
        }
    }
}

/// Outcome of a like toggle: the new state plus the edge when one was created.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LikeToggle {
    Liked { like: Like },
    Unliked,
}

impl LikeToggle {
    pub fn is_liked(&self) -> bool {
        matches!(self, LikeToggle::Liked { .. })
    }
}

/// Outcome of a subscription toggle.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SubscriptionToggle {
    Subscribed { subscription: Subscription },
    Unsubscribed,
}

impl SubscriptionToggle {
    pub fn is_subscribed(&self) -> bool {
        matches!(self, SubscriptionToggle::Subscribed { .. })
    }
}

/// Channel statistics aggregated from videos, subscriptions and likes.
/// Every counter is always present; empty groups report zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelStats {
    pub total_videos: i64,
    pub total_views: i64,
    pub subscriber_count: i64,
    pub subscribed_channel_count: i64,
    pub total_likes: i64,
}

/// Public channel profile: the user record plus its subscription counters.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelProfile {
    #[serde(flatten)]
    pub user: User,
    pub subscriber_count: i64,
    pub subscribed_channel_count: i64,
}

/// One page of a channel's public video listing.
#[derive(Debug, Clone, Serialize)]
pub struct VideoPage {
    pub videos: Vec<Video>,
    pub length: usize,
    /// Always `page + 1`; callers detect exhaustion by an empty `videos`.
    pub next_page: u32,
}

/// Sort key for the public video listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoSortField {
    CreatedAt,
    Title,
    Views,
    Duration,
}

impl VideoSortField {
    /// Column name for the Postgres backend.
    pub fn column(&self) -> &'static str {
        match self {
            VideoSortField::CreatedAt => "created_at",
            VideoSortField::Title => "title",
            VideoSortField::Views => "views",
            VideoSortField::Duration => "duration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Query parameters for the public video listing.
#[derive(Debug, Clone)]
pub struct VideoListQuery {
    pub page: u32,
    pub limit: u32,
    pub sort_by: VideoSortField,
    pub direction: SortDirection,
}

impl Default for VideoListQuery {
    fn default() -> Self {
        VideoListQuery {
            page: 1,
            limit: 8,
            sort_by: VideoSortField::CreatedAt,
            direction: SortDirection::Ascending,
        }
    }
}

impl VideoListQuery {
    /// Rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }
}

/// Query parameters for a video's comment listing.
#[derive(Debug, Clone)]
pub struct CommentListQuery {
    pub page: u32,
    pub limit: u32,
}

impl Default for CommentListQuery {
    fn default() -> Self {
        CommentListQuery { page: 1, limit: 10 }
    }
}

impl CommentListQuery {
    /// Rows to skip before this page starts.
    pub fn offset(&self) -> i64 {
        i64::from(self.page.saturating_sub(1)) * i64::from(self.limit)
    }
}

/// Fields accepted when publishing a new video.
#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub thumbnail: String,
    pub duration: f64,
}

/// Owner-editable video fields; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_carries_exactly_one_target() {
        let actor = Uuid::new_v4();
        let id = Uuid::new_v4();

        let like = Like::new(actor, LikeTarget::Comment(id));
        assert_eq!(like.target(), Some(LikeTarget::Comment(id)));
        assert!(like.video_id.is_none());
        assert!(like.tweet_id.is_none());

        // a malformed row (two populated targets) resolves to no target
        let mut broken = like.clone();
        broken.video_id = Some(Uuid::new_v4());
        assert_eq!(broken.target(), None);
    }

    #[test]
    fn toggle_outcomes_serialize_with_a_state_tag() {
        let like = Like::new(Uuid::new_v4(), LikeTarget::Video(Uuid::new_v4()));
        let json = serde_json::to_value(LikeToggle::Liked { like }).unwrap();
        assert_eq!(json["state"], "liked");
        assert!(json["like"]["id"].is_string());

        let json = serde_json::to_value(LikeToggle::Unliked).unwrap();
        assert_eq!(json["state"], "unliked");

        let json = serde_json::to_value(SubscriptionToggle::Unsubscribed).unwrap();
        assert_eq!(json["state"], "unsubscribed");
    }

    #[test]
    fn page_offsets_scale_with_limit() {
        let query = VideoListQuery {
            page: 3,
            limit: 5,
            ..Default::default()
        };
        assert_eq!(query.offset(), 10);

        // page 0 and page 1 both start at the beginning
        let query = VideoListQuery {
            page: 0,
            ..Default::default()
        };
        assert_eq!(query.offset(), 0);

        assert_eq!(CommentListQuery::default().offset(), 0);
        assert_eq!(CommentListQuery { page: 4, limit: 10 }.offset(), 30);
    }
}
