//! End-to-end flows across the toggle, ownership and aggregation engines,
//! wired against the in-memory store backend.

use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use engagement_service::domain::models::{
    LikeTarget, NewVideo, SortDirection, User, Video, VideoListQuery, VideoSortField,
};
use engagement_service::repository::memory::MemoryStore;
use engagement_service::repository::traits::{NoopMediaStore, UserStore, VideoStore};
use engagement_service::services::{
    DashboardService, LikeService, SubscriptionService, VideoService,
};

struct Harness {
    store: Arc<MemoryStore>,
    likes: LikeService,
    subscriptions: SubscriptionService,
    videos: VideoService,
    dashboard: DashboardService,
}

fn harness() -> Harness {
    let store = Arc::new(MemoryStore::new());
    Harness {
        likes: LikeService::new(store.clone()),
        subscriptions: SubscriptionService::new(store.clone(), store.clone()),
        videos: VideoService::new(store.clone(), store.clone(), Arc::new(NoopMediaStore)),
        dashboard: DashboardService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
        ),
        store,
    }
}

fn user(username: &str) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.into(),
        full_name: username.to_uppercase(),
        avatar: None,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn like_toggle_drives_channel_stats() {
    let h = harness();
    let creator = user("creator");
    let fan = user("fan");
    h.store.insert_user(&creator).await.unwrap();
    h.store.insert_user(&fan).await.unwrap();

    let video = h
        .videos
        .publish(
            creator.id,
            NewVideo {
                title: "first upload".into(),
                description: "hello world".into(),
                video_file: "blob://first/file".into(),
                thumbnail: "blob://first/thumb".into(),
                duration: 42.0,
            },
        )
        .await
        .unwrap();

    let outcome = h
        .likes
        .toggle(fan.id, LikeTarget::Video(video.id))
        .await
        .unwrap();
    assert!(outcome.is_liked());

    // the like counts for the video's owner, not for the liking actor
    let stats = h.dashboard.channel_stats(creator.id).await.unwrap();
    assert_eq!(stats.total_likes, 1);
    assert_eq!(stats.total_videos, 1);
    assert_eq!(h.dashboard.channel_stats(fan.id).await.unwrap().total_likes, 0);

    let outcome = h
        .likes
        .toggle(fan.id, LikeTarget::Video(video.id))
        .await
        .unwrap();
    assert!(!outcome.is_liked());
    assert_eq!(
        h.dashboard.channel_stats(creator.id).await.unwrap().total_likes,
        0
    );
}

#[tokio::test]
async fn subscription_round_trip_updates_both_lists() {
    let h = harness();
    let alice = user("alice");
    let bob = user("bob");
    h.store.insert_user(&alice).await.unwrap();
    h.store.insert_user(&bob).await.unwrap();

    let outcome = h.subscriptions.toggle(bob.id, "alice").await.unwrap();
    assert!(outcome.is_subscribed());

    assert_eq!(
        h.subscriptions.subscribers(alice.id).await.unwrap(),
        vec![bob.id]
    );
    assert_eq!(
        h.subscriptions.subscribed_channels(bob.id).await.unwrap(),
        vec![alice.id]
    );

    let stats = h.dashboard.channel_stats(alice.id).await.unwrap();
    assert_eq!(stats.subscriber_count, 1);
    let stats = h.dashboard.channel_stats(bob.id).await.unwrap();
    assert_eq!(stats.subscribed_channel_count, 1);

    let outcome = h.subscriptions.toggle(bob.id, "alice").await.unwrap();
    assert!(!outcome.is_subscribed());
    assert!(h.subscriptions.subscribers(alice.id).await.unwrap().is_empty());
    assert!(h
        .subscriptions
        .subscribed_channels(bob.id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn deleting_a_liked_video_deflates_stats_but_not_the_edge() {
    let h = harness();
    let creator = user("creator");
    let fan = user("fan");
    h.store.insert_user(&creator).await.unwrap();
    h.store.insert_user(&fan).await.unwrap();

    let video = h
        .videos
        .publish(
            creator.id,
            NewVideo {
                title: "ephemeral".into(),
                description: String::new(),
                video_file: "blob://e/file".into(),
                thumbnail: "blob://e/thumb".into(),
                duration: 5.0,
            },
        )
        .await
        .unwrap();

    h.likes
        .toggle(fan.id, LikeTarget::Video(video.id))
        .await
        .unwrap();
    assert_eq!(
        h.dashboard.channel_stats(creator.id).await.unwrap().total_likes,
        1
    );

    h.videos.delete(creator.id, video.id).await.unwrap();

    // dangling edge survives but contributes nothing
    assert_eq!(h.likes.liked_videos(fan.id).await.unwrap().len(), 1);
    assert_eq!(
        h.dashboard.channel_stats(creator.id).await.unwrap().total_likes,
        0
    );
}

/// Seed 12 videos with strictly increasing timestamps and views.
async fn seed_videos(store: &MemoryStore, owner_id: Uuid) -> Vec<Uuid> {
    let base = Utc::now();
    let mut ids = Vec::new();
    for i in 0..12i64 {
        let created = base + Duration::seconds(i);
        let video = Video {
            id: Uuid::new_v4(),
            owner_id,
            title: format!("video {i:02}"),
            description: String::new(),
            video_file: format!("blob://{i}/file"),
            thumbnail: format!("blob://{i}/thumb"),
            duration: 30.0 + i as f64,
            views: i * 10,
            is_published: i % 2 == 0,
            created_at: created,
            updated_at: created,
        };
        store.insert_video(&video).await.unwrap();
        ids.push(video.id);
    }
    ids
}

#[tokio::test]
async fn pagination_is_a_deterministic_non_overlapping_continuation() {
    let h = harness();
    let channel = user("channel");
    h.store.insert_user(&channel).await.unwrap();
    let ids = seed_videos(&h.store, channel.id).await;

    let query = |page| VideoListQuery {
        page,
        limit: 5,
        sort_by: VideoSortField::CreatedAt,
        direction: SortDirection::Descending,
    };

    let first = h.videos.list_for_channel("channel", query(1)).await.unwrap();
    let second = h.videos.list_for_channel("channel", query(2)).await.unwrap();
    let third = h.videos.list_for_channel("channel", query(3)).await.unwrap();
    let fourth = h.videos.list_for_channel("channel", query(4)).await.unwrap();

    // newest first: ids reversed, in windows of five
    let newest_first: Vec<Uuid> = ids.iter().rev().copied().collect();
    let got: Vec<Uuid> = first
        .videos
        .iter()
        .chain(second.videos.iter())
        .chain(third.videos.iter())
        .map(|v| v.id)
        .collect();
    assert_eq!(got, newest_first);

    assert_eq!(first.length, 5);
    assert_eq!(second.length, 5);
    assert_eq!(third.length, 2);

    // next_page advances unconditionally, exhaustion is an empty page
    assert_eq!(second.next_page, 3);
    assert_eq!(fourth.length, 0);
    assert_eq!(fourth.next_page, 5);
}

#[tokio::test]
async fn dashboard_listing_and_stats_cover_unpublished_videos() {
    let h = harness();
    let channel = user("channel");
    h.store.insert_user(&channel).await.unwrap();
    seed_videos(&h.store, channel.id).await;

    let listed = h.dashboard.channel_videos(channel.id).await.unwrap();
    assert_eq!(listed.len(), 12);

    let stats = h.dashboard.channel_stats(channel.id).await.unwrap();
    assert_eq!(stats.total_videos, 12);
    // views were seeded as 0, 10, ..., 110
    assert_eq!(stats.total_views, (0..12).map(|i| i * 10).sum::<i64>());
}
