/// Video operations: publish, owner-gated mutation, and the public paginated
/// listing. Media bytes never pass through here; the engine only stores blob
/// locators and hands them to the media store collaborator on delete.
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::models::{NewVideo, Video, VideoListQuery, VideoPage, VideoUpdate};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::traits::{MediaStore, UserStore, VideoStore};
use crate::services::ownership::ensure_owner;

#[derive(Clone)]
pub struct VideoService {
    videos: Arc<dyn VideoStore>,
    users: Arc<dyn UserStore>,
    media: Arc<dyn MediaStore>,
}

impl VideoService {
    pub fn new(
        videos: Arc<dyn VideoStore>,
        users: Arc<dyn UserStore>,
        media: Arc<dyn MediaStore>,
    ) -> Self {
        Self {
            videos,
            users,
            media,
        }
    }

    async fn require_video(&self, video_id: Uuid) -> ServiceResult<Video> {
        self.videos
            .find_video(video_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("video {video_id} not found")))
    }

    /// Publish a new video owned by the actor.
    pub async fn publish(&self, actor_id: Uuid, new_video: NewVideo) -> ServiceResult<Video> {
        if new_video.title.trim().is_empty() && new_video.description.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "title or description is required".into(),
            ));
        }

        let now = Utc::now();
        let video = Video {
            id: Uuid::new_v4(),
            owner_id: actor_id,
            title: new_video.title,
            description: new_video.description,
            video_file: new_video.video_file,
            thumbnail: new_video.thumbnail,
            duration: new_video.duration,
            views: 0,
            is_published: true,
            created_at: now,
            updated_at: now,
        };
        self.videos.insert_video(&video).await?;
        tracing::info!(video = %video.id, owner = %actor_id, "video published");

        Ok(video)
    }

    pub async fn get(&self, video_id: Uuid) -> ServiceResult<Video> {
        self.require_video(video_id).await
    }

    /// Bump the monotonic view counter.
    pub async fn record_view(&self, video_id: Uuid) -> ServiceResult<()> {
        self.require_video(video_id).await?;
        self.videos.record_view(video_id).await
    }

    /// Owner-gated update of title, description and thumbnail.
    pub async fn update(
        &self,
        actor_id: Uuid,
        video_id: Uuid,
        update: VideoUpdate,
    ) -> ServiceResult<Video> {
        let mut video = self.require_video(video_id).await?;
        ensure_owner(actor_id, &video)?;

        if let Some(title) = update.title {
            video.title = title;
        }
        if let Some(description) = update.description {
            video.description = description;
        }
        if let Some(thumbnail) = update.thumbnail {
            // the superseded thumbnail is blob-store garbage now
            self.media.delete_asset(&video.thumbnail).await?;
            video.thumbnail = thumbnail;
        }
        video.updated_at = Utc::now();
        self.videos.update_video(&video).await?;

        Ok(video)
    }

    /// Owner-gated delete; blob locators are released first.
    pub async fn delete(&self, actor_id: Uuid, video_id: Uuid) -> ServiceResult<()> {
        let video = self.require_video(video_id).await?;
        ensure_owner(actor_id, &video)?;

        self.media.delete_asset(&video.video_file).await?;
        self.media.delete_asset(&video.thumbnail).await?;
        self.videos.delete_video(video_id).await?;
        tracing::info!(video = %video_id, owner = %actor_id, "video deleted");

        Ok(())
    }

    /// Owner-gated flip of the publish flag.
    pub async fn toggle_publish(&self, actor_id: Uuid, video_id: Uuid) -> ServiceResult<Video> {
        let mut video = self.require_video(video_id).await?;
        ensure_owner(actor_id, &video)?;

        video.is_published = !video.is_published;
        video.updated_at = Utc::now();
        self.videos.update_video(&video).await?;

        Ok(video)
    }

    /// Public paginated listing of a channel's videos by handle.
    ///
    /// `next_page` is always `page + 1`; callers detect exhaustion by an
    /// empty page.
    pub async fn list_for_channel(
        &self,
        username: &str,
        query: VideoListQuery,
    ) -> ServiceResult<VideoPage> {
        let owner = self
            .users
            .find_user_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user '{username}' not found")))?;

        let videos = self
            .videos
            .videos_page(
                owner.id,
                query.sort_by,
                query.direction,
                query.offset(),
                i64::from(query.limit),
            )
            .await?;

        Ok(VideoPage {
            length: videos.len(),
            next_page: query.page + 1,
            videos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::User;
    use crate::repository::memory::MemoryStore;
    use crate::repository::traits::NoopMediaStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// MediaStore double that records every locator it is asked to delete.
    #[derive(Default)]
    struct RecordingMediaStore {
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl MediaStore for RecordingMediaStore {
        async fn delete_asset(&self, locator: &str) -> ServiceResult<()> {
            self.deleted.lock().unwrap().push(locator.to_string());
            Ok(())
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

    fn new_video(title: &str) -> NewVideo {
        NewVideo {
            title: title.into(),
            description: "desc".into(),
            video_file: format!("blob://{title}/file"),
            thumbnail: format!("blob://{title}/thumb"),
            duration: 12.5,
        }
    }

    fn service(store: Arc<MemoryStore>) -> VideoService {
        VideoService::new(store.clone(), store, Arc::new(NoopMediaStore))
    }

    #[tokio::test]
    async fn publish_rejects_blank_metadata() {
        let svc = service(Arc::new(MemoryStore::new()));
        let mut blank = new_video("");
        blank.description = "  ".into();

        let err = svc.publish(Uuid::new_v4(), blank).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn update_requires_ownership() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(store);
        let owner = Uuid::new_v4();
        let video = svc.publish(owner, new_video("mine")).await.unwrap();

        let update = VideoUpdate {
            title: Some("stolen".into()),
            ..Default::default()
        };
        let err = svc
            .update(Uuid::new_v4(), video.id, update)
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());

        // NotFound takes precedence over Unauthorized
        let err = svc
            .update(Uuid::new_v4(), Uuid::new_v4(), VideoUpdate::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_releases_blob_locators() {
        let store = Arc::new(MemoryStore::new());
        let media = Arc::new(RecordingMediaStore::default());
        let svc = VideoService::new(store.clone(), store.clone(), media.clone());

        let owner = Uuid::new_v4();
        let video = svc.publish(owner, new_video("gone")).await.unwrap();

        svc.delete(owner, video.id).await.unwrap();

        assert!(store.find_video(video.id).await.unwrap().is_none());
        let deleted = media.deleted.lock().unwrap();
        assert_eq!(*deleted, vec![video.video_file, video.thumbnail]);
    }

    #[tokio::test]
    async fn delete_by_non_owner_leaves_everything_in_place() {
        let store = Arc::new(MemoryStore::new());
        let media = Arc::new(RecordingMediaStore::default());
        let svc = VideoService::new(store.clone(), store.clone(), media.clone());

        let video = svc
            .publish(Uuid::new_v4(), new_video("keep"))
            .await
            .unwrap();

        let err = svc.delete(Uuid::new_v4(), video.id).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(store.find_video(video.id).await.unwrap().is_some());
        assert!(media.deleted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn toggle_publish_flips_the_flag() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(store);
        let owner = Uuid::new_v4();
        let video = svc.publish(owner, new_video("flag")).await.unwrap();
        assert!(video.is_published);

        let video = svc.toggle_publish(owner, video.id).await.unwrap();
        assert!(!video.is_published);
        let video = svc.toggle_publish(owner, video.id).await.unwrap();
        assert!(video.is_published);
    }

    #[tokio::test]
    async fn listing_for_unknown_handle_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let svc = service(store);

        let err = svc
            .list_for_channel("ghost", VideoListQuery::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn empty_page_still_advances_next_page() {
        let store = Arc::new(MemoryStore::new());
        let channel = user("alice");
        store.insert_user(&channel).await.unwrap();
        let svc = service(store);

        let query = VideoListQuery {
            page: 3,
            ..Default::default()
        };
        let page = svc.list_for_channel("alice", query).await.unwrap();
        assert!(page.videos.is_empty());
        assert_eq!(page.length, 0);
        assert_eq!(page.next_page, 4);
    }
}
