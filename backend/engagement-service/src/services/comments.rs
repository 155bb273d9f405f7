/// Comment operations: create against an existing video, owner-gated
/// mutation, and the paginated per-video listing.
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::models::{Comment, CommentListQuery};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::traits::{CommentStore, VideoStore};
use crate::services::ownership::ensure_owner;

#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    videos: Arc<dyn VideoStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, videos: Arc<dyn VideoStore>) -> Self {
        Self { comments, videos }
    }

    async fn require_video_exists(&self, video_id: Uuid) -> ServiceResult<()> {
        if self.videos.find_video(video_id).await?.is_none() {
            return Err(ServiceError::NotFound(format!("video {video_id} not found")));
        }
        Ok(())
    }

    async fn require_comment(&self, comment_id: Uuid) -> ServiceResult<Comment> {
        self.comments
            .find_comment(comment_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("comment {comment_id} not found")))
    }

    fn require_content(content: &str) -> ServiceResult<()> {
        if content.trim().is_empty() {
            return Err(ServiceError::InvalidInput("content is required".into()));
        }
        Ok(())
    }

    /// Add a comment to an existing video.
    pub async fn add(
        &self,
        actor_id: Uuid,
        video_id: Uuid,
        content: String,
    ) -> ServiceResult<Comment> {
        self.require_video_exists(video_id).await?;
        Self::require_content(&content)?;

        let now = Utc::now();
        let comment = Comment {
            id: Uuid::new_v4(),
            owner_id: actor_id,
            video_id,
            content,
            created_at: now,
            updated_at: now,
        };
        self.comments.insert_comment(&comment).await?;

        Ok(comment)
    }

    /// Owner-gated content edit.
    pub async fn update(
        &self,
        actor_id: Uuid,
        comment_id: Uuid,
        content: String,
    ) -> ServiceResult<Comment> {
        let mut comment = self.require_comment(comment_id).await?;
        ensure_owner(actor_id, &comment)?;
        Self::require_content(&content)?;

        comment.content = content;
        comment.updated_at = Utc::now();
        self.comments.update_comment(&comment).await?;

        Ok(comment)
    }

    /// Owner-gated delete.
    pub async fn delete(&self, actor_id: Uuid, comment_id: Uuid) -> ServiceResult<()> {
        let comment = self.require_comment(comment_id).await?;
        ensure_owner(actor_id, &comment)?;

        self.comments.delete_comment(comment_id).await?;
        Ok(())
    }

    /// One page of a video's comments, oldest first. The video must exist.
    pub async fn list(
        &self,
        video_id: Uuid,
        query: CommentListQuery,
    ) -> ServiceResult<Vec<Comment>> {
        self.require_video_exists(video_id).await?;
        self.comments
            .comments_for_video(video_id, query.offset(), i64::from(query.limit))
            .await
    }
}
