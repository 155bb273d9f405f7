/// Like toggle engine.
///
/// A toggle is two atomic store operations, not a check-then-act pair: the
/// conditional delete either removes the edge or proves it absent, and the
/// conditional insert cannot produce a duplicate. Under concurrent toggles on
/// the same (actor, target) the reported state is last-write-wins, which is
/// the documented contract for a like button.
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::models::{Like, LikeTarget, LikeToggle};
use crate::error::ServiceResult;
use crate::repository::traits::LikeStore;

#[derive(Clone)]
pub struct LikeService {
    likes: Arc<dyn LikeStore>,
}

impl LikeService {
    pub fn new(likes: Arc<dyn LikeStore>) -> Self {
        Self { likes }
    }

    /// Flip the edge for `(actor, target)`.
    ///
    /// Target existence is deliberately not validated here: a like on a
    /// since-deleted video becomes a dangling edge, which attribution later
    /// ignores. Callers that need referential integrity pre-check themselves.
    pub async fn toggle(&self, actor_id: Uuid, target: LikeTarget) -> ServiceResult<LikeToggle> {
        if self.likes.delete_like_if_present(actor_id, target).await? {
            tracing::debug!(
                actor = %actor_id,
                kind = target.kind(),
                target = %target.id(),
                "like removed"
            );
            return Ok(LikeToggle::Unliked);
        }

        let like = Like::new(actor_id, target);
        self.likes.insert_like_if_absent(&like).await?;
        tracing::debug!(
            actor = %actor_id,
            kind = target.kind(),
            target = %target.id(),
            "like added"
        );

        Ok(LikeToggle::Liked { like })
    }

    /// Like edges by this actor whose target is a video. Returns the edges
    /// themselves; callers resolve videos separately if they need documents.
    pub async fn liked_videos(&self, actor_id: Uuid) -> ServiceResult<Vec<Like>> {
        self.likes.liked_videos(actor_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::MemoryStore;

    fn service() -> (LikeService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (LikeService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn two_toggles_cancel_out() {
        let (svc, store) = service();
        let actor = Uuid::new_v4();
        let target = LikeTarget::Video(Uuid::new_v4());

        assert!(svc.toggle(actor, target).await.unwrap().is_liked());
        assert!(!svc.toggle(actor, target).await.unwrap().is_liked());
        assert!(store.all_likes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn three_toggles_leave_the_edge_present() {
        let (svc, store) = service();
        let actor = Uuid::new_v4();
        let target = LikeTarget::Comment(Uuid::new_v4());

        for _ in 0..3 {
            svc.toggle(actor, target).await.unwrap();
        }
        assert_eq!(store.all_likes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn never_more_than_one_edge_per_pair() {
        let (svc, store) = service();
        let actor = Uuid::new_v4();
        let target = LikeTarget::Tweet(Uuid::new_v4());

        for _ in 0..7 {
            svc.toggle(actor, target).await.unwrap();
        }
        let likes = store.all_likes().await.unwrap();
        assert_eq!(likes.len(), 1);
        assert_eq!(likes[0].liked_by, actor);
        assert_eq!(likes[0].target(), Some(target));
    }

    #[tokio::test]
    async fn toggling_a_missing_target_still_creates_an_edge() {
        // The engine does not validate like targets; dangling edges are
        // allowed and filtered during attribution.
        let (svc, store) = service();
        let actor = Uuid::new_v4();

        let outcome = svc
            .toggle(actor, LikeTarget::Video(Uuid::new_v4()))
            .await
            .unwrap();
        assert!(outcome.is_liked());
        assert_eq!(store.all_likes().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn liked_videos_skips_other_target_kinds() {
        let (svc, _store) = service();
        let actor = Uuid::new_v4();
        let video_id = Uuid::new_v4();

        svc.toggle(actor, LikeTarget::Video(video_id)).await.unwrap();
        svc.toggle(actor, LikeTarget::Tweet(Uuid::new_v4()))
            .await
            .unwrap();
        svc.toggle(actor, LikeTarget::Comment(Uuid::new_v4()))
            .await
            .unwrap();

        let likes = svc.liked_videos(actor).await.unwrap();
        assert_eq!(likes.len(), 1);
        assert_eq!(likes[0].video_id, Some(video_id));
    }
}
