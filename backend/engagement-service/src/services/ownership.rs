/// Ownership guard for owned content.
///
/// Runs after existence is confirmed (NotFound wins over Unauthorized) and
/// before any mutation is applied.
use uuid::Uuid;

use crate::domain::models::{Comment, Tweet, Video};
use crate::error::{ServiceError, ServiceResult};

/// Content with a single accountable owner.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
    fn kind() -> &'static str;
}

impl Owned for Video {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
    fn kind() -> &'static str {
        "video"
    }
}

impl Owned for Tweet {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
    fn kind() -> &'static str {
        "tweet"
    }
}

impl Owned for Comment {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
    fn kind() -> &'static str {
        "comment"
    }
}

/// Allow iff the acting identity owns the resource.
pub fn ensure_owner<R: Owned>(actor_id: Uuid, resource: &R) -> ServiceResult<()> {
    if resource.owner_id() == actor_id {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized(format!(
            "actor is not the owner of this {}",
            R::kind()
        )))
    }
}
