pub mod comments;
pub mod likes;
pub mod memory;
pub mod subscriptions;
pub mod traits;
pub mod tweets;
pub mod users;
pub mod videos;

pub use comments::PgCommentRepository;
pub use likes::PgLikeRepository;
pub use memory::MemoryStore;
pub use subscriptions::PgSubscriptionRepository;
pub use traits::{
    CommentStore, LikeStore, MediaStore, NoopMediaStore, OwnerResolver, StoreOwnerResolver,
    SubscriptionStore, TweetStore, UserStore, VideoStore,
};
pub use tweets::PgTweetRepository;
pub use users::PgUserRepository;
pub use videos::PgVideoRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::error::ServiceResult;

/// Open a Postgres pool for the production store backend.
pub async fn connect(config: &DatabaseConfig) -> ServiceResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await?;

    Ok(pool)
}
