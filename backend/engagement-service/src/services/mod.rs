pub mod comments;
pub mod dashboard;
pub mod likes;
pub mod ownership;
pub mod subscriptions;
pub mod tweets;
pub mod videos;

pub use comments::CommentService;
pub use dashboard::DashboardService;
pub use likes::LikeService;
pub use subscriptions::SubscriptionService;
pub use tweets::TweetService;
pub use videos::VideoService;
