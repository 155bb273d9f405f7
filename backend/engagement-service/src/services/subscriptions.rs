/// Subscription toggle engine.
///
/// Unlike the like path, the channel handle is resolved against the user
/// collection before any edge is touched, so a subscription can never
/// dangle on the channel side.
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::models::{Subscription, SubscriptionToggle};
use crate::error::{ServiceError, ServiceResult};
use crate::repository::traits::{SubscriptionStore, UserStore};

#[derive(Clone)]
pub struct SubscriptionService {
    users: Arc<dyn UserStore>,
    subscriptions: Arc<dyn SubscriptionStore>,
}

impl SubscriptionService {
    pub fn new(users: Arc<dyn UserStore>, subscriptions: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            users,
            subscriptions,
        }
    }

    async fn resolve_channel(&self, channel_handle: &str) -> ServiceResult<Uuid> {
        self.users
            .find_user_by_username(channel_handle)
            .await?
            .map(|u| u.id)
            .ok_or_else(|| ServiceError::NotFound(format!("channel '{channel_handle}' not found")))
    }

    /// Flip the edge between the actor and the channel named by `channel_handle`.
    ///
    /// Self-subscription is rejected; a channel is not part of its own
    /// audience.
    pub async fn toggle(
        &self,
        actor_id: Uuid,
        channel_handle: &str,
    ) -> ServiceResult<SubscriptionToggle> {
        let channel_id = self.resolve_channel(channel_handle).await?;

        if channel_id == actor_id {
            return Err(ServiceError::InvalidInput(
                "cannot subscribe to own channel".into(),
            ));
        }

        if self
            .subscriptions
            .delete_subscription_if_present(actor_id, channel_id)
            .await?
        {
            tracing::info!(subscriber = %actor_id, channel = %channel_id, "unsubscribed");
            return Ok(SubscriptionToggle::Unsubscribed);
        }

        let subscription = Subscription::new(actor_id, channel_id);
        self.subscriptions
            .insert_subscription_if_absent(&subscription)
            .await?;
        tracing::info!(subscriber = %actor_id, channel = %channel_id, "subscribed");

        Ok(SubscriptionToggle::Subscribed { subscription })
    }

    /// Whether the actor currently subscribes to the channel handle.
    pub async fn is_subscribed(&self, actor_id: Uuid, channel_handle: &str) -> ServiceResult<bool> {
        let channel_id = self.resolve_channel(channel_handle).await?;
        self.subscriptions
            .subscription_exists(actor_id, channel_id)
            .await
    }

    /// Subscriber ids of a channel; empty when nobody subscribes.
    pub async fn subscribers(&self, channel_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        self.subscriptions.subscribers_of(channel_id).await
    }

    /// Channel ids a user subscribes to; empty when there are none.
    pub async fn subscribed_channels(&self, subscriber_id: Uuid) -> ServiceResult<Vec<Uuid>> {
        self.subscriptions.channels_of(subscriber_id).await
    }
}
