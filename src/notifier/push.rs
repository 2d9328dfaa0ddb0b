use axum::async_trait;
use serde::Serialize;
use std::time::Duration;
use web_push::{
    ContentEncoding, IsahcWebPushClient, SubscriptionInfo, VapidSignatureBuilder, WebPushClient,
    WebPushError, WebPushMessageBuilder, URL_SAFE_NO_PAD,
};

use crate::subscription::subscription_models::PushSubscription;

/// What a push payload looks like on the wire: the service worker reads
/// `{title, body}` and shows the notification.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
}

/// Terminal result of one delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PushOutcome {
    Delivered,
    /// Anything recoverable or unknown. Never retried within a tick.
    TransientFailure,
    /// The push service no longer knows this endpoint; the stored
    /// subscription should be removed.
    SubscriptionGone,
}

#[async_trait]
pub trait PushClient: Send + Sync {
    async fn send(&self, subscription: &PushSubscription, payload: &PushPayload) -> PushOutcome;
}

/// Delivery via the Web Push protocol with VAPID authentication.
pub struct WebPushSender {
    client: IsahcWebPushClient,
    vapid_private_key: String,
    vapid_subject: String,
}

// Bound on a single delivery attempt so a hung push service cannot stall a
// scan indefinitely.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(30);

impl WebPushSender {
    pub fn new(vapid_private_key: String, vapid_subject: String) -> Result<Self, WebPushError> {
        Ok(Self {
            client: IsahcWebPushClient::new()?,
            vapid_private_key,
            vapid_subject,
        })
    }

    async fn try_send(
        &self,
        subscription: &PushSubscription,
        payload: &PushPayload,
    ) -> Result<(), WebPushError> {
        let info = SubscriptionInfo::new(
            subscription.endpoint.clone(),
            subscription.p256dh.clone(),
            subscription.auth.clone(),
        );

        let mut signature =
            VapidSignatureBuilder::from_base64(&self.vapid_private_key, URL_SAFE_NO_PAD, &info)?;
        signature.add_claim("sub", self.vapid_subject.clone());

        let body = serde_json::to_vec(payload)
            .map_err(|e| WebPushError::Other(format!("payload serialization: {}", e)))?;

        let mut builder = WebPushMessageBuilder::new(&info);
        builder.set_payload(ContentEncoding::Aes128Gcm, &body);
        builder.set_vapid_signature(signature.build()?);

        let message = builder.build()?;

        match tokio::time::timeout(DELIVERY_TIMEOUT, self.client.send(message)).await {
            Ok(result) => result,
            Err(_) => Err(WebPushError::Other("delivery timed out".to_string())),
        }
    }
}

#[async_trait]
impl PushClient for WebPushSender {
    async fn send(&self, subscription: &PushSubscription, payload: &PushPayload) -> PushOutcome {
        match self.try_send(subscription, payload).await {
            Ok(()) => PushOutcome::Delivered,
            // 404/410 both mean the browser dropped the endpoint for good
            Err(WebPushError::EndpointNotValid) | Err(WebPushError::EndpointNotFound) => {
                PushOutcome::SubscriptionGone
            }
            Err(e) => {
                tracing::warn!(user_id = %subscription.user_id, "Push delivery failed: {:?}", e);
                PushOutcome::TransientFailure
            }
        }
    }
}
