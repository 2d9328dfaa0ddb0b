use serde::Deserialize;
use utoipa::ToSchema;

/// The JSON a browser's `PushManager.subscribe()` produces, posted as-is by
/// the front-end. `expirationTime` is accepted and ignored.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    pub endpoint: String,
    #[serde(default)]
    pub expiration_time: Option<f64>,
    pub keys: SubscriptionKeys,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscriptionKeys {
    pub p256dh: String,
    pub auth: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_browser_subscription_json() {
        let json = r#"{
            "endpoint": "https://fcm.googleapis.com/fcm/send/abc123",
            "expirationTime": null,
            "keys": {
                "p256dh": "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA_0QTpQtUbVlUls0VJXg7A8u-Ts1XbjhazAkj7I99e8QcYP7DkM",
                "auth": "tBHItJI5svbpez7KI4CCXg"
            }
        }"#;

        let req: SubscribeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.endpoint, "https://fcm.googleapis.com/fcm/send/abc123");
        assert!(req.expiration_time.is_none());
        assert_eq!(req.keys.auth, "tBHItJI5svbpez7KI4CCXg");
    }
}
