use crate::error::{AppError, Result};
use serde_json::json;

/// Outbound email via an HTTP mail API (SendGrid v3 shape).
#[derive(Clone)]
pub struct Mailer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl Mailer {
    pub fn new(api_url: String, api_key: String, from: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from,
        }
    }

    pub async fn send_password_reset(&self, to: &str, reset_url: &str) -> Result<()> {
        let body = json!({
            "personalizations": [{ "to": [{ "email": to }] }],
            "from": { "email": self.from, "name": "Personal Assistant" },
            "subject": "Password reset",
            "content": [{
                "type": "text/html",
                "value": format!(
                    "<p>To reset your password, follow this link: <a href=\"{url}\">{url}</a></p>",
                    url = reset_url
                ),
            }],
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach mail API: {:?}", e);
                AppError::InternalError
            })?;

        if !response.status().is_success() {
            tracing::error!("Mail API rejected message: {}", response.status());
            return Err(AppError::InternalError);
        }

        Ok(())
    }
}
