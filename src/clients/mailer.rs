use axum::async_trait;
use base64::Engine;
use bytes::Bytes;
use serde_json::json;

use crate::config::MailerConfig;

#[derive(Debug, Clone)]
pub struct Attachment {
    pub name: String,
    pub content_type: String,
    pub data: Bytes,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachments: &[Attachment],
    ) -> anyhow::Result<()>;
}

/// Transactional-email HTTP client. Payload shape follows the Azure
/// Communication Services email API: JSON message with base64 attachments.
pub struct HttpMailer {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    sender_address: String,
}

impl HttpMailer {
    pub fn new(cfg: &MailerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: cfg.endpoint.clone(),
            api_key: cfg.api_key.clone(),
            sender_address: cfg.sender_address.clone(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
        attachments: &[Attachment],
    ) -> anyhow::Result<()> {
        let encoded: Vec<_> = attachments
            .iter()
            .map(|a| {
                json!({
                    "name": a.name,
                    "contentType": a.content_type,
                    "contentInBase64":
                        base64::engine::general_purpose::STANDARD.encode(&a.data),
                })
            })
            .collect();

        let message = json!({
            "senderAddress": self.sender_address,
            "recipients": { "to": [{ "address": to }] },
            "content": {
                "subject": subject,
                "plainText": body,
                "html": format!("<html><body>{body}</body></html>"),
            },
            "attachments": encoded,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("mail service returned {status}: {detail}");
        }
        Ok(())
    }
}
