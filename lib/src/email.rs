/// Email request and response records exchanged with a `Mailer`.
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

use crate::Error;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailRequest {
    pub recipient_email: String,

    /// Defaults to the sender the mailer was initialized with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_email: Option<String>,

    /// Defaults to the domain of the sender address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,

    /// Defaults to "No Subject"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Plain text or HTML body
    pub message: String,

    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub filename: String,

    /// MIME type of attachment (e.g., text/plain)
    pub mime_type: String,

    /// Standard base64 of the attachment bytes
    pub content: String,
}

/// Outcome of a single send.
///
/// A provider-side rejection is still a `SendEmailResponse`, with `sent`
/// set to false and the provider status filled in.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendEmailResponse {
    pub sent: bool,
    pub status: Option<u16>,
    pub status_text: Option<String>,
    pub response_url: Option<String>,
    pub message: String,
    pub gmail_response: Option<serde_json::Value>,
}

impl SendEmailRequest {
    pub fn new(recipient_email: &str, message: String) -> Self {
        Self {
            recipient_email: recipient_email.to_string(),
            message,
            ..Default::default()
        }
    }

    pub fn with_subject(mut self, subject: String) -> Self {
        self.subject = Some(subject);
        self
    }

    pub fn with_sender_email(mut self, sender_email: &str) -> Self {
        self.sender_email = Some(sender_email.to_string());
        self
    }

    pub fn with_sender_name(mut self, sender_name: &str) -> Self {
        self.sender_name = Some(sender_name.to_string());
        self
    }

    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

impl Attachment {
    pub fn from_bytes(filename: &str, mime_type: &str, data: &[u8]) -> Self {
        Self {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            content: STANDARD.encode(data),
        }
    }

    pub fn from_text(filename: &str, mime_type: &str, text: &str) -> Self {
        Self::from_bytes(filename, mime_type, text.as_bytes())
    }

    /// Read `path` and attach its bytes under `filename`.
    pub async fn from_file(filename: &str, mime_type: &str, path: &Path) -> Result<Self, Error> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            log::error!("Failed to read attachment {}: {}", path.display(), e);
            Error::Io(format!("{}: {}", path.display(), e))
        })?;

        Ok(Self::from_bytes(filename, mime_type, &data))
    }

    pub fn decode(&self) -> Result<Vec<u8>, Error> {
        STANDARD.decode(&self.content).map_err(|e| e.into())
    }
}

impl SendEmailResponse {
    /// Response for a request rejected before reaching the provider
    pub fn rejected(message: String) -> Self {
        Self {
            sent: false,
            message,
            ..Default::default()
        }
    }
}
