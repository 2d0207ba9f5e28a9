use std::time::Duration;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use futures::future::FutureExt;
use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, Mailbox, MultiPart, SinglePart};
use lettre::{Address, Message};

use super::api::{self, ServiceAccountKey};
use super::auth::TokenManager;
use super::Error;

use crate::email::{SendEmailRequest, SendEmailResponse};
use crate::mailer::{Mailer, MailerFuture};

const DEFAULT_SUBJECT: &str = "No Subject";

/// Gmail API client authenticated as a service account that impersonates
/// the configured sender mailbox.
pub struct GmailClient {
    sender_email: String,
    base_url: String,
    client: reqwest::Client,
    tokens: TokenManager,
}

impl GmailClient {
    /// Build a client without contacting Google
    pub fn new(key: ServiceAccountKey, sender_email: &str) -> Result<Self, Error> {
        key.validate()?;

        if sender_email.parse::<Address>().is_err() {
            return Err(Error::InvalidSender(sender_email.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(api::GMAIL_REQUEST_TIMEOUT))
            .build()?;

        Ok(Self {
            sender_email: sender_email.to_string(),
            base_url: api::GMAIL_BASE_API.to_string(),
            tokens: TokenManager::new(key, sender_email.to_string(), client.clone()),
            client,
        })
    }

    /// Build a client and fetch a first access token, so bad credentials
    /// surface at startup rather than on the first send
    pub async fn initialize(key: ServiceAccountKey, sender_email: &str) -> Result<Self, Error> {
        let client = Self::new(key, sender_email)?;
        client.tokens.token().await?;

        log::info!("Gmail client initialized for {}", client.sender_email);

        Ok(client)
    }

    /// Assemble the MIME message for `request`.
    /// Any `Error::MessageBuild` here is reported to the caller as a
    /// non-sent response rather than a failure.
    pub fn compose(&self, request: &SendEmailRequest) -> Result<Message, Error> {
        let sender_email = request.sender_email.as_deref().unwrap_or(&self.sender_email);
        let sender_name = request
            .sender_name
            .clone()
            .unwrap_or_else(|| default_sender_name(sender_email));

        let from = sender_email
            .parse::<Address>()
            .map(|a| Mailbox::new(Some(sender_name), a))
            .map_err(|_| Error::MessageBuild(format!("Invalid sender email address: {}", sender_email)))?;

        let to = request.recipient_email.parse::<Mailbox>().map_err(|_| {
            Error::MessageBuild(format!("Invalid recipient email address: {}", request.recipient_email))
        })?;

        let builder = Message::builder()
            .from(from)
            .to(to)
            .subject(request.subject.as_deref().unwrap_or(DEFAULT_SUBJECT));

        let body = if looks_like_html(&request.message) {
            SinglePart::html(request.message.clone())
        } else {
            SinglePart::plain(request.message.clone())
        };

        if request.attachments.is_empty() {
            return Ok(builder.singlepart(body)?);
        }

        let mut parts = MultiPart::mixed().singlepart(body);

        for attachment in request.attachments.iter() {
            let data = attachment
                .decode()
                .map_err(|e| Error::MessageBuild(format!("{}: {}", attachment.filename, e)))?;
            let content_type = ContentType::parse(&attachment.mime_type).map_err(|_| {
                Error::MessageBuild(format!("Invalid MIME type for {}: {}", attachment.filename, attachment.mime_type))
            })?;

            parts = parts.singlepart(MimeAttachment::new(attachment.filename.clone()).body(data, content_type));
        }

        Ok(builder.multipart(parts)?)
    }

    async fn send(&self, request: &SendEmailRequest) -> Result<SendEmailResponse, Error> {
        let message = match self.compose(request) {
            Ok(m) => m,
            Err(Error::MessageBuild(msg)) => {
                log::warn!("Not sending email to {}: {}", request.recipient_email, msg);
                return Ok(SendEmailResponse::rejected(msg));
            }
            Err(e) => return Err(e),
        };

        let raw = URL_SAFE_NO_PAD.encode(message.formatted());
        let url = api::build_endpoint_url(
            &self.base_url,
            api::Endpoint::SendMessage {
                user_id: &self.sender_email,
            },
        );

        let token = self.tokens.token().await?;

        let resp = self
            .client
            .post(reqwest::Url::parse(&url)?)
            .bearer_auth(token)
            .json(&serde_json::json!({ "raw": raw }))
            .send()
            .await?;

        let status = resp.status();
        let body: serde_json::Value = resp.json().await.unwrap_or(serde_json::Value::Null);

        log::info!("Gmail replied {} for email to {}", status, request.recipient_email);

        Ok(SendEmailResponse {
            sent: status.is_success(),
            status: Some(status.as_u16()),
            status_text: status.canonical_reason().map(String::from),
            message: api::status_message(status, &body),
            response_url: Some(url),
            gmail_response: if body.is_null() { None } else { Some(body) },
        })
    }
}

impl Mailer for GmailClient {
    fn send_email<'a>(&'a self, request: &'a SendEmailRequest) -> MailerFuture<'a, SendEmailResponse> {
        async move { self.send(request).await.map_err(crate::Error::from) }.boxed()
    }
}

/// "no-reply@somnuslabs.com" -> "somnuslabs.com"
pub fn default_sender_name(sender_email: &str) -> String {
    match sender_email.rsplit_once('@') {
        Some((_, domain)) if !domain.is_empty() => domain.to_string(),
        _ => sender_email.to_string(),
    }
}

/// True if the body contains something shaped like an HTML tag
pub fn looks_like_html(body: &str) -> bool {
    let bytes = body.as_bytes();

    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'<'
            && bytes.get(i + 1).map_or(false, |c| c.is_ascii_alphabetic())
            && bytes[i + 1..].contains(&b'>')
    })
}
