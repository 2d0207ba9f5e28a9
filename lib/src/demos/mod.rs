//! Canned demo emails.
//!
//! Each demo builds a `SendEmailRequest` from a fixed template, reading any
//! attachment sources from the files directory, and hands it to a `Mailer`.
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::email::{SendEmailRequest, SendEmailResponse};
use crate::history::{History, ServerEvent};
use crate::mailer::Mailer;
use crate::Error;

pub mod html_attachment;
pub mod html_email;
pub mod new_purchase;
pub mod plain_text;
pub mod server_status;
pub mod subscription_renewal;

/// Everything the demo builders need besides the mailer
pub struct DemoContext {
    files_dir: PathBuf,
    base_url: String,
    support_email: String,
    history: History,
}

impl DemoContext {
    pub fn new(files_dir: &Path, base_url: &str, support_email: &str) -> Self {
        Self {
            files_dir: files_dir.to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
            support_email: support_email.to_string(),
            history: History::new(files_dir),
        }
    }

    pub fn files_dir(&self) -> &Path {
        &self.files_dir
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Demo {
    HtmlEmail,
    PlainTextEmail,
    HtmlEmailWithAttachment,
    SubscriptionRenewal,
    NewPurchase,
    ServerStatus(ServerEvent),
}

impl Demo {
    /// Label shown in the front-end activity log
    pub fn operation(&self) -> &'static str {
        match *self {
            Self::HtmlEmail => "Send HTML Email",
            Self::PlainTextEmail => "Send Plain Text Email",
            Self::HtmlEmailWithAttachment => "Send HTML Email with Attachment",
            Self::SubscriptionRenewal => "Send Subscription Renewal Email",
            Self::NewPurchase => "Send New Purchase Email",
            Self::ServerStatus(event) => event.label(),
        }
    }

    pub async fn build(&self, ctx: &DemoContext) -> Result<SendEmailRequest, Error> {
        let now = Local::now();

        match *self {
            Self::HtmlEmail => Ok(html_email::build()),
            Self::PlainTextEmail => Ok(plain_text::build()),
            Self::HtmlEmailWithAttachment => html_attachment::build(&ctx.files_dir, now).await,
            Self::SubscriptionRenewal => subscription_renewal::build(&ctx.files_dir, now).await,
            Self::NewPurchase => new_purchase::build(&ctx.files_dir, &ctx.base_url, &ctx.support_email).await,
            Self::ServerStatus(event) => server_status::build(&ctx.history, event, now).await,
        }
    }
}

/// Build `demo` and send it through `mailer`
pub async fn run(demo: Demo, ctx: &DemoContext, mailer: &dyn Mailer) -> Result<SendEmailResponse, Error> {
    log::info!("[Demo] {}", demo.operation());

    let request = demo.build(ctx).await?;
    let resp = mailer.send_email(&request).await?;

    log::info!("[Demo] {} sent: {}", demo.operation(), resp.sent);

    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;

    use futures::future::FutureExt;

    use crate::mailer::MailerFuture;

    const FILES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../dummy_files");

    fn context() -> DemoContext {
        DemoContext::new(Path::new(FILES_DIR), "http://localhost:6338/", "no-reply@somnuslabs.com")
    }

    fn file_bytes(name: &str) -> Vec<u8> {
        std::fs::read(Path::new(FILES_DIR).join(name)).unwrap()
    }

    /// Records every request and reports it as sent
    #[derive(Default)]
    struct RecordingMailer {
        requests: Mutex<Vec<SendEmailRequest>>,
    }

    impl Mailer for RecordingMailer {
        fn send_email<'a>(&'a self, request: &'a SendEmailRequest) -> MailerFuture<'a, SendEmailResponse> {
            self.requests.lock().unwrap().push(request.clone());

            async move {
                Ok(SendEmailResponse {
                    sent: true,
                    status: Some(200),
                    message: "Email successfully sent.".to_string(),
                    ..Default::default()
                })
            }
            .boxed()
        }
    }

    #[tokio::test]
    async fn plain_text_email_has_no_markup() {
        let request = Demo::PlainTextEmail.build(&context()).await.unwrap();

        assert_eq!(request.subject.as_deref(), Some(plain_text::SUBJECT));
        assert!(!crate::gmail::looks_like_html(&request.message));
        assert!(request.attachments.is_empty());
    }

    #[tokio::test]
    async fn html_email_is_html() {
        let request = Demo::HtmlEmail.build(&context()).await.unwrap();

        assert!(crate::gmail::looks_like_html(&request.message));
        assert_eq!(request.sender_name.as_deref(), Some("gmail-node-mailer"));
    }

    #[tokio::test]
    async fn attachment_email_carries_poster_bytes() {
        let request = Demo::HtmlEmailWithAttachment.build(&context()).await.unwrap();

        assert_eq!(request.attachments.len(), 2);
        assert_eq!(request.attachments[0].filename, "StreamBox-Invoice.html");
        assert_eq!(request.attachments[1].filename, "MovieWallpaper.jpg");
        assert_eq!(request.attachments[1].mime_type, "image/jpeg");
        assert_eq!(request.attachments[1].decode().unwrap(), file_bytes(html_attachment::POSTER_FILE));
        assert!(!request.message.contains("%POSTER_URL%"));
    }

    #[tokio::test]
    async fn renewal_email_attaches_dated_invoice() {
        let request = Demo::SubscriptionRenewal.build(&context()).await.unwrap();
        let date = Local::now().format("%Y-%-m-%-d").to_string();

        assert_eq!(request.attachments[0].filename, format!("StreamBox-Invoice-{}.pdf", date));
        assert_eq!(request.attachments[0].decode().unwrap(), file_bytes(subscription_renewal::INVOICE_FILE));
        assert_eq!(request.attachments[1].mime_type, "text/plain");
        assert!(request.message.contains(&date));
    }

    #[tokio::test]
    async fn purchase_email_links_files_route() {
        let request = Demo::NewPurchase.build(&context()).await.unwrap();

        assert!(request.message.contains("http://localhost:6338/files/SampleEBook.epub"));
        assert!(request.message.contains("Dear Customer"));
        assert_eq!(request.sender_email.as_deref(), Some("no-reply@somnuslabs.com"));
        assert_eq!(request.attachments[0].decode().unwrap(), file_bytes(new_purchase::EBOOK_FILE));
        assert_eq!(request.attachments[1].decode().unwrap(), file_bytes(new_purchase::INVOICE_FILE));
    }

    #[tokio::test]
    async fn missing_attachment_source_fails_the_demo() {
        let ctx = DemoContext::new(Path::new("/nonexistent"), "http://localhost:6338", "a@b.com");
        let mailer = RecordingMailer::default();

        let result = run(Demo::NewPurchase, &ctx, &mailer).await;

        assert!(matches!(result, Err(Error::Io(_))));
        assert!(mailer.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn server_status_attaches_history() {
        let dir = std::env::temp_dir().join(format!("gmail-demo-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let ctx = DemoContext::new(&dir, "http://localhost:6338", "a@b.com");
        let mailer = RecordingMailer::default();

        run(Demo::ServerStatus(ServerEvent::Start), &ctx, &mailer).await.unwrap();
        run(Demo::ServerStatus(ServerEvent::Shutdown), &ctx, &mailer).await.unwrap();

        let requests = mailer.requests.lock().unwrap();
        assert!(requests[0].message.contains("Server Starting"));
        assert!(requests[1].message.contains("Server Shutting Down"));
        assert_eq!(requests[1].subject.as_deref(), Some("🖥️ Somnus Labs - Server Shutdown Status"));

        let csv = String::from_utf8(requests[1].attachments[0].decode().unwrap()).unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert_eq!(requests[1].attachments[0].decode().unwrap(), std::fs::read(ctx.history().path()).unwrap());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn operation_labels() {
        assert_eq!(Demo::HtmlEmailWithAttachment.operation(), "Send HTML Email with Attachment");
        assert_eq!(Demo::ServerStatus(ServerEvent::Shutdown).operation(), "Server Shutdown");
    }
}
