use futures::future::{BoxFuture, FutureExt};

use crate::email::{SendEmailRequest, SendEmailResponse};
use crate::Error;

// Definition of future types for async use
pub type MailerFuture<'a, T> = BoxFuture<'a, Result<T, Error>>;

/// The send capability consumed by the demo routes.
///
/// Implementations report provider-side rejections as a response with
/// `sent == false` and reserve `Err` for failures that prevented an answer
/// from the provider at all.
pub trait Mailer: Send + Sync {
    fn send_email<'a>(&'a self, request: &'a SendEmailRequest) -> MailerFuture<'a, SendEmailResponse>;
}

/// Stand-in used when the real client failed to initialize at startup
pub struct UnavailableMailer {
    reason: String,
}

impl UnavailableMailer {
    pub fn new(reason: String) -> Self {
        Self { reason }
    }
}

impl Mailer for UnavailableMailer {
    fn send_email<'a>(&'a self, request: &'a SendEmailRequest) -> MailerFuture<'a, SendEmailResponse> {
        async move {
            log::warn!("Dropping email to {}: mailer unavailable", request.recipient_email);
            Err(Error::NotInitialized(self.reason.clone()))
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unavailable_mailer_always_fails() {
        let mailer = UnavailableMailer::new("no credentials".to_string());
        let request = SendEmailRequest::new("someone@example.com", "hi".to_string());

        match mailer.send_email(&request).await {
            Err(Error::NotInitialized(reason)) => assert_eq!(reason, "no credentials"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
