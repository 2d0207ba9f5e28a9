pub mod api;
pub mod config;
pub mod demos;
pub mod email;
pub mod error;
pub mod gmail;
pub mod history;
pub mod mailer;
pub mod npm;

#[cfg(test)]
mod testing;

pub use error::Error;

/// Version of the mail library served at /package-version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build the Gmail client from settings and verify its credentials.
///
/// Fails if the sender address is missing, if no service account source is
/// configured, or if Google rejects the service account.
pub async fn initialize_client(settings: &config::Settings) -> Result<gmail::GmailClient, Error> {
    let sender_email = settings.sender_email()?;
    let key = settings.service_account()?;

    let client = gmail::GmailClient::initialize(key, sender_email).await?;

    Ok(client)
}
