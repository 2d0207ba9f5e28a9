use reqwest::StatusCode;

use serde::Deserialize;

use super::Error;

pub const GMAIL_BASE_API: &str = "https://gmail.googleapis.com/gmail/v1/";
pub const GMAIL_SEND_SCOPE: &str = "https://www.googleapis.com/auth/gmail.send";
pub const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

// Request timeout, in seconds
pub(crate) const GMAIL_REQUEST_TIMEOUT: u64 = 30;

/// Google service account key, as downloaded from the Cloud console
#[derive(Clone, Debug, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default)]
    pub client_id: String,
    pub token_uri: String,
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::InvalidServiceAccount(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.type_ != "service_account" {
            return Err(Error::InvalidServiceAccount(format!(
                "expected type 'service_account', got '{}'",
                self.type_
            )));
        }

        let required = [
            ("private_key", &self.private_key),
            ("client_email", &self.client_email),
            ("token_uri", &self.token_uri),
        ];

        for (name, value) in required.iter() {
            if value.is_empty() {
                return Err(Error::InvalidServiceAccount(format!("{} is empty", name)));
            }
        }

        Ok(())
    }
}

#[derive(Deserialize, Debug)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
}

/// Error body returned by Google APIs: `{"error": {"code", "message", "status"}}`
#[derive(Deserialize, Debug)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Deserialize, Debug)]
pub struct ApiErrorDetail {
    pub code: Option<u16>,
    pub message: String,
    pub status: Option<String>,
}

pub enum Endpoint<'a> {
    SendMessage { user_id: &'a str },
}

#[inline]
pub fn build_endpoint_url(base: &str, endpoint: Endpoint) -> String {
    match endpoint {
        Endpoint::SendMessage { user_id } => format!("{}users/{}/messages/send", base, user_id),
    }
}

/// Human readable message for a Gmail API reply
pub fn status_message(status: StatusCode, body: &serde_json::Value) -> String {
    if status.is_success() {
        return "Email successfully sent.".to_string();
    }

    match serde_json::from_value::<ApiErrorBody>(body.clone()) {
        Ok(b) => format!("Failed to send email: {}", b.error.message),
        Err(_) => format!(
            "Failed to send email: {}",
            status.canonical_reason().unwrap_or("unknown error")
        ),
    }
}
