//! Service account JWT to access token exchange.
//!
//! See <https://developers.google.com/identity/protocols/oauth2/service-account>
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use tokio::sync::Mutex;

use super::api::{self, ServiceAccountKey};
use super::Error;

// Token lifetime requested from Google, in seconds
const TOKEN_LIFETIME: i64 = 3600;

// Refresh this many seconds before the token expires
const EXPIRY_MARGIN: i64 = 60;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    exp: i64,
    iat: i64,
    /// Mailbox to impersonate through domain-wide delegation
    sub: &'a str,
}

#[derive(Clone, Debug)]
struct AccessToken {
    token: String,
    expires_at: i64,
}

impl AccessToken {
    fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at - EXPIRY_MARGIN
    }
}

pub struct TokenManager {
    key: ServiceAccountKey,
    subject: String,
    client: reqwest::Client,
    cached: Mutex<Option<AccessToken>>,
}

impl TokenManager {
    pub fn new(key: ServiceAccountKey, subject: String, client: reqwest::Client) -> Self {
        Self {
            key,
            subject,
            client,
            cached: Mutex::new(None),
        }
    }

    /// Returns a valid access token, fetching a new one if needed
    pub async fn token(&self) -> Result<String, Error> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now().timestamp();

        if let Some(ref t) = *cached {
            if !t.is_expired(now) {
                return Ok(t.token.clone());
            }
        }

        log::debug!("Fetching new access token for {}", self.key.client_email);

        let fresh = self.fetch(now).await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);

        Ok(token)
    }

    fn assertion(&self, now: i64) -> Result<String, Error> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: api::GMAIL_SEND_SCOPE,
            aud: &self.key.token_uri,
            exp: now + TOKEN_LIFETIME,
            iat: now,
            sub: &self.subject,
        };

        let mut header = Header::new(Algorithm::RS256);
        if !self.key.private_key_id.is_empty() {
            header.kid = Some(self.key.private_key_id.clone());
        }

        // Keys pasted into env vars often carry escaped newlines
        let pem = self.key.private_key.replace("\\n", "\n");
        let encoding_key = EncodingKey::from_rsa_pem(pem.as_bytes())
            .map_err(|e| Error::InvalidServiceAccount(e.to_string()))?;

        Ok(encode(&header, &claims, &encoding_key)?)
    }

    async fn fetch(&self, now: i64) -> Result<AccessToken, Error> {
        let assertion = self.assertion(now)?;
        let form = [("grant_type", api::JWT_BEARER_GRANT), ("assertion", assertion.as_str())];

        let resp = self
            .client
            .post(reqwest::Url::parse(&self.key.token_uri)?)
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::TokenExchange(format!("HTTP {}: {}", status, body)));
        }

        let body: api::TokenResponse = serde_json::from_slice(&resp.bytes().await?)?;

        Ok(AccessToken {
            token: body.access_token,
            expires_at: now + body.expires_in.unwrap_or(TOKEN_LIFETIME),
        })
    }
}
