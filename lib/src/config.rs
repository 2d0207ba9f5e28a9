use std::path::Path;

use serde::Deserialize;

use crate::gmail::ServiceAccountKey;
use crate::Error;

pub const DEFAULT_PATH: &str = "gmail-demo.toml";
pub const DEFAULT_URL: &str = "http://localhost:6338";
pub const DEFAULT_PORT: u16 = 6338;
pub const DEFAULT_PACKAGE_NAME: &str = "gmail-node-mailer";

/// Demo server settings.
///
/// Field names match the environment variables they are read from, e.g.
/// `GMAIL_MAILER_SENDER_EMAIL` populates `gmail_mailer_sender_email`.
#[derive(Clone, Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub gmail_mailer_sender_email: Option<String>,

    /// Inline service account JSON; takes precedence over the path
    #[serde(default)]
    pub gmail_mailer_service_account: Option<String>,

    #[serde(default)]
    pub gmail_mailer_service_account_path: Option<String>,

    #[serde(default = "default_url")]
    pub default_url: String,

    #[serde(default = "default_package_name")]
    pub package_name: String,
}

fn default_url() -> String {
    DEFAULT_URL.to_string()
}

fn default_package_name() -> String {
    DEFAULT_PACKAGE_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gmail_mailer_sender_email: None,
            gmail_mailer_service_account: None,
            gmail_mailer_service_account_path: None,
            default_url: default_url(),
            package_name: default_package_name(),
        }
    }
}

/// Loads settings from an optional TOML file and merges them with the
/// process environment. Environment variables win.
///
/// The file at `path` must exist if a path is given; the default path is
/// optional.
pub fn load_settings(path: Option<&str>) -> Result<Settings, Error> {
    let file = config::File::new(path.unwrap_or(DEFAULT_PATH), config::FileFormat::Toml)
        .required(path.is_some());

    let settings = config::Config::builder()
        .add_source(file)
        .add_source(config::Environment::default())
        .build()?;

    Ok(settings.try_deserialize()?)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Settings {
    /// Listen port, taken from the text after the last `:` of `default_url`
    pub fn port(&self) -> u16 {
        let tail = self.default_url.rsplit(':').next().unwrap_or("");
        let digits: String = tail.chars().take_while(|c| c.is_ascii_digit()).collect();

        match digits.parse::<u16>() {
            Ok(p) if p != 0 => p,
            _ => DEFAULT_PORT,
        }
    }

    /// Public base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        self.default_url.trim_end_matches('/')
    }

    pub fn sender_email(&self) -> Result<&str, Error> {
        non_empty(&self.gmail_mailer_sender_email).ok_or_else(|| {
            Error::Config("GMAIL_MAILER_SENDER_EMAIL environment variable is not defined.".to_string())
        })
    }

    pub fn service_account(&self) -> Result<ServiceAccountKey, Error> {
        if let Some(json) = non_empty(&self.gmail_mailer_service_account) {
            return Ok(ServiceAccountKey::from_json(json)?);
        }

        let path = non_empty(&self.gmail_mailer_service_account_path).ok_or_else(|| {
            Error::Config(
                "Both GMAIL_MAILER_SERVICE_ACCOUNT and GMAIL_MAILER_SERVICE_ACCOUNT_PATH \
                 environment variables are not defined."
                    .to_string(),
            )
        })?;

        let path = Path::new(path);
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        if !absolute.exists() {
            return Err(Error::Config(format!("File not found at {}", absolute.display())));
        }

        let json = std::fs::read_to_string(&absolute)?;

        Ok(ServiceAccountKey::from_json(&json)?)
    }
}
