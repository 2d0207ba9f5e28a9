use std::error;
use std::fmt;

/// Error type for the Gmail API client.
/// Each type can store a message for logging purposes.
#[derive(Clone, Debug)]
pub enum Error {
    UrlParseError(String),
    RequestTimeout,
    RequestError(String),
    JsonParseError(String),
    InvalidServiceAccount(String),
    InvalidSender(String),
    TokenExchange(String),
    MessageBuild(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::UrlParseError(ref msg) => write!(f, "UrlParseError: {}", msg),
            Error::RequestTimeout => f.write_str("RequestTimeout"),
            Error::RequestError(ref msg) => write!(f, "RequestError: {}", msg),
            Error::JsonParseError(ref msg) => write!(f, "JsonParseError: {}", msg),
            Error::InvalidServiceAccount(ref msg) => write!(f, "InvalidServiceAccount: {}", msg),
            Error::InvalidSender(ref msg) => write!(f, "InvalidSender: {}", msg),
            Error::TokenExchange(ref msg) => write!(f, "TokenExchange: {}", msg),
            Error::MessageBuild(ref msg) => write!(f, "MessageBuild: {}", msg),
        }
    }
}

impl error::Error for Error {}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::UrlParseError(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::RequestTimeout
        } else {
            Self::RequestError(err.to_string())
        }
    }
}

impl From<serde_json::error::Error> for Error {
    fn from(err: serde_json::error::Error) -> Self {
        Self::JsonParseError(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::TokenExchange(err.to_string())
    }
}

impl From<lettre::error::Error> for Error {
    fn from(err: lettre::error::Error) -> Self {
        Self::MessageBuild(err.to_string())
    }
}
