use super::gmail;

/// All possible gmail_demo library errors
#[derive(Clone, Debug)]
pub enum Error {
    Config(String),
    Io(String),
    Attachment(String),
    Gmail(gmail::Error),
    Npm(String),
    NotInitialized(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Config(ref msg) => write!(f, "Config: {}", msg),
            Error::Io(ref msg) => write!(f, "Io: {}", msg),
            Error::Attachment(ref msg) => write!(f, "Attachment: {}", msg),
            Error::Gmail(ref e) => write!(f, "Gmail: {}", e),
            Error::Npm(ref msg) => write!(f, "Npm: {}", msg),
            Error::NotInitialized(ref msg) => {
                write!(f, "Email client is not initialized: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<gmail::Error> for Error {
    fn from(err: gmail::Error) -> Self {
        Error::Gmail(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(err: base64::DecodeError) -> Self {
        Self::Attachment(err.to_string())
    }
}
