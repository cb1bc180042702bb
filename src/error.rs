use thiserror::Error;

/// Errors raised by the fetch pipelines.
///
/// Only [`Error::Auth`] is fatal to a whole run. The other kinds end the
/// current resource or source and are logged by the caller.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("API error: {message}")]
    Api { message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("HTTP error: {status}")]
    Http { status: u16 },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn api(message: impl Into<String>) -> Self {
        Error::Api {
            message: message.into(),
        }
    }

    /// Whether this error must stop the whole run instead of a single resource.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Auth(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Timeout(e.to_string())
        } else if let Some(status) = e.status() {
            Error::Http {
                status: status.as_u16(),
            }
        } else if e.is_decode() {
            Error::Parse(e.to_string())
        } else {
            Error::Network(e.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_auth_is_fatal() {
        assert!(Error::Auth("missing token".into()).is_fatal());
        assert!(!Error::api("zone not found").is_fatal());
        assert!(!Error::Network("refused".into()).is_fatal());
        assert!(!Error::Http { status: 500 }.is_fatal());
    }

    #[test]
    fn api_error_message() {
        assert_eq!(
            Error::api("Invalid request headers").to_string(),
            "API error: Invalid request headers"
        );
    }
}
