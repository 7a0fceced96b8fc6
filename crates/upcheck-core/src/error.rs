use thiserror::Error;

use crate::version::VersionParseError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed: {details}")]
    Request { details: String },

    #[error("release API responded with HTTP {status}{body_snippet}")]
    HttpStatus { status: u16, body_snippet: String },

    #[error("invalid proxy address {address:?}: {details}")]
    Proxy { address: String, details: String },

    #[error("request task did not complete: {details}")]
    TaskFailed { details: String },
}

impl TransportError {
    pub fn request_from<E>(error: E) -> Self
    where
        E: std::fmt::Display,
    {
        Self::Request {
            details: error.to_string(),
        }
    }
}

/// Which side of the comparison a version string came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionOrigin {
    Local,
    Remote,
}

impl std::fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("failed to check for updates: {0}")]
    Transport(#[from] TransportError),

    #[error("failed to decode release response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("failed to parse {which} version: {source}")]
    Version {
        which: VersionOrigin,
        #[source]
        source: VersionParseError,
    },
}

#[derive(Error, Debug)]
#[error("failed to open {url}: {source}")]
pub struct OpenUrlError {
    pub url: String,
    #[source]
    pub source: std::io::Error,
}
