// src/error.rs
// =============================================================================
// The single error type every gistkit operation reports through.
//
// Taxonomy:
// - Transport: the request never produced a response (connect, abort, timeout)
// - Status: the server answered with status >= 400
// - Parse: the body was not the JSON we expected
// Plus a few local failures: a body that would not encode, bad config,
// missing raw_url, fetches that ended without reporting.
// =============================================================================

use std::fmt;

use serde_json::Value;

/// Boxed error a requester implementation can wrap its own failures in.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`GistClient`](crate::GistClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The transport failed before a response arrived.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    /// The server answered with a failure status (400 and above).
    #[error("request to {url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: ErrorBody,
    },

    /// The response body was not valid JSON, or not the shape we read.
    #[error("could not parse response from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be encoded as JSON.
    #[error("could not encode request body for {url}: {source}")]
    Encode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("file {filename} is truncated but has no raw_url")]
    MissingRawUrl { filename: String },

    /// The truncated-file fetches ended before every file was reported.
    #[error("truncated file fetches ended without reporting")]
    Interrupted,

    #[error("invalid client configuration: {message}")]
    InvalidConfig { message: String },

    #[error("not a recognizable gist address: {address}")]
    UnrecognizedAddress { address: String },
}

impl Error {
    /// Wraps a requester's own failure for `url`.
    pub fn transport(url: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Transport {
            url: url.into(),
            source: source.into(),
        }
    }

    /// HTTP status of a [`Error::Status`] failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Body of a failed response: the parsed JSON error document when it parses,
/// the raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json(Value),
    Text(String),
}

impl ErrorBody {
    pub(crate) fn from_raw(raw: String) -> Self {
        match serde_json::from_str(&raw) {
            Ok(value) => ErrorBody::Json(value),
            Err(_) => ErrorBody::Text(raw),
        }
    }

    /// The `message` field GitHub puts in its error documents, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorBody::Json(value) => value.get("message").and_then(Value::as_str),
            ErrorBody::Text(_) => None,
        }
    }
}

impl fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorBody::Json(value) => match value.get("message").and_then(Value::as_str) {
                Some(message) => write!(f, "{}", message),
                None => write!(f, "{}", value),
            },
            ErrorBody::Text(text) => write!(f, "{}", text),
        }
    }
}
