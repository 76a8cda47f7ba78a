// src/transport/requester.rs
// =============================================================================
// The HTTP requester seam.
//
// A requester only moves bytes: it sends an HttpRequest and hands back the
// status code and raw body, or a transport error. Everything the gist API
// layer cares about on top of that lives here too:
// - attaching credentials (token header + basic auth)
// - the failure threshold (status >= 400)
// - decoding the body in the format the caller asked for
// =============================================================================

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, ErrorBody, Result};
use crate::options::Credentials;

/// Methods the gist API needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// How the caller wants the response body interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    Json,
    Text,
}

/// Username/password handed to the transport's basic-auth mechanism.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: Option<String>,
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub basic_auth: Option<BasicAuth>,
    /// Serialized as JSON with `Content-Type: application/json`.
    pub body: Option<Value>,
    pub expect: BodyFormat,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>, expect: BodyFormat) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            basic_auth: None,
            body: None,
            expect,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Encodes `body` as the JSON payload; a value serde cannot represent as
    /// JSON fails with [`Error::Encode`].
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        match serde_json::to_value(body) {
            Ok(value) => Ok(self.with_body(value)),
            Err(source) => Err(Error::Encode { url: self.url, source }),
        }
    }

    /// Applies the auth policy: a token becomes an `Authorization: token ...`
    /// header, and a username (with optional password) is forwarded as basic
    /// auth. Each is applied independently of the other.
    pub fn with_credentials(mut self, credentials: &Credentials) -> Self {
        if let Some(token) = &credentials.access_token {
            self.headers
                .push(("Authorization".to_string(), format!("token {}", token)));
        }
        if let Some(username) = &credentials.username {
            self.basic_auth = Some(BasicAuth {
                username: username.clone(),
                password: credentials.password.clone(),
            });
        }
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// What came back over the wire, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The transport capability injected into [`GistClient`](crate::GistClient).
///
/// Implementations report connection failures, aborts and timeouts as
/// [`Error::Transport`]. Any status code, including 4xx and 5xx, is a
/// successful `RawResponse` at this level.
#[async_trait]
pub trait HttpRequester: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse>;
}

/// Decoded body, in the format the request asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

// Sends with request/response logging. Any status comes back as Ok here.
async fn send_logged(requester: &dyn HttpRequester, request: HttpRequest) -> Result<(String, RawResponse)> {
    let url = request.url.clone();

    tracing::debug!(method = request.method.as_str(), url = %url, "sending request");
    let response = requester.send(request).await?;
    tracing::debug!(url = %url, status = response.status, "received response");

    Ok((url, response))
}

// Status >= 400 is a failure; the error keeps the body the server sent
fn check_status(url: &str, response: RawResponse) -> Result<String> {
    if response.status >= 400 {
        return Err(Error::Status {
            url: url.to_string(),
            status: response.status,
            body: ErrorBody::from_raw(response.body),
        });
    }
    Ok(response.body)
}

fn parse_json<T: DeserializeOwned>(url: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| Error::Parse {
        url: url.to_string(),
        source,
    })
}

/// Sends a request and decodes the body in the format the request names.
pub async fn execute(requester: &dyn HttpRequester, request: HttpRequest) -> Result<Body> {
    let expect = request.expect;
    let (url, response) = send_logged(requester, request).await?;
    decode(&url, expect, response)
}

pub(crate) fn decode(url: &str, expect: BodyFormat, response: RawResponse) -> Result<Body> {
    let body = check_status(url, response)?;
    match expect {
        BodyFormat::Text => Ok(Body::Text(body)),
        BodyFormat::Json => parse_json(url, &body).map(Body::Json),
    }
}

/// Sends a request and deserializes the JSON payload straight into `T`.
pub async fn execute_json<T: DeserializeOwned>(
    requester: &dyn HttpRequester,
    request: HttpRequest,
) -> Result<T> {
    let (url, response) = send_logged(requester, request).await?;
    let body = check_status(&url, response)?;
    parse_json(&url, &body)
}

/// Sends a request and returns the body verbatim.
pub async fn execute_text(requester: &dyn HttpRequester, request: HttpRequest) -> Result<String> {
    let (url, response) = send_logged(requester, request).await?;
    check_status(&url, response)
}
