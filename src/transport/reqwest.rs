// src/transport/reqwest.rs
// =============================================================================
// The default HttpRequester, backed by reqwest.
//
// Key functionality:
// - One shared reqwest::Client (connection pooling, timeout, user agent)
// - Maps our Method/headers/basic auth/JSON body onto a RequestBuilder
// - Asks for the GitHub JSON media type only on JSON requests
// - Returns any status code as a RawResponse; only transport failures
//   (connect, timeout, body read) become errors
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;

use super::requester::{BodyFormat, HttpRequest, HttpRequester, Method, RawResponse};
use crate::config::ClientConfig;
use crate::error::{Error, Result};

const ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Clone)]
pub struct ReqwestRequester {
    client: Client,
}

impl ReqwestRequester {
    // Builds the shared client from the timeout and user agent in `config`
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent())
            .build()
            .map_err(|e| Error::InvalidConfig {
                message: format!("could not build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Wraps an already configured reqwest client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpRequester for ReqwestRequester {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            basic_auth,
            body,
            expect,
        } = request;

        let mut builder = self.client.request(method.into(), &url);

        // raw_url fetches keep reqwest's default Accept
        if expect == BodyFormat::Json {
            builder = builder.header(reqwest::header::ACCEPT, ACCEPT);
        }

        for (key, value) in headers {
            builder = builder.header(key, value);
        }

        if let Some(auth) = basic_auth {
            builder = builder.basic_auth(auth.username, auth.password);
        }

        // .json() also sets Content-Type: application/json
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| categorize_error(&url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| categorize_error(&url, e))?;

        Ok(RawResponse { status, body })
    }
}

impl From<Method> for reqwest::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

// Logs what kind of transport failure this was and wraps it.
// The caller sees a single Transport error either way.
fn categorize_error(url: &str, error: reqwest::Error) -> Error {
    let kind = if error.is_timeout() {
        "timeout"
    } else if error.is_connect() {
        "connect"
    } else if error.is_redirect() {
        "redirect"
    } else if error.is_body() || error.is_decode() {
        "body"
    } else {
        "other"
    };

    tracing::debug!(url, kind, error = %error, "transport failure");
    Error::transport(url, error)
}
