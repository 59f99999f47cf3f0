//! Shared reqwest plumbing for the HTTP plugins: error classification
//! with a bounded body preview, and a lenient JSON response reader.

use std::{error::Error as StdError, fmt};

use serde_json::Value;

const BODY_PREVIEW_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceHttpErrorKind {
    Timeout,
    Connect,
    Request,
    Decode,
    Status,
    Unknown,
}

impl ServiceHttpErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Decode => "decode",
            Self::Status => "status",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ServiceHttpErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
pub struct ServiceHttpError {
    kind: ServiceHttpErrorKind,
    status: Option<u16>,
    url: String,
    message: String,
    source: Option<anyhow::Error>,
}

impl ServiceHttpError {
    pub fn kind(&self) -> ServiceHttpErrorKind {
        self.kind
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn from_reqwest(err: reqwest::Error, url: String) -> Self {
        let kind = if err.is_timeout() {
            ServiceHttpErrorKind::Timeout
        } else if err.is_connect() {
            ServiceHttpErrorKind::Connect
        } else if err.is_request() {
            ServiceHttpErrorKind::Request
        } else if err.is_decode() {
            ServiceHttpErrorKind::Decode
        } else {
            ServiceHttpErrorKind::Unknown
        };
        let status = err.status().map(|s| s.as_u16());
        let message = err.to_string();
        ServiceHttpError {
            kind,
            status,
            url,
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }

    fn status_error(status: u16, url: String, preview: String) -> Self {
        ServiceHttpError {
            kind: ServiceHttpErrorKind::Status,
            status: Some(status),
            url,
            message: preview,
            source: None,
        }
    }

    fn decode_error(status: u16, url: String, err: serde_json::Error, preview: String) -> Self {
        let message = format!("failed to decode response body: {err} | body={preview}");
        ServiceHttpError {
            kind: ServiceHttpErrorKind::Decode,
            status: Some(status),
            url,
            message,
            source: Some(anyhow::Error::new(err)),
        }
    }
}

impl fmt::Display for ServiceHttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "service http error kind={}", self.kind)?;
        if let Some(status) = self.status {
            write!(f, " status={status}")?;
        }
        write!(f, " url={}: {}", self.url, self.message)
    }
}

impl StdError for ServiceHttpError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}

pub fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }

    let mut out = String::new();
    let mut truncated = false;
    for (idx, ch) in trimmed.chars().enumerate() {
        if idx >= BODY_PREVIEW_LIMIT {
            truncated = true;
            break;
        }
        out.push(ch);
    }
    if truncated {
        out.push_str("...");
    }
    out
}

/// Read the response body as JSON. Non-2xx statuses and undecodable
/// bodies become classified errors carrying a body preview; an empty
/// successful body reads as `Null`.
pub async fn parse_json_response(resp: reqwest::Response) -> anyhow::Result<Value> {
    let status = resp.status();
    let url = resp.url().to_string();
    let body = resp
        .text()
        .await
        .map_err(|err| ServiceHttpError::from_reqwest(err, url.clone()))?;

    if !status.is_success() {
        let preview = preview_body(&body);
        return Err(ServiceHttpError::status_error(status.as_u16(), url, preview).into());
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str::<Value>(&body).map_err(|err| {
        let preview = preview_body(&body);
        ServiceHttpError::decode_error(status.as_u16(), url, err, preview).into()
    })
}

/// Attach bearer auth when an api key is configured.
pub fn with_auth(req: reqwest::RequestBuilder, api_key: &str) -> reqwest::RequestBuilder {
    if api_key.trim().is_empty() {
        req
    } else {
        req.bearer_auth(api_key)
    }
}
