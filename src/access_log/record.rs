//! The per-request access log record.

use std::time::Duration;

use axum::http::{header, Request};
use serde::{Deserialize, Serialize};

use crate::access_log::LogError;
use crate::http::RequestContext;

/// Request metadata captured before the request is handed to the inner
/// service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMeta {
    pub method: String,
    pub request_uri: String,
    pub user_agent: String,
}

impl RequestMeta {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let request_uri = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or("/")
            .to_string();

        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .unwrap_or_default();

        Self {
            method: req.method().as_str().to_string(),
            request_uri,
            user_agent,
        }
    }
}

/// One completed request, as written to the access log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogRecord {
    pub status_code: u16,
    #[serde(with = "nanos")]
    pub response_time: Duration,
    pub http_method: String,
    #[serde(rename = "RequestURI")]
    pub request_uri: String,
    pub remote_user: String,
    pub user_agent: String,
}

impl LogRecord {
    /// Build a record once the inner service has returned.
    ///
    /// Status code and elapsed time must have been recorded by an inner
    /// layer; the remote user defaults to an empty string.
    pub fn from_context(meta: RequestMeta, ctx: &RequestContext) -> Result<Self, LogError> {
        let status_code = ctx
            .status_code()
            .ok_or(LogError::MissingContext("STATUS_CODE"))?;
        let response_time = ctx
            .elapsed()
            .ok_or(LogError::MissingContext("ELAPSED_TIME"))?;

        Ok(Self {
            status_code,
            response_time,
            http_method: meta.method,
            request_uri: meta.request_uri,
            remote_user: ctx.remote_user().unwrap_or_default(),
            user_agent: meta.user_agent,
        })
    }
}

/// Durations as integer nanoseconds.
mod nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = i64::try_from(value.as_nanos()).unwrap_or(i64::MAX);
        serializer.serialize_i64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let nanos = i64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos.max(0) as u64))
    }
}
