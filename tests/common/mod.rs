//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::{header, StatusCode},
    middleware::{self, Next},
    response::Response,
    routing::any,
    Router,
};

use request_logger::access_log::{LogFormat, MemorySink, RequestLogger};
use request_logger::http::{recorder_middleware, RequestContext, RequestLoggerLayer};

/// Logger that keeps its lines in memory.
pub fn memory_logger(format: LogFormat) -> (RequestLogger, MemorySink) {
    let sink = MemorySink::new();
    (RequestLogger::new(sink.clone(), format), sink)
}

/// Router answering every path with `status`, counting handler calls.
#[allow(dead_code)]
pub fn counting_app(logger: RequestLogger, status: StatusCode, calls: Arc<AtomicUsize>) -> Router {
    Router::new()
        .route(
            "/{*path}",
            any(move || {
                let calls = calls.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    (status, "done")
                }
            }),
        )
        .layer(middleware::from_fn(recorder_middleware))
        .layer(RequestLoggerLayer::new(logger))
}

/// Router answering every path with `status`.
#[allow(dead_code)]
pub fn app(logger: RequestLogger, status: StatusCode) -> Router {
    counting_app(logger, status, Arc::new(AtomicUsize::new(0)))
}

/// Marks every request as made by "alice".
#[allow(dead_code)]
pub async fn fake_auth(req: Request, next: Next) -> Response {
    if let Some(ctx) = req.extensions().get::<RequestContext>() {
        ctx.set_remote_user("alice");
    }
    next.run(req).await
}

/// GET request with an optional user agent.
#[allow(dead_code)]
pub fn get(uri: &str, user_agent: Option<&str>) -> Request<Body> {
    let mut builder = axum::http::Request::builder().method("GET").uri(uri);
    if let Some(ua) = user_agent {
        builder = builder.header(header::USER_AGENT, ua);
    }
    builder.body(Body::empty()).unwrap()
}
