//! Request logging middleware.
//!
//! Wraps an inner service. Request metadata is captured on the way in; once
//! the inner service has produced its response the logger reads the shared
//! [`RequestContext`] and writes one access log line.

use std::task::{Context, Poll};

use axum::http::Request;
use futures_util::future::BoxFuture;
use tower::{Layer, Service};

use crate::access_log::{RequestLogger, RequestMeta};
use crate::http::RequestContext;

/// Layer that applies [`RequestLoggerService`].
#[derive(Clone, Debug)]
pub struct RequestLoggerLayer {
    logger: RequestLogger,
}

impl RequestLoggerLayer {
    pub fn new(logger: RequestLogger) -> Self {
        Self { logger }
    }
}

impl<S> Layer<S> for RequestLoggerLayer {
    type Service = RequestLoggerService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLoggerService {
            inner,
            logger: self.logger.clone(),
        }
    }
}

/// Service produced by [`RequestLoggerLayer`].
#[derive(Clone, Debug)]
pub struct RequestLoggerService<S> {
    inner: S,
    logger: RequestLogger,
}

impl<S, ReqBody> Service<Request<ReqBody>> for RequestLoggerService<S>
where
    S: Service<Request<ReqBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    ReqBody: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<S::Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let meta = RequestMeta::from_request(&req);
        let ctx = RequestContext::ensure(req.extensions_mut());
        let logger = self.logger.clone();

        // The clone may not be ready; keep the service that was polled.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let response = inner.call(req).await?;
            logger.log_completed(meta, &ctx);
            Ok(response)
        })
    }
}
