//! Status and timing recorder.
//!
//! Stores the response status code and the time spent in the rest of the
//! stack into the shared [`RequestContext`]. Installed inside the request
//! logger, which depends on both values.

use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response};

use crate::http::RequestContext;

pub async fn recorder_middleware(mut req: Request, next: Next) -> Response {
    let ctx = RequestContext::ensure(req.extensions_mut());
    let start = Instant::now();

    let response = next.run(req).await;

    ctx.set_elapsed(start.elapsed());
    ctx.set_status_code(response.status().as_u16());
    response
}
