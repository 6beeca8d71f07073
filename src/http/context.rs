//! Per-request context shared between middleware layers.
//!
//! The request logger inserts a [`RequestContext`] into the request
//! extensions before delegating. Inner layers fill it in; the logger reads
//! it back once the inner service has returned. All clones share the same
//! storage.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use axum::http::Extensions;

#[derive(Debug, Default, Clone)]
struct ContextFields {
    status_code: Option<u16>,
    elapsed: Option<Duration>,
    remote_user: Option<String>,
}

/// Typed, shared request context.
#[derive(Debug, Default, Clone)]
pub struct RequestContext {
    fields: Arc<Mutex<ContextFields>>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the context stored in `extensions`, inserting a fresh one if
    /// none is present yet.
    pub fn ensure(extensions: &mut Extensions) -> Self {
        if let Some(ctx) = extensions.get::<RequestContext>() {
            return ctx.clone();
        }
        let ctx = RequestContext::new();
        extensions.insert(ctx.clone());
        ctx
    }

    fn lock(&self) -> MutexGuard<'_, ContextFields> {
        // Fields are plain values, a poisoned lock still holds consistent data.
        self.fields.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_status_code(&self, status: u16) {
        self.lock().status_code = Some(status);
    }

    pub fn set_elapsed(&self, elapsed: Duration) {
        self.lock().elapsed = Some(elapsed);
    }

    /// Record the authenticated identity for the request.
    pub fn set_remote_user(&self, user: impl Into<String>) {
        self.lock().remote_user = Some(user.into());
    }

    pub fn status_code(&self) -> Option<u16> {
        self.lock().status_code
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.lock().elapsed
    }

    pub fn remote_user(&self) -> Option<String> {
        self.lock().remote_user.clone()
    }
}
