//! Access log subsystem.
//!
//! # Data Flow
//! ```text
//! RequestMeta (captured before the inner service runs)
//!   + RequestContext (status code, elapsed time, remote user)
//!     → record.rs (LogRecord)
//!     → format.rs (colorized text or JSON line)
//!     → sink.rs (one write per request)
//! ```
//!
//! # Design Decisions
//! - Defaults are resolved when the logger is built, not per request
//! - The logger takes no lock itself; sinks keep lines atomic
//! - A record that cannot be built, encoded or written is dropped and
//!   reported through `tracing`; the response is never affected

pub mod error;
pub mod format;
pub mod record;
pub mod sink;

use std::sync::Arc;

pub use error::LogError;
pub use format::LogFormat;
pub use record::{LogRecord, RequestMeta};
pub use sink::{LogSink, MemorySink, WriterSink};

use crate::config::{AccessLogConfig, LogDestination};
use crate::http::middleware::RequestLoggerLayer;
use crate::http::RequestContext;
use crate::observability::metrics;

/// Builds and writes one access log line per completed request.
#[derive(Clone)]
pub struct RequestLogger {
    sink: Arc<dyn LogSink>,
    format: LogFormat,
}

impl RequestLogger {
    /// Logger writing to an explicit sink.
    pub fn new(sink: impl LogSink + 'static, format: LogFormat) -> Self {
        Self {
            sink: Arc::new(sink),
            format,
        }
    }

    /// Logger for the configured destination.
    pub fn from_config(config: &AccessLogConfig) -> Self {
        let format = LogFormat::from_json_flag(config.enable_log_as_json);
        match config.destination {
            LogDestination::Stderr => Self::new(
                WriterSink::stderr().with_timestamps(config.timestamp_prefix),
                format,
            ),
            LogDestination::Stdout => Self::new(
                WriterSink::stdout().with_timestamps(config.timestamp_prefix),
                format,
            ),
        }
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    /// Tower layer that wraps a service with this logger.
    pub fn layer(&self) -> RequestLoggerLayer {
        RequestLoggerLayer::new(self.clone())
    }

    /// Format and write a single record.
    pub fn write(&self, record: &LogRecord) -> Result<(), LogError> {
        let line = self.format.render(record)?;
        self.sink.write_line(&line)?;
        Ok(())
    }

    /// Build the record for a finished request and write it.
    pub fn log_request(&self, meta: RequestMeta, ctx: &RequestContext) -> Result<(), LogError> {
        let record = LogRecord::from_context(meta, ctx)?;
        self.write(&record)
    }

    /// Log a finished request, reporting failures instead of returning them.
    pub(crate) fn log_completed(&self, meta: RequestMeta, ctx: &RequestContext) {
        let method = meta.method.clone();
        let uri = meta.request_uri.clone();

        match self.log_request(meta, ctx) {
            Ok(()) => metrics::record_emitted(self.format.as_str()),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    method = %method,
                    uri = %uri,
                    "Dropping access log record"
                );
                metrics::record_failure(e.kind());
            }
        }
    }
}

impl std::fmt::Debug for RequestLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestLogger")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
