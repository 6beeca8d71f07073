//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! access_log + server produce:
//!     → logging.rs (diagnostic events via tracing)
//!     → metrics.rs (emitted/dropped access log counters)
//! ```

pub mod logging;
pub mod metrics;
