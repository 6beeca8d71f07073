//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup)
//!     → middleware/request_logger.rs (capture metadata, insert RequestContext)
//!     → middleware/recorder.rs (status code + elapsed time)
//!     → handler
//!     → response returned, then one access log line written
//! ```

pub mod context;
pub mod middleware;
pub mod server;

pub use context::RequestContext;
pub use middleware::{recorder_middleware, RequestLoggerLayer, RequestLoggerService};
pub use server::HttpServer;
