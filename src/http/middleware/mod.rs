//! HTTP middleware.
//!
//! # Layer Order
//! ```text
//! RequestLoggerLayer   (outermost: inserts RequestContext, logs afterwards)
//!     → recorder_middleware (records status code and elapsed time)
//!         → handler
//! ```

pub mod recorder;
pub mod request_logger;

pub use recorder::recorder_middleware;
pub use request_logger::{RequestLoggerLayer, RequestLoggerService};
