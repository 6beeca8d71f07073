//! Request logging middleware for Axum/Tower HTTP services.

pub mod access_log;
pub mod config;
pub mod http;
pub mod observability;

pub use access_log::{LogFormat, LogRecord, RequestLogger};
pub use config::ServerConfig;
pub use http::{HttpServer, RequestContext, RequestLoggerLayer};
