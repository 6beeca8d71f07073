//! Line formats for access log records.
//!
//! Text lines embed ANSI escapes unconditionally; the JSON flag is the only
//! switch between the two formats.

use std::time::Duration;

use crate::access_log::{LogError, LogRecord};

const GREEN: &str = "0;32";
const YELLOW: &str = "1;33";
const RED: &str = "0;31";

/// Output format of the access log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Colorized single line, easy to read.
    Text,
    /// One JSON object per line, easy to parse.
    Json,
}

impl LogFormat {
    pub fn from_json_flag(enable_log_as_json: bool) -> Self {
        if enable_log_as_json {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
        }
    }

    /// Render a record as a single line, without the trailing newline.
    pub fn render(&self, record: &LogRecord) -> Result<String, LogError> {
        match self {
            LogFormat::Text => Ok(format_text(record)),
            LogFormat::Json => format_json(record),
        }
    }
}

/// ANSI color code for a status code.
pub fn status_color(status: u16) -> &'static str {
    match status {
        400..=499 => YELLOW,
        500..=u16::MAX => RED,
        _ => GREEN,
    }
}

/// Elapsed time in milliseconds, truncated (not rounded) to two decimals.
pub fn format_millis(elapsed: Duration) -> String {
    let hundredths = elapsed.as_nanos() / 10_000;
    format!("{:.2}", hundredths as f64 / 100.0)
}

pub fn format_text(record: &LogRecord) -> String {
    format!(
        "\x1b[{}m{}\x1b[0m \x1b[36;1m{}ms\x1b[0m {} {} \x1b[1;30m{} \"{}\"\x1b[0m",
        status_color(record.status_code),
        record.status_code,
        format_millis(record.response_time),
        record.http_method,
        record.request_uri,
        record.remote_user,
        record.user_agent,
    )
}

pub fn format_json(record: &LogRecord) -> Result<String, LogError> {
    Ok(serde_json::to_string(record)?)
}
