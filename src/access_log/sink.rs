//! Destinations for access log lines.
//!
//! A sink owns line atomicity: each `write_line` call must land as one
//! contiguous line even when requests are logged concurrently.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Something that accepts complete log lines.
pub trait LogSink: Send + Sync {
    /// Append `line` followed by a newline.
    fn write_line(&self, line: &str) -> io::Result<()>;
}

/// Local time prefix in the `2024/01/23 01:23:23 ` layout.
fn timestamp_prefix() -> String {
    chrono::Local::now().format("%Y/%m/%d %H:%M:%S ").to_string()
}

/// Sink over any writer, serialized by a mutex.
pub struct WriterSink<W> {
    writer: Mutex<W>,
    timestamps: bool,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
            timestamps: false,
        }
    }

    /// Prefix every line with the local date and time.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }
}

impl WriterSink<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut buf = String::with_capacity(line.len() + 21);
        if self.timestamps {
            buf.push_str(&timestamp_prefix());
        }
        buf.push_str(line);
        buf.push('\n');

        let mut writer = self
            .writer
            .lock()
            .map_err(|_| io::Error::other("log writer mutex poisoned"))?;
        writer.write_all(buf.as_bytes())?;
        writer.flush()
    }
}

/// Keeps lines in memory.
#[derive(Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        self.lines
            .lock()
            .map_err(|_| io::Error::other("memory sink mutex poisoned"))?
            .push(line.to_string());
        Ok(())
    }
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        (**self).write_line(line)
    }
}
