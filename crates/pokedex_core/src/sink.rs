//! Output sinks for labelled pipeline values.
//!
//! # Responsibility
//! - Receive every value the tour produces, tagged with a display label.
//! - Keep formatting out of the collection and service layers.
//!
//! # Invariants
//! - Entries are delivered in the order they were emitted.
//! - Sinks are write-only; nothing is read back by the pipeline.

use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

pub type SinkResult<T> = Result<T, SinkError>;

/// Failure to encode or deliver a sink entry.
#[derive(Debug)]
pub enum SinkError {
    Encode {
        label: String,
        source: serde_json::Error,
    },
    Io(std::io::Error),
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode { label, source } => {
                write!(f, "failed to encode value for `{label}`: {source}")
            }
            Self::Io(err) => write!(f, "failed to write sink entry: {err}"),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode { source, .. } => Some(source),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SinkError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// One labelled value.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkEntry {
    pub label: String,
    pub value: Value,
}

impl SinkEntry {
    /// Encodes `value` into an entry.
    ///
    /// # Errors
    /// - `Encode` when `value` cannot be represented as JSON.
    pub fn encode<T: Serialize + ?Sized>(label: impl Into<String>, value: &T) -> SinkResult<Self> {
        let label = label.into();
        match serde_json::to_value(value) {
            Ok(value) => Ok(Self { label, value }),
            Err(source) => Err(SinkError::Encode { label, source }),
        }
    }
}

/// Write-only consumer of pipeline output.
pub trait Sink {
    fn emit(&mut self, entry: SinkEntry) -> SinkResult<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, entry: SinkEntry) -> SinkResult<()> {
        (**self).emit(entry)
    }
}

/// Writes `label: value` lines to any writer.
///
/// Strings are written bare; every other value as compact JSON.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Sink for WriterSink<W> {
    fn emit(&mut self, entry: SinkEntry) -> SinkResult<()> {
        match &entry.value {
            Value::String(text) => writeln!(self.writer, "{}: {}", entry.label, text)?,
            other => writeln!(self.writer, "{}: {}", entry.label, other)?,
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects entries in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    entries: Vec<SinkEntry>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[SinkEntry] {
        &self.entries
    }

    /// First entry emitted with `label`.
    pub fn find(&self, label: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.value)
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.label.as_str()).collect()
    }
}

impl Sink for MemorySink {
    fn emit(&mut self, entry: SinkEntry) -> SinkResult<()> {
        self.entries.push(entry);
        Ok(())
    }
}
