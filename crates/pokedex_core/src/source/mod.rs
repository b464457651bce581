//! Data sources that produce the initial record collection.
//!
//! # Responsibility
//! - Define the loader contract used once at pipeline start.
//! - Report unavailable or malformed documents as a single fatal error type.
//!
//! # Invariants
//! - A load either yields every record of the document or fails; there is no
//!   partial result and no retry.

use crate::collection::record_collection::RecordCollection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod json_document;

pub use json_document::{JsonDocumentSource, DEFAULT_LIST_FIELD};

pub type SourceResult<T> = Result<T, SourceError>;

/// Failure to obtain the initial record collection.
#[derive(Debug)]
pub enum SourceError {
    /// The resource could not be read.
    Unavailable {
        locator: String,
        source: std::io::Error,
    },
    /// The resource was read but is not a valid document.
    Malformed {
        locator: String,
        source: serde_json::Error,
    },
    /// The document has no list under the expected field name.
    MissingListField { locator: String, field: String },
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { locator, source } => {
                write!(f, "data source `{locator}` is unavailable: {source}")
            }
            Self::Malformed { locator, source } => {
                write!(f, "data source `{locator}` is malformed: {source}")
            }
            Self::MissingListField { locator, field } => {
                write!(f, "data source `{locator}` has no record list field `{field}`")
            }
        }
    }
}

impl Error for SourceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable { source, .. } => Some(source),
            Self::Malformed { source, .. } => Some(source),
            Self::MissingListField { .. } => None,
        }
    }
}

/// Loader contract for the one-time initial load.
pub trait RecordSource {
    /// Human-readable locator used in logs and errors.
    fn locator(&self) -> String;

    /// Document field holding the record list.
    fn list_field(&self) -> &str {
        DEFAULT_LIST_FIELD
    }

    /// Loads every record, in document order.
    fn load(&self) -> SourceResult<RecordCollection>;
}
