//! JSON document source.
//!
//! Reads a document shaped like `{ "pokemonList": [ {record}, ... ] }` from
//! disk or from an in-memory string.

use crate::collection::record_collection::RecordCollection;
use crate::model::record::Record;
use crate::model::weight::WeightPolicy;
use crate::source::{RecordSource, SourceError, SourceResult};
use log::{error, info};
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Field holding the record list in the bundled pokedex document.
pub const DEFAULT_LIST_FIELD: &str = "pokemonList";

/// File-backed JSON document loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonDocumentSource {
    path: PathBuf,
    list_field: String,
    weight_policy: WeightPolicy,
}

impl JsonDocumentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            list_field: DEFAULT_LIST_FIELD.to_string(),
            weight_policy: WeightPolicy::default(),
        }
    }

    pub fn with_list_field(mut self, field: impl Into<String>) -> Self {
        self.list_field = field.into();
        self
    }

    /// Weight policy attached to the loaded collection.
    pub fn with_weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.weight_policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for JsonDocumentSource {
    fn locator(&self) -> String {
        self.path.display().to_string()
    }

    fn list_field(&self) -> &str {
        &self.list_field
    }

    fn load(&self) -> SourceResult<RecordCollection> {
        let locator = self.locator();
        let result = std::fs::read_to_string(&self.path)
            .map_err(|source| SourceError::Unavailable {
                locator: locator.clone(),
                source,
            })
            .and_then(|text| parse_document(&locator, &text, &self.list_field));

        match result {
            Ok(records) => {
                info!(
                    "event=source_load module=source status=ok locator={} field={} records={}",
                    locator,
                    self.list_field,
                    records.len()
                );
                Ok(RecordCollection::from_records(records).with_weight_policy(self.weight_policy))
            }
            Err(err) => {
                error!(
                    "event=source_load module=source status=error locator={} error={}",
                    locator, err
                );
                Err(err)
            }
        }
    }
}

/// Decodes the record list stored under `list_field` in a JSON document.
///
/// `locator` is only used to label errors.
///
/// # Errors
/// - `Malformed` when `text` is not JSON or a list entry does not match the
///   record schema.
/// - `MissingListField` when the field is absent or not a list.
pub fn parse_document(locator: &str, text: &str, list_field: &str) -> SourceResult<Vec<Record>> {
    let mut document: Value =
        serde_json::from_str(text).map_err(|source| SourceError::Malformed {
            locator: locator.to_string(),
            source,
        })?;

    let list = match document.get_mut(list_field).map(Value::take) {
        Some(list @ Value::Array(_)) => list,
        _ => {
            return Err(SourceError::MissingListField {
                locator: locator.to_string(),
                field: list_field.to_string(),
            })
        }
    };

    serde_json::from_value(list).map_err(|source| SourceError::Malformed {
        locator: locator.to_string(),
        source,
    })
}
