//! Pokedex record model.
//!
//! # Responsibility
//! - Define the fixed-schema entry every collection operation works on.
//! - Normalize the source document's loosely typed `type` field on decode.
//!
//! # Invariants
//! - `types` is always a list, even when the document carries a single string.
//! - `weight` is kept as raw text; numeric meaning is decided by `WeightPolicy`.
//! - `id` is informational only and may repeat after edits.

use crate::model::weight::WeightPolicy;
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt::Formatter;

/// Numeric identifier carried by the source document.
pub type RecordId = i64;

/// One Pokedex entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    /// Elemental type tags. Serialized as `type` to match the source document.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "deserialize_type_tags"
    )]
    pub types: Vec<String>,
    /// Raw weight text, e.g. `"6.9"`. Missing in hand-built entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
}

impl Record {
    /// Creates a record without weight information.
    pub fn new<I, T>(id: RecordId, name: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            id,
            name: name.into(),
            types: types.into_iter().map(Into::into).collect(),
            weight: None,
        }
    }

    /// Returns this record with the given raw weight text.
    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Case-sensitive exact membership test against the type tags.
    pub fn has_type(&self, tag: &str) -> bool {
        self.types.iter().any(|candidate| candidate == tag)
    }

    /// Parsed numeric weight, or `None` when missing or not parsable.
    pub fn parsed_weight(&self, policy: WeightPolicy) -> Option<f64> {
        self.weight.as_deref().and_then(|text| policy.parse(text))
    }
}

fn deserialize_type_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TypeTagsVisitor;

    impl<'de> Visitor<'de> for TypeTagsVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str("a type tag string or a list of type tag strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut tags = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(tag) = seq.next_element::<String>()? {
                tags.push(tag);
            }
            Ok(tags)
        }
    }

    deserializer.deserialize_any(TypeTagsVisitor)
}
