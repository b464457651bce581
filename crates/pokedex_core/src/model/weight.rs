//! Weight text parsing policy.
//!
//! # Responsibility
//! - Decide whether a record's textual weight is a usable decimal number.
//! - Keep one parsing rule shared by every weight-based query.
//!
//! # Invariants
//! - Parsing is locale independent (`.` is the only decimal separator).
//! - Only finite values are ever returned; `inf`/`NaN` spellings never parse.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static STRICT_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("valid strict decimal regex")
});

static LEADING_DECIMAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .expect("valid leading decimal regex")
});

/// How weight text is turned into a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightPolicy {
    /// The whole text must be a decimal literal. `"6.9 kg"` does not parse.
    #[default]
    Strict,
    /// Takes the longest numeric prefix after leading whitespace, so `"6.9 kg"`
    /// parses as `6.9`. Matches how browser scripts usually read unit-suffixed
    /// weights.
    LeadingNumber,
}

impl WeightPolicy {
    /// Parses `text` under this policy.
    ///
    /// Returns `None` when the text is not a finite decimal number.
    pub fn parse(self, text: &str) -> Option<f64> {
        let literal = match self {
            Self::Strict => STRICT_DECIMAL.is_match(text).then_some(text)?,
            Self::LeadingNumber => LEADING_DECIMAL.captures(text)?.get(1)?.as_str(),
        };

        literal.parse::<f64>().ok().filter(|value| value.is_finite())
    }
}
