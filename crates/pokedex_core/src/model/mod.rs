//! Pokedex domain model.
//!
//! # Responsibility
//! - Define the record shape shared by loading, querying and display.
//! - Own the single weight parsing rule used by aggregate queries.
//!
//! # Invariants
//! - Records are plain values; they carry no collection state.

pub mod record;
pub mod weight;
