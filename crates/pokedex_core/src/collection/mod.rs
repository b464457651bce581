//! In-memory record collection.
//!
//! # Responsibility
//! - Hold the loaded records for the lifetime of one pipeline run.
//! - Separate pure queries from in-place edits at the type level.

pub mod record_collection;
