//! Use-case services over the record collection.
//!
//! # Responsibility
//! - Orchestrate source, collection and sink into runnable use cases.
//! - Keep the CLI decoupled from loading and formatting details.

pub mod tour_service;
