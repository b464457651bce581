//! Core of the Pokedex tour: an in-memory record collection with query and
//! edit operations, plus the source, sink and service layers that drive it.

pub mod collection;
pub mod config;
pub mod logging;
pub mod model;
pub mod random;
pub mod service;
pub mod sink;
pub mod source;

pub use collection::record_collection::{CollectionError, CollectionResult, RecordCollection};
pub use config::{load_config, ConfigError, LogConfig, PokedexConfig, SourceConfig, TourSettings};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::record::{Record, RecordId};
pub use model::weight::WeightPolicy;
pub use random::{FixedSource, ThreadRngSource, UniformSource};
pub use service::tour_service::{TourError, TourResult, TourService, TourSummary};
pub use sink::{MemorySink, Sink, SinkEntry, SinkError, WriterSink};
pub use source::{JsonDocumentSource, RecordSource, SourceError, SourceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
