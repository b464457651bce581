//! Guided tour over a loaded Pokedex.
//!
//! # Responsibility
//! - Run the fixed sequence of query and edit demonstrations against one
//!   owned collection.
//! - Hand every intermediate value to the sink under a readable label.
//!
//! # Invariants
//! - Steps run in a fixed order and each emits before the next starts.
//! - The first failing step aborts the run; nothing is retried.
//! - The collection is owned by the run and dropped when it ends.

use crate::collection::record_collection::{CollectionError, RecordCollection};
use crate::config::{ConfigError, TourSettings};
use crate::model::record::Record;
use crate::random::UniformSource;
use crate::sink::{Sink, SinkEntry, SinkError};
use crate::source::{RecordSource, SourceError};
use log::{debug, error, info};
use serde::Serialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type TourResult<T> = Result<T, TourError>;

/// Any failure that ends a tour run.
#[derive(Debug)]
pub enum TourError {
    Config(ConfigError),
    Source(SourceError),
    Collection(CollectionError),
    Sink(SinkError),
}

impl Display for TourError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Source(err) => write!(f, "{err}"),
            Self::Collection(err) => write!(f, "{err}"),
            Self::Sink(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TourError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Source(err) => Some(err),
            Self::Collection(err) => Some(err),
            Self::Sink(err) => Some(err),
        }
    }
}

impl From<ConfigError> for TourError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<SourceError> for TourError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<CollectionError> for TourError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

impl From<SinkError> for TourError {
    fn from(value: SinkError) -> Self {
        Self::Sink(value)
    }
}

/// Outcome of a completed tour.
#[derive(Debug, Clone, PartialEq)]
pub struct TourSummary {
    /// Records present right after loading.
    pub initial_count: usize,
    /// Records left after all edits.
    pub final_count: usize,
    /// Name drawn by the random pick.
    pub random_pick: String,
    /// Names removed by the splice, shift and pop steps, in that order.
    pub removed: Vec<String>,
    /// Heaviest record after all edits, if any weight parsed.
    pub heaviest: Option<String>,
}

/// Runs the guided tour, sending results to `S` and drawing randomness from `U`.
pub struct TourService<S: Sink, U: UniformSource> {
    sink: S,
    random: U,
    settings: TourSettings,
}

impl<S: Sink, U: UniformSource> TourService<S, U> {
    pub fn new(sink: S, random: U, settings: TourSettings) -> Self {
        Self {
            sink,
            random,
            settings,
        }
    }

    /// Returns the sink, e.g. to inspect collected output.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Loads from `source`, emits the loaded document once, then runs the
    /// tour on its records.
    ///
    /// # Errors
    /// - `Source` when loading fails; nothing is emitted in that case.
    /// - Any error `run` can return.
    pub fn run_from<R: RecordSource + ?Sized>(&mut self, source: &R) -> TourResult<TourSummary> {
        let collection = source.load()?;
        self.emit(
            "JSON document",
            &BTreeMap::from([(source.list_field(), collection.records())]),
        )?;
        self.run(collection)
    }

    /// Runs every step against `collection`.
    ///
    /// # Errors
    /// - `Collection` when an edit or the random pick hits an invalid state,
    ///   e.g. an empty collection.
    /// - `Sink` when output cannot be delivered.
    pub fn run(&mut self, collection: RecordCollection) -> TourResult<TourSummary> {
        info!(
            "event=tour_start module=service status=ok records={}",
            collection.count()
        );
        let result = self.run_steps(collection);
        match &result {
            Ok(summary) => info!(
                "event=tour_finish module=service status=ok records={} removed={}",
                summary.final_count,
                summary.removed.len()
            ),
            Err(err) => error!("event=tour_finish module=service status=error error={err}"),
        }
        result
    }

    fn run_steps(&mut self, mut pokedex: RecordCollection) -> TourResult<TourSummary> {
        let settings = self.settings.clone();
        let initial_count = pokedex.count();

        self.emit("Pokedex", pokedex.records())?;
        self.emit("Total Pokémon count", &initial_count)?;
        self.emit("Pokémon names", &pokedex.names())?;

        let random_pick = pokedex.sample(&mut self.random)?.name.clone();
        self.emit("Random Pokémon", &random_pick)?;

        for tag in &settings.filter_tags {
            let matching = pokedex.by_type_tag(tag);
            self.emit(&format!("All {tag} Pokémon"), matching.records())?;
        }
        let greeters = pokedex.by_type_tag(&settings.greet_tag);

        self.emit(
            &format!("First {} Pokémon", settings.find_tag),
            &pokedex.first_by_type_tag(&settings.find_tag),
        )?;
        self.emit(
            "Pokémon from lightest to heaviest",
            pokedex.sorted_by_weight_ascending().records(),
        )?;
        self.emit("Total weight of all Pokémon", &pokedex.total_weight())?;

        let min_weight = settings.min_weight;
        self.emit(
            &format!("Do all Pokémon weigh more than {min_weight} kg?"),
            &pokedex.all_satisfy(|_, weight| weight > min_weight),
        )?;
        self.emit(
            &format!("Is there a {} Pokémon?", settings.any_tag),
            &pokedex.any_by_type_tag(&settings.any_tag),
        )?;

        pokedex.append(settings.appended.clone());
        let edited_index = pokedex.count() - 1;
        self.emit("Pokedex after append", pokedex.records())?;
        self.emit(
            &format!("Record at index {edited_index} after append"),
            &pokedex.get(edited_index),
        )?;

        let mut removed: Vec<Record> =
            pokedex.replace_at(edited_index, 1, vec![settings.replacement.clone()])?;
        self.emit("Pokedex after replacement", pokedex.records())?;
        self.emit(
            &format!("Record at index {edited_index} after replacement"),
            &pokedex.get(edited_index),
        )?;

        let first = pokedex.remove_first()?;
        self.emit("First Pokémon removed", &first)?;
        self.emit("Pokedex after removing first", pokedex.records())?;
        removed.push(first);

        let last = pokedex.remove_last()?;
        self.emit("Last Pokémon removed", &last)?;
        self.emit("Pokedex after removing last", pokedex.records())?;
        removed.push(last);

        let mut greetings = Vec::with_capacity(greeters.count());
        greeters.for_each_in_order(|record| greetings.push(format!("Hello, I am {}", record.name)));
        for greeting in &greetings {
            self.emit("Greeting", greeting)?;
        }

        let heaviest = pokedex.heaviest_with_weight();
        self.emit("Heaviest Pokémon", &heaviest.map(|(record, _)| &record.name))?;
        self.emit("Heaviest Pokémon weight", &heaviest.map(|(_, weight)| weight))?;

        Ok(TourSummary {
            initial_count,
            final_count: pokedex.count(),
            random_pick,
            removed: removed.into_iter().map(|record| record.name).collect(),
            heaviest: heaviest.map(|(record, _)| record.name.clone()),
        })
    }

    fn emit<T: Serialize + ?Sized>(&mut self, label: &str, value: &T) -> TourResult<()> {
        debug!("event=tour_step module=service status=ok step={label:?}");
        self.sink.emit(SinkEntry::encode(label, value)?)?;
        Ok(())
    }
}
