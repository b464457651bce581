//! Ordered, owned record collection with query and edit operations.
//!
//! # Responsibility
//! - Answer read-only queries (filter, find, sort, aggregate) over records.
//! - Apply in-place edits (append, splice, shift, pop) and report what changed.
//!
//! # Invariants
//! - Insertion order is iteration order; queries never reorder `records`.
//! - Query methods take `&self` and never mutate; edits take `&mut self`.
//! - Weight-based queries consider only records whose weight parses under the
//!   collection's `WeightPolicy`; non-parsable records are skipped, not failed.
//! - Edits are all-or-nothing: a rejected edit leaves the collection unchanged.

use crate::model::record::Record;
use crate::model::weight::WeightPolicy;
use crate::random::UniformSource;
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Errors raised by collection operations with invalid preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    /// Operation needs at least one record.
    EmptyCollection { operation: &'static str },
    /// Requested range does not fit inside the current collection.
    IndexOutOfRange {
        operation: &'static str,
        index: usize,
        count: usize,
        len: usize,
    },
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCollection { operation } => {
                write!(f, "`{operation}` requires a non-empty collection")
            }
            Self::IndexOutOfRange {
                operation,
                index,
                count,
                len,
            } => write!(
                f,
                "`{operation}` range {index}..{index}+{count} is out of bounds for length {len}"
            ),
        }
    }
}

impl Error for CollectionError {}

/// Ordered sequence of records owned by a single caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordCollection {
    records: Vec<Record>,
    weight_policy: WeightPolicy,
}

impl RecordCollection {
    /// Creates an empty collection with the strict weight policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps already-ordered records.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            weight_policy: WeightPolicy::default(),
        }
    }

    /// Returns this collection using `policy` for weight-based queries.
    pub fn with_weight_policy(mut self, policy: WeightPolicy) -> Self {
        self.weight_policy = policy;
        self
    }

    pub fn weight_policy(&self) -> WeightPolicy {
        self.weight_policy
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Names in collection order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|record| record.name.as_str()).collect()
    }

    /// Picks the record at `floor(u * count)` for one draw `u` of `source`.
    ///
    /// # Errors
    /// - `EmptyCollection` when there is nothing to pick from.
    pub fn sample<U: UniformSource>(&self, mut source: U) -> CollectionResult<&Record> {
        let len = self.records.len();
        if len == 0 {
            return Err(CollectionError::EmptyCollection {
                operation: "sample",
            });
        }

        let draw = source.next_unit();
        let index = ((draw * len as f64).floor() as usize).min(len - 1);
        Ok(&self.records[index])
    }

    /// Records whose type tags contain `tag`, in collection order.
    pub fn by_type_tag(&self, tag: &str) -> RecordCollection {
        self.derive(
            self.records
                .iter()
                .filter(|record| record.has_type(tag))
                .cloned()
                .collect(),
        )
    }

    /// First record whose type tags contain `tag`.
    pub fn first_by_type_tag(&self, tag: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.has_type(tag))
    }

    /// Whether any record's type tags contain `tag`.
    pub fn any_by_type_tag(&self, tag: &str) -> bool {
        self.records.iter().any(|record| record.has_type(tag))
    }

    /// Whether every record with a parsable weight satisfies `predicate`.
    ///
    /// Records without a parsable weight are not considered at all, so a
    /// collection with no parsable weights yields `true`.
    pub fn all_satisfy<F>(&self, mut predicate: F) -> bool
    where
        F: FnMut(&Record, f64) -> bool,
    {
        self.weighed().all(|(record, weight)| predicate(record, weight))
    }

    /// Records with a parsable weight, lightest first.
    ///
    /// The sort is stable, so equal weights keep their collection order.
    pub fn sorted_by_weight_ascending(&self) -> RecordCollection {
        let mut weighed: Vec<(&Record, f64)> = self.weighed().collect();
        weighed.sort_by(|left, right| left.1.total_cmp(&right.1));
        self.derive(
            weighed
                .into_iter()
                .map(|(record, _)| record.clone())
                .collect(),
        )
    }

    /// Sum of all parsable weights; `0.0` when none parse.
    pub fn total_weight(&self) -> f64 {
        self.weighed().map(|(_, weight)| weight).sum()
    }

    /// Record with the largest parsable weight; the earliest one wins ties.
    pub fn heaviest(&self) -> Option<&Record> {
        self.heaviest_with_weight().map(|(record, _)| record)
    }

    /// Like [`RecordCollection::heaviest`], also returning the parsed weight.
    pub fn heaviest_with_weight(&self) -> Option<(&Record, f64)> {
        let mut best: Option<(&Record, f64)> = None;
        for (record, weight) in self.weighed() {
            match best {
                Some((_, max)) if weight <= max => {}
                _ => best = Some((record, weight)),
            }
        }
        best
    }

    /// Runs `action` once per record, in order.
    pub fn for_each_in_order<F>(&self, action: F)
    where
        F: FnMut(&Record),
    {
        self.into_iter().for_each(action);
    }

    /// Appends `record` at the end.
    pub fn append(&mut self, record: Record) {
        debug!(
            "event=record_append module=collection status=ok id={} len={}",
            record.id,
            self.records.len() + 1
        );
        self.records.push(record);
    }

    /// Removes `count` records starting at `index` and inserts `replacement`
    /// in their place.
    ///
    /// Returns the removed records in their original order.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index > len` or `index + count > len`.
    pub fn replace_at(
        &mut self,
        index: usize,
        count: usize,
        replacement: Vec<Record>,
    ) -> CollectionResult<Vec<Record>> {
        let len = self.records.len();
        let Some(end) = index.checked_add(count).filter(|end| *end <= len) else {
            return Err(CollectionError::IndexOutOfRange {
                operation: "replace_at",
                index,
                count,
                len,
            });
        };

        let inserted = replacement.len();
        let removed: Vec<Record> = self.records.splice(index..end, replacement).collect();
        debug!(
            "event=record_splice module=collection status=ok index={} removed={} inserted={} len={}",
            index,
            removed.len(),
            inserted,
            self.records.len()
        );
        Ok(removed)
    }

    /// Removes and returns the first record.
    ///
    /// # Errors
    /// - `EmptyCollection` when there is no record to remove.
    pub fn remove_first(&mut self) -> CollectionResult<Record> {
        if self.records.is_empty() {
            return Err(CollectionError::EmptyCollection {
                operation: "remove_first",
            });
        }
        let record = self.records.remove(0);
        debug!(
            "event=record_shift module=collection status=ok id={} len={}",
            record.id,
            self.records.len()
        );
        Ok(record)
    }

    /// Removes and returns the last record.
    ///
    /// # Errors
    /// - `EmptyCollection` when there is no record to remove.
    pub fn remove_last(&mut self) -> CollectionResult<Record> {
        let record = self
            .records
            .pop()
            .ok_or(CollectionError::EmptyCollection {
                operation: "remove_last",
            })?;
        debug!(
            "event=record_pop module=collection status=ok id={} len={}",
            record.id,
            self.records.len()
        );
        Ok(record)
    }

    fn weighed(&self) -> impl Iterator<Item = (&Record, f64)> + '_ {
        let policy = self.weight_policy;
        self.records
            .iter()
            .filter_map(move |record| record.parsed_weight(policy).map(|weight| (record, weight)))
    }

    fn derive(&self, records: Vec<Record>) -> RecordCollection {
        Self {
            records,
            weight_policy: self.weight_policy,
        }
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
