//! Tolerance filter engine.
//!
//! A record qualifies when it is usable and, on every dimension, its value
//! lies within the inclusive tolerance of the target. Geometrically this is
//! membership in an axis-aligned box around the target point, not a
//! Euclidean ball. Output keeps the input order and never deduplicates.

use std::sync::Arc;

use crate::dimension::Dimension;
use crate::params::ParameterVector;
use crate::record::Record;
use crate::validate::is_usable;

/// Whether `record` passes every per-dimension tolerance check.
#[must_use]
pub fn qualifies(record: &Record, params: &ParameterVector) -> bool {
    if !is_usable(record) {
        return false;
    }
    Dimension::ALL.iter().all(|&dim| {
        record.number(dim).is_some_and(|value| {
            (value - params.target(dim)).abs() <= params.tolerance_for(dim)
        })
    })
}

/// The qualifying records, in input order.
#[must_use]
pub fn filter<'a>(records: &'a [Record], params: &ParameterVector) -> Vec<&'a Record> {
    records.iter().filter(|r| qualifies(r, params)).collect()
}

/// Positions of the qualifying records, ascending.
#[must_use]
pub fn filter_indices(records: &[Record], params: &ParameterVector) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| qualifies(r, params).then_some(i))
        .collect()
}

/// Remembers the last filter pass over a shared record collection.
///
/// The cache is keyed on the identity of the `Arc` and the value of the
/// parameter vector. Any change to either recomputes the whole pass.
#[derive(Debug, Default)]
pub struct FilterCache {
    last: Option<CachedPass>,
}

#[derive(Debug)]
struct CachedPass {
    records: Arc<[Record]>,
    params: ParameterVector,
    indices: Vec<usize>,
}

impl FilterCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indices of the qualifying records, recomputed only on a key change.
    pub fn indices(&mut self, records: &Arc<[Record]>, params: &ParameterVector) -> &[usize] {
        let hit = self
            .last
            .as_ref()
            .is_some_and(|c| Arc::ptr_eq(&c.records, records) && c.params == *params);

        if !hit {
            self.last = None;
        }

        let pass = self.last.get_or_insert_with(|| {
            log::trace!("filter cache miss, recomputing {} records", records.len());
            CachedPass {
                records: Arc::clone(records),
                params: *params,
                indices: filter_indices(records, params),
            }
        });
        &pass.indices
    }

    /// The qualifying records themselves, in input order.
    pub fn filter<'a>(
        &mut self,
        records: &'a Arc<[Record]>,
        params: &ParameterVector,
    ) -> Vec<&'a Record> {
        self.indices(records, params)
            .iter()
            .filter_map(|&i| records.get(i))
            .collect()
    }
}
