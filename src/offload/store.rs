use std::collections::HashMap;

use super::OffloadResult;
use crate::signal_processing::FilterKind;

/// Latest result per filter. No history: a new result replaces the old one.
#[derive(Debug, Default)]
pub struct ResultStore {
    results: HashMap<FilterKind, OffloadResult>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `result` under `filter`, returning the entry it replaced.
    pub fn put(&mut self, filter: FilterKind, result: OffloadResult) -> Option<OffloadResult> {
        self.results.insert(filter, result)
    }

    pub fn get(&self, filter: FilterKind) -> Option<&OffloadResult> {
        self.results.get(&filter)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKind, &OffloadResult)> {
        self.results.iter().map(|(k, v)| (*k, v))
    }
}
