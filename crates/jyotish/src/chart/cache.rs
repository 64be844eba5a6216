use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::birth::{BirthEvent, BirthKey};
use crate::chart::types::Chart;

/// Computed charts keyed by birth event. Floats compare bit for bit.
#[derive(Debug, Default)]
pub struct ChartCache {
    entries: Mutex<HashMap<BirthKey, Arc<Chart>>>,
}

impl ChartCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, birth: &BirthEvent) -> Option<Arc<Chart>> {
        self.lock().get(&birth.cache_key()).cloned()
    }

    /// Store `chart`, keeping an existing entry for the same event if one
    /// raced in first. Returns the entry that is cached.
    pub fn insert(&self, birth: &BirthEvent, chart: Arc<Chart>) -> Arc<Chart> {
        self.lock()
            .entry(birth.cache_key())
            .or_insert(chart)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<BirthKey, Arc<Chart>>> {
        // Entries are inserted whole, so a poisoned map is still consistent
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
