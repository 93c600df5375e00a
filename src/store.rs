//! Persistence seam for stored bet sets.
//!
//! The engine does not own storage. Route handlers plug a database-backed [`SetStore`]
//! in; [`InMemorySetStore`] is the reference implementation used in tests and demos.

use std::collections::HashMap;
use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lottery::Lottery;
use crate::service::BetItem;

/// Identifier of a stored set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(pub u64);

impl fmt::Display for SetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's saved pool and generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSet {
    pub id: SetId,
    pub lottery: Lottery,
    pub pool: Vec<u32>,
    pub draw_size: usize,
    pub sample_size: usize,
}

/// Storage for sets and their bet items.
pub trait SetStore: Send + Sync {
    fn load_set(&self, id: SetId) -> Result<Option<StoredSet>>;

    fn save_set(&self, set: StoredSet) -> Result<()>;

    /// All items of a set, manual ones included.
    fn items(&self, id: SetId) -> Result<Vec<BetItem>>;

    /// Atomically swap the generated items (non-negative positions) of a set for
    /// `items`. Manual items are kept.
    fn replace_items(&self, id: SetId, items: Vec<BetItem>) -> Result<()>;
}

#[derive(Debug)]
struct Entry {
    set: StoredSet,
    items: Vec<BetItem>,
}

/// `HashMap` behind a `parking_lot::RwLock`.
#[derive(Debug, Default)]
pub struct InMemorySetStore {
    inner: RwLock<HashMap<SetId, Entry>>,
}

impl InMemorySetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a manually entered bet. It gets the next free negative position.
    pub fn add_manual_item(&self, id: SetId, mut numbers: Vec<u32>) -> Result<BetItem> {
        let mut inner = self.inner.write();
        let entry = inner.get_mut(&id).ok_or(Error::SetNotFound(id))?;

        let lowest = entry
            .items
            .iter()
            .map(|it| it.position)
            .filter(|&p| p < 0)
            .min()
            .unwrap_or(0);

        numbers.sort_unstable();
        let item = BetItem {
            position: lowest - 1,
            numbers,
        };
        entry.items.push(item.clone());
        Ok(item)
    }
}

impl SetStore for InMemorySetStore {
    fn load_set(&self, id: SetId) -> Result<Option<StoredSet>> {
        Ok(self.inner.read().get(&id).map(|e| e.set.clone()))
    }

    fn save_set(&self, set: StoredSet) -> Result<()> {
        let mut inner = self.inner.write();
        match inner.get_mut(&set.id) {
            Some(entry) => entry.set = set,
            None => {
                inner.insert(
                    set.id,
                    Entry {
                        set,
                        items: Vec::new(),
                    },
                );
            }
        }
        Ok(())
    }

    fn items(&self, id: SetId) -> Result<Vec<BetItem>> {
        self.inner
            .read()
            .get(&id)
            .map(|e| e.items.clone())
            .ok_or(Error::SetNotFound(id))
    }

    fn replace_items(&self, id: SetId, items: Vec<BetItem>) -> Result<()> {
        let mut inner = self.inner.write();
        let entry = inner.get_mut(&id).ok_or(Error::SetNotFound(id))?;
        entry.items.retain(BetItem::is_manual);
        entry.items.extend(items);
        Ok(())
    }
}
