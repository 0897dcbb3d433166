//! Favorite items, persisted across sessions.
//!
//! Favorites only influence listing order: favorites first, then everything
//! else, each group sorted by name.

use super::{ItemId, ItemRecord};
use crate::constants::FAVORITES_KEY;
use crate::progress::StateStorage;
use crate::progress::storage::PersistedSet;
use std::cmp::Ordering;
use std::sync::Arc;

/// Persisted set of favorite item ids under the `favorites` key.
pub struct FavoriteSet {
    ids: PersistedSet,
}

impl FavoriteSet {
    /// Load favorites; corrupt or missing state yields an empty set.
    pub fn load(storage: Arc<dyn StateStorage>) -> Self {
        Self {
            ids: PersistedSet::load(storage, FAVORITES_KEY),
        }
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id.as_str())
    }

    /// Flip `id` in or out of the set and persist. Returns the new state.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        self.ids.toggle(id.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.members().is_empty()
    }

    /// Sort records favorites first, then by case-insensitive name.
    pub fn sort_for_listing(&self, records: &mut [&ItemRecord]) {
        records.sort_by(|a, b| {
            match (self.contains(&a.id), self.contains(&b.id)) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => compare_names(&a.name, &b.name),
            }
        });
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
