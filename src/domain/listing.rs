use crate::domain::property::{Property, Valuation};
use std::collections::BTreeMap;

/// Position of a listing: total price captured at insertion, then insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ListingKey {
    total_price: i64,
    sequence: u64,
}

/// Price-ordered set of listings.
///
/// The order is a snapshot: it is fixed by `total_price()` when a listing is
/// inserted and is not recomputed if the listing is discounted afterwards.
#[derive(Debug, Clone, Default)]
pub struct ListingStore {
    entries: BTreeMap<ListingKey, Property>,
    next_sequence: u64,
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `property` unless an equal listing is already held.
    /// Returns `false` for a duplicate.
    pub fn insert(&mut self, property: Property) -> bool {
        if self.contains(&property) {
            tracing::debug!("Duplicate listing in {} ignored", property.city());
            return false;
        }

        let key = ListingKey {
            total_price: property.total_price(),
            sequence: self.next_sequence,
        };
        self.next_sequence += 1;
        self.entries.insert(key, property);
        true
    }

    // 與目前（可能已折扣）的值比較，折扣後仍正確
    pub fn contains(&self, property: &Property) -> bool {
        self.entries.values().any(|held| held == property)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Listings in ascending (snapshot) price order.
    pub fn iter(&self) -> impl Iterator<Item = &Property> + '_ {
        self.entries.values()
    }

    /// Mutable access in snapshot order. Changing a price here does not move the listing.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Property> + '_ {
        self.entries.values_mut()
    }

    pub fn apply_discount_all(&mut self, percentage: i32) {
        for property in self.iter_mut() {
            property.apply_discount(percentage);
        }
    }
}

impl Extend<Property> for ListingStore {
    fn extend<T: IntoIterator<Item = Property>>(&mut self, iter: T) {
        for property in iter {
            self.insert(property);
        }
    }
}

impl FromIterator<Property> for ListingStore {
    fn from_iter<T: IntoIterator<Item = Property>>(iter: T) -> Self {
        let mut store = ListingStore::new();
        store.extend(iter);
        store
    }
}
