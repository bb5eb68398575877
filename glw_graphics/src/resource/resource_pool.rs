/// Insertion-ordered pool of resources addressed by generation-checked keys.
///
/// Keys come from a `SlotMap`, so a key that outlives its resource (after
/// teardown) is rejected instead of aliasing a newer entry. Positions
/// follow creation order and never shift: there is no single-entry
/// removal, only `replace` (same key, new occupant) and `drain`.

use slotmap::{Key, SlotMap};

pub struct ResourcePool<K: Key, T> {
    entries: SlotMap<K, T>,
    order: Vec<K>,
}

impl<K: Key, T> ResourcePool<K, T> {
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Append a resource and return its key
    pub fn insert(&mut self, value: T) -> K {
        let key = self.entries.insert(value);
        self.order.push(key);
        key
    }

    pub fn get(&self, key: K) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.entries.get_mut(key)
    }

    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Key of the resource created at `position`
    pub fn handle_at(&self, position: usize) -> Option<K> {
        self.order.get(position).copied()
    }

    /// Creation position of `key`
    pub fn position(&self, key: K) -> Option<usize> {
        if !self.contains(key) {
            return None;
        }
        self.order.iter().position(|k| *k == key)
    }

    /// Most recently created resource
    pub fn last(&self) -> Option<(K, &T)> {
        let key = *self.order.last()?;
        self.entries.get(key).map(|value| (key, value))
    }

    /// Swap in a new occupant for `key`, returning the old one
    ///
    /// When `key` is stale the new value is handed back untouched as `Err`.
    pub fn replace(&mut self, key: K, value: T) -> Result<T, T> {
        match self.entries.get_mut(key) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(value),
        }
    }

    /// Resources in creation order
    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> + '_ {
        self.order
            .iter()
            .filter_map(move |key| self.entries.get(*key).map(|value| (*key, value)))
    }

    /// Remove every resource, in creation order, invalidating all keys
    pub fn drain(&mut self) -> Vec<T> {
        let order = std::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|key| self.entries.remove(key))
            .collect()
    }
}

impl<K: Key, T> Default for ResourcePool<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "resource_pool_tests.rs"]
mod tests;
