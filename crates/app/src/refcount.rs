//! Reference-counted arena.
//!
//! Values are owned by the arena and addressed by key. Each key carries a
//! count of holders; [`RefArena::release`] hands the value back exactly once,
//! at the transition to zero, after it has been unlinked. Nothing else ever
//! removes a value, so there is no way to free an object that still has
//! holders or to leave a stale key behind.

/// Insertion-ordered arena of reference-counted values.
#[derive(Debug)]
pub struct RefArena<K, T> {
    entries: Vec<Entry<K, T>>,
}

#[derive(Debug)]
struct Entry<K, T> {
    key: K,
    refs: usize,
    value: T,
}

impl<K, T> Default for RefArena<K, T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Copy + Eq, T> RefArena<K, T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: K) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    /// Store `value` under `key` with a count of one, held by the caller.
    ///
    /// A key that is already live keeps its value; the new value is dropped
    /// and the existing count is bumped instead.
    pub fn insert(&mut self, key: K, value: T) -> K {
        if self.acquire(key) {
            return key;
        }
        self.entries.push(Entry {
            key,
            refs: 1,
            value,
        });
        key
    }

    /// Take one more reference. Returns `false` for an unknown key.
    pub fn acquire(&mut self, key: K) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries[index].refs += 1;
                true
            }
            None => false,
        }
    }

    /// Drop one reference.
    ///
    /// When the count reaches zero the entry is unlinked and its value is
    /// returned to the caller, who becomes responsible for destroying it.
    pub fn release(&mut self, key: K) -> Option<T> {
        let index = self.position(key)?;
        let entry = &mut self.entries[index];
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs > 0 {
            return None;
        }
        Some(self.entries.remove(index).value)
    }

    #[must_use]
    pub fn get(&self, key: K) -> Option<&T> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.entries
            .iter_mut()
            .find(|entry| entry.key == key)
            .map(|entry| &mut entry.value)
    }

    /// Current number of holders, or `None` once the value is gone.
    #[must_use]
    pub fn count(&self, key: K) -> Option<usize> {
        self.position(key).map(|index| self.entries[index].refs)
    }

    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.position(key).is_some()
    }

    /// Snapshot of the live keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Vec<K> {
        self.entries.iter().map(|entry| entry.key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.entries.iter().map(|entry| (entry.key, &entry.value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
