//! A fixed 9-key slot map: each of 9 keys is either unresolved or holds one occupant, with an
//! O(1) count of how many keys remain unresolved.

/// Fixed-domain slot map over keys `0..9`.
#[derive(Debug, Clone)]
pub struct SlotMap<V> {
    slots: [Option<V>; 9],
    remaining: usize,
}

impl<V: Copy> Default for SlotMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Copy> SlotMap<V> {
    /// A fresh slot map with all 9 keys unresolved.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: [None; 9],
            remaining: 9,
        }
    }

    /// Resolve `key` to `occupant`.
    ///
    /// # Panics
    /// Panics if `key` was already resolved; callers must check [`SlotMap::get`] first.
    pub fn set(&mut self, key: usize, occupant: V) {
        assert!(self.slots[key].is_none(), "slot {key} already resolved");
        self.slots[key] = Some(occupant);
        self.remaining -= 1;
    }

    /// The occupant at `key`, if resolved.
    #[must_use]
    pub fn get(&self, key: usize) -> Option<V> {
        self.slots[key]
    }

    /// How many keys remain unresolved.
    #[must_use]
    pub fn len(&self) -> usize {
        self.remaining
    }

    /// Whether every key is resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// The single remaining unresolved key.
    ///
    /// # Panics
    /// Panics unless exactly one key is unresolved.
    #[must_use]
    pub fn sole(&self) -> usize {
        assert_eq!(self.remaining, 1, "sole() requires exactly one remaining key");
        self.unresolved_keys().next().expect("checked above")
    }

    /// Keys still unresolved, in ascending order.
    pub fn unresolved_keys(&self) -> impl Iterator<Item = usize> + '_ {
        (0..9).filter(move |&k| self.slots[k].is_none())
    }

    /// Occupants of the resolved keys, in ascending key order.
    pub fn resolved(&self) -> impl Iterator<Item = V> + '_ {
        self.slots.iter().filter_map(|s| *s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_nine_unresolved() {
        let map: SlotMap<u8> = SlotMap::new();
        assert_eq!(map.len(), 9);
        assert_eq!(map.unresolved_keys().count(), 9);
    }

    #[test]
    fn set_decrements_remaining_and_is_visible() {
        let mut map = SlotMap::new();
        map.set(3, 42u8);
        assert_eq!(map.len(), 8);
        assert_eq!(map.get(3), Some(42));
        assert_eq!(map.get(4), None);
    }

    #[test]
    #[should_panic(expected = "already resolved")]
    fn double_set_panics() {
        let mut map = SlotMap::new();
        map.set(0, 1u8);
        map.set(0, 2u8);
    }

    #[test]
    fn sole_finds_the_last_unresolved_key() {
        let mut map = SlotMap::new();
        for k in 0..8 {
            map.set(k, k as u8);
        }
        assert_eq!(map.sole(), 8);
    }

    #[test]
    fn resolved_yields_values_in_key_order() {
        let mut map = SlotMap::new();
        map.set(5, 'b');
        map.set(1, 'a');
        assert_eq!(map.resolved().collect::<Vec<_>>(), vec!['a', 'b']);
    }
}
