use std::hash::Hash;

use ahash::AHashMap;

/// Evenly spaced slots for an ordered categorical domain. Slot order is the
/// order keys were supplied in; later duplicates are ignored.
#[derive(Debug, Clone)]
pub struct BandScale<K: Eq + Hash + Clone> {
    index: AHashMap<K, usize>, // key -> slot
    len: usize,
    range: (f64, f64),
}

impl<K: Eq + Hash + Clone> BandScale<K> {
    pub fn new(domain: impl IntoIterator<Item = K>, range: (f64, f64)) -> Self {
        let mut index = AHashMap::new();
        let mut len = 0;
        for key in domain {
            index.entry(key).or_insert_with(|| {
                len += 1;
                len - 1
            });
        }
        Self { index, len, range }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Width of one slot.
    pub fn step(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            (self.range.1 - self.range.0) / self.len as f64
        }
    }

    /// Pixel position of the start of `key`'s slot.
    pub fn position(&self, key: &K) -> Option<f64> {
        self.index.get(key).map(|&slot| self.range.0 + slot as f64 * self.step())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_divide_the_range_evenly() {
        let scale = BandScale::new(["a", "b", "c"], (0.0, 60.0));
        assert_eq!(scale.len(), 3);
        assert_eq!(scale.step(), 20.0);
        assert_eq!(scale.position(&"a"), Some(0.0));
        assert_eq!(scale.position(&"b"), Some(20.0));
        assert_eq!(scale.position(&"c"), Some(40.0));
        assert_eq!(scale.position(&"d"), None);
    }

    #[test]
    fn duplicate_keys_keep_the_first_slot() {
        let scale = BandScale::new(["a", "b", "a"], (0.0, 40.0));
        assert_eq!(scale.len(), 2);
        assert_eq!(scale.position(&"a"), Some(0.0));
    }

    #[test]
    fn empty_domain_is_inert() {
        let scale: BandScale<&str> = BandScale::new([], (0.0, 100.0));
        assert!(scale.is_empty());
        assert_eq!(scale.step(), 0.0);
    }
}
