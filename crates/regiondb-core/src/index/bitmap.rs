// crates/regiondb-core/src/index/bitmap.rs
use serde::{Deserialize, Serialize};

/// Fixed-capacity bit set over the dense region positions.
///
/// Out-of-range positions are ignored on `set` and read as unset on `get`.
/// Boolean combination only touches the overlapping word range, so both
/// operands must be built over the same position space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitmapIndex {
    capacity: usize,
    words: Vec<u64>,
}

impl BitmapIndex {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            words: vec![0; capacity.div_ceil(64)],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn set(&mut self, index: usize) {
        if index < self.capacity {
            self.words[index / 64] |= 1u64 << (index % 64);
        }
    }

    pub fn get(&self, index: usize) -> bool {
        if index < self.capacity {
            self.words[index / 64] & (1u64 << (index % 64)) != 0
        } else {
            false
        }
    }

    pub fn and(&self, other: &BitmapIndex) -> BitmapIndex {
        self.combine(other, |a, b| a & b)
    }

    pub fn or(&self, other: &BitmapIndex) -> BitmapIndex {
        self.combine(other, |a, b| a | b)
    }

    fn combine(&self, other: &BitmapIndex, op: impl Fn(u64, u64) -> u64) -> BitmapIndex {
        let mut out = BitmapIndex::new(self.capacity);
        for (i, (a, b)) in self.words.iter().zip(&other.words).enumerate() {
            out.words[i] = op(*a, *b);
        }
        out
    }

    /// Population count; runs in O(set bits).
    pub fn count(&self) -> usize {
        let mut count = 0;
        for &word in &self.words {
            let mut n = word;
            while n != 0 {
                n &= n - 1;
                count += 1;
            }
        }
        count
    }

    /// Positions of all set bits in ascending order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut n = word;
            std::iter::from_fn(move || {
                if n == 0 {
                    return None;
                }
                let bit = n.trailing_zeros() as usize;
                n &= n - 1;
                Some(w * 64 + bit)
            })
        })
    }
}
