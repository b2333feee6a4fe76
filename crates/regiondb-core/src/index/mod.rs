// crates/regiondb-core/src/index/mod.rs

//! # Region Index
//!
//! The immutable artifact produced by [`IndexBuilder`](crate::loader::builder::IndexBuilder)
//! and consumed by the search engine. Every lookup structure is a named
//! field so the persisted schema is explicit and versioned by the file
//! header rather than implied by serialization order.

pub mod bitmap;
pub mod trie;

pub use bitmap::BitmapIndex;
pub use trie::{NodeId, Trie, TrieNode};

use crate::common::IndexStats;
use crate::model::{Region, SearchKeys};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Term -> set of region codes.
pub type TermIndex = HashMap<String, BTreeSet<String>>;

/// Bitmap labels for level membership: `level_<level>`.
pub fn level_label(level: &str) -> String {
    format!("level_{level}")
}

/// Bitmap labels for common abbreviation membership: `initial_<xx>`.
pub fn initial_label(initial: &str) -> String {
    format!("initial_{initial}")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionIndex {
    /// Dense position -> code, in arrival order. Inverse of `code_to_index`.
    pub codes: Vec<String>,
    pub code_to_index: HashMap<String, usize>,
    pub code_to_region: HashMap<String, Region>,
    /// Folded comparison keys, computed once per region.
    pub search_keys: HashMap<String, SearchKeys>,

    pub name_inverted: TermIndex,
    pub pinyin_inverted: TermIndex,
    pub short_inverted: TermIndex,
    pub level_inverted: TermIndex,
    pub parent_inverted: TermIndex,

    pub name_trie: Trie,
    pub pinyin_trie: Trie,
    pub short_trie: Trie,

    pub name_ngrams: TermIndex,
    pub pinyin_ngrams: TermIndex,

    /// Root-first ancestor chain, always ending with the code itself.
    pub ancestor_cache: HashMap<String, Vec<String>>,
    pub bitmap_indices: HashMap<String, BitmapIndex>,

    pub stats: IndexStats,
}

impl RegionIndex {
    pub fn region_count(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Regions in dense-position order.
    pub fn iter_regions(&self) -> impl Iterator<Item = &Region> {
        self.codes
            .iter()
            .filter_map(move |code| self.code_to_region.get(code))
    }

    /// Regions paired with their comparison keys, in dense-position order.
    pub fn iter_keyed(&self) -> impl Iterator<Item = (&Region, &SearchKeys)> {
        self.codes.iter().filter_map(move |code| {
            Some((self.code_to_region.get(code)?, self.search_keys.get(code)?))
        })
    }

    pub fn keys(&self, code: &str) -> Option<&SearchKeys> {
        self.search_keys.get(code)
    }

    pub fn position(&self, code: &str) -> Option<usize> {
        self.code_to_index.get(code).copied()
    }

    pub fn bitmap(&self, label: &str) -> Option<&BitmapIndex> {
        self.bitmap_indices.get(label)
    }

    pub fn level_bitmap(&self, level: &str) -> Option<&BitmapIndex> {
        self.bitmap(&level_label(level))
    }

    /// Number of regions at a level, read from the level bitmap.
    pub fn count_at_level(&self, level: &str) -> usize {
        self.level_bitmap(level).map_or(0, BitmapIndex::count)
    }

    /// Union of the level bitmaps for `levels`; `None` when no level is known.
    pub fn levels_mask(&self, levels: &[&str]) -> Option<BitmapIndex> {
        levels
            .iter()
            .filter_map(|level| self.level_bitmap(level))
            .fold(None, |acc: Option<BitmapIndex>, b| match acc {
                None => Some(b.clone()),
                Some(a) => Some(a.or(b)),
            })
    }

    /// Intersection of the bitmaps named by `labels`; `None` if any is missing.
    pub fn intersect(&self, labels: &[&str]) -> Option<BitmapIndex> {
        let mut iter = labels.iter();
        let first = self.bitmap(iter.next()?)?.clone();
        iter.try_fold(first, |acc, label| Some(acc.and(self.bitmap(label)?)))
    }

    /// Codes whose dense position is set in `mask`, in position order.
    pub fn codes_in(&self, mask: &BitmapIndex) -> Vec<&str> {
        mask.iter_ones()
            .filter_map(|pos| self.codes.get(pos).map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::loader::builder::IndexBuilder;
    use crate::model::RegionRaw;

    #[test]
    fn bitmaps_combine_by_label() {
        let index = IndexBuilder::new(vec![
            RegionRaw::new("110000", "北京市", "省级").with_pinyin("bei jing shi", "bj"),
            RegionRaw::new("310000", "上海市", "省级").with_pinyin("shang hai shi", "sh"),
            RegionRaw::new("441900", "东莞市", "市级").with_pinyin("dong guan shi", "dg"),
        ])
        .build_all_indices();

        let beijing = index.intersect(&["level_省级", "initial_bj"]).unwrap();
        assert_eq!(index.codes_in(&beijing), ["110000"]);
        assert!(index.intersect(&["level_省级", "initial_gz"]).is_none());
        assert!(index.intersect(&[]).is_none());

        let all = index.levels_mask(&["省级", "市级"]).unwrap();
        assert_eq!(all.count(), index.region_count());
        assert!(index.levels_mask(&["村级"]).is_none());
        assert_eq!(index.stats.bitmap_indices, 4);
    }
}
