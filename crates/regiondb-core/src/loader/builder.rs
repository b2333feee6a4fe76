// crates/regiondb-core/src/loader/builder.rs
use crate::common::{IndexStats, LogContext};
use crate::config::CompressionMode;
use crate::error::Result;
use crate::index::{initial_label, level_label, BitmapIndex, RegionIndex, TermIndex};
use crate::model::{Region, RegionRaw, SearchKeys};
use crate::storage::IndexStorage;
use crate::text;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;
use std::time::Instant;

/// Abbreviations that get a dedicated `initial_<xx>` bitmap when present.
pub const COMMON_INITIALS: [&str; 5] = ["bj", "sh", "gz", "sz", "cd"];

/// One-shot index builder over a complete, externally curated region list.
///
/// Input is trusted: a `parent_code` that does not resolve simply ends the
/// ancestor chain early. The only repair performed is dropping records whose
/// code is empty or already seen, which keeps `code_to_index` a bijection.
pub struct IndexBuilder {
    regions: Vec<Region>,
    log: LogContext,
}

impl IndexBuilder {
    pub fn new(raw: Vec<RegionRaw>) -> Self {
        Self {
            regions: raw.into_iter().map(Region::from).collect(),
            log: LogContext::default().child("builder"),
        }
    }

    #[cfg(feature = "json")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(super::load_regions_json(path)?))
    }

    pub fn with_log(mut self, log: LogContext) -> Self {
        self.log = log;
        self
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    /// Runs every phase in order. Each phase reads state left by the previous one.
    pub fn build_all_indices(&self) -> RegionIndex {
        let started = Instant::now();
        let mut index = RegionIndex::default();

        self.phase("basic", || self.build_basic_indices(&mut index));
        self.phase("inverted", || build_inverted_indices(&mut index));
        self.phase("trie", || build_trie_indices(&mut index));
        self.phase("ngram", || {
            build_ngram_indices(&mut index, 2);
            build_ngram_indices(&mut index, 3);
        });
        self.phase("bitmap", || build_bitmap_indices(&mut index));
        self.phase("relation", || build_relation_indices(&mut index));

        index.stats = calculate_stats(&index, started.elapsed().as_millis() as u64);
        log::info!(
            target: self.log.target(),
            "built index over {} regions in {} ms ({} name terms, {} pinyin terms, {} bitmaps)",
            index.stats.regions,
            index.stats.build_millis,
            index.stats.name_terms,
            index.stats.pinyin_terms,
            index.stats.bitmap_indices
        );
        index
    }

    /// Builds and writes the index in one go, returning the built index.
    pub fn save_to_file(
        &self,
        path: impl AsRef<Path>,
        compression: CompressionMode,
    ) -> Result<RegionIndex> {
        let index = self.build_all_indices();
        IndexStorage::new(compression)
            .with_log(self.log.child("storage"))
            .save(path, &index)?;
        Ok(index)
    }

    fn phase(&self, name: &str, run: impl FnOnce()) {
        let started = Instant::now();
        run();
        log::debug!(
            target: self.log.target(),
            "phase {name} done in {:?}",
            started.elapsed()
        );
    }

    // -------------------------------------------------------------------------
    // PHASE 1: dense positions
    // -------------------------------------------------------------------------

    fn build_basic_indices(&self, index: &mut RegionIndex) {
        for region in &self.regions {
            if region.code.is_empty() {
                log::warn!(target: self.log.target(), "skipping region {:?} without code", region.name);
                continue;
            }
            if index.code_to_index.contains_key(&region.code) {
                log::warn!(target: self.log.target(), "skipping duplicate region code {}", region.code);
                continue;
            }
            let position = index.codes.len();
            index.codes.push(region.code.clone());
            index.code_to_index.insert(region.code.clone(), position);
            index
                .search_keys
                .insert(region.code.clone(), SearchKeys::for_region(region));
            index.code_to_region.insert(region.code.clone(), region.clone());
        }
    }
}

fn add_term(index: &mut TermIndex, term: impl Into<String>, code: &str) {
    index.entry(term.into()).or_default().insert(code.to_string());
}

// -----------------------------------------------------------------------------
// PHASE 2: inverted term indices
// -----------------------------------------------------------------------------

fn build_inverted_indices(index: &mut RegionIndex) {
    let RegionIndex {
        codes,
        code_to_region,
        search_keys,
        name_inverted,
        pinyin_inverted,
        short_inverted,
        level_inverted,
        parent_inverted,
        ..
    } = index;

    for code in codes.iter() {
        let (Some(region), Some(keys)) = (code_to_region.get(code), search_keys.get(code)) else {
            continue;
        };

        add_term(name_inverted, keys.name.as_str(), code);
        for c in keys.name.chars() {
            add_term(name_inverted, c, code);
        }

        if let Some(clean) = &keys.pinyin {
            add_term(pinyin_inverted, text::fold_key(&region.pinyin), code);
            add_term(pinyin_inverted, clean.as_str(), code);
            for c in clean.chars() {
                add_term(pinyin_inverted, c, code);
            }
        }

        if let Some(short) = &keys.pinyin_short {
            add_term(short_inverted, short.as_str(), code);
            for c in short.chars() {
                add_term(short_inverted, c, code);
            }
        }

        add_term(level_inverted, region.level.as_str(), code);

        if region.has_parent() {
            add_term(parent_inverted, region.parent_code.as_str(), code);
        }
    }
}

// -----------------------------------------------------------------------------
// PHASE 3: prefix tries
// -----------------------------------------------------------------------------

fn build_trie_indices(index: &mut RegionIndex) {
    let RegionIndex {
        codes,
        search_keys,
        name_trie,
        pinyin_trie,
        short_trie,
        ..
    } = index;

    for code in codes.iter() {
        let Some(keys) = search_keys.get(code) else {
            continue;
        };
        name_trie.insert(&keys.name, code);
        if let Some(pinyin) = &keys.pinyin {
            pinyin_trie.insert(pinyin, code);
        }
        if let Some(short) = &keys.pinyin_short {
            short_trie.insert(short, code);
        }
    }
}

// -----------------------------------------------------------------------------
// PHASE 4: n-grams
// -----------------------------------------------------------------------------

fn build_ngram_indices(index: &mut RegionIndex, n: usize) {
    let RegionIndex {
        codes,
        search_keys,
        name_ngrams,
        pinyin_ngrams,
        ..
    } = index;

    for code in codes.iter() {
        let Some(keys) = search_keys.get(code) else {
            continue;
        };
        for gram in text::char_ngrams(&keys.name, n) {
            add_term(name_ngrams, gram, code);
        }
        if let Some(pinyin) = &keys.pinyin {
            for gram in text::char_ngrams(pinyin, n) {
                add_term(pinyin_ngrams, gram, code);
            }
        }
    }
}

// -----------------------------------------------------------------------------
// PHASE 5: membership bitmaps
// -----------------------------------------------------------------------------

fn build_bitmap_indices(index: &mut RegionIndex) {
    let capacity = index.codes.len();
    let RegionIndex {
        code_to_index,
        level_inverted,
        short_inverted,
        bitmap_indices,
        ..
    } = index;

    let to_bitmap = |codes: &std::collections::BTreeSet<String>| {
        let mut bitmap = BitmapIndex::new(capacity);
        for code in codes {
            if let Some(&pos) = code_to_index.get(code) {
                bitmap.set(pos);
            }
        }
        bitmap
    };

    for (level, codes) in level_inverted.iter() {
        bitmap_indices.insert(level_label(level), to_bitmap(codes));
    }

    for initial in COMMON_INITIALS {
        if let Some(codes) = short_inverted.get(initial) {
            bitmap_indices.insert(initial_label(initial), to_bitmap(codes));
        }
    }
}

// -----------------------------------------------------------------------------
// PHASE 6: ancestor chains
// -----------------------------------------------------------------------------

fn build_relation_indices(index: &mut RegionIndex) {
    let RegionIndex {
        codes,
        code_to_region,
        ancestor_cache,
        ..
    } = index;

    for code in codes.iter() {
        ancestor_cache.insert(code.clone(), ancestor_chain(code, code_to_region));
    }
}

/// Root-first chain ending with `code`.
///
/// Stops at an empty or unknown parent, a self-reference, or any code seen
/// before, so malformed cyclic input still terminates.
pub fn ancestor_chain(code: &str, regions: &HashMap<String, Region>) -> Vec<String> {
    let mut chain = VecDeque::new();
    let mut seen = HashSet::new();
    let mut current = code;

    while let Some(region) = regions.get(current) {
        if !seen.insert(current) {
            break;
        }
        chain.push_front(current.to_string());
        if !region.has_parent() || region.parent_code == region.code {
            break;
        }
        current = region.parent_code.as_str();
    }
    chain.into()
}

// -----------------------------------------------------------------------------
// PHASE 7: statistics
// -----------------------------------------------------------------------------

fn calculate_stats(index: &RegionIndex, build_millis: u64) -> IndexStats {
    IndexStats {
        regions: index.codes.len(),
        name_terms: index.name_inverted.len(),
        pinyin_terms: index.pinyin_inverted.len(),
        short_terms: index.short_inverted.len(),
        ngram_terms: index.name_ngrams.len() + index.pinyin_ngrams.len(),
        bitmap_indices: index.bitmap_indices.len(),
        build_millis,
    }
}
