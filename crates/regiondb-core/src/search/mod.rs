// crates/regiondb-core/src/search/mod.rs

//! # Search Engine
//!
//! [`RegionSearchEngine`] is either *unloaded* (no index bound, every search
//! fails with [`RegionDbError::State`]) or *loaded*. Loading again replaces
//! the bound index wholesale; a bound index is never mutated, so a loaded
//! engine can be shared across threads for concurrent searches.
//!
//! A search runs:
//!
//! 1. fold and trim the query; an empty query yields no results
//! 2. resolve `auto` with [`detect_search_type`]
//! 3. try the province + city combo parser for `pinyin_combo`, falling back
//!    to `pinyin` when it finds nothing
//! 4. gather candidates ([`strategy`]), score and rank them ([`score`])
//! 5. attach hierarchy context ([`hierarchy`])

pub mod classify;
pub mod combo;
pub mod hierarchy;
pub mod score;
pub mod strategy;

pub use classify::{could_be_combo, detect_search_type, looks_like_pinyin};
pub use hierarchy::build_full_info;

use crate::common::LogContext;
use crate::config::SearchConfig;
use crate::error::{RegionDbError, Result};
use crate::index::{BitmapIndex, RegionIndex};
use crate::loader::common_io;
use crate::model::{FullInfo, SearchResult};
use crate::storage::IndexStorage;
use crate::text;
use score::Scored;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Requested search mode. `Auto` is resolved per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SearchType {
    #[default]
    Auto,
    All,
    Name,
    Pinyin,
    Short,
    Path,
    Mixed,
    PinyinCombo,
}

impl SearchType {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchType::Auto => "auto",
            SearchType::All => "all",
            SearchType::Name => "name",
            SearchType::Pinyin => "pinyin",
            SearchType::Short => "short",
            SearchType::Path => "path",
            SearchType::Mixed => "mixed",
            SearchType::PinyinCombo => "pinyin_combo",
        }
    }

    /// Fields consulted by candidate gathering. Mixed and path queries
    /// search everything.
    pub fn field_scope(self) -> FieldScope {
        match self {
            SearchType::Name => FieldScope::Name,
            SearchType::Pinyin | SearchType::PinyinCombo => FieldScope::Pinyin,
            SearchType::Short => FieldScope::Short,
            SearchType::Auto | SearchType::All | SearchType::Path | SearchType::Mixed => {
                FieldScope::All
            }
        }
    }
}

impl FromStr for SearchType {
    type Err = RegionDbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SearchType::Auto),
            "all" => Ok(SearchType::All),
            "name" => Ok(SearchType::Name),
            "pinyin" => Ok(SearchType::Pinyin),
            "short" => Ok(SearchType::Short),
            "path" => Ok(SearchType::Path),
            "mixed" => Ok(SearchType::Mixed),
            "pinyin_combo" => Ok(SearchType::PinyinCombo),
            other => Err(RegionDbError::InvalidArgument(format!(
                "unknown search type '{other}'"
            ))),
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which indexed fields a strategy looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldScope {
    All,
    Name,
    Pinyin,
    Short,
}

impl FieldScope {
    #[inline]
    pub fn covers_name(self) -> bool {
        matches!(self, FieldScope::All | FieldScope::Name)
    }

    #[inline]
    pub fn covers_pinyin(self) -> bool {
        matches!(self, FieldScope::All | FieldScope::Pinyin)
    }

    #[inline]
    pub fn covers_short(self) -> bool {
        matches!(self, FieldScope::All | FieldScope::Short)
    }
}

#[derive(Debug, Clone)]
pub struct RegionSearchEngine {
    index: Option<Arc<RegionIndex>>,
    config: SearchConfig,
    log: LogContext,
}

/// Older name of [`RegionSearchEngine`].
pub type AddressStandardizer = RegionSearchEngine;

impl Default for RegionSearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSearchEngine {
    /// An unloaded engine with default tuning.
    pub fn new() -> Self {
        Self {
            index: None,
            config: SearchConfig::default(),
            log: LogContext::default().child("engine"),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_log(mut self, log: LogContext) -> Self {
        self.log = log;
        self
    }

    /// Binds an already built or loaded index.
    pub fn with_index(mut self, index: impl Into<Arc<RegionIndex>>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Probes the conventional locations under the bundled data directory.
    ///
    /// See [`discover_in`](Self::discover_in).
    pub fn discover(region: &str) -> Self {
        Self::discover_in(common_io::default_data_dir(), region)
    }

    /// Loads the first readable index among
    /// [`index_search_paths`](common_io::index_search_paths). Missing or
    /// unreadable files are logged and skipped; if none loads the engine
    /// stays unloaded.
    pub fn discover_in(data_dir: impl AsRef<Path>, region: &str) -> Self {
        let mut engine = Self::new();
        for path in common_io::index_search_paths(data_dir.as_ref(), region) {
            if !path.is_file() {
                continue;
            }
            match engine.load_index(&path) {
                Ok(()) => return engine,
                Err(e) => log::warn!(
                    target: engine.log.target(),
                    "skipping unreadable index {}: {e}",
                    path.display()
                ),
            }
        }
        log::warn!(
            target: engine.log.target(),
            "no index found for region {region}; engine stays unloaded"
        );
        engine
    }

    /// Loads an index file, replacing any index already bound.
    pub fn load_index(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let index = IndexStorage::default()
            .with_log(self.log.child("storage"))
            .load(path)?;
        log::info!(
            target: self.log.target(),
            "index loaded: {} regions",
            index.region_count()
        );
        self.index = Some(Arc::new(index));
        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.index.is_some()
    }

    pub fn index(&self) -> Option<&RegionIndex> {
        self.index.as_deref()
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    fn loaded(&self) -> Result<&RegionIndex> {
        self.index
            .as_deref()
            .ok_or_else(|| RegionDbError::State("index not loaded; call load_index first".into()))
    }

    /// Ranked results for `query`, at most `limit` of them.
    ///
    /// # Errors
    /// [`RegionDbError::State`] when no index is bound. An unmatched query
    /// is not an error.
    pub fn search(
        &self,
        query: &str,
        limit: usize,
        search_type: SearchType,
    ) -> Result<Vec<SearchResult>> {
        self.run(query, limit, search_type, None)
    }

    /// Like [`search`](Self::search) with the search type given by name.
    pub fn search_str(&self, query: &str, limit: usize, search_type: &str) -> Result<Vec<SearchResult>> {
        self.search(query, limit, search_type.parse()?)
    }

    /// Like [`search`](Self::search), keeping only regions at one of `levels`
    /// (level labels such as `市级`). Unknown labels match nothing.
    pub fn search_in_levels(
        &self,
        query: &str,
        limit: usize,
        search_type: SearchType,
        levels: &[&str],
    ) -> Result<Vec<SearchResult>> {
        let index = self.loaded()?;
        let mask = index
            .levels_mask(levels)
            .unwrap_or_else(|| BitmapIndex::new(index.region_count()));
        self.run(query, limit, search_type, Some(&mask))
    }

    /// Hierarchy context for one region code.
    pub fn full_info(&self, code: &str) -> Result<Option<FullInfo>> {
        Ok(build_full_info(self.loaded()?, code))
    }

    fn run(
        &self,
        query: &str,
        limit: usize,
        search_type: SearchType,
        mask: Option<&BitmapIndex>,
    ) -> Result<Vec<SearchResult>> {
        let index = self.loaded()?;
        let query = text::fold_key(query.trim());
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let mut search_type = match search_type {
            SearchType::Auto => {
                let detected = detect_search_type(&query);
                log::trace!(target: self.log.target(), "query {query:?} classified as {detected}");
                detected
            }
            explicit => explicit,
        };

        let admitted = |code: &str| match mask {
            None => true,
            Some(mask) => index.position(code).is_some_and(|pos| mask.get(pos)),
        };

        if search_type == SearchType::PinyinCombo {
            let hits: Vec<Scored> = combo::search_combo(index, &self.config, &query)
                .into_iter()
                .filter(|hit| admitted(&hit.code))
                .take(limit)
                .collect();
            if !hits.is_empty() {
                return Ok(assemble(index, hits));
            }
            log::trace!(target: self.log.target(), "no combo for {query:?}; searching pinyin");
            search_type = SearchType::Pinyin;
        }

        let candidates =
            strategy::gather_candidates(index, &query, search_type.field_scope(), &self.config);
        let mut scored: Vec<Scored> = candidates
            .iter()
            .filter(|code| admitted(code))
            .filter_map(|code| score::score_candidate(index, &self.config, &query, code))
            .collect();
        score::rank(&mut scored);
        scored.truncate(limit);

        log::debug!(
            target: self.log.target(),
            "search {query:?} ({search_type}): {} candidates, {} returned",
            candidates.len(),
            scored.len()
        );
        Ok(assemble(index, scored))
    }
}

fn assemble(index: &RegionIndex, scored: Vec<Scored>) -> Vec<SearchResult> {
    scored
        .into_iter()
        .filter_map(|hit| {
            let full_info = build_full_info(index, &hit.code)?;
            Some(SearchResult {
                region: full_info.current.clone(),
                full_info,
                score: hit.score,
                match_type: hit.match_type,
            })
        })
        .collect()
}
