// crates/regiondb-core/src/common.rs
use serde::{Deserialize, Serialize};

/// Build metadata for an index.
///
/// Informational only: nothing in the search path reads these numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub regions: usize,
    pub name_terms: usize,
    pub pinyin_terms: usize,
    pub short_terms: usize,
    pub ngram_terms: usize,
    pub bitmap_indices: usize,
    pub build_millis: u64,
}

/// Log target handed to the builder, storage and engine.
///
/// Components never touch a process-wide logger configuration; they only tag
/// their records with this target so embedding applications can route them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    target: String,
}

impl LogContext {
    pub const DEFAULT_TARGET: &'static str = "regiondb";

    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
        }
    }

    /// A child context, e.g. `regiondb::storage`.
    pub fn child(&self, name: &str) -> Self {
        Self::new(format!("{}::{name}", self.target))
    }

    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }
}

impl Default for LogContext {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TARGET)
    }
}
