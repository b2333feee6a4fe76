// crates/regiondb-core/src/config.rs
use crate::model::RegionLevel;

// -----------------------------------------------------------------------------
// STORAGE
// -----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    Zlib,
    None,
}

impl Default for CompressionMode {
    fn default() -> Self {
        #[cfg(feature = "compact")]
        {
            CompressionMode::Zlib
        }
        #[cfg(not(feature = "compact"))]
        {
            CompressionMode::None
        }
    }
}

// -----------------------------------------------------------------------------
// SEARCH
// -----------------------------------------------------------------------------

/// Tuning knobs for candidate gathering and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Maximum Levenshtein distance accepted by the fuzzy fallback.
    pub max_edit_distance: usize,
    /// The fuzzy scan only runs while fewer candidates than this were found.
    pub fuzzy_trigger: usize,
    pub boost_exact_match: f64,
    pub boost_prefix_match: f64,
    /// Multiplier per level label, applied after all additive terms.
    pub level_weights: Vec<(String, f64)>,
    pub default_level_weight: f64,
    pub pinyin_similarity_weight: f64,
    pub combo_score: f64,
    pub combo_district_factor: f64,
    pub combo_primary_bonus: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_edit_distance: 2,
            fuzzy_trigger: 20,
            boost_exact_match: 2.0,
            boost_prefix_match: 1.5,
            level_weights: vec![
                (RegionLevel::Province.label().to_string(), 1.0),
                (RegionLevel::City.label().to_string(), 0.8),
                (RegionLevel::District.label().to_string(), 0.6),
            ],
            default_level_weight: 0.5,
            pinyin_similarity_weight: 0.3,
            combo_score: 2.0,
            combo_district_factor: 0.7,
            combo_primary_bonus: 0.3,
        }
    }
}

impl SearchConfig {
    pub fn level_weight(&self, level: &str) -> f64 {
        self.level_weights
            .iter()
            .find(|(l, _)| l == level)
            .map_or(self.default_level_weight, |(_, w)| *w)
    }

    pub fn with_max_edit_distance(mut self, distance: usize) -> Self {
        self.max_edit_distance = distance;
        self
    }

    pub fn with_fuzzy_trigger(mut self, trigger: usize) -> Self {
        self.fuzzy_trigger = trigger;
        self
    }
}
