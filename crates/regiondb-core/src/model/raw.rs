// crates/regiondb-core/src/model/raw.rs
use serde::{Deserialize, Serialize};

/// Raw region record as produced by the external ETL.
///
/// `code`, `name` and `level` are required; everything else may be missing
/// or empty in the source JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionRaw {
    pub code: String,
    pub name: String,
    pub level: String,
    #[serde(default)]
    pub parent_code: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    #[serde(default)]
    pub full_path: Option<String>,
    #[serde(default)]
    pub pinyin: Option<String>,
    #[serde(default)]
    pub pinyin_short: Option<String>,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub alias: Vec<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

impl RegionRaw {
    /// Minimal record; optional fields are filled with the `with_*` helpers.
    pub fn new(code: impl Into<String>, name: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            level: level.into(),
            ..Self::default()
        }
    }

    pub fn with_parent(mut self, code: impl Into<String>, name: impl Into<String>) -> Self {
        self.parent_code = Some(code.into());
        self.parent_name = Some(name.into());
        self
    }

    pub fn with_pinyin(mut self, pinyin: impl Into<String>, short: impl Into<String>) -> Self {
        self.pinyin = Some(pinyin.into());
        self.pinyin_short = Some(short.into());
        self
    }

    pub fn with_full_path(mut self, path: impl Into<String>) -> Self {
        self.full_path = Some(path.into());
        self
    }
}
