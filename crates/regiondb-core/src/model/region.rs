// crates/regiondb-core/src/model/region.rs
use super::raw::RegionRaw;
use crate::text;
use serde::{Deserialize, Serialize};

/// Administrative tiers, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegionLevel {
    Province,
    City,
    District,
    Subdistrict,
    Village,
}

impl RegionLevel {
    pub const ALL: [RegionLevel; 5] = [
        RegionLevel::Province,
        RegionLevel::City,
        RegionLevel::District,
        RegionLevel::Subdistrict,
        RegionLevel::Village,
    ];

    /// The level label used by the dataset (`省级`, `市级`, ...).
    pub fn label(self) -> &'static str {
        match self {
            RegionLevel::Province => "省级",
            RegionLevel::City => "市级",
            RegionLevel::District => "区县级",
            RegionLevel::Subdistrict => "街道级",
            RegionLevel::Village => "村级",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.label() == label)
    }

    /// 1 for provinces through 5 for villages.
    pub fn rank(self) -> u8 {
        match self {
            RegionLevel::Province => 1,
            RegionLevel::City => 2,
            RegionLevel::District => 3,
            RegionLevel::Subdistrict => 4,
            RegionLevel::Village => 5,
        }
    }
}

/// Rank of a level label; unknown labels sort last with 99.
pub fn level_rank(level: &str) -> u8 {
    RegionLevel::from_label(level).map_or(99, RegionLevel::rank)
}

/// One administrative division. Immutable once inside an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
    pub level: String,
    pub parent_code: String,
    pub parent_name: String,
    pub full_path: String,
    pub pinyin: String,
    pub pinyin_short: String,
    pub short_name: Option<String>,
    pub alias: Vec<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Region {
    #[inline]
    pub fn level_rank(&self) -> u8 {
        level_rank(&self.level)
    }

    pub fn has_parent(&self) -> bool {
        !self.parent_code.is_empty()
    }
}

impl From<RegionRaw> for Region {
    fn from(raw: RegionRaw) -> Self {
        Region {
            code: raw.code.trim().to_string(),
            name: raw.name,
            level: raw.level,
            parent_code: raw
                .parent_code
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            parent_name: raw.parent_name.unwrap_or_default(),
            full_path: raw.full_path.unwrap_or_default(),
            pinyin: raw.pinyin.unwrap_or_default(),
            pinyin_short: raw.pinyin_short.unwrap_or_default(),
            short_name: raw.short_name,
            alias: raw.alias,
            lat: raw.lat,
            lng: raw.lng,
        }
    }
}

/// Folded comparison keys for one region, computed once at build time.
///
/// Optional pinyin keys are `None` when the region has no romanisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchKeys {
    /// Lowercased name.
    pub name: String,
    /// Name with one administrative suffix removed.
    pub short_name: String,
    /// Folded pinyin with spaces removed.
    pub pinyin: Option<String>,
    /// Cleaned pinyin with a trailing `sheng`/`shi` removed.
    pub pinyin_stem: Option<String>,
    pub pinyin_short: Option<String>,
    /// Lowercased `full_path`, empty when the record has none.
    pub full_path: String,
}

impl SearchKeys {
    pub fn for_region(region: &Region) -> Self {
        let name = text::fold_key(&region.name);
        let short_name = text::strip_admin_suffix(&name).to_string();
        let pinyin = Some(text::clean_pinyin(&region.pinyin)).filter(|p| !p.is_empty());
        let pinyin_stem = pinyin
            .as_deref()
            .map(|p| text::strip_pinyin_suffix(p).to_string());
        let pinyin_short = Some(text::fold_key(region.pinyin_short.trim())).filter(|s| !s.is_empty());
        SearchKeys {
            name,
            short_name,
            pinyin,
            pinyin_stem,
            pinyin_short,
            full_path: text::fold_key(&region.full_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_rank_orders_tiers() {
        assert_eq!(level_rank("省级"), 1);
        assert_eq!(level_rank("市级"), 2);
        assert_eq!(level_rank("区县级"), 3);
        assert_eq!(level_rank("街道级"), 4);
        assert_eq!(level_rank("村级"), 5);
        assert_eq!(level_rank("乡级"), 99);
    }

    #[test]
    fn keys_are_precomputed_from_record() {
        let region: Region = RegionRaw::new("440000", "广东省", "省级")
            .with_pinyin("Guǎng Dōng Shěng", "GD")
            .into();
        let keys = SearchKeys::for_region(&region);
        assert_eq!(keys.name, "广东省");
        assert_eq!(keys.short_name, "广东");
        assert_eq!(keys.pinyin.as_deref(), Some("guangdongsheng"));
        assert_eq!(keys.pinyin_stem.as_deref(), Some("guangdong"));
        assert_eq!(keys.pinyin_short.as_deref(), Some("gd"));
    }

    #[test]
    fn missing_pinyin_yields_no_pinyin_keys() {
        let region: Region = RegionRaw::new("1", "新广东村", "村级").into();
        let keys = SearchKeys::for_region(&region);
        assert!(keys.pinyin.is_none());
        assert!(keys.pinyin_stem.is_none());
        assert!(keys.pinyin_short.is_none());
        assert!(keys.full_path.is_empty());
    }
}
