// crates/regiondb-core/src/model/result.rs
use super::region::Region;
use serde::Serialize;
use std::fmt;

/// Which comparison produced the strongest signal for a result.
///
/// Purely explanatory: ranking uses the numeric score only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    ExactName,
    PrefixName,
    PartName,
    ExactPinyin,
    PrefixPinyin,
    PartPinyin,
    ExactShort,
    Fuzzy,
    ComboPrimary,
    ComboDistrict,
}

impl MatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            MatchType::ExactName => "exact_name",
            MatchType::PrefixName => "prefix_name",
            MatchType::PartName => "part_name",
            MatchType::ExactPinyin => "exact_pinyin",
            MatchType::PrefixPinyin => "prefix_pinyin",
            MatchType::PartPinyin => "part_pinyin",
            MatchType::ExactShort => "exact_short",
            MatchType::Fuzzy => "fuzzy",
            MatchType::ComboPrimary => "combo_primary",
            MatchType::ComboDistrict => "combo_district",
        }
    }

    /// `true` for the `_primary` combo tag that earns the combo sort bonus.
    pub fn is_primary(self) -> bool {
        self.as_str().ends_with("_primary")
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ancestors bucketed into coarse tiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Hierarchy {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<Region>,
}

impl Hierarchy {
    /// Lookup by tier name: `province`, `city` or `district`.
    pub fn get(&self, tier: &str) -> Option<&Region> {
        match tier {
            "province" => self.province.as_ref(),
            "city" => self.city.as_ref(),
            "district" => self.district.as_ref(),
            _ => None,
        }
    }
}

/// A region together with its hierarchy context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FullInfo {
    pub current: Region,
    pub hierarchy: Hierarchy,
    pub level_rank: u8,
    pub full_path: String,
    /// Ancestor names joined root first, e.g. `广东省 > 佛山市 > 南海区`.
    pub display_path: String,
}

/// One ranked candidate returned by a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub region: Region,
    pub full_info: FullInfo,
    pub score: f64,
    pub match_type: MatchType,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - Score: {:.4}, Match: {} | {}",
            self.region.name,
            self.region.code,
            self.score,
            self.match_type,
            self.full_info.display_path
        )
    }
}
