// crates/regiondb-core/src/search/combo.rs

//! Province + city abbreviation queries such as `gdfs` (广东 + 佛山).
//!
//! Only the 2 + 2 split of a four-letter query is parsed. Each valid pair
//! yields the city as `combo_primary` and every direct child of the city as
//! `combo_district`.

use super::score::Scored;
use crate::config::SearchConfig;
use crate::index::RegionIndex;
use crate::model::{MatchType, Region, RegionLevel};
use crate::traits::RegionLookup;
use std::collections::HashSet;

/// A province/city pair whose abbreviations matched and whose parent link holds.
#[derive(Debug, Clone, Copy)]
pub struct ComboMatch<'a> {
    pub province: &'a Region,
    pub city: &'a Region,
}

/// Every valid province/city pair for a folded query.
pub fn parse_combo<'a>(index: &'a RegionIndex, query: &str) -> Vec<ComboMatch<'a>> {
    if query.len() != 4 || !query.is_ascii() {
        return Vec::new();
    }
    let (province_short, city_short) = query.split_at(2);
    let provinces = find_by_short(index, province_short, RegionLevel::Province);
    let cities = find_by_short(index, city_short, RegionLevel::City);

    provinces
        .iter()
        .flat_map(|&province| {
            cities
                .iter()
                .filter(move |city| city.parent_code == province.code)
                .map(move |&city| ComboMatch { province, city })
        })
        .collect()
}

/// Regions at `level` whose `pinyin_short` is exactly `short`.
pub fn find_by_short<'a>(index: &'a RegionIndex, short: &str, level: RegionLevel) -> Vec<&'a Region> {
    index
        .short_inverted
        .get(short)
        .into_iter()
        .flatten()
        .filter(|code| {
            index
                .keys(code)
                .is_some_and(|k| k.pinyin_short.as_deref() == Some(short))
        })
        .filter_map(|code| index.region(code))
        .filter(|region| region.level == level.label())
        .collect()
}

/// Ranked combo hits, deduplicated by code. Empty when nothing parses.
///
/// Scores are not capped: a combo hit is stronger than any text match.
pub fn search_combo(index: &RegionIndex, config: &SearchConfig, query: &str) -> Vec<Scored> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut push = |region: &Region, score: f64, match_type: MatchType| {
        if seen.insert(region.code.clone()) {
            out.push(Scored {
                code: region.code.clone(),
                score,
                raw: score,
                level_rank: region.level_rank(),
                match_type,
            });
        }
    };

    for combo in parse_combo(index, query) {
        push(combo.city, config.combo_score, MatchType::ComboPrimary);
        for district in index.children(&combo.city.code) {
            push(
                district,
                config.combo_score * config.combo_district_factor,
                MatchType::ComboDistrict,
            );
        }
    }

    let sort_key = |s: &Scored| {
        if s.match_type.is_primary() {
            s.score + config.combo_primary_bonus
        } else {
            s.score
        }
    };
    out.sort_by(|a, b| sort_key(b).total_cmp(&sort_key(a)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::builder::IndexBuilder;
    use crate::model::RegionRaw;

    fn index() -> RegionIndex {
        IndexBuilder::new(vec![
            RegionRaw::new("440000", "广东省", "省级").with_pinyin("guang dong sheng", "gd"),
            RegionRaw::new("440600", "佛山市", "市级")
                .with_parent("440000", "广东省")
                .with_pinyin("fo shan shi", "fs"),
            RegionRaw::new("440604", "禅城区", "区县级")
                .with_parent("440600", "佛山市")
                .with_pinyin("chan cheng qu", "cc"),
            RegionRaw::new("440605", "南海区", "区县级")
                .with_parent("440600", "佛山市")
                .with_pinyin("nan hai qu", "nh"),
            // same abbreviation, wrong province
            RegionRaw::new("350000", "福建省", "省级").with_pinyin("fu jian sheng", "fj"),
            RegionRaw::new("350500", "抚顺市", "市级")
                .with_parent("210000", "辽宁省")
                .with_pinyin("fu shun shi", "fs"),
        ])
        .build_all_indices()
    }

    #[test]
    fn parses_only_linked_pairs() {
        let idx = index();
        let combos = parse_combo(&idx, "gdfs");
        assert_eq!(combos.len(), 1);
        assert_eq!(combos[0].province.code, "440000");
        assert_eq!(combos[0].city.code, "440600");
        assert!(parse_combo(&idx, "fjfs").is_empty());
        assert!(parse_combo(&idx, "gdf").is_empty());
    }

    #[test]
    fn city_leads_its_districts() {
        let idx = index();
        let hits = search_combo(&idx, &SearchConfig::default(), "gdfs");
        let codes: Vec<&str> = hits.iter().map(|h| h.code.as_str()).collect();
        assert_eq!(codes, ["440600", "440604", "440605"]);
        assert_eq!(hits[0].match_type, MatchType::ComboPrimary);
        assert_eq!(hits[0].score, 2.0);
        for district in &hits[1..] {
            assert_eq!(district.match_type, MatchType::ComboDistrict);
            assert!(district.score < hits[0].score);
        }
    }

    #[test]
    fn unknown_pair_yields_nothing() {
        assert!(search_combo(&index(), &SearchConfig::default(), "zzzz").is_empty());
    }
}
