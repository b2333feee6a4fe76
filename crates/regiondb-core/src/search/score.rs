// crates/regiondb-core/src/search/score.rs

//! # Scoring
//!
//! A candidate's score is the sum of
//!
//! * a base match score over the name family (name, suffix-stripped name) and
//!   the pinyin family (clean pinyin, `sheng`/`shi`-stripped stem, pinyin short),
//! * a positional bonus decaying with the match offset,
//! * a full-path bonus,
//! * a pinyin similarity ratio for alphabetic queries,
//!
//! multiplied by the level weight and capped at 1.0. The uncapped value is
//! kept as a tie-breaker.

use crate::config::SearchConfig;
use crate::index::RegionIndex;
use crate::model::{MatchType, Region, SearchKeys};
use crate::text;
use std::cmp::Ordering;

/// Name-family weights for substring matches.
const NAME_CONTAINS: f64 = 0.5;
const NAME_CONTAINED: f64 = 0.4;
/// Pinyin-family weights, scaled down from the name family.
const PINYIN_EXACT_FACTOR: f64 = 0.8;
const PINYIN_PREFIX_FACTOR: f64 = 0.6;
const PINYIN_CONTAINS: f64 = 0.4;
const PINYIN_CONTAINED: f64 = 0.3;
const SHORT_EXACT: f64 = 1.0;
const SHORT_PREFIX: f64 = 0.8;
const PATH_FULL: f64 = 0.5;
const PATH_PART: f64 = 0.2;

/// A scored candidate before result assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored {
    pub code: String,
    pub score: f64,
    /// Score before the 1.0 cap.
    pub raw: f64,
    pub level_rank: u8,
    pub match_type: MatchType,
}

pub fn score_candidate(
    index: &RegionIndex,
    config: &SearchConfig,
    query: &str,
    code: &str,
) -> Option<Scored> {
    let region = index.code_to_region.get(code)?;
    let keys = index.keys(code)?;
    let raw = calculate_score(region, keys, query, config);
    Some(Scored {
        code: region.code.clone(),
        score: raw.min(1.0),
        raw,
        level_rank: region.level_rank(),
        match_type: match_type(keys, query),
    })
}

/// Uncapped score of one region against a folded query.
pub fn calculate_score(region: &Region, keys: &SearchKeys, query: &str, config: &SearchConfig) -> f64 {
    let mut score = basic_match_score(keys, query, config);
    score += position_score(&keys.name, query);
    score += path_score(&keys.full_path, query);

    if text::is_ascii_alpha(query) {
        if let Some(pinyin) = &keys.pinyin {
            score += strsim::normalized_levenshtein(query, pinyin) * config.pinyin_similarity_weight;
        }
    }

    score * config.level_weight(&region.level)
}

fn tiered(query: &str, full: &str, stem: &str, weights: [f64; 4]) -> f64 {
    let stem = if stem.is_empty() { full } else { stem };
    if query == full || query == stem {
        weights[0]
    } else if full.starts_with(query) || stem.starts_with(query) {
        weights[1]
    } else if full.contains(query) || stem.contains(query) {
        weights[2]
    } else if within(full, query) || within(stem, query) {
        weights[3]
    } else {
        0.0
    }
}

/// Non-empty `inner` occurring inside `outer`.
fn within(inner: &str, outer: &str) -> bool {
    !inner.is_empty() && outer.contains(inner)
}

pub fn basic_match_score(keys: &SearchKeys, query: &str, config: &SearchConfig) -> f64 {
    let mut score = tiered(
        query,
        &keys.name,
        &keys.short_name,
        [
            config.boost_exact_match,
            config.boost_prefix_match,
            NAME_CONTAINS,
            NAME_CONTAINED,
        ],
    );

    if let Some(pinyin) = keys.pinyin.as_deref() {
        score += tiered(
            query,
            pinyin,
            keys.pinyin_stem.as_deref().unwrap_or(pinyin),
            [
                config.boost_exact_match * PINYIN_EXACT_FACTOR,
                config.boost_prefix_match * PINYIN_PREFIX_FACTOR,
                PINYIN_CONTAINS,
                PINYIN_CONTAINED,
            ],
        );
    }

    if let Some(short) = &keys.pinyin_short {
        if query == short {
            score += SHORT_EXACT;
        } else if short.starts_with(query) {
            score += SHORT_PREFIX;
        }
    }
    score
}

/// `1 - offset/len`, measured in characters, for the query inside the name or
/// failing that the name inside the query.
pub fn position_score(name: &str, query: &str) -> f64 {
    let ratio = |pos: usize, len: usize| (1.0 - pos as f64 / len as f64).max(0.0);
    if let Some(pos) = text::char_find(name, query) {
        return ratio(pos, name.chars().count());
    }
    if name.is_empty() {
        return 0.0;
    }
    match text::char_find(query, name) {
        Some(pos) => ratio(pos, query.chars().count()),
        None => 0.0,
    }
}

/// Deeper paths earn more when the whole query appears in them; otherwise
/// each CJK or Latin run of the query found in the path earns a flat bonus.
pub fn path_score(full_path: &str, query: &str) -> f64 {
    if full_path.is_empty() {
        return 0.0;
    }
    let joined: String = full_path
        .chars()
        .filter(|c| *c != text::PATH_SEPARATOR)
        .collect();
    if full_path.contains(query) || joined.contains(query) {
        let depth = full_path.split(text::PATH_SEPARATOR).count() as f64;
        return PATH_FULL * depth / 3.0;
    }
    let parts = text::script_runs(query)
        .filter(|part| full_path.contains(part))
        .count();
    PATH_PART * parts as f64
}

/// Strongest exact/prefix/part tier, name family first.
pub fn match_type(keys: &SearchKeys, query: &str) -> MatchType {
    let name = keys.name.as_str();
    let short = keys.short_name.as_str();
    if query == name || query == short {
        return MatchType::ExactName;
    }
    if name.starts_with(query) || short.starts_with(query) {
        return MatchType::PrefixName;
    }
    if within(name, query) || within(short, query) {
        return MatchType::PartName;
    }

    if let Some(pinyin) = keys.pinyin.as_deref() {
        let stem = keys.pinyin_stem.as_deref().unwrap_or(pinyin);
        if query == pinyin || query == stem {
            return MatchType::ExactPinyin;
        }
        if pinyin.starts_with(query) || stem.starts_with(query) {
            return MatchType::PrefixPinyin;
        }
        if within(pinyin, query) || within(stem, query) {
            return MatchType::PartPinyin;
        }
    }

    if keys.pinyin_short.as_deref() == Some(query) {
        return MatchType::ExactShort;
    }
    MatchType::Fuzzy
}

/// Score descending, then coarser level, then uncapped score, then code.
pub fn compare(a: &Scored, b: &Scored) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(a.level_rank.cmp(&b.level_rank))
        .then(b.raw.total_cmp(&a.raw))
        .then_with(|| a.code.cmp(&b.code))
}

pub fn rank(results: &mut [Scored]) {
    results.sort_by(compare);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegionRaw;

    fn keyed(raw: RegionRaw) -> (Region, SearchKeys) {
        let region = Region::from(raw);
        let keys = SearchKeys::for_region(&region);
        (region, keys)
    }

    #[test]
    fn exact_name_beats_substring() {
        let cfg = SearchConfig::default();
        let (a, ka) = keyed(RegionRaw::new("1", "广东", "省级").with_pinyin("guang dong", "gd"));
        let (b, kb) = keyed(RegionRaw::new("2", "新广东村", "村级"));
        let exact = calculate_score(&a, &ka, "广东", &cfg);
        let part = calculate_score(&b, &kb, "广东", &cfg);
        assert!(exact > part);
        assert!((part - (0.5 + 0.75) * 0.5).abs() < 1e-9);
    }

    #[test]
    fn suffix_stripped_forms_count_as_exact() {
        let cfg = SearchConfig::default();
        let (_, keys) = keyed(RegionRaw::new("440000", "广东省", "省级").with_pinyin("guang dong sheng", "gd"));
        assert_eq!(basic_match_score(&keys, "广东", &cfg), 2.0);
        assert!((basic_match_score(&keys, "guangdong", &cfg) - 1.6).abs() < 1e-9);
        // "gd" is also a substring of "guangdongsheng"
        assert!((basic_match_score(&keys, "gd", &cfg) - 1.4).abs() < 1e-9);
        assert_eq!(match_type(&keys, "广东"), MatchType::ExactName);
        assert_eq!(match_type(&keys, "guangdong"), MatchType::ExactPinyin);
        assert_eq!(match_type(&keys, "guang"), MatchType::PrefixPinyin);
        assert_eq!(match_type(&keys, "gd"), MatchType::ExactShort);
        assert_eq!(match_type(&keys, "广东省佛山"), MatchType::PartName);
        assert_eq!(match_type(&keys, "xyz"), MatchType::Fuzzy);
    }

    #[test]
    fn position_decays_with_offset() {
        assert_eq!(position_score("广东省", "广东"), 1.0);
        assert!((position_score("新广东村", "广东") - 0.75).abs() < 1e-9);
        assert!((position_score("南海区", "佛山南海区") - 0.6).abs() < 1e-9);
        assert_eq!(position_score("南海区", "北京"), 0.0);
    }

    #[test]
    fn path_rewards_depth_and_parts() {
        assert!((path_score("广东省>佛山市>南海区", "佛山市") - 0.5).abs() < 1e-9);
        assert!((path_score("广东省>佛山市", "省佛山") - 0.5 * 2.0 / 3.0).abs() < 1e-9);
        assert!((path_score("广东省>佛山市", "广东xx") - 0.2).abs() < 1e-9);
        assert_eq!(path_score("", "广东"), 0.0);
    }

    #[test]
    fn ranking_breaks_ties_by_level_then_raw() {
        let entry = |code: &str, score: f64, raw: f64, level_rank: u8| Scored {
            code: code.into(),
            score,
            raw,
            level_rank,
            match_type: MatchType::Fuzzy,
        };
        let mut results = vec![
            entry("c", 1.0, 1.2, 2),
            entry("a", 0.9, 0.9, 1),
            entry("b", 1.0, 2.4, 2),
            entry("d", 1.0, 1.1, 1),
        ];
        rank(&mut results);
        let order: Vec<&str> = results.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(order, ["d", "b", "c", "a"]);
    }
}
