// crates/regiondb-core/src/search/strategy.rs

//! Candidate gathering.
//!
//! Four strategies feed one code set. Exact, prefix and n-gram lookups always
//! run; the fuzzy scan is O(regions) and only runs while the set is still
//! smaller than [`SearchConfig::fuzzy_trigger`].

use super::FieldScope;
use crate::config::SearchConfig;
use crate::index::{RegionIndex, TermIndex};
use crate::text;
use std::collections::BTreeSet;

pub type CandidateSet = BTreeSet<String>;

/// Union of every strategy for a folded, non-empty query.
pub fn gather_candidates(
    index: &RegionIndex,
    query: &str,
    scope: FieldScope,
    config: &SearchConfig,
) -> CandidateSet {
    let mut candidates = exact_search(index, query, scope);
    candidates.extend(prefix_search(index, query, scope));
    candidates.extend(ngram_search(index, query, scope));
    if candidates.len() < config.fuzzy_trigger {
        candidates.extend(fuzzy_search(index, query, scope, config.max_edit_distance));
    }
    candidates
}

fn extend_from(out: &mut CandidateSet, terms: &TermIndex, key: &str) {
    if let Some(codes) = terms.get(key) {
        out.extend(codes.iter().cloned());
    }
}

pub fn exact_search(index: &RegionIndex, query: &str, scope: FieldScope) -> CandidateSet {
    let mut out = CandidateSet::new();

    if scope.covers_name() {
        extend_from(&mut out, &index.name_inverted, query);
        // whole names are inverted keys too, but a scan keeps this independent of tokenisation
        out.extend(
            index
                .iter_keyed()
                .filter(|(_, keys)| keys.name == query)
                .map(|(region, _)| region.code.clone()),
        );
    }

    if scope.covers_pinyin() {
        extend_from(&mut out, &index.pinyin_inverted, query);
        out.extend(
            index
                .iter_keyed()
                .filter(|(_, keys)| keys.pinyin.as_deref() == Some(query))
                .map(|(region, _)| region.code.clone()),
        );
    }

    if scope.covers_short() {
        extend_from(&mut out, &index.short_inverted, query);
    }
    out
}

pub fn prefix_search(index: &RegionIndex, query: &str, scope: FieldScope) -> CandidateSet {
    let mut out = CandidateSet::new();
    if scope.covers_name() {
        out.extend(index.name_trie.collect_prefix(query));
    }
    if scope.covers_pinyin() {
        out.extend(index.pinyin_trie.collect_prefix(query));
    }
    if scope.covers_short() {
        out.extend(index.short_trie.collect_prefix(query));
    }
    out
}

pub fn ngram_search(index: &RegionIndex, query: &str, scope: FieldScope) -> CandidateSet {
    let grams: BTreeSet<String> = [2, 3]
        .into_iter()
        .flat_map(|n| text::char_ngrams(query, n))
        .collect();

    let mut out = CandidateSet::new();
    for gram in &grams {
        if scope.covers_name() {
            extend_from(&mut out, &index.name_ngrams, gram);
        }
        if scope.covers_pinyin() {
            extend_from(&mut out, &index.pinyin_ngrams, gram);
        }
    }
    out
}

/// Levenshtein scan over names and pinyin, each truncated to
/// `len(query) + max_distance` characters before comparing.
pub fn fuzzy_search(
    index: &RegionIndex,
    query: &str,
    scope: FieldScope,
    max_distance: usize,
) -> CandidateSet {
    let window = query.chars().count() + max_distance;
    let within = |candidate: &str| {
        strsim::levenshtein(query, text::take_chars(candidate, window)) <= max_distance
    };

    index
        .iter_keyed()
        .filter(|(_, keys)| {
            (scope.covers_name() && within(keys.name.as_str()))
                || (scope.covers_pinyin() && keys.pinyin.as_deref().is_some_and(within))
        })
        .map(|(region, _)| region.code.clone())
        .collect()
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
            RegionRaw::new("440605", "南海区", "区县级")
                .with_parent("440600", "佛山市")
                .with_pinyin("nan hai qu", "nh"),
        ])
        .build_all_indices()
    }

    fn codes(set: &CandidateSet) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn exact_respects_scope() {
        let idx = index();
        assert_eq!(codes(&exact_search(&idx, "佛山市", FieldScope::Name)), ["440600"]);
        assert_eq!(codes(&exact_search(&idx, "foshanshi", FieldScope::Pinyin)), ["440600"]);
        assert!(exact_search(&idx, "foshanshi", FieldScope::Name).is_empty());
        assert_eq!(codes(&exact_search(&idx, "nh", FieldScope::Short)), ["440605"]);
    }

    #[test]
    fn prefix_walks_tries() {
        let idx = index();
        assert_eq!(codes(&prefix_search(&idx, "guang", FieldScope::All)), ["440000"]);
        assert_eq!(codes(&prefix_search(&idx, "南", FieldScope::Name)), ["440605"]);
        assert!(prefix_search(&idx, "南", FieldScope::Pinyin).is_empty());
    }

    #[test]
    fn ngrams_match_substrings() {
        let idx = index();
        assert_eq!(codes(&ngram_search(&idx, "山市", FieldScope::Name)), ["440600"]);
        assert_eq!(codes(&ngram_search(&idx, "aiqu", FieldScope::Pinyin)), ["440605"]);
    }

    #[test]
    fn fuzzy_tolerates_typos() {
        let idx = index();
        let hits = fuzzy_search(&idx, "foshamshi", FieldScope::Pinyin, 2);
        assert!(hits.contains("440600"));
        assert!(fuzzy_search(&idx, "xxxxxx", FieldScope::All, 2).is_empty());
    }

    #[test]
    fn gather_unions_everything() {
        let idx = index();
        let all = gather_candidates(&idx, "guangdon", FieldScope::All, &SearchConfig::default());
        assert!(all.contains("440000"));
    }
}
