// crates/regiondb-core/src/search/classify.rs
use super::SearchType;
use crate::text;

/// Full pinyin of province-level divisions, used to spot combo prefixes.
pub const PROVINCE_PINYIN: [&str; 33] = [
    "beijing",
    "shanghai",
    "tianjin",
    "chongqing",
    "hebei",
    "shanxi",
    "liaoning",
    "jilin",
    "heilongjiang",
    "jiangsu",
    "zhejiang",
    "anhui",
    "fujian",
    "jiangxi",
    "shandong",
    "henan",
    "hubei",
    "hunan",
    "guangdong",
    "hainan",
    "sichuan",
    "guizhou",
    "yunnan",
    "gansu",
    "qinghai",
    "taiwan",
    "hongkong",
    "macao",
    "xinjiang",
    "ningxia",
    "guangxi",
    "neimenggu",
    "xizang",
];

/// Two-letter province abbreviations.
pub const PROVINCE_SHORTS: [&str; 34] = [
    "bj", "sh", "tj", "cq", "he", "sx", "ln", "jl", "hl", "js", "zj", "ah", "fj", "jx", "sd",
    "ha", "hb", "hn", "gd", "hi", "sc", "gz", "yn", "sn", "gs", "qh", "nx", "xj", "tw", "hk",
    "mo", "gx", "nm", "xz",
];

const PATH_CHARS: [char; 3] = ['-', '_', text::PATH_SEPARATOR];

/// Picks a concrete search type for an `auto` query.
///
/// Checks run in a fixed order and the first hit wins:
///
/// 1. any CJK ideograph: `mixed` when Latin letters are also present, else `name`
/// 2. letters only: `short` up to two letters, then `pinyin_combo` when a
///    province prefix is recognised, then the pinyin-shape heuristic decides
///    between `pinyin` and `short` for 3-4 letters; longer tokens are `pinyin`
/// 3. space-separated letters: `pinyin`
/// 4. any of `-`, `_`, `>`: `path`
/// 5. otherwise `name`
///
/// # Examples
/// ```rust
/// use regiondb_core::search::{detect_search_type, SearchType};
///
/// assert_eq!(detect_search_type("bj"), SearchType::Short);
/// assert_eq!(detect_search_type("广东"), SearchType::Name);
/// assert_eq!(detect_search_type("gdfs"), SearchType::PinyinCombo);
/// ```
pub fn detect_search_type(query: &str) -> SearchType {
    let query = query.trim();
    if query.is_empty() {
        return SearchType::Name;
    }
    let lower = query.to_lowercase();

    if text::contains_cjk(&lower) {
        return if lower.chars().any(|c| c.is_ascii_alphabetic()) {
            SearchType::Mixed
        } else {
            SearchType::Name
        };
    }

    if text::is_ascii_alpha(&lower) {
        if lower.len() <= 2 {
            return SearchType::Short;
        }
        if could_be_combo(&lower) {
            return SearchType::PinyinCombo;
        }
        if lower.len() <= 4 && !looks_like_pinyin(&lower) {
            return SearchType::Short;
        }
        return SearchType::Pinyin;
    }

    if lower.contains(' ') && text::is_ascii_alpha(&text::strip_spaces(&lower)) {
        return SearchType::Pinyin;
    }
    if lower.contains(PATH_CHARS) {
        return SearchType::Path;
    }
    SearchType::Name
}

/// At least one vowel and never more than two consonants in a row.
pub fn looks_like_pinyin(s: &str) -> bool {
    let is_vowel = |c: char| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u');
    if !s.chars().any(is_vowel) {
        return false;
    }
    let mut streak = 0;
    for c in s.chars() {
        if is_vowel(c) {
            streak = 0;
        } else {
            streak += 1;
            if streak > 2 {
                return false;
            }
        }
    }
    true
}

/// `true` when the token starts like a province (full pinyin, or its first
/// four letters) or, for 4-6 letter tokens, with a province abbreviation at
/// split 2 or 3.
pub fn could_be_combo(s: &str) -> bool {
    let province_prefix = PROVINCE_PINYIN.iter().any(|p| {
        s.starts_with(p) || (p.len() >= 4 && s.starts_with(&p[..4]))
    });
    if province_prefix {
        return true;
    }
    (4..=6).contains(&s.len())
        && [2, 3]
            .iter()
            .any(|&split| split < s.len() && PROVINCE_SHORTS.contains(&&s[..split]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_script_queries() {
        assert_eq!(detect_search_type("广东"), SearchType::Name);
        assert_eq!(detect_search_type("广东fs"), SearchType::Mixed);
    }

    #[test]
    fn letter_queries() {
        assert_eq!(detect_search_type("bj"), SearchType::Short);
        assert_eq!(detect_search_type("BJ"), SearchType::Short);
        assert_eq!(detect_search_type("gdfs"), SearchType::PinyinCombo);
        assert_eq!(detect_search_type("guangdon"), SearchType::PinyinCombo);
        assert_eq!(detect_search_type("foshan"), SearchType::Pinyin);
        assert_eq!(detect_search_type("shenzhen"), SearchType::Pinyin);
        assert_eq!(detect_search_type("wxyz"), SearchType::Short);
        assert_eq!(detect_search_type("fo shan"), SearchType::Pinyin);
    }

    #[test]
    fn separators_mean_path() {
        assert_eq!(detect_search_type("广东>佛山"), SearchType::Name);
        assert_eq!(detect_search_type("44-06"), SearchType::Path);
        assert_eq!(detect_search_type("440600"), SearchType::Name);
    }

    #[test]
    fn pinyin_shape() {
        assert!(looks_like_pinyin("foshan"));
        assert!(looks_like_pinyin("nanhai"));
        assert!(!looks_like_pinyin("bcdfg"));
        assert!(!looks_like_pinyin("gdfs"));
        assert!(!looks_like_pinyin("tsch"));
    }

    #[test]
    fn combo_prefixes() {
        assert!(could_be_combo("gdfs"));
        assert!(could_be_combo("gdfos"));
        assert!(could_be_combo("guangdongfoshan"));
        assert!(could_be_combo("guan"));
        assert!(!could_be_combo("foshan"));
        assert!(!could_be_combo("gd"));
    }
}
