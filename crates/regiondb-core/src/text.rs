// crates/regiondb-core/src/text.rs
//! Text normalisation shared by the builder and the search engine.
//!
//! Both sides must fold text identically, otherwise index keys and query
//! keys drift apart. Everything here is pure and allocation-light.

use once_cell::sync::Lazy;
use regex::Regex;

/// Administrative suffixes stripped to derive a region's short name.
///
/// Checked in order; only the first matching suffix is removed.
pub const ADMIN_SUFFIXES: [&str; 7] = ["省", "市", "区", "县", "自治州", "自治区", "特别行政区"];

/// Romanised suffixes stripped from cleaned pinyin ("guangdongsheng" -> "guangdong").
pub const PINYIN_SUFFIXES: [&str; 2] = ["sheng", "shi"];

/// Separator used inside `full_path` strings produced by the ETL.
pub const PATH_SEPARATOR: char = '>';

/// Separator used when rendering a display path from an ancestor chain.
pub const DISPLAY_SEPARATOR: &str = " > ";

static SCRIPT_RUNS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\u{3007}\u{3400}-\u{4dbf}\u{4e00}-\u{9fff}\u{f900}-\u{faff}\u{20000}-\u{2fa1f}\u{30000}-\u{3134f}]+|[a-z]+",
    )
    .expect("static regex")
});

/// Returns `true` for Han ideographs: the unified block, its extensions
/// (A through G), the compatibility blocks and the ideographic zero `〇`.
#[inline]
pub fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3007}'
            | '\u{3400}'..='\u{4dbf}'
            | '\u{4e00}'..='\u{9fff}'
            | '\u{f900}'..='\u{faff}'
            | '\u{20000}'..='\u{2fa1f}'
            | '\u{30000}'..='\u{3134f}'
    )
}

/// Returns `true` if the text contains at least one CJK ideograph.
pub fn contains_cjk(s: &str) -> bool {
    s.chars().any(is_cjk)
}

/// Convert a string into the folded key used for indexing and querying.
///
/// This performs:
/// 1\) Lowercasing
/// 2\) Transliteration of non-CJK, non-ASCII characters to ASCII via
///    `deunicode` (tone-marked pinyin `guǎng` -> `guang`, full-width `ＧＤ` -> `gd`)
///
/// CJK ideographs are kept verbatim: `deunicode` would romanise them, and
/// native-script names must stay native-script keys.
///
/// # Examples
///
/// ```rust
/// use regiondb_core::text::fold_key;
///
/// assert_eq!(fold_key("Guǎng Dōng"), "guang dong");
/// assert_eq!(fold_key("广东省"), "广东省");
/// ```
pub fn fold_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii() || is_cjk(c) {
            out.push(c);
        } else if let Some(t) = deunicode::deunicode_char(c) {
            out.push_str(t);
        } else {
            out.push(c);
        }
    }
    out.to_lowercase()
}

/// Removes every ASCII space.
pub fn strip_spaces(s: &str) -> String {
    s.chars().filter(|c| *c != ' ').collect()
}

/// Folded pinyin with spaces removed, as stored in the pinyin trie and n-grams.
pub fn clean_pinyin(s: &str) -> String {
    strip_spaces(&fold_key(s))
}

/// Strips the first matching administrative suffix from a folded name.
///
/// Returns the input unchanged when no suffix matches or when stripping would
/// leave nothing behind.
pub fn strip_admin_suffix(name: &str) -> &str {
    strip_first_suffix(name, &ADMIN_SUFFIXES)
}

/// Strips a trailing `sheng`/`shi` from cleaned pinyin.
pub fn strip_pinyin_suffix(pinyin: &str) -> &str {
    strip_first_suffix(pinyin, &PINYIN_SUFFIXES)
}

fn strip_first_suffix<'a>(s: &'a str, suffixes: &[&str]) -> &'a str {
    for suffix in suffixes {
        if let Some(stem) = s.strip_suffix(suffix) {
            if stem.is_empty() {
                return s;
            }
            return stem;
        }
    }
    s
}

/// All contiguous character windows of length `n`.
///
/// Text shorter than `n` yields nothing.
pub fn char_ngrams(s: &str, n: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    if n == 0 || chars.len() < n {
        return Vec::new();
    }
    chars.windows(n).map(|w| w.iter().collect()).collect()
}

/// Keeps at most `n` leading characters.
pub fn take_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((byte, _)) => &s[..byte],
        None => s,
    }
}

/// Character offset of the first occurrence of `needle` in `haystack`.
pub fn char_find(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .find(needle)
        .map(|byte| haystack[..byte].chars().count())
}

/// Maximal runs of CJK ideographs or lowercase ASCII letters.
///
/// Used to award partial credit when pieces of a mixed query ("广东fs")
/// appear in a region's full path.
pub fn script_runs(s: &str) -> impl Iterator<Item = &str> {
    SCRIPT_RUNS.find_iter(s).map(|m| m.as_str())
}

/// `true` when the text is non-empty and made only of ASCII letters.
pub fn is_ascii_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fold_keeps_cjk_and_lowercases_latin() {
        assert_eq!(fold_key("北京 BeiJing"), "北京 beijing");
        assert_eq!(fold_key("Xī'ān"), "xi'an");
    }

    #[test]
    fn fold_keeps_every_ideograph_block() {
        // Ext A, Ext B, a compatibility ideograph and the ideographic zero
        for name in ["㟃镇", "\u{20087}村", "\u{f900}山", "〇村"] {
            assert_eq!(fold_key(name), name);
            assert!(name.chars().all(is_cjk));
        }
        assert!(!is_cjk('a'));
        assert!(!is_cjk('、'));
    }

    #[test]
    fn admin_suffix_is_stripped_once() {
        assert_eq!(strip_admin_suffix("广东省"), "广东");
        assert_eq!(strip_admin_suffix("广西壮族自治区"), "广西壮族自治");
        assert_eq!(strip_admin_suffix("香港特别行政区"), "香港特别行政");
        assert_eq!(strip_admin_suffix("市"), "市");
        assert_eq!(strip_admin_suffix("新广东村"), "新广东村");
    }

    #[test]
    fn pinyin_suffix_is_stripped() {
        assert_eq!(strip_pinyin_suffix("guangdongsheng"), "guangdong");
        assert_eq!(strip_pinyin_suffix("foshanshi"), "foshan");
        assert_eq!(strip_pinyin_suffix("nanhaiqu"), "nanhaiqu");
    }

    #[test]
    fn ngrams_are_char_based() {
        assert_eq!(char_ngrams("广东省", 2), vec!["广东", "东省"]);
        assert_eq!(char_ngrams("广东省", 3), vec!["广东省"]);
        assert!(char_ngrams("广", 2).is_empty());
    }

    #[test]
    fn char_helpers_respect_multibyte_text() {
        assert_eq!(take_chars("广东省佛山", 3), "广东省");
        assert_eq!(take_chars("ab", 5), "ab");
        assert_eq!(char_find("新广东村", "广东"), Some(1));
        assert_eq!(char_find("新广东村", "北京"), None);
    }

    #[test]
    fn script_runs_split_mixed_queries() {
        let runs: Vec<&str> = script_runs("广东fs 佛山").collect();
        assert_eq!(runs, vec!["广东", "fs", "佛山"]);
    }
}
