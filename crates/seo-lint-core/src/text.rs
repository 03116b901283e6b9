//! Text processing utilities.
//!
//! Provides whitespace tokenization, occurrence counting, and a
//! multi-keyword presence scanner for use by the analyzer and the
//! document checklist.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use aho_corasick::AhoCorasick;
use regex::Regex;

/// Regex for runs of (Unicode) whitespace.
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Byte ranges of the whitespace-delimited tokens in `text`.
///
/// Splits on runs of whitespace without dropping empty pieces: an empty
/// text yields one empty token, and leading or trailing whitespace yields
/// an empty token at that end. The result is never empty, so it is always
/// safe to divide by its length.
pub fn token_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut start = 0;

    for sep in WHITESPACE_RUN.find_iter(text) {
        spans.push(start..sep.start());
        start = sep.end();
    }
    spans.push(start..text.len());

    spans
}

/// Count words, ignoring the empty tokens produced by edge whitespace.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Count non-overlapping occurrences of `needle` in `haystack`.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Whether `text` contains `needle` or any of `aliases`, ignoring case.
pub fn contains_any_ignore_case(text: &str, needle: &str, aliases: &[String]) -> bool {
    let text = text.to_lowercase();
    std::iter::once(needle)
        .chain(aliases.iter().map(String::as_str))
        .filter(|k| !k.trim().is_empty())
        .any(|k| text.contains(&k.to_lowercase()))
}

/// A fixed set of lower-cased keywords scanned in a single pass.
///
/// Duplicates are collapsed internally; results are reported per input
/// keyword, in input order.
pub struct KeywordSet {
    unique: Vec<String>,
    slots: Vec<usize>,
    automaton: Option<AhoCorasick>,
}

impl KeywordSet {
    /// Build a scanner for `keywords` (lower-cased on the way in).
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut slots = Vec::new();

        for keyword in keywords {
            let lowered = keyword.as_ref().to_lowercase();
            let slot = *index.entry(lowered.clone()).or_insert_with(|| {
                unique.push(lowered);
                unique.len() - 1
            });
            slots.push(slot);
        }

        let automaton = match AhoCorasick::new(&unique) {
            Ok(ac) => Some(ac),
            Err(e) => {
                tracing::warn!(error = %e, "keyword automaton unavailable, scanning keywords one by one");
                None
            }
        };

        Self {
            unique,
            slots,
            automaton,
        }
    }

    /// Report, per keyword, whether it occurs in `haystack`.
    ///
    /// `haystack` must already be lower-cased.
    #[tracing::instrument(skip_all, fields(keywords = self.slots.len(), text_len = haystack.len()))]
    pub fn presence(&self, haystack: &str) -> Vec<bool> {
        let mut found = vec![false; self.unique.len()];

        match self.automaton {
            Some(ref ac) => {
                for m in ac.find_overlapping_iter(haystack) {
                    found[m.pattern().as_usize()] = true;
                }
            }
            None => {
                for (slot, keyword) in self.unique.iter().enumerate() {
                    found[slot] = haystack.contains(keyword.as_str());
                }
            }
        }

        self.slots.iter().map(|&slot| found[slot]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_tokens(text: &str) -> Vec<&str> {
        token_spans(text)
            .into_iter()
            .map(|span| &text[span])
            .collect()
    }

    #[test]
    fn empty_text_is_one_empty_token() {
        assert_eq!(split_tokens(""), vec![""]);
    }

    #[test]
    fn edge_whitespace_yields_empty_tokens() {
        assert_eq!(split_tokens("  alpha beta "), vec!["", "alpha", "beta", ""]);
        assert_eq!(split_tokens("   "), vec!["", ""]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(split_tokens("a \t\n b"), vec!["a", "b"]);
    }

    #[test]
    fn ideographic_space_separates_tokens() {
        assert_eq!(split_tokens("哲学\u{3000}思维"), vec!["哲学", "思维"]);
    }

    #[test]
    fn count_words_skips_empty_tokens() {
        assert_eq!(count_words("  one two  three "), 3);
        assert_eq!(count_words(""), 0);
    }

    #[test]
    fn occurrences_are_non_overlapping() {
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("郭春林说郭春林", "郭春林"), 2);
        assert_eq!(count_occurrences("abc", "z"), 0);
    }

    #[test]
    fn keyword_set_reports_overlapping_keywords() {
        let set = KeywordSet::new(["郭春林", "郭春林 哲学", "北大"]);
        let found = set.presence("郭春林 哲学课");
        assert_eq!(found, vec![true, true, false]);
    }

    #[test]
    fn keyword_set_lowercases_patterns() {
        let set = KeywordSet::new(["YouTube"]);
        assert_eq!(set.presence("watch on youtube"), vec![true]);
    }

    #[test]
    fn keyword_set_handles_duplicates() {
        let set = KeywordSet::new(["seo", "content", "seo"]);
        assert_eq!(set.presence("seo basics"), vec![true, false, true]);
    }

    #[test]
    fn contains_any_checks_aliases() {
        let aliases = vec!["Guo Chunlin".to_string()];
        assert!(contains_any_ignore_case("About GUO CHUNLIN", "郭春林", &aliases));
        assert!(contains_any_ignore_case("关于郭春林", "郭春林", &aliases));
        assert!(!contains_any_ignore_case("About us", "郭春林", &aliases));
    }
}
