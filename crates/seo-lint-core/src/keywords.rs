//! Keyword coverage and density analysis.
//!
//! [`KeywordAnalyzer`] turns a block of text and a [`KeywordTaxonomy`] into
//! per-keyword density/presence metrics plus a short list of suggestions.
//!
//! Two matching definitions are in play:
//!
//! - **presence** is substring containment on the whole lower-cased text;
//! - **density** is, by default, the percentage of whitespace-delimited
//!   tokens that *contain* the keyword ([`DensityMode::Token`]).
//!
//! Under token density a keyword that spans whitespace (`"郭春林 哲学"`)
//! can be present yet score 0%. [`DensityMode::Occurrence`] counts
//! whole-text occurrences instead and treats multi-word phrases
//! consistently.
//!
//! Analysis never fails: empty or whitespace-only input produces zero
//! densities, no presence, and the full set of suggestions.

use std::fmt;
use std::ops::Range;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::taxonomy::KeywordTaxonomy;
use crate::text::{self, KeywordSet};

/// How the numerator of a keyword density is counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum DensityMode {
    /// Tokens that contain the keyword as a substring.
    #[default]
    Token,
    /// Non-overlapping occurrences of the keyword in the whole text.
    Occurrence,
}

impl DensityMode {
    /// Returns the mode as a kebab-case string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Occurrence => "occurrence",
        }
    }
}

impl fmt::Display for DensityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a density falls relative to the target range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum DensityBand {
    /// Below the minimum.
    Low,
    /// Within `[min, max]`.
    Optimal,
    /// Above the maximum.
    High,
}

/// Thresholds for [`KeywordAnalyzer::analyze_coverage`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CoverageSettings {
    /// Lowest acceptable brand keyword density, in percent.
    pub density_min: f64,
    /// Highest acceptable brand keyword density, in percent.
    pub density_max: f64,
    /// Fewest long-tail keywords that must be present.
    pub long_tail_min: usize,
    /// How densities are counted.
    pub density_mode: DensityMode,
}

impl Default for CoverageSettings {
    fn default() -> Self {
        Self {
            density_min: 1.0,
            density_max: 3.0,
            long_tail_min: 2,
            density_mode: DensityMode::Token,
        }
    }
}

impl CoverageSettings {
    /// Classify a density against `[density_min, density_max]`.
    pub fn band(&self, density: f64) -> DensityBand {
        if density > self.density_max {
            DensityBand::High
        } else if density >= self.density_min {
            DensityBand::Optimal
        } else {
            DensityBand::Low
        }
    }

    /// Reject a density range whose minimum exceeds its maximum.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.density_min > self.density_max {
            return Err(AnalysisError::InvalidRange {
                setting: "coverage.density",
                min: self.density_min.to_string(),
                max: self.density_max.to_string(),
            });
        }
        Ok(())
    }
}

/// Thresholds for [`KeywordAnalyzer::content_suggestions`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContentSettings {
    /// Fewest whitespace-delimited words an article should have.
    pub min_words: usize,
    /// Topical phrases the content is expected to discuss.
    pub topics: Vec<String>,
}

impl Default for ContentSettings {
    fn default() -> Self {
        Self {
            min_words: 1500,
            topics: vec![
                "哲学思维".to_string(),
                "商业智慧".to_string(),
                "人生哲学".to_string(),
            ],
        }
    }
}

/// Density and presence of one keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordMetric {
    /// The keyword as configured (original case).
    pub keyword: String,
    /// Density in percent. Computed whether or not the keyword is present.
    pub density: f64,
    /// Whether the lower-cased text contains the lower-cased keyword.
    pub present: bool,
    /// Density relative to the target range.
    pub band: DensityBand,
}

/// What a [`Suggestion`] is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    /// No primary keyword appears in the text.
    MissingPrimary,
    /// Brand keyword density is below the target range.
    DensityTooLow,
    /// Brand keyword density is above the target range.
    DensityTooHigh,
    /// Too few long-tail keywords appear in the text.
    SparseLongTail,
    /// The text is shorter than the target word count.
    ShortContent,
    /// A topical phrase is not discussed.
    MissingTopic,
}

/// A human-readable improvement suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    /// Stable category for machine consumers.
    pub kind: SuggestionKind,
    /// The keyword or topic the suggestion refers to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    /// Recommendation text.
    pub message: String,
}

impl Suggestion {
    fn missing_primary() -> Self {
        Self {
            kind: SuggestionKind::MissingPrimary,
            subject: None,
            message: "Include at least one primary keyword in the content.".to_string(),
        }
    }

    fn density_too_low(keyword: &str, density: f64, settings: &CoverageSettings) -> Self {
        Self {
            kind: SuggestionKind::DensityTooLow,
            subject: Some(keyword.to_string()),
            message: format!(
                "\"{keyword}\" density is too low ({density:.2}%); raise it to {}-{}%.",
                settings.density_min, settings.density_max,
            ),
        }
    }

    fn density_too_high(keyword: &str, density: f64, settings: &CoverageSettings) -> Self {
        Self {
            kind: SuggestionKind::DensityTooHigh,
            subject: Some(keyword.to_string()),
            message: format!(
                "\"{keyword}\" density is too high ({density:.2}%); lower it to {}-{}%.",
                settings.density_min, settings.density_max,
            ),
        }
    }

    fn sparse_long_tail(present: usize, required: usize) -> Self {
        Self {
            kind: SuggestionKind::SparseLongTail,
            subject: None,
            message: format!(
                "Only {present} long-tail keyword(s) found; add more long-tail keywords \
                 (at least {required}) to widen search coverage."
            ),
        }
    }

    fn short_content(words: usize, min_words: usize) -> Self {
        Self {
            kind: SuggestionKind::ShortContent,
            subject: None,
            message: format!("Content is {words} words; expand the article to {min_words}+ words."),
        }
    }

    fn missing_topic(topic: &str) -> Self {
        Self {
            kind: SuggestionKind::MissingTopic,
            subject: Some(topic.to_string()),
            message: format!("Consider discussing \"{topic}\" in the content."),
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of [`KeywordAnalyzer::analyze_coverage`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CoverageReport {
    /// Metrics for each primary keyword, in taxonomy order.
    pub primary: Vec<KeywordMetric>,
    /// Metrics for each long-tail keyword, in taxonomy order.
    pub long_tail: Vec<KeywordMetric>,
    /// Threshold-rule suggestions, in fixed rule order.
    pub suggestions: Vec<Suggestion>,
}

/// Size of the analyzed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TextStats {
    /// Unicode scalar values in the input.
    pub characters: usize,
    /// Non-empty whitespace-delimited words.
    pub words: usize,
}

/// Keyword analyzer over one block of text.
///
/// Construct once per text, then call any number of operations; nothing
/// is mutated between calls.
#[derive(Debug, Clone)]
pub struct KeywordAnalyzer<'a> {
    content: String,
    spans: Vec<Range<usize>>,
    characters: usize,
    taxonomy: &'a KeywordTaxonomy,
    coverage: CoverageSettings,
    content_settings: ContentSettings,
}

impl<'a> KeywordAnalyzer<'a> {
    /// Prepare `text` for analysis against `taxonomy`, with default settings.
    pub fn new(text: &str, taxonomy: &'a KeywordTaxonomy) -> Self {
        let content = text.to_lowercase();
        let spans = text::token_spans(&content);
        Self {
            content,
            spans,
            characters: text.chars().count(),
            taxonomy,
            coverage: CoverageSettings::default(),
            content_settings: ContentSettings::default(),
        }
    }

    /// Use `settings` for coverage thresholds and density counting.
    #[must_use]
    pub fn with_coverage(mut self, settings: CoverageSettings) -> Self {
        self.coverage = settings;
        self
    }

    /// Use `settings` for content suggestions.
    #[must_use]
    pub fn with_content(mut self, settings: ContentSettings) -> Self {
        self.content_settings = settings;
        self
    }

    /// Token count used as the density denominator (never zero).
    pub const fn word_count(&self) -> usize {
        self.spans.len()
    }

    /// Character and word counts of the input.
    pub fn stats(&self) -> TextStats {
        TextStats {
            characters: self.characters,
            words: text::count_words(&self.content),
        }
    }

    /// Density of `keyword` in percent, using the configured [`DensityMode`].
    pub fn density_of(&self, keyword: &str) -> f64 {
        self.density_with(keyword, self.coverage.density_mode)
    }

    /// Density of `keyword` in percent, counted with `mode`.
    pub fn density_with(&self, keyword: &str, mode: DensityMode) -> f64 {
        let needle = keyword.to_lowercase();
        let hits = match mode {
            DensityMode::Token => self
                .tokens()
                .filter(|token| token.contains(needle.as_str()))
                .count(),
            DensityMode::Occurrence => text::count_occurrences(&self.content, &needle),
        };
        percentage(hits, self.spans.len())
    }

    /// Whether the text contains `keyword`, ignoring case.
    pub fn is_present(&self, keyword: &str) -> bool {
        self.content.contains(&keyword.to_lowercase())
    }

    /// Density and presence of an arbitrary keyword.
    pub fn metric(&self, keyword: &str) -> KeywordMetric {
        self.metric_with_presence(keyword, self.is_present(keyword))
    }

    /// Score every primary and long-tail keyword and derive suggestions.
    ///
    /// Rules, checked in order and independently:
    /// 1. no primary keyword present;
    /// 2. brand density below `density_min`, else above `density_max`;
    /// 3. fewer than `long_tail_min` long-tail keywords present.
    #[tracing::instrument(skip(self), fields(words = self.spans.len(), mode = %self.coverage.density_mode))]
    pub fn analyze_coverage(&self) -> CoverageReport {
        let scanner = KeywordSet::new(
            self.taxonomy
                .primary
                .iter()
                .chain(self.taxonomy.long_tail.iter()),
        );
        let presence = scanner.presence(&self.content);
        let (primary_presence, long_tail_presence) =
            presence.split_at(self.taxonomy.primary.len());

        let primary: Vec<KeywordMetric> = self
            .taxonomy
            .primary
            .iter()
            .zip(primary_presence)
            .map(|(keyword, &present)| self.metric_with_presence(keyword, present))
            .collect();
        let long_tail: Vec<KeywordMetric> = self
            .taxonomy
            .long_tail
            .iter()
            .zip(long_tail_presence)
            .map(|(keyword, &present)| self.metric_with_presence(keyword, present))
            .collect();

        let mut suggestions = Vec::new();

        if !primary.iter().any(|m| m.present) {
            suggestions.push(Suggestion::missing_primary());
        }

        if let Some(brand) = self.taxonomy.brand_keyword() {
            let density = self.density_of(brand);
            if density < self.coverage.density_min {
                suggestions.push(Suggestion::density_too_low(brand, density, &self.coverage));
            } else if density > self.coverage.density_max {
                suggestions.push(Suggestion::density_too_high(brand, density, &self.coverage));
            }
        }

        let long_tail_present = long_tail.iter().filter(|m| m.present).count();
        if long_tail_present < self.coverage.long_tail_min {
            suggestions.push(Suggestion::sparse_long_tail(
                long_tail_present,
                self.coverage.long_tail_min,
            ));
        }

        tracing::debug!(
            primary_present = primary.iter().filter(|m| m.present).count(),
            long_tail_present,
            suggestions = suggestions.len(),
            "coverage analyzed"
        );

        CoverageReport {
            primary,
            long_tail,
            suggestions,
        }
    }

    /// Length and topic suggestions, independent of coverage.
    #[tracing::instrument(skip(self), fields(words = self.spans.len()))]
    pub fn content_suggestions(&self) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        let words = self.word_count();
        if words < self.content_settings.min_words {
            suggestions.push(Suggestion::short_content(
                words,
                self.content_settings.min_words,
            ));
        }

        for topic in &self.content_settings.topics {
            if !self.is_present(topic) {
                suggestions.push(Suggestion::missing_topic(topic));
            }
        }

        suggestions
    }

    fn metric_with_presence(&self, keyword: &str, present: bool) -> KeywordMetric {
        let density = self.density_of(keyword);
        KeywordMetric {
            keyword: keyword.to_string(),
            density,
            present,
            band: self.coverage.band(density),
        }
    }

    fn tokens(&self) -> impl Iterator<Item = &str> + '_ {
        self.spans.iter().map(|span| &self.content[span.clone()])
    }
}

/// `hits` as a percentage of `total`. Multiplies first so whole-number
/// ratios come out exact.
fn percentage(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (hits as f64 * 100.0) / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brand_taxonomy() -> KeywordTaxonomy {
        KeywordTaxonomy {
            brand: None,
            primary: vec!["郭春林".into()],
            long_tail: vec!["郭春林 哲学".into(), "郭春林 商业智慧".into()],
            competitive: Vec::new(),
            local: Vec::new(),
        }
    }

    fn acme_taxonomy() -> KeywordTaxonomy {
        KeywordTaxonomy {
            brand: None,
            primary: vec!["acme".into()],
            long_tail: vec!["acme widgets".into(), "acme tools".into()],
            competitive: Vec::new(),
            local: Vec::new(),
        }
    }

    /// `hits` copies of "acme" followed by filler, `total` tokens in all.
    fn acme_text(hits: usize, total: usize) -> String {
        let mut words = vec!["acme"; hits];
        words.extend(std::iter::repeat_n("filler", total - hits));
        words.join(" ")
    }

    fn kinds(suggestions: &[Suggestion]) -> Vec<SuggestionKind> {
        suggestions.iter().map(|s| s.kind).collect()
    }

    #[test]
    fn brand_sentence_scenario() {
        let taxonomy = brand_taxonomy();
        let report = KeywordAnalyzer::new("郭春林是一位思想者。", &taxonomy).analyze_coverage();

        assert!(report.primary[0].present);
        assert!(report.long_tail.iter().all(|m| !m.present));

        let kinds = kinds(&report.suggestions);
        assert!(!kinds.contains(&SuggestionKind::MissingPrimary));
        assert!(kinds.contains(&SuggestionKind::SparseLongTail));
        // One token, and it contains the brand.
        assert_eq!(report.primary[0].density, 100.0);
        assert!(kinds.contains(&SuggestionKind::DensityTooHigh));
    }

    #[test]
    fn empty_input_is_degenerate_not_an_error() {
        let taxonomy = brand_taxonomy();
        let analyzer = KeywordAnalyzer::new("", &taxonomy);
        assert_eq!(analyzer.word_count(), 1);

        let report = analyzer.analyze_coverage();
        for m in report.primary.iter().chain(&report.long_tail) {
            assert!(!m.present);
            assert_eq!(m.density, 0.0);
            assert_eq!(m.band, DensityBand::Low);
        }
        assert_eq!(
            kinds(&report.suggestions),
            vec![
                SuggestionKind::MissingPrimary,
                SuggestionKind::DensityTooLow,
                SuggestionKind::SparseLongTail,
            ]
        );
    }

    #[test]
    fn whitespace_only_input() {
        let taxonomy = brand_taxonomy();
        let analyzer = KeywordAnalyzer::new("   \n ", &taxonomy);
        assert_eq!(analyzer.density_of("郭春林"), 0.0);
        assert_eq!(analyzer.stats().words, 0);
        assert!(
            kinds(&analyzer.analyze_coverage().suggestions)
                .contains(&SuggestionKind::MissingPrimary)
        );
    }

    #[test]
    fn analysis_is_deterministic() {
        let taxonomy = KeywordTaxonomy::builtin();
        let text = "郭春林 哲学思维 讲座。郭春林 北大 哲学老师 分享 商业智慧";
        let analyzer = KeywordAnalyzer::new(text, &taxonomy);
        assert_eq!(analyzer.analyze_coverage(), analyzer.analyze_coverage());
        assert_eq!(
            KeywordAnalyzer::new(text, &taxonomy).analyze_coverage(),
            analyzer.analyze_coverage()
        );
    }

    #[test]
    fn density_is_full_when_every_token_matches() {
        let taxonomy = acme_taxonomy();
        let analyzer = KeywordAnalyzer::new("acme acme-corp ACME's", &taxonomy);
        assert_eq!(analyzer.density_of("acme"), 100.0);
        assert_eq!(analyzer.density_of("zeta"), 0.0);
    }

    #[test]
    fn token_density_counts_containing_tokens() {
        let taxonomy = brand_taxonomy();
        let analyzer = KeywordAnalyzer::new("郭春林的 课程 很好 郭春林", &taxonomy);
        assert_eq!(analyzer.density_of("郭春林"), 50.0);
    }

    #[test]
    fn presence_is_case_insensitive() {
        let taxonomy = KeywordTaxonomy {
            primary: vec!["Acme Corp".into(), "widgets".into()],
            long_tail: vec!["Acme Corp widgets".into()],
            ..KeywordTaxonomy::empty()
        };
        let text = "Welcome to acme corp, home of Acme Corp Widgets.";
        let lower = KeywordAnalyzer::new(text, &taxonomy).analyze_coverage();
        let upper = KeywordAnalyzer::new(&text.to_uppercase(), &taxonomy).analyze_coverage();

        let flags = |r: &CoverageReport| {
            r.primary
                .iter()
                .chain(&r.long_tail)
                .map(|m| m.present)
                .collect::<Vec<_>>()
        };
        assert_eq!(flags(&lower), vec![true, true, true]);
        assert_eq!(flags(&lower), flags(&upper));
        assert_eq!(lower.primary[0].density, upper.primary[0].density);
    }

    #[test]
    fn literal_keyword_is_present() {
        let taxonomy = acme_taxonomy();
        let analyzer = KeywordAnalyzer::new("we sell acme tools here", &taxonomy);
        assert!(analyzer.is_present("acme tools"));
        assert!(analyzer.is_present("ACME"));
        assert!(!analyzer.is_present("acme widgets"));
    }

    #[test]
    fn multi_word_keyword_present_but_zero_token_density() {
        let taxonomy = brand_taxonomy();
        let analyzer = KeywordAnalyzer::new("郭春林 哲学课", &taxonomy);
        let metric = analyzer.metric("郭春林 哲学");
        assert!(metric.present);
        assert_eq!(metric.density, 0.0);
    }

    #[test]
    fn occurrence_mode_counts_phrases() {
        let taxonomy = brand_taxonomy();
        let analyzer = KeywordAnalyzer::new("郭春林 哲学课", &taxonomy);
        assert_eq!(
            analyzer.density_with("郭春林 哲学", DensityMode::Occurrence),
            50.0
        );

        let settings = CoverageSettings {
            density_mode: DensityMode::Occurrence,
            ..CoverageSettings::default()
        };
        let analyzer = analyzer.with_coverage(settings);
        assert_eq!(analyzer.density_of("郭春林 哲学"), 50.0);
    }

    #[test]
    fn occurrence_mode_counts_repeats_inside_a_token() {
        let taxonomy = brand_taxonomy();
        let analyzer = KeywordAnalyzer::new("郭春林说郭春林 好", &taxonomy);
        assert_eq!(analyzer.density_with("郭春林", DensityMode::Token), 50.0);
        assert_eq!(
            analyzer.density_with("郭春林", DensityMode::Occurrence),
            100.0
        );
    }

    #[test]
    fn exactly_one_percent_is_not_too_low() {
        let taxonomy = acme_taxonomy();
        let text = acme_text(1, 100);
        let report = KeywordAnalyzer::new(&text, &taxonomy).analyze_coverage();
        assert_eq!(report.primary[0].density, 1.0);
        assert_eq!(report.primary[0].band, DensityBand::Optimal);
        assert!(!kinds(&report.suggestions).contains(&SuggestionKind::DensityTooLow));
    }

    #[test]
    fn just_under_one_percent_is_too_low() {
        let taxonomy = acme_taxonomy();
        let text = acme_text(1, 101);
        let report = KeywordAnalyzer::new(&text, &taxonomy).analyze_coverage();
        assert!(report.primary[0].density < 1.0);
        assert!(kinds(&report.suggestions).contains(&SuggestionKind::DensityTooLow));
    }

    #[test]
    fn exactly_three_percent_is_not_too_high() {
        let taxonomy = acme_taxonomy();
        let text = acme_text(3, 100);
        let report = KeywordAnalyzer::new(&text, &taxonomy).analyze_coverage();
        assert_eq!(report.primary[0].density, 3.0);
        let kinds = kinds(&report.suggestions);
        assert!(!kinds.contains(&SuggestionKind::DensityTooHigh));
        assert!(!kinds.contains(&SuggestionKind::DensityTooLow));
    }

    #[test]
    fn above_three_percent_is_too_high() {
        let taxonomy = acme_taxonomy();
        let text = acme_text(31, 1000);
        let report = KeywordAnalyzer::new(&text, &taxonomy).analyze_coverage();
        assert_eq!(report.primary[0].band, DensityBand::High);
        assert!(kinds(&report.suggestions).contains(&SuggestionKind::DensityTooHigh));
    }

    #[test]
    fn long_tail_rule_needs_two_present() {
        let taxonomy = acme_taxonomy();

        let none = KeywordAnalyzer::new("acme", &taxonomy).analyze_coverage();
        assert!(kinds(&none.suggestions).contains(&SuggestionKind::SparseLongTail));

        let one = KeywordAnalyzer::new("acme widgets", &taxonomy).analyze_coverage();
        assert!(kinds(&one.suggestions).contains(&SuggestionKind::SparseLongTail));

        let two = KeywordAnalyzer::new("acme widgets and acme tools", &taxonomy).analyze_coverage();
        assert!(!kinds(&two.suggestions).contains(&SuggestionKind::SparseLongTail));
    }

    #[test]
    fn long_tail_minimum_is_configurable() {
        let taxonomy = acme_taxonomy();
        let settings = CoverageSettings {
            long_tail_min: 1,
            ..CoverageSettings::default()
        };
        let report = KeywordAnalyzer::new("acme widgets", &taxonomy)
            .with_coverage(settings)
            .analyze_coverage();
        assert!(!kinds(&report.suggestions).contains(&SuggestionKind::SparseLongTail));
    }

    #[test]
    fn suggestions_follow_rule_order() {
        let taxonomy = acme_taxonomy();
        let report = KeywordAnalyzer::new("nothing relevant", &taxonomy).analyze_coverage();
        assert_eq!(
            kinds(&report.suggestions),
            vec![
                SuggestionKind::MissingPrimary,
                SuggestionKind::DensityTooLow,
                SuggestionKind::SparseLongTail,
            ]
        );
        assert_eq!(report.suggestions[1].subject.as_deref(), Some("acme"));
    }

    #[test]
    fn no_brand_skips_density_rule() {
        let taxonomy = KeywordTaxonomy {
            long_tail: vec!["acme widgets".into()],
            ..KeywordTaxonomy::empty()
        };
        let report = KeywordAnalyzer::new("acme widgets", &taxonomy).analyze_coverage();
        assert_eq!(
            kinds(&report.suggestions),
            vec![SuggestionKind::MissingPrimary, SuggestionKind::SparseLongTail]
        );
    }

    #[test]
    fn explicit_brand_drives_density_rule() {
        let taxonomy = KeywordTaxonomy {
            brand: Some("widgets".into()),
            ..acme_taxonomy()
        };
        let report = KeywordAnalyzer::new(&acme_text(2, 100), &taxonomy).analyze_coverage();
        let low = report
            .suggestions
            .iter()
            .find(|s| s.kind == SuggestionKind::DensityTooLow)
            .expect("widgets never appears");
        assert_eq!(low.subject.as_deref(), Some("widgets"));
    }

    #[test]
    fn content_suggestions_for_empty_text() {
        let taxonomy = brand_taxonomy();
        let suggestions = KeywordAnalyzer::new("", &taxonomy).content_suggestions();
        assert_eq!(
            kinds(&suggestions),
            vec![
                SuggestionKind::ShortContent,
                SuggestionKind::MissingTopic,
                SuggestionKind::MissingTopic,
                SuggestionKind::MissingTopic,
            ]
        );
        assert_eq!(suggestions[1].subject.as_deref(), Some("哲学思维"));
    }

    #[test]
    fn content_suggestions_clear_when_long_and_on_topic() {
        let taxonomy = brand_taxonomy();
        let mut text = String::from("哲学思维 商业智慧 人生哲学 ");
        text.push_str(&"词 ".repeat(1500));
        let suggestions = KeywordAnalyzer::new(&text, &taxonomy).content_suggestions();
        assert!(suggestions.is_empty(), "{suggestions:?}");
    }

    #[test]
    fn content_settings_override_topics_and_length() {
        let taxonomy = acme_taxonomy();
        let settings = ContentSettings {
            min_words: 3,
            topics: vec!["Pricing".into()],
        };
        let suggestions = KeywordAnalyzer::new("acme pricing explained", &taxonomy)
            .with_content(settings)
            .content_suggestions();
        assert!(suggestions.is_empty());
    }

    #[test]
    fn stats_count_characters_and_words() {
        let taxonomy = brand_taxonomy();
        let stats = KeywordAnalyzer::new(" 郭春林 是 ", &taxonomy).stats();
        assert_eq!(stats.characters, 7);
        assert_eq!(stats.words, 2);
    }

    #[test]
    fn band_boundaries() {
        let s = CoverageSettings::default();
        assert_eq!(s.band(0.99), DensityBand::Low);
        assert_eq!(s.band(1.0), DensityBand::Optimal);
        assert_eq!(s.band(3.0), DensityBand::Optimal);
        assert_eq!(s.band(3.01), DensityBand::High);
    }

    #[test]
    fn inverted_density_range_is_rejected() {
        let s = CoverageSettings {
            density_min: 4.0,
            density_max: 2.0,
            ..CoverageSettings::default()
        };
        let err = s.validate().unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::InvalidRange {
                setting: "coverage.density",
                ..
            }
        ));
        assert!(CoverageSettings::default().validate().is_ok());

        let point = CoverageSettings {
            density_min: 2.0,
            density_max: 2.0,
            ..CoverageSettings::default()
        };
        assert!(point.validate().is_ok());
    }

    #[test]
    fn suggestion_serializes_kind_in_snake_case() {
        let s = Suggestion::sparse_long_tail(0, 2);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["kind"], "sparse_long_tail");
        assert!(json.get("subject").is_none());
    }
}
