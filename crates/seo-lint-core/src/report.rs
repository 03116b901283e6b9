//! Keyword reports: the analyzer run end to end over one input.

use std::borrow::Cow;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document;
use crate::error::{AnalysisError, AnalysisResult};
use crate::keywords::{
    ContentSettings, CoverageReport, CoverageSettings, DensityMode, KeywordAnalyzer,
    KeywordMetric, Suggestion, TextStats,
};
use crate::taxonomy::KeywordTaxonomy;

/// Full keyword analysis of one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordReport {
    /// Size of the analyzed text (after markdown stripping, if any).
    pub stats: TextStats,
    /// How densities were counted.
    pub density_mode: DensityMode,
    /// Metric for the brand keyword, if the taxonomy has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<KeywordMetric>,
    /// Primary and long-tail metrics plus coverage suggestions.
    pub coverage: CoverageReport,
    /// Length and topic suggestions.
    pub content_suggestions: Vec<Suggestion>,
    /// Competitive keywords (informational, not scored).
    pub competitive: Vec<KeywordMetric>,
    /// Local keywords (informational, not scored).
    pub local: Vec<KeywordMetric>,
}

impl KeywordReport {
    /// Coverage suggestions followed by content suggestions.
    pub fn suggestions(&self) -> impl Iterator<Item = &Suggestion> {
        self.coverage
            .suggestions
            .iter()
            .chain(self.content_suggestions.iter())
    }

    /// Total number of suggestions.
    pub fn suggestion_count(&self) -> usize {
        self.coverage.suggestions.len() + self.content_suggestions.len()
    }
}

/// Analyze `input` against `taxonomy`.
///
/// With `strip_markdown`, the input is reduced to its visible text first.
#[tracing::instrument(skip_all, fields(input_len = input.len(), strip_markdown = strip_markdown, mode = %coverage.density_mode))]
pub fn analyze_keywords(
    input: &str,
    strip_markdown: bool,
    taxonomy: &KeywordTaxonomy,
    coverage: &CoverageSettings,
    content: &ContentSettings,
) -> KeywordReport {
    let text = prepare(input, strip_markdown);
    let analyzer = KeywordAnalyzer::new(&text, taxonomy)
        .with_coverage(coverage.clone())
        .with_content(content.clone());

    let report = KeywordReport {
        stats: analyzer.stats(),
        density_mode: coverage.density_mode,
        brand: taxonomy.brand_keyword().map(|brand| analyzer.metric(brand)),
        coverage: analyzer.analyze_coverage(),
        content_suggestions: analyzer.content_suggestions(),
        competitive: taxonomy
            .competitive
            .iter()
            .map(|k| analyzer.metric(k))
            .collect(),
        local: taxonomy.local.iter().map(|k| analyzer.metric(k)).collect(),
    };

    tracing::debug!(
        words = report.stats.words,
        suggestions = report.suggestion_count(),
        "keyword analysis complete"
    );
    report
}

/// Density and presence of arbitrary keywords in `input`.
///
/// Fails if any keyword is empty or whitespace-only; an empty needle would
/// match every token.
#[tracing::instrument(skip_all, fields(input_len = input.len(), keywords = keywords.len()))]
pub fn keyword_densities<S: AsRef<str>>(
    input: &str,
    strip_markdown: bool,
    keywords: &[S],
    coverage: &CoverageSettings,
) -> AnalysisResult<Vec<KeywordMetric>> {
    if let Some(index) = keywords.iter().position(|k| k.as_ref().trim().is_empty()) {
        return Err(AnalysisError::BlankKeyword { position: index + 1 });
    }

    let text = prepare(input, strip_markdown);
    let taxonomy = KeywordTaxonomy::empty();
    let analyzer = KeywordAnalyzer::new(&text, &taxonomy).with_coverage(coverage.clone());
    Ok(keywords
        .iter()
        .map(|k| analyzer.metric(k.as_ref()))
        .collect())
}

fn prepare(input: &str, strip_markdown: bool) -> Cow<'_, str> {
    if strip_markdown {
        Cow::Owned(document::strip_to_text(input))
    } else {
        Cow::Borrowed(input)
    }
}
