//! Page checklist: on-page SEO checks over a markdown document.
//!
//! Each [`ChecklistItem`] is a pure predicate over a parsed
//! [`PageDocument`]. The report scores the page as the percentage of items
//! that pass and lists what to fix, high-priority items first in the
//! issue list.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::document::PageDocument;
use crate::error::{AnalysisError, AnalysisResult};
use crate::keywords::{CoverageSettings, DensityMode, KeywordAnalyzer};
use crate::taxonomy::KeywordTaxonomy;
use crate::text;

/// Area of SEO a checklist item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Titles, descriptions, structured data.
    Technical,
    /// Body text quality and linking.
    Content,
    /// Keyword placement in headings and alt text.
    Keywords,
    /// Outbound links to owned channels.
    Links,
    /// Social presence.
    Social,
}

/// How much a checklist item matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Must fix.
    High,
    /// Should fix.
    Medium,
    /// Nice to have.
    Low,
}

/// Thresholds for the page checklist.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChecklistSettings {
    /// Other spellings of the brand accepted in titles and headings.
    pub brand_aliases: Vec<String>,
    /// Shortest acceptable meta description, in characters.
    pub description_min: usize,
    /// Longest acceptable meta description, in characters.
    pub description_max: usize,
    /// Page text must be longer than this many characters.
    pub min_content_chars: usize,
    /// Fewest site-relative links a page should carry.
    pub min_internal_links: usize,
    /// Lowest passing score (0-100) for the `checklist` gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,
}

impl Default for ChecklistSettings {
    fn default() -> Self {
        Self {
            brand_aliases: vec!["Guo Chunlin".to_string()],
            description_min: 150,
            description_max: 160,
            min_content_chars: 2000,
            min_internal_links: 3,
            min_score: None,
        }
    }
}

impl ChecklistSettings {
    /// Reject a description length range whose minimum exceeds its maximum.
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.description_min > self.description_max {
            return Err(AnalysisError::InvalidRange {
                setting: "checklist.description",
                min: self.description_min.to_string(),
                max: self.description_max.to_string(),
            });
        }
        Ok(())
    }
}

/// Everything a checker needs besides the page itself.
#[derive(Debug, Clone)]
pub struct ChecklistContext<'a> {
    /// Taxonomy whose brand keyword the page is checked for.
    pub taxonomy: &'a KeywordTaxonomy,
    /// Density range for the brand density check.
    pub coverage: &'a CoverageSettings,
    /// Checklist thresholds.
    pub settings: &'a ChecklistSettings,
}

impl ChecklistContext<'_> {
    fn brand(&self) -> Option<&str> {
        self.taxonomy.brand_keyword()
    }

    fn mentions_brand(&self, text: &str) -> bool {
        self.brand().is_some_and(|brand| {
            text::contains_any_ignore_case(text, brand, &self.settings.brand_aliases)
        })
    }
}

type Checker = fn(&PageDocument, &ChecklistContext<'_>) -> bool;

/// One checklist entry.
pub struct ChecklistItem {
    /// Stable identifier.
    pub id: &'static str,
    /// Area the item belongs to.
    pub category: Category,
    /// Short title.
    pub title: &'static str,
    /// What the item verifies.
    pub description: &'static str,
    /// Importance.
    pub priority: Priority,
    /// What to do when the item fails.
    pub recommendation: &'static str,
    check: Checker,
}

impl ChecklistItem {
    /// Run this item against a page.
    pub fn passes(&self, page: &PageDocument, ctx: &ChecklistContext<'_>) -> bool {
        (self.check)(page, ctx)
    }
}

/// The checklist, in report order.
pub const CHECKLIST: &[ChecklistItem] = &[
    ChecklistItem {
        id: "meta_title_brand",
        category: Category::Technical,
        title: "Page title contains the brand",
        description: "The page title (frontmatter title or first H1) includes the brand keyword.",
        priority: Priority::High,
        recommendation: "Put the brand keyword in the page title.",
        check: title_has_brand,
    },
    ChecklistItem {
        id: "meta_description_optimized",
        category: Category::Technical,
        title: "Meta description length",
        description: "The frontmatter description is within the target character range.",
        priority: Priority::High,
        recommendation: "Write a frontmatter description within the target length.",
        check: description_length_ok,
    },
    ChecklistItem {
        id: "structured_data_person",
        category: Category::Technical,
        title: "Person structured data",
        description: "A JSON-LD block declares a Person whose name is the brand.",
        priority: Priority::High,
        recommendation: "Add a JSON-LD Person block naming the brand.",
        check: has_person_schema,
    },
    ChecklistItem {
        id: "keyword_density_brand",
        category: Category::Content,
        title: "Brand keyword density",
        description: "Brand keyword density over the page text is within the target range.",
        priority: Priority::High,
        recommendation: "Adjust how often the brand keyword appears to reach the target density.",
        check: brand_density_ok,
    },
    ChecklistItem {
        id: "content_quality",
        category: Category::Content,
        title: "Substantial content",
        description: "Page text is longer than the minimum character count.",
        priority: Priority::High,
        recommendation: "Publish longer, in-depth content.",
        check: content_long_enough,
    },
    ChecklistItem {
        id: "internal_linking",
        category: Category::Content,
        title: "Internal linking",
        description: "The page links to enough other pages on the site.",
        priority: Priority::Medium,
        recommendation: "Link related posts to each other.",
        check: enough_internal_links,
    },
    ChecklistItem {
        id: "h1_tag_optimization",
        category: Category::Keywords,
        title: "Single H1 with the brand",
        description: "The page has exactly one H1 and it includes the brand keyword.",
        priority: Priority::High,
        recommendation: "Use exactly one H1 heading and include the brand keyword in it.",
        check: single_h1_with_brand,
    },
    ChecklistItem {
        id: "alt_text_optimization",
        category: Category::Keywords,
        title: "Image alt text",
        description: "Every image has descriptive alt text.",
        priority: Priority::Medium,
        recommendation: "Give every image descriptive alt text that uses relevant keywords.",
        check: images_have_alt,
    },
    ChecklistItem {
        id: "youtube_integration",
        category: Category::Links,
        title: "YouTube channel link",
        description: "The page links to the YouTube channel.",
        priority: Priority::High,
        recommendation: "Link the page to the YouTube channel.",
        check: links_youtube,
    },
];

/// Outcome of a single checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistResult {
    /// Item identifier.
    pub id: String,
    /// Item category.
    pub category: Category,
    /// Item title.
    pub title: String,
    /// Item priority.
    pub priority: Priority,
    /// Whether the page passed.
    pub passed: bool,
}

/// Result of running the whole checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChecklistReport {
    /// Percentage of items passed, rounded (0-100).
    pub score: u8,
    /// Number of items passed.
    pub passed: usize,
    /// Number of items run.
    pub total: usize,
    /// Per-item outcomes, in checklist order.
    pub results: Vec<ChecklistResult>,
    /// Ids of failed high-priority items.
    pub high_priority_issues: Vec<String>,
    /// Recommendations for failed items, in checklist order.
    pub recommendations: Vec<String>,
    /// Minimum score applied (if any).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,
    /// Whether the score is below the minimum.
    pub below_min: bool,
}

/// Run the checklist over a markdown page.
///
/// Fails only if the page's frontmatter is malformed.
#[tracing::instrument(skip_all, fields(text_len = input.len()))]
pub fn run_checklist(input: &str, ctx: &ChecklistContext<'_>) -> AnalysisResult<ChecklistReport> {
    let page = PageDocument::parse(input)?;
    Ok(check_page(&page, ctx))
}

/// Run the checklist over an already parsed page.
pub fn check_page(page: &PageDocument, ctx: &ChecklistContext<'_>) -> ChecklistReport {
    let mut results = Vec::with_capacity(CHECKLIST.len());
    let mut high_priority_issues = Vec::new();
    let mut recommendations = Vec::new();

    for item in CHECKLIST {
        let passed = item.passes(page, ctx);
        tracing::trace!(id = item.id, passed, "checklist item");
        if !passed {
            if item.priority == Priority::High {
                high_priority_issues.push(item.id.to_string());
            }
            recommendations.push(item.recommendation.to_string());
        }
        results.push(ChecklistResult {
            id: item.id.to_string(),
            category: item.category,
            title: item.title.to_string(),
            priority: item.priority,
            passed,
        });
    }

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    let score = score(passed, total);
    let min_score = ctx.settings.min_score;
    let below_min = min_score.is_some_and(|min| score < min);

    tracing::debug!(score, passed, total, "checklist complete");

    ChecklistReport {
        score,
        passed,
        total,
        results,
        high_priority_issues,
        recommendations,
        min_score,
        below_min,
    }
}

fn score(passed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (passed as f64 * 100.0 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

fn title_has_brand(page: &PageDocument, ctx: &ChecklistContext<'_>) -> bool {
    page.title().is_some_and(|title| ctx.mentions_brand(title))
}

fn description_length_ok(page: &PageDocument, ctx: &ChecklistContext<'_>) -> bool {
    page.frontmatter.description.as_deref().is_some_and(|d| {
        let len = d.trim().chars().count();
        (ctx.settings.description_min..=ctx.settings.description_max).contains(&len)
    })
}

fn has_person_schema(page: &PageDocument, ctx: &ChecklistContext<'_>) -> bool {
    let Some(brand) = ctx.brand() else {
        return false;
    };
    page.json_ld.iter().any(|node| {
        node.get("@type").and_then(serde_json::Value::as_str) == Some("Person")
            && node.get("name").and_then(serde_json::Value::as_str) == Some(brand)
    })
}

/// Brand density always counts every occurrence: CJK prose rarely has
/// spaces, so one token often holds the brand several times.
fn brand_density_ok(page: &PageDocument, ctx: &ChecklistContext<'_>) -> bool {
    let Some(brand) = ctx.brand() else {
        return false;
    };
    let analyzer = KeywordAnalyzer::new(&page.text, ctx.taxonomy);
    let density = analyzer.density_with(brand, DensityMode::Occurrence);
    density >= ctx.coverage.density_min && density <= ctx.coverage.density_max
}

fn content_long_enough(page: &PageDocument, ctx: &ChecklistContext<'_>) -> bool {
    page.text.trim().chars().count() > ctx.settings.min_content_chars
}

fn enough_internal_links(page: &PageDocument, ctx: &ChecklistContext<'_>) -> bool {
    page.internal_link_count() >= ctx.settings.min_internal_links
}

fn single_h1_with_brand(page: &PageDocument, ctx: &ChecklistContext<'_>) -> bool {
    let h1s: Vec<&str> = page.h1s().collect();
    h1s.len() == 1 && ctx.mentions_brand(h1s[0])
}

fn images_have_alt(page: &PageDocument, _ctx: &ChecklistContext<'_>) -> bool {
    page.image_alts.iter().all(|alt| !alt.trim().is_empty())
}

fn links_youtube(page: &PageDocument, _ctx: &ChecklistContext<'_>) -> bool {
    page.links
        .iter()
        .any(|href| href.contains("youtube.com") || href.contains("youtu.be"))
}
