//! Markdown page inspection.
//!
//! Uses pulldown-cmark to turn a markdown page into the pieces the keyword
//! analyzer and the page checklist look at: visible text, headings, links,
//! images, YAML frontmatter, and embedded JSON-LD blocks.

use std::sync::LazyLock;

use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Regex for `<script type="application/ld+json">` bodies in raw HTML.
static JSON_LD_SCRIPT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

/// First line of a YAML mapping entry (`key:` or `key: value`).
static YAML_KEY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_-]*\s*:(\s|$)").expect("valid regex")
});

/// Fence languages treated as JSON-LD.
const JSON_LD_FENCES: &[&str] = &["json-ld", "jsonld"];

/// Page metadata from YAML frontmatter. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Page title (what a `<title>` tag would carry).
    pub title: Option<String>,
    /// Meta description.
    pub description: Option<String>,
}

/// A parsed markdown page.
#[derive(Debug, Clone, Default)]
pub struct PageDocument {
    /// Frontmatter fields, if the page has any.
    pub frontmatter: Frontmatter,
    /// `(level, text)` for every heading, in document order.
    pub headings: Vec<(u8, String)>,
    /// Link destinations, in document order.
    pub links: Vec<String>,
    /// Alt text of every image, in document order (may be empty).
    pub image_alts: Vec<String>,
    /// Visible text: headings, paragraphs, list items, link text. Code,
    /// raw HTML, and image alt text are excluded.
    pub text: String,
    /// Parsed JSON-LD objects (top-level arrays are flattened).
    pub json_ld: Vec<serde_json::Value>,
}

impl PageDocument {
    /// Parse a markdown page.
    ///
    /// Fails only when the page opens with a frontmatter block that is
    /// meant as YAML but does not parse.
    #[tracing::instrument(skip_all, fields(input_len = input.len()))]
    pub fn parse(input: &str) -> AnalysisResult<Self> {
        let (frontmatter, body) = match classify_frontmatter(input) {
            FrontmatterBlock::Yaml { yaml, body } => {
                let fields = if yaml.trim().is_empty() {
                    Frontmatter::default()
                } else {
                    serde_yaml::from_str(yaml)
                        .map_err(|e| AnalysisError::Frontmatter(e.to_string()))?
                };
                (fields, body)
            }
            FrontmatterBlock::Malformed { error, .. } => {
                return Err(AnalysisError::Frontmatter(error));
            }
            FrontmatterBlock::Absent => (Frontmatter::default(), input),
        };

        let mut page = walk(body);
        page.frontmatter = frontmatter;

        tracing::debug!(
            headings = page.headings.len(),
            links = page.links.len(),
            images = page.image_alts.len(),
            json_ld = page.json_ld.len(),
            "page parsed"
        );
        Ok(page)
    }

    /// Text of every level-1 heading.
    pub fn h1s(&self) -> impl Iterator<Item = &str> {
        self.headings
            .iter()
            .filter(|(level, _)| *level == 1)
            .map(|(_, text)| text.as_str())
    }

    /// Page title: frontmatter `title`, else the first H1.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .title
            .as_deref()
            .or_else(|| self.h1s().next())
    }

    /// Number of site-relative links (destinations starting with `/`).
    pub fn internal_link_count(&self) -> usize {
        self.links
            .iter()
            .filter(|href| href.starts_with('/') && !href.starts_with("//"))
            .count()
    }
}

/// Reduce a markdown page to its visible text.
///
/// Frontmatter and code are dropped; headings are kept since titles carry
/// keywords.
#[tracing::instrument(skip_all, fields(input_len = input.len()))]
pub fn strip_to_text(input: &str) -> String {
    let body = match classify_frontmatter(input) {
        FrontmatterBlock::Yaml { body, .. } | FrontmatterBlock::Malformed { body, .. } => body,
        FrontmatterBlock::Absent => input,
    };
    walk(body).text
}

fn walk(body: &str) -> PageDocument {
    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(body, options);

    let mut page = PageDocument {
        text: String::with_capacity(body.len()),
        ..PageDocument::default()
    };
    let mut heading: Option<(u8, String)> = None;
    let mut image_alt: Option<String> = None;
    let mut code_depth: usize = 0;
    let mut json_fence: Option<String> = None;
    let mut html = String::new();

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                code_depth += 1;
                if let CodeBlockKind::Fenced(lang) = kind
                    && JSON_LD_FENCES.contains(&lang.trim().to_ascii_lowercase().as_str())
                {
                    json_fence = Some(String::new());
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                code_depth = code_depth.saturating_sub(1);
                if let Some(src) = json_fence.take() {
                    push_json_ld(&mut page.json_ld, &src);
                }
            }
            Event::Text(t) if code_depth > 0 => {
                if let Some(ref mut src) = json_fence {
                    src.push_str(&t);
                }
            }

            Event::Start(Tag::Heading { level, .. }) => {
                heading = Some((level as u8, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((level, text)) = heading.take() {
                    page.headings.push((level, text.trim().to_string()));
                }
                page.text.push(' ');
            }

            Event::Start(Tag::Link { dest_url, .. }) => {
                page.links.push(dest_url.to_string());
            }

            Event::Start(Tag::Image { .. }) => {
                image_alt = Some(String::new());
            }
            Event::End(TagEnd::Image) => {
                if let Some(alt) = image_alt.take() {
                    page.image_alts.push(alt);
                }
            }

            Event::Text(t) => {
                if let Some(ref mut alt) = image_alt {
                    alt.push_str(&t);
                    continue;
                }
                if let Some((_, ref mut text)) = heading {
                    text.push_str(&t);
                }
                page.text.push_str(&t);
            }
            Event::Code(t) => {
                if let Some((_, ref mut text)) = heading {
                    text.push_str(&t);
                }
            }
            Event::Html(t) | Event::InlineHtml(t) => {
                html.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak => {
                page.text.push(' ');
            }
            Event::End(TagEnd::Paragraph | TagEnd::Item | TagEnd::TableCell) => {
                page.text.push(' ');
            }

            _ => {}
        }
    }

    for script in JSON_LD_SCRIPT.captures_iter(&html) {
        push_json_ld(&mut page.json_ld, &script[1]);
    }

    page
}

/// Parse one JSON-LD block; malformed blocks are skipped.
fn push_json_ld(out: &mut Vec<serde_json::Value>, src: &str) {
    match serde_json::from_str::<serde_json::Value>(src.trim()) {
        Ok(serde_json::Value::Array(items)) => out.extend(items),
        Ok(value) => out.push(value),
        Err(e) => tracing::warn!(error = %e, "skipping malformed JSON-LD block"),
    }
}

/// How a page's opening `---` block, if any, is read.
enum FrontmatterBlock<'a> {
    /// No block: the whole input is body.
    Absent,
    /// A YAML mapping (or an empty block) followed by the body.
    Yaml { yaml: &'a str, body: &'a str },
    /// A block written as YAML that fails to parse.
    Malformed { error: String, body: &'a str },
}

/// Decide whether the input opens with YAML frontmatter.
///
/// The block must open and close with lines that are exactly `---`, and
/// hold a YAML mapping. Anything else delimited the same way, such as
/// prose between two thematic breaks, stays in the body.
fn classify_frontmatter(input: &str) -> FrontmatterBlock<'_> {
    let Some((yaml, body)) = split_frontmatter(input) else {
        return FrontmatterBlock::Absent;
    };
    if yaml.trim().is_empty() {
        return FrontmatterBlock::Yaml { yaml, body };
    }
    match serde_yaml::from_str::<serde_yaml::Value>(yaml) {
        Ok(serde_yaml::Value::Mapping(_)) => FrontmatterBlock::Yaml { yaml, body },
        Ok(_) => FrontmatterBlock::Absent,
        Err(e) if starts_with_key(yaml) => FrontmatterBlock::Malformed {
            error: e.to_string(),
            body,
        },
        Err(_) => FrontmatterBlock::Absent,
    }
}

/// Whether the first meaningful line of `yaml` looks like `key: ...`.
fn starts_with_key(yaml: &str) -> bool {
    yaml.lines()
        .map(str::trim_end)
        .find(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .is_some_and(|line| YAML_KEY_LINE.is_match(line))
}

/// Split a block delimited by `---` lines off the start of `text`.
fn split_frontmatter(text: &str) -> Option<(&str, &str)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split_inclusive('\n');
    let opening = lines.next()?;
    if opening.trim_end() != "---" {
        return None;
    }

    let start = opening.len();
    let mut pos = start;
    for line in lines {
        if line.trim_end() == "---" {
            return Some((&text[start..pos], &text[pos + line.len()..]));
        }
        pos += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"---
title: 郭春林 | 哲学的花园导游
description: A short description.
tags: [philosophy]
---

# 郭春林的哲学课

Read the [about page](/about) and [posts](/posts) or watch on
[YouTube](https://www.youtube.com/@example).

![Portrait of the author](/img/portrait.jpg)
![](/img/banner.jpg)

```rust
let hidden = true;
```

## Second heading with `code`
"#;

    #[test]
    fn parses_frontmatter() {
        let page = PageDocument::parse(PAGE).unwrap();
        assert_eq!(
            page.frontmatter.title.as_deref(),
            Some("郭春林 | 哲学的花园导游")
        );
        assert_eq!(
            page.frontmatter.description.as_deref(),
            Some("A short description.")
        );
    }

    #[test]
    fn collects_headings_links_and_images() {
        let page = PageDocument::parse(PAGE).unwrap();
        assert_eq!(page.headings.len(), 2);
        assert_eq!(page.headings[0], (1, "郭春林的哲学课".to_string()));
        assert_eq!(page.headings[1], (2, "Second heading with code".to_string()));

        assert_eq!(page.links.len(), 3);
        assert_eq!(page.internal_link_count(), 2);

        assert_eq!(page.image_alts.len(), 2);
        assert_eq!(page.image_alts[0], "Portrait of the author");
        assert!(page.image_alts[1].is_empty());
    }

    #[test]
    fn text_keeps_headings_drops_code_and_alt() {
        let page = PageDocument::parse(PAGE).unwrap();
        assert!(page.text.contains("郭春林的哲学课"));
        assert!(page.text.contains("about page"));
        assert!(!page.text.contains("let hidden"));
        assert!(!page.text.contains("Portrait"));
        assert!(!page.text.contains("description"));
    }

    #[test]
    fn title_falls_back_to_first_h1() {
        let page = PageDocument::parse("# Only Heading\n\nBody.").unwrap();
        assert_eq!(page.title(), Some("Only Heading"));
        assert!(PageDocument::parse("Body only.").unwrap().title().is_none());
    }

    #[test]
    fn malformed_frontmatter_errors() {
        let err = PageDocument::parse("---\ntitle: [unclosed\n---\n\nBody.").unwrap_err();
        assert!(matches!(err, AnalysisError::Frontmatter(_)));
    }

    #[test]
    fn leading_thematic_break_is_not_frontmatter() {
        let input = "---\n\nIntro paragraph about 郭春林.\n\n---\n\nMore text.\n";
        let page = PageDocument::parse(input).unwrap();
        assert_eq!(page.frontmatter, Frontmatter::default());
        assert!(page.text.contains("Intro paragraph about 郭春林."));
        assert!(page.text.contains("More text."));

        let text = strip_to_text(input);
        assert!(text.contains("郭春林"));
    }

    #[test]
    fn opening_line_must_be_exactly_dashes() {
        let input = "--- note\ntitle: nope\n---\n\nBody.";
        let page = PageDocument::parse(input).unwrap();
        assert!(page.frontmatter.title.is_none());
        assert!(page.text.contains("Body."));
    }

    #[test]
    fn closing_delimiter_must_be_its_own_line() {
        let input = "---\ntitle: Open\n--- not a close\n";
        let page = PageDocument::parse(input).unwrap();
        assert!(page.frontmatter.title.is_none());
    }

    #[test]
    fn crlf_frontmatter_is_recognized() {
        let page = PageDocument::parse("---\r\ntitle: Windows\r\n---\r\n\r\nBody.").unwrap();
        assert_eq!(page.frontmatter.title.as_deref(), Some("Windows"));
        assert!(!page.text.contains("title"));
    }

    #[test]
    fn empty_frontmatter_is_default() {
        let page = PageDocument::parse("---\n---\n\nBody.").unwrap();
        assert_eq!(page.frontmatter, Frontmatter::default());
    }

    #[test]
    fn json_ld_from_html_script() {
        let input = "Intro.\n\n<script type=\"application/ld+json\">\n{\"@type\": \"Person\", \"name\": \"郭春林\"}\n</script>\n";
        let page = PageDocument::parse(input).unwrap();
        assert_eq!(page.json_ld.len(), 1);
        assert_eq!(page.json_ld[0]["@type"], "Person");
    }

    #[test]
    fn json_ld_from_fence_and_arrays() {
        let input = "```json-ld\n[{\"@type\": \"WebSite\"}, {\"@type\": \"Person\"}]\n```\n";
        let page = PageDocument::parse(input).unwrap();
        assert_eq!(page.json_ld.len(), 2);
        assert!(!page.text.contains("WebSite"));
    }

    #[test]
    fn malformed_json_ld_is_skipped() {
        let input = "```jsonld\n{not json}\n```\n";
        let page = PageDocument::parse(input).unwrap();
        assert!(page.json_ld.is_empty());
    }

    #[test]
    fn strip_to_text_drops_frontmatter() {
        let text = strip_to_text(PAGE);
        assert!(!text.contains("tags"));
        assert!(text.contains("郭春林的哲学课"));
    }

    #[test]
    fn protocol_relative_links_are_external() {
        let page = PageDocument::parse("[a](//cdn.example.com/x) [b](/local)").unwrap();
        assert_eq!(page.internal_link_count(), 1);
    }

    #[test]
    fn empty_input_returns_empty() {
        let page = PageDocument::parse("").unwrap();
        assert!(page.text.is_empty());
        assert!(page.headings.is_empty());
        assert!(strip_to_text("").is_empty());
    }
}
