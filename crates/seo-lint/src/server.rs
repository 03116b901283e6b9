//! MCP (Model Context Protocol) server implementation.
//!
//! Exposes keyword analysis and the page checklist to AI assistants over
//! stdio. Each tool delegates to `seo_lint_core`, the same functions the
//! CLI commands call, and returns pretty-printed JSON.

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::schemars;
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use serde::Serialize;

use seo_lint_core::{
    ChecklistContext, Config, DensityMode, KeywordTaxonomy, analyze_keywords, keyword_densities,
    run_checklist,
};

/// Parameters for the `get_info` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct GetInfoParams {
    /// Output format: "text" or "json"
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "text".to_string()
}

/// Parameters for the `analyze_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct AnalyzeKeywordsParams {
    /// The text to analyze.
    pub text: String,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
    /// Density counting: "token" (default) or "occurrence".
    pub density_mode: Option<DensityMode>,
}

/// Parameters for the `keyword_density` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct KeywordDensityParams {
    /// The text to analyze.
    pub text: String,
    /// Keywords to measure.
    pub keywords: Vec<String>,
    /// Whether to strip markdown formatting before analysis.
    #[serde(default)]
    pub strip_markdown: bool,
    /// Density counting: "token" (default) or "occurrence".
    pub density_mode: Option<DensityMode>,
}

/// Parameters for the `run_checklist` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct RunChecklistParams {
    /// The markdown page, including any YAML frontmatter.
    pub text: String,
}

/// Parameters for the `list_keywords` tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ListKeywordsParams {
    /// Group to list: "primary", "long-tail", "competitive" or "local".
    /// Omit for the whole taxonomy.
    pub group: Option<String>,
}

struct ServerSettings {
    config: Config,
    taxonomy: KeywordTaxonomy,
    max_input_bytes: Option<usize>,
}

/// MCP server exposing keyword analysis to AI assistants.
#[derive(Clone)]
pub struct ProjectServer {
    tool_router: rmcp::handler::server::router::tool::ToolRouter<Self>,
    settings: Arc<ServerSettings>,
}

impl Default for ProjectServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl ProjectServer {
    /// Create a server with default configuration and the built-in taxonomy.
    pub fn new() -> Self {
        let config = Config::default();
        let max_input_bytes = config.input_limit();
        Self::with_config(config, KeywordTaxonomy::builtin(), max_input_bytes)
    }

    /// Create a server using the loaded configuration.
    pub fn with_config(
        config: Config,
        taxonomy: KeywordTaxonomy,
        max_input_bytes: Option<usize>,
    ) -> Self {
        Self {
            tool_router: Self::tool_router(),
            settings: Arc::new(ServerSettings {
                config,
                taxonomy,
                max_input_bytes,
            }),
        }
    }

    /// Get project information.
    #[tool(description = "Get project name, version, and description")]
    #[tracing::instrument(skip(self), fields(otel.kind = "server"))]
    fn get_info(
        &self,
        Parameters(params): Parameters<GetInfoParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "get_info", format = %params.format, "executing MCP tool");

        let info = serde_json::json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
        });

        let text = if params.format == "json" {
            to_json(&info)?
        } else {
            format!(
                "{} v{}\n{}",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_DESCRIPTION"),
            )
        };

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Score keyword coverage against the configured taxonomy.
    #[tool(
        description = "Analyze keyword coverage of text: brand keyword density, primary and long-tail keyword presence, and improvement suggestions."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn analyze_keywords(
        &self,
        Parameters(params): Parameters<AnalyzeKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "analyze_keywords",
            strip_md = params.strip_markdown,
            "executing MCP tool"
        );
        self.check_input(&params.text)?;

        let coverage = self.coverage(params.density_mode);
        let report = analyze_keywords(
            &params.text,
            params.strip_markdown,
            &self.settings.taxonomy,
            &coverage,
            &self.settings.config.content,
        );

        tracing::info!(
            tool = "analyze_keywords",
            suggestions = report.suggestion_count(),
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// Measure density of arbitrary keywords.
    #[tool(description = "Measure density (percent) and presence of the given keywords in text.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn keyword_density(
        &self,
        Parameters(params): Parameters<KeywordDensityParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(
            tool = "keyword_density",
            keywords = params.keywords.len(),
            "executing MCP tool"
        );
        self.check_input(&params.text)?;
        if params.keywords.is_empty() {
            return Err(McpError::invalid_params(
                "keywords must not be empty".to_string(),
                None,
            ));
        }

        let coverage = self.coverage(params.density_mode);
        let metrics = keyword_densities(
            &params.text,
            params.strip_markdown,
            &params.keywords,
            &coverage,
        )
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        Ok(CallToolResult::success(vec![Content::text(to_json(&metrics)?)]))
    }

    /// Run the on-page SEO checklist.
    #[tool(
        description = "Run the on-page SEO checklist on a markdown page (title, meta description, structured data, brand density, length, links, H1, alt text). Returns a 0-100 score and recommendations."
    )]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn run_checklist(
        &self,
        Parameters(params): Parameters<RunChecklistParams>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = "run_checklist", "executing MCP tool");
        self.check_input(&params.text)?;

        let ctx = ChecklistContext {
            taxonomy: &self.settings.taxonomy,
            coverage: &self.settings.config.coverage,
            settings: &self.settings.config.checklist,
        };
        let report = run_checklist(&params.text, &ctx)
            .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

        tracing::info!(
            tool = "run_checklist",
            score = report.score,
            "MCP tool completed"
        );
        Ok(CallToolResult::success(vec![Content::text(to_json(&report)?)]))
    }

    /// List the active keyword taxonomy.
    #[tool(description = "List the keyword taxonomy in use, or one group of it.")]
    #[tracing::instrument(skip(self, params), fields(otel.kind = "server"))]
    fn list_keywords(
        &self,
        Parameters(params): Parameters<ListKeywordsParams>,
    ) -> Result<CallToolResult, McpError> {
        let taxonomy = &self.settings.taxonomy;
        let json = match params.group {
            Some(ref name) => {
                let keywords = taxonomy
                    .group(name)
                    .map_err(|e| McpError::invalid_params(e.to_string(), None))?;
                to_json(&serde_json::json!({ "group": name, "keywords": keywords }))?
            }
            None => to_json(taxonomy)?,
        };
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }
}

impl ProjectServer {
    fn check_input(&self, text: &str) -> Result<(), McpError> {
        if let Some(max) = self.settings.max_input_bytes
            && text.len() > max
        {
            return Err(McpError::invalid_params(
                format!("input too large: {} bytes (limit: {max} bytes)", text.len()),
                None,
            ));
        }
        Ok(())
    }

    fn coverage(&self, mode: Option<DensityMode>) -> seo_lint_core::CoverageSettings {
        let mut coverage = self.settings.config.coverage.clone();
        if let Some(mode) = mode {
            coverage.density_mode = mode;
        }
        coverage
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, McpError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("serialization error: {e}"), None))
}

#[tool_handler]
impl ServerHandler for ProjectServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(format!(
                "{} MCP server. Use analyze_keywords for keyword coverage, keyword_density for \
                 ad-hoc keywords, and run_checklist for on-page SEO checks of markdown pages.",
                env!("CARGO_PKG_NAME"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;

    fn extract_text(result: &CallToolResult) -> Option<&str> {
        result.content.first().and_then(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
    }

    fn json_of(result: &CallToolResult) -> serde_json::Value {
        let text = extract_text(result).expect("should have text content");
        serde_json::from_str(text).expect("valid JSON")
    }

    #[test]
    fn server_info_has_correct_name() {
        let server = ProjectServer::new();
        let info = ServerHandler::get_info(&server);
        assert_eq!(info.server_info.name, env!("CARGO_PKG_NAME"));
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn get_info_tool_returns_json_when_requested() {
        let server = ProjectServer::new();
        let result = server
            .get_info(Parameters(GetInfoParams {
                format: "json".to_string(),
            }))
            .expect("get_info should succeed");
        assert_eq!(json_of(&result)["name"], env!("CARGO_PKG_NAME"));
    }

    #[test]
    fn analyze_keywords_tool_works() {
        let server = ProjectServer::new();
        let result = server
            .analyze_keywords(Parameters(AnalyzeKeywordsParams {
                text: "郭春林是一位思想者。".to_string(),
                strip_markdown: false,
                density_mode: None,
            }))
            .expect("analyze_keywords should succeed");
        assert!(!result.is_error.unwrap_or(false));

        let json = json_of(&result);
        assert_eq!(json["brand"]["density"], 100.0);
        assert_eq!(json["coverage"]["primary"][0]["present"], true);
        let kinds: Vec<_> = json["coverage"]["suggestions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["kind"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds, vec!["density_too_high", "sparse_long_tail"]);
    }

    #[test]
    fn keyword_density_tool_honors_mode() {
        let server = ProjectServer::new();
        let result = server
            .keyword_density(Parameters(KeywordDensityParams {
                text: "acme widgets and acme widgets".to_string(),
                keywords: vec!["acme widgets".to_string()],
                strip_markdown: false,
                density_mode: Some(DensityMode::Occurrence),
            }))
            .expect("keyword_density should succeed");
        assert_eq!(json_of(&result)[0]["density"], 40.0);
    }

    #[test]
    fn keyword_density_requires_keywords() {
        let server = ProjectServer::new();
        let result = server.keyword_density(Parameters(KeywordDensityParams {
            text: "text".to_string(),
            keywords: Vec::new(),
            strip_markdown: false,
            density_mode: None,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn keyword_density_rejects_blank_keyword() {
        let server = ProjectServer::new();
        let result = server.keyword_density(Parameters(KeywordDensityParams {
            text: "text".to_string(),
            keywords: vec!["text".to_string(), String::new()],
            strip_markdown: false,
            density_mode: None,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn run_checklist_accepts_leading_thematic_break() {
        let server = ProjectServer::new();
        let result = server
            .run_checklist(Parameters(RunChecklistParams {
                text: "---\n\nIntro paragraph about 郭春林.\n\n---\n\nMore text.\n".to_string(),
            }))
            .expect("a page opening with a rule is not frontmatter");
        assert_eq!(json_of(&result)["total"], 9);
    }

    #[test]
    fn run_checklist_tool_works() {
        let server = ProjectServer::new();
        let result = server
            .run_checklist(Parameters(RunChecklistParams {
                text: "# 郭春林\n\nWatch [the channel](https://youtu.be/abc).".to_string(),
            }))
            .expect("run_checklist should succeed");
        let json = json_of(&result);
        assert_eq!(json["total"], 9);
        assert!(json["score"].as_u64().unwrap() > 0);
    }

    #[test]
    fn run_checklist_rejects_bad_frontmatter() {
        let server = ProjectServer::new();
        let result = server.run_checklist(Parameters(RunChecklistParams {
            text: "---\ntitle: [\n---\n".to_string(),
        }));
        assert!(result.is_err());
    }

    #[test]
    fn oversized_input_is_rejected() {
        let server = ProjectServer::with_config(Config::default(), KeywordTaxonomy::builtin(), Some(4));
        let result = server.analyze_keywords(Parameters(AnalyzeKeywordsParams {
            text: "too long for the limit".to_string(),
            strip_markdown: false,
            density_mode: None,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn list_keywords_tool_works() {
        let server = ProjectServer::new();
        let result = server
            .list_keywords(Parameters(ListKeywordsParams {
                group: Some("local".to_string()),
            }))
            .expect("list_keywords should succeed");
        assert_eq!(json_of(&result)["keywords"].as_array().unwrap().len(), 5);

        let err = server.list_keywords(Parameters(ListKeywordsParams {
            group: Some("nope".to_string()),
        }));
        assert!(err.is_err());
    }
}
