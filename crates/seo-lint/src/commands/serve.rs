//! Serve command: run the MCP server over stdio.

use anyhow::Context;
use clap::Args;
use rmcp::ServiceExt;
use tracing::{info, instrument};

use seo_lint_core::{Config, KeywordTaxonomy};

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP tools on stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
    taxonomy: KeywordTaxonomy,
) -> anyhow::Result<()> {
    info!(max_input_bytes = ?max_input_bytes, "starting MCP server on stdio");

    let server = ProjectServer::with_config(config, taxonomy, max_input_bytes);
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .context("failed to start MCP server")?;
    service.waiting().await.context("MCP server terminated abnormally")?;

    info!("MCP server stopped");
    Ok(())
}
