//! Keywords command: print the active taxonomy.

use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use seo_lint_core::KeywordTaxonomy;
use seo_lint_core::taxonomy::GROUP_NAMES;

/// Arguments for the `keywords` subcommand.
#[derive(Args, Debug, Default)]
pub struct KeywordsArgs {
    /// Show only one group (primary, long-tail, competitive, local).
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Serialize)]
struct GroupListing<'a> {
    group: &'a str,
    keywords: &'a [String],
}

/// Print the taxonomy, or one group of it.
#[instrument(name = "cmd_keywords", skip_all, fields(group = ?args.group))]
pub fn cmd_keywords(
    args: KeywordsArgs,
    global_json: bool,
    taxonomy: &KeywordTaxonomy,
) -> anyhow::Result<()> {
    debug!("executing keywords command");

    if let Some(ref name) = args.group {
        let keywords = taxonomy.group(name)?;
        if global_json {
            let listing = GroupListing {
                group: name,
                keywords,
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        } else {
            for keyword in keywords {
                println!("{keyword}");
            }
        }
        return Ok(());
    }

    if global_json {
        println!("{}", serde_json::to_string_pretty(taxonomy)?);
        return Ok(());
    }

    match taxonomy.brand_keyword() {
        Some(brand) => println!("{}: {}", "Brand".bold(), brand.green()),
        None => println!("{}: {}", "Brand".bold(), "(none)".dimmed()),
    }
    for name in GROUP_NAMES {
        let keywords = taxonomy.group(name)?;
        println!("\n{} ({})", name.bold().underline(), keywords.len());
        for keyword in keywords {
            println!("  {keyword}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_group_is_an_error() {
        let args = KeywordsArgs {
            group: Some("regional".to_string()),
        };
        let err = cmd_keywords(args, false, &KeywordTaxonomy::builtin()).unwrap_err();
        assert!(err.to_string().contains("regional"));
    }

    #[test]
    fn lists_all_groups() {
        assert!(cmd_keywords(KeywordsArgs::default(), false, &KeywordTaxonomy::builtin()).is_ok());
        assert!(cmd_keywords(KeywordsArgs::default(), true, &KeywordTaxonomy::builtin()).is_ok());
    }
}
