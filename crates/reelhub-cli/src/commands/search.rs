use super::{records_table, AppContext};
use crate::output::Output;
use color_eyre::Result;
use reelhub_core::{Catalog, SearchFederator, SearchOutcome};
use serde_json::json;

pub async fn run_search(ctx: &AppContext, query: &str, output: &Output) -> Result<()> {
    let federator = SearchFederator::new(ctx.sources.clone()).with_dedupe_by_title(ctx.config.search.dedupe_by_title);

    // A blank query never reads the catalog
    let catalog = if query.trim().is_empty() {
        Catalog::default()
    } else {
        ctx.load_catalog(output).await
    };

    match federator.search(&catalog, query).await {
        SearchOutcome::Inactive => {
            output.json(&json!({ "active": false }));
            if output.is_human() {
                output.info("Search inactive: give a title to search for");
            }
        }
        SearchOutcome::Results(results) => {
            if !output.is_human() {
                output.json(&json!({
                    "active": true,
                    "query": query.trim(),
                    "local": results.local,
                    "remote": results.remote,
                }));
                return Ok(());
            }

            if results.is_empty() {
                output.warn(format!("No matches for '{}'", query.trim()));
                return Ok(());
            }
            if output.is_quiet() {
                return Ok(());
            }
            if !results.local.is_empty() {
                println!("{}", records_table("In your catalog", &results.local));
            }
            if !results.remote.is_empty() {
                println!("{}", records_table("From the metadata source", &results.remote));
            }
            output.success(format!(
                "{} local, {} remote matches",
                results.local.len(),
                results.remote.len()
            ));
        }
    }
    Ok(())
}
